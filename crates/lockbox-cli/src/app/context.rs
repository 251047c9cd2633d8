use std::path::PathBuf;

use once_cell::unsync::OnceCell;

use lockbox_core::{JsonFileStore, Vault};

use crate::cli::Cli;
use crate::config::LockboxConfig;

use super::resolver::{load_config, resolve_store_path};

/// Application context holding parsed CLI arguments and lazily loaded
/// configuration. Handlers receive a shared reference and pull what
/// they need from it.
pub struct AppContext<'a> {
    cli: &'a Cli,
    config: OnceCell<Option<LockboxConfig>>,
}

impl<'a> AppContext<'a> {
    pub fn new(cli: &'a Cli) -> Self {
        Self {
            cli,
            config: OnceCell::new(),
        }
    }

    pub fn cli(&self) -> &Cli {
        self.cli
    }

    pub fn quiet(&self) -> bool {
        self.cli.quiet
    }

    /// The config file contents, read at most once. `None` when no
    /// config file exists.
    pub fn config(&self) -> anyhow::Result<Option<&LockboxConfig>> {
        self.config.get_or_try_init(load_config).map(Option::as_ref)
    }

    /// Resolve the store path from the flag, environment, config file,
    /// or XDG default, in that order.
    pub fn store_path(&self) -> anyhow::Result<PathBuf> {
        resolve_store_path(self.cli, self.config()?)
    }

    /// Open the vault backed by the resolved store file. A missing
    /// file yields an empty vault; it is created on first write.
    pub fn open_vault(&self) -> anyhow::Result<Vault<JsonFileStore>> {
        let path = self.store_path()?;
        let store = JsonFileStore::open(&path)
            .map_err(|e| anyhow::anyhow!("Failed to open store {}: {}", path.display(), e))?;
        Ok(Vault::new(store))
    }
}
