use std::path::PathBuf;

use crate::cli::Cli;
use crate::config::{
    default_config_path, default_store_path, read_config, LockboxConfig,
};

/// Resolve the config file path, honoring the `LOCKBOX_CONFIG`
/// environment variable override.
pub fn resolve_config_path() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("LOCKBOX_CONFIG") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value));
        }
    }
    default_config_path()
}

/// Read the config file if one exists.
pub fn load_config() -> anyhow::Result<Option<LockboxConfig>> {
    let path = resolve_config_path()?;
    if !path.exists() {
        return Ok(None);
    }
    Ok(Some(read_config(&path)?))
}

/// Pick the store path. The `--store` flag (which clap also fills from
/// `LOCKBOX_STORE`) wins, then the config file, then the XDG default.
pub fn resolve_store_path(cli: &Cli, config: Option<&LockboxConfig>) -> anyhow::Result<PathBuf> {
    if let Some(path) = &cli.store {
        return Ok(PathBuf::from(path));
    }
    if let Some(config) = config {
        return Ok(PathBuf::from(&config.store.path));
    }
    default_store_path()
}
