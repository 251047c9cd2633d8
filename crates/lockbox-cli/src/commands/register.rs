use lockbox_core::VaultError;

use crate::app::AppContext;
use crate::cli::RegisterArgs;
use crate::errors::CliError;
use crate::helpers::input::{prompt_new_password, prompt_text};
use crate::ui;

/// Create a new account in the store.
///
/// The username comes from the positional argument or a prompt; the
/// password comes from `LOCKBOX_PASSWORD`, piped stdin, or a hidden
/// prompt with confirmation. Rejected input exits with a typed code so
/// scripts can tell "already exists" from harder failures.
pub fn handle_register(ctx: &AppContext, args: &RegisterArgs) -> anyhow::Result<()> {
    let mut vault = ctx.open_vault()?;

    let username = match &args.username {
        Some(value) => value.clone(),
        None if args.no_input => {
            return Err(anyhow::anyhow!("--no-input requires a username argument"));
        }
        None => prompt_text("Username")?,
    };
    let password = prompt_new_password(args.no_input)?;

    match vault.register(&username, &password) {
        Ok(()) => {
            if !ctx.quiet() {
                ui::print_success(&format!(
                    "Account '{}' created. You can now log in.",
                    username
                ));
            }
            Ok(())
        }
        Err(err @ (VaultError::AlreadyExists(_) | VaultError::InvalidInput(_))) => {
            CliError::invalid_input(err.to_string()).exit()
        }
        Err(err) => Err(err.into()),
    }
}
