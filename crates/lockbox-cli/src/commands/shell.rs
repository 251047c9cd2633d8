//! Interactive vault session.
//!
//! The shell owns one [`Session`] for its lifetime, so the lockout
//! state machine behaves exactly as it does in the library: three bad
//! logins lock the session for sixty seconds, and quitting the shell
//! discards the session entirely.
//!
//! With a TTY, commands are read through dialoguer with tab
//! completion and errors keep the loop alive. When stdin is piped,
//! lines are read directly and the first failed operation ends the
//! process with a typed exit code so scripts stop at the failure.

use std::io::{self, BufRead, IsTerminal};

use dialoguer::{Completion, Input};

use lockbox_core::{JsonFileStore, Session, SessionStatus, Vault, VaultError, VERSION};

use crate::app::AppContext;
use crate::errors::CliError;
use crate::helpers::input::{prompt_new_password, prompt_passkey, prompt_password, prompt_text};
use crate::ui;

const SHELL_COMMANDS: &[&str] = &[
    "help", "login", "logout", "quit", "register", "retrieve", "status", "store",
];

struct CommandCompletion;

impl Completion for CommandCompletion {
    fn get(&self, input: &str) -> Option<String> {
        if input.is_empty() {
            return None;
        }
        let matches: Vec<&&str> = SHELL_COMMANDS
            .iter()
            .filter(|command| command.starts_with(input))
            .collect();
        if matches.len() == 1 {
            Some(matches[0].to_string())
        } else {
            None
        }
    }
}

pub fn handle_shell(ctx: &AppContext) -> anyhow::Result<()> {
    let mut vault = ctx.open_vault()?;
    let mut session = Session::new();
    let interactive = io::stdin().is_terminal();
    let completion = CommandCompletion;

    if !ctx.quiet() {
        ui::print_info(&format!(
            "Lockbox v{} - type 'help' for commands, 'quit' to leave.",
            VERSION
        ));
    }

    loop {
        let Some(line) = next_command(interactive, &completion)? else {
            break;
        };
        match line.as_str() {
            "" => continue,
            "help" => print_help(),
            "status" => print_status(&session),
            "register" => register(&mut vault, interactive)?,
            "login" => login(&vault, &mut session, interactive)?,
            "store" => store(&mut vault, &session, interactive)?,
            "retrieve" => retrieve(&vault, &session, interactive)?,
            "logout" => {
                session.logout();
                ui::print_info("Logged out.");
            }
            "quit" | "exit" => break,
            other => unknown_command(other, interactive)?,
        }
    }
    Ok(())
}

/// Read the next command line. `None` means stdin is exhausted and the
/// shell should end cleanly.
fn next_command(
    interactive: bool,
    completion: &CommandCompletion,
) -> anyhow::Result<Option<String>> {
    if !interactive {
        let mut line = String::new();
        let bytes = io::stdin()
            .lock()
            .read_line(&mut line)
            .map_err(|e| anyhow::anyhow!("Failed to read stdin: {}", e))?;
        if bytes == 0 {
            return Ok(None);
        }
        return Ok(Some(line.trim().to_string()));
    }
    let line: String = Input::<String>::new()
        .with_prompt("lockbox")
        .completion_with(completion)
        .allow_empty(true)
        .interact_text()
        .map_err(|e| anyhow::anyhow!("Failed to read command: {}", e))?;
    Ok(Some(line.trim().to_string()))
}

fn register(vault: &mut Vault<JsonFileStore>, interactive: bool) -> anyhow::Result<()> {
    let username = prompt_text("Username")?;
    let password = prompt_new_password(false)?;
    match vault.register(&username, &password) {
        Ok(()) => {
            ui::print_success("Registration successful. You can now log in.");
            Ok(())
        }
        Err(err) => report(err, interactive),
    }
}

fn login(
    vault: &Vault<JsonFileStore>,
    session: &mut Session,
    interactive: bool,
) -> anyhow::Result<()> {
    let username = prompt_text("Username")?;
    let password = prompt_password("Password")?;
    match vault.login(session, &username, &password) {
        Ok(()) => {
            ui::print_success(&format!("Logged in as {}.", username));
            Ok(())
        }
        Err(err) => report(err, interactive),
    }
}

fn store(
    vault: &mut Vault<JsonFileStore>,
    session: &Session,
    interactive: bool,
) -> anyhow::Result<()> {
    let data = prompt_text("Data")?;
    let passkey = prompt_passkey("Passkey")?;
    match vault.store_blob(session, &data, &passkey) {
        Ok(()) => {
            ui::print_success("Data stored securely.");
            Ok(())
        }
        Err(err) => report(err, interactive),
    }
}

fn retrieve(
    vault: &Vault<JsonFileStore>,
    session: &Session,
    interactive: bool,
) -> anyhow::Result<()> {
    let passkey = prompt_passkey("Passkey")?;
    match vault.retrieve_blobs(session, &passkey) {
        Ok(items) if items.is_empty() => {
            ui::print_info("No data stored yet.");
            Ok(())
        }
        Ok(items) => {
            println!("{}", ui::blob_table(&items));
            Ok(())
        }
        Err(err) => report(err, interactive),
    }
}

fn print_status(session: &Session) {
    match session.status() {
        SessionStatus::Anonymous => ui::print_info("Not logged in."),
        SessionStatus::Locked { remaining_seconds } => ui::print_warning(&format!(
            "Locked. Try again in {} seconds.",
            remaining_seconds
        )),
        SessionStatus::Authenticated { username } => {
            ui::print_info(&format!("Logged in as {}.", username))
        }
    }
}

fn print_help() {
    println!("Commands:");
    println!("  register   Create a new account");
    println!("  login      Log in to an account");
    println!("  store      Encrypt and store a line of data");
    println!("  retrieve   Decrypt stored data with a passkey");
    println!("  status     Show the session state");
    println!("  logout     End the authenticated session");
    println!("  help       Show this message");
    println!("  quit       Leave the shell");
}

fn unknown_command(name: &str, interactive: bool) -> anyhow::Result<()> {
    let message = format!("Unknown command: {}", name);
    if interactive {
        ui::print_error(&message);
        ui::print_info("Type 'help' to list commands.");
        Ok(())
    } else {
        CliError::invalid_input(message).exit()
    }
}

/// Surface a vault error. Interactive sessions print it and keep
/// going; scripted sessions exit with the mapped code. Storage and
/// crypto failures are never downgraded to a printed line.
fn report(err: VaultError, interactive: bool) -> anyhow::Result<()> {
    match &err {
        VaultError::Storage(_) | VaultError::Crypto(_) => Err(err.into()),
        VaultError::InvalidCredentials
        | VaultError::LockedOut { .. }
        | VaultError::Unauthenticated => {
            if interactive {
                ui::print_error(&user_message(&err));
                Ok(())
            } else {
                CliError::auth_failed(user_message(&err)).exit()
            }
        }
        _ => {
            if interactive {
                ui::print_error(&user_message(&err));
                Ok(())
            } else {
                CliError::invalid_input(user_message(&err)).exit()
            }
        }
    }
}

fn user_message(err: &VaultError) -> String {
    match err {
        VaultError::LockedOut { remaining_seconds } => format!(
            "Too many failed attempts. Please wait {} seconds.",
            remaining_seconds
        ),
        other => other.to_string(),
    }
}
