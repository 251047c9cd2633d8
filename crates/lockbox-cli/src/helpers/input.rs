//! Input handling helpers for usernames, passwords, and passkeys.
//!
//! Every prompt has three sources, tried in order: an environment
//! variable (secrets only), a line from piped stdin when no TTY is
//! attached, and finally an interactive dialoguer prompt. Secrets are
//! returned as [`Zeroizing`] strings so they are wiped on drop.

use std::io::{self, BufRead, IsTerminal};

use dialoguer::{Input, Password};
use zeroize::{Zeroize, Zeroizing};

/// Read a secret from an environment variable, if set and non-blank.
fn secret_from_env(var: &str) -> Option<Zeroizing<String>> {
    match std::env::var(var) {
        Ok(value) if !value.trim().is_empty() => Some(Zeroizing::new(value)),
        _ => None,
    }
}

/// Read one line from piped stdin, stripping the trailing newline.
fn read_piped_line(what: &str) -> anyhow::Result<String> {
    let mut line = String::new();
    let bytes = io::stdin()
        .lock()
        .read_line(&mut line)
        .map_err(|e| anyhow::anyhow!("Failed to read stdin: {}", e))?;
    if bytes == 0 {
        return Err(anyhow::anyhow!("No {} provided on stdin", what));
    }
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// Same as [`read_piped_line`], but wipes the intermediate buffer.
fn read_piped_secret(what: &str) -> anyhow::Result<Zeroizing<String>> {
    let mut line = read_piped_line(what)?;
    let secret = Zeroizing::new(line.clone());
    line.zeroize();
    Ok(secret)
}

/// Prompt for a visible value such as a username or the data to store.
///
/// Empty input is allowed; validation happens in the vault so that
/// every entry path reports the same errors.
pub fn prompt_text(prompt: &str) -> anyhow::Result<String> {
    if !io::stdin().is_terminal() {
        return read_piped_line("input");
    }
    Input::<String>::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()
        .map_err(|e| anyhow::anyhow!("Failed to read input: {}", e))
}

/// Prompt for the account password, or read `LOCKBOX_PASSWORD`.
pub fn prompt_password(prompt: &str) -> anyhow::Result<Zeroizing<String>> {
    if let Some(value) = secret_from_env("LOCKBOX_PASSWORD") {
        return Ok(value);
    }
    if !io::stdin().is_terminal() {
        return read_piped_secret("password");
    }
    Password::new()
        .with_prompt(prompt)
        .allow_empty_password(true)
        .interact()
        .map(Zeroizing::new)
        .map_err(|e| anyhow::anyhow!("Failed to read password: {}", e))
}

/// Prompt for a new password with confirmation (for `register`), or
/// read `LOCKBOX_PASSWORD`.
pub fn prompt_new_password(no_input: bool) -> anyhow::Result<Zeroizing<String>> {
    if let Some(value) = secret_from_env("LOCKBOX_PASSWORD") {
        return Ok(value);
    }
    if no_input {
        return Err(anyhow::anyhow!(
            "No password provided and prompts are disabled. Set LOCKBOX_PASSWORD."
        ));
    }
    if !io::stdin().is_terminal() {
        return read_piped_secret("password");
    }
    Password::new()
        .with_prompt("Password")
        .with_confirmation("Confirm password", "Passwords do not match")
        .interact()
        .map(Zeroizing::new)
        .map_err(|e| anyhow::anyhow!("Failed to read password: {}", e))
}

/// Prompt for the encryption passkey, or read `LOCKBOX_PASSKEY`.
pub fn prompt_passkey(prompt: &str) -> anyhow::Result<Zeroizing<String>> {
    if let Some(value) = secret_from_env("LOCKBOX_PASSKEY") {
        return Ok(value);
    }
    if !io::stdin().is_terminal() {
        return read_piped_secret("passkey");
    }
    Password::new()
        .with_prompt(prompt)
        .allow_empty_password(true)
        .interact()
        .map(Zeroizing::new)
        .map_err(|e| anyhow::anyhow!("Failed to read passkey: {}", e))
}
