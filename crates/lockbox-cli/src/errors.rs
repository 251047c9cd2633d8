//! CLI error types with typed exit codes.
//!
//! Handlers bubble unexpected failures through `anyhow` (exit code 1).
//! Failures a calling script is expected to branch on go through
//! [`CliError`] instead, which maps each class to a stable exit code.

use std::fmt;

use crate::constants::exit_codes;

/// Errors that terminate the process with a well-known exit code.
#[derive(Debug)]
pub enum CliError {
    /// Input was rejected (empty fields, duplicate account, bad usage)
    InvalidInput(String),

    /// Authentication failed or the account is locked out
    AuthFailed(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::InvalidInput(message) => write!(f, "{}", message),
            CliError::AuthFailed(message) => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for CliError {}

impl CliError {
    /// Create an invalid input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        CliError::InvalidInput(message.into())
    }

    /// Create an authentication failure error
    pub fn auth_failed(message: impl Into<String>) -> Self {
        CliError::AuthFailed(message.into())
    }

    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidInput(_) => exit_codes::INVALID_INPUT,
            CliError::AuthFailed(_) => exit_codes::AUTH_FAILED,
        }
    }

    /// Print the error to stderr and exit with the mapped code
    pub fn exit(self) -> ! {
        eprintln!("Error: {}", self);
        std::process::exit(self.exit_code());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_are_distinct() {
        let invalid = CliError::invalid_input("bad");
        let auth = CliError::auth_failed("denied");
        assert_eq!(invalid.exit_code(), 4);
        assert_eq!(auth.exit_code(), 5);
    }

    #[test]
    fn test_display_shows_message_only() {
        let err = CliError::invalid_input("Account already exists: alice");
        assert_eq!(err.to_string(), "Account already exists: alice");
    }
}
