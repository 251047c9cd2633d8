//! Error types for Lockbox core operations.
//!
//! This module defines the error hierarchy for all core operations.
//! Every variant is recoverable from the caller's point of view; the CLI
//! layer maps these to user-facing messages and exit codes.

use thiserror::Error;

/// Result type alias for Lockbox operations.
pub type Result<T> = std::result::Result<T, VaultError>;

/// Core error type for Lockbox operations.
#[derive(Debug, Error)]
pub enum VaultError {
    /// A required field was empty or otherwise unusable
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Registration attempted for a username that is already taken
    #[error("Account already exists: {0}")]
    AlreadyExists(String),

    /// Login rejected; does not reveal whether the username exists
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// Login rejected because the session is inside a lockout window
    #[error("Too many failed attempts; locked for {remaining_seconds}s")]
    LockedOut {
        /// Whole seconds left in the lockout window, truncated.
        remaining_seconds: u64,
    },

    /// Data operation attempted without a logged-in session
    #[error("Login required")]
    Unauthenticated,

    /// Wrong passkey or corrupted ciphertext; carries no detail about the cause
    #[error("Incorrect passkey or corrupted data")]
    DecryptionFailure,

    /// Storage backend error
    #[error("Storage error: {0}")]
    Storage(String),

    /// Key derivation or cipher construction error
    #[error("Encryption error: {0}")]
    Crypto(String),
}

impl From<std::io::Error> for VaultError {
    fn from(err: std::io::Error) -> Self {
        VaultError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for VaultError {
    fn from(err: serde_json::Error) -> Self {
        VaultError::Storage(err.to_string())
    }
}
