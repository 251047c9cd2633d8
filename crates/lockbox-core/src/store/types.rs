//! Core data types for the persistence layer.

use serde::{Deserialize, Serialize};

/// An opaque authenticated-ciphertext token produced by the blob cipher.
///
/// The inner string is a complete, self-contained Fernet token. Positions in
/// a user's blob sequence are display-only (1-based) and never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EncryptedBlob(String);

impl EncryptedBlob {
    /// Wrap an already-encrypted token.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The token text, exactly as stored.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A registered account and its encrypted blobs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    /// Unique account name; also the key the record is stored under
    pub username: String,

    /// Hex PBKDF2 digest of the login password (never the password itself)
    pub password_hash: String,

    /// Encrypted blobs in insertion order; append-only
    pub blobs: Vec<EncryptedBlob>,
}

impl UserRecord {
    /// Create the record for a freshly registered account (no blobs yet).
    pub fn new(username: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password_hash: password_hash.into(),
            blobs: Vec::new(),
        }
    }
}
