//! Repository trait for user records.
//!
//! The `UserStore` trait is the seam between the vault's logic and whatever
//! holds the username → record mapping. Tests run on the in-memory backend;
//! production uses the JSON file backend. Nothing above this trait knows or
//! cares how the mapping is serialized.

use super::types::{EncryptedBlob, UserRecord};
use crate::error::Result;

/// Repository interface over the username → record mapping.
///
/// All implementations must ensure:
/// - Usernames are unique; a duplicate insert is rejected without mutation
/// - Per-user blob order is insertion order, and blobs are append-only
/// - A mutation is durable before the call returns; backends with a durable
///   medium persist the whole mapping rather than exposing partial writes
pub trait UserStore: Send {
    /// Fetch the record for a username, if one is registered.
    ///
    /// # Errors
    ///
    /// Returns `VaultError::Storage` if the backing medium cannot be read.
    fn fetch(&self, username: &str) -> Result<Option<UserRecord>>;

    /// Insert the record for a previously unseen username.
    ///
    /// # Errors
    ///
    /// Returns `VaultError::AlreadyExists` if the username is taken (the
    /// existing record is left untouched), or `VaultError::Storage` if the
    /// mutation cannot be persisted.
    fn insert(&mut self, record: UserRecord) -> Result<()>;

    /// Append one encrypted blob to an existing user's sequence.
    ///
    /// # Errors
    ///
    /// Returns `VaultError::Storage` if no record exists for `username` or
    /// the mutation cannot be persisted.
    fn append_blob(&mut self, username: &str, blob: EncryptedBlob) -> Result<()>;

    /// All registered usernames, in no particular order.
    ///
    /// # Errors
    ///
    /// Returns `VaultError::Storage` if the backing medium cannot be read.
    fn usernames(&self) -> Result<Vec<String>>;

    /// Whether a username is registered.
    ///
    /// # Errors
    ///
    /// Same conditions as [`UserStore::fetch`].
    fn contains(&self, username: &str) -> Result<bool> {
        Ok(self.fetch(username)?.is_some())
    }
}
