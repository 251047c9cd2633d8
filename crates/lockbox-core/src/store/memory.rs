//! In-memory store backend.
//!
//! Backs tests and hosts that want vault semantics without touching disk.
//! Contents vanish with the process.

use std::collections::HashMap;

use super::traits::UserStore;
use super::types::{EncryptedBlob, UserRecord};
use crate::error::{Result, VaultError};

/// Volatile username → record mapping.
#[derive(Debug, Default)]
pub struct MemoryStore {
    users: HashMap<String, UserRecord>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl UserStore for MemoryStore {
    fn fetch(&self, username: &str) -> Result<Option<UserRecord>> {
        Ok(self.users.get(username).cloned())
    }

    fn insert(&mut self, record: UserRecord) -> Result<()> {
        if self.users.contains_key(&record.username) {
            return Err(VaultError::AlreadyExists(record.username.clone()));
        }
        self.users.insert(record.username.clone(), record);
        Ok(())
    }

    fn append_blob(&mut self, username: &str, blob: EncryptedBlob) -> Result<()> {
        let record = self
            .users
            .get_mut(username)
            .ok_or_else(|| VaultError::Storage(format!("No record for user '{}'", username)))?;
        record.blobs.push(blob);
        Ok(())
    }

    fn usernames(&self) -> Result<Vec<String>> {
        Ok(self.users.keys().cloned().collect())
    }
}
