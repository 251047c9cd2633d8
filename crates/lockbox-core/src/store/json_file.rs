//! JSON file store backend.
//!
//! One JSON document holds the whole username → record mapping:
//!
//! ```json
//! {
//!   "alice": {
//!     "password": "<64 hex chars>",
//!     "data": ["<token>", "<token>"]
//!   }
//! }
//! ```
//!
//! The file is read wholesale when the store is opened and rewritten
//! wholesale after every mutation. A missing file is an empty store; the
//! file appears on the first save. Each save goes through a temp file
//! followed by a rename, so a crash mid-save cannot leave a half-written
//! mapping, and the file is restricted to its owner on Unix.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::traits::UserStore;
use super::types::{EncryptedBlob, UserRecord};
use crate::error::{Result, VaultError};

/// On-disk shape of one record; the username lives in the map key.
#[derive(Debug, Deserialize)]
struct RecordFromDisk {
    password: String,
    data: Vec<EncryptedBlob>,
}

#[derive(Serialize)]
struct RecordToDisk<'a> {
    password: &'a str,
    data: &'a [EncryptedBlob],
}

/// Durable username → record mapping backed by a single JSON file.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    users: HashMap<String, UserRecord>,
}

impl JsonFileStore {
    /// Open the store at `path`, loading the whole mapping into memory.
    ///
    /// A missing file yields an empty store.
    ///
    /// # Errors
    ///
    /// Returns `VaultError::Storage` if the file exists but cannot be read
    /// or does not parse as the expected mapping.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let users: HashMap<String, UserRecord> = match fs::read_to_string(&path) {
            Ok(contents) => {
                let on_disk: BTreeMap<String, RecordFromDisk> = serde_json::from_str(&contents)?;
                on_disk
                    .into_iter()
                    .map(|(username, record)| {
                        let record = UserRecord {
                            username: username.clone(),
                            password_hash: record.password,
                            blobs: record.data,
                        };
                        (username, record)
                    })
                    .collect()
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => HashMap::new(),
            Err(err) => return Err(err.into()),
        };
        Ok(Self { path, users })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Rewrite the whole mapping to disk.
    fn save(&self) -> Result<()> {
        let on_disk: BTreeMap<&str, RecordToDisk<'_>> = self
            .users
            .values()
            .map(|record| {
                (
                    record.username.as_str(),
                    RecordToDisk {
                        password: &record.password_hash,
                        data: &record.blobs,
                    },
                )
            })
            .collect();
        let contents = serde_json::to_string_pretty(&on_disk)?;
        self.write_atomically(contents.as_bytes())
    }

    /// Write via a temp file sibling, then rename over the destination.
    fn write_atomically(&self, contents: &[u8]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let temp_path = self.path.with_extension("json.tmp");
        fs::write(&temp_path, contents)?;
        set_owner_only(&temp_path)?;

        if let Err(initial_err) = fs::rename(&temp_path, &self.path) {
            // Some platforms refuse to rename over an existing file.
            let _ = fs::remove_file(&self.path);
            if let Err(retry_err) = fs::rename(&temp_path, &self.path) {
                let _ = fs::remove_file(&temp_path);
                return Err(VaultError::Storage(format!(
                    "Failed to replace {} (initial: {}, retry: {})",
                    self.path.display(),
                    initial_err,
                    retry_err
                )));
            }
        }
        Ok(())
    }
}

fn set_owner_only(path: &Path) -> io::Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = fs::metadata(path)?.permissions();
        perms.set_mode(0o600);
        fs::set_permissions(path, perms)?;
    }
    Ok(())
}

impl UserStore for JsonFileStore {
    fn fetch(&self, username: &str) -> Result<Option<UserRecord>> {
        Ok(self.users.get(username).cloned())
    }

    fn insert(&mut self, record: UserRecord) -> Result<()> {
        if self.users.contains_key(&record.username) {
            return Err(VaultError::AlreadyExists(record.username.clone()));
        }
        let username = record.username.clone();
        self.users.insert(username.clone(), record);
        if let Err(err) = self.save() {
            // Keep memory and disk in step when the save fails.
            self.users.remove(&username);
            return Err(err);
        }
        Ok(())
    }

    fn append_blob(&mut self, username: &str, blob: EncryptedBlob) -> Result<()> {
        let record = self
            .users
            .get_mut(username)
            .ok_or_else(|| VaultError::Storage(format!("No record for user '{}'", username)))?;
        record.blobs.push(blob);
        if let Err(err) = self.save() {
            if let Some(record) = self.users.get_mut(username) {
                record.blobs.pop();
            }
            return Err(err);
        }
        Ok(())
    }

    fn usernames(&self) -> Result<Vec<String>> {
        Ok(self.users.keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_open_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("store.json");

        let store = JsonFileStore::open(&path).unwrap();
        assert!(store.usernames().unwrap().is_empty());
        // Nothing is written until the first mutation.
        assert!(!path.exists());
    }

    #[test]
    fn test_insert_persists_across_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("store.json");

        let mut store = JsonFileStore::open(&path).unwrap();
        store.insert(UserRecord::new("alice", "digest")).unwrap();
        drop(store);

        let reopened = JsonFileStore::open(&path).unwrap();
        let record = reopened.fetch("alice").unwrap().unwrap();
        assert_eq!(record.password_hash, "digest");
        assert!(record.blobs.is_empty());
    }

    #[test]
    fn test_append_persists_order_across_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("store.json");

        let mut store = JsonFileStore::open(&path).unwrap();
        store.insert(UserRecord::new("alice", "digest")).unwrap();
        store
            .append_blob("alice", EncryptedBlob::new("first"))
            .unwrap();
        store
            .append_blob("alice", EncryptedBlob::new("second"))
            .unwrap();
        drop(store);

        let reopened = JsonFileStore::open(&path).unwrap();
        let record = reopened.fetch("alice").unwrap().unwrap();
        let tokens: Vec<&str> = record.blobs.iter().map(EncryptedBlob::as_str).collect();
        assert_eq!(tokens, vec!["first", "second"]);
    }

    #[test]
    fn test_on_disk_shape() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("store.json");

        let mut store = JsonFileStore::open(&path).unwrap();
        store.insert(UserRecord::new("alice", "digest")).unwrap();
        store
            .append_blob("alice", EncryptedBlob::new("token-1"))
            .unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["alice"]["password"], "digest");
        assert_eq!(raw["alice"]["data"][0], "token-1");
        // The username is the key, not a field of the record.
        assert!(raw["alice"].get("username").is_none());
    }

    #[test]
    fn test_reads_externally_written_mapping() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("store.json");
        fs::write(
            &path,
            r#"{"alice": {"password": "abc123", "data": ["tok-a", "tok-b"]}}"#,
        )
        .unwrap();

        let store = JsonFileStore::open(&path).unwrap();
        let record = store.fetch("alice").unwrap().unwrap();
        assert_eq!(record.password_hash, "abc123");
        assert_eq!(record.blobs.len(), 2);
    }

    #[test]
    fn test_corrupt_file_is_a_storage_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("store.json");
        fs::write(&path, "{ not json").unwrap();

        let result = JsonFileStore::open(&path);
        assert!(matches!(result, Err(VaultError::Storage(_))));
    }

    #[test]
    fn test_duplicate_insert_leaves_file_untouched() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("store.json");

        let mut store = JsonFileStore::open(&path).unwrap();
        store.insert(UserRecord::new("alice", "original")).unwrap();
        let before = fs::read_to_string(&path).unwrap();

        let result = store.insert(UserRecord::new("alice", "replacement"));
        assert!(matches!(result, Err(VaultError::AlreadyExists(_))));
        assert_eq!(fs::read_to_string(&path).unwrap(), before);
    }

    #[cfg(unix)]
    #[test]
    fn test_store_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let path = dir.path().join("store.json");

        let mut store = JsonFileStore::open(&path).unwrap();
        store.insert(UserRecord::new("alice", "digest")).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
