//! Account registration and credential verification.
//!
//! Stateless services over a [`UserStore`]: the registry owns no data and
//! holds no session state, so both functions borrow whichever store the
//! vault was built on.

use crate::crypto::hash_password;
use crate::error::{Result, VaultError};
use crate::store::{UserRecord, UserStore};

/// Create an account.
///
/// Field validation runs before any hashing or store access; a duplicate
/// username leaves the store untouched. On success the record is persisted
/// with a hashed password and an empty blob sequence.
///
/// # Errors
///
/// - [`VaultError::InvalidInput`] if the username or password is empty
/// - [`VaultError::AlreadyExists`] if the username is taken
/// - [`VaultError::Storage`] if the record cannot be persisted
pub fn register<S: UserStore>(store: &mut S, username: &str, password: &str) -> Result<()> {
    if username.is_empty() || password.is_empty() {
        return Err(VaultError::InvalidInput(
            "Both a username and a password are required".to_string(),
        ));
    }
    store.insert(UserRecord::new(username, hash_password(password)))
}

/// Check a username/password pair against the store.
///
/// Returns `false` both for an unknown username and for a digest mismatch;
/// the caller cannot tell which, so a failed login does not confirm whether
/// an account exists.
///
/// # Errors
///
/// Returns [`VaultError::Storage`] if the store cannot be read.
pub fn verify_credentials<S: UserStore>(
    store: &S,
    username: &str,
    password: &str,
) -> Result<bool> {
    match store.fetch(username)? {
        Some(record) => Ok(record.password_hash == hash_password(password)),
        None => Ok(false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn test_register_then_verify() {
        let mut store = MemoryStore::new();
        register(&mut store, "alice", "pw1").unwrap();

        assert!(verify_credentials(&store, "alice", "pw1").unwrap());
        assert!(!verify_credentials(&store, "alice", "pw2").unwrap());
    }

    #[test]
    fn test_unknown_user_verifies_false() {
        let store = MemoryStore::new();
        assert!(!verify_credentials(&store, "nobody", "pw1").unwrap());
    }

    #[test]
    fn test_empty_fields_rejected_before_store_access() {
        let mut store = MemoryStore::new();

        let result = register(&mut store, "", "pw1");
        assert!(matches!(result, Err(VaultError::InvalidInput(_))));

        let result = register(&mut store, "alice", "");
        assert!(matches!(result, Err(VaultError::InvalidInput(_))));

        assert!(store.usernames().unwrap().is_empty());
    }

    #[test]
    fn test_duplicate_username_rejected_without_mutation() {
        let mut store = MemoryStore::new();
        register(&mut store, "alice", "pw1").unwrap();
        let original = store.fetch("alice").unwrap().unwrap();

        let result = register(&mut store, "alice", "pw2");
        assert!(matches!(result, Err(VaultError::AlreadyExists(_))));
        assert_eq!(store.fetch("alice").unwrap().unwrap(), original);
        // The original password still works.
        assert!(verify_credentials(&store, "alice", "pw1").unwrap());
    }

    #[test]
    fn test_stored_digest_is_not_the_password() {
        let mut store = MemoryStore::new();
        register(&mut store, "alice", "pw1").unwrap();

        let record = store.fetch("alice").unwrap().unwrap();
        assert_ne!(record.password_hash, "pw1");
        assert_eq!(record.password_hash, hash_password("pw1"));
    }
}
