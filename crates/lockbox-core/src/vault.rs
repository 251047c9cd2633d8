//! Vault operations: the surface a host process wraps.
//!
//! A [`Vault`] owns its backing store and exposes the four operations of
//! the system (register, login, store, retrieve) and nothing else. Sessions
//! are created by the host (one per logical user session) and passed into
//! each gated call; the vault itself is identity-free.

use chrono::{DateTime, Utc};

use crate::crypto;
use crate::error::{Result, VaultError};
use crate::registry;
use crate::session::Session;
use crate::store::{EncryptedBlob, UserStore};

/// One item from a retrieve call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetrievedBlob {
    /// 1-based display position in the user's sequence.
    pub index: usize,

    /// The decrypted text, or `None` for a wrong passkey or corrupted
    /// token. The two causes are not distinguished.
    pub plaintext: Option<String>,
}

/// A user store plus the operations the host exposes over it.
#[derive(Debug)]
pub struct Vault<S: UserStore> {
    store: S,
}

impl<S: UserStore> Vault<S> {
    /// Wrap a backing store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Read-only access to the backing store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Register a new account.
    ///
    /// Needs no session and logs nobody in.
    ///
    /// # Errors
    ///
    /// See [`registry::register`].
    pub fn register(&mut self, username: &str, password: &str) -> Result<()> {
        registry::register(&mut self.store, username, password)
    }

    /// Attempt a login against the wall clock.
    ///
    /// # Errors
    ///
    /// See [`Vault::login_at`].
    pub fn login(&self, session: &mut Session, username: &str, password: &str) -> Result<()> {
        self.login_at(session, username, password, Utc::now())
    }

    /// Attempt a login as of `now`.
    ///
    /// The lockout gate runs first: while the session is locked no
    /// credential check happens at all. A failed check counts toward the
    /// session's lockout threshold; a successful one authenticates the
    /// session and resets the counter.
    ///
    /// # Errors
    ///
    /// - [`VaultError::LockedOut`] while the session's window is open
    /// - [`VaultError::InvalidCredentials`] on a failed check
    /// - [`VaultError::Storage`] if the store cannot be read
    pub fn login_at(
        &self,
        session: &mut Session,
        username: &str,
        password: &str,
        now: DateTime<Utc>,
    ) -> Result<()> {
        session.ensure_can_attempt(now)?;
        if registry::verify_credentials(&self.store, username, password)? {
            session.record_success(username);
            Ok(())
        } else {
            session.record_failure(now);
            Err(VaultError::InvalidCredentials)
        }
    }

    /// Encrypt `plaintext` under `passkey` and append it to the logged-in
    /// user's sequence, persisting the store.
    ///
    /// # Errors
    ///
    /// - [`VaultError::Unauthenticated`] without a logged-in session; this
    ///   wins over every other check
    /// - [`VaultError::InvalidInput`] if the plaintext or passkey is empty
    /// - [`VaultError::Crypto`] if the cipher cannot be constructed
    /// - [`VaultError::Storage`] if the append cannot be persisted
    pub fn store_blob(&mut self, session: &Session, plaintext: &str, passkey: &str) -> Result<()> {
        let username = session.require_authenticated()?;
        if plaintext.is_empty() || passkey.is_empty() {
            return Err(VaultError::InvalidInput(
                "Both the data and a passkey are required".to_string(),
            ));
        }
        let token = crypto::encrypt_text(plaintext, passkey)?;
        self.store.append_blob(username, EncryptedBlob::new(token))
    }

    /// Decrypt every stored blob for the logged-in user with `passkey`.
    ///
    /// Items fail independently; one bad token never aborts the rest.
    /// Results keep insertion order and carry the 1-based display position.
    /// A user with nothing stored gets an empty list.
    ///
    /// # Errors
    ///
    /// - [`VaultError::Unauthenticated`] without a logged-in session
    /// - [`VaultError::InvalidInput`] if the passkey is empty
    /// - [`VaultError::Storage`] if the store cannot be read
    pub fn retrieve_blobs(&self, session: &Session, passkey: &str) -> Result<Vec<RetrievedBlob>> {
        let username = session.require_authenticated()?;
        if passkey.is_empty() {
            return Err(VaultError::InvalidInput(
                "A passkey is required".to_string(),
            ));
        }
        let record = self
            .store
            .fetch(username)?
            .ok_or_else(|| VaultError::Storage(format!("No record for user '{}'", username)))?;
        Ok(record
            .blobs
            .iter()
            .enumerate()
            .map(|(position, blob)| RetrievedBlob {
                index: position + 1,
                plaintext: crypto::decrypt_text(blob.as_str(), passkey).ok(),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn vault_with_alice() -> Vault<MemoryStore> {
        let mut vault = Vault::new(MemoryStore::new());
        vault.register("alice", "pw1").unwrap();
        vault
    }

    #[test]
    fn test_unauthenticated_calls_always_rejected() {
        let mut vault = vault_with_alice();
        let session = Session::new();

        let result = vault.store_blob(&session, "note", "k1");
        assert!(matches!(result, Err(VaultError::Unauthenticated)));

        let result = vault.retrieve_blobs(&session, "k1");
        assert!(matches!(result, Err(VaultError::Unauthenticated)));

        // The authentication gate runs before input validation.
        let result = vault.store_blob(&session, "", "");
        assert!(matches!(result, Err(VaultError::Unauthenticated)));
    }

    #[test]
    fn test_store_requires_data_and_passkey() {
        let mut vault = vault_with_alice();
        let mut session = Session::new();
        vault.login(&mut session, "alice", "pw1").unwrap();

        let result = vault.store_blob(&session, "", "k1");
        assert!(matches!(result, Err(VaultError::InvalidInput(_))));

        let result = vault.store_blob(&session, "note", "");
        assert!(matches!(result, Err(VaultError::InvalidInput(_))));

        let result = vault.retrieve_blobs(&session, "");
        assert!(matches!(result, Err(VaultError::InvalidInput(_))));
    }

    #[test]
    fn test_retrieve_with_nothing_stored_is_empty() {
        let vault = vault_with_alice();
        let mut session = Session::new();
        vault.login(&mut session, "alice", "pw1").unwrap();

        assert!(vault.retrieve_blobs(&session, "k1").unwrap().is_empty());
    }

    #[test]
    fn test_failed_login_is_invalid_credentials() {
        let vault = vault_with_alice();
        let mut session = Session::new();

        let result = vault.login(&mut session, "alice", "wrong");
        assert!(matches!(result, Err(VaultError::InvalidCredentials)));

        // Unknown usernames fail identically.
        let result = vault.login(&mut session, "mallory", "wrong");
        assert!(matches!(result, Err(VaultError::InvalidCredentials)));
    }

    #[test]
    fn test_login_switches_identity() {
        let mut vault = vault_with_alice();
        vault.register("bob", "pw2").unwrap();
        let mut session = Session::new();

        vault.login(&mut session, "alice", "pw1").unwrap();
        vault.login(&mut session, "bob", "pw2").unwrap();
        assert_eq!(session.authenticated_user(), Some("bob"));
    }
}
