//! # Lockbox Core
//!
//! Core library for Lockbox - a local secrets vault where each registered
//! account stores passkey-encrypted text blobs and retrieves them with the
//! same passkey.
//!
//! This crate provides the domain logic independent of any host interface.
//!
//! ## Architecture
//!
//! - **crypto**: password digests and passkey-derived authenticated
//!   encryption (PBKDF2-HMAC-SHA256 + Fernet)
//! - **store**: repository trait over the username → record mapping, with
//!   in-memory and JSON-file backends
//! - **registry**: account creation and credential verification
//! - **session**: the anonymous / locked / authenticated state machine
//! - **vault**: the operation surface a host wraps (register, login, store,
//!   retrieve)
//!
//! Sessions are ephemeral and per-process; the store file is the only
//! durable artifact.

pub mod crypto;
pub mod error;
pub mod registry;
pub mod session;
pub mod store;
pub mod vault;

pub use error::{Result, VaultError};
pub use session::{Session, SessionStatus};
pub use store::{EncryptedBlob, JsonFileStore, MemoryStore, UserRecord, UserStore};
pub use vault::{RetrievedBlob, Vault};

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
