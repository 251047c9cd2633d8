//! Persistence layer for Lockbox.
//!
//! The durable model is a single mapping from username to user record.
//! [`UserStore`] is the repository seam: the vault's logic is written
//! against it, tests run on [`MemoryStore`], and production uses
//! [`JsonFileStore`].

pub mod json_file;
pub mod memory;
pub mod traits;
pub mod types;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;
pub use traits::UserStore;
pub use types::{EncryptedBlob, UserRecord};
