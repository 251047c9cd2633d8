//! Cryptographic operations for Lockbox.
//!
//! This module provides the two derivation pipelines that protect an account:
//! - **Credential digests**: PBKDF2-HMAC-SHA256 rendered as hex, stored in
//!   place of the login password and compared on login.
//! - **Blob encryption**: the same KDF feeding a Fernet cipher
//!   (AES-128-CBC + HMAC-SHA256) for authenticated encryption of stored text.
//!
//! ## Security Model
//!
//! - Passwords and passkeys never touch disk; only digests and tokens do
//! - Tokens are authenticated: tampering or a wrong passkey fails integrity
//!   verification instead of yielding garbage plaintext
//! - Intermediate key material is zeroized after use
//!
//! ## Known Limitation
//!
//! Both pipelines share a single application-wide salt so that digests and
//! tokens stay compatible with existing store files. Without per-user salts,
//! identical passwords produce identical digests, and precomputed-table
//! attacks against a stolen store file are cheaper than they should be.
//! Treat the store file itself as sensitive.

use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;

pub mod cipher;
pub mod digest;

pub use cipher::{decrypt_text, derive_key, encrypt_text};
pub use digest::hash_password;

/// Application-wide KDF salt, shared by every account.
///
/// Part of the on-disk format: changing it invalidates every stored digest
/// and every stored token.
pub(crate) const KDF_SALT: &[u8] = b"secure_salt_value";

/// PBKDF2 iteration count for both pipelines.
pub(crate) const KDF_ITERATIONS: u32 = 100_000;

/// Length of derived key material in bytes (256 bits).
pub(crate) const KEY_LENGTH: usize = 32;

/// Run the shared KDF: 32 bytes of PBKDF2-HMAC-SHA256 output.
///
/// Both the password digest and the blob cipher key are renderings of this
/// material, so the parameters here must never diverge between the two.
pub(crate) fn derive_key_material(secret: &str) -> [u8; KEY_LENGTH] {
    let mut material = [0u8; KEY_LENGTH];
    pbkdf2_hmac::<Sha256>(secret.as_bytes(), KDF_SALT, KDF_ITERATIONS, &mut material);
    material
}
