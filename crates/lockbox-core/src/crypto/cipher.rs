//! Passkey-derived authenticated encryption for stored blobs.
//!
//! Blobs are sealed as Fernet tokens: AES-128-CBC with an HMAC-SHA256 tag,
//! random IV and timestamp embedded, the whole token rendered as URL-safe
//! base64. A token opens only under the exact key that produced it; anything
//! else fails integrity verification as a single, indistinguishable error.

use base64::engine::general_purpose::URL_SAFE;
use base64::Engine as _;
use fernet::Fernet;
use zeroize::{Zeroize, Zeroizing};

use crate::crypto::derive_key_material;
use crate::error::{Result, VaultError};

/// Derive the cipher key for a passkey.
///
/// The key is the URL-safe base64 (padded) rendering of 32 bytes of
/// PBKDF2-HMAC-SHA256 output, which is exactly the form [`Fernet::new`]
/// expects. Deterministic, so the same passkey always opens the same blobs.
///
/// The returned string is key material; it is zeroized on drop and should
/// not be logged or stored.
pub fn derive_key(passkey: &str) -> Zeroizing<String> {
    let mut material = derive_key_material(passkey);
    let key = Zeroizing::new(URL_SAFE.encode(&material));
    material.zeroize();
    key
}

fn cipher_for(passkey: &str) -> Result<Fernet> {
    let key = derive_key(passkey);
    Fernet::new(&key)
        .ok_or_else(|| VaultError::Crypto("Derived key was rejected by the cipher".to_string()))
}

/// Encrypt a text blob under a passkey.
///
/// Returns a self-contained printable token carrying IV, timestamp,
/// ciphertext, and integrity tag. Two encryptions of the same input produce
/// different tokens (the IV is random) that both decrypt to the original.
///
/// # Errors
///
/// Returns [`VaultError::Crypto`] only if the cipher cannot be constructed
/// from the derived key; encryption itself cannot fail.
///
/// # Examples
///
/// ```
/// use lockbox_core::crypto::{decrypt_text, encrypt_text};
///
/// let token = encrypt_text("secret-note", "passkey").unwrap();
/// assert_eq!(decrypt_text(&token, "passkey").unwrap(), "secret-note");
/// ```
pub fn encrypt_text(plaintext: &str, passkey: &str) -> Result<String> {
    Ok(cipher_for(passkey)?.encrypt(plaintext.as_bytes()))
}

/// Decrypt a stored token under a passkey.
///
/// # Errors
///
/// Every failure mode (wrong passkey, tampered or truncated token, payload
/// that is not UTF-8) collapses into [`VaultError::DecryptionFailure`].
/// Callers get no detail about which check failed.
pub fn decrypt_text(token: &str, passkey: &str) -> Result<String> {
    let plaintext = cipher_for(passkey)?
        .decrypt(token)
        .map_err(|_| VaultError::DecryptionFailure)?;
    String::from_utf8(plaintext).map_err(|_| VaultError::DecryptionFailure)
}
