//! Login password hashing.
//!
//! Passwords are never stored; the store keeps a deterministic PBKDF2 digest
//! that can be compared on login but not reversed.

use crate::crypto::derive_key_material;

/// Hash a login password into its stored digest form.
///
/// The digest is the hex rendering of 32 bytes of PBKDF2-HMAC-SHA256 output,
/// so it is always 64 lowercase hex characters.
///
/// # Arguments
///
/// * `password` - The login password to hash
///
/// # Security
///
/// - Deterministic: the same password always yields the same digest, which
///   is what makes the equality check on login possible
/// - One-way: recovering the password requires a brute-force search
/// - Shares the application-wide salt (see the module-level note in
///   [`crate::crypto`])
///
/// # Examples
///
/// ```
/// use lockbox_core::crypto::hash_password;
///
/// let digest = hash_password("hunter2");
/// assert_eq!(digest.len(), 64);
/// assert_eq!(digest, hash_password("hunter2"));
/// ```
pub fn hash_password(password: &str) -> String {
    hex::encode(derive_key_material(password))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_deterministic() {
        assert_eq!(hash_password("correct horse"), hash_password("correct horse"));
    }

    #[test]
    fn test_different_passwords_different_digests() {
        assert_ne!(hash_password("password-one"), hash_password("password-two"));
    }

    #[test]
    fn test_digest_is_lowercase_hex() {
        let digest = hash_password("hunter2");
        assert_eq!(digest.len(), 64);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_empty_password_still_hashes() {
        // Emptiness is rejected at the registry layer; the hasher itself is
        // total over its input.
        assert_eq!(hash_password("").len(), 64);
    }
}
