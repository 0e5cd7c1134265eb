//! Random password generation.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use rand::rngs::OsRng;
use rand::RngCore;

/// Random bytes behind a generated password (16 URL-safe characters).
pub const DEFAULT_PASSWORD_BYTES: usize = 12;

/// Generates a password from `DEFAULT_PASSWORD_BYTES` bytes of OS randomness.
pub fn generate_password() -> String {
    generate_password_with_bytes(DEFAULT_PASSWORD_BYTES)
}

/// Generates a URL-safe, unpadded base64 password from `n_bytes` random bytes.
///
/// The result has `ceil(n_bytes * 4 / 3)` characters drawn from `[A-Za-z0-9_-]`.
pub fn generate_password_with_bytes(n_bytes: usize) -> String {
    let mut bytes = vec![0u8; n_bytes];
    OsRng.fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_length() {
        assert_eq!(generate_password().len(), 16);
    }

    #[test]
    fn test_printable_alphabet() {
        let password = generate_password_with_bytes(64);
        assert!(password
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }

    #[test]
    fn test_passwords_differ() {
        assert_ne!(generate_password(), generate_password());
    }

    #[test]
    fn test_length_scales() {
        assert_eq!(generate_password_with_bytes(24).len(), 32);
        assert_eq!(generate_password_with_bytes(13).len(), 18);
    }
}
