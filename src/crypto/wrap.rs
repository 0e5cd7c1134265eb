//! Password key wrap with RSA-OAEP.
//!
//! Parameters: OAEP with SHA-256 as both the hash and the MGF1 digest, no
//! label. Ciphertext travels as standard base64 with padding.
//!
//! OAEP is randomized, so wrapping the same password twice yields different
//! ciphertexts. Unwrap failures never say whether the key or the padding was
//! wrong.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use log::debug;
use rsa::traits::PublicKeyParts;
use rsa::{Oaep, RsaPrivateKey, RsaPublicKey};
use sha2::{Digest, Sha256};
use thiserror::Error;
use zeroize::Zeroizing;

use super::keys::{decode_private_key_pem, decode_public_key_pem, KeyError};

/// Errors that can occur while wrapping or unwrapping a password.
#[derive(Error, Debug)]
pub enum WrapError {
    #[error("Key format error: {0}")]
    KeyFormat(#[from] KeyError),

    #[error("Invalid base64 ciphertext: {0}")]
    Encoding(#[from] base64::DecodeError),

    #[error("Password too long for this key: {len} bytes (maximum {max})")]
    PayloadTooLarge { len: usize, max: usize },

    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Decryption failed")]
    DecryptionFailed,
}

fn oaep() -> Oaep {
    Oaep::new::<Sha256>()
}

/// Largest payload that fits under `key` with SHA-256 OAEP.
pub fn max_payload_len(key: &RsaPublicKey) -> usize {
    key.size()
        .saturating_sub(2 * <Sha256 as Digest>::output_size() + 2)
}

/// Wraps `password` under a public key given as PEM. Returns base64 ciphertext.
pub fn encrypt_key(password: &str, public_key_pem: &str) -> Result<String, WrapError> {
    let public_key = decode_public_key_pem(public_key_pem)?;
    wrap_with_key(password.as_bytes(), &public_key)
}

/// Unwraps a base64 ciphertext with a private key given as PEM.
pub fn decrypt_key(ciphertext_b64: &str, private_key_pem: &str) -> Result<Zeroizing<String>, WrapError> {
    let private_key = decode_private_key_pem(private_key_pem)?;
    unwrap_with_key(ciphertext_b64, &private_key)
}

/// Wraps raw bytes under an already-loaded public key.
pub fn wrap_with_key(payload: &[u8], public_key: &RsaPublicKey) -> Result<String, WrapError> {
    let max = max_payload_len(public_key);
    if payload.len() > max {
        return Err(WrapError::PayloadTooLarge {
            len: payload.len(),
            max,
        });
    }

    let mut rng = rand::thread_rng();
    let ciphertext = public_key
        .encrypt(&mut rng, oaep(), payload)
        .map_err(|e| WrapError::EncryptionFailed(e.to_string()))?;

    debug!(
        "Wrapped {} byte payload under {}-bit key",
        payload.len(),
        public_key.size() * 8
    );
    Ok(BASE64.encode(ciphertext))
}

/// Unwraps a base64 ciphertext with an already-loaded private key.
///
/// ASCII whitespace anywhere in the input is ignored, so line-wrapped
/// ciphertexts pasted from mail bodies decode as-is.
pub fn unwrap_with_key(
    ciphertext_b64: &str,
    private_key: &RsaPrivateKey,
) -> Result<Zeroizing<String>, WrapError> {
    let compact: String = ciphertext_b64
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    let ciphertext = BASE64.decode(compact)?;

    let plaintext = Zeroizing::new(
        private_key
            .decrypt(oaep(), &ciphertext)
            .map_err(|_| WrapError::DecryptionFailed)?,
    );

    // A non-UTF-8 plaintext is reported like any other unwrap failure.
    let password = std::str::from_utf8(&plaintext).map_err(|_| WrapError::DecryptionFailed)?;
    Ok(Zeroizing::new(password.to_owned()))
}
