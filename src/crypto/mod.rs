//! Cryptographic operations for SecureStego.
//!
//! This module provides:
//! - RSA key pair generation and PEM serialization
//! - Password key wrap/unwrap (RSA-OAEP, SHA-256)
//! - Random password generation

pub mod keys;
pub mod password;
pub mod wrap;

pub use keys::{
    decode_private_key_pem, decode_public_key_pem, encode_private_key_pem, encode_public_key_pem,
    load_private_key, load_public_key, KeyError, KeyPair, DEFAULT_KEY_BITS, MIN_KEY_BITS,
};
pub use password::{generate_password, generate_password_with_bytes, DEFAULT_PASSWORD_BYTES};
pub use wrap::{decrypt_key, encrypt_key, max_payload_len, unwrap_with_key, wrap_with_key, WrapError};
