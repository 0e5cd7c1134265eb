//! Crate-level error type.
//!
//! Every module keeps its own error enum; this type folds them into one
//! taxonomy for the encode/decode pipelines and the CLI.

use thiserror::Error;

use crate::config::ConfigError;
use crate::crypto::{KeyError, WrapError};
use crate::stego::{AuthError, ImageStegoError};

/// Errors returned by the encoder and decoder pipelines.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Dimension mismatch: cover is {cover:?}, secret is {secret:?}")]
    DimensionMismatch { cover: (u32, u32), secret: (u32, u32) },

    #[error("Invalid password")]
    InvalidPassword,

    #[error("Key format error: {0}")]
    KeyFormat(String),

    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Wrong key and corrupted ciphertext are deliberately indistinguishable.
    #[error("Failed to decrypt key")]
    Decryption,

    #[error("Encryption failed: {0}")]
    Encryption(String),

    #[error("Password too long for this key: {len} bytes (maximum {max})")]
    PayloadTooLarge { len: usize, max: usize },

    #[error("Key generation failed: {0}")]
    KeyGeneration(String),

    #[error("Image error: {0}")]
    Image(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// True for failures that mean "you are not allowed to read this".
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, Error::InvalidPassword | Error::Decryption)
    }
}

impl From<AuthError> for Error {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidPassword => Error::InvalidPassword,
        }
    }
}

impl From<ImageStegoError> for Error {
    fn from(err: ImageStegoError) -> Self {
        match err {
            ImageStegoError::DimensionMismatch {
                cover_width,
                cover_height,
                secret_width,
                secret_height,
            } => Error::DimensionMismatch {
                cover: (cover_width, cover_height),
                secret: (secret_width, secret_height),
            },
            ImageStegoError::IoError(e) => Error::Io(e),
            other => Error::Image(other.to_string()),
        }
    }
}

impl From<KeyError> for Error {
    fn from(err: KeyError) -> Self {
        match err {
            KeyError::IoError(e) => Error::Io(e),
            KeyError::GenerationFailed(msg) => Error::KeyGeneration(msg),
            KeyError::InvalidKeySize { .. } => Error::KeyGeneration(err.to_string()),
            other => Error::KeyFormat(other.to_string()),
        }
    }
}

impl From<WrapError> for Error {
    fn from(err: WrapError) -> Self {
        match err {
            WrapError::KeyFormat(key_err) => key_err.into(),
            WrapError::Encoding(e) => Error::Encoding(e.to_string()),
            WrapError::PayloadTooLarge { len, max } => Error::PayloadTooLarge { len, max },
            WrapError::EncryptionFailed(msg) => Error::Encryption(msg),
            WrapError::DecryptionFailed => Error::Decryption,
        }
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::IoError(e) => Error::Io(e),
            other => Error::Config(other.to_string()),
        }
    }
}
