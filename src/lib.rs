//! # SecureStego - hide an image inside another image
//!
//! SecureStego hides a secret image inside a cover image by overwriting the two
//! least significant bits of every cover channel with the two most significant
//! bits of the secret. Extraction is gated by a password trailer, and the
//! password itself can travel wrapped under the receiver's RSA public key.
//!
//! ## Overview
//!
//! - The secret is **resized** to the cover's dimensions before embedding
//! - Only the **top 2 bits** of each secret channel survive (4 levels per channel)
//! - Channels are **rotated**: secret red → cover blue, green → red, blue → green
//! - The encoded image is followed by the raw password bytes (the **trailer**)
//! - The password can be **wrapped** with RSA-OAEP (SHA-256) for transport
//!
//! ## Artifact Layout
//!
//! ```text
//! [encoded image bytes][raw password bytes]
//! ```
//!
//! There is no length prefix and no delimiter. The reader must know the password
//! to find the boundary.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use securestego::crypto::KeyPair;
//! use securestego::{embed_secret_image, extract_with_wrapped_key, EncoderConfig};
//!
//! let cover = std::fs::read("cover.png").unwrap();
//! let secret = std::fs::read("secret.png").unwrap();
//!
//! // The receiver generates a key pair and shares the public half
//! let receiver = KeyPair::generate().unwrap();
//! let public_pem = receiver.public_key_pem().unwrap();
//!
//! // No password given: a random one is generated and wrapped
//! let artifact = embed_secret_image(
//!     &cover,
//!     &secret,
//!     None,
//!     Some(public_pem.as_str()),
//!     &EncoderConfig::default(),
//! )
//! .unwrap();
//!
//! let encrypted_key = artifact.encrypted_key.clone().unwrap();
//!
//! // The receiver unwraps the password and recovers the secret
//! let private_pem = receiver.private_key_pem().unwrap();
//! let recovered = extract_with_wrapped_key(&artifact.bytes, &encrypted_key, &private_pem).unwrap();
//! std::fs::write("recovered.png", recovered.to_png_bytes().unwrap()).unwrap();
//! ```
//!
//! ## Modules
//!
//! - [`stego`]: LSB embedding/extraction and the password trailer
//! - [`crypto`]: RSA key pairs, key wrapping, password generation
//! - [`encoder`]: Sender pipeline (decode, resize, embed, persist, trailer, wrap)
//! - [`decoder`]: Receiver pipeline (unwrap, validate, extract)
//! - [`config`]: TOML configuration

/// Number of secret bits carried by each cover channel.
pub const BITS_PER_CHANNEL: u8 = 2;

/// Mask that keeps the cover bits untouched by embedding.
pub const COVER_MASK: u8 = 0b1111_1100;

/// Mask that selects the payload bits of a stego channel.
pub const PAYLOAD_MASK: u8 = 0b0000_0011;

pub mod config;
pub mod crypto;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod stego;

// Re-export commonly used types at the crate root
pub use config::{Config, ConfigError, KeySettings};
pub use crypto::{decrypt_key, encrypt_key, generate_password, KeyPair};
pub use decoder::{extract_secret_image, extract_with_wrapped_key, RecoveredImage};
pub use encoder::{embed_secret_image, EncodedArtifact, EncoderConfig};
pub use error::Error;
pub use stego::{
    append_trailer, embed, extract, validate_and_strip, AuthError, ImageStegoError, OutputFormat,
    ResizeFilter,
};
