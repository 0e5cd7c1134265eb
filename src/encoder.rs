//! Sender pipeline: hide a secret image inside a cover image.
//!
//! This module orchestrates the encoding process:
//! 1. Decode cover and secret into 8-bit RGB
//! 2. Pick the password (caller-supplied or freshly generated)
//! 3. Wrap the password under the receiver's public key, if one is given
//! 4. Resize the secret to the cover's dimensions
//! 5. Embed the secret's top bits into the cover's low bits
//! 6. Encode the stego image (PNG by default)
//! 7. Append the password trailer

use image::RgbImage;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::crypto::{encrypt_key, generate_password_with_bytes, DEFAULT_PASSWORD_BYTES};
use crate::error::Error;
use crate::stego::{
    append_trailer, decode_rgb, embed_in_place, encode_rgb, fit_to, OutputFormat, ResizeFilter,
    DEFAULT_JPEG_QUALITY,
};

/// Configuration for the encoder. Also the `[embed]` section of the config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncoderConfig {
    /// Container format of the stego image.
    pub format: OutputFormat,

    /// JPEG quality (1-100), only used with `format = "jpeg"`.
    pub jpeg_quality: u8,

    /// Filter used to fit the secret to the cover.
    pub resize_filter: ResizeFilter,

    /// Random bytes behind a generated password. Values below
    /// [`DEFAULT_PASSWORD_BYTES`] are raised to it.
    pub password_bytes: usize,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Png,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            resize_filter: ResizeFilter::CatmullRom,
            password_bytes: DEFAULT_PASSWORD_BYTES,
        }
    }
}

/// Result of hiding an image.
pub struct EncodedArtifact {
    /// `[encoded image][password]` - this is what gets stored or sent.
    pub bytes: Vec<u8>,
    /// The password written in the trailer.
    pub password: Zeroizing<String>,
    /// True if the password was generated rather than supplied.
    pub password_generated: bool,
    /// Base64 RSA-OAEP wrap of the password, if a receiver key was given.
    pub encrypted_key: Option<String>,
    /// Width of the stego image.
    pub width: u32,
    /// Height of the stego image.
    pub height: u32,
    /// Container format of the image part of `bytes`.
    pub format: OutputFormat,
}

impl std::fmt::Debug for EncodedArtifact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EncodedArtifact")
            .field("len", &self.bytes.len())
            .field("password", &"[REDACTED]")
            .field("password_generated", &self.password_generated)
            .field("encrypted_key", &self.encrypted_key)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("format", &self.format)
            .finish()
    }
}

impl EncodedArtifact {
    /// Length of the image part, i.e. everything before the trailer.
    pub fn image_len(&self) -> usize {
        self.bytes.len() - self.password.len()
    }
}

/// Hides `secret` inside `cover`, both given as encoded bitmaps (PNG, JPEG, BMP).
///
/// # Arguments
/// * `cover` - The visible carrier image
/// * `secret` - The image to hide; resized to the cover's dimensions
/// * `password` - Trailer password; `None` or empty generates one
/// * `receiver_public_key_pem` - If given, the password is wrapped under this key
/// * `config` - Output format, resize filter and password size
pub fn embed_secret_image(
    cover: &[u8],
    secret: &[u8],
    password: Option<&str>,
    receiver_public_key_pem: Option<&str>,
    config: &EncoderConfig,
) -> Result<EncodedArtifact, Error> {
    let cover = decode_rgb(cover)?;
    let secret = decode_rgb(secret)?;
    embed_images(cover, secret, password, receiver_public_key_pem, config)
}

/// Same as [`embed_secret_image`] for images that are already decoded.
pub fn embed_images(
    mut cover: RgbImage,
    secret: RgbImage,
    password: Option<&str>,
    receiver_public_key_pem: Option<&str>,
    config: &EncoderConfig,
) -> Result<EncodedArtifact, Error> {
    let (password, password_generated) = match password.filter(|p| !p.is_empty()) {
        Some(p) => (Zeroizing::new(p.to_string()), false),
        None => {
            if config.password_bytes < DEFAULT_PASSWORD_BYTES {
                warn!(
                    "password_bytes = {} is too short, using {}",
                    config.password_bytes, DEFAULT_PASSWORD_BYTES
                );
            }
            let bytes = config.password_bytes.max(DEFAULT_PASSWORD_BYTES);
            (Zeroizing::new(generate_password_with_bytes(bytes)), true)
        }
    };

    // Wrap first so a bad key fails before any pixel work.
    let encrypted_key = match receiver_public_key_pem {
        Some(pem) => Some(encrypt_key(&password, pem)?),
        None => None,
    };

    let (width, height) = cover.dimensions();
    debug!(
        "Embedding {}x{} secret into {}x{} cover",
        secret.width(),
        secret.height(),
        width,
        height
    );

    let secret = fit_to(secret, width, height, config.resize_filter)?;
    embed_in_place(&mut cover, &secret)?;

    let encoded = encode_rgb(&cover, config.format, config.jpeg_quality)?;
    let bytes = append_trailer(encoded, &password);

    info!(
        "Embedded {}x{} image ({:?}, {} bytes, key {})",
        width,
        height,
        config.format,
        bytes.len(),
        if encrypted_key.is_some() { "wrapped" } else { "not wrapped" }
    );

    Ok(EncodedArtifact {
        bytes,
        password,
        password_generated,
        encrypted_key,
        width,
        height,
        format: config.format,
    })
}
