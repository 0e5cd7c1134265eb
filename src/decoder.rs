//! Receiver pipeline: recover the hidden image.
//!
//! Two modes:
//! - **Password**: the caller knows the password
//! - **Wrapped key**: the password arrives RSA-wrapped and is unwrapped with
//!   the receiver's private key first
//!
//! Either way the trailer is checked and stripped before any pixel is
//! decoded. The recovered image is quantized to 4 levels per channel.

use std::io::Cursor;
use std::path::Path;

use image::{ImageFormat, RgbImage};
use log::{debug, info};

use crate::crypto::decrypt_key;
use crate::error::Error;
use crate::stego::{decode_rgb, extract, validate_and_strip};

/// A recovered secret image.
#[derive(Debug, Clone, PartialEq)]
pub struct RecoveredImage {
    image: RgbImage,
}

impl RecoveredImage {
    /// Returns the recovered pixels.
    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    /// Consumes self and returns the recovered pixels.
    pub fn into_image(self) -> RgbImage {
        self.image
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Encodes the recovered image as PNG (lossless).
    pub fn to_png_bytes(&self) -> Result<Vec<u8>, Error> {
        let mut bytes = Vec::new();
        self.image
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .map_err(|e| Error::Image(e.to_string()))?;
        Ok(bytes)
    }

    /// Writes the recovered image to `path` as PNG.
    pub fn save_png(&self, path: &Path) -> Result<(), Error> {
        std::fs::write(path, self.to_png_bytes()?)?;
        Ok(())
    }
}

/// Recovers the hidden image from an artifact, gated by `password`.
///
/// An empty password skips the trailer check and decodes the whole artifact.
pub fn extract_secret_image(artifact: &[u8], password: &str) -> Result<RecoveredImage, Error> {
    let image_bytes = validate_and_strip(artifact, password)?;
    debug!(
        "Trailer accepted, decoding {} of {} bytes",
        image_bytes.len(),
        artifact.len()
    );

    let stego = decode_rgb(image_bytes)?;
    let image = extract(&stego);

    info!("Recovered {}x{} image", image.width(), image.height());
    Ok(RecoveredImage { image })
}

/// Unwraps the password with the receiver's private key, then recovers the image.
pub fn extract_with_wrapped_key(
    artifact: &[u8],
    encrypted_key_b64: &str,
    private_key_pem: &str,
) -> Result<RecoveredImage, Error> {
    let password = decrypt_key(encrypted_key_b64, private_key_pem)?;
    extract_secret_image(artifact, &password)
}
