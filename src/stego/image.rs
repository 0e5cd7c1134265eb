//! 2-bit LSB image-in-image steganography.
//!
//! Hides the two most significant bits of every secret channel in the two
//! least significant bits of a cover channel. The channels are rotated:
//!
//! ```text
//! cover.B <- secret.R
//! cover.R <- secret.G
//! cover.G <- secret.B
//! ```
//!
//! Extraction applies the inverse rotation, so a recovered channel is always
//! one of `{0, 64, 128, 192}`.
//!
//! Pixels carry no cross-pixel state, so both directions run over the raw
//! buffers in parallel with rayon.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::imageops::{self, FilterType};
use image::{ImageFormat, RgbImage};
use log::{debug, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{BITS_PER_CHANNEL, COVER_MASK, PAYLOAD_MASK};

/// Shift that moves a channel's top bits into payload position.
const PAYLOAD_SHIFT: u8 = 8 - BITS_PER_CHANNEL;

/// Bytes per RGB pixel.
const CHANNELS: usize = 3;

/// Default JPEG quality, the same as the common imaging default.
pub const DEFAULT_JPEG_QUALITY: u8 = 75;

/// Errors that can occur during image steganography.
#[derive(Error, Debug)]
pub enum ImageStegoError {
    #[error("Dimension mismatch: cover is {cover_width}x{cover_height}, secret is {secret_width}x{secret_height}")]
    DimensionMismatch {
        cover_width: u32,
        cover_height: u32,
        secret_width: u32,
        secret_height: u32,
    },

    #[error("Image has no pixels ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },

    #[error("Image load error: {0}")]
    ImageLoadError(String),

    #[error("Image save error: {0}")]
    ImageSaveError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Container format used to persist the stego image.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Lossless. The payload survives persistence.
    #[default]
    Png,
    /// Lossy. Kept for compatibility; re-quantization damages the payload bits.
    Jpeg,
}

impl OutputFormat {
    /// Returns true if persisting in this format keeps every pixel bit.
    pub fn is_lossless(self) -> bool {
        matches!(self, OutputFormat::Png)
    }

    /// Conventional file extension for this format.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Jpeg => "jpg",
        }
    }
}

/// Resampling filter used to fit the secret to the cover.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResizeFilter {
    Nearest,
    Triangle,
    /// Bicubic.
    #[default]
    CatmullRom,
    Gaussian,
    Lanczos3,
}

impl From<ResizeFilter> for FilterType {
    fn from(filter: ResizeFilter) -> Self {
        match filter {
            ResizeFilter::Nearest => FilterType::Nearest,
            ResizeFilter::Triangle => FilterType::Triangle,
            ResizeFilter::CatmullRom => FilterType::CatmullRom,
            ResizeFilter::Gaussian => FilterType::Gaussian,
            ResizeFilter::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

#[inline]
fn payload_bits(channel: u8) -> u8 {
    (channel >> PAYLOAD_SHIFT) & PAYLOAD_MASK
}

#[inline]
fn embed_pixel(cover: &mut [u8], secret: &[u8]) {
    let (s_r, s_g, s_b) = (secret[0], secret[1], secret[2]);
    cover[2] = (cover[2] & COVER_MASK) | payload_bits(s_r);
    cover[0] = (cover[0] & COVER_MASK) | payload_bits(s_g);
    cover[1] = (cover[1] & COVER_MASK) | payload_bits(s_b);
}

#[inline]
fn extract_pixel(stego: &[u8], secret: &mut [u8]) {
    let (r, g, b) = (stego[0], stego[1], stego[2]);
    secret[0] = (b & PAYLOAD_MASK) << PAYLOAD_SHIFT;
    secret[1] = (r & PAYLOAD_MASK) << PAYLOAD_SHIFT;
    secret[2] = (g & PAYLOAD_MASK) << PAYLOAD_SHIFT;
}

/// Embeds `secret` into a copy of `cover`.
///
/// Both images must have the same dimensions; use [`fit_to`] first.
pub fn embed(cover: &RgbImage, secret: &RgbImage) -> Result<RgbImage, ImageStegoError> {
    let mut stego = cover.clone();
    embed_in_place(&mut stego, secret)?;
    Ok(stego)
}

/// Embeds `secret` directly into the caller's cover buffer.
pub fn embed_in_place(cover: &mut RgbImage, secret: &RgbImage) -> Result<(), ImageStegoError> {
    if cover.dimensions() != secret.dimensions() {
        let (cover_width, cover_height) = cover.dimensions();
        let (secret_width, secret_height) = secret.dimensions();
        return Err(ImageStegoError::DimensionMismatch {
            cover_width,
            cover_height,
            secret_width,
            secret_height,
        });
    }

    let cover_buf: &mut [u8] = cover;
    let secret_buf: &[u8] = secret;

    cover_buf
        .par_chunks_exact_mut(CHANNELS)
        .zip(secret_buf.par_chunks_exact(CHANNELS))
        .for_each(|(c, s)| embed_pixel(c, s));

    Ok(())
}

/// Recovers the hidden image. Output has the same dimensions as the input.
pub fn extract(stego: &RgbImage) -> RgbImage {
    let (width, height) = stego.dimensions();
    let mut secret = RgbImage::new(width, height);

    let stego_buf: &[u8] = stego;
    let secret_buf: &mut [u8] = &mut secret;

    secret_buf
        .par_chunks_exact_mut(CHANNELS)
        .zip(stego_buf.par_chunks_exact(CHANNELS))
        .for_each(|(s, c)| extract_pixel(c, s));

    secret
}

/// Resamples `secret` to exactly `width`x`height`.
///
/// Returns the image unchanged when it already has those dimensions.
pub fn fit_to(
    secret: RgbImage,
    width: u32,
    height: u32,
    filter: ResizeFilter,
) -> Result<RgbImage, ImageStegoError> {
    if width == 0 || height == 0 {
        return Err(ImageStegoError::EmptyImage { width, height });
    }

    if secret.dimensions() == (width, height) {
        return Ok(secret);
    }

    let (secret_width, secret_height) = secret.dimensions();
    if secret_width == 0 || secret_height == 0 {
        return Err(ImageStegoError::EmptyImage {
            width: secret_width,
            height: secret_height,
        });
    }

    debug!(
        "Resizing secret {}x{} -> {}x{} ({:?})",
        secret_width, secret_height, width, height, filter
    );
    Ok(imageops::resize(&secret, width, height, filter.into()))
}

/// Decodes any supported bitmap (PNG, JPEG, BMP) into 8-bit RGB.
pub fn decode_rgb(bytes: &[u8]) -> Result<RgbImage, ImageStegoError> {
    let image =
        image::load_from_memory(bytes).map_err(|e| ImageStegoError::ImageLoadError(e.to_string()))?;
    Ok(image.to_rgb8())
}

/// Encodes an RGB image in the requested container format.
///
/// `jpeg_quality` is ignored for PNG.
pub fn encode_rgb(
    image: &RgbImage,
    format: OutputFormat,
    jpeg_quality: u8,
) -> Result<Vec<u8>, ImageStegoError> {
    let mut bytes = Vec::new();
    match format {
        OutputFormat::Png => {
            image
                .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
                .map_err(|e| ImageStegoError::ImageSaveError(e.to_string()))?;
        }
        OutputFormat::Jpeg => {
            warn!(
                "Persisting stego image as JPEG (quality {}): lossy compression may destroy the embedded bits",
                jpeg_quality
            );
            let mut encoder = JpegEncoder::new_with_quality(&mut bytes, jpeg_quality.clamp(1, 100));
            encoder
                .encode_image(image)
                .map_err(|e| ImageStegoError::ImageSaveError(e.to_string()))?;
        }
    }
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgb};

    fn create_test_image(width: u32, height: u32) -> RgbImage {
        ImageBuffer::from_fn(width, height, |x, y| {
            Rgb([
                ((x * 17) % 256) as u8,
                ((y * 23) % 256) as u8,
                (((x + y) * 31) % 256) as u8,
            ])
        })
    }

    fn solid(width: u32, height: u32, rgb: [u8; 3]) -> RgbImage {
        ImageBuffer::from_pixel(width, height, Rgb(rgb))
    }

    #[test]
    fn test_gray_cover_red_secret_scenario() {
        let cover = solid(4, 4, [128, 128, 128]);
        let secret = solid(4, 4, [255, 0, 0]);

        let stego = embed(&cover, &secret).unwrap();
        for pixel in stego.pixels() {
            // Low bits: R:00, G:00, B:11
            assert_eq!(pixel.0, [128, 128, 131]);
        }

        let recovered = extract(&stego);
        assert_eq!(recovered.dimensions(), (4, 4));
        for pixel in recovered.pixels() {
            assert_eq!(pixel.0, [192, 0, 0]);
        }
    }

    #[test]
    fn test_channel_rotation() {
        // Distinct levels per channel so a swap would be visible
        let cover = solid(2, 2, [0, 0, 0]);
        let secret = solid(2, 2, [255, 128, 64]);

        let stego = embed(&cover, &secret).unwrap();
        let pixel = stego.get_pixel(0, 0).0;
        assert_eq!(pixel[2], 0b11, "secret red must land in cover blue");
        assert_eq!(pixel[0], 0b10, "secret green must land in cover red");
        assert_eq!(pixel[1], 0b01, "secret blue must land in cover green");

        let recovered = extract(&stego);
        assert_eq!(recovered.get_pixel(1, 1).0, [192, 128, 64]);
    }

    #[test]
    fn test_extract_reads_blue_as_red() {
        let stego = solid(1, 1, [0, 0, 3]);
        assert_eq!(extract(&stego).get_pixel(0, 0).0, [192, 0, 0]);
    }

    #[test]
    fn test_roundtrip_quantization_law() {
        let cover = create_test_image(37, 29);
        let secret = ImageBuffer::from_fn(37, 29, |x, y| {
            Rgb([
                ((x * 7 + y) % 256) as u8,
                ((x * y) % 256) as u8,
                (255 - (x * 5) % 256) as u8,
            ])
        });

        let recovered = extract(&embed(&cover, &secret).unwrap());

        for (orig, got) in secret.pixels().zip(recovered.pixels()) {
            for c in 0..3 {
                assert_eq!(got.0[c], (orig.0[c] >> 6) << 6);
            }
        }
    }

    #[test]
    fn test_cover_high_bits_untouched() {
        let cover = create_test_image(16, 16);
        let secret = create_test_image(16, 16);

        let stego = embed(&cover, &secret).unwrap();
        for (c, s) in cover.pixels().zip(stego.pixels()) {
            for i in 0..3 {
                assert_eq!(c.0[i] & COVER_MASK, s.0[i] & COVER_MASK);
            }
        }
    }

    #[test]
    fn test_recovered_levels() {
        let cover = create_test_image(20, 20);
        let secret = create_test_image(20, 20);
        let recovered = extract(&embed(&cover, &secret).unwrap());

        assert!(recovered
            .as_raw()
            .iter()
            .all(|v| matches!(v, 0 | 64 | 128 | 192)));
    }

    #[test]
    fn test_dimension_mismatch() {
        let cover = create_test_image(10, 10);
        let secret = create_test_image(10, 11);

        let result = embed(&cover, &secret);
        assert!(matches!(
            result,
            Err(ImageStegoError::DimensionMismatch {
                cover_width: 10,
                cover_height: 10,
                secret_width: 10,
                secret_height: 11,
            })
        ));
    }

    #[test]
    fn test_embed_in_place_matches_embed() {
        let cover = create_test_image(8, 8);
        let secret = solid(8, 8, [10, 200, 99]);

        let copied = embed(&cover, &secret).unwrap();
        let mut in_place = cover.clone();
        embed_in_place(&mut in_place, &secret).unwrap();

        assert_eq!(copied, in_place);
    }

    #[test]
    fn test_fit_to_resizes() {
        let secret = create_test_image(30, 10);
        let fitted = fit_to(secret, 12, 7, ResizeFilter::default()).unwrap();
        assert_eq!(fitted.dimensions(), (12, 7));
    }

    #[test]
    fn test_fit_to_same_size_is_identity() {
        let secret = create_test_image(9, 9);
        let fitted = fit_to(secret.clone(), 9, 9, ResizeFilter::Lanczos3).unwrap();
        assert_eq!(fitted, secret);
    }

    #[test]
    fn test_fit_to_empty_target() {
        let secret = create_test_image(9, 9);
        let result = fit_to(secret, 0, 9, ResizeFilter::Nearest);
        assert!(matches!(result, Err(ImageStegoError::EmptyImage { .. })));
    }

    #[test]
    fn test_png_roundtrip_preserves_payload() {
        let cover = create_test_image(50, 40);
        let secret = solid(50, 40, [255, 100, 30]);
        let stego = embed(&cover, &secret).unwrap();

        let png = encode_rgb(&stego, OutputFormat::Png, DEFAULT_JPEG_QUALITY).unwrap();
        let reloaded = decode_rgb(&png).unwrap();

        assert_eq!(reloaded, stego);
        assert_eq!(extract(&reloaded), extract(&stego));
    }

    #[test]
    fn test_jpeg_keeps_dimensions_only() {
        // JPEG re-quantizes pixels; only the geometry is guaranteed to survive.
        let cover = create_test_image(32, 24);
        let secret = solid(32, 24, [255, 255, 255]);
        let stego = embed(&cover, &secret).unwrap();

        let jpeg = encode_rgb(&stego, OutputFormat::Jpeg, DEFAULT_JPEG_QUALITY).unwrap();
        let reloaded = decode_rgb(&jpeg).unwrap();
        let recovered = extract(&reloaded);

        assert_eq!(recovered.dimensions(), (32, 24));
        assert!(recovered
            .as_raw()
            .iter()
            .all(|v| matches!(v, 0 | 64 | 128 | 192)));
    }

    #[test]
    fn test_decode_garbage_fails() {
        let result = decode_rgb(b"definitely not an image");
        assert!(matches!(result, Err(ImageStegoError::ImageLoadError(_))));
    }

    #[test]
    fn test_output_format_serde_names() {
        #[derive(Deserialize)]
        struct Holder {
            format: OutputFormat,
            filter: ResizeFilter,
        }
        let holder: Holder = toml::from_str("format = \"jpeg\"\nfilter = \"catmull-rom\"").unwrap();
        assert_eq!(holder.format, OutputFormat::Jpeg);
        assert_eq!(holder.filter, ResizeFilter::CatmullRom);
    }
}
