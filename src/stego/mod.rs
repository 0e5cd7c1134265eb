//! Steganography module for hiding one image inside another.
//!
//! Supports:
//! - 2-bit LSB image-in-image embedding and extraction
//! - Password trailer gate on the persisted artifact

pub mod image;
pub mod trailer;

pub use image::{
    decode_rgb, embed, embed_in_place, encode_rgb, extract, fit_to, ImageStegoError, OutputFormat,
    ResizeFilter, DEFAULT_JPEG_QUALITY,
};
pub use trailer::{append_trailer, validate_and_strip, AuthError};
