//! Password trailer appended after the encoded image stream.
//!
//! Format: `[encoded image bytes][raw password bytes]`.
//!
//! The trailer is not length-prefixed and not delimited. A reader finds it
//! only by knowing the password, so any artifact that happens to end in the
//! password's bytes also validates. The gate keeps casual readers out; it is
//! not an integrity check.

use log::debug;
use thiserror::Error;

/// Errors raised by the password gate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid password")]
    InvalidPassword,
}

/// Appends the password's raw UTF-8 bytes to the artifact.
///
/// An empty password appends nothing.
pub fn append_trailer(mut artifact: Vec<u8>, password: &str) -> Vec<u8> {
    artifact.extend_from_slice(password.as_bytes());
    artifact
}

/// Checks that the artifact ends with `password` and returns the bytes before it.
///
/// The comparison is byte-for-byte over the last `password.len()` bytes. An
/// empty password always passes and returns the artifact unchanged.
pub fn validate_and_strip<'a>(artifact: &'a [u8], password: &str) -> Result<&'a [u8], AuthError> {
    let expected = password.as_bytes();

    if artifact.len() < expected.len() {
        debug!(
            "Artifact ({} bytes) is shorter than the trailer ({} bytes)",
            artifact.len(),
            expected.len()
        );
        return Err(AuthError::InvalidPassword);
    }

    let (image, trailer) = artifact.split_at(artifact.len() - expected.len());
    if trailer != expected {
        return Err(AuthError::InvalidPassword);
    }

    Ok(image)
}
