//! Photo payload validation
//!
//! Photos are embedded inline as `data:image/...;base64,` URIs inside
//! the product record; there is no separate binary storage. This
//! module checks a payload before it is written to a product.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use thiserror::Error;

/// Maximum decoded photo size. Payloads are stored inline in the list
/// JSON, so oversized images would bloat every full-list save.
pub const MAX_PHOTO_BYTES: usize = 2 * 1024 * 1024;

const SUPPORTED_MIME: &[&str] = &["image/png", "image/jpeg", "image/webp", "image/gif"];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PhotoError {
    #[error("photo must be a base64 data URI")]
    NotDataUri,

    #[error("unsupported image type: {0}")]
    UnsupportedMime(String),

    #[error("photo payload is not valid base64")]
    InvalidBase64,

    #[error("photo too large ({size} bytes, max {MAX_PHOTO_BYTES})")]
    TooLarge { size: usize },
}

/// Validate an inline photo payload, returning the decoded size
pub fn validate_data_uri(payload: &str) -> Result<usize, PhotoError> {
    let rest = payload.strip_prefix("data:").ok_or(PhotoError::NotDataUri)?;
    let (mime, body) = rest.split_once(";base64,").ok_or(PhotoError::NotDataUri)?;

    if !SUPPORTED_MIME.contains(&mime) {
        return Err(PhotoError::UnsupportedMime(mime.to_string()));
    }

    let bytes = STANDARD
        .decode(body)
        .map_err(|_| PhotoError::InvalidBase64)?;

    if bytes.len() > MAX_PHOTO_BYTES {
        return Err(PhotoError::TooLarge { size: bytes.len() });
    }

    Ok(bytes.len())
}
