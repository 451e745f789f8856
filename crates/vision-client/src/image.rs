//! Image payload helpers

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};

use crate::error::EvaluatorError;

/// Used when the magic bytes match nothing we know
pub const FALLBACK_MIME: &str = "image/png";

/// Guess the MIME type of an image from its leading bytes
pub fn detect_image_mime(bytes: &[u8]) -> &'static str {
    if bytes.starts_with(b"\x89PNG\r\n\x1a\n") {
        "image/png"
    } else if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        "image/jpeg"
    } else if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
        "image/gif"
    } else if bytes.len() >= 12 && &bytes[..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
        "image/webp"
    } else {
        FALLBACK_MIME
    }
}

/// Encode image bytes as a `data:` URL suitable for an `image_url` content part
pub fn to_data_url(bytes: &[u8]) -> Result<String, EvaluatorError> {
    if bytes.is_empty() {
        return Err(EvaluatorError::InvalidImage("image is empty".to_string()));
    }
    Ok(format!(
        "data:{};base64,{}",
        detect_image_mime(bytes),
        BASE64.encode(bytes)
    ))
}
