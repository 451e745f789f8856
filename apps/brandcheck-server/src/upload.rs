//! Multipart form collection
//!
//! Every route takes `multipart/form-data`. The whole form is buffered into
//! memory (bounded by the body limit layer) before any field is validated.

use std::collections::HashMap;

use axum::body::Bytes;
use axum::extract::multipart::{Multipart, MultipartError};
use axum::http::StatusCode;

use crate::error::ServerError;

/// A single named part of the form
#[derive(Debug, Clone)]
pub struct UploadField {
    pub file_name: Option<String>,
    pub bytes: Bytes,
}

/// All parts of a submitted form, by field name
#[derive(Debug, Default)]
pub struct UploadForm {
    fields: HashMap<String, UploadField>,
}

impl UploadForm {
    /// Drain a multipart stream. Unnamed parts are skipped; a repeated name keeps the last part.
    pub async fn collect(mut multipart: Multipart) -> Result<Self, ServerError> {
        let mut fields = HashMap::new();

        while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };
            let file_name = field.file_name().map(str::to_string);
            let bytes = field.bytes().await.map_err(multipart_error)?;

            fields.insert(name, UploadField { file_name, bytes });
        }

        Ok(Self { fields })
    }

    /// A required file part; an empty part counts as missing
    pub fn file(&self, name: &str) -> Result<&UploadField, ServerError> {
        self.fields
            .get(name)
            .filter(|field| !field.bytes.is_empty())
            .ok_or_else(|| ServerError::MissingField(name.to_string()))
    }

    /// A required text part, trimmed
    pub fn text(&self, name: &str) -> Result<String, ServerError> {
        self.optional_text(name)?
            .ok_or_else(|| ServerError::MissingField(name.to_string()))
    }

    /// An optional text part, trimmed; blank counts as absent
    pub fn optional_text(&self, name: &str) -> Result<Option<String>, ServerError> {
        let Some(field) = self.fields.get(name) else {
            return Ok(None);
        };
        let text = std::str::from_utf8(&field.bytes).map_err(|_| {
            ServerError::InvalidRequest(format!("Form field '{}' is not valid UTF-8", name))
        })?;
        let text = text.trim();
        Ok((!text.is_empty()).then(|| text.to_string()))
    }

    #[cfg(test)]
    pub fn insert(&mut self, name: &str, field: UploadField) {
        self.fields.insert(name.to_string(), field);
    }
}

impl UploadField {
    /// Client-supplied file name, or `fallback` when none was sent
    pub fn file_name_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.file_name.as_deref().unwrap_or(fallback)
    }
}

fn multipart_error(err: MultipartError) -> ServerError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ServerError::PayloadTooLarge
    } else {
        ServerError::InvalidRequest(err.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_field(value: &str) -> UploadField {
        UploadField {
            file_name: None,
            bytes: Bytes::copy_from_slice(value.as_bytes()),
        }
    }

    #[test]
    fn test_text_is_trimmed() {
        let mut form = UploadForm::default();
        form.insert("model_name", text_field("  ChatGPT-4o \n"));
        assert_eq!(form.text("model_name").unwrap(), "ChatGPT-4o");
    }

    #[test]
    fn test_blank_text_is_missing() {
        let mut form = UploadForm::default();
        form.insert("model_name", text_field("   "));
        assert!(matches!(
            form.text("model_name"),
            Err(ServerError::MissingField(_))
        ));
        assert_eq!(form.optional_text("model_name").unwrap(), None);
        assert_eq!(form.optional_text("absent").unwrap(), None);
    }

    #[test]
    fn test_empty_file_is_missing() {
        let mut form = UploadForm::default();
        form.insert("file", text_field(""));
        assert!(matches!(form.file("file"), Err(ServerError::MissingField(_))));
    }

    #[test]
    fn test_non_utf8_text_is_rejected() {
        let mut form = UploadForm::default();
        form.insert(
            "model_name",
            UploadField {
                file_name: None,
                bytes: Bytes::from_static(&[0xff, 0xfe]),
            },
        );
        assert!(matches!(
            form.text("model_name"),
            Err(ServerError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_file_name_fallback() {
        let field = text_field("x");
        assert_eq!(field.file_name_or("upload.pdf"), "upload.pdf");
    }
}
