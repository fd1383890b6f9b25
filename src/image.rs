//! Profile image upload checks and data-URI embedding.

use std::fs;
use std::path::Path;

use base64::{Engine as _, engine::general_purpose::STANDARD};

use crate::validation::FieldError;

/// Largest accepted upload, in bytes (5 MiB).
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Accepted MIME types.
pub const ALLOWED_MIME_TYPES: [&str; 5] = ["image/jpeg", "image/jpg", "image/png", "image/gif", "image/webp"];

/// An uploaded image file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn new(mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            mime_type: mime_type.into(),
            bytes,
        }
    }

    /// Read a file, guessing its MIME type from the extension.
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let bytes = fs::read(path)?;
        Ok(Self::new(mime_from_extension(path), bytes))
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// Check type and size without encoding.
    pub fn check(&self) -> Result<(), FieldError> {
        if !ALLOWED_MIME_TYPES.contains(&self.mime_type.as_str()) {
            return Err(FieldError::InvalidType);
        }
        if self.size() > MAX_IMAGE_BYTES {
            return Err(FieldError::TooLarge);
        }
        Ok(())
    }

    /// Check the upload and embed it as `data:<mime>;base64,<payload>`.
    pub fn into_data_uri(self) -> Result<String, FieldError> {
        self.check()?;
        Ok(format!("data:{};base64,{}", self.mime_type, STANDARD.encode(&self.bytes)))
    }
}

/// Guess an image MIME type from a file extension.
pub fn mime_from_extension(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        _ => "application/octet-stream",
    }
}
