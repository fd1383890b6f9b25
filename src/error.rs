//! Error types and handling.

use thiserror::Error;

use crate::config::ConfigError;
use crate::session::AuthError;
use crate::storage::StorageError;
use crate::validation::{Field, FieldError, ValidationErrors, message};

/// Application-wide error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Persistence backend failed
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Login rejected
    #[error("Login failed: {0}")]
    Auth(#[from] AuthError),

    /// Operation requires a logged-in session
    #[error("Not logged in")]
    NotAuthenticated,

    /// Draft failed validation
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    /// Uploaded image rejected
    #[error("Image rejected: {}", image_message(.0))]
    Image(FieldError),

    /// Record not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Excel export error
    #[error("Export error: {0}")]
    Export(#[from] rust_xlsxwriter::XlsxError),
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors)
    }
}

fn image_message(error: &FieldError) -> &'static str {
    message(Field::ProfileImage, *error)
}

/// Result type alias for AppError
pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
    /// Create a not found error for an employee id
    pub fn employee_not_found(id: i64) -> Self {
        Self::NotFound(format!("employee #{id}"))
    }
}
