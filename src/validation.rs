//! Draft validation.
//!
//! Every field is checked independently and all violations are reported
//! together, so a form can show every message at once. An empty
//! [`ValidationErrors`] means the draft may be written.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use thiserror::Error;

use crate::models::{CreateEmployee, EmployeeDraft, is_us_state};

/// Minimum trimmed length of a full name, in characters.
pub const MIN_NAME_CHARS: usize = 2;
/// Youngest allowed employee age (year difference).
pub const MIN_AGE: i32 = 18;
/// Oldest allowed employee age (year difference).
pub const MAX_AGE: i32 = 100;

/// Form field a validation error is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    FullName,
    DateOfBirth,
    State,
    ProfileImage,
}

impl Field {
    /// Field name as used in the persisted record.
    pub fn name(&self) -> &'static str {
        match self {
            Field::FullName => "fullName",
            Field::DateOfBirth => "dateOfBirth",
            Field::State => "state",
            Field::ProfileImage => "profileImage",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Kind of field violation.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FieldError {
    #[error("required")]
    Required,

    #[error("too short")]
    TooShort,

    #[error("out of range")]
    OutOfRange,

    #[error("invalid file type")]
    InvalidType,

    #[error("file too large")]
    TooLarge,
}

/// User-facing message for a violation on a given field.
pub fn message(field: Field, error: FieldError) -> &'static str {
    match (field, error) {
        (Field::FullName, FieldError::Required) => "Full name is required",
        (Field::FullName, FieldError::TooShort) => "Name must be at least 2 characters",
        (Field::DateOfBirth, FieldError::Required) => "Date of birth is required",
        (Field::DateOfBirth, FieldError::OutOfRange) => "Employee must be between 18 and 100 years old",
        (Field::State, FieldError::Required) => "State is required",
        (Field::ProfileImage, FieldError::Required) => "Profile image is required",
        (Field::ProfileImage, FieldError::InvalidType) => {
            "Please upload a valid image file (JPEG, PNG, GIF, or WebP)"
        }
        (Field::ProfileImage, FieldError::TooLarge) => "Image size must be less than 5MB",
        // Kinds the rules never raise for this field
        (field, _) => match field {
            Field::FullName => "Full name is invalid",
            Field::DateOfBirth => "Date of birth is invalid",
            Field::State => "State is invalid",
            Field::ProfileImage => "Profile image is invalid",
        },
    }
}

/// Field → violation mapping. Empty means valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: BTreeMap<Field, FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a violation, replacing any earlier one for the same field.
    pub fn insert(&mut self, field: Field, error: FieldError) {
        self.errors.insert(field, error);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn get(&self, field: Field) -> Option<FieldError> {
        self.errors.get(&field).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, FieldError)> + '_ {
        self.errors.iter().map(|(f, e)| (*f, *e))
    }

    /// Field name → message mapping, ready for display.
    pub fn messages(&self) -> BTreeMap<&'static str, &'static str> {
        self.iter().map(|(f, e)| (f.name(), message(f, e))).collect()
    }

    /// Convert to `Ok(())` when empty, `Err(self)` otherwise.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .iter()
            .map(|(field, error)| format!("{field}: {}", message(field, error)))
            .collect();
        f.write_str(&parts.join("; "))
    }
}

/// Age as a plain year difference, ignoring month and day.
pub fn year_difference(date_of_birth: NaiveDate, today: NaiveDate) -> i32 {
    today.year() - date_of_birth.year()
}

/// Validate a draft as of `today`.
pub fn validate_draft(draft: &EmployeeDraft, today: NaiveDate) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    let name = draft.full_name.trim();
    if name.is_empty() {
        errors.insert(Field::FullName, FieldError::Required);
    } else if name.chars().count() < MIN_NAME_CHARS {
        errors.insert(Field::FullName, FieldError::TooShort);
    }

    match draft.date_of_birth {
        None => errors.insert(Field::DateOfBirth, FieldError::Required),
        Some(dob) => {
            let age = year_difference(dob, today);
            if !(MIN_AGE..=MAX_AGE).contains(&age) {
                errors.insert(Field::DateOfBirth, FieldError::OutOfRange);
            }
        }
    }

    if draft.state.is_empty() || !is_us_state(&draft.state) {
        errors.insert(Field::State, FieldError::Required);
    }

    if draft.profile_image.is_empty() {
        errors.insert(Field::ProfileImage, FieldError::Required);
    }

    errors
}

/// Validate a draft and turn it into a create DTO.
pub fn validate_create(draft: &EmployeeDraft, today: NaiveDate) -> Result<CreateEmployee, ValidationErrors> {
    validate_draft(draft, today).into_result()?;

    let Some(date_of_birth) = draft.date_of_birth else {
        let mut errors = ValidationErrors::new();
        errors.insert(Field::DateOfBirth, FieldError::Required);
        return Err(errors);
    };

    Ok(CreateEmployee {
        full_name: draft.full_name.clone(),
        gender: draft.gender,
        date_of_birth,
        state: draft.state.clone(),
        profile_image: draft.profile_image.clone(),
        is_active: draft.is_active,
    })
}
