//! Contact field validation
//!
//! Checks run in a fixed order and only the first failure is reported:
//! name, phone emptiness, phone format, email format, duplicate phone.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use thiserror::Error;

use crate::models::Contact;

/// Digits only, at least five of them
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{5,}$").expect("phone pattern is valid"));

/// `local@domain.tld` shape, not RFC-complete
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@]+@[^@]+\.[^@]+$").expect("email pattern is valid"));

/// Input field a validation failure refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Name,
    Phone,
    Email,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Phone => "phone",
            Field::Email => "email",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reasons a contact can be rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Name cannot be empty.")]
    EmptyName,

    #[error("Phone number cannot be empty.")]
    EmptyPhone,

    #[error("Phone number must contain only digits and be at least 5 characters long.")]
    InvalidPhone,

    #[error("Invalid email format.")]
    InvalidEmail,

    #[error("A contact with phone number {phone} already exists.")]
    DuplicatePhone { phone: String },
}

impl ValidationError {
    /// The input field at fault
    pub fn field(&self) -> Field {
        match self {
            ValidationError::EmptyName => Field::Name,
            ValidationError::EmptyPhone
            | ValidationError::InvalidPhone
            | ValidationError::DuplicatePhone { .. } => Field::Phone,
            ValidationError::InvalidEmail => Field::Email,
        }
    }
}

/// Validate candidate contact fields against the existing records
///
/// `excluding_phone` is skipped during the duplicate check so a record
/// being updated does not collide with itself. Has no side effects.
pub fn validate(
    name: &str,
    phone: &str,
    email: &str,
    existing: &[Contact],
    excluding_phone: Option<&str>,
) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::EmptyName);
    }

    let phone = phone.trim();
    if phone.is_empty() {
        return Err(ValidationError::EmptyPhone);
    }
    if !is_valid_phone(phone) {
        return Err(ValidationError::InvalidPhone);
    }

    let email = email.trim();
    if !email.is_empty() && !is_valid_email(email) {
        return Err(ValidationError::InvalidEmail);
    }

    let duplicate = existing
        .iter()
        .any(|c| c.phone == phone && Some(c.phone.as_str()) != excluding_phone);
    if duplicate {
        return Err(ValidationError::DuplicatePhone {
            phone: phone.to_string(),
        });
    }

    Ok(())
}

/// Check a (trimmed) phone number against the digit pattern
pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_RE.is_match(phone)
}

/// Check a (trimmed, non-empty) email against the address pattern
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}
