//! Error taxonomy for contact book operations
//!
//! None of these are fatal: callers surface the message and carry on.

use std::fmt;

use thiserror::Error;

use crate::storage::StorageError;
use crate::validation::{Field, ValidationError};

/// Which side of persistence failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Load,
    Save,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Load => f.write_str("load"),
            Phase::Save => f.write_str("save"),
        }
    }
}

/// Errors returned by [`ContactStore`](crate::store::ContactStore) operations
#[derive(Error, Debug)]
pub enum ContactError {
    /// Update or delete target is absent
    #[error("No contact found with phone number '{phone}'.")]
    NotFound { phone: String },

    /// Input rejected; nothing was changed
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Backing file could not be read or written
    #[error("Could not {phase} contacts: {source}")]
    Persistence {
        phase: Phase,
        #[source]
        source: StorageError,
    },
}

impl ContactError {
    pub(crate) fn load(source: StorageError) -> Self {
        ContactError::Persistence {
            phase: Phase::Load,
            source,
        }
    }

    pub(crate) fn save(source: StorageError) -> Self {
        ContactError::Persistence {
            phase: Phase::Save,
            source,
        }
    }

    /// The input field at fault, for validation failures
    pub fn field(&self) -> Option<Field> {
        match self {
            ContactError::Validation(e) => Some(e.field()),
            _ => None,
        }
    }

    /// Whether the operation target did not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, ContactError::NotFound { .. })
    }

    /// What the user can do about a persistence failure
    pub fn recovery_suggestion(&self) -> Option<&'static str> {
        match self {
            ContactError::Persistence { source, .. } => source.recovery_suggestion(),
            _ => None,
        }
    }

    /// Short machine-readable kind, used by JSON output
    pub fn kind(&self) -> &'static str {
        match self {
            ContactError::NotFound { .. } => "not_found",
            ContactError::Validation(ValidationError::EmptyName) => "empty_name",
            ContactError::Validation(ValidationError::EmptyPhone) => "empty_phone",
            ContactError::Validation(ValidationError::InvalidPhone) => "invalid_phone",
            ContactError::Validation(ValidationError::InvalidEmail) => "invalid_email",
            ContactError::Validation(ValidationError::DuplicatePhone { .. }) => "duplicate_phone",
            ContactError::Persistence {
                phase: Phase::Load,
                source,
            } if source.is_parse_failure() => "parse_failure",
            ContactError::Persistence {
                phase: Phase::Load,
                ..
            } => "load_failure",
            ContactError::Persistence {
                phase: Phase::Save,
                ..
            } => "save_failure",
        }
    }
}

/// Result type for contact book operations
pub type ContactResult<T> = Result<T, ContactError>;
