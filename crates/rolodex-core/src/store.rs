//! Contact store
//!
//! The `ContactStore` owns the in-memory contact sequence and the file it
//! is persisted to. It is the only thing that mutates the sequence.
//!
//! ## Persistence
//!
//! Every successful add, update, delete and clear writes the whole sequence
//! back to disk. Sorting only reorders the in-memory view and is never
//! written, so a reload restores the last persisted order.
//!
//! A failed save does not roll back the change that preceded it. The
//! operation still succeeds and the returned [`Outcome`] carries the save
//! error, leaving it to the caller to surface the drift.
//!
//! ## Usage
//!
//! ```ignore
//! let (mut store, report) = ContactStore::open("contacts.json");
//! println!("{}", report.message);
//!
//! let outcome = store.add("Alice Smith", "5551234567", "alice@example.com")?;
//! println!("{}", outcome.message());
//!
//! let matches = store.search("alice");
//! ```

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{ContactError, ContactResult};
use crate::models::{Contact, SortKey};
use crate::storage::JsonPersistence;
use crate::validation::{self, ValidationError};

/// What happened when the contacts file was read
#[derive(Debug)]
pub enum LoadStatus {
    /// File read and parsed; holds the number of contacts
    Loaded(usize),
    /// No file yet; starting empty
    Missing,
    /// File unreadable or malformed; starting empty
    Failed(ContactError),
}

/// Result of loading the backing file, with a message for the user
#[derive(Debug)]
pub struct LoadReport {
    pub status: LoadStatus,
    pub message: String,
}

impl LoadReport {
    /// Whether loading failed (the store was reset to empty)
    pub fn is_error(&self) -> bool {
        matches!(self.status, LoadStatus::Failed(_))
    }

    /// What the user can do about a failed load
    pub fn recovery_suggestion(&self) -> Option<&'static str> {
        match &self.status {
            LoadStatus::Failed(e) => e.recovery_suggestion(),
            _ => None,
        }
    }

    /// Whether the file was not syntactically valid JSON
    pub fn is_parse_failure(&self) -> bool {
        match &self.status {
            LoadStatus::Failed(ContactError::Persistence { source, .. }) => {
                source.is_parse_failure()
            }
            _ => false,
        }
    }
}

/// Result of a mutating operation that succeeded at the domain level
#[derive(Debug)]
pub struct Outcome {
    summary: String,
    save_error: Option<ContactError>,
}

impl Outcome {
    fn new(summary: impl Into<String>, saved: ContactResult<()>) -> Self {
        Self {
            summary: summary.into(),
            save_error: saved.err(),
        }
    }

    /// What the operation did, without the save status
    pub fn summary(&self) -> &str {
        &self.summary
    }

    /// Whether the change reached the backing file
    pub fn is_persisted(&self) -> bool {
        self.save_error.is_none()
    }

    /// The save failure, if the change only exists in memory
    pub fn save_error(&self) -> Option<&ContactError> {
        self.save_error.as_ref()
    }

    /// Full message: summary followed by the save status
    pub fn message(&self) -> String {
        match &self.save_error {
            None => format!("{} Contacts saved successfully.", self.summary),
            Some(e) => format!("{} Error: {}", self.summary, e),
        }
    }
}

/// In-memory contact sequence bound to one backing file
pub struct ContactStore {
    /// Contacts in display order
    contacts: Vec<Contact>,
    /// Backing file handler
    persistence: JsonPersistence,
}

impl ContactStore {
    /// Open a store backed by the given file
    ///
    /// Never fails: a missing or unreadable file yields an empty store and
    /// the report says why.
    pub fn open(path: impl Into<PathBuf>) -> (Self, LoadReport) {
        let mut store = Self {
            contacts: Vec::new(),
            persistence: JsonPersistence::new(path),
        };
        let report = store.reload();
        (store, report)
    }

    /// Open the store at the configured contacts path
    pub fn open_with_config(config: &Config) -> (Self, LoadReport) {
        Self::open(config.contacts_path())
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        self.persistence.path()
    }

    /// Replace the in-memory sequence with the file's contents
    pub fn reload(&mut self) -> LoadReport {
        let path = self.persistence.path().display().to_string();

        match self.persistence.load() {
            Ok(Some(contacts)) => {
                self.contacts = contacts;
                info!("Loaded {} contacts from {}", self.contacts.len(), path);
                LoadReport {
                    status: LoadStatus::Loaded(self.contacts.len()),
                    message: format!("Loaded {} contacts from {}.", self.contacts.len(), path),
                }
            }
            Ok(None) => {
                self.contacts.clear();
                info!("No contacts file at {}", path);
                LoadReport {
                    status: LoadStatus::Missing,
                    message: "Contact file not found. Starting with an empty contact book."
                        .to_string(),
                }
            }
            Err(e) => {
                self.contacts.clear();
                warn!("Failed to load contacts: {}", e);
                let message = if e.is_parse_failure() {
                    format!(
                        "Error: Could not decode JSON from {}. Starting with empty contacts.",
                        path
                    )
                } else {
                    format!(
                        "An unexpected error occurred while loading contacts: {}. Starting with empty contacts.",
                        e
                    )
                };
                LoadReport {
                    status: LoadStatus::Failed(ContactError::load(e)),
                    message,
                }
            }
        }
    }

    /// Write the whole sequence to the backing file
    pub fn save(&self) -> ContactResult<()> {
        match self.persistence.save(&self.contacts) {
            Ok(()) => {
                debug!("Saved {} contacts", self.contacts.len());
                Ok(())
            }
            Err(e) => {
                warn!("Failed to save contacts: {}", e);
                Err(ContactError::save(e))
            }
        }
    }

    // ==================== Queries ====================

    /// All contacts in current order
    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    /// Number of contacts
    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    /// Whether the book is empty
    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    /// Get a contact by exact phone number
    pub fn get(&self, phone: &str) -> Option<&Contact> {
        self.contacts.iter().find(|c| c.phone == phone)
    }

    /// Contacts matching the query on name, phone or email, in current order
    pub fn search(&self, query: &str) -> Vec<Contact> {
        self.contacts
            .iter()
            .filter(|c| c.matches(query))
            .cloned()
            .collect()
    }

    /// Check candidate fields against the current sequence
    pub fn validate(
        &self,
        name: &str,
        phone: &str,
        email: &str,
        excluding_phone: Option<&str>,
    ) -> Result<(), ValidationError> {
        validation::validate(name, phone, email, &self.contacts, excluding_phone)
    }

    // ==================== Mutations ====================

    /// Add a new contact and persist
    pub fn add(&mut self, name: &str, phone: &str, email: &str) -> ContactResult<Outcome> {
        self.validate(name, phone, email, None).map_err(|e| {
            debug!("Rejected new contact: {}", e);
            e
        })?;

        let contact = Contact::new(name.trim(), phone.trim(), email.trim());
        let summary = format!("Contact '{}' added.", contact.name);
        self.contacts.push(contact);

        Ok(Outcome::new(summary, self.save()))
    }

    /// Overwrite the contact currently holding `old_phone` and persist
    ///
    /// Fields are validated before the target is looked up, so invalid input
    /// is reported even when `old_phone` does not exist.
    pub fn update(
        &mut self,
        old_phone: &str,
        new_name: &str,
        new_phone: &str,
        new_email: &str,
    ) -> ContactResult<Outcome> {
        self.validate(new_name, new_phone, new_email, Some(old_phone))
            .map_err(|e| {
                debug!("Rejected update of {}: {}", old_phone, e);
                e
            })?;

        let contact = self
            .contacts
            .iter_mut()
            .find(|c| c.phone == old_phone)
            .ok_or_else(|| ContactError::NotFound {
                phone: old_phone.to_string(),
            })?;

        contact.name = new_name.trim().to_string();
        contact.phone = new_phone.trim().to_string();
        contact.email = new_email.trim().to_string();

        let summary = format!("Contact with phone '{}' updated.", old_phone);
        Ok(Outcome::new(summary, self.save()))
    }

    /// Remove the contact with exactly this phone number and persist
    pub fn delete(&mut self, phone: &str) -> ContactResult<Outcome> {
        let index = self
            .contacts
            .iter()
            .position(|c| c.phone == phone)
            .ok_or_else(|| ContactError::NotFound {
                phone: phone.to_string(),
            })?;

        let removed = self.contacts.remove(index);
        let summary = format!("Contact '{}' deleted.", removed.name);
        Ok(Outcome::new(summary, self.save()))
    }

    /// Reorder the in-memory sequence; not persisted
    pub fn sort(&mut self, key: SortKey) {
        self.contacts.sort_by(|a, b| key.compare(a, b));
        debug!("Sorted {} contacts by {}", self.contacts.len(), key);
    }

    /// Remove every contact and persist the empty book
    ///
    /// The in-memory sequence is cleared even if the save fails.
    pub fn clear_all(&mut self) -> Outcome {
        let count = self.contacts.len();
        self.contacts.clear();
        info!("Cleared {} contacts", count);
        Outcome::new(
            "All contacts have been reset and deleted.",
            self.save(),
        )
    }
}
