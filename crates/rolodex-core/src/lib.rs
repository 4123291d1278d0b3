//! Rolodex Core Library
//!
//! This crate provides the core functionality for Rolodex, a single-user
//! contact book of name/phone/email records kept in a local JSON file.
//!
//! # Architecture
//!
//! - **ContactStore**: owns the in-memory record sequence and its backing file
//! - **JSON file**: whole-file overwrite after every mutating operation
//!
//! The phone number is a contact's identity; no two records share one.
//!
//! # Quick Start
//!
//! ```text
//! let (mut store, report) = ContactStore::open("contacts.json");
//!
//! // Add a contact
//! store.add("Alice Smith", "5551234567", "alice@example.com")?;
//!
//! // Query contacts
//! let matches = store.search("alice");
//! ```
//!
//! # Modules
//!
//! - `store`: Contact store (main entry point)
//! - `models`: Contact record and sort keys
//! - `validation`: Field validation rules
//! - `error`: Operation error taxonomy
//! - `storage`: JSON file persistence
//! - `config`: Application configuration

pub mod config;
pub mod error;
pub mod models;
pub mod storage;
pub mod store;
pub mod validation;

pub use config::Config;
pub use error::{ContactError, ContactResult, Phase};
pub use models::{Contact, ParseSortKeyError, SortKey};
pub use storage::{JsonPersistence, StorageError};
pub use store::{ContactStore, LoadReport, LoadStatus, Outcome};
pub use validation::{Field, ValidationError};
