//! Storage layer
//!
//! Handles persistence of the contact sequence to a single JSON file.
//!
//! The whole sequence is written on every save; there is no incremental
//! update, journal or schema version.

pub mod error;
pub mod persistence;

pub use error::{StorageError, StorageResult};
pub use persistence::JsonPersistence;
