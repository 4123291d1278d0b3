//! Contacts file persistence
//!
//! Handles saving and loading the contact sequence to/from a JSON file.
//! Uses atomic writes (write to temp file, then rename) so a crash mid-save
//! never leaves a half-written file behind.
//!
//! The file holds a JSON array of `{ "name", "phone", "email" }` objects,
//! pretty-printed with a four-space indent.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use super::error::{StorageError, StorageResult};
use crate::models::Contact;

/// Persistence layer for the contacts file
pub struct JsonPersistence {
    path: PathBuf,
}

impl JsonPersistence {
    /// Create a persistence handler bound to the given file
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check if the backing file exists on disk
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Load contacts from disk
    ///
    /// Returns `None` if the file doesn't exist.
    /// Returns an error if the file exists but can't be read or parsed.
    pub fn load(&self) -> StorageResult<Option<Vec<Contact>>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StorageError::from_read(e, self.path.clone())),
        };

        let contacts = serde_json::from_str(&content)
            .map_err(|source| StorageError::from_decode(source, self.path.clone()))?;

        Ok(Some(contacts))
    }

    /// Save contacts to disk, overwriting the previous contents
    pub fn save(&self, contacts: &[Contact]) -> StorageResult<()> {
        let bytes = encode(contacts)?;
        atomic_write(&self.path, &bytes)
    }
}

/// Encode contacts as pretty JSON with a four-space indent
fn encode(contacts: &[Contact]) -> StorageResult<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    contacts
        .serialize(&mut ser)
        .map_err(StorageError::Serialize)?;
    buf.push(b'\n');
    Ok(buf)
}

/// Write data to a file atomically
///
/// 1. Write to a temporary file in the same directory
/// 2. Sync the file to disk
/// 3. Rename the temp file to the target path
fn atomic_write(path: &Path, data: &[u8]) -> StorageResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|source| StorageError::CreateDirectory {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }

    // Same directory, so the rename stays on one filesystem
    let temp_path = path.with_extension("tmp");

    let mut file =
        File::create(&temp_path).map_err(|e| StorageError::from_io(e, temp_path.clone()))?;
    file.write_all(data)
        .map_err(|e| StorageError::from_io(e, temp_path.clone()))?;
    file.sync_all()
        .map_err(|e| StorageError::from_io(e, temp_path.clone()))?;

    fs::rename(&temp_path, path).map_err(|source| StorageError::AtomicWriteFailed {
        from: temp_path.clone(),
        to: path.to_path_buf(),
        source,
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample() -> Vec<Contact> {
        vec![
            Contact::new("Alice Smith", "5551234567", "alice@example.com"),
            Contact::new("Bob", "5559876543", ""),
        ]
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let persistence = JsonPersistence::new(temp_dir.path().join("contacts.json"));

        // Initially no file
        assert!(!persistence.exists());
        assert!(persistence.load().unwrap().is_none());

        persistence.save(&sample()).unwrap();
        assert!(persistence.exists());

        let loaded = persistence.load().unwrap().unwrap();
        assert_eq!(loaded, sample());
    }

    #[test]
    fn test_file_format_is_pretty_json() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("contacts.json");
        let persistence = JsonPersistence::new(&path);

        persistence
            .save(&[Contact::new("Bob", "12345", "")])
            .unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let expected = "[\n    {\n        \"name\": \"Bob\",\n        \"phone\": \"12345\",\n        \"email\": \"\"\n    }\n]\n";
        assert_eq!(content, expected);
    }

    #[test]
    fn test_save_empty_list() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("contacts.json");
        let persistence = JsonPersistence::new(&path);

        persistence.save(&[]).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap().trim(), "[]");
        assert_eq!(persistence.load().unwrap(), Some(Vec::new()));
    }

    #[test]
    fn test_load_malformed_json() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("contacts.json");
        fs::write(&path, "[{\"name\": \"Alice\"").unwrap();

        let err = JsonPersistence::new(&path).load().unwrap_err();
        assert!(err.is_parse_failure());
    }

    #[test]
    fn test_load_missing_field_is_not_parse_failure() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("contacts.json");
        fs::write(&path, r#"[{"name": "Alice", "phone": "12345"}]"#).unwrap();

        let err = JsonPersistence::new(&path).load().unwrap_err();
        assert!(matches!(err, StorageError::InvalidContents { .. }));
        assert!(!err.is_parse_failure());
        assert!(err.to_string().contains("email"));
    }

    #[test]
    fn test_load_top_level_object_is_not_parse_failure() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("contacts.json");
        fs::write(&path, r#"{"name": "Alice"}"#).unwrap();

        let err = JsonPersistence::new(&path).load().unwrap_err();
        assert!(matches!(err, StorageError::InvalidContents { .. }));
    }

    #[test]
    fn test_load_directory_is_read_error() {
        let temp_dir = TempDir::new().unwrap();

        let err = JsonPersistence::new(temp_dir.path()).load().unwrap_err();
        assert!(!err.is_parse_failure());
    }

    #[test]
    fn test_save_overwrites() {
        let temp_dir = TempDir::new().unwrap();
        let persistence = JsonPersistence::new(temp_dir.path().join("contacts.json"));

        persistence.save(&sample()).unwrap();
        persistence
            .save(&[Contact::new("Carol", "11111", "")])
            .unwrap();

        let loaded = persistence.load().unwrap().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].name, "Carol");
    }

    #[test]
    fn test_atomic_write_creates_parent_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let nested_path = temp_dir
            .path()
            .join("a")
            .join("b")
            .join("contacts.json");

        atomic_write(&nested_path, b"[]").unwrap();

        assert!(nested_path.exists());
        assert!(!nested_path.with_extension("tmp").exists());
        assert_eq!(fs::read_to_string(&nested_path).unwrap(), "[]");
    }

    #[test]
    fn test_save_into_file_parent_fails() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();

        let persistence = JsonPersistence::new(blocker.join("contacts.json"));
        let err = persistence.save(&sample()).unwrap_err();
        assert!(matches!(err, StorageError::CreateDirectory { .. }));
    }
}
