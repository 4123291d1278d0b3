//! Data models for Rolodex
//!
//! Defines the contact record and the keys the record sequence can be
//! sorted by. A contact's phone number is its identity; there is no
//! separate synthetic ID.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A single contact entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Contact {
    /// Display name
    pub name: String,
    /// Digit string, unique across the book
    pub phone: String,
    /// Email address (may be empty)
    pub email: String,
}

impl Contact {
    /// Create a new contact
    pub fn new(
        name: impl Into<String>,
        phone: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            email: email.into(),
        }
    }

    /// Label used when rendering the contact in a list: `"{name} ({phone})"`
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.phone)
    }

    /// Check whether the contact matches a search query
    ///
    /// Name and email compare case-insensitively, phone compares as-is.
    /// An empty email never matches.
    pub fn matches(&self, query: &str) -> bool {
        let query_lower = query.to_lowercase();
        self.name.to_lowercase().contains(&query_lower)
            || self.phone.contains(query)
            || (!self.email.is_empty() && self.email.to_lowercase().contains(&query_lower))
    }

    /// Check whether the contact has an email address
    pub fn has_email(&self) -> bool {
        !self.email.is_empty()
    }
}

impl fmt::Display for Contact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Name: {}, Phone: {}, Email: {}",
            self.name, self.phone, self.email
        )
    }
}

/// Field a contact sequence can be ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Case-insensitive name order
    #[default]
    Name,
    /// Lexicographic order on the digit string (not numeric)
    Phone,
    /// Case-insensitive email order, empty emails first
    Email,
}

impl SortKey {
    /// All sort keys, in menu order
    pub const ALL: [SortKey; 3] = [SortKey::Name, SortKey::Phone, SortKey::Email];

    /// Key name as used in configuration and on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Name => "name",
            SortKey::Phone => "phone",
            SortKey::Email => "email",
        }
    }

    /// Compare two contacts under this key
    pub fn compare(&self, a: &Contact, b: &Contact) -> Ordering {
        match self {
            SortKey::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            SortKey::Phone => a.phone.cmp(&b.phone),
            SortKey::Email => a.email.to_lowercase().cmp(&b.email.to_lowercase()),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown sort key
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown sort key '{0}'. Valid keys: name, phone, email")]
pub struct ParseSortKeyError(pub String);

impl FromStr for SortKey {
    type Err = ParseSortKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "name" => Ok(SortKey::Name),
            "phone" => Ok(SortKey::Phone),
            "email" => Ok(SortKey::Email),
            _ => Err(ParseSortKeyError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contact_new() {
        let contact = Contact::new("Alice Smith", "5551234567", "alice@example.com");
        assert_eq!(contact.name, "Alice Smith");
        assert_eq!(contact.phone, "5551234567");
        assert_eq!(contact.email, "alice@example.com");
        assert!(contact.has_email());
    }

    #[test]
    fn test_contact_label() {
        let contact = Contact::new("Bob", "12345", "");
        assert_eq!(contact.label(), "Bob (12345)");
    }

    #[test]
    fn test_contact_display() {
        let contact = Contact::new("Bob", "12345", "bob@example.com");
        assert_eq!(
            contact.to_string(),
            "Name: Bob, Phone: 12345, Email: bob@example.com"
        );
    }

    #[test]
    fn test_matches_name_case_insensitive() {
        let contact = Contact::new("Alice Smith", "5551234567", "");
        assert!(contact.matches("alice"));
        assert!(contact.matches("SMITH"));
        assert!(!contact.matches("bob"));
    }

    #[test]
    fn test_matches_phone_substring() {
        let contact = Contact::new("Alice", "5551234567", "");
        assert!(contact.matches("1234"));
        assert!(!contact.matches("9999"));
    }

    #[test]
    fn test_matches_email_only_when_present() {
        let with_email = Contact::new("Alice", "55512", "Alice@Example.COM");
        assert!(with_email.matches("example.com"));

        let without_email = Contact::new("Carol", "55513", "");
        assert!(!without_email.matches("@"));
    }

    #[test]
    fn test_empty_query_matches_everything() {
        let contact = Contact::new("Alice", "55512", "");
        assert!(contact.matches(""));
    }

    #[test]
    fn test_sort_key_parse() {
        assert_eq!("name".parse::<SortKey>().unwrap(), SortKey::Name);
        assert_eq!("Phone".parse::<SortKey>().unwrap(), SortKey::Phone);
        assert_eq!(" email ".parse::<SortKey>().unwrap(), SortKey::Email);
        assert!("age".parse::<SortKey>().is_err());
    }

    #[test]
    fn test_sort_key_display_roundtrip() {
        for key in SortKey::ALL {
            assert_eq!(key.to_string().parse::<SortKey>().unwrap(), key);
        }
    }

    #[test]
    fn test_phone_compare_is_lexicographic() {
        let short = Contact::new("A", "99999", "");
        let long = Contact::new("B", "100000", "");
        // "100000" < "99999" as strings
        assert_eq!(SortKey::Phone.compare(&long, &short), Ordering::Less);
    }

    #[test]
    fn test_email_compare_empty_first() {
        let empty = Contact::new("A", "11111", "");
        let set = Contact::new("B", "22222", "a@b.co");
        assert_eq!(SortKey::Email.compare(&empty, &set), Ordering::Less);
    }

    #[test]
    fn test_contact_serialization() {
        let contact = Contact::new("Alice", "5551234567", "alice@example.com");
        let json = serde_json::to_string(&contact).unwrap();
        assert_eq!(
            json,
            r#"{"name":"Alice","phone":"5551234567","email":"alice@example.com"}"#
        );
        let deserialized: Contact = serde_json::from_str(&json).unwrap();
        assert_eq!(contact, deserialized);
    }
}
