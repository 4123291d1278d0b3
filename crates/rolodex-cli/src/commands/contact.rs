//! Contact command handlers

use anyhow::{Context, Result};

use rolodex_core::{Contact, ContactError, ContactStore, SortKey};

use crate::output::Output;
use crate::prompt::{confirm, prompt_with_default};

/// Fields supplied to `update`; `None` keeps the current value
#[derive(Debug, Default)]
pub struct ContactEdits {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

impl ContactEdits {
    fn is_empty(&self) -> bool {
        self.name.is_none() && self.phone.is_none() && self.email.is_none()
    }

    /// Whether every field was given, so no current record is needed
    fn is_complete(&self) -> bool {
        self.name.is_some() && self.phone.is_some() && self.email.is_some()
    }
}

/// Add a new contact
pub fn add(
    store: &mut ContactStore,
    name: String,
    phone: String,
    email: Option<String>,
    output: &Output,
) -> Result<()> {
    let email = email.unwrap_or_default();
    let outcome = store
        .add(&name, &phone, &email)
        .map_err(|e| report(e, output))
        .context("Failed to add contact")?;

    output.outcome(&outcome);
    if let Some(contact) = store.get(phone.trim()) {
        if !output.is_json() {
            output.print_contact(contact);
        }
    }
    Ok(())
}

/// Update the contact identified by `old_phone`
///
/// Omitted fields keep their current values. With no fields given and an
/// interactive terminal, each field is prompted for.
pub fn update(
    store: &mut ContactStore,
    old_phone: String,
    edits: ContactEdits,
    output: &Output,
) -> Result<()> {
    let current = store.get(&old_phone).cloned();
    // Without a record to merge from, only a full set of fields can be validated
    if current.is_none() && !edits.is_complete() {
        let err = report(ContactError::NotFound { phone: old_phone }, output);
        return Err(err).context("Failed to update contact");
    }

    let edits = match &current {
        Some(contact) if edits.is_empty() && output.should_prompt() => prompt_edits(contact)?,
        _ => edits,
    };

    let (cur_name, cur_phone, cur_email) = match &current {
        Some(c) => (c.name.clone(), c.phone.clone(), c.email.clone()),
        None => (String::new(), old_phone.clone(), String::new()),
    };
    let name = edits.name.unwrap_or(cur_name);
    let phone = edits.phone.unwrap_or(cur_phone);
    let email = edits.email.unwrap_or(cur_email);

    let outcome = store
        .update(&old_phone, &name, &phone, &email)
        .map_err(|e| report(e, output))
        .context("Failed to update contact")?;

    output.outcome(&outcome);
    if let Some(contact) = store.get(phone.trim()) {
        if !output.is_json() {
            output.print_contact(contact);
        }
    }
    Ok(())
}

/// Prompt for each field, showing the current value as default
fn prompt_edits(contact: &Contact) -> Result<ContactEdits> {
    println!("Editing contact: {}", contact.label());
    println!("Press Enter to keep current value, or type new value.\n");

    Ok(ContactEdits {
        name: prompt_with_default("Name", &contact.name)?,
        phone: prompt_with_default("Phone", &contact.phone)?,
        email: prompt_with_default("Email (\"-\" clears)", &contact.email)?
            .map(|e| if e == "-" { String::new() } else { e }),
    })
}

/// Delete a contact by exact phone number
pub fn delete(store: &mut ContactStore, phone: String, yes: bool, output: &Output) -> Result<()> {
    if let Some(contact) = store.get(&phone) {
        let prompt = format!(
            "Delete contact:\n  Name:  {}\n  Phone: {}\nAre you sure?",
            contact.name, contact.phone
        );
        if !confirmed(yes, &prompt, output)? {
            output.message("Deletion cancelled.");
            return Ok(());
        }
    }

    let outcome = store
        .delete(&phone)
        .map_err(|e| report(e, output))
        .context("Failed to delete contact")?;

    output.outcome(&outcome);
    Ok(())
}

/// List all contacts, optionally in a given order
///
/// The order only applies to this listing; the file keeps its own order.
pub fn list(store: &mut ContactStore, sort: Option<SortKey>, output: &Output) -> Result<()> {
    if let Some(key) = sort {
        store.sort(key);
    }
    output.print_contacts(store.contacts());
    Ok(())
}

/// Search contacts by name, phone or email
pub fn search(store: &ContactStore, query: String, output: &Output) -> Result<()> {
    let matches = store.search(&query);
    if matches.is_empty() && !output.is_json() {
        output.message(&format!("No contacts found for '{}'.", query));
        return Ok(());
    }
    output.print_contacts(&matches);
    Ok(())
}

/// Show a single contact
pub fn show(store: &ContactStore, phone: String, output: &Output) -> Result<()> {
    let contact = store
        .get(&phone)
        .ok_or_else(|| ContactError::NotFound {
            phone: phone.clone(),
        })
        .map_err(|e| report(e, output))?;

    output.print_contact(contact);
    Ok(())
}

/// Remove every contact
pub fn clear(store: &mut ContactStore, yes: bool, output: &Output) -> Result<()> {
    let prompt = format!(
        "This deletes ALL {} contacts. Are you absolutely sure? This action cannot be undone.",
        store.len()
    );
    if !confirmed(yes, &prompt, output)? {
        output.message("Reset cancelled.");
        return Ok(());
    }

    let outcome = store.clear_all();
    output.outcome(&outcome);
    Ok(())
}

/// Ask before a destructive action unless `--yes` was given
///
/// JSON and quiet modes never prompt, so they require `--yes`.
fn confirmed(yes: bool, prompt: &str, output: &Output) -> Result<bool> {
    if yes {
        return Ok(true);
    }
    if !output.should_prompt() {
        let message = "Confirmation required: pass --yes to proceed";
        output.error("confirmation_required", None, message);
        anyhow::bail!(message);
    }
    confirm(prompt)
}

/// Print the error in JSON mode and hand it back for propagation
fn report(error: ContactError, output: &Output) -> ContactError {
    output.failure(&error);
    error
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputFormat;
    use tempfile::TempDir;

    fn setup() -> (TempDir, ContactStore) {
        let temp_dir = TempDir::new().unwrap();
        let (mut store, _) = ContactStore::open(temp_dir.path().join("contacts.json"));
        store.add("Alice", "5551234567", "").unwrap();
        (temp_dir, store)
    }

    fn not_found(err: &anyhow::Error) -> bool {
        err.downcast_ref::<ContactError>()
            .is_some_and(ContactError::is_not_found)
    }

    #[test]
    fn test_update_missing_phone_with_partial_flags_is_not_found() {
        let (_dir, mut store) = setup();
        let output = Output::new(OutputFormat::Quiet);

        let edits = ContactEdits {
            email: Some("a@b.co".to_string()),
            ..Default::default()
        };
        let err = update(&mut store, "99999".to_string(), edits, &output).unwrap_err();

        assert!(not_found(&err));
        assert_eq!(store.contacts()[0], Contact::new("Alice", "5551234567", ""));
    }

    #[test]
    fn test_update_missing_phone_with_all_flags_validates_first() {
        let (_dir, mut store) = setup();
        let output = Output::new(OutputFormat::Quiet);

        let edits = ContactEdits {
            name: Some(String::new()),
            phone: Some("5550000000".to_string()),
            email: Some(String::new()),
        };
        let err = update(&mut store, "99999".to_string(), edits, &output).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ContactError>(),
            Some(ContactError::Validation(_))
        ));

        let edits = ContactEdits {
            name: Some("Bob".to_string()),
            phone: Some("5550000000".to_string()),
            email: Some(String::new()),
        };
        let err = update(&mut store, "99999".to_string(), edits, &output).unwrap_err();
        assert!(not_found(&err));
    }

    #[test]
    fn test_update_merges_omitted_fields() {
        let (_dir, mut store) = setup();
        let output = Output::new(OutputFormat::Quiet);

        let edits = ContactEdits {
            email: Some("alice@example.com".to_string()),
            ..Default::default()
        };
        update(&mut store, "5551234567".to_string(), edits, &output).unwrap();

        assert_eq!(
            store.get("5551234567").unwrap(),
            &Contact::new("Alice", "5551234567", "alice@example.com")
        );
    }

    #[test]
    fn test_destructive_commands_need_yes_outside_human_mode() {
        let (_dir, mut store) = setup();
        let output = Output::new(OutputFormat::Json);

        let err = delete(&mut store, "5551234567".to_string(), false, &output).unwrap_err();
        assert!(err.to_string().contains("--yes"));
        assert!(clear(&mut store, false, &output).is_err());
        assert_eq!(store.len(), 1);

        clear(&mut store, true, &output).unwrap();
        assert!(store.is_empty());
    }
}
