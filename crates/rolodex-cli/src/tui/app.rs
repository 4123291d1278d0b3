//! Application state and logic

use std::time::{Duration, Instant};

use rolodex_core::{Contact, ContactStore, Field, LoadReport, Outcome, SortKey};

/// How long a status message stays visible
const STATUS_TIMEOUT: Duration = Duration::from_secs(3);

/// One on/off phase of the error-field blink
const BLINK_PHASE: Duration = Duration::from_millis(150);

/// Number of blinks after a rejected submit
const BLINK_COUNT: u32 = 3;

/// Input mode for the application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    /// Normal navigation mode
    Normal,
    /// Editing the name/phone/email form
    Form,
    /// Typing a search query (after pressing /)
    Search,
    /// Waiting for a yes/no answer
    Confirm(PendingAction),
}

/// Destructive action awaiting confirmation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingAction {
    /// Delete this record, addressed by its phone
    Delete(Contact),
    /// Remove every record
    ClearAll,
}

/// The three input fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Form {
    pub name: String,
    pub phone: String,
    pub email: String,
}

impl Form {
    /// Form pre-filled with a contact's values
    pub fn from_contact(contact: &Contact) -> Self {
        Self {
            name: contact.name.clone(),
            phone: contact.phone.clone(),
            email: contact.email.clone(),
        }
    }

    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Phone => &self.phone,
            Field::Email => &self.email,
        }
    }

    fn value_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Name => &mut self.name,
            Field::Phone => &mut self.phone,
            Field::Email => &mut self.email,
        }
    }
}

/// Application state
pub struct App {
    /// Whether the app should exit
    pub should_quit: bool,
    /// Current input mode
    pub input_mode: InputMode,
    /// Contacts currently displayed (all, or search results)
    pub contacts: Vec<Contact>,
    /// Currently selected contact index
    pub selected: usize,
    /// Form contents
    pub form: Form,
    /// Field with keyboard focus while in form mode
    pub focus: Field,
    /// Record being edited; `None` means the form adds a new one
    pub editing: Option<Contact>,
    /// Search query buffer
    pub search_input: String,
    /// Status message to display temporarily
    pub status_message: Option<String>,
    /// Whether the status message reports a failure
    pub status_is_error: bool,
    /// When the status message was set (for auto-dismiss)
    pub status_message_time: Option<Instant>,
    /// Field rejected by the last submit and when it started blinking
    pub error_field: Option<(Field, Instant)>,
    /// Whether help overlay is visible
    pub show_help: bool,
}

impl App {
    /// Create a new app showing every contact in the store
    pub fn new(store: &ContactStore) -> Self {
        Self {
            should_quit: false,
            input_mode: InputMode::Normal,
            contacts: store.contacts().to_vec(),
            selected: 0,
            form: Form::default(),
            focus: Field::Name,
            editing: None,
            search_input: String::new(),
            status_message: None,
            status_is_error: false,
            status_message_time: None,
            error_field: None,
            show_help: false,
        }
    }

    /// Set a status message (will auto-dismiss after 3 seconds)
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
        self.status_is_error = false;
        self.status_message_time = Some(Instant::now());
    }

    /// Set an error status message
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.set_status(message);
        self.status_is_error = true;
    }

    /// Report a mutation's result, flagging a failed save
    fn set_outcome(&mut self, outcome: &Outcome) {
        match outcome.save_error() {
            None => self.set_status(outcome.message()),
            Some(e) => self.set_error(with_hint(outcome.message(), e.recovery_suggestion())),
        }
    }

    /// Check and clear expired status message and blink
    pub fn check_status_timeout(&mut self) {
        if let Some(time) = self.status_message_time {
            if time.elapsed() > STATUS_TIMEOUT {
                self.status_message = None;
                self.status_is_error = false;
                self.status_message_time = None;
            }
        }
        if let Some((_, started)) = self.error_field {
            if started.elapsed() >= BLINK_PHASE * BLINK_COUNT * 2 {
                self.error_field = None;
            }
        }
    }

    /// Whether `field` should currently be drawn highlighted
    pub fn is_field_highlighted(&self, field: Field) -> bool {
        match self.error_field {
            Some((f, started)) if f == field => {
                let phase = started.elapsed().as_millis() / BLINK_PHASE.as_millis();
                phase < u128::from(BLINK_COUNT * 2) && phase % 2 == 0
            }
            _ => false,
        }
    }

    /// Toggle help overlay
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Show the given load result
    pub fn show_load_report(&mut self, report: &LoadReport) {
        if report.is_error() {
            self.set_error(with_hint(report.message.clone(), report.recovery_suggestion()));
        } else {
            self.set_status(&report.message);
        }
    }

    // ==================== Selection ====================

    /// Get the currently selected contact
    pub fn current_contact(&self) -> Option<&Contact> {
        self.contacts.get(self.selected)
    }

    pub fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        if self.selected < self.contacts.len().saturating_sub(1) {
            self.selected += 1;
        }
    }

    /// Show every contact in store order
    pub fn refresh(&mut self, store: &ContactStore) {
        self.contacts = store.contacts().to_vec();
        self.clamp_selection();
    }

    fn clamp_selection(&mut self) {
        self.selected = self.selected.min(self.contacts.len().saturating_sub(1));
    }

    // ==================== Form ====================

    /// Open an empty form for a new contact
    pub fn start_add(&mut self) {
        self.form = Form::default();
        self.editing = None;
        self.focus = Field::Name;
        self.error_field = None;
        self.input_mode = InputMode::Form;
    }

    /// Load the selected contact into the form for editing
    pub fn start_edit(&mut self) {
        let Some(contact) = self.current_contact().cloned() else {
            self.set_error("Please select a contact from the list to update.");
            return;
        };

        self.form = Form::from_contact(&contact);
        self.focus = Field::Name;
        self.error_field = None;
        self.input_mode = InputMode::Form;
        self.set_status(format!("Contact '{}' loaded for editing.", contact.name));
        self.editing = Some(contact);
    }

    /// Empty the form and forget the record being edited
    pub fn clear_fields(&mut self) {
        self.form = Form::default();
        self.editing = None;
        self.error_field = None;
        self.set_status("Input fields cleared.");
    }

    /// Leave the form without saving
    pub fn cancel_form(&mut self) {
        self.input_mode = InputMode::Normal;
        self.error_field = None;
    }

    pub fn next_field(&mut self) {
        self.focus = match self.focus {
            Field::Name => Field::Phone,
            Field::Phone => Field::Email,
            Field::Email => Field::Name,
        };
    }

    pub fn prev_field(&mut self) {
        self.focus = match self.focus {
            Field::Name => Field::Email,
            Field::Phone => Field::Name,
            Field::Email => Field::Phone,
        };
    }

    /// Insert character into the focused field
    pub fn insert_char(&mut self, c: char) {
        self.form.value_mut(self.focus).push(c);
    }

    /// Delete the last character of the focused field
    pub fn delete_char(&mut self) {
        self.form.value_mut(self.focus).pop();
    }

    /// Add or update from the form contents
    ///
    /// A rejected submit keeps the form open with the focus on the
    /// offending field, which blinks.
    pub fn submit_form(&mut self, store: &mut ContactStore) {
        let Form { name, phone, email } = self.form.clone();
        let result = match &self.editing {
            Some(original) => store.update(&original.phone, &name, &phone, &email),
            None => store.add(&name, &phone, &email),
        };

        match result {
            Ok(outcome) => {
                self.refresh(store);
                if let Some(index) = self.contacts.iter().position(|c| c.phone == phone.trim()) {
                    self.selected = index;
                }
                self.form = Form::default();
                self.editing = None;
                self.error_field = None;
                self.input_mode = InputMode::Normal;
                self.set_outcome(&outcome);
            }
            Err(e) => {
                if let Some(field) = e.field() {
                    self.focus = field;
                    self.error_field = Some((field, Instant::now()));
                }
                self.set_error(e.to_string());
            }
        }
    }

    // ==================== Search & view ====================

    pub fn start_search(&mut self) {
        self.search_input.clear();
        self.input_mode = InputMode::Search;
    }

    pub fn cancel_search(&mut self) {
        self.search_input.clear();
        self.input_mode = InputMode::Normal;
        self.set_status("Search cancelled.");
    }

    /// Replace the displayed list with the matches for the typed query
    pub fn submit_search(&mut self, store: &ContactStore) {
        let query = std::mem::take(&mut self.search_input);
        self.input_mode = InputMode::Normal;

        if query.is_empty() {
            self.set_status("Search cancelled.");
            return;
        }

        self.contacts = store.search(&query);
        self.selected = 0;
        if self.contacts.is_empty() {
            self.set_error(format!("No contacts found for '{}'.", query));
        } else {
            self.set_status(format!(
                "Found {} matching contacts for '{}'.",
                self.contacts.len(),
                query
            ));
        }
    }

    /// Show every contact again and reset the form
    pub fn view_all(&mut self, store: &ContactStore) {
        self.refresh(store);
        self.clear_fields();
        self.set_status("Displaying all contacts.");
    }

    /// Reorder the store and show everything in the new order
    pub fn sort(&mut self, store: &mut ContactStore, key: SortKey) {
        store.sort(key);
        self.refresh(store);
        self.set_status(format!("Contacts sorted by {}.", key));
    }

    /// Re-read the backing file
    pub fn reload(&mut self, store: &mut ContactStore) {
        let report = store.reload();
        self.refresh(store);
        self.show_load_report(&report);
    }

    // ==================== Destructive actions ====================

    /// Ask to delete the selected contact
    pub fn request_delete(&mut self) {
        match self.current_contact().cloned() {
            Some(contact) => {
                self.input_mode = InputMode::Confirm(PendingAction::Delete(contact));
            }
            None => self.set_error("Please select a contact to delete."),
        }
    }

    /// Ask to remove every contact
    pub fn request_clear_all(&mut self) {
        self.input_mode = InputMode::Confirm(PendingAction::ClearAll);
    }

    /// Resolve the pending confirmation
    pub fn answer_confirm(&mut self, store: &mut ContactStore, yes: bool) {
        let InputMode::Confirm(action) = std::mem::replace(&mut self.input_mode, InputMode::Normal)
        else {
            return;
        };

        match (action, yes) {
            (PendingAction::Delete(contact), true) => match store.delete(&contact.phone) {
                Ok(outcome) => {
                    self.refresh(store);
                    self.form = Form::default();
                    self.editing = None;
                    self.set_outcome(&outcome);
                }
                Err(e) => self.set_error(e.to_string()),
            },
            (PendingAction::Delete(_), false) => self.set_status("Deletion cancelled."),
            (PendingAction::ClearAll, true) => {
                let outcome = store.clear_all();
                self.refresh(store);
                self.form = Form::default();
                self.editing = None;
                match outcome.save_error() {
                    None => self.set_status(outcome.summary()),
                    Some(e) => self.set_error(format!("Error resetting contacts: {}", e)),
                }
            }
            (PendingAction::ClearAll, false) => self.set_status("Reset cancelled."),
        }
    }
}

/// Append a recovery hint to a status message
fn with_hint(message: String, hint: Option<&str>) -> String {
    match hint {
        Some(hint) => format!("{} {}", message, hint),
        None => message,
    }
}
