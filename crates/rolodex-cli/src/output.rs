//! Output formatting for CLI
//!
//! Provides consistent output formatting across all commands:
//! - Human-readable default output
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag)

use rolodex_core::{Contact, ContactError, Field, LoadReport, Outcome};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output
    Json,
    /// Quiet mode - minimal output
    Quiet,
}

impl OutputFormat {
    /// Create format from CLI flags
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// Output helper for consistent formatting
pub struct Output {
    /// The output format
    pub format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Check if output is in JSON mode
    pub fn is_json(&self) -> bool {
        matches!(self.format, OutputFormat::Json)
    }

    /// Check if output is in quiet mode
    pub fn is_quiet(&self) -> bool {
        matches!(self.format, OutputFormat::Quiet)
    }

    /// Print a single contact
    pub fn print_contact(&self, contact: &Contact) {
        match self.format {
            OutputFormat::Human => {
                println!("Name:  {}", contact.name);
                println!("Phone: {}", contact.phone);
                println!(
                    "Email: {}",
                    if contact.has_email() {
                        contact.email.as_str()
                    } else {
                        "-"
                    }
                );
            }
            OutputFormat::Json => {
                println!("{}", to_json(contact));
            }
            OutputFormat::Quiet => {
                println!("{}", contact.phone);
            }
        }
    }

    /// Print a list of contacts
    pub fn print_contacts(&self, contacts: &[Contact]) {
        match self.format {
            OutputFormat::Human => {
                if contacts.is_empty() {
                    println!("No contacts to display.");
                    return;
                }
                for contact in contacts {
                    println!(
                        "{} | {}",
                        pad(&truncate(&contact.label(), 45), 45),
                        truncate(&contact.email, 35)
                    );
                }
                println!("\n{} contact(s)", contacts.len());
            }
            OutputFormat::Json => {
                println!("{}", to_json(contacts));
            }
            OutputFormat::Quiet => {
                for contact in contacts {
                    println!("{}", contact.phone);
                }
            }
        }
    }

    /// Report a successful mutating operation, including its save status
    pub fn outcome(&self, outcome: &Outcome) {
        match self.format {
            OutputFormat::Human => {
                println!("✓ {}", outcome.summary());
                if let Some(e) = outcome.save_error() {
                    eprintln!("⚠ Change kept in memory only: {}", e);
                    if let Some(hint) = e.recovery_suggestion() {
                        eprintln!("  {}", hint);
                    }
                }
            }
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({
                        "status": "success",
                        "message": outcome.message(),
                        "persisted": outcome.is_persisted(),
                    })
                );
            }
            OutputFormat::Quiet => {
                if let Some(e) = outcome.save_error() {
                    eprintln!("{}", e);
                }
            }
        }
    }

    /// Report a failed operation
    ///
    /// Only JSON mode prints here; human and quiet modes rely on the error
    /// returned from `main`.
    pub fn failure(&self, error: &ContactError) {
        self.error(error.kind(), error.field(), &error.to_string());
    }

    /// Print a JSON error object; no-op outside JSON mode
    pub fn error(&self, kind: &str, field: Option<Field>, message: &str) {
        if self.is_json() {
            println!("{}", error_json(kind, field, message));
        }
    }

    /// Warn about a failed load, with a hint when there is one
    pub fn load_warning(&self, report: &LoadReport) {
        self.warning(&report.message);
        if let Some(hint) = report.recovery_suggestion() {
            self.warning(hint);
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Human => println!("✓ {}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({"status": "success", "message": message})
                );
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Print a warning to stderr (not in quiet mode)
    pub fn warning(&self, message: &str) {
        if !self.is_quiet() {
            eprintln!("⚠ {}", message);
        }
    }

    /// Check if we should prompt for confirmation
    pub fn should_prompt(&self) -> bool {
        self.format == OutputFormat::Human
    }

    /// Print an informational message
    pub fn message(&self, msg: &str) {
        match self.format {
            OutputFormat::Human => println!("{}", msg),
            OutputFormat::Json => {
                println!("{}", serde_json::json!({"message": msg}));
            }
            OutputFormat::Quiet => {}
        }
    }
}

/// `{"status": "error", ...}` object shared by every failure path
fn error_json(kind: &str, field: Option<Field>, message: &str) -> serde_json::Value {
    serde_json::json!({
        "status": "error",
        "kind": kind,
        "field": field,
        "message": message,
    })
}

/// Pretty JSON for any serializable value
fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
}

/// Truncate a string to max characters, adding "..." if truncated
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Right-pad to a fixed character width
fn pad(s: &str, width: usize) -> String {
    format!("{:<width$}", s, width = width)
}
