//! Rolodex TUI
//!
//! Terminal user interface for the contact book.
//!
//! ## Layout
//!
//! - Top: Name / Phone / Email form
//! - Middle: Contact list as `Name (phone)` labels
//! - Bottom: Status bar or search input
//!
//! ## Navigation
//!
//! - j/k or ↑/↓: Move selection up/down
//! - Tab / Shift+Tab: Next / previous form field
//! - Enter: Edit selected contact / Submit form
//! - Esc: Leave form or search
//! - q: Quit
//!
//! ## Commands
//!
//! - a: Add contact
//! - e: Edit contact
//! - d: Delete contact
//! - R: Reset (delete all contacts)
//! - /: Search
//! - v: View all
//! - 1/2/3: Sort by name/phone/email
//! - c: Clear form fields
//! - r: Reload from disk

mod app;
mod ui;

use std::fs::File;
use std::io::stdout;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::prelude::*;
use rolodex_core::{Config, ContactStore, SortKey};
use tracing::info;
use tracing_subscriber::EnvFilter;

use app::{App, InputMode};

/// Run the TUI application
pub fn run(config: &Config) -> Result<()> {
    // Initialize TUI logging (file-based, only if ROLODEX_LOG is set)
    init_tui_logging(config);

    let (mut store, report) = ContactStore::open_with_config(config);
    if let Some(key) = config.default_sort {
        store.sort(key);
    }

    let mut app = App::new(&store);
    app.show_load_report(&report);

    // Setup terminal
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let result = run_app(&mut terminal, &mut app, &mut store);

    // Restore terminal
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    result
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    store: &mut ContactStore,
) -> Result<()> {
    loop {
        app.check_status_timeout();

        terminal.draw(|frame| ui::draw(frame, app))?;

        // Short timeout keeps the error-field blink moving
        if !event::poll(Duration::from_millis(50))? {
            continue;
        }

        let Event::Key(key) = event::read()? else {
            continue;
        };

        // Only handle key press events (not release)
        if key.kind != KeyEventKind::Press {
            continue;
        }

        // If help is showing, any key dismisses it
        if app.show_help {
            app.show_help = false;
            continue;
        }

        match app.input_mode {
            InputMode::Normal => handle_normal_mode(app, store, key.code, key.modifiers),
            InputMode::Form => handle_form_mode(app, store, key.code),
            InputMode::Search => handle_search_mode(app, store, key.code),
            InputMode::Confirm(_) => {
                let yes = matches!(key.code, KeyCode::Char('y') | KeyCode::Char('Y'));
                app.answer_confirm(store, yes);
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_normal_mode(
    app: &mut App,
    store: &mut ContactStore,
    code: KeyCode,
    modifiers: KeyModifiers,
) {
    match code {
        // Quit
        KeyCode::Char('q') => {
            app.should_quit = true;
        }
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true;
        }

        KeyCode::Char('k') | KeyCode::Up => app.move_up(),
        KeyCode::Char('j') | KeyCode::Down => app.move_down(),

        KeyCode::Char('a') => app.start_add(),
        KeyCode::Char('e') | KeyCode::Enter => app.start_edit(),
        KeyCode::Char('d') => app.request_delete(),
        KeyCode::Char('R') => app.request_clear_all(),
        KeyCode::Char('/') => app.start_search(),
        KeyCode::Char('v') => app.view_all(store),
        KeyCode::Char('c') => app.clear_fields(),
        KeyCode::Char('r') => app.reload(store),

        KeyCode::Char(c @ '1'..='3') => {
            let index = c as usize - '1' as usize;
            app.sort(store, SortKey::ALL[index]);
        }

        KeyCode::Char('?') => app.toggle_help(),

        _ => {}
    }
}

fn handle_form_mode(app: &mut App, store: &mut ContactStore, code: KeyCode) {
    match code {
        KeyCode::Esc => app.cancel_form(),
        KeyCode::Enter => app.submit_form(store),
        KeyCode::Tab | KeyCode::Down => app.next_field(),
        KeyCode::BackTab | KeyCode::Up => app.prev_field(),
        KeyCode::Backspace => app.delete_char(),
        KeyCode::Char(c) => app.insert_char(c),
        _ => {}
    }
}

fn handle_search_mode(app: &mut App, store: &ContactStore, code: KeyCode) {
    match code {
        KeyCode::Esc => app.cancel_search(),
        KeyCode::Enter => app.submit_search(store),
        KeyCode::Backspace => {
            app.search_input.pop();
        }
        KeyCode::Char(c) => app.search_input.push(c),
        _ => {}
    }
}

/// Initialize file-based logging for TUI mode
///
/// Only logs if ROLODEX_LOG is set. Logs go to the configured log file so
/// they don't corrupt the terminal.
fn init_tui_logging(config: &Config) {
    let Ok(log_level) = std::env::var("ROLODEX_LOG") else {
        return;
    };

    let log_path = config.log_path();

    let log_file = match File::create(&log_path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Warning: Could not create log file {:?}: {}", log_path, e);
            return;
        }
    };

    let env_filter = EnvFilter::new(format!(
        "rolodex_core={},rolodex_cli={}",
        log_level, log_level
    ));

    // Ignore error if already initialized
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(log_file)
        .try_init();

    info!("TUI logging initialized to {:?}", log_path);
}
