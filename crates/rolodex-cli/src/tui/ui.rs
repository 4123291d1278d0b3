//! UI rendering

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};
use rolodex_core::Field;

use super::app::{App, InputMode, PendingAction};

/// Background of a field rejected by the last submit
const BLINK_COLOR: Color = Color::Rgb(0xFF, 0xCC, 0xCC);

/// Main UI rendering function
pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(frame.area());

    draw_form(frame, app, chunks[0]);
    draw_contact_list(frame, app, chunks[1]);

    match &app.input_mode {
        InputMode::Search => draw_search_input(frame, app, chunks[2]),
        _ => draw_status_bar(frame, app, chunks[2]),
    }

    if let InputMode::Confirm(action) = &app.input_mode {
        draw_confirm_popup(frame, action);
    }

    // Draw help overlay if visible
    if app.show_help {
        draw_help_overlay(frame);
    }
}

/// Draw the name/phone/email form
fn draw_form(frame: &mut Frame, app: &App, area: Rect) {
    let in_form = app.input_mode == InputMode::Form;

    let title = match (&app.editing, in_form) {
        (Some(_), _) => " Edit Contact ",
        (None, true) => " Add Contact ",
        (None, false) => " Contact ",
    };

    let border_style = if in_form {
        Style::default().add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner);

    for (row, (field, label)) in [
        (Field::Name, "Name:  "),
        (Field::Phone, "Phone: "),
        (Field::Email, "Email: "),
    ]
    .into_iter()
    .enumerate()
    {
        let focused = in_form && app.focus == field;
        let mut value_style = Style::default();
        if app.is_field_highlighted(field) {
            value_style = value_style.bg(BLINK_COLOR).fg(Color::Black);
        } else if focused {
            value_style = value_style.add_modifier(Modifier::UNDERLINED);
        }

        let line = Line::from(vec![
            Span::styled(label, Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(app.form.value(field), value_style),
        ]);
        frame.render_widget(Paragraph::new(line), rows[row]);

        if focused {
            let cursor_x = cursor_column(rows[row], label.chars().count(), app.form.value(field));
            frame.set_cursor_position((cursor_x, rows[row].y));
        }
    }
}

/// Draw the contact list
fn draw_contact_list(frame: &mut Frame, app: &App, area: Rect) {
    let is_active = app.input_mode == InputMode::Normal;

    let block = Block::default()
        .title(format!(" Contacts ({}) ", app.contacts.len()))
        .borders(Borders::ALL)
        .border_style(if is_active {
            Style::default().add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        });

    if app.contacts.is_empty() {
        let paragraph = Paragraph::new(Span::styled(
            "No contacts to display.",
            Style::default().add_modifier(Modifier::DIM),
        ))
        .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let items: Vec<ListItem> = app
        .contacts
        .iter()
        .map(|contact| {
            let mut spans = vec![Span::raw(contact.label())];
            if contact.has_email() {
                spans.push(Span::styled(
                    format!("  {}", contact.email),
                    Style::default().add_modifier(Modifier::DIM),
                ));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));

    let mut state = ListState::default();
    state.select(Some(app.selected));

    frame.render_stateful_widget(list, area, &mut state);
}

/// Draw the status bar at the bottom
fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let (content, style) = if let Some(msg) = &app.status_message {
        let color = if app.status_is_error {
            Color::Red
        } else {
            Color::Blue
        };
        (msg.clone(), Style::default().fg(color))
    } else if app.input_mode == InputMode::Form {
        (
            "Tab:next field  Enter:save  Esc:cancel".to_string(),
            Style::default().add_modifier(Modifier::DIM),
        )
    } else {
        (
            "a:add  e:edit  d:del  /:search  v:all  1-3:sort  R:reset  ?:help  q:quit".to_string(),
            Style::default().add_modifier(Modifier::DIM),
        )
    };

    frame.render_widget(Paragraph::new(content).style(style), area);
}

/// Draw search input at the bottom
fn draw_search_input(frame: &mut Frame, app: &App, area: Rect) {
    let prefix = "/";
    let line = Line::from(vec![
        Span::styled(prefix, Style::default().fg(Color::Cyan)),
        Span::raw(app.search_input.as_str()),
        Span::styled(
            "  (name, phone or email)",
            Style::default().add_modifier(Modifier::DIM),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);

    let cursor_x = cursor_column(area, prefix.len(), &app.search_input);
    frame.set_cursor_position((cursor_x, area.y));
}

/// Draw the yes/no dialog for a destructive action
fn draw_confirm_popup(frame: &mut Frame, action: &PendingAction) {
    let (title, mut lines) = match action {
        PendingAction::Delete(contact) => (
            " Delete Contact ",
            vec![
                Line::from("Are you sure you want to delete:"),
                Line::from(format!("Name: {}", contact.name)),
                Line::from(format!("Phone: {}", contact.phone)),
            ],
        ),
        PendingAction::ClearAll => (
            " Reset All Contacts ",
            vec![
                Line::from("Are you absolutely sure you want to delete ALL contacts?"),
                Line::from("This action cannot be undone."),
            ],
        ),
    };
    lines.push(Line::from(""));
    lines.push(Line::from(vec![Span::styled(
        "[y] Yes   [any other key] No",
        Style::default().add_modifier(Modifier::DIM),
    )]));

    let area = centered(frame.area(), 60, lines.len() as u16 + 2);
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD));
    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

/// Draw help overlay
fn draw_help_overlay(frame: &mut Frame) {
    let help_text = vec![
        Line::from(vec![Span::styled(
            "Keyboard Shortcuts",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from(""),
        Line::from("Navigation:"),
        Line::from("  j/k, ↑/↓    Move up/down"),
        Line::from("  Enter       Edit selected contact"),
        Line::from(""),
        Line::from("Commands:"),
        Line::from("  a           Add contact"),
        Line::from("  e           Edit contact"),
        Line::from("  d           Delete contact"),
        Line::from("  R           Reset all contacts"),
        Line::from("  /           Search"),
        Line::from("  v           View all"),
        Line::from("  1 / 2 / 3   Sort by name / phone / email"),
        Line::from("  c           Clear fields"),
        Line::from("  r           Reload from disk"),
        Line::from("  q           Quit"),
        Line::from(""),
        Line::from("Form:"),
        Line::from("  Tab         Next field"),
        Line::from("  Enter       Save   Esc  Cancel"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let popup_area = centered(frame.area(), 50, help_text.len() as u16 + 2);

    // Clear the popup area
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(Style::default().add_modifier(Modifier::BOLD));

    frame.render_widget(Paragraph::new(help_text).block(block), popup_area);
}

/// Column just after `text` typed behind a `prefix_len` label, kept inside `area`
fn cursor_column(area: Rect, prefix_len: usize, text: &str) -> u16 {
    let offset = prefix_len.saturating_add(text.chars().count());
    let offset = u16::try_from(offset).unwrap_or(u16::MAX);
    let last = area.x.saturating_add(area.width.saturating_sub(1));
    area.x.saturating_add(offset).min(last)
}

/// Rect of at most `width` x `height` centered in `area`
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height.saturating_sub(4));
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_fits_inside() {
        let area = Rect::new(0, 0, 100, 40);
        let popup = centered(area, 50, 10);
        assert_eq!(popup, Rect::new(25, 15, 50, 10));
    }

    #[test]
    fn test_centered_shrinks_on_small_terminal() {
        let area = Rect::new(0, 0, 20, 8);
        let popup = centered(area, 50, 10);
        assert_eq!(popup.width, 16);
        assert_eq!(popup.height, 4);
    }

    #[test]
    fn test_cursor_column_follows_text() {
        let area = Rect::new(2, 0, 40, 1);
        assert_eq!(cursor_column(area, 7, "Bob"), 12);
        assert_eq!(cursor_column(area, 1, "ünï"), 6);
    }

    #[test]
    fn test_cursor_column_clamped_to_area() {
        let area = Rect::new(2, 0, 40, 1);
        let long = "9".repeat(70_000);
        assert_eq!(cursor_column(area, 7, &long), 41);
    }
}
