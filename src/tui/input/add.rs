use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::{AddField, App, Mode};

use super::*;

/// Accepted by the due date field.
const DUE_DATE_FORMAT: &str = "%Y-%m-%d";

pub(super) fn handle_add(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        // Cancel: Esc discards the draft
        (_, KeyCode::Esc) => {
            app.add_form = None;
            app.mode = Mode::Navigate;
        }

        // Submit: Enter from any field
        (KeyModifiers::NONE, KeyCode::Enter) => {
            submit_add(app);
        }

        // Cycle field focus: Tab / Down forward, Shift+Tab / Up backward
        (KeyModifiers::NONE, KeyCode::Tab | KeyCode::Down) => {
            if let Some(form) = &mut app.add_form {
                form.focus = form.focus.next();
            }
        }
        (_, KeyCode::BackTab) | (KeyModifiers::NONE, KeyCode::Up) => {
            if let Some(form) = &mut app.add_form {
                form.focus = form.focus.prev();
            }
        }

        _ => {
            let Some(form) = &mut app.add_form else {
                return;
            };
            match form.focus {
                AddField::Text => {
                    handle_line_key(&mut form.text, key);
                }
                AddField::DueDate => {
                    handle_line_key(&mut form.due_date, key);
                }
                AddField::Priority => {
                    // Space cycles low → medium → high
                    if key.code == KeyCode::Char(' ') {
                        form.priority = form.priority.cycled();
                    }
                }
            }
        }
    }
}

fn submit_add(app: &mut App) {
    let (text, due_raw, priority) = match &app.add_form {
        Some(form) => (
            form.text.text().to_string(),
            form.due_date.text().trim().to_string(),
            form.priority,
        ),
        None => return,
    };

    let due_date = if due_raw.is_empty() {
        None
    } else {
        match NaiveDate::parse_from_str(&due_raw, DUE_DATE_FORMAT) {
            Ok(d) => Some(d),
            Err(_) => {
                app.set_error("Due date must be YYYY-MM-DD.");
                return;
            }
        }
    };

    match app.store.add(&text, priority, due_date) {
        Ok(()) => {
            app.add_form = None;
            app.mode = Mode::Navigate;
            // New tasks land at the top of the list
            app.cursor = 0;
            app.set_info("Task added successfully!");
        }
        Err(_) => {
            app.set_error("Todo must be at least 2 characters.");
        }
    }
}
