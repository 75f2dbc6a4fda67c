use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::store::StoreError;
use crate::tui::app::{App, Mode};

use super::*;

pub(super) fn handle_edit(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        // Cancel: Esc discards the draft, the stored text stands
        (_, KeyCode::Esc) => {
            app.edit = None;
            app.mode = Mode::Navigate;
        }

        // Commit: Enter
        (KeyModifiers::NONE, KeyCode::Enter) => {
            submit_edit(app);
        }

        _ => {
            if let Some(edit) = &mut app.edit {
                handle_line_key(&mut edit.input, key);
            }
        }
    }
}

fn submit_edit(app: &mut App) {
    let (id, text) = match &app.edit {
        Some(edit) => (edit.id, edit.input.text().to_string()),
        None => return,
    };

    match app.store.update(id, &text) {
        Ok(()) => {
            app.edit = None;
            app.mode = Mode::Navigate;
            app.set_info("Task updated!");
        }
        Err(StoreError::TextTooShort) => {
            // Keep the draft so the user can fix it
            app.set_error("Todo must be at least 2 characters.");
        }
        Err(StoreError::NotFound(_)) => {
            // Another instance deleted the task under us
            app.edit = None;
            app.mode = Mode::Navigate;
        }
    }
}
