use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::{AddForm, App, ConfirmAction, ConfirmState, EditState, Mode};

use super::line::LineEdit;

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        // Quit: q
        (KeyModifiers::NONE, KeyCode::Char('q')) => {
            app.should_quit = true;
        }

        // Move down: j / Down
        (KeyModifiers::NONE, KeyCode::Char('j') | KeyCode::Down) => {
            if app.cursor + 1 < app.visible_len() {
                app.cursor += 1;
            }
        }

        // Move up: k / Up
        (KeyModifiers::NONE, KeyCode::Char('k') | KeyCode::Up) => {
            app.cursor = app.cursor.saturating_sub(1);
        }

        // Open the add form: a
        (KeyModifiers::NONE, KeyCode::Char('a')) => {
            app.add_form = Some(AddForm::default());
            app.mode = Mode::Add;
        }

        // Edit the task under the cursor: e
        (KeyModifiers::NONE, KeyCode::Char('e')) => {
            start_edit(app);
        }

        // Toggle completion: Space
        (KeyModifiers::NONE, KeyCode::Char(' ')) => {
            if let Some(id) = app.cursor_task_id() {
                let _ = app.store.toggle_complete(id);
                app.clamp_cursor();
            }
        }

        // Delete the task under the cursor, after confirmation: d
        (KeyModifiers::NONE, KeyCode::Char('d')) => {
            if let Some(id) = app.cursor_task_id() {
                app.confirm = Some(ConfirmState {
                    action: ConfirmAction::DeleteTask { id },
                    message: "Delete this task? (y/n)".to_string(),
                });
                app.mode = Mode::Confirm;
            }
        }

        // Toggle showing finished tasks: f
        (KeyModifiers::NONE, KeyCode::Char('f')) => {
            let show = !app.store.show_finished();
            app.store.set_show_finished(show);
            app.clamp_cursor();
        }

        _ => {}
    }
}

/// Enter Edit mode for the task under the cursor, seeding the draft with
/// its current text.
pub(super) fn start_edit(app: &mut App) {
    let Some(id) = app.cursor_task_id() else {
        return;
    };
    let Some(task) = app.store.tasks().iter().find(|t| t.id == id) else {
        return;
    };
    app.edit = Some(EditState {
        id,
        input: LineEdit::with_text(&task.text),
    });
    app.mode = Mode::Edit;
}
