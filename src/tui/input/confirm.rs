use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use uuid::Uuid;

use crate::tui::app::{App, ConfirmAction, Mode};

pub(super) fn handle_confirm(app: &mut App, key: KeyEvent) {
    let state = app.confirm.take();
    app.mode = Mode::Navigate;

    match (key.modifiers, key.code) {
        // Confirm: y. Anything else aborts silently.
        (KeyModifiers::NONE, KeyCode::Char('y')) => {
            if let Some(state) = state {
                match state.action {
                    ConfirmAction::DeleteTask { id } => confirm_delete_task(app, id),
                }
            }
        }
        _ => {}
    }
}

pub(super) fn confirm_delete_task(app: &mut App, id: Uuid) {
    if app.store.remove(id).is_ok() {
        app.set_info("Task deleted!");
    }
    app.clamp_cursor();
}
