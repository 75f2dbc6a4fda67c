mod add;
mod common;
mod confirm;
mod edit;
pub mod line;
mod navigate;

use crossterm::event::{KeyCode, KeyEvent};

use super::app::{App, Mode};

// Handler modules share one namespace; they reach each other
// through `use super::*;`
#[allow(unused_imports)]
use add::*;
#[allow(unused_imports)]
use common::*;
#[allow(unused_imports)]
use confirm::*;
#[allow(unused_imports)]
use edit::*;
#[allow(unused_imports)]
use navigate::*;

/// Route one key event to the active mode's handler.
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // A modifier on its own (Shift, Ctrl, Alt) is not input
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }

    // Any keypress dismisses the transient status message
    app.status_message = None;

    let key = normalize_key(key);
    match app.mode {
        Mode::Navigate => handle_navigate(app, key),
        Mode::Add => handle_add(app, key),
        Mode::Edit => handle_edit(app, key),
        Mode::Confirm => handle_confirm(app, key),
    }
}
