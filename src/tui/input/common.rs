use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::line::LineEdit;

/// Shifted variant of a US-layout base key, if it has one.
pub(super) fn shift_symbol(c: char) -> Option<char> {
    match c {
        '`' => Some('~'),
        '1' => Some('!'),
        '2' => Some('@'),
        '3' => Some('#'),
        '4' => Some('$'),
        '5' => Some('%'),
        '6' => Some('^'),
        '7' => Some('&'),
        '8' => Some('*'),
        '9' => Some('('),
        '0' => Some(')'),
        '-' => Some('_'),
        '=' => Some('+'),
        '[' => Some('{'),
        ']' => Some('}'),
        '\\' => Some('|'),
        ';' => Some(':'),
        '\'' => Some('"'),
        ',' => Some('<'),
        '.' => Some('>'),
        '/' => Some('?'),
        _ => None,
    }
}

/// Fold kitty-protocol key events into their classic form.
///
/// Terminals speaking the kitty protocol report Shift+p as lowercase `p`
/// with SHIFT set, and Shift+. as `.` with SHIFT set, where classic
/// terminals deliver `P` and `>` directly. Letters are uppercased with
/// SHIFT kept; symbols are swapped for their shifted form with SHIFT
/// dropped, so mode handlers only ever match the classic shape. Events
/// already in classic form pass through unchanged.
pub(super) fn normalize_key(mut key: KeyEvent) -> KeyEvent {
    if let KeyCode::Char(c) = key.code
        && key.modifiers.contains(KeyModifiers::SHIFT)
    {
        if c.is_ascii_lowercase() {
            key.code = KeyCode::Char(c.to_ascii_uppercase());
        } else if let Some(shifted) = shift_symbol(c) {
            key.code = KeyCode::Char(shifted);
            key.modifiers.remove(KeyModifiers::SHIFT);
        }
    }
    key
}

/// Single-line editing keys shared by the add form and inline edit.
/// Returns true if the key was consumed.
pub(super) fn handle_line_key(line: &mut LineEdit, key: KeyEvent) -> bool {
    match (key.modifiers, key.code) {
        // Line shortcuts: Ctrl+A/E home/end, Ctrl+U clear, Ctrl+W delete word
        (m, KeyCode::Char('a')) if m.contains(KeyModifiers::CONTROL) => {
            line.move_home();
            true
        }
        (m, KeyCode::Char('e')) if m.contains(KeyModifiers::CONTROL) => {
            line.move_end();
            true
        }
        (m, KeyCode::Char('u')) if m.contains(KeyModifiers::CONTROL) => {
            line.clear();
            true
        }
        (m, KeyCode::Char('w')) if m.contains(KeyModifiers::CONTROL) => {
            line.delete_word_left();
            true
        }

        // Word movement: Ctrl/Alt + arrows
        (m, KeyCode::Left) if m.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
            line.move_word_left();
            true
        }
        (m, KeyCode::Right) if m.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
            line.move_word_right();
            true
        }

        // Word delete: Ctrl/Alt + Backspace
        (m, KeyCode::Backspace) if m.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
            line.delete_word_left();
            true
        }

        (KeyModifiers::NONE, KeyCode::Left) => {
            line.move_left();
            true
        }
        (KeyModifiers::NONE, KeyCode::Right) => {
            line.move_right();
            true
        }
        (KeyModifiers::NONE, KeyCode::Home) => {
            line.move_home();
            true
        }
        (KeyModifiers::NONE, KeyCode::End) => {
            line.move_end();
            true
        }
        (_, KeyCode::Backspace) => {
            line.backspace();
            true
        }
        (KeyModifiers::NONE, KeyCode::Delete) => {
            line.delete();
            true
        }

        // Text input (SHIFT covers uppercase and symbols)
        (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char(c)) => {
            line.insert(c);
            true
        }

        _ => false,
    }
}
