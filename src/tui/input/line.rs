use crate::util::unicode::{
    next_grapheme_boundary, prev_grapheme_boundary, word_boundary_left, word_boundary_right,
};

/// A single-line edit buffer with a grapheme-aware cursor.
///
/// The cursor is a byte offset into the buffer, always on a grapheme
/// boundary. Control characters are rejected on insert; task text and
/// date drafts stay single-line.
#[derive(Debug, Clone, Default)]
pub struct LineEdit {
    buffer: String,
    cursor: usize,
}

impl LineEdit {
    pub fn new() -> LineEdit {
        LineEdit::default()
    }

    /// An editor pre-filled with `text`, cursor at the end.
    pub fn with_text(text: &str) -> LineEdit {
        LineEdit {
            cursor: text.len(),
            buffer: text.to_string(),
        }
    }

    pub fn text(&self) -> &str {
        &self.buffer
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Buffer split at the cursor, for rendering a block cursor between.
    pub fn split_at_cursor(&self) -> (&str, &str) {
        self.buffer.split_at(self.cursor)
    }

    pub fn insert(&mut self, c: char) {
        if c.is_control() {
            return;
        }
        self.buffer.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    /// Delete the grapheme before the cursor.
    pub fn backspace(&mut self) {
        if let Some(prev) = prev_grapheme_boundary(&self.buffer, self.cursor) {
            self.buffer.drain(prev..self.cursor);
            self.cursor = prev;
        }
    }

    /// Delete the grapheme at the cursor.
    pub fn delete(&mut self) {
        if self.cursor >= self.buffer.len() {
            return;
        }
        let end = next_grapheme_boundary(&self.buffer, self.cursor).unwrap_or(self.buffer.len());
        self.buffer.drain(self.cursor..end);
    }

    /// Delete from the word boundary left of the cursor to the cursor.
    pub fn delete_word_left(&mut self) {
        let start = word_boundary_left(&self.buffer, self.cursor);
        self.buffer.drain(start..self.cursor);
        self.cursor = start;
    }

    pub fn move_left(&mut self) {
        if let Some(prev) = prev_grapheme_boundary(&self.buffer, self.cursor) {
            self.cursor = prev;
        }
    }

    pub fn move_right(&mut self) {
        if let Some(next) = next_grapheme_boundary(&self.buffer, self.cursor) {
            self.cursor = next;
        }
    }

    pub fn move_word_left(&mut self) {
        self.cursor = word_boundary_left(&self.buffer, self.cursor);
    }

    pub fn move_word_right(&mut self) {
        self.cursor = word_boundary_right(&self.buffer, self.cursor);
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.buffer.len();
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
    }
}
