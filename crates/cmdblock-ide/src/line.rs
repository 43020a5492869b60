//! A single editable line.

use crate::measure::str_width;

/// One line of the buffer: its text, its caret and its line-number prefix.
///
/// Offsets are in chars. The cursor is always within `0..=char_len`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    text: String,
    cursor: usize,
    number: usize,
    prefix: String,
}

impl Line {
    /// Create a line with the cursor at column 0.
    pub fn new(text: impl Into<String>) -> Self {
        let mut line = Self {
            text: text.into(),
            cursor: 0,
            number: 1,
            prefix: String::new(),
        };
        line.renumber(1, 1);
        line
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Length in chars.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// 1-based display number.
    pub fn number(&self) -> usize {
        self.number
    }

    /// Line-number prefix, e.g. `" 7 -"` padded to the widest number in the buffer.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Width of [`Line::prefix`] in cells.
    pub fn prefix_width(&self) -> usize {
        str_width(&self.prefix)
    }

    /// Move the cursor, clamped to the line.
    pub fn set_cursor(&mut self, cursor: usize) {
        self.cursor = cursor.min(self.char_len());
    }

    pub fn cursor_to_end(&mut self) {
        self.cursor = self.char_len();
    }

    /// Replace the text, keeping the cursor in range.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.set_cursor(self.cursor);
    }

    /// Text before the cursor.
    pub fn head(&self) -> &str {
        &self.text[..self.byte_index(self.cursor)]
    }

    /// Text from the cursor on.
    pub fn tail(&self) -> &str {
        &self.text[self.byte_index(self.cursor)..]
    }

    /// Char right before the cursor.
    pub fn char_before_cursor(&self) -> Option<char> {
        self.head().chars().next_back()
    }

    /// Char under the cursor.
    pub fn char_at_cursor(&self) -> Option<char> {
        self.tail().chars().next()
    }

    /// Insert `text` at the cursor and move the cursor past it.
    pub fn insert_str(&mut self, text: &str) {
        let at = self.byte_index(self.cursor);
        self.text.insert_str(at, text);
        self.cursor += text.chars().count();
    }

    /// Delete the char before the cursor. Returns `false` at column 0.
    pub fn delete_before(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        let at = self.byte_index(self.cursor);
        self.text.remove(at);
        true
    }

    /// Delete the char under the cursor. Returns `false` at the end of the line.
    pub fn delete_after(&mut self) -> bool {
        if self.cursor >= self.char_len() {
            return false;
        }
        let at = self.byte_index(self.cursor);
        self.text.remove(at);
        true
    }

    /// Cut everything from the cursor on and return it.
    pub fn split_off(&mut self) -> String {
        let at = self.byte_index(self.cursor);
        self.text.split_off(at)
    }

    /// Append `text` at the end; the cursor does not move.
    pub fn push_str(&mut self, text: &str) {
        self.text.push_str(text);
    }

    /// Update the display number and rebuild the prefix for a buffer of `total` lines.
    pub(crate) fn renumber(&mut self, number: usize, total: usize) {
        let digits = total.max(1).to_string().len();
        self.number = number;
        self.prefix = format!("{number:<digits$} -");
    }

    fn byte_index(&self, column: usize) -> usize {
        self.text
            .char_indices()
            .nth(column)
            .map_or(self.text.len(), |(index, _)| index)
    }
}
