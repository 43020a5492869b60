//! Line buffer: the ordered lines, the focused line and the viewport over them.
//!
//! All positions are in chars; the viewport width is in terminal cells. Out-of-range requests
//! are no-ops or get clamped, nothing here fails.

use crate::line::Line;
use crate::measure::{column_at_cell, span_width};
use cmdblock_ide_format::{FormatPolicy, make_inline};
use cmdblock_ide_syntax::ScopeKind;
use std::ops::Range;

/// Ordered, editable lines plus a vertical and horizontal viewport.
#[derive(Debug, Clone)]
pub struct LineBuffer {
    lines: Vec<Line>,
    focused: Option<usize>,
    scroll_top: usize,
    max_lines: usize,
    width: usize,
    /// First visible char, shared by every line so columns stay aligned.
    h_scroll: usize,
}

impl LineBuffer {
    /// Create a buffer over `text` with a `width` x `height` cell viewport, focused on line 0.
    pub fn new(text: &str, width: usize, height: usize) -> Self {
        let mut buffer = Self {
            lines: vec![Line::new("")],
            focused: None,
            scroll_top: 0,
            max_lines: height.max(1),
            width,
            h_scroll: 0,
        };
        buffer.set_text(text);
        buffer.focus(0);
        buffer
    }

    /// Replace every line with the `\n`-separated segments of `text`.
    ///
    /// A single trailing empty segment is dropped, so `"a\n"` gives one line. Empty text gives one
    /// empty line.
    pub fn set_text(&mut self, text: &str) {
        let mut segments: Vec<&str> = text.split('\n').collect();
        if segments.len() > 1 && segments.last() == Some(&"") {
            segments.pop();
        }

        self.lines = segments.into_iter().map(Line::new).collect();
        self.focused = self.focused.map(|line| line.min(self.lines.len() - 1));
        self.reflow();
    }

    /// Insert a line at `position` (`0..=line_count`). Returns `false` when out of range.
    pub fn insert_line(&mut self, text: &str, position: usize) -> bool {
        if position > self.lines.len() {
            return false;
        }

        self.lines.insert(position, Line::new(text));
        if let Some(focused) = self.focused
            && focused >= position
        {
            self.focused = Some(focused + 1);
        }
        self.reflow();
        true
    }

    /// Remove the line at `position`. The last remaining line is never removed.
    pub fn remove_line(&mut self, position: usize) -> bool {
        if position >= self.lines.len() || self.lines.len() == 1 {
            return false;
        }

        self.lines.remove(position);
        if let Some(focused) = self.focused
            && focused > position
        {
            self.focused = Some(focused - 1);
        }
        self.focused = self.focused.map(|line| line.min(self.lines.len() - 1));
        self.reflow();
        true
    }

    /// All lines joined with `\n` (no trailing newline).
    pub fn text(&self) -> String {
        let mut out = String::new();
        for (index, line) in self.lines.iter().enumerate() {
            if index > 0 {
                out.push('\n');
            }
            out.push_str(line.text());
        }
        out
    }

    /// [`LineBuffer::text`], optionally collapsed to one line with `policy`.
    pub fn joined_text(&self, as_inline: bool, policy: &FormatPolicy) -> String {
        let text = self.text();
        if as_inline {
            make_inline(&text, policy)
        } else {
            text
        }
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn line(&self, index: usize) -> Option<&Line> {
        self.lines.get(index)
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Index of the focused line, if any.
    pub fn focused(&self) -> Option<usize> {
        self.focused
    }

    pub fn focused_line(&self) -> Option<&Line> {
        self.focused.and_then(|index| self.lines.get(index))
    }

    /// `(line, column)` of the caret on the focused line.
    pub fn cursor(&self) -> Option<(usize, usize)> {
        let index = self.focused?;
        Some((index, self.lines[index].cursor()))
    }

    /// Resize the viewport (in cells).
    pub fn set_viewport(&mut self, width: usize, height: usize) {
        self.width = width;
        self.max_lines = height.max(1);
        self.reflow();
    }

    /// First visible line.
    pub fn scroll_top(&self) -> usize {
        self.scroll_top
    }

    /// How many lines fit in the viewport.
    pub fn max_lines(&self) -> usize {
        self.max_lines
    }

    /// Indices of the lines currently on screen.
    pub fn visible_lines(&self) -> Range<usize> {
        let end = (self.scroll_top + self.max_lines).min(self.lines.len());
        self.scroll_top..end
    }

    /// Move the window by `delta` lines (positive scrolls toward the end).
    pub fn scroll_by(&mut self, delta: isize) {
        let last = self.lines.len() - 1;
        self.scroll_top = self.scroll_top.saturating_add_signed(delta).min(last);
    }

    /// First visible char of every line.
    pub fn h_scroll(&self) -> usize {
        self.h_scroll
    }

    /// Cells taken by the line-number prefix plus one separating space.
    pub fn gutter_width(&self) -> usize {
        self.lines.first().map_or(0, Line::prefix_width) + 1
    }

    /// Cells left for text once the gutter is drawn (at least one).
    pub fn text_area_width(&self) -> usize {
        self.width.saturating_sub(self.gutter_width()).max(1)
    }

    /// Char range of `line` that fits in the text area.
    pub fn visible_columns(&self, line: usize) -> Range<usize> {
        let Some(line) = self.lines.get(line) else {
            return 0..0;
        };
        let start = self.h_scroll;
        start..column_at_cell(line.text(), start, self.text_area_width())
    }

    /// Cell column of the caret inside the text area, when it is on screen.
    pub fn cursor_cell(&self) -> Option<usize> {
        let (index, column) = self.cursor()?;
        if !self.visible_lines().contains(&index) || column < self.h_scroll {
            return None;
        }
        Some(span_width(self.lines[index].text(), self.h_scroll, column))
    }

    /// Focus `line`, scrolling it into view. Out-of-range indices are ignored.
    pub fn focus(&mut self, line: usize) -> bool {
        if line >= self.lines.len() {
            return false;
        }
        self.focused = Some(line);
        self.scroll_into_view();
        self.follow_cursor();
        true
    }

    /// Drop the focus; edits are ignored until a line is focused again.
    pub fn unfocus(&mut self) {
        self.focused = None;
    }

    /// Focus `line` and put its caret at `column` (clamped).
    pub fn jump_to(&mut self, line: usize, column: usize) {
        if let Some(target) = self.lines.get_mut(line) {
            target.set_cursor(column);
            self.focus(line);
        }
    }

    pub fn move_left(&mut self) {
        let Some((line, column)) = self.cursor() else {
            return;
        };
        if column > 0 {
            self.jump_to(line, column - 1);
        } else if line > 0 {
            self.jump_to(line - 1, usize::MAX);
        }
    }

    pub fn move_right(&mut self) {
        let Some((line, column)) = self.cursor() else {
            return;
        };
        if column < self.lines[line].char_len() {
            self.jump_to(line, column + 1);
        } else if line + 1 < self.lines.len() {
            self.jump_to(line + 1, 0);
        }
    }

    pub fn move_up(&mut self) {
        if let Some((line, column)) = self.cursor()
            && line > 0
        {
            self.jump_to(line - 1, column);
        }
    }

    pub fn move_down(&mut self) {
        if let Some((line, column)) = self.cursor()
            && line + 1 < self.lines.len()
        {
            self.jump_to(line + 1, column);
        }
    }

    pub fn move_home(&mut self) {
        if let Some((line, _)) = self.cursor() {
            self.jump_to(line, 0);
        }
    }

    pub fn move_end(&mut self) {
        if let Some((line, _)) = self.cursor() {
            self.jump_to(line, usize::MAX);
        }
    }

    /// Focus the char under viewport cell `(row, column)`.
    ///
    /// Rows below the last line focus the end of the last line; columns inside the gutter map
    /// to the first visible char.
    pub fn click(&mut self, row: usize, column: usize) {
        let line = self.scroll_top + row;
        if line >= self.lines.len() {
            self.jump_to(self.lines.len() - 1, usize::MAX);
            return;
        }

        let cell = column.saturating_sub(self.gutter_width());
        let column = column_at_cell(self.lines[line].text(), self.h_scroll, cell);
        self.jump_to(line, column);
    }

    /// Type `ch` at the caret. With `auto_close`, `[` and `{` also get their closer after the caret.
    pub fn insert_char(&mut self, ch: char, auto_close: bool) -> bool {
        let Some(index) = self.focused else {
            return false;
        };

        let line = &mut self.lines[index];
        line.insert_str(ch.encode_utf8(&mut [0; 4]));
        if auto_close && let Some(kind) = ScopeKind::from_open(ch) {
            line.insert_str(kind.closer().encode_utf8(&mut [0; 4]));
            line.set_cursor(line.cursor() - 1);
        }
        self.follow_cursor();
        true
    }

    /// Insert `width` spaces at the caret.
    pub fn insert_tab(&mut self, width: usize) -> bool {
        let Some(index) = self.focused else {
            return false;
        };
        if width == 0 {
            return false;
        }

        self.lines[index].insert_str(&" ".repeat(width));
        self.follow_cursor();
        true
    }

    /// Split the focused line at the caret (Enter).
    ///
    /// The carried text loses its leading whitespace and is indented to the bracket depth at the
    /// split point, one level less when it starts with a closer. Between an empty `[]` or `{}`
    /// pair the scope is opened over three lines instead, and the caret lands after the middle
    /// line's indentation rather than at column 0.
    pub fn split_line(&mut self, tab_width: usize) -> bool {
        let Some(index) = self.focused else {
            return false;
        };

        let line = &self.lines[index];
        if let (Some(open), Some(close)) = (line.char_before_cursor(), line.char_at_cursor())
            && ScopeKind::from_open(open).is_some_and(|kind| kind.closer() == close)
        {
            return self.split_scope(index, open, tab_width);
        }

        let tail = self.lines[index].split_off();
        let carried = tail.trim_start();
        let mut depth = self.depth_before(index, self.lines[index].text());
        if carried.starts_with([']', '}']) {
            depth = depth.saturating_sub(1);
        }

        let indent = " ".repeat(tab_width * depth);
        let column = indent.chars().count();
        self.lines.insert(index + 1, Line::new(format!("{indent}{carried}")));
        self.reflow();
        self.jump_to(index + 1, column);
        true
    }

    fn split_scope(&mut self, index: usize, open: char, tab_width: usize) -> bool {
        let head = self.lines[index].head();
        let before_opener = &head[..head.len() - open.len_utf8()];
        let depth = self.depth_before(index, before_opener);

        let closer = self.lines[index].split_off();
        let middle = " ".repeat(tab_width * (depth + 1));
        let column = middle.chars().count();
        let closing = format!("{}{closer}", " ".repeat(tab_width * depth));

        self.lines.insert(index + 1, Line::new(middle));
        self.lines.insert(index + 2, Line::new(closing));
        self.reflow();
        self.jump_to(index + 1, column);
        true
    }

    /// Delete before the caret (Backspace). At column 0 the line is merged into the previous one.
    pub fn backspace(&mut self) -> bool {
        let Some((index, column)) = self.cursor() else {
            return false;
        };

        if column > 0 {
            self.lines[index].delete_before();
            self.follow_cursor();
            return true;
        }
        if index == 0 {
            return false;
        }

        let removed = self.lines.remove(index);
        let previous = &mut self.lines[index - 1];
        let join = previous.char_len();
        previous.push_str(removed.text());
        previous.set_cursor(join);
        self.focused = Some(index - 1);
        self.reflow();
        true
    }

    /// Delete under the caret (Delete). At the end of a line the next line is merged into it.
    pub fn delete(&mut self) -> bool {
        let Some((index, column)) = self.cursor() else {
            return false;
        };

        if column < self.lines[index].char_len() {
            self.lines[index].delete_after();
            return true;
        }
        if index + 1 >= self.lines.len() {
            return false;
        }

        let removed = self.lines.remove(index + 1);
        self.lines[index].push_str(removed.text());
        self.reflow();
        self.jump_to(index, column);
        true
    }

    /// Renumber lines and re-clamp the viewport after a structural change.
    fn reflow(&mut self) {
        let total = self.lines.len();
        for (index, line) in self.lines.iter_mut().enumerate() {
            line.renumber(index + 1, total);
        }
        self.scroll_top = self.scroll_top.min(total - 1);
        self.scroll_into_view();
        self.follow_cursor();
    }

    fn scroll_into_view(&mut self) {
        let Some(focused) = self.focused else {
            return;
        };
        if focused < self.scroll_top {
            self.scroll_top = focused;
        } else if focused >= self.scroll_top + self.max_lines {
            self.scroll_top = focused + 1 - self.max_lines;
        }
    }

    /// Adjust the shared horizontal scroll so the caret stays inside the text area.
    fn follow_cursor(&mut self) {
        let Some((index, column)) = self.cursor() else {
            return;
        };
        let area = self.text_area_width();
        let text = self.lines[index].text();

        if column < self.h_scroll {
            self.h_scroll = column;
        }
        while self.h_scroll < column && span_width(text, self.h_scroll, column) >= area {
            self.h_scroll += 1;
        }
    }

    /// Bracket depth after lines `0..line` followed by `head` (a prefix of `line`).
    fn depth_before(&self, line: usize, head: &str) -> usize {
        let texts = self.lines[..line].iter().map(Line::text).chain([head]);
        scope_depth(texts)
    }
}

/// Net count of openers over closers, ignoring anything inside double-quoted strings.
fn scope_depth<'a>(texts: impl IntoIterator<Item = &'a str>) -> usize {
    let mut depth = 0isize;
    let mut in_string = false;
    let mut escaped = false;

    for text in texts {
        for ch in text.chars() {
            if in_string {
                match ch {
                    _ if escaped => escaped = false,
                    '\\' => escaped = true,
                    '"' => in_string = false,
                    _ => {}
                }
                continue;
            }
            match ch {
                '"' => in_string = true,
                '[' | '{' => depth += 1,
                ']' | '}' => depth -= 1,
                _ => {}
            }
        }
    }

    usize::try_from(depth).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_depth_skips_strings() {
        assert_eq!(scope_depth(["give @s stone{a:[", "\"]]\""]), 2);
        assert_eq!(scope_depth(["]]]"]), 0);
        assert_eq!(scope_depth(["{\"\\\"[\"", "["]), 2);
    }

    #[test]
    fn test_follow_cursor_scrolls_horizontally() {
        // "1 -" plus a space leaves 5 of 9 cells for text
        let mut buffer = LineBuffer::new("0123456789", 9, 3);
        assert_eq!(buffer.text_area_width(), 5);

        buffer.jump_to(0, 10);
        assert_eq!(buffer.h_scroll(), 6);
        assert_eq!(buffer.cursor_cell(), Some(4));
        assert_eq!(buffer.visible_columns(0), 6..10);

        buffer.jump_to(0, 2);
        assert_eq!(buffer.h_scroll(), 2);
    }
}
