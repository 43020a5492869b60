//! Cell measurement for the horizontal viewport.
//!
//! Cursor offsets are counted in chars, while the viewport is counted in terminal cells.
//! Widths follow UAX #11 through `unicode-width`.

use unicode_width::UnicodeWidthChar;

/// Width of `ch` in cells (narrow 1, wide 2, combining 0).
pub fn char_width(ch: char) -> usize {
    UnicodeWidthChar::width(ch).unwrap_or(1)
}

/// Total width of `text` in cells.
pub fn str_width(text: &str) -> usize {
    text.chars().map(char_width).sum()
}

/// Width in cells of the chars `from..to` of `text`.
pub fn span_width(text: &str, from: usize, to: usize) -> usize {
    text.chars()
        .skip(from)
        .take(to.saturating_sub(from))
        .map(char_width)
        .sum()
}

/// Char index of the first char at or after `from` whose cells reach past `cells`.
///
/// Returns the char count when the line ends first. This is both the exclusive end of what fits
/// in a `cells`-wide window and the char under a click `cells` columns into that window.
pub fn column_at_cell(text: &str, from: usize, cells: usize) -> usize {
    let mut x = 0usize;
    let mut column = from;
    for ch in text.chars().skip(from) {
        x += char_width(ch);
        if x > cells {
            return column;
        }
        column += 1;
    }
    column
}
