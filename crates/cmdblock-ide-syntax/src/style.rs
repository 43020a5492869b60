//! Colors and render-ready spans.
//!
//! The tokenizer does not know how a host draws text. It only hands out [`StyledSpan`]s tagged
//! with one of the sixteen chat [`Color`]s; the host maps them to whatever its renderer uses.

use crate::symbol::{Symbol, SymbolKind};
use crate::tokenizer::Tokenizer;
use serde::Deserialize;
use std::ops::Range;

/// The sixteen chat formatting colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    Black,
    DarkBlue,
    DarkGreen,
    DarkAqua,
    DarkRed,
    DarkPurple,
    Gold,
    Gray,
    DarkGray,
    Blue,
    Green,
    Aqua,
    Red,
    LightPurple,
    Yellow,
    White,
}

impl Color {
    /// Formatting code (`0`-`9`, `a`-`f`).
    pub fn code(self) -> char {
        match self {
            Color::Black => '0',
            Color::DarkBlue => '1',
            Color::DarkGreen => '2',
            Color::DarkAqua => '3',
            Color::DarkRed => '4',
            Color::DarkPurple => '5',
            Color::Gold => '6',
            Color::Gray => '7',
            Color::DarkGray => '8',
            Color::Blue => '9',
            Color::Green => 'a',
            Color::Aqua => 'b',
            Color::Red => 'c',
            Color::LightPurple => 'd',
            Color::Yellow => 'e',
            Color::White => 'f',
        }
    }

    /// Foreground RGB value.
    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            Color::Black => (0x00, 0x00, 0x00),
            Color::DarkBlue => (0x00, 0x00, 0xAA),
            Color::DarkGreen => (0x00, 0xAA, 0x00),
            Color::DarkAqua => (0x00, 0xAA, 0xAA),
            Color::DarkRed => (0xAA, 0x00, 0x00),
            Color::DarkPurple => (0xAA, 0x00, 0xAA),
            Color::Gold => (0xFF, 0xAA, 0x00),
            Color::Gray => (0xAA, 0xAA, 0xAA),
            Color::DarkGray => (0x55, 0x55, 0x55),
            Color::Blue => (0x55, 0x55, 0xFF),
            Color::Green => (0x55, 0xFF, 0x55),
            Color::Aqua => (0x55, 0xFF, 0xFF),
            Color::Red => (0xFF, 0x55, 0x55),
            Color::LightPurple => (0xFF, 0x55, 0xFF),
            Color::Yellow => (0xFF, 0xFF, 0x55),
            Color::White => (0xFF, 0xFF, 0xFF),
        }
    }
}

/// Category → color table, plus the override used for bracket errors.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub normal: Color,
    pub string: Color,
    pub equal: Color,
    pub left_of_equal: Color,
    pub right_of_equal: Color,
    pub colon: Color,
    pub left_of_colon: Color,
    pub right_of_colon: Color,
    pub comma: Color,
    pub brace: Color,
    pub bracket: Color,
    pub quote: Color,
    pub number: Color,
    pub dot: Color,
    pub slash: Color,
    pub coordinate: Color,
    pub error: Color,
}

impl Palette {
    /// Color for symbols of `kind`.
    pub fn color_for(&self, kind: SymbolKind) -> Color {
        match kind {
            SymbolKind::Normal => self.normal,
            SymbolKind::String => self.string,
            SymbolKind::Equal => self.equal,
            SymbolKind::LeftOfEqual => self.left_of_equal,
            SymbolKind::RightOfEqual => self.right_of_equal,
            SymbolKind::Colon => self.colon,
            SymbolKind::LeftOfColon => self.left_of_colon,
            SymbolKind::RightOfColon => self.right_of_colon,
            SymbolKind::Comma => self.comma,
            SymbolKind::Brace => self.brace,
            SymbolKind::Bracket => self.bracket,
            SymbolKind::Quote => self.quote,
            SymbolKind::Number => self.number,
            SymbolKind::Dot => self.dot,
            SymbolKind::Slash => self.slash,
            SymbolKind::Coordinate => self.coordinate,
        }
    }

    /// Color for `symbol`, taking its error flag into account.
    pub fn color_of(&self, symbol: &Symbol) -> Color {
        if symbol.is_error() {
            self.error
        } else {
            self.color_for(symbol.kind())
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            normal: Color::White,
            string: Color::Green,
            equal: Color::Yellow,
            left_of_equal: Color::Gold,
            right_of_equal: Color::LightPurple,
            colon: Color::Yellow,
            left_of_colon: Color::Gold,
            right_of_colon: Color::LightPurple,
            comma: Color::Gray,
            brace: Color::Blue,
            bracket: Color::DarkAqua,
            quote: Color::Green,
            number: Color::Aqua,
            dot: Color::Yellow,
            slash: Color::DarkGray,
            coordinate: Color::DarkPurple,
            error: Color::Red,
        }
    }
}

/// Caret location used to decide bracket emphasis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorPos {
    /// Zero-based line.
    pub line: usize,
    /// Column in chars.
    pub column: usize,
}

impl CursorPos {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// A clipped, colored piece of one symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledSpan {
    /// Column (in chars) where this fragment starts within its line.
    pub start: usize,
    /// The visible text.
    pub text: String,
    /// Foreground color.
    pub color: Color,
    /// Set for a bracket/brace under the caret and for its matched sibling.
    pub emphasis: bool,
}

impl Tokenizer {
    /// Render-ready spans for `line`, clipped to the `visible` char range.
    ///
    /// Symbols entirely outside `visible` are skipped. Emphasis is only computed when a cursor
    /// is given.
    pub fn styled_line(
        &self,
        line: usize,
        cursor: Option<CursorPos>,
        visible: Range<usize>,
        palette: &Palette,
    ) -> Vec<StyledSpan> {
        let mut spans = Vec::new();
        if visible.start >= visible.end {
            return spans;
        }

        for symbol in self.line(line) {
            let (start, end) = (symbol.start(), symbol.end());
            if end <= visible.start || visible.end <= start {
                continue;
            }

            let from = visible.start.max(start);
            let to = visible.end.min(end);
            let text: String = symbol
                .text()
                .chars()
                .skip(from - start)
                .take(to - from)
                .collect();

            spans.push(StyledSpan {
                start: from,
                text,
                color: palette.color_of(symbol),
                emphasis: cursor.is_some_and(|cursor| self.is_emphasized(symbol, cursor)),
            });
        }

        spans
    }

    /// Whether `symbol` (or its sibling) is a scope delimiter touched by `cursor`.
    pub fn is_emphasized(&self, symbol: &Symbol, cursor: CursorPos) -> bool {
        let touched = |s: &Symbol| s.kind().is_scope() && s.touches(cursor.line, cursor.column);
        touched(symbol) || self.sibling_of(symbol).is_some_and(touched)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_covers_every_kind() {
        let palette = Palette::default();
        for kind in SymbolKind::ALL {
            let _ = palette.color_for(kind);
        }
        assert_eq!(palette.color_for(SymbolKind::Coordinate), Color::DarkPurple);
        assert_eq!(palette.error, Color::Red);
    }

    #[test]
    fn test_color_codes_are_unique() {
        let palette = Palette::default();
        let codes: std::collections::HashSet<char> = [
            palette.normal,
            palette.string,
            palette.brace,
            palette.number,
            palette.error,
        ]
        .into_iter()
        .map(Color::code)
        .collect();
        assert_eq!(codes.len(), 5);
    }
}
