//! Symbols produced by the tokenizer.
//!
//! A [`Symbol`] is a classified, non-overlapping substring of one line. Symbols never span lines;
//! a string literal that continues on the next line is split into one symbol per line, each
//! flagged as part of a string.

/// Semantic category of a [`Symbol`].
///
/// The category drives the color used when the symbol is rendered (see [`crate::Palette`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    /// Plain argument with no surrounding operator.
    Normal,
    /// Double-quoted string literal (or a piece of one).
    String,
    /// An `=` marker.
    Equal,
    /// Argument directly before an `=` marker.
    LeftOfEqual,
    /// Argument directly after an `=` marker.
    RightOfEqual,
    /// A `:` marker.
    Colon,
    /// Argument directly before a `:` marker.
    LeftOfColon,
    /// Argument directly after a `:` marker.
    RightOfColon,
    /// A `,` separator.
    Comma,
    /// A `{` or `}` compound delimiter.
    Brace,
    /// A `[` or `]` list delimiter.
    Bracket,
    /// Anything containing a single quote.
    Quote,
    /// Integer literal with an optional NBT type suffix (`12`, `-3`, `1b`, `5s`, `0f`, `7l`).
    Number,
    /// A `.` separator.
    Dot,
    /// Anything containing a `/`.
    Slash,
    /// A coordinate triple such as `~ ~1 ~` or `^ ^ ^2`.
    Coordinate,
}

impl SymbolKind {
    /// Every kind, in declaration order.
    pub const ALL: [SymbolKind; 16] = [
        SymbolKind::Normal,
        SymbolKind::String,
        SymbolKind::Equal,
        SymbolKind::LeftOfEqual,
        SymbolKind::RightOfEqual,
        SymbolKind::Colon,
        SymbolKind::LeftOfColon,
        SymbolKind::RightOfColon,
        SymbolKind::Comma,
        SymbolKind::Brace,
        SymbolKind::Bracket,
        SymbolKind::Quote,
        SymbolKind::Number,
        SymbolKind::Dot,
        SymbolKind::Slash,
        SymbolKind::Coordinate,
    ];

    /// Returns `true` for bracket and brace symbols (the kinds that can be emphasized).
    pub fn is_scope(self) -> bool {
        matches!(self, SymbolKind::Brace | SymbolKind::Bracket)
    }
}

/// Kind of a scope opened by a bracket or a brace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScopeKind {
    /// `[` ... `]`
    Bracket,
    /// `{` ... `}`
    Brace,
}

impl ScopeKind {
    /// Scope kind opened by `ch`, if `ch` is an opener.
    pub fn from_open(ch: char) -> Option<Self> {
        match ch {
            '[' => Some(ScopeKind::Bracket),
            '{' => Some(ScopeKind::Brace),
            _ => None,
        }
    }

    /// Scope kind closed by `ch`, if `ch` is a closer.
    pub fn from_close(ch: char) -> Option<Self> {
        match ch {
            ']' => Some(ScopeKind::Bracket),
            '}' => Some(ScopeKind::Brace),
            _ => None,
        }
    }

    /// The closing character for this scope.
    pub fn closer(self) -> char {
        match self {
            ScopeKind::Bracket => ']',
            ScopeKind::Brace => '}',
        }
    }
}

/// Position of a symbol inside the symbol table: `(line, index within line)`.
///
/// References are positional so they stay valid for as long as the table they were taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymbolRef {
    /// Zero-based line.
    pub line: usize,
    /// Zero-based index of the symbol within its line.
    pub index: usize,
}

impl SymbolRef {
    /// Create a new reference.
    pub fn new(line: usize, index: usize) -> Self {
        Self { line, index }
    }
}

/// A classified substring of one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    pub(crate) index: usize,
    pub(crate) line: usize,
    pub(crate) start: usize,
    pub(crate) char_len: usize,
    pub(crate) text: String,
    pub(crate) kind: SymbolKind,
    pub(crate) error: bool,
    pub(crate) sibling: Option<SymbolRef>,
    pub(crate) in_string: bool,
    pub(crate) coordinate: bool,
}

impl Symbol {
    pub(crate) fn new(index: usize, line: usize, start: usize, text: String) -> Self {
        let char_len = text.chars().count();
        Self {
            index,
            line,
            start,
            char_len,
            text,
            kind: SymbolKind::Normal,
            error: false,
            sibling: None,
            in_string: false,
            coordinate: false,
        }
    }

    /// Index of this symbol within its line.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Zero-based line of this symbol.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Start column (in chars) within the line.
    pub fn start(&self) -> usize {
        self.start
    }

    /// End column (exclusive, in chars) within the line.
    pub fn end(&self) -> usize {
        self.start + self.char_len
    }

    /// Length in chars.
    pub fn char_len(&self) -> usize {
        self.char_len
    }

    /// Raw text, including any whitespace folded into the symbol.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Text without surrounding whitespace.
    pub fn trimmed(&self) -> &str {
        self.text.trim()
    }

    /// Returns `true` for whitespace-only symbols.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Semantic category.
    pub fn kind(&self) -> SymbolKind {
        self.kind
    }

    /// Returns `true` if bracket matching flagged this symbol.
    pub fn is_error(&self) -> bool {
        self.error
    }

    /// The matched bracket/brace, if any.
    pub fn sibling(&self) -> Option<SymbolRef> {
        self.sibling
    }

    /// Position of this symbol in the table.
    pub fn reference(&self) -> SymbolRef {
        SymbolRef::new(self.line, self.index)
    }

    /// Returns `true` if the cursor at `(line, column)` touches this symbol.
    ///
    /// Leading whitespace folded into the symbol does not count. Both ends are inclusive, so a
    /// caret placed right after a bracket still counts.
    pub fn touches(&self, line: usize, column: usize) -> bool {
        let leading = self.text.chars().take_while(|ch| ch.is_whitespace()).count();
        self.line == line && self.start + leading <= column && column <= self.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_geometry_is_char_based() {
        let symbol = Symbol::new(0, 2, 4, " é[".to_string());
        assert_eq!(symbol.char_len(), 3);
        assert_eq!(symbol.end(), 7);
        assert_eq!(symbol.trimmed(), "é[");
        assert!(symbol.touches(2, 7));
        assert!(symbol.touches(2, 5));
        assert!(!symbol.touches(2, 4));
        assert!(!symbol.touches(1, 5));
    }

    #[test]
    fn test_scope_kind_pairs() {
        assert_eq!(ScopeKind::from_open('['), ScopeKind::from_close(']'));
        assert_eq!(ScopeKind::from_open('{').map(ScopeKind::closer), Some('}'));
        assert_eq!(ScopeKind::from_open('}'), None);
    }
}
