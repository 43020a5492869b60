//! Single-pass tokenizer with bracket matching.
//!
//! The scanner walks the full text once, keeping a line counter, a string flag and a scope
//! stack. It emits [`Symbol`]s into a per-line table, links matched brackets as siblings and
//! flags mismatches. Classification runs afterwards (see [`crate::classify`]).

use crate::classify::classify;
use crate::symbol::{ScopeKind, Symbol, SymbolRef};
use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, trace};

/// Characters that always end the current symbol and form a one-char symbol of their own.
pub const BREAKING_CHARS: [char; 4] = [',', ':', '=', '.'];

/// One coordinate component: `~`/`^` with an optional number, or a plain number.
const COORD_COMPONENT: &str = r"(?:[~^](?:-?(?:\d+\.?\d*|\.\d+))?|-?(?:\d+\.?\d*|\.\d+))";

static COORDINATES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("^{COORD_COMPONENT}(?: +{COORD_COMPONENT}){{2}}"))
        .expect("coordinate pattern is valid")
});

/// Parsed symbol table for a command text.
///
/// The tokenizer is an explicit value owned by whoever edits the text; call
/// [`Tokenizer::refresh`] after every text change to rebuild it.
///
/// # Example
///
/// ```rust
/// use cmdblock_ide_syntax::{SymbolKind, Tokenizer};
///
/// let tokenizer = Tokenizer::parse("tp @s ~ ~1 ~");
/// let kinds: Vec<SymbolKind> = tokenizer.line(0).iter().map(|s| s.kind()).collect();
/// assert_eq!(kinds.last(), Some(&SymbolKind::Coordinate));
/// ```
#[derive(Debug, Clone)]
pub struct Tokenizer {
    text: String,
    lines: Vec<Vec<Symbol>>,
    unclosed: Vec<SymbolRef>,
}

impl Tokenizer {
    /// Create a tokenizer over empty text.
    pub fn new() -> Self {
        Self::parse("")
    }

    /// Tokenize and classify `text`.
    pub fn parse(text: &str) -> Self {
        let mut tokenizer = Self {
            text: String::new(),
            lines: Vec::new(),
            unclosed: Vec::new(),
        };
        tokenizer.refresh(text);
        tokenizer
    }

    /// Re-parse from scratch. Nothing from the previous table is reused.
    pub fn refresh(&mut self, text: &str) {
        let scan = Scanner::new(text).run();
        self.text = text.to_string();
        self.lines = scan.lines;
        self.unclosed = scan.unclosed;
        classify(&mut self.lines);

        trace!(
            lines = self.lines.len(),
            symbols = self.symbol_count(),
            "tokenized command text"
        );
    }

    /// The text of the last parse.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Number of lines in the symbol table (always at least one).
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Symbols of `line`, empty when out of range.
    pub fn line(&self, line: usize) -> &[Symbol] {
        self.lines.get(line).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All symbols in reading order.
    pub fn symbols(&self) -> impl Iterator<Item = &Symbol> {
        self.lines.iter().flatten()
    }

    /// Total symbol count.
    pub fn symbol_count(&self) -> usize {
        self.lines.iter().map(Vec::len).sum()
    }

    /// Look up a symbol by reference.
    pub fn get(&self, symbol: SymbolRef) -> Option<&Symbol> {
        self.lines.get(symbol.line)?.get(symbol.index)
    }

    /// The matched sibling of `symbol`, if any.
    pub fn sibling_of(&self, symbol: &Symbol) -> Option<&Symbol> {
        symbol.sibling.and_then(|sibling| self.get(sibling))
    }

    /// First symbol on `line` covering `column` (end exclusive).
    pub fn symbol_at(&self, line: usize, column: usize) -> Option<&Symbol> {
        self.line(line)
            .iter()
            .find(|symbol| symbol.start <= column && column < symbol.end())
    }

    /// Symbols flagged by bracket matching.
    pub fn errors(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols().filter(|symbol| symbol.error)
    }

    /// Returns `true` if any bracket error was found.
    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }

    /// Openers that were still on the scope stack when the text ended.
    pub fn unclosed(&self) -> &[SymbolRef] {
        &self.unclosed
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}

/// How a symbol ends, which decides what happens to whitespace-only pieces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Boundary {
    /// Ended by a separator inside the line: blank pieces fold into the next symbol.
    Inline,
    /// Ended by a newline or the end of text: blank pieces are kept only on otherwise empty lines.
    LineEnd,
}

#[derive(Debug, Clone, Copy, Default)]
struct Flags {
    string: bool,
    coordinate: bool,
}

struct ScanResult {
    lines: Vec<Vec<Symbol>>,
    unclosed: Vec<SymbolRef>,
}

struct Scanner {
    chars: Vec<char>,
    lines: Vec<Vec<Symbol>>,
    stack: Vec<(ScopeKind, SymbolRef)>,
    line: usize,
    line_start: usize,
    start: usize,
    in_string: bool,
    escaped: bool,
}

impl Scanner {
    fn new(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
            lines: vec![Vec::new()],
            stack: Vec::new(),
            line: 0,
            line_start: 0,
            start: 0,
            in_string: false,
            escaped: false,
        }
    }

    fn run(mut self) -> ScanResult {
        let len = self.chars.len();
        let mut i = 0;

        while i < len {
            let ch = self.chars[i];

            if ch == '\n' {
                let flags = Flags {
                    string: self.in_string,
                    ..Flags::default()
                };
                self.start = self.emit(self.start, i, Boundary::LineEnd, flags) + 1;
                self.line += 1;
                self.line_start = i + 1;
                self.escaped = false;
                self.lines.push(Vec::new());
            } else if self.in_string {
                if self.escaped {
                    self.escaped = false;
                } else if ch == '\\' {
                    self.escaped = true;
                } else if ch == '"' {
                    let flags = Flags {
                        string: true,
                        ..Flags::default()
                    };
                    self.start = self.emit(self.start, i + 1, Boundary::Inline, flags);
                    self.in_string = false;
                }
            } else if let Some(end) = self.coordinates_at(i) {
                let flags = Flags {
                    coordinate: true,
                    ..Flags::default()
                };
                self.start = self.emit(self.start, end, Boundary::Inline, flags);
                i = end;
                continue;
            } else if ch == '"' {
                self.start = self.emit(self.start, i, Boundary::Inline, Flags::default());
                self.in_string = true;
            } else if self.stack.is_empty() && ch.is_whitespace() {
                self.start = self.emit(self.start, i, Boundary::Inline, Flags::default());
            } else if BREAKING_CHARS.contains(&ch) {
                self.emit_single(i);
            } else if let Some(kind) = ScopeKind::from_open(ch) {
                self.emit_single(i);
                self.open_scope(kind);
            } else if let Some(kind) = ScopeKind::from_close(ch) {
                self.emit_single(i);
                self.close_scope(kind);
            }

            i += 1;
        }

        let flags = Flags {
            string: self.in_string,
            ..Flags::default()
        };
        self.emit(self.start, len, Boundary::LineEnd, flags);

        let unclosed: Vec<SymbolRef> = self.stack.iter().map(|(_, opener)| *opener).collect();
        for opener in &unclosed {
            debug!(line = opener.line, index = opener.index, "unclosed scope");
            self.set_error(*opener);
        }

        ScanResult {
            lines: self.lines,
            unclosed,
        }
    }

    /// End the current symbol at `i`, then emit the char at `i` on its own.
    fn emit_single(&mut self, i: usize) {
        self.start = self.emit(self.start, i, Boundary::Inline, Flags::default());
        self.start = self.emit(self.start, i + 1, Boundary::Inline, Flags::default());
    }

    /// Emit `chars[start..end]` as a symbol and return where the next symbol starts.
    fn emit(&mut self, start: usize, end: usize, boundary: Boundary, flags: Flags) -> usize {
        if start >= end {
            return end;
        }

        let text: String = self.chars[start..end].iter().collect();
        let line = &mut self.lines[self.line];

        if text.trim().is_empty() {
            match boundary {
                Boundary::Inline => return start,
                Boundary::LineEnd if !line.is_empty() => return end,
                Boundary::LineEnd => {}
            }
        }

        let mut symbol = Symbol::new(line.len(), self.line, start - self.line_start, text);
        symbol.in_string = flags.string;
        symbol.coordinate = flags.coordinate;
        line.push(symbol);
        end
    }

    fn last_symbol(&self) -> Option<SymbolRef> {
        let index = self.lines[self.line].len().checked_sub(1)?;
        Some(SymbolRef::new(self.line, index))
    }

    fn set_error(&mut self, symbol: SymbolRef) {
        if let Some(symbol) = self
            .lines
            .get_mut(symbol.line)
            .and_then(|line| line.get_mut(symbol.index))
        {
            symbol.error = true;
        }
    }

    fn set_sibling(&mut self, symbol: SymbolRef, sibling: SymbolRef) {
        if let Some(symbol) = self
            .lines
            .get_mut(symbol.line)
            .and_then(|line| line.get_mut(symbol.index))
        {
            symbol.sibling = Some(sibling);
        }
    }

    fn open_scope(&mut self, kind: ScopeKind) {
        if let Some(opener) = self.last_symbol() {
            self.stack.push((kind, opener));
        }
    }

    fn close_scope(&mut self, kind: ScopeKind) {
        let Some(closer) = self.last_symbol() else {
            return;
        };

        match self.stack.pop() {
            None => {
                debug!(line = closer.line, index = closer.index, "closer without opener");
                self.set_error(closer);
            }
            Some((open_kind, opener)) if open_kind != kind => {
                debug!(
                    line = closer.line,
                    index = closer.index,
                    expected = %open_kind.closer(),
                    "mismatched closer"
                );
                self.stack.push((open_kind, opener));
                self.set_error(opener);
                self.set_error(closer);
            }
            Some((_, opener)) => {
                self.set_sibling(opener, closer);
                self.set_sibling(closer, opener);
            }
        }
    }

    /// If a coordinate triple starts at `i`, return the index right after it.
    ///
    /// Only recognized at top level, at a symbol boundary, and when followed by whitespace or the
    /// end of the line.
    fn coordinates_at(&self, i: usize) -> Option<usize> {
        let ch = self.chars[i];
        if !self.stack.is_empty() || !matches!(ch, '~' | '^' | '-' | '.' | '0'..='9') {
            return None;
        }
        if self.chars[self.start..i].iter().any(|c| !c.is_whitespace()) {
            return None;
        }

        let line_end = self.chars[i..]
            .iter()
            .position(|&c| c == '\n')
            .map_or(self.chars.len(), |offset| i + offset);
        let rest: String = self.chars[i..line_end].iter().collect();

        let matched = COORDINATES.find(&rest)?;
        let end = i + rest[..matched.end()].chars().count();
        match self.chars.get(end) {
            None => Some(end),
            Some(next) if next.is_whitespace() => Some(end),
            Some(_) => None,
        }
    }
}
