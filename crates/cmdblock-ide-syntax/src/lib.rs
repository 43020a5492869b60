//! `cmdblock-ide-syntax` - symbol tokenizer and classifier for command-block commands.
//!
//! The [`Tokenizer`] splits the full editor text into per-line [`Symbol`]s, matches brackets and
//! braces through an explicit scope stack, and classifies every symbol into a [`SymbolKind`].
//! Hosts then ask for [`StyledSpan`]s of a line over a horizontal visible range and map the
//! [`Color`] tags to their own renderer.
//!
//! Bracket problems are reported only through the error flag on the offending symbols; they never
//! stop tokenization.
//!
//! ```rust
//! use cmdblock_ide_syntax::{CursorPos, Palette, Tokenizer};
//!
//! let tokenizer = Tokenizer::parse("give @s stone{Count:1b}");
//! assert!(!tokenizer.has_errors());
//!
//! let spans = tokenizer.styled_line(0, Some(CursorPos::new(0, 13)), 0..80, &Palette::default());
//! assert!(spans.iter().filter(|span| span.emphasis).count() == 2);
//! ```

mod classify;
mod style;
mod symbol;
mod tokenizer;

pub use style::{Color, CursorPos, Palette, StyledSpan};
pub use symbol::{ScopeKind, Symbol, SymbolKind, SymbolRef};
pub use tokenizer::{BREAKING_CHARS, Tokenizer};
