//! Command Block IDE - a headless multi-line editor for command-block commands.
//!
//! # Overview
//!
//! `cmdblock-ide` takes a single command string, lets the user edit it as indented multi-line
//! text, and hands back a single-line command on commit. It does not draw anything: hosts feed
//! [`InputEvent`]s in and draw the [`RenderedLine`]s that come out.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  CommandEditor (input events, render)       │  ← Public API
//! ├──────────────────────┬──────────────────────┤
//! │  UndoRedoManager     │  Tokenizer           │  ← snapshots / highlighting
//! ├──────────────────────┴──────────────────────┤
//! │  LineBuffer (lines, focus, viewport)        │  ← Text + geometry
//! ├─────────────────────────────────────────────┤
//! │  make_inline / auto_format                  │  ← Pure text transforms
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use cmdblock_ide::{CommandEditor, InputEvent};
//!
//! let mut editor = CommandEditor::new("give @s stone{Count:1b}", true, 80, 20);
//! assert_eq!(editor.command(false), "give @s stone\n{\n  Count:1b\n}");
//!
//! editor.handle(InputEvent::Char('x'));
//! let lines = editor.render();
//! assert_eq!(lines[0].prefix, "1 -");
//! assert_eq!(lines[0].cursor, Some(1));
//! ```
//!
//! # Module Description
//!
//! - [`buffer`] - lines, focus, navigation, line splitting/merging and the viewport
//! - [`line`] - a single editable line
//! - [`undo`] - bounded snapshot stacks
//! - [`input`] - input events
//! - [`config`] - YAML-loadable settings
//! - [`editor`] - the [`CommandEditor`] façade

pub mod buffer;
pub mod config;
pub mod editor;
mod error;
pub mod input;
pub mod line;
mod measure;
pub mod undo;

pub use buffer::LineBuffer;
pub use config::EditorConfig;
pub use editor::{CommandEditor, RenderedLine};
pub use error::ConfigError;
pub use input::{ControlKey, InputEvent, PointerEvent};
pub use line::Line;
pub use measure::{char_width, str_width};
pub use undo::{DEFAULT_UNDO_DEPTH, EditClass, EditorSnapshot, UndoRedoManager};

pub use cmdblock_ide_format::{FormatPolicy, auto_format, make_inline};
pub use cmdblock_ide_syntax::{Color, CursorPos, Palette, StyledSpan, SymbolKind, Tokenizer};
