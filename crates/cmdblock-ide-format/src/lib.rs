//! `cmdblock-ide-format` - text transforms between the single-line command form and the
//! multi-line editing form.
//!
//! - [`make_inline`] collapses a command to one line with game-safe spacing.
//! - [`auto_format`] expands a command into one element per line, indented by bracket depth.
//!
//! Both are pure functions driven by a [`FormatPolicy`].
//!
//! ```rust
//! use cmdblock_ide_format::{FormatPolicy, auto_format, make_inline};
//!
//! let policy = FormatPolicy::default();
//! let text = "execute as @e[type=pig] run data merge entity @s {NoAI:1b}";
//! let formatted = auto_format(text, &policy);
//! assert_eq!(formatted.lines().count(), 8);
//! assert_eq!(make_inline(&formatted, &policy), text);
//! ```

mod expand;
mod inline;
mod policy;
mod strings;

pub use expand::auto_format;
pub use inline::make_inline;
pub use policy::FormatPolicy;
