use serde::Deserialize;

/// Punctuation rules used by [`crate::make_inline`] and [`crate::auto_format`].
///
/// The defaults follow the command grammar: no spaces around `{ } [ ] = ,` inside scopes, and at
/// top level a list opener sticks to the argument before it unless that argument is numeric.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FormatPolicy {
    /// Characters that never want a space next to them inside a scope.
    pub tight_chars: String,
    /// Characters that attach to the previous argument at top level.
    pub attach_chars: String,
    /// Keep the space before an attaching char when the previous argument ends in a digit, `~` or
    /// `^` (e.g. the last component of a coordinate triple).
    pub keep_space_after_number: bool,
    /// Write `key = value` instead of `key=value` in formatted output. Compound operators such as
    /// `+=` or `>=` are never split.
    pub spaced_equals: bool,
    /// Spaces per indentation level.
    pub tab_width: usize,
}

impl FormatPolicy {
    pub fn is_tight(&self, ch: char) -> bool {
        self.tight_chars.contains(ch)
    }

    pub fn attaches(&self, ch: char) -> bool {
        self.attach_chars.contains(ch)
    }

    /// Leading whitespace for a line at nesting `depth`.
    pub fn indent(&self, depth: usize) -> String {
        " ".repeat(self.tab_width * depth)
    }
}

impl Default for FormatPolicy {
    fn default() -> Self {
        Self {
            tight_chars: "{}[]=,".to_string(),
            attach_chars: "[".to_string(),
            keep_space_after_number: true,
            spaced_equals: true,
            tab_width: 2,
        }
    }
}
