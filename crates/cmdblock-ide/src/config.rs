//! Editor configuration.
//!
//! Every field has a default, so a config file only needs the keys it changes:
//!
//! ```yaml
//! tab_width: 4
//! auto_close_brackets: false
//! format:
//!   attach_chars: "[{"
//! palette:
//!   coordinate: gold
//! ```

use crate::error::ConfigError;
use crate::undo::DEFAULT_UNDO_DEPTH;
use cmdblock_ide_format::FormatPolicy;
use cmdblock_ide_syntax::Palette;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Tunables of a [`crate::CommandEditor`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Spaces inserted by Tab and per indentation level.
    pub tab_width: usize,
    /// Capacity of the undo and redo stacks.
    pub undo_depth: usize,
    /// Lines moved per mouse-wheel notch.
    pub scroll_step: usize,
    /// Type the matching `]`/`}` after `[`/`{`.
    pub auto_close_brackets: bool,
    /// Spacing rules for formatting and inline collapse.
    pub format: FormatPolicy,
    /// Highlighting colors.
    pub palette: Palette,
}

impl EditorConfig {
    /// Parse a YAML document.
    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Read and parse a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&text)
    }

    /// The format policy with this config's `tab_width` applied.
    pub fn format_policy(&self) -> FormatPolicy {
        FormatPolicy {
            tab_width: self.tab_width,
            ..self.format.clone()
        }
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            tab_width: 2,
            undo_depth: DEFAULT_UNDO_DEPTH,
            scroll_step: 2,
            auto_close_brackets: true,
            format: FormatPolicy::default(),
            palette: Palette::default(),
        }
    }
}
