use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
/// Errors produced while loading an [`crate::EditorConfig`].
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    /// The config file could not be read.
    Io {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    #[error("YAML parse error: {0}")]
    /// The config text is not valid YAML for [`crate::EditorConfig`].
    Yaml(#[from] serde_yaml::Error),
}
