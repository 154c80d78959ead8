//! Error types for the fixture harness.

use thiserror::Error;

/// Errors that can occur while loading fixtures or expected-failure files.
#[derive(Debug, Error)]
pub enum SpecError {
    /// A fixture or expected-failures file is not valid TOML for its schema.
    #[error("parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    /// A file or directory could not be read.
    #[error("failed to load fixture: {path}: {message}")]
    Load { path: String, message: String },
}

impl SpecError {
    /// Convert a TOML error, locating its line within `content`.
    pub(crate) fn from_toml(content: &str, err: toml::de::Error) -> Self {
        let line = err
            .span()
            .map(|span| content[..span.start.min(content.len())].matches('\n').count() + 1)
            .unwrap_or(0);
        SpecError::Parse {
            line,
            message: err.message().to_string(),
        }
    }
}

/// Result type for harness operations.
pub type SpecResult<T> = Result<T, SpecError>;
