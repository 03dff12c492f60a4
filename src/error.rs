//! Error types shared across the crate.

use std::path::PathBuf;

/// Result type used throughout the library.
pub type Result<T> = std::result::Result<T, CorrectorError>;

/// Errors that can occur while loading the dictionary or the metric config.
///
/// All variants are startup-time failures; the query path itself is total
/// and never produces an error. Malformed dictionary *records* are not an
/// error either — the loader skips them and keeps going.
#[derive(Debug, thiserror::Error)]
pub enum CorrectorError {
    /// A dictionary or config file could not be opened or read.
    #[error("cannot read \"{}\": {source}", path.display())]
    Io {
        /// Path of the file that failed to open.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The metric config document is not valid JSON, or a required
    /// top-level field is missing or of the wrong type.
    #[error("malformed metric config: {0}")]
    ConfigParse(#[from] serde_json::Error),

    /// One element of a custom-cost section failed schema validation.
    /// Carries the stringified element so the operator can see exactly
    /// which entry is at fault.
    #[error("error while parsing {section} section {index}: {reason}\n{element}")]
    ConfigSection {
        /// Name of the offending config section.
        section: &'static str,
        /// Zero-based index of the offending element within the section.
        index: usize,
        /// The offending element, stringified as JSON.
        element: String,
        /// Why the element was rejected.
        reason: String,
    },
}

impl CorrectorError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CorrectorError::Io {
            path: path.into(),
            source,
        }
    }
}
