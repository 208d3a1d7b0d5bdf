//! Content loading error types.

use std::path::PathBuf;

use thiserror::Error;

/// Failures loading or validating clinic content.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum ContentError {
    #[error("rating must be between 1 and 5, got {value}")]
    InvalidRating { value: u8 },

    #[error("failed to read content file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse content: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("duplicate testimonial id: {id}")]
    DuplicateTestimonial { id: String },
}

impl ContentError {
    /// Creates io error for a content path.
    #[must_use]
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
