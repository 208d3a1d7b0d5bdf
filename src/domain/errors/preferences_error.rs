//! Preferences storage error types.

use thiserror::Error;

/// Failures reading or writing persisted reader preferences.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum PreferencesError {
    #[error("preferences storage is unavailable")]
    Unavailable,

    #[error("preferences io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize preferences: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("failed to parse preferences: {0}")]
    Deserialize(#[from] toml::de::Error),

    #[error("invalid preference value: {value}")]
    InvalidValue { value: String },
}

impl PreferencesError {
    /// Creates invalid value error.
    #[must_use]
    pub fn invalid_value(value: impl Into<String>) -> Self {
        Self::InvalidValue {
            value: value.into(),
        }
    }
}
