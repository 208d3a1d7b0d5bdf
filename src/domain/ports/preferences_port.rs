//! Reader preferences port definition.

use crate::domain::entities::TextSize;
use crate::domain::errors::PreferencesError;

/// Key under which the text size is persisted.
pub const TEXT_SIZE_KEY: &str = "gabriel-clinic-text-size";

/// Port for persisted reader preferences.
pub trait PreferencesPort: Send + Sync {
    /// Reads the saved text size, `None` when nothing has been saved.
    fn get_text_size(&self) -> Result<Option<TextSize>, PreferencesError>;

    /// Persists the text size.
    fn set_text_size(&self, size: TextSize) -> Result<(), PreferencesError>;
}
