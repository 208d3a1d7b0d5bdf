//! TOML file preferences storage.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use tracing::debug;

use crate::domain::entities::TextSize;
use crate::domain::errors::PreferencesError;
use crate::domain::ports::{PreferencesPort, TEXT_SIZE_KEY};
use crate::infrastructure::config::write_atomic;

/// Preferences kept as `key = "value"` pairs in a TOML file.
///
/// Unknown keys written by other versions are preserved on save.
pub struct FilePreferencesStore {
    path: Option<PathBuf>,
}

impl FilePreferencesStore {
    /// Creates a store backed by `path`.
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path: Some(path) }
    }

    /// Creates a store without backing file. Every access fails with
    /// [`PreferencesError::Unavailable`].
    #[must_use]
    pub const fn unavailable() -> Self {
        Self { path: None }
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, PreferencesError> {
        let path = self.path.as_ref().ok_or(PreferencesError::Unavailable)?;
        if !path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }
}

impl PreferencesPort for FilePreferencesStore {
    fn get_text_size(&self) -> Result<Option<TextSize>, PreferencesError> {
        let values = self.read_all()?;
        values
            .get(TEXT_SIZE_KEY)
            .map(|raw| raw.parse::<TextSize>())
            .transpose()
    }

    fn set_text_size(&self, size: TextSize) -> Result<(), PreferencesError> {
        let path = self.path.as_ref().ok_or(PreferencesError::Unavailable)?;
        // A corrupt file is replaced rather than blocking the write.
        let mut values = self.read_all().unwrap_or_default();
        values.insert(TEXT_SIZE_KEY.to_string(), size.storage_value().to_string());

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string(&values)?;
        write_atomic(path, &content)?;

        debug!(path = %path.display(), size = %size, "Saved text size preference");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_has_no_preference() {
        let dir = tempdir().unwrap();
        let store = FilePreferencesStore::new(dir.path().join("preferences.toml"));
        assert_eq!(store.get_text_size().unwrap(), None);
    }

    #[test]
    fn test_round_trip_uses_fixed_key() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("preferences.toml");
        let store = FilePreferencesStore::new(path.clone());

        store.set_text_size(TextSize::ExtraLarge).unwrap();
        assert_eq!(store.get_text_size().unwrap(), Some(TextSize::ExtraLarge));

        let content = fs::read_to_string(path).unwrap();
        assert_eq!(content.trim(), r#"gabriel-clinic-text-size = "extra-large""#);
    }

    #[test]
    fn test_other_keys_survive_save() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("preferences.toml");
        fs::write(&path, "theme = \"dark\"\n").unwrap();

        let store = FilePreferencesStore::new(path.clone());
        store.set_text_size(TextSize::Large).unwrap();

        let content = fs::read_to_string(path).unwrap();
        assert!(content.contains("theme = \"dark\""));
    }

    #[test]
    fn test_invalid_value_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("preferences.toml");
        fs::write(&path, "gabriel-clinic-text-size = \"huge\"\n").unwrap();

        let store = FilePreferencesStore::new(path);
        assert!(matches!(
            store.get_text_size(),
            Err(PreferencesError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_unavailable_store_fails() {
        let store = FilePreferencesStore::unavailable();
        assert!(matches!(store.get_text_size(), Err(PreferencesError::Unavailable)));
        assert!(store.set_text_size(TextSize::Large).is_err());
    }
}
