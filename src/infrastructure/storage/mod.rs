//! Reader preferences storage adapters.

mod preferences_file_store;

pub use preferences_file_store::FilePreferencesStore;
