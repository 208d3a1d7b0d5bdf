//! Infrastructure layer with adapters for the outside world.

/// Analytics sinks.
pub mod analytics;
/// Application configuration.
pub mod config;
/// Page content sources.
pub mod content;
/// External link opening.
pub mod links;
/// Timer scheduling.
pub mod scheduler;
/// Reader preferences storage.
pub mod storage;

pub use analytics::{DisabledAnalytics, JsonLinesAnalytics, TracingAnalytics};
pub use config::{AppConfig, CliArgs, LogLevel, StorageManager};
pub use content::{BundledContent, JsonFileContent};
pub use links::LinkOpener;
pub use scheduler::TokioScheduler;
pub use storage::FilePreferencesStore;
