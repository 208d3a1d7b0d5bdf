mod analytics_port;
mod content_port;
mod document_root_port;
mod preferences_port;
mod scheduler_port;

pub use analytics_port::AnalyticsPort;
pub use content_port::ContentPort;
pub use document_root_port::DocumentRootPort;
pub use preferences_port::{PreferencesPort, TEXT_SIZE_KEY};
pub use scheduler_port::{ScheduledTask, SchedulerPort, TimerHandle};

#[cfg(test)]
pub mod mocks {
    pub use super::analytics_port::MockAnalyticsPort;
    pub use super::document_root_port::mock::MockDocumentRoot;
    pub use super::preferences_port::mock::MockPreferences;
    pub use super::scheduler_port::mock::ManualScheduler;
}
