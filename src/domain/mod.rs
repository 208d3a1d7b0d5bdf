//! Domain layer with core entities and port definitions.

/// Analytics event definitions.
pub mod analytics;
/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Keybinding definitions.
pub mod keybinding;
/// Port definitions.
pub mod ports;

pub use analytics::{AnalyticsEvent, AppointmentSource};
pub use entities::{Testimonial, TextSize};
pub use errors::{ContentError, PreferencesError};
pub use ports::{AnalyticsPort, ContentPort, DocumentRootPort, PreferencesPort, SchedulerPort};
