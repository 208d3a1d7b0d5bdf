//! Analytics port definition.

use crate::domain::analytics::AnalyticsEvent;

/// Fire-and-forget analytics sink. Implementations swallow their own failures.
#[cfg_attr(test, mockall::automock)]
pub trait AnalyticsPort: Send + Sync {
    /// Records an interaction.
    fn track(&self, event: &AnalyticsEvent);
}
