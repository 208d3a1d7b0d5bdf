//! Reader text size control.
//!
//! Steps through [`TextSize`] levels without wrapping. Every change is
//! persisted, applied to the document root and announced. Storage failures
//! are logged and the control keeps working for the session.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::analytics::AnalyticsEvent;
use crate::domain::entities::TextSize;
use crate::domain::keybinding::Action;
use crate::domain::ports::{AnalyticsPort, DocumentRootPort, PreferencesPort};

pub struct TextSizeControl {
    current: TextSize,
    preferences: Arc<dyn PreferencesPort>,
    document_root: Arc<dyn DocumentRootPort>,
    analytics: Arc<dyn AnalyticsPort>,
    announcement: String,
    persisted: bool,
}

impl TextSizeControl {
    /// Restores the saved level (or `fallback`) and applies it. Nothing is announced.
    pub fn mount(
        fallback: TextSize,
        preferences: Arc<dyn PreferencesPort>,
        document_root: Arc<dyn DocumentRootPort>,
        analytics: Arc<dyn AnalyticsPort>,
    ) -> Self {
        let (current, persisted) = match preferences.get_text_size() {
            Ok(Some(saved)) => {
                debug!(size = %saved, "Restored text size preference");
                (saved, true)
            }
            Ok(None) => (fallback, true),
            Err(e) => {
                warn!(error = %e, "Text size preference unavailable, using session state");
                (fallback, false)
            }
        };

        document_root.apply_font_size(current);

        Self {
            current,
            preferences,
            document_root,
            analytics,
            announcement: String::new(),
            persisted,
        }
    }

    #[must_use]
    pub const fn current(&self) -> TextSize {
        self.current
    }

    #[must_use]
    pub fn announcement(&self) -> &str {
        &self.announcement
    }

    /// Whether the last read or write reached the preferences store.
    #[must_use]
    pub const fn is_persisted(&self) -> bool {
        self.persisted
    }

    #[must_use]
    pub const fn can_increase(&self) -> bool {
        !self.current.is_max()
    }

    #[must_use]
    pub const fn can_decrease(&self) -> bool {
        !self.current.is_min()
    }

    pub fn increase(&mut self) -> bool {
        match self.current.larger() {
            Some(size) => self.set_exact(size),
            None => false,
        }
    }

    pub fn decrease(&mut self) -> bool {
        match self.current.smaller() {
            Some(size) => self.set_exact(size),
            None => false,
        }
    }

    pub fn reset(&mut self) -> bool {
        self.set_exact(TextSize::Normal)
    }

    /// Switches to `size`. Returns `false` when it is already current.
    pub fn set_exact(&mut self, size: TextSize) -> bool {
        if size == self.current {
            return false;
        }

        self.current = size;
        self.persisted = match self.preferences.set_text_size(size) {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, size = %size, "Failed to save text size preference");
                false
            }
        };
        self.document_root.apply_font_size(size);
        self.announcement = format!("Text size changed to {}", size.label());
        self.analytics.track(&AnalyticsEvent::TextSizeChange { size });

        info!(size = %size, "Text size changed");
        true
    }

    /// Keys handled while the control has focus.
    pub fn handle_action(&mut self, action: Action) -> bool {
        match action {
            Action::NavigateUp | Action::NavigateRight | Action::IncreaseTextSize => {
                self.increase()
            }
            Action::NavigateDown | Action::NavigateLeft | Action::DecreaseTextSize => {
                self.decrease()
            }
            Action::SelectFirst | Action::ResetTextSize => self.reset(),
            _ => false,
        }
    }
}
