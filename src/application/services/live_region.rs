//! Status line read out by assistive technology.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

/// How urgently a screen reader should interrupt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Politeness {
    #[default]
    Polite,
    Assertive,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Announcement {
    pub message: String,
    pub politeness: Politeness,
    announced_at: Instant,
}

/// Holds the latest announcement and clears it after `clear_delay`.
///
/// Atomic: a new message replaces the previous one entirely.
#[derive(Debug)]
pub struct LiveRegion {
    current: Option<Announcement>,
    clear_delay: Option<Duration>,
}

impl Default for LiveRegion {
    fn default() -> Self {
        Self::new(Some(Duration::from_secs(3)))
    }
}

impl LiveRegion {
    /// `None` keeps messages until they are replaced.
    #[must_use]
    pub const fn new(clear_delay: Option<Duration>) -> Self {
        Self {
            current: None,
            clear_delay,
        }
    }

    pub fn announce(&mut self, message: impl Into<String>, now: Instant) {
        self.announce_with(message, Politeness::Polite, now);
    }

    pub fn announce_with(&mut self, message: impl Into<String>, politeness: Politeness, now: Instant) {
        let message = message.into();
        if message.is_empty() {
            self.current = None;
            return;
        }
        self.current = Some(Announcement {
            message,
            politeness,
            announced_at: now,
        });
    }

    /// Clears an expired message.
    pub fn tick_at(&mut self, now: Instant) {
        let (Some(delay), Some(current)) = (self.clear_delay, &self.current) else {
            return;
        };
        if now.saturating_duration_since(current.announced_at) >= delay {
            self.current = None;
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        self.current.as_ref().map_or("", |a| a.message.as_str())
    }

    #[must_use]
    pub const fn current(&self) -> Option<&Announcement> {
        self.current.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clears_after_delay() {
        let mut region = LiveRegion::default();
        let start = Instant::now();
        region.announce("Text size changed to Large", start);

        region.tick_at(start + Duration::from_millis(2999));
        assert_eq!(region.message(), "Text size changed to Large");

        region.tick_at(start + Duration::from_secs(3));
        assert_eq!(region.message(), "");
    }

    #[test]
    fn test_new_message_replaces_and_restarts_delay() {
        let mut region = LiveRegion::default();
        let start = Instant::now();
        region.announce("first", start);
        region.announce_with("second", Politeness::Assertive, start + Duration::from_secs(2));

        region.tick_at(start + Duration::from_secs(4));
        let current = region.current().unwrap();
        assert_eq!(current.message, "second");
        assert_eq!(current.politeness, Politeness::Assertive);
    }

    #[test]
    fn test_without_delay_keeps_message() {
        let mut region = LiveRegion::new(None);
        let start = Instant::now();
        region.announce("Auto-play paused", start);
        region.tick_at(start + Duration::from_secs(3600));
        assert_eq!(region.message(), "Auto-play paused");
    }
}
