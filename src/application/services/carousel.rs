//! Testimonial carousel state machine.
//!
//! Shows one testimonial at a time from a fixed list. The state is pure and
//! in-memory; timers live in [`super::carousel_controller::CarouselController`].

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::entities::Testimonial;

/// Text shown instead of the carousel when there is nothing to display.
pub const EMPTY_CAROUSEL_MESSAGE: &str = "No testimonials available.";

const DEFAULT_AUTO_PLAY_INTERVAL_MS: u64 = 8000;
/// Shorter intervals are raised to this floor.
pub const MIN_AUTO_PLAY_INTERVAL_MS: u64 = 1000;

/// Carousel behaviour switches.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarouselConfig {
    /// Delay between automatic advances, in milliseconds.
    pub auto_play_interval_ms: u64,
    pub enable_auto_play: bool,
    pub pause_on_hover: bool,
    pub enable_keyboard: bool,
    /// Wrap around at both ends.
    #[serde(rename = "loop")]
    pub looping: bool,
}

impl CarouselConfig {
    #[must_use]
    pub const fn auto_play_interval(&self) -> Duration {
        let ms = if self.auto_play_interval_ms < MIN_AUTO_PLAY_INTERVAL_MS {
            MIN_AUTO_PLAY_INTERVAL_MS
        } else {
            self.auto_play_interval_ms
        };
        Duration::from_millis(ms)
    }
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            auto_play_interval_ms: DEFAULT_AUTO_PLAY_INTERVAL_MS,
            enable_auto_play: true,
            pause_on_hover: true,
            enable_keyboard: true,
            looping: true,
        }
    }
}

/// Direction of the most recent slide change, used by the transition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SlideDirection {
    #[default]
    Next,
    Previous,
}

/// The parts of the state that drive the auto-advance timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerKey {
    pub index: usize,
    pub playing: bool,
    pub paused_by_hover: bool,
}

#[derive(Debug, Clone)]
pub struct CarouselState {
    testimonials: Vec<Testimonial>,
    config: CarouselConfig,
    index: usize,
    playing: bool,
    paused_by_hover: bool,
    direction: SlideDirection,
    announcement: String,
}

impl CarouselState {
    #[must_use]
    pub fn new(testimonials: Vec<Testimonial>, config: CarouselConfig) -> Self {
        let playing = config.enable_auto_play;
        Self {
            testimonials,
            config,
            index: 0,
            playing,
            paused_by_hover: false,
            direction: SlideDirection::Next,
            announcement: String::new(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.testimonials.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.testimonials.is_empty()
    }

    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub const fn is_playing(&self) -> bool {
        self.playing
    }

    #[must_use]
    pub const fn is_paused_by_hover(&self) -> bool {
        self.paused_by_hover
    }

    #[must_use]
    pub const fn direction(&self) -> SlideDirection {
        self.direction
    }

    #[must_use]
    pub const fn config(&self) -> &CarouselConfig {
        &self.config
    }

    #[must_use]
    pub fn testimonials(&self) -> &[Testimonial] {
        &self.testimonials
    }

    #[must_use]
    pub fn current(&self) -> Option<&Testimonial> {
        self.testimonials.get(self.index)
    }

    /// Latest assistive-technology announcement.
    #[must_use]
    pub fn announcement(&self) -> &str {
        &self.announcement
    }

    /// Visible position, e.g. "2 of 7". Empty when there is nothing to show.
    #[must_use]
    pub fn position_label(&self) -> String {
        if self.is_empty() {
            String::new()
        } else {
            format!("{} of {}", self.index + 1, self.len())
        }
    }

    #[must_use]
    pub const fn timer_key(&self) -> TimerKey {
        TimerKey {
            index: self.index,
            playing: self.playing,
            paused_by_hover: self.paused_by_hover,
        }
    }

    /// Whether the "next" control is enabled.
    #[must_use]
    pub fn can_go_next(&self) -> bool {
        self.len() > 1 && (self.config.looping || self.index < self.len() - 1)
    }

    /// Whether the "previous" control is enabled.
    #[must_use]
    pub fn can_go_previous(&self) -> bool {
        self.len() > 1 && (self.config.looping || self.index > 0)
    }

    /// Whether the play/pause control exists and is enabled.
    #[must_use]
    pub fn can_toggle_play(&self) -> bool {
        self.config.enable_auto_play && !self.is_empty()
    }

    /// Whether an auto-advance timer should be running.
    #[must_use]
    pub fn should_auto_advance(&self) -> bool {
        self.config.enable_auto_play && self.playing && !self.paused_by_hover && self.can_go_next()
    }

    /// Advances one item. Returns `false` when the control is disabled.
    pub fn next(&mut self) -> bool {
        if !self.can_go_next() {
            return false;
        }
        let target = if self.config.looping {
            (self.index + 1) % self.len()
        } else {
            (self.index + 1).min(self.len() - 1)
        };
        self.show(target, SlideDirection::Next);
        true
    }

    /// Goes back one item. Returns `false` when the control is disabled.
    pub fn previous(&mut self) -> bool {
        if !self.can_go_previous() {
            return false;
        }
        let target = if self.config.looping {
            (self.index + self.len() - 1) % self.len()
        } else {
            self.index.saturating_sub(1)
        };
        self.show(target, SlideDirection::Previous);
        true
    }

    /// Shows item `index`. Returns `false` for an out-of-range index.
    pub fn jump_to(&mut self, index: usize) -> bool {
        if index >= self.len() {
            return false;
        }
        let direction = if index >= self.index {
            SlideDirection::Next
        } else {
            SlideDirection::Previous
        };
        self.show(index, direction);
        true
    }

    pub fn first(&mut self) -> bool {
        self.jump_to(0)
    }

    pub fn last(&mut self) -> bool {
        match self.len() {
            0 => false,
            n => self.jump_to(n - 1),
        }
    }

    /// Flips auto-play. The index is left alone.
    pub fn toggle_play(&mut self) -> bool {
        if !self.can_toggle_play() {
            return false;
        }
        self.announcement = if self.playing {
            "Auto-play paused".to_string()
        } else {
            "Auto-play resumed".to_string()
        };
        self.playing = !self.playing;
        true
    }

    /// Pointer entered the carousel. Suspends the timer without touching `playing`.
    pub fn hover_enter(&mut self) -> bool {
        if !self.config.pause_on_hover || self.paused_by_hover {
            return false;
        }
        self.paused_by_hover = true;
        true
    }

    pub fn hover_leave(&mut self) -> bool {
        if !self.config.pause_on_hover || !self.paused_by_hover {
            return false;
        }
        self.paused_by_hover = false;
        true
    }

    fn show(&mut self, index: usize, direction: SlideDirection) {
        self.index = index;
        self.direction = direction;
        if let Some(current) = self.testimonials.get(index) {
            self.announcement = format!(
                "Showing testimonial {} of {}. {}",
                index + 1,
                self.testimonials.len(),
                current.patient_name
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::fixtures::testimonials;
    use test_case::test_case;

    fn carousel(count: usize, looping: bool) -> CarouselState {
        CarouselState::new(
            testimonials(count),
            CarouselConfig {
                looping,
                ..CarouselConfig::default()
            },
        )
    }

    #[test]
    fn test_initial_state() {
        let state = carousel(3, true);
        assert_eq!(state.index(), 0);
        assert!(state.is_playing());
        assert!(!state.is_paused_by_hover());

        let config = CarouselConfig {
            enable_auto_play: false,
            ..CarouselConfig::default()
        };
        let state = CarouselState::new(testimonials(3), config);
        assert!(!state.is_playing());
    }

    #[test]
    fn test_index_stays_in_bounds_for_mixed_sequences() {
        for count in 1..=6 {
            for looping in [true, false] {
                let mut state = carousel(count, looping);
                // Deterministic pseudo-random walk over next/previous.
                let mut seed: u32 = 0x9E37_79B9 ^ u32::try_from(count).unwrap();
                for _ in 0..200 {
                    seed = seed.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
                    if seed & 0x100 == 0 {
                        state.next();
                    } else {
                        state.previous();
                    }
                    assert!(state.index() < count);
                }
            }
        }
    }

    #[test]
    fn test_no_loop_next_at_end_is_noop() {
        let mut state = carousel(3, false);
        state.jump_to(2);
        assert!(!state.can_go_next());
        assert!(!state.next());
        assert_eq!(state.index(), 2);
    }

    #[test]
    fn test_no_loop_previous_at_start_is_noop() {
        let mut state = carousel(3, false);
        assert!(!state.can_go_previous());
        assert!(!state.previous());
        assert_eq!(state.index(), 0);
    }

    #[test_case(0 ; "from_first")]
    #[test_case(2 ; "from_middle")]
    #[test_case(4 ; "from_last")]
    fn test_loop_returns_after_n_nexts(start: usize) {
        let mut state = carousel(5, true);
        state.jump_to(start);
        for _ in 0..5 {
            assert!(state.next());
        }
        assert_eq!(state.index(), start);
    }

    #[test]
    fn test_loop_previous_wraps_to_last() {
        let mut state = carousel(4, true);
        assert!(state.previous());
        assert_eq!(state.index(), 3);
        assert_eq!(state.direction(), SlideDirection::Previous);
    }

    #[test]
    fn test_jump_to_then_read() {
        let mut state = carousel(5, false);
        assert!(state.jump_to(3));
        assert_eq!(state.index(), 3);
        assert!(!state.jump_to(5));
        assert_eq!(state.index(), 3);
    }

    #[test]
    fn test_first_and_last() {
        let mut state = carousel(4, false);
        assert!(state.last());
        assert_eq!(state.index(), 3);
        assert!(state.first());
        assert_eq!(state.index(), 0);
    }

    #[test]
    fn test_announcement_format() {
        let mut state = carousel(3, true);
        state.next();
        assert_eq!(
            state.announcement(),
            "Showing testimonial 2 of 3. Patient 2"
        );
        assert_eq!(state.position_label(), "2 of 3");
    }

    #[test]
    fn test_toggle_play_announces_and_keeps_index() {
        let mut state = carousel(3, true);
        state.jump_to(1);

        assert!(state.toggle_play());
        assert!(!state.is_playing());
        assert_eq!(state.announcement(), "Auto-play paused");
        assert_eq!(state.index(), 1);

        assert!(state.toggle_play());
        assert!(state.is_playing());
        assert_eq!(state.announcement(), "Auto-play resumed");
    }

    #[test]
    fn test_toggle_unavailable_without_auto_play() {
        let config = CarouselConfig {
            enable_auto_play: false,
            ..CarouselConfig::default()
        };
        let mut state = CarouselState::new(testimonials(3), config);
        assert!(!state.can_toggle_play());
        assert!(!state.toggle_play());
    }

    #[test]
    fn test_hover_suspends_without_stopping_play() {
        let mut state = carousel(3, true);
        assert!(state.hover_enter());
        assert!(state.is_playing());
        assert!(!state.should_auto_advance());

        assert!(state.hover_leave());
        assert!(state.should_auto_advance());
    }

    #[test]
    fn test_hover_ignored_when_not_configured() {
        let config = CarouselConfig {
            pause_on_hover: false,
            ..CarouselConfig::default()
        };
        let mut state = CarouselState::new(testimonials(3), config);
        assert!(!state.hover_enter());
        assert!(state.should_auto_advance());
    }

    #[test]
    fn test_empty_list_disables_everything() {
        let mut state = carousel(0, true);
        assert!(state.is_empty());
        assert!(state.current().is_none());
        assert!(!state.can_go_next());
        assert!(!state.can_go_previous());
        assert!(!state.can_toggle_play());
        assert!(!state.should_auto_advance());
        assert!(!state.next());
        assert!(!state.previous());
        assert!(!state.last());
        assert_eq!(state.position_label(), "");
    }

    #[test_case(true ; "looping")]
    #[test_case(false ; "not_looping")]
    fn test_single_item_disables_navigation(looping: bool) {
        let mut state = carousel(1, looping);
        assert!(!state.can_go_next());
        assert!(!state.can_go_previous());
        assert!(!state.should_auto_advance());
        assert!(!state.next());
        assert_eq!(state.index(), 0);
    }

    #[test]
    fn test_config_deserializes_loop_key() {
        let config: CarouselConfig = toml::from_str("loop = false\nauto_play_interval_ms = 5000").unwrap();
        assert!(!config.looping);
        assert_eq!(config.auto_play_interval(), Duration::from_secs(5));
        assert!(config.enable_auto_play);
    }

    #[test_case(0, 1000 ; "zero")]
    #[test_case(250, 1000 ; "below_floor")]
    #[test_case(1000, 1000 ; "at_floor")]
    #[test_case(8000, 8000 ; "default")]
    fn test_auto_play_interval_has_floor(configured: u64, expected_ms: u64) {
        let config = CarouselConfig {
            auto_play_interval_ms: configured,
            ..CarouselConfig::default()
        };
        assert_eq!(config.auto_play_interval(), Duration::from_millis(expected_ms));
    }
}
