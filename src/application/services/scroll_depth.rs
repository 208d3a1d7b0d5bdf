//! Scroll depth milestones for analytics.

use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::debug;

use super::scroll_spy::Viewport;
use crate::domain::analytics::AnalyticsEvent;
use crate::domain::ports::AnalyticsPort;

/// Milestones reported once per session, in percent.
pub const DEPTH_THRESHOLDS: [u8; 5] = [25, 50, 75, 90, 100];

/// Quiet period after the last scroll before depth is evaluated.
pub const SCROLL_DEBOUNCE: Duration = Duration::from_millis(200);

/// Bottom edge of the viewport as a percentage of the document height.
#[must_use]
pub fn scroll_depth_percent(viewport: Viewport) -> f64 {
    if viewport.document_height == 0 {
        return 0.0;
    }
    let seen = f64::from(viewport.scroll_y) + f64::from(viewport.height);
    (seen / f64::from(viewport.document_height) * 100.0).clamp(0.0, 100.0)
}

pub struct ScrollDepthTracker {
    analytics: Arc<dyn AnalyticsPort>,
    reached: BTreeSet<u8>,
    pending: Option<(Viewport, Instant)>,
}

impl ScrollDepthTracker {
    pub fn new(analytics: Arc<dyn AnalyticsPort>) -> Self {
        Self {
            analytics,
            reached: BTreeSet::new(),
            pending: None,
        }
    }

    /// Records a scroll. Evaluation waits for [`SCROLL_DEBOUNCE`] of quiet.
    pub fn on_scroll(&mut self, viewport: Viewport, now: Instant) {
        self.pending = Some((viewport, now));
    }

    /// Evaluates the pending scroll once it has settled. Returns newly reached milestones.
    pub fn tick_at(&mut self, now: Instant) -> Vec<u8> {
        match self.pending {
            Some((viewport, at)) if now.saturating_duration_since(at) >= SCROLL_DEBOUNCE => {
                self.pending = None;
                self.evaluate(viewport)
            }
            _ => Vec::new(),
        }
    }

    /// Evaluates `viewport` immediately, e.g. on first render.
    pub fn evaluate(&mut self, viewport: Viewport) -> Vec<u8> {
        let depth = scroll_depth_percent(viewport);
        let crossed: Vec<u8> = DEPTH_THRESHOLDS
            .into_iter()
            .filter(|threshold| depth >= f64::from(*threshold) && !self.reached.contains(threshold))
            .collect();

        for percent in &crossed {
            self.reached.insert(*percent);
            debug!(percent, "Scroll depth reached");
            self.analytics
                .track(&AnalyticsEvent::ScrollDepth { percent: *percent });
        }
        crossed
    }

    #[must_use]
    pub fn reached(&self) -> Vec<u8> {
        self.reached.iter().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::mocks::MockAnalyticsPort;

    fn tracker(expected_events: usize) -> ScrollDepthTracker {
        let mut analytics = MockAnalyticsPort::new();
        analytics
            .expect_track()
            .withf(|event| matches!(event, AnalyticsEvent::ScrollDepth { .. }))
            .times(expected_events)
            .return_const(());
        ScrollDepthTracker::new(Arc::new(analytics))
    }

    #[test]
    fn test_depth_percent() {
        assert!((scroll_depth_percent(Viewport::new(0, 25, 100)) - 25.0).abs() < f64::EPSILON);
        assert!((scroll_depth_percent(Viewport::new(90, 25, 100)) - 100.0).abs() < f64::EPSILON);
        assert!(scroll_depth_percent(Viewport::new(10, 10, 0)).abs() < f64::EPSILON);
    }

    #[test]
    fn test_each_threshold_fires_once() {
        let mut tracker = tracker(3);
        assert_eq!(tracker.evaluate(Viewport::new(30, 20, 100)), vec![25, 50]);
        assert!(tracker.evaluate(Viewport::new(0, 20, 100)).is_empty());
        assert!(tracker.evaluate(Viewport::new(30, 20, 100)).is_empty());
        assert_eq!(tracker.evaluate(Viewport::new(60, 20, 100)), vec![75]);
        assert_eq!(tracker.reached(), vec![25, 50, 75]);
    }

    #[test]
    fn test_jump_to_bottom_reports_all() {
        let mut tracker = tracker(5);
        assert_eq!(
            tracker.evaluate(Viewport::new(80, 20, 100)),
            DEPTH_THRESHOLDS.to_vec()
        );
    }

    #[test]
    fn test_debounce_waits_for_quiet() {
        let mut tracker = tracker(1);
        let start = Instant::now();

        tracker.on_scroll(Viewport::new(10, 20, 100), start);
        assert!(tracker.tick_at(start + Duration::from_millis(100)).is_empty());

        // A newer scroll restarts the quiet period.
        tracker.on_scroll(Viewport::new(20, 20, 100), start + Duration::from_millis(150));
        assert!(tracker.tick_at(start + Duration::from_millis(250)).is_empty());
        assert_eq!(tracker.tick_at(start + Duration::from_millis(350)), vec![25]);
        assert!(tracker.tick_at(start + Duration::from_millis(900)).is_empty());
    }
}
