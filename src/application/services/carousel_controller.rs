//! Carousel state plus its auto-advance timer.
//!
//! Timer callbacks never touch the state directly. They post a
//! [`CarouselTick`] into a channel that the UI loop drains and hands back to
//! [`CarouselController::handle_tick`], so every mutation stays on the UI
//! task. Each tick carries the generation of the timer that produced it and
//! ticks from a replaced timer are ignored.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, trace};

use super::carousel::{CarouselConfig, CarouselState, TimerKey};
use crate::domain::analytics::AnalyticsEvent;
use crate::domain::entities::Testimonial;
use crate::domain::ports::{AnalyticsPort, SchedulerPort, TimerHandle};

/// Message posted when an auto-advance timer fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarouselTick {
    generation: u64,
}

pub struct CarouselController {
    state: CarouselState,
    scheduler: Arc<dyn SchedulerPort>,
    analytics: Arc<dyn AnalyticsPort>,
    ticks: mpsc::UnboundedSender<CarouselTick>,
    timer: Option<TimerHandle>,
    scheduled_for: Option<TimerKey>,
    generation: u64,
}

impl CarouselController {
    /// Creates the controller and arms the first timer when auto-play applies.
    pub fn new(
        testimonials: Vec<Testimonial>,
        config: CarouselConfig,
        scheduler: Arc<dyn SchedulerPort>,
        analytics: Arc<dyn AnalyticsPort>,
        ticks: mpsc::UnboundedSender<CarouselTick>,
    ) -> Self {
        let mut controller = Self {
            state: CarouselState::new(testimonials, config),
            scheduler,
            analytics,
            ticks,
            timer: None,
            scheduled_for: None,
            generation: 0,
        };
        controller.sync_timer();
        controller
    }

    #[must_use]
    pub const fn state(&self) -> &CarouselState {
        &self.state
    }

    /// Whether an auto-advance timer is outstanding.
    #[must_use]
    pub const fn has_pending_timer(&self) -> bool {
        self.timer.is_some()
    }

    pub fn next(&mut self) -> bool {
        let changed = self.state.next();
        self.after_navigation(changed)
    }

    pub fn previous(&mut self) -> bool {
        let changed = self.state.previous();
        self.after_navigation(changed)
    }

    pub fn jump_to(&mut self, index: usize) -> bool {
        let changed = self.state.jump_to(index);
        self.after_navigation(changed)
    }

    pub fn first(&mut self) -> bool {
        let changed = self.state.first();
        self.after_navigation(changed)
    }

    pub fn last(&mut self) -> bool {
        let changed = self.state.last();
        self.after_navigation(changed)
    }

    pub fn toggle_play(&mut self) -> bool {
        let changed = self.state.toggle_play();
        if changed {
            debug!(playing = self.state.is_playing(), "Carousel auto-play toggled");
            self.sync_timer();
        }
        changed
    }

    pub fn hover_enter(&mut self) -> bool {
        let changed = self.state.hover_enter();
        if changed {
            self.sync_timer();
        }
        changed
    }

    pub fn hover_leave(&mut self) -> bool {
        let changed = self.state.hover_leave();
        if changed {
            self.sync_timer();
        }
        changed
    }

    /// Applies a fired timer. Returns `true` when the carousel advanced.
    pub fn handle_tick(&mut self, tick: CarouselTick) -> bool {
        if tick.generation != self.generation || self.timer.is_none() {
            trace!(
                tick = tick.generation,
                current = self.generation,
                "Ignoring stale carousel tick"
            );
            return false;
        }

        self.timer = None;
        self.scheduled_for = None;

        let advanced = self.state.next();
        if advanced {
            debug!(index = self.state.index(), "Carousel auto-advanced");
        }
        self.sync_timer();
        advanced
    }

    /// Cancels any outstanding timer. Further ticks are ignored.
    pub fn shutdown(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.scheduled_for = None;
        if let Some(timer) = self.timer.take() {
            timer.cancel();
        }
    }

    fn after_navigation(&mut self, changed: bool) -> bool {
        if changed {
            self.analytics.track(&AnalyticsEvent::TestimonialView {
                index: self.state.index(),
                total: self.state.len(),
            });
            self.sync_timer();
        }
        changed
    }

    /// Cancels and re-arms the timer when the state it depends on moved.
    fn sync_timer(&mut self) {
        if !self.state.should_auto_advance() {
            if self.timer.take().is_some() {
                trace!("Carousel timer cancelled");
            }
            self.scheduled_for = None;
            return;
        }

        let key = self.state.timer_key();
        if self.timer.is_some() && self.scheduled_for == Some(key) {
            return;
        }

        if let Some(timer) = self.timer.take() {
            timer.cancel();
        }
        self.generation = self.generation.wrapping_add(1);
        let tick = CarouselTick {
            generation: self.generation,
        };
        let sender = self.ticks.clone();
        let delay = self.state.config().auto_play_interval();

        self.timer = Some(self.scheduler.schedule(
            delay,
            Box::new(move || {
                // The receiver is gone once the UI shut down.
                let _ = sender.send(tick);
            }),
        ));
        self.scheduled_for = Some(key);
        trace!(generation = self.generation, ?delay, "Carousel timer scheduled");
    }
}

impl Drop for CarouselController {
    fn drop(&mut self) {
        self.shutdown();
    }
}
