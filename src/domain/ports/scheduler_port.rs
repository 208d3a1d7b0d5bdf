//! Timer scheduling port.

use std::time::Duration;

/// Callback run once when a scheduled timer fires.
pub type ScheduledTask = Box<dyn FnOnce() + Send + 'static>;

/// Port for one-shot timers.
pub trait SchedulerPort: Send + Sync {
    /// Runs `task` once after `delay`. The timer lives as long as the returned handle.
    fn schedule(&self, delay: Duration, task: ScheduledTask) -> TimerHandle;
}

/// Owner of a scheduled timer. Dropping the handle cancels the timer.
#[must_use = "dropping a TimerHandle cancels the timer"]
pub struct TimerHandle {
    cancel: Option<Box<dyn FnOnce() + Send + 'static>>,
}

impl TimerHandle {
    pub fn new(cancel: impl FnOnce() + Send + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// Cancels the timer. A timer that already fired is unaffected.
    pub fn cancel(mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl std::fmt::Debug for TimerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimerHandle")
            .field("armed", &self.cancel.is_some())
            .finish()
    }
}


#[cfg(test)]
mod tests {
    use super::mock::ManualScheduler;
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_drop_cancels_timer() {
        let scheduler = ManualScheduler::new();
        let fired = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&fired);
        let handle = scheduler.schedule(
            Duration::from_millis(100),
            Box::new(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            }),
        );
        drop(handle);

        scheduler.advance(Duration::from_millis(200));
        assert_eq!(fired.load(Ordering::SeqCst), 0);
        assert_eq!(scheduler.pending_count(), 0);
    }

    #[test]
    fn test_timer_fires_once_when_due() {
        let scheduler = ManualScheduler::new();
        let fired = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&fired);
        let _handle = scheduler.schedule(
            Duration::from_millis(100),
            Box::new(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            }),
        );

        scheduler.advance(Duration::from_millis(99));
        assert_eq!(fired.load(Ordering::SeqCst), 0);

        scheduler.advance(Duration::from_millis(1));
        assert_eq!(fired.load(Ordering::SeqCst), 1);

        scheduler.advance(Duration::from_millis(500));
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }
}
