//! Tokio-backed timer scheduler.

use std::time::Duration;

use tokio::runtime::Handle;

use crate::domain::ports::{ScheduledTask, SchedulerPort, TimerHandle};

/// Runs each timer as a task sleeping on the tokio clock. Cancelling aborts the task.
#[derive(Debug, Clone)]
pub struct TokioScheduler {
    handle: Handle,
}

impl TokioScheduler {
    /// Uses the runtime of the calling task.
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime.
    #[must_use]
    pub fn current() -> Self {
        Self {
            handle: Handle::current(),
        }
    }

    #[must_use]
    pub const fn with_handle(handle: Handle) -> Self {
        Self { handle }
    }
}

impl SchedulerPort for TokioScheduler {
    fn schedule(&self, delay: Duration, task: ScheduledTask) -> TimerHandle {
        let join = self.handle.spawn(async move {
            tokio::time::sleep(delay).await;
            task();
        });
        TimerHandle::new(move || join.abort())
    }
}
