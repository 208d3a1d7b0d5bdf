//! Keyboard focus cycling with wrap-around and restoration.

use tracing::trace;

/// Ordered focus targets. Tab and Shift+Tab wrap at both ends.
#[derive(Debug, Clone)]
pub struct FocusManager<T> {
    order: Vec<T>,
    index: usize,
    saved: Option<usize>,
}

impl<T: Copy + PartialEq + std::fmt::Debug> FocusManager<T> {
    #[must_use]
    pub fn new(order: Vec<T>) -> Self {
        Self {
            order,
            index: 0,
            saved: None,
        }
    }

    #[must_use]
    pub fn current(&self) -> Option<T> {
        self.order.get(self.index).copied()
    }

    #[must_use]
    pub fn is_focused(&self, target: T) -> bool {
        self.current() == Some(target)
    }

    pub fn focus_next(&mut self) -> Option<T> {
        if !self.order.is_empty() {
            self.index = (self.index + 1) % self.order.len();
        }
        self.log_current();
        self.current()
    }

    pub fn focus_previous(&mut self) -> Option<T> {
        if !self.order.is_empty() {
            self.index = (self.index + self.order.len() - 1) % self.order.len();
        }
        self.log_current();
        self.current()
    }

    /// Moves focus to `target`. Returns `false` when it is not focusable.
    pub fn focus(&mut self, target: T) -> bool {
        match self.order.iter().position(|t| *t == target) {
            Some(index) => {
                self.index = index;
                self.log_current();
                true
            }
            None => false,
        }
    }

    /// Remembers the current target so [`Self::restore`] can return to it.
    pub fn save(&mut self) {
        self.saved = Some(self.index);
    }

    pub fn restore(&mut self) -> Option<T> {
        if let Some(index) = self.saved.take() {
            self.index = index.min(self.order.len().saturating_sub(1));
        }
        self.current()
    }

    fn log_current(&self) {
        trace!(focus = ?self.current(), "Focus moved");
    }
}
