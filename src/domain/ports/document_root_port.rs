//! Document root port definition.

use crate::domain::entities::TextSize;

/// Port for the surface whose base font size follows the text size preference.
pub trait DocumentRootPort: Send + Sync {
    /// Applies the base font size of `size`.
    fn apply_font_size(&self, size: TextSize);
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockDocumentRoot {
        pub applied: Mutex<Vec<TextSize>>,
    }

    impl MockDocumentRoot {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn last(&self) -> Option<TextSize> {
            self.applied.lock().unwrap().last().copied()
        }
    }

    impl DocumentRootPort for MockDocumentRoot {
        fn apply_font_size(&self, size: TextSize) {
            self.applied.lock().unwrap().push(size);
        }
    }
}
