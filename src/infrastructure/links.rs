//! Opens external links (maps, phone numbers) with the system handler.

use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, Default)]
pub struct LinkOpener {
    enabled: bool,
}

impl LinkOpener {
    #[must_use]
    pub const fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Hands `url` to the platform opener on a blocking thread.
    pub fn open(&self, url: impl Into<String>) {
        let url = url.into();
        if !self.enabled {
            debug!(%url, "Link opening disabled");
            return;
        }

        tokio::task::spawn_blocking(move || {
            if let Err(e) = opener::open(&url) {
                warn!(error = %e, %url, "Failed to open link");
            }
        });
    }
}
