//! Content loading DTOs.

use crate::domain::entities::ClinicContent;

/// Where the page content came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentOrigin {
    /// User-supplied content file.
    File,
    /// Content compiled into the binary.
    Bundled,
}

impl ContentOrigin {
    /// Returns human-readable description.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::File => "content file",
            Self::Bundled => "bundled content",
        }
    }
}

impl std::fmt::Display for ContentOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// Validated content with its origin.
#[derive(Debug, Clone)]
pub struct LoadedContent {
    /// Page content.
    pub content: ClinicContent,
    /// Source of the content.
    pub origin: ContentOrigin,
}
