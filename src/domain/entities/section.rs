//! Page section identifiers and navigation items.

use serde::{Deserialize, Serialize};

/// Anchor identifier of a page section (the `id` a link points at).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionId(pub String);

impl SectionId {
    pub const HERO: &'static str = "hero";
    pub const SERVICES: &'static str = "services";
    pub const TESTIMONIALS: &'static str = "testimonials";
    pub const WHY_US: &'static str = "why-us";
    pub const LOCATIONS: &'static str = "locations";
    pub const CONTACT: &'static str = "contact";
    pub const FOOTER: &'static str = "footer";

    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Parses an in-page link such as `#services`.
    #[must_use]
    pub fn from_href(href: &str) -> Self {
        Self(href.trim_start_matches('#').to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn href(&self) -> String {
        format!("#{}", self.0)
    }
}

impl std::fmt::Display for SectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for SectionId {
    fn from(value: &str) -> Self {
        Self::from_href(value)
    }
}

/// Entry in the navigation bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationItem {
    pub target: SectionId,
    pub label: String,
}

impl NavigationItem {
    #[must_use]
    pub fn new(target: impl Into<SectionId>, label: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            label: label.into(),
        }
    }
}

/// Skip link target. `main-content` resolves to the first section of the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkipLinkTarget {
    pub target: SectionId,
    pub label: String,
}

impl SkipLinkTarget {
    pub const MAIN_CONTENT: &'static str = "main-content";

    #[must_use]
    pub fn new(href: &str, label: impl Into<String>) -> Self {
        Self {
            target: SectionId::from_href(href),
            label: label.into(),
        }
    }

    #[must_use]
    pub fn is_main_content(&self) -> bool {
        self.target.as_str() == Self::MAIN_CONTENT
    }

    #[must_use]
    pub fn defaults() -> Vec<Self> {
        vec![
            Self::new("#main-content", "Skip to main content"),
            Self::new("#services", "Skip to services"),
            Self::new("#testimonials", "Skip to testimonials"),
            Self::new("#contact", "Skip to contact"),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_href_strips_hash() {
        assert_eq!(SectionId::from_href("#services").as_str(), "services");
        assert_eq!(SectionId::from_href("services").as_str(), "services");
        assert_eq!(SectionId::new("why-us").href(), "#why-us");
    }

    #[test]
    fn test_default_skip_links() {
        let links = SkipLinkTarget::defaults();
        assert_eq!(links.len(), 4);
        assert!(links[0].is_main_content());
        assert_eq!(links[3].target.as_str(), SectionId::CONTACT);
    }
}
