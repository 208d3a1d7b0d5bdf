//! Scroll spy: which section is in view, how far down the page we are, and
//! which way we are going.
//!
//! Geometry is in page rows. A section is *intersecting* when it overlaps
//! the root (the viewport grown or shrunk by the root margin) and its
//! intersection ratio reaches the threshold. The ratio is the visible share
//! of the section, or the share of the root the section fills when the
//! section is taller than the root.

use std::collections::HashSet;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::trace;

use crate::domain::entities::SectionId;

const DEFAULT_THRESHOLD: f64 = 0.6;

/// Vertical extent of a section in page rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionBounds {
    pub id: SectionId,
    pub top: u32,
    pub height: u32,
}

impl SectionBounds {
    #[must_use]
    pub fn new(id: impl Into<SectionId>, top: u32, height: u32) -> Self {
        Self {
            id: id.into(),
            top,
            height,
        }
    }

    #[must_use]
    pub const fn bottom(&self) -> u32 {
        self.top.saturating_add(self.height)
    }
}

/// Scroll position and sizes of the scrolling surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Viewport {
    pub scroll_y: u32,
    pub height: u32,
    pub document_height: u32,
}

impl Viewport {
    #[must_use]
    pub const fn new(scroll_y: u32, height: u32, document_height: u32) -> Self {
        Self {
            scroll_y,
            height,
            document_height,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid root margin: {0:?}")]
pub struct InvalidRootMargin(String);

/// Root margin in CSS shorthand (`"0px"`, `"-2px 0px"`, `"10px 0 20px 0"`).
/// Only the vertical components matter here. Positive values grow the root.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RootMargin {
    pub top: i32,
    pub bottom: i32,
}

impl FromStr for RootMargin {
    type Err = InvalidRootMargin;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let values = s
            .split_whitespace()
            .map(|part| {
                part.strip_suffix("px")
                    .unwrap_or(part)
                    .parse::<i32>()
                    .map_err(|_| InvalidRootMargin(s.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        match values.as_slice() {
            [all] => Ok(Self {
                top: *all,
                bottom: *all,
            }),
            [vertical, _] => Ok(Self {
                top: *vertical,
                bottom: *vertical,
            }),
            [top, _, bottom] | [top, _, bottom, _] => Ok(Self {
                top: *top,
                bottom: *bottom,
            }),
            _ => Err(InvalidRootMargin(s.to_string())),
        }
    }
}

impl TryFrom<String> for RootMargin {
    type Error = InvalidRootMargin;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<RootMargin> for String {
    fn from(margin: RootMargin) -> Self {
        format!("{}px 0px {}px 0px", margin.top, margin.bottom)
    }
}

/// How to choose the active section when several intersect.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActiveSectionPolicy {
    /// The section that most recently started intersecting wins. Sections
    /// that start together are observed in page order.
    #[default]
    LastObserved,
    /// The intersecting section whose top is closest to the top of the root wins.
    NearestTop,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScrollDirection {
    Up,
    #[default]
    Down,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollSpyConfig {
    pub threshold: f64,
    pub root_margin: RootMargin,
    pub policy: ActiveSectionPolicy,
}

impl Default for ScrollSpyConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            root_margin: RootMargin::default(),
            policy: ActiveSectionPolicy::default(),
        }
    }
}

/// Scroll progress `scroll_y / (document_height - viewport_height)` clamped to `[0, 1]`.
#[must_use]
pub fn scroll_progress(scroll_y: f64, document_height: f64, viewport_height: f64) -> f64 {
    let range = document_height - viewport_height;
    if !range.is_finite() || range <= 0.0 || !scroll_y.is_finite() {
        return 0.0;
    }
    (scroll_y / range).clamp(0.0, 1.0)
}

#[derive(Debug, Clone)]
pub struct ScrollSpy {
    config: ScrollSpyConfig,
    sections: Vec<SectionBounds>,
    intersecting: HashSet<SectionId>,
    active: Option<SectionId>,
    last_scroll_y: Option<u32>,
    direction: ScrollDirection,
    progress: f64,
}

impl ScrollSpy {
    #[must_use]
    pub fn new(config: ScrollSpyConfig) -> Self {
        Self {
            config,
            sections: Vec::new(),
            intersecting: HashSet::new(),
            active: None,
            last_scroll_y: None,
            direction: ScrollDirection::default(),
            progress: 0.0,
        }
    }

    /// Replaces the observed sections, e.g. after a relayout.
    pub fn set_sections(&mut self, sections: Vec<SectionBounds>) {
        let ids: HashSet<_> = sections.iter().map(|s| s.id.clone()).collect();
        self.intersecting.retain(|id| ids.contains(id));
        self.sections = sections;
    }

    #[must_use]
    pub fn sections(&self) -> &[SectionBounds] {
        &self.sections
    }

    #[must_use]
    pub const fn active(&self) -> Option<&SectionId> {
        self.active.as_ref()
    }

    #[must_use]
    pub const fn direction(&self) -> ScrollDirection {
        self.direction
    }

    #[must_use]
    pub const fn progress(&self) -> f64 {
        self.progress
    }

    /// Intersection ratio of `section` against the root for `viewport`.
    #[must_use]
    pub fn intersection_ratio(&self, section: &SectionBounds, viewport: Viewport) -> f64 {
        let (root_top, root_bottom) = self.root_extent(viewport);
        let top = i64::from(section.top);
        let bottom = i64::from(section.bottom());

        let overlap = (bottom.min(root_bottom) - top.max(root_top)).max(0);
        if section.height == 0 {
            return if top >= root_top && top <= root_bottom {
                1.0
            } else {
                0.0
            };
        }

        #[allow(clippy::cast_precision_loss)]
        let own = overlap as f64 / f64::from(section.height);
        let root_height = root_bottom - root_top;
        #[allow(clippy::cast_precision_loss)]
        let of_root = if root_height > 0 {
            overlap as f64 / root_height as f64
        } else {
            0.0
        };
        own.max(of_root)
    }

    /// Feeds a new scroll position. Returns `true` when the active section changed.
    pub fn observe(&mut self, viewport: Viewport) -> bool {
        if let Some(last) = self.last_scroll_y {
            match viewport.scroll_y.cmp(&last) {
                std::cmp::Ordering::Greater => self.direction = ScrollDirection::Down,
                std::cmp::Ordering::Less => self.direction = ScrollDirection::Up,
                std::cmp::Ordering::Equal => {}
            }
        }
        self.last_scroll_y = Some(viewport.scroll_y);
        self.progress = scroll_progress(
            f64::from(viewport.scroll_y),
            f64::from(viewport.document_height),
            f64::from(viewport.height),
        );

        let mut newly_intersecting = Vec::new();
        let mut now_intersecting = HashSet::new();
        for section in &self.sections {
            let ratio = self.intersection_ratio(section, viewport);
            if ratio > 0.0 && ratio >= self.config.threshold {
                if !self.intersecting.contains(&section.id) {
                    newly_intersecting.push(section.id.clone());
                }
                now_intersecting.insert(section.id.clone());
            }
        }
        self.intersecting = now_intersecting;

        let candidate = match self.config.policy {
            ActiveSectionPolicy::LastObserved => newly_intersecting.pop(),
            ActiveSectionPolicy::NearestTop => self.nearest_top(viewport),
        };

        match candidate {
            Some(id) if self.active.as_ref() != Some(&id) => {
                trace!(section = %id, "Active section changed");
                self.active = Some(id);
                true
            }
            _ => false,
        }
    }

    fn nearest_top(&self, viewport: Viewport) -> Option<SectionId> {
        let (root_top, _) = self.root_extent(viewport);
        self.sections
            .iter()
            .filter(|s| self.intersecting.contains(&s.id))
            .min_by_key(|s| (i64::from(s.top) - root_top).abs())
            .map(|s| s.id.clone())
    }

    fn root_extent(&self, viewport: Viewport) -> (i64, i64) {
        let top = i64::from(viewport.scroll_y) - i64::from(self.config.root_margin.top);
        let bottom = i64::from(viewport.scroll_y)
            + i64::from(viewport.height)
            + i64::from(self.config.root_margin.bottom);
        (top, bottom.max(top))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn page() -> Vec<SectionBounds> {
        vec![
            SectionBounds::new("hero", 0, 20),
            SectionBounds::new("services", 20, 30),
            SectionBounds::new("testimonials", 50, 20),
            SectionBounds::new("contact", 70, 10),
        ]
    }

    fn spy(policy: ActiveSectionPolicy) -> ScrollSpy {
        let mut spy = ScrollSpy::new(ScrollSpyConfig {
            policy,
            ..ScrollSpyConfig::default()
        });
        spy.set_sections(page());
        spy
    }

    #[test_case(-50.0, 0.0 ; "above_top")]
    #[test_case(0.0, 0.0 ; "top")]
    #[test_case(30.0, 0.5 ; "middle")]
    #[test_case(60.0, 1.0 ; "bottom")]
    #[test_case(500.0, 1.0 ; "past_bottom")]
    #[test_case(f64::NAN, 0.0 ; "nan")]
    fn test_progress_is_clamped(scroll_y: f64, expected: f64) {
        let progress = scroll_progress(scroll_y, 80.0, 20.0);
        assert!((0.0..=1.0).contains(&progress));
        assert!((progress - expected).abs() < f64::EPSILON);
    }

    #[test]
    fn test_progress_zero_when_page_fits() {
        assert!(scroll_progress(10.0, 20.0, 40.0).abs() < f64::EPSILON);
        assert!(scroll_progress(10.0, 20.0, 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_initial_observation_picks_visible_section() {
        let mut spy = spy(ActiveSectionPolicy::LastObserved);
        assert!(spy.observe(Viewport::new(0, 20, 80)));
        assert_eq!(spy.active().map(SectionId::as_str), Some("hero"));
        assert!(!spy.observe(Viewport::new(0, 20, 80)));
    }

    #[test]
    fn test_tall_section_counts_when_it_fills_root() {
        let mut spy = spy(ActiveSectionPolicy::LastObserved);
        spy.observe(Viewport::new(0, 20, 80));
        // Services is taller than the viewport and covers it fully.
        assert!(spy.observe(Viewport::new(25, 20, 80)));
        assert_eq!(spy.active().map(SectionId::as_str), Some("services"));
    }

    #[test]
    fn test_last_observed_wins_among_simultaneous() {
        // A tall viewport shows testimonials and contact completely.
        let mut spy = spy(ActiveSectionPolicy::LastObserved);
        spy.observe(Viewport::new(50, 30, 80));
        assert_eq!(spy.active().map(SectionId::as_str), Some("contact"));
    }

    #[test]
    fn test_nearest_top_prefers_upper_section() {
        let mut spy = spy(ActiveSectionPolicy::NearestTop);
        spy.observe(Viewport::new(50, 30, 80));
        assert_eq!(spy.active().map(SectionId::as_str), Some("testimonials"));
    }

    #[test]
    fn test_active_kept_when_nothing_intersects_enough() {
        let mut spy = spy(ActiveSectionPolicy::LastObserved);
        spy.observe(Viewport::new(0, 20, 80));
        // Half of hero and a third of services: neither reaches 0.6.
        assert!(!spy.observe(Viewport::new(10, 20, 80)));
        assert_eq!(spy.active().map(SectionId::as_str), Some("hero"));
    }

    #[test]
    fn test_direction_follows_delta_sign() {
        let mut spy = spy(ActiveSectionPolicy::LastObserved);
        spy.observe(Viewport::new(10, 20, 80));
        spy.observe(Viewport::new(20, 20, 80));
        assert_eq!(spy.direction(), ScrollDirection::Down);
        spy.observe(Viewport::new(5, 20, 80));
        assert_eq!(spy.direction(), ScrollDirection::Up);
        spy.observe(Viewport::new(5, 20, 80));
        assert_eq!(spy.direction(), ScrollDirection::Up);
    }

    #[test]
    fn test_root_margin_shrinks_root() {
        let mut spy = ScrollSpy::new(ScrollSpyConfig {
            root_margin: "-5px 0px".parse().unwrap(),
            ..ScrollSpyConfig::default()
        });
        let section = SectionBounds::new("hero", 0, 10);
        // Root is rows 5..15, half of the section is inside.
        let ratio = spy.intersection_ratio(&section, Viewport::new(0, 20, 80));
        assert!((ratio - 0.5).abs() < f64::EPSILON);
        spy.set_sections(vec![section]);
        assert!(!spy.observe(Viewport::new(0, 20, 80)));
    }

    #[test_case("0px", 0, 0 ; "single")]
    #[test_case("-10px 0px", -10, -10 ; "pair")]
    #[test_case("5px 0 -3px", 5, -3 ; "triple")]
    #[test_case("1px 2px 3px 4px", 1, 3 ; "quad")]
    fn test_parse_root_margin(raw: &str, top: i32, bottom: i32) {
        assert_eq!(raw.parse::<RootMargin>().unwrap(), RootMargin { top, bottom });
    }

    #[test_case("" ; "empty")]
    #[test_case("10%" ; "percent")]
    #[test_case("1px 2px 3px 4px 5px" ; "too_many")]
    fn test_reject_root_margin(raw: &str) {
        assert!(raw.parse::<RootMargin>().is_err());
    }

    #[test]
    fn test_config_from_toml() {
        let config: ScrollSpyConfig =
            toml::from_str("threshold = 0.3\nroot_margin = \"-2px 0px\"\npolicy = \"nearest-top\"")
                .unwrap();
        assert!((config.threshold - 0.3).abs() < f64::EPSILON);
        assert_eq!(config.root_margin, RootMargin { top: -2, bottom: -2 });
        assert_eq!(config.policy, ActiveSectionPolicy::NearestTop);
    }
}
