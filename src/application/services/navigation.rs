//! Navigation bar state.

use crate::domain::entities::{NavigationItem, SectionId};

/// Rows scrolled before the bar switches to its solid "scrolled" style.
pub const SCROLLED_OFFSET: u32 = 3;
/// Rows scrolled before the back-to-top affordance appears.
pub const SCROLL_TOP_OFFSET: u32 = 30;

#[derive(Debug, Clone)]
pub struct NavigationState {
    items: Vec<NavigationItem>,
    active: Option<SectionId>,
    scrolled: bool,
    show_scroll_top: bool,
    menu_open: bool,
}

impl NavigationState {
    #[must_use]
    pub fn new(items: Vec<NavigationItem>) -> Self {
        Self {
            items,
            active: None,
            scrolled: false,
            show_scroll_top: false,
            menu_open: false,
        }
    }

    /// Default items for the clinic page.
    #[must_use]
    pub fn clinic() -> Self {
        Self::new(vec![
            NavigationItem::new(SectionId::HERO, "Home"),
            NavigationItem::new(SectionId::SERVICES, "Services"),
            NavigationItem::new(SectionId::TESTIMONIALS, "Testimonials"),
            NavigationItem::new(SectionId::WHY_US, "Why Us"),
            NavigationItem::new(SectionId::LOCATIONS, "Locations"),
            NavigationItem::new(SectionId::CONTACT, "Contact"),
        ])
    }

    #[must_use]
    pub fn items(&self) -> &[NavigationItem] {
        &self.items
    }

    /// Whether `item` should be rendered as the current location.
    #[must_use]
    pub fn is_current(&self, item: &NavigationItem) -> bool {
        self.active.as_ref() == Some(&item.target)
    }

    #[must_use]
    pub const fn active(&self) -> Option<&SectionId> {
        self.active.as_ref()
    }

    pub fn set_active(&mut self, section: Option<SectionId>) {
        self.active = section;
    }

    pub fn on_scroll(&mut self, scroll_y: u32) {
        self.scrolled = scroll_y > SCROLLED_OFFSET;
        self.show_scroll_top = scroll_y > SCROLL_TOP_OFFSET;
    }

    #[must_use]
    pub const fn is_scrolled(&self) -> bool {
        self.scrolled
    }

    #[must_use]
    pub const fn show_scroll_top(&self) -> bool {
        self.show_scroll_top
    }

    #[must_use]
    pub const fn is_menu_open(&self) -> bool {
        self.menu_open
    }

    pub fn toggle_menu(&mut self) {
        self.menu_open = !self.menu_open;
    }

    /// Escape closes the menu. Returns whether it was open.
    pub fn close_menu(&mut self) -> bool {
        std::mem::replace(&mut self.menu_open, false)
    }

    /// Picks item `index` and closes the menu.
    pub fn select(&mut self, index: usize) -> Option<SectionId> {
        let target = self.items.get(index)?.target.clone();
        self.menu_open = false;
        Some(target)
    }
}
