//! Skip links, visible only while they hold focus.

use crate::domain::entities::SkipLinkTarget;
use crate::presentation::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

const SEPARATOR: &str = "  ";

#[derive(Debug, Clone)]
pub struct SkipLinksState {
    links: Vec<SkipLinkTarget>,
    selected: usize,
}

impl SkipLinksState {
    #[must_use]
    pub const fn new(links: Vec<SkipLinkTarget>) -> Self {
        Self { links, selected: 0 }
    }

    #[must_use]
    pub fn links(&self) -> &[SkipLinkTarget] {
        &self.links
    }

    #[must_use]
    pub const fn selected_index(&self) -> usize {
        self.selected
    }

    #[must_use]
    pub fn selected(&self) -> Option<&SkipLinkTarget> {
        self.links.get(self.selected)
    }

    pub fn select_next(&mut self) {
        if !self.links.is_empty() {
            self.selected = (self.selected + 1) % self.links.len();
        }
    }

    pub fn select_previous(&mut self) {
        if !self.links.is_empty() {
            self.selected = self
                .selected
                .checked_sub(1)
                .unwrap_or(self.links.len() - 1);
        }
    }

    pub fn select(&mut self, index: usize) {
        if index < self.links.len() {
            self.selected = index;
        }
    }
}

impl Default for SkipLinksState {
    fn default() -> Self {
        Self::new(SkipLinkTarget::defaults())
    }
}

pub struct SkipLinks<'a> {
    state: &'a SkipLinksState,
    focused: bool,
    theme: Theme,
}

impl<'a> SkipLinks<'a> {
    #[must_use]
    pub fn new(state: &'a SkipLinksState) -> Self {
        Self {
            state,
            focused: false,
            theme: Theme::default(),
        }
    }

    #[must_use]
    pub const fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    #[must_use]
    pub const fn theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Rows needed: one while focused, none otherwise.
    #[must_use]
    pub const fn height(&self) -> u16 {
        if self.focused { 1 } else { 0 }
    }

    /// Cell range of each link label.
    #[allow(clippy::cast_possible_truncation)]
    #[must_use]
    pub fn layout(&self, area: Rect) -> Vec<Rect> {
        if !self.focused {
            return Vec::new();
        }
        let mut x = area.x;
        self.state
            .links()
            .iter()
            .map(|link| {
                let width = link.label.width() as u16 + 2;
                let rect = Rect::new(x, area.y, width, 1).intersection(area);
                x = x.saturating_add(width + SEPARATOR.width() as u16);
                rect
            })
            .collect()
    }
}

impl Widget for &SkipLinks<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if !self.focused || area.is_empty() {
            return;
        }

        let mut spans = Vec::new();
        for (i, link) in self.state.links().iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(SEPARATOR));
            }
            let style = if i == self.state.selected_index() {
                self.theme.focus_style
            } else {
                self.theme.selection_style
            };
            spans.push(Span::styled(format!(" {} ", link.label), style));
        }
        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hidden_until_focused() {
        let state = SkipLinksState::default();
        let links = SkipLinks::new(&state);
        assert_eq!(links.height(), 0);
        assert!(links.layout(Rect::new(0, 0, 100, 1)).is_empty());

        let mut buf = Buffer::empty(Rect::new(0, 0, 100, 1));
        (&links).render(buf.area, &mut buf);
        assert_eq!(buf[(0, 0)].symbol(), " ");
    }

    #[test]
    fn test_focused_renders_all_links() {
        let state = SkipLinksState::default();
        let links = SkipLinks::new(&state).focused(true);
        let area = Rect::new(0, 0, 120, 1);
        let mut buf = Buffer::empty(area);
        (&links).render(area, &mut buf);

        let text: String = (0..120).map(|x| buf[(x, 0)].symbol().to_string()).collect();
        assert!(text.contains("Skip to main content"));
        assert!(text.contains("Skip to contact"));

        let rects = links.layout(area);
        assert_eq!(rects.len(), 4);
        assert_eq!(buf[(rects[1].x + 1, 0)].symbol(), "S");
    }

    #[test]
    fn test_selection_wraps() {
        let mut state = SkipLinksState::default();
        state.select_previous();
        assert_eq!(state.selected_index(), 3);
        state.select_next();
        assert_eq!(state.selected_index(), 0);
        state.select(9);
        assert_eq!(state.selected_index(), 0);
        assert!(state.selected().is_some_and(SkipLinkTarget::is_main_content));
    }
}
