use crate::presentation::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Padding, Widget},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CardVariant {
    #[default]
    Default,
    Elevated,
    Outlined,
    Glass,
}

impl CardVariant {
    const fn border_type(self) -> BorderType {
        match self {
            Self::Default | Self::Glass => BorderType::Rounded,
            Self::Elevated => BorderType::Thick,
            Self::Outlined => BorderType::Double,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CardPadding {
    None,
    Sm,
    #[default]
    Md,
    Lg,
    Xl,
}

impl CardPadding {
    /// Inner padding as (horizontal, vertical) cells.
    #[must_use]
    pub const fn cells(self) -> (u16, u16) {
        match self {
            Self::None => (0, 0),
            Self::Sm => (1, 0),
            Self::Md => (2, 0),
            Self::Lg => (3, 1),
            Self::Xl => (4, 1),
        }
    }
}

/// Bordered container used by every content block on the page.
#[derive(Debug, Clone)]
pub struct ElderCard<'a> {
    title: Option<&'a str>,
    footer: Option<Line<'a>>,
    variant: CardVariant,
    padding: CardPadding,
    hoverable: bool,
    hovered: bool,
    focused: bool,
    theme: Theme,
}

impl<'a> ElderCard<'a> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            title: None,
            footer: None,
            variant: CardVariant::default(),
            padding: CardPadding::default(),
            hoverable: false,
            hovered: false,
            focused: false,
            theme: Theme::default(),
        }
    }

    #[must_use]
    pub const fn title(mut self, title: &'a str) -> Self {
        self.title = Some(title);
        self
    }

    #[must_use]
    pub fn footer(mut self, footer: impl Into<Line<'a>>) -> Self {
        self.footer = Some(footer.into());
        self
    }

    #[must_use]
    pub const fn variant(mut self, variant: CardVariant) -> Self {
        self.variant = variant;
        self
    }

    #[must_use]
    pub const fn padding(mut self, padding: CardPadding) -> Self {
        self.padding = padding;
        self
    }

    #[must_use]
    pub const fn hoverable(mut self, hoverable: bool) -> Self {
        self.hoverable = hoverable;
        self
    }

    /// Pointer is over the card. Ignored unless the card is hoverable.
    #[must_use]
    pub const fn hovered(mut self, hovered: bool) -> Self {
        self.hovered = hovered;
        self
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

    /// Rows and columns taken by border and padding together.
    #[must_use]
    pub const fn chrome(&self) -> (u16, u16) {
        let (h, v) = self.padding.cells();
        (2 + h * 2, 2 + v * 2)
    }

    fn border_style(&self) -> Style {
        if self.focused {
            Style::default()
                .fg(self.theme.accent)
                .add_modifier(Modifier::BOLD)
        } else if self.hoverable && self.hovered {
            Style::default().fg(self.theme.accent)
        } else if self.variant == CardVariant::Glass {
            self.theme.dimmed_style
        } else {
            self.theme.base_style
        }
    }

    fn block(&self) -> Block<'a> {
        let (h, v) = self.padding.cells();
        let border_type = if self.focused {
            BorderType::Thick
        } else {
            self.variant.border_type()
        };

        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_type(border_type)
            .border_style(self.border_style())
            .padding(Padding::new(h, h, v, v));

        if self.variant == CardVariant::Glass {
            block = block.style(Style::default().bg(self.theme.accent_dim));
        }
        if let Some(title) = self.title {
            block = block.title(Span::styled(format!(" {title} "), self.theme.heading_style));
        }
        if let Some(footer) = &self.footer {
            block = block.title_bottom(footer.clone().alignment(Alignment::Right));
        }
        block
    }

    /// Area left for content inside `area`.
    #[must_use]
    pub fn inner(&self, area: Rect) -> Rect {
        self.block().inner(area)
    }
}

impl Default for ElderCard<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for &ElderCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        self.block().render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(CardPadding::None, Rect::new(1, 1, 18, 8) ; "none")]
    #[test_case(CardPadding::Md, Rect::new(3, 1, 14, 8) ; "md")]
    #[test_case(CardPadding::Xl, Rect::new(5, 2, 10, 6) ; "xl")]
    fn test_inner_respects_padding(padding: CardPadding, expected: Rect) {
        let card = ElderCard::new().padding(padding);
        assert_eq!(card.inner(Rect::new(0, 0, 20, 10)), expected);
    }

    #[test]
    fn test_chrome_matches_inner() {
        let card = ElderCard::new().padding(CardPadding::Lg);
        let area = Rect::new(0, 0, 30, 12);
        let inner = card.inner(area);
        let (w, h) = card.chrome();
        assert_eq!(inner.width + w, area.width);
        assert_eq!(inner.height + h, area.height);
    }

    #[test]
    fn test_renders_title_and_footer() {
        let card = ElderCard::new().title("Services").footer("Learn More");
        let mut buf = Buffer::empty(Rect::new(0, 0, 30, 4));
        (&card).render(buf.area, &mut buf);

        let top: String = (0..30).map(|x| buf[(x, 0)].symbol().to_string()).collect();
        let bottom: String = (0..30).map(|x| buf[(x, 3)].symbol().to_string()).collect();
        assert!(top.contains("Services"));
        assert!(bottom.contains("Learn More"));
    }

    #[test]
    fn test_variants_use_distinct_borders() {
        let corner = |variant| {
            let card = ElderCard::new().variant(variant);
            let mut buf = Buffer::empty(Rect::new(0, 0, 4, 3));
            (&card).render(buf.area, &mut buf);
            buf[(0, 0)].symbol().to_string()
        };
        assert_eq!(corner(CardVariant::Default), "╭");
        assert_eq!(corner(CardVariant::Elevated), "┏");
        assert_eq!(corner(CardVariant::Outlined), "╔");
    }
}
