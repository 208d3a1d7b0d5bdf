//! Large, high-contrast button.

use crate::presentation::theme::Theme;
use crate::presentation::theme::adapter::ColorConverter;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

pub const LOADING_LABEL: &str = "Loading...";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonVariant {
    #[default]
    Primary,
    Secondary,
    Outline,
    Ghost,
    Destructive,
}

/// Touch-target size. Each step adds height and horizontal padding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum ButtonSize {
    Sm,
    #[default]
    Md,
    Lg,
    Xl,
}

impl ButtonSize {
    /// Rows occupied, including the border.
    #[must_use]
    pub const fn height(self) -> u16 {
        match self {
            Self::Sm => 1,
            Self::Md | Self::Lg => 3,
            Self::Xl => 5,
        }
    }

    const fn padding(self) -> u16 {
        match self {
            Self::Sm => 1,
            Self::Md => 2,
            Self::Lg => 3,
            Self::Xl => 4,
        }
    }

    const fn bordered(self) -> bool {
        !matches!(self, Self::Sm)
    }

    /// One size up, saturating at `Xl`.
    #[must_use]
    pub const fn larger(self) -> Self {
        match self {
            Self::Sm => Self::Md,
            Self::Md => Self::Lg,
            Self::Lg | Self::Xl => Self::Xl,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ElderButton<'a> {
    label: &'a str,
    variant: ButtonVariant,
    size: ButtonSize,
    full_width: bool,
    disabled: bool,
    loading: bool,
    focused: bool,
    theme: Theme,
}

impl<'a> ElderButton<'a> {
    #[must_use]
    pub fn new(label: &'a str) -> Self {
        Self {
            label,
            variant: ButtonVariant::default(),
            size: ButtonSize::default(),
            full_width: false,
            disabled: false,
            loading: false,
            focused: false,
            theme: Theme::default(),
        }
    }

    #[must_use]
    pub const fn variant(mut self, variant: ButtonVariant) -> Self {
        self.variant = variant;
        self
    }

    #[must_use]
    pub const fn size(mut self, size: ButtonSize) -> Self {
        self.size = size;
        self
    }

    #[must_use]
    pub const fn full_width(mut self, full_width: bool) -> Self {
        self.full_width = full_width;
        self
    }

    #[must_use]
    pub const fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    #[must_use]
    pub const fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
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

    /// Whether activation should be ignored.
    #[must_use]
    pub const fn is_inert(&self) -> bool {
        self.disabled || self.loading
    }

    fn text(&self) -> &str {
        if self.loading { LOADING_LABEL } else { self.label }
    }

    /// Preferred width for the current label and size.
    #[must_use]
    pub fn width(&self) -> u16 {
        let label = u16::try_from(self.text().width()).unwrap_or(u16::MAX);
        let border = if self.size.bordered() { 2 } else { 0 };
        label
            .saturating_add(self.size.padding() * 2)
            .saturating_add(border)
    }

    #[must_use]
    pub const fn height(&self) -> u16 {
        self.size.height()
    }

    /// Rect the button occupies when drawn at the top left of `area`.
    #[must_use]
    pub fn layout(&self, area: Rect) -> Rect {
        let width = if self.full_width {
            area.width
        } else {
            self.width().min(area.width)
        };
        Rect::new(area.x, area.y, width, self.height().min(area.height))
    }

    fn style(&self) -> Style {
        let theme = &self.theme;
        let style = match self.variant {
            ButtonVariant::Primary => Style::default().bg(theme.accent).fg(theme.on_accent),
            ButtonVariant::Secondary => Style::default().bg(theme.accent_dim).fg(Color::White),
            ButtonVariant::Outline => Style::default().fg(theme.accent),
            ButtonVariant::Ghost => theme.base_style,
            ButtonVariant::Destructive => Style::default()
                .bg(theme.danger)
                .fg(ColorConverter::readable_on(theme.danger)),
        }
        .add_modifier(Modifier::BOLD);

        if self.is_inert() {
            theme.dimmed_style.add_modifier(Modifier::DIM)
        } else if self.focused {
            style.add_modifier(Modifier::REVERSED)
        } else {
            style
        }
    }
}

impl Widget for &ElderButton<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let area = self.layout(area);
        if area.is_empty() {
            return;
        }

        let style = self.style();
        let line = Line::from(self.text()).alignment(Alignment::Center);

        if self.size.bordered() {
            let border_type = if self.focused {
                BorderType::Thick
            } else {
                BorderType::Rounded
            };
            let borders = if self.variant == ButtonVariant::Ghost && !self.focused {
                Borders::NONE
            } else {
                Borders::ALL
            };
            let block = Block::default()
                .borders(borders)
                .border_type(border_type)
                .style(style);
            let inner = block.inner(area);
            block.render(area, buf);

            // Center the label vertically inside taller buttons.
            let label_area = Rect::new(
                inner.x,
                inner.y + inner.height.saturating_sub(1) / 2,
                inner.width,
                1.min(inner.height),
            );
            Paragraph::new(line).style(style).render(label_area, buf);
        } else {
            Paragraph::new(line).style(style).render(area, buf);
        }
    }
}
