use crate::application::services::NavigationState;
use crate::presentation::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

const SCROLL_TOP_LABEL: &str = " ↑ Top ";

pub struct HeaderBarStyle {
    pub background: Style,
    pub scrolled_background: Style,
    pub clinic_name: Style,
    pub tagline: Style,
    pub item: Style,
    pub item_current: Style,
    pub item_selected: Style,
    pub scroll_top: Style,
}

impl HeaderBarStyle {
    #[must_use]
    pub fn from_theme(theme: &Theme) -> Self {
        Self {
            clinic_name: Style::default()
                .bg(theme.accent)
                .fg(theme.on_accent)
                .add_modifier(Modifier::BOLD),
            tagline: Style::default().bg(theme.accent_dim).fg(Color::White),
            scrolled_background: Style::default().bg(theme.accent_dim),
            item_current: Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            item_selected: theme.focus_style,
            scroll_top: Style::default().bg(theme.accent).fg(theme.on_accent),
            ..Self::default()
        }
    }
}

impl Default for HeaderBarStyle {
    fn default() -> Self {
        Self {
            background: Style::default(),
            scrolled_background: Style::default().bg(Color::DarkGray),
            clinic_name: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            tagline: Style::default().fg(Color::DarkGray),
            item: Style::default(),
            item_current: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            item_selected: Style::default().add_modifier(Modifier::REVERSED),
            scroll_top: Style::default().add_modifier(Modifier::REVERSED),
        }
    }
}

/// Hit regions of the navigation bar.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderBarLayout {
    pub items: Vec<Rect>,
    pub scroll_top: Option<Rect>,
}

/// Clinic name, tagline and section links. Numbers are the jump keys.
pub struct HeaderBar<'a> {
    clinic_name: &'a str,
    tagline: &'a str,
    navigation: &'a NavigationState,
    selected: Option<usize>,
    style: HeaderBarStyle,
}

impl<'a> HeaderBar<'a> {
    #[must_use]
    pub fn new(clinic_name: &'a str, tagline: &'a str, navigation: &'a NavigationState) -> Self {
        Self {
            clinic_name,
            tagline,
            navigation,
            selected: None,
            style: HeaderBarStyle::default(),
        }
    }

    /// Keyboard cursor while the bar has focus.
    #[must_use]
    pub const fn selected(mut self, selected: Option<usize>) -> Self {
        self.selected = selected;
        self
    }

    #[must_use]
    pub const fn style(mut self, style: HeaderBarStyle) -> Self {
        self.style = style;
        self
    }

    fn item_labels(&self) -> Vec<String> {
        self.navigation
            .items()
            .iter()
            .enumerate()
            .map(|(i, item)| format!(" {} {} ", i + 1, item.label))
            .collect()
    }

    #[allow(clippy::cast_possible_truncation)]
    fn right_width(&self) -> u16 {
        let items: usize = self.item_labels().iter().map(|l| l.width()).sum();
        let top = if self.navigation.show_scroll_top() {
            SCROLL_TOP_LABEL.width() + 1
        } else {
            0
        };
        (items + top) as u16
    }

    #[allow(clippy::cast_possible_truncation)]
    #[must_use]
    pub fn layout(&self, area: Rect) -> HeaderBarLayout {
        let width = self.right_width().min(area.width);
        let mut x = area.right().saturating_sub(width);

        let items = self
            .item_labels()
            .iter()
            .map(|label| {
                let rect = Rect::new(x, area.y, label.width() as u16, 1).intersection(area);
                x = x.saturating_add(label.width() as u16);
                rect
            })
            .collect();

        let scroll_top = self.navigation.show_scroll_top().then(|| {
            Rect::new(x + 1, area.y, SCROLL_TOP_LABEL.width() as u16, 1).intersection(area)
        });

        HeaderBarLayout { items, scroll_top }
    }

    fn item_style(&self, index: usize) -> Style {
        if self.selected == Some(index) {
            return self.style.item_selected;
        }
        let current = self
            .navigation
            .items()
            .get(index)
            .is_some_and(|item| self.navigation.is_current(item));
        if current {
            self.style.item_current
        } else {
            self.style.item
        }
    }
}

impl Widget for HeaderBar<'_> {
    #[allow(clippy::cast_possible_truncation)]
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        let background = if self.navigation.is_scrolled() {
            self.style.scrolled_background
        } else {
            self.style.background
        };
        for x in area.left()..area.right() {
            buf[(x, area.y)].set_char(' ').set_style(background);
        }

        let right_width = self.right_width();
        let name = format!(" {} ", self.clinic_name);
        let tagline = format!(" {} ", self.tagline);
        let mut left_spans = vec![Span::styled(name.clone(), self.style.clinic_name)];
        let left_width = name.width() + 1 + tagline.width();
        if left_width + usize::from(right_width) < usize::from(area.width) {
            left_spans.push(Span::raw(" "));
            left_spans.push(Span::styled(tagline, self.style.tagline));
        }
        let left_area = Rect::new(
            area.x,
            area.y,
            area.width.saturating_sub(right_width),
            1,
        );
        Paragraph::new(Line::from(left_spans)).render(left_area, buf);

        let layout = self.layout(area);
        for (i, (label, rect)) in self.item_labels().iter().zip(&layout.items).enumerate() {
            Paragraph::new(Span::styled(label.as_str(), self.item_style(i))).render(*rect, buf);
        }
        if let Some(rect) = layout.scroll_top {
            Paragraph::new(Span::styled(SCROLL_TOP_LABEL, self.style.scroll_top)).render(rect, buf);
        }
    }
}
