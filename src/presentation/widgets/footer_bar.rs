use crate::domain::keybinding::Keybind;
use crate::presentation::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

/// Page regions that take keyboard focus, in Tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusRegion {
    SkipLinks,
    Navigation,
    TextSize,
    #[default]
    Content,
    Carousel,
}

impl FocusRegion {
    pub const ORDER: [Self; 5] = [
        Self::SkipLinks,
        Self::Navigation,
        Self::TextSize,
        Self::Content,
        Self::Carousel,
    ];

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::SkipLinks => "SKIP LINKS",
            Self::Navigation => "MENU",
            Self::TextSize => "TEXT SIZE",
            Self::Content => "PAGE",
            Self::Carousel => "TESTIMONIALS",
        }
    }

    /// Hints for the keys that act differently inside this region.
    #[must_use]
    pub const fn hints(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Self::SkipLinks => &[("←/→", "Choose"), ("Enter", "Jump")],
            Self::Navigation => &[("←/→", "Choose"), ("Enter", "Go")],
            Self::TextSize => &[("↑/↓", "Size"), ("Home", "Reset")],
            Self::Content => &[("↑/↓", "Scroll"), ("←/→", "Select"), ("Enter", "Activate")],
            Self::Carousel => &[("←/→", "Slide"), ("Space", "Play/Pause")],
        }
    }
}

pub struct FooterBarStyle {
    pub background: Style,
    pub label_style: Style,
    pub key_style: Style,
    pub info: Style,
    pub focus_indicator: Style,
}

impl FooterBarStyle {
    #[must_use]
    pub fn from_theme(theme: &Theme) -> Self {
        Self {
            label_style: Style::default()
                .bg(theme.accent)
                .fg(theme.on_accent)
                .add_modifier(Modifier::BOLD),
            key_style: Style::default().bg(theme.accent_dim).fg(Color::White),
            focus_indicator: Style::default()
                .bg(theme.accent_dim)
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
            ..Self::default()
        }
    }
}

impl Default for FooterBarStyle {
    fn default() -> Self {
        Self {
            background: Style::default(),
            label_style: Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            key_style: Style::default().fg(Color::White).bg(Color::DarkGray),
            info: Style::default().fg(Color::DarkGray),
            focus_indicator: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        }
    }
}

/// Focused region, its local keys, then the global bindings.
pub struct FooterBar<'a> {
    keybindings: Vec<&'a Keybind>,
    focus: Option<FocusRegion>,
    right_info: Option<&'a str>,
    style: FooterBarStyle,
}

impl<'a> FooterBar<'a> {
    #[must_use]
    pub fn new(keybindings: impl IntoIterator<Item = &'a Keybind>) -> Self {
        Self {
            keybindings: keybindings.into_iter().collect(),
            focus: None,
            right_info: None,
            style: FooterBarStyle::default(),
        }
    }

    #[must_use]
    pub const fn focus(mut self, focus: FocusRegion) -> Self {
        self.focus = Some(focus);
        self
    }

    #[must_use]
    pub const fn right_info(mut self, info: Option<&'a str>) -> Self {
        self.right_info = info;
        self
    }

    #[must_use]
    pub const fn style(mut self, style: FooterBarStyle) -> Self {
        self.style = style;
        self
    }

    fn push_hint(&self, spans: &mut Vec<Span<'a>>, label: String, key: String) {
        if !spans.is_empty() {
            spans.push(Span::raw(" "));
        }
        spans.push(Span::styled(format!(" {label} "), self.style.label_style));
        spans.push(Span::styled(format!(" {key} "), self.style.key_style));
    }

    fn build_left_spans(&self) -> Vec<Span<'a>> {
        let mut spans = Vec::new();

        if let Some(focus) = self.focus {
            spans.push(Span::styled(
                format!(" {} ", focus.display_name()),
                self.style.focus_indicator,
            ));
            for (key, label) in focus.hints() {
                self.push_hint(&mut spans, (*label).to_string(), (*key).to_string());
            }
        }

        for binding in self.keybindings.iter().filter(|k| k.visible_in_bar) {
            self.push_hint(&mut spans, binding.label.to_string(), binding.key_label());
        }

        spans
    }
}

impl Widget for FooterBar<'_> {
    #[allow(clippy::cast_possible_truncation)]
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }

        for x in area.left()..area.right() {
            buf[(x, area.y)]
                .set_char(' ')
                .set_style(self.style.background);
        }

        let right_width = self.right_info.map_or(0, |s| s.width() as u16);
        let left_width = area.width.saturating_sub(right_width + 1);
        let left_area = Rect::new(area.x, area.y, left_width, 1);
        Paragraph::new(Line::from(self.build_left_spans())).render(left_area, buf);

        if let Some(info) = self.right_info
            && right_width < area.width
        {
            let right_x = area.right().saturating_sub(right_width);
            let right_area = Rect::new(right_x, area.y, right_width, 1);
            Paragraph::new(Span::styled(info, self.style.info)).render(right_area, buf);
        }
    }
}
