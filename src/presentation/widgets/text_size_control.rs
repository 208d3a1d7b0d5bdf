use crate::domain::entities::TextSize;
use crate::presentation::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

const PREFIX: &str = "Text size ";
const DECREASE: &str = " A- ";
const INCREASE: &str = " A+ ";

/// Hit regions of the control.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextSizeLayout {
    pub decrease: Rect,
    /// One cell per level, smallest first.
    pub levels: Vec<(TextSize, Rect)>,
    pub increase: Rect,
}

/// One-row control: `Text size  A-  ● ○ ○  A+  Normal`.
pub struct TextSizeControlView {
    current: TextSize,
    focused: bool,
    theme: Theme,
}

impl TextSizeControlView {
    #[must_use]
    pub fn new(current: TextSize) -> Self {
        Self {
            current,
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

    #[allow(clippy::cast_possible_truncation)]
    #[must_use]
    pub fn layout(&self, area: Rect) -> TextSizeLayout {
        let y = area.y;
        let mut x = area.x + PREFIX.width() as u16;

        let decrease = Rect::new(x, y, DECREASE.width() as u16, 1);
        x = decrease.right() + 1;

        let levels = TextSize::ALL
            .into_iter()
            .map(|size| {
                let rect = Rect::new(x, y, 1, 1);
                x += 2;
                (size, rect)
            })
            .filter(|(_, rect)| rect.x < area.right())
            .collect();

        let increase = Rect::new(x, y, INCREASE.width() as u16, 1);
        let clip = |r: Rect| r.intersection(area);
        TextSizeLayout {
            decrease: clip(decrease),
            levels,
            increase: clip(increase),
        }
    }

    fn button_style(&self, enabled: bool) -> Style {
        if enabled {
            Style::default()
                .bg(self.theme.accent)
                .fg(self.theme.on_accent)
                .add_modifier(Modifier::BOLD)
        } else {
            self.theme.dimmed_style
        }
    }
}

impl Widget for &TextSizeControlView {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }

        let label_style = if self.focused {
            self.theme.focus_style
        } else {
            self.theme.base_style
        };

        let mut spans = vec![
            Span::styled(PREFIX, label_style),
            Span::styled(DECREASE, self.button_style(!self.current.is_min())),
            Span::raw(" "),
        ];
        for size in TextSize::ALL {
            let (dot, style) = if size == self.current {
                ("●", Style::default().fg(self.theme.accent))
            } else {
                ("○", self.theme.dimmed_style)
            };
            spans.push(Span::styled(dot, style));
            spans.push(Span::raw(" "));
        }
        spans.push(Span::styled(INCREASE, self.button_style(!self.current.is_max())));
        spans.push(Span::raw("  "));
        spans.push(Span::styled(self.current.label(), self.theme.heading_style));

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}
