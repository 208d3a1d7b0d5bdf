//! Status bar hosting the live region.

use crate::application::services::Politeness;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

trait PolitenessExt {
    fn color(self) -> Color;
}

impl PolitenessExt for Politeness {
    fn color(self) -> Color {
        match self {
            Self::Polite => Color::Cyan,
            Self::Assertive => Color::Yellow,
        }
    }
}

/// Announcement on the left, page position on the right.
#[derive(Debug, Clone)]
pub struct StatusBar {
    message: String,
    politeness: Politeness,
    section: String,
    progress: f64,
}

impl StatusBar {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            message: String::new(),
            politeness: Politeness::Polite,
            section: String::new(),
            progress: 0.0,
        }
    }

    #[must_use]
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    #[must_use]
    pub const fn politeness(mut self, politeness: Politeness) -> Self {
        self.politeness = politeness;
        self
    }

    /// Label of the section currently in view.
    #[must_use]
    pub fn section(mut self, section: impl Into<String>) -> Self {
        self.section = section.into();
        self
    }

    /// Scroll progress in `[0, 1]`.
    #[must_use]
    pub const fn progress(mut self, progress: f64) -> Self {
        self.progress = progress;
        self
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn right_text(&self) -> String {
        let percent = (self.progress.clamp(0.0, 1.0) * 100.0).round() as u8;
        if self.section.is_empty() {
            format!(" {percent:>3}% ")
        } else {
            format!(" {} · {percent:>3}% ", self.section)
        }
    }
}

impl Default for StatusBar {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for &StatusBar {
    #[allow(clippy::cast_possible_truncation)]
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }

        let style = Style::default()
            .fg(self.politeness.color())
            .add_modifier(Modifier::BOLD);

        let right = self.right_text();
        let right_width = right.width() as u16;
        let left_width = area.width.saturating_sub(right_width);

        if !self.message.is_empty() {
            let left = Line::from(Span::styled(format!(" {}", self.message), style));
            Paragraph::new(left).render(Rect::new(area.x, area.y, left_width, 1), buf);
        }

        if right_width <= area.width {
            let right_area = Rect::new(area.right() - right_width, area.y, right_width, 1);
            Paragraph::new(Span::styled(right, Style::default().fg(Color::DarkGray)))
                .render(right_area, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(bar: &StatusBar, width: u16) -> String {
        let mut buf = Buffer::empty(Rect::new(0, 0, width, 1));
        bar.render(buf.area, &mut buf);
        (0..width).map(|x| buf[(x, 0)].symbol().to_string()).collect()
    }

    #[test]
    fn test_shows_message_and_progress() {
        let bar = StatusBar::new()
            .message("Text size changed to Large")
            .section("Services")
            .progress(0.5);
        let text = render(&bar, 60);
        assert!(text.starts_with(" Text size changed to Large"));
        assert!(text.ends_with(" Services ·  50% "));
    }

    #[test]
    fn test_progress_is_clamped() {
        let bar = StatusBar::new().progress(3.0);
        assert!(render(&bar, 20).ends_with(" 100% "));
    }

    #[test]
    fn test_assertive_uses_warning_color() {
        assert_eq!(Politeness::Assertive.color(), Color::Yellow);
        assert_eq!(Politeness::Polite.color(), Color::Cyan);
    }
}
