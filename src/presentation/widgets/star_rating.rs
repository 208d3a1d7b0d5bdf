use crate::domain::entities::{MAX_RATING, Rating};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

const FILLED: &str = "★";
const EMPTY: &str = "☆";

/// Five stars followed by the rating as text, e.g. `★★★★☆ 4 out of 5 stars`.
#[derive(Debug, Clone, Copy)]
pub struct StarRating {
    rating: Rating,
    filled_style: Style,
    empty_style: Style,
    show_label: bool,
}

impl StarRating {
    #[must_use]
    pub fn new(rating: Rating) -> Self {
        Self {
            rating,
            filled_style: Style::default().fg(Color::Yellow),
            empty_style: Style::default().fg(Color::DarkGray),
            show_label: true,
        }
    }

    #[must_use]
    pub const fn star_color(mut self, color: Color) -> Self {
        self.filled_style = Style::new().fg(color);
        self
    }

    #[must_use]
    pub const fn show_label(mut self, show: bool) -> Self {
        self.show_label = show;
        self
    }

    #[must_use]
    pub fn line(&self) -> Line<'static> {
        let filled = usize::from(self.rating.value());
        let empty = usize::from(MAX_RATING).saturating_sub(filled);

        let mut spans = vec![
            Span::styled(FILLED.repeat(filled), self.filled_style),
            Span::styled(EMPTY.repeat(empty), self.empty_style),
        ];
        if self.show_label {
            spans.push(Span::raw(format!(" {}", self.rating.label())));
        }
        Line::from(spans)
    }
}

impl Widget for StarRating {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Paragraph::new(self.line()).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(5, "★★★★★ 5 out of 5 stars" ; "full")]
    #[test_case(4, "★★★★☆ 4 out of 5 stars" ; "four")]
    #[test_case(1, "★☆☆☆☆ 1 out of 5 stars" ; "one")]
    fn test_line_text(value: u8, expected: &str) {
        let line = StarRating::new(Rating::new(value).unwrap()).line();
        assert_eq!(line.to_string(), expected);
    }

    #[test]
    fn test_without_label() {
        let line = StarRating::new(Rating::new(3).unwrap())
            .show_label(false)
            .line();
        assert_eq!(line.to_string(), "★★★☆☆");
    }
}
