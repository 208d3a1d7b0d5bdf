//! Card showing a single patient testimonial.

use crate::domain::entities::Testimonial;
use crate::presentation::theme::Theme;
use crate::presentation::ui::utils::{wrap_text, wrapped_height};
use crate::presentation::widgets::{ElderCard, StarRating};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

const VERIFIED_MARK: &str = "✓ Verified";

#[derive(Debug, Clone)]
pub struct TestimonialCard<'a> {
    testimonial: &'a Testimonial,
    focused: bool,
    theme: Theme,
}

impl<'a> TestimonialCard<'a> {
    #[must_use]
    pub fn new(testimonial: &'a Testimonial) -> Self {
        Self {
            testimonial,
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

    fn card(&self) -> ElderCard<'a> {
        ElderCard::new()
            .focused(self.focused)
            .theme(self.theme)
    }

    fn quote(&self) -> String {
        format!("\u{201c}{}\u{201d}", self.testimonial.text)
    }

    fn lines(&self, width: u16) -> Vec<Line<'static>> {
        let t = self.testimonial;
        let theme = &self.theme;

        let avatar = Span::styled(
            format!(" {} ", t.initials()),
            Style::default()
                .bg(theme.accent)
                .fg(theme.on_accent)
                .add_modifier(Modifier::BOLD),
        );
        let mut name_line = vec![
            avatar,
            Span::raw(" "),
            Span::styled(t.patient_name.clone(), Style::default().add_modifier(Modifier::BOLD)),
        ];
        if t.verified {
            name_line.push(Span::raw("  "));
            name_line.push(Span::styled(VERIFIED_MARK, Style::default().fg(theme.success)));
        }

        let mut lines = vec![
            Line::from(name_line),
            Line::styled(t.condition.clone(), theme.dimmed_style),
            StarRating::new(t.rating).star_color(theme.star).line(),
            Line::default(),
        ];
        lines.extend(
            wrap_text(&self.quote(), width)
                .into_iter()
                .map(|l| Line::styled(l, Style::default().add_modifier(Modifier::ITALIC))),
        );
        lines.push(Line::default());
        lines.push(Line::styled(t.provider_line(), theme.heading_style));

        let meta = match &t.location {
            Some(location) => format!("{location} • {}", t.formatted_date()),
            None => t.formatted_date(),
        };
        lines.push(Line::styled(meta, theme.dimmed_style));
        lines
    }

    /// Rows the card needs at `width`, border included.
    #[must_use]
    pub fn height(&self, width: u16) -> u16 {
        let card = self.card();
        let (chrome_w, chrome_h) = card.chrome();
        let inner_width = width.saturating_sub(chrome_w).max(1);
        // Name, condition, stars, blank, blank, provider, meta.
        7 + wrapped_height(&self.quote(), inner_width) + chrome_h
    }
}

impl Widget for &TestimonialCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let card = self.card();
        let inner = card.inner(area);
        (&card).render(area, buf);
        Paragraph::new(self.lines(inner.width)).render(inner, buf);
    }
}
