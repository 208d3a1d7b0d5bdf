//! Testimonial carousel view: current card, controls and position dots.

use crate::application::services::{CarouselState, EMPTY_CAROUSEL_MESSAGE};
use crate::presentation::theme::Theme;
use crate::presentation::ui::utils::center_horizontally;
use crate::presentation::widgets::{ButtonSize, ButtonVariant, ElderButton, TestimonialCard};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

const PREVIOUS_LABEL: &str = "◀ Previous";
const NEXT_LABEL: &str = "Next ▶";
const PAUSE_LABEL: &str = "Pause";
const PLAY_LABEL: &str = "Play";
const DOT_CURRENT: &str = "●";
const DOT: &str = "○";
const CONTROL_GAP: u16 = 2;

/// Screen regions of the carousel parts, used for mouse hit testing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CarouselLayout {
    pub card: Rect,
    pub previous: Option<Rect>,
    pub toggle: Option<Rect>,
    pub next: Option<Rect>,
    /// One cell per testimonial, in order.
    pub dots: Vec<Rect>,
    pub position: Rect,
}

pub struct CarouselView<'a> {
    state: &'a CarouselState,
    focused: bool,
    theme: Theme,
}

impl<'a> CarouselView<'a> {
    #[must_use]
    pub fn new(state: &'a CarouselState) -> Self {
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

    fn toggle_label(&self) -> &'static str {
        if self.state.is_playing() {
            PAUSE_LABEL
        } else {
            PLAY_LABEL
        }
    }

    fn buttons(&self) -> [ElderButton<'static>; 3] {
        let base = |label| {
            ElderButton::new(label)
                .size(ButtonSize::Md)
                .variant(ButtonVariant::Outline)
                .theme(self.theme)
        };
        [
            base(PREVIOUS_LABEL).disabled(!self.state.can_go_previous()),
            base(self.toggle_label()).disabled(!self.state.can_toggle_play()),
            base(NEXT_LABEL).disabled(!self.state.can_go_next()),
        ]
    }

    /// Tallest card among all testimonials so the page does not jump between slides.
    fn card_height(&self, width: u16) -> u16 {
        self.state
            .testimonials()
            .iter()
            .map(|t| TestimonialCard::new(t).height(width))
            .max()
            .unwrap_or(0)
    }

    #[must_use]
    pub fn height(&self, width: u16) -> u16 {
        if self.state.is_empty() {
            return 1;
        }
        let controls = ButtonSize::Md.height();
        self.card_height(width) + 1 + controls + 1
    }

    #[must_use]
    pub fn layout(&self, area: Rect) -> CarouselLayout {
        if self.state.is_empty() {
            return CarouselLayout {
                position: Rect::new(area.x, area.y, area.width, 1.min(area.height)),
                ..CarouselLayout::default()
            };
        }

        let card_height = self.card_height(area.width).min(area.height);
        let card = Rect::new(area.x, area.y, area.width, card_height);

        let controls_y = card.bottom() + 1;
        let buttons = self.buttons();
        let total: u16 = buttons.iter().map(ElderButton::width).sum::<u16>() + CONTROL_GAP * 2;
        let row = center_horizontally(
            Rect::new(area.x, controls_y, area.width, ButtonSize::Md.height()),
            total,
        );

        let mut x = row.x;
        let mut rects = buttons.iter().map(|button| {
            let rect = Rect::new(x, row.y, button.width(), row.height).intersection(row);
            x = x.saturating_add(button.width() + CONTROL_GAP);
            rect
        });
        let previous = rects.next();
        let toggle = rects.next().filter(|_| self.state.can_toggle_play());
        let next = rects.next();

        let indicators_y = row.bottom();
        let position_label = self.state.position_label();
        let dots_width = u16::try_from(self.state.len() * 2).unwrap_or(u16::MAX);
        let label_width = u16::try_from(position_label.len()).unwrap_or(u16::MAX);
        let indicators = center_horizontally(
            Rect::new(area.x, indicators_y, area.width, 1),
            dots_width + 1 + label_width,
        );
        let dots = (0..self.state.len())
            .map(|i| {
                let offset = u16::try_from(i * 2).unwrap_or(u16::MAX);
                Rect::new(indicators.x.saturating_add(offset), indicators_y, 1, 1)
            })
            .filter(|dot| dot.x < indicators.right())
            .collect();
        let position = Rect::new(
            indicators.x.saturating_add(dots_width + 1),
            indicators_y,
            label_width,
            1,
        )
        .intersection(indicators);

        CarouselLayout {
            card,
            previous,
            toggle,
            next,
            dots,
            position,
        }
    }

    fn render_indicators(&self, layout: &CarouselLayout, buf: &mut Buffer) {
        let current = Style::default()
            .fg(self.theme.accent)
            .add_modifier(Modifier::BOLD);
        for (i, dot) in layout.dots.iter().enumerate() {
            let (symbol, style) = if i == self.state.index() {
                (DOT_CURRENT, current)
            } else {
                (DOT, self.theme.dimmed_style)
            };
            Span::styled(symbol, style).render(*dot, buf);
        }
        Paragraph::new(self.state.position_label())
            .style(self.theme.base_style)
            .render(layout.position, buf);
    }
}

impl Widget for &CarouselView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }

        let layout = self.layout(area);
        let Some(testimonial) = self.state.current() else {
            Paragraph::new(Line::from(EMPTY_CAROUSEL_MESSAGE))
                .alignment(Alignment::Center)
                .style(self.theme.dimmed_style)
                .render(layout.position, buf);
            return;
        };

        let card = TestimonialCard::new(testimonial)
            .focused(self.focused)
            .theme(self.theme);
        (&card).render(layout.card, buf);

        let buttons = self.buttons();
        let slots = [layout.previous, layout.toggle, layout.next];
        for (button, slot) in buttons.iter().zip(slots) {
            if let Some(rect) = slot {
                button.render(rect, buf);
            }
        }

        self.render_indicators(&layout, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::CarouselConfig;
    use crate::domain::entities::fixtures::testimonials;

    fn text(buf: &Buffer) -> String {
        (0..buf.area.height)
            .map(|y| {
                (0..buf.area.width)
                    .map(|x| buf[(x, y)].symbol().to_string())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn render(state: &CarouselState) -> (Buffer, CarouselLayout) {
        let view = CarouselView::new(state);
        let area = Rect::new(0, 0, 70, view.height(70));
        let mut buf = Buffer::empty(area);
        (&view).render(area, &mut buf);
        (buf, view.layout(area))
    }

    #[test]
    fn test_empty_state_has_message_and_no_controls() {
        let state = CarouselState::new(Vec::new(), CarouselConfig::default());
        let (buf, layout) = render(&state);

        assert!(text(&buf).contains(EMPTY_CAROUSEL_MESSAGE));
        assert_eq!(layout.previous, None);
        assert_eq!(layout.toggle, None);
        assert_eq!(layout.next, None);
        assert!(layout.dots.is_empty());
        assert!(!state.can_go_next());
        assert!(!state.can_go_previous());
        assert!(!state.can_toggle_play());
    }

    #[test]
    fn test_renders_current_card_and_position() {
        let mut state = CarouselState::new(testimonials(3), CarouselConfig::default());
        state.next();
        let (buf, layout) = render(&state);
        let content = text(&buf);

        assert!(content.contains("Patient 2"));
        assert!(content.contains("2 of 3"));
        assert!(content.contains(PAUSE_LABEL));
        assert_eq!(layout.dots.len(), 3);
        assert_eq!(buf[(layout.dots[1].x, layout.dots[1].y)].symbol(), DOT_CURRENT);
        assert_eq!(buf[(layout.dots[0].x, layout.dots[0].y)].symbol(), DOT);
    }

    #[test]
    fn test_controls_do_not_overlap() {
        let state = CarouselState::new(testimonials(3), CarouselConfig::default());
        let layout = CarouselView::new(&state).layout(Rect::new(0, 0, 80, 40));

        let previous = layout.previous.unwrap();
        let toggle = layout.toggle.unwrap();
        let next = layout.next.unwrap();
        assert!(previous.right() <= toggle.x);
        assert!(toggle.right() <= next.x);
        assert!(previous.y > layout.card.bottom());
    }

    #[test]
    fn test_toggle_hidden_without_auto_play() {
        let config = CarouselConfig {
            enable_auto_play: false,
            ..CarouselConfig::default()
        };
        let state = CarouselState::new(testimonials(3), config);
        let layout = CarouselView::new(&state).layout(Rect::new(0, 0, 80, 40));
        assert_eq!(layout.toggle, None);
        assert!(layout.next.is_some());
    }

    #[test]
    fn test_paused_shows_play() {
        let mut state = CarouselState::new(testimonials(2), CarouselConfig::default());
        state.toggle_play();
        let (buf, _) = render(&state);
        assert!(text(&buf).contains(PLAY_LABEL));
    }
}
