//! The clinic landing page as one tall, scrollable document.
//!
//! The page is composed twice per frame: once to measure its height and once
//! into an offscreen buffer of exactly that height. The app then copies the
//! visible rows into the terminal frame. Composition also yields section
//! bounds for the scroll spy and the rects of every activatable element.

use chrono::{Datelike, Local};
use parking_lot::RwLock;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::{Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

use crate::application::services::{CarouselState, SectionBounds, testimonial_queries};
use crate::domain::analytics::{AnalyticsEvent, AppointmentSource};
use crate::domain::entities::{ClinicContent, ClinicLocation, SectionId, TextSize, tel_uri};
use crate::domain::ports::DocumentRootPort;
use crate::presentation::theme::Theme;
use crate::presentation::ui::utils::{hit, wrap_text, wrapped_height};
use crate::presentation::widgets::{
    ButtonSize, ButtonVariant, CardPadding, CardVariant, CarouselView, ElderButton, ElderCard,
};

const MARGIN: u16 = 2;
const BUTTON_GAP: u16 = 2;

/// Base font size of the page, shared between the text size control and the renderer.
#[derive(Debug, Default)]
pub struct SharedDocumentRoot {
    size: RwLock<TextSize>,
}

impl SharedDocumentRoot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn text_size(&self) -> TextSize {
        *self.size.read()
    }
}

impl DocumentRootPort for SharedDocumentRoot {
    fn apply_font_size(&self, size: TextSize) {
        *self.size.write() = size;
    }
}

/// Rows and sizes that grow with the text size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spacing {
    pub gap: u16,
    pub button: ButtonSize,
    pub padding: CardPadding,
}

impl Spacing {
    #[must_use]
    pub const fn for_size(size: TextSize) -> Self {
        match size {
            TextSize::Normal => Self {
                gap: 1,
                button: ButtonSize::Md,
                padding: CardPadding::Md,
            },
            TextSize::Large => Self {
                gap: 2,
                button: ButtonSize::Lg,
                padding: CardPadding::Lg,
            },
            TextSize::ExtraLarge => Self {
                gap: 3,
                button: ButtonSize::Xl,
                padding: CardPadding::Xl,
            },
        }
    }
}

/// What an activatable element on the page does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageAction {
    BookAppointment(AppointmentSource),
    Call { phone: String },
    Emergency,
    Service { title: String },
    Directions { location: String, url: String },
    ScrollTo(SectionId),
}

impl PageAction {
    #[must_use]
    pub fn analytics_event(&self) -> Option<AnalyticsEvent> {
        match self {
            Self::BookAppointment(source) => {
                Some(AnalyticsEvent::AppointmentClick { source: *source })
            }
            Self::Call { phone } => Some(AnalyticsEvent::PhoneClick {
                phone: phone.clone(),
            }),
            Self::Emergency => Some(AnalyticsEvent::EmergencyClick),
            Self::Service { title } => Some(AnalyticsEvent::ServiceClick {
                service: title.clone(),
            }),
            Self::Directions { location, .. } => Some(AnalyticsEvent::LocationClick {
                location: location.clone(),
            }),
            Self::ScrollTo(_) => None,
        }
    }

    /// External link handed to the system opener, if any.
    #[must_use]
    pub fn link(&self, content: &ClinicContent) -> Option<String> {
        match self {
            Self::BookAppointment(_) => Some(tel_uri(&content.main_phone)),
            Self::Call { phone } => Some(tel_uri(phone)),
            Self::Emergency => Some(tel_uri(&content.emergency_phone)),
            Self::Directions { url, .. } => Some(url.clone()),
            Self::Service { .. } | Self::ScrollTo(_) => None,
        }
    }

    /// Section to scroll to after activation.
    #[must_use]
    pub fn scroll_target(&self) -> Option<SectionId> {
        match self {
            Self::ScrollTo(section) => Some(section.clone()),
            Self::Service { .. } => Some(SectionId::new(SectionId::CONTACT)),
            _ => None,
        }
    }
}

/// An activatable element in document coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageTarget {
    pub action: PageAction,
    pub label: String,
    pub area: Rect,
}

#[derive(Debug, Clone, Default)]
pub struct PageLayout {
    pub height: u16,
    pub sections: Vec<SectionBounds>,
    pub targets: Vec<PageTarget>,
    /// Carousel area in document coordinates.
    pub carousel: Option<Rect>,
}

impl PageLayout {
    #[must_use]
    pub fn section(&self, id: &SectionId) -> Option<&SectionBounds> {
        self.sections.iter().find(|s| &s.id == id)
    }

    /// Index of the target under a document position.
    #[must_use]
    pub fn target_at(&self, x: u16, y: u16) -> Option<usize> {
        self.targets
            .iter()
            .position(|t| hit(t.area, x, y))
    }
}

/// Per-frame inputs that change how the page looks.
#[derive(Clone, Copy)]
pub struct PageContext<'a> {
    pub theme: Theme,
    pub text_size: TextSize,
    pub carousel: &'a CarouselState,
    pub carousel_focused: bool,
    pub focused_target: Option<usize>,
    pub hovered_target: Option<usize>,
}

pub struct RenderedPage {
    pub buffer: Buffer,
    pub layout: PageLayout,
}

/// Builds the document for a given content set.
pub struct Page<'a> {
    content: &'a ClinicContent,
}

impl<'a> Page<'a> {
    #[must_use]
    pub const fn new(content: &'a ClinicContent) -> Self {
        Self { content }
    }

    #[must_use]
    pub fn measure(&self, ctx: &PageContext<'_>, width: u16) -> PageLayout {
        let mut composer = Composer::new(None, width, ctx);
        composer.compose(self.content);
        composer.finish()
    }

    #[must_use]
    pub fn render(&self, ctx: &PageContext<'_>, width: u16) -> RenderedPage {
        let measured = self.measure(ctx, width);
        let mut buffer = Buffer::empty(Rect::new(0, 0, width, measured.height));
        let mut composer = Composer::new(Some(&mut buffer), width, ctx);
        composer.compose(self.content);
        let layout = composer.finish();
        RenderedPage { buffer, layout }
    }
}

/// Lays out rows of boxes left to right, wrapping when a row is full.
/// Returns offsets relative to the origin and the total height.
fn flow(widths: &[u16], max_width: u16, row_height: u16, gap: u16) -> (Vec<(u16, u16)>, u16) {
    let mut offsets = Vec::with_capacity(widths.len());
    let (mut x, mut y) = (0u16, 0u16);
    for &w in widths {
        if x > 0 && x.saturating_add(w) > max_width {
            x = 0;
            y = y.saturating_add(row_height).saturating_add(1);
        }
        offsets.push((x, y));
        x = x.saturating_add(w).saturating_add(gap);
    }
    let height = if widths.is_empty() {
        0
    } else {
        y.saturating_add(row_height)
    };
    (offsets, height)
}

const fn grid_columns(width: u16) -> u16 {
    if width >= 110 {
        3
    } else if width >= 72 {
        2
    } else {
        1
    }
}

struct ButtonSpec {
    label: String,
    variant: ButtonVariant,
    action: PageAction,
}

impl ButtonSpec {
    fn new(label: impl Into<String>, variant: ButtonVariant, action: PageAction) -> Self {
        Self {
            label: label.into(),
            variant,
            action,
        }
    }
}

struct Composer<'b, 'c> {
    buf: Option<&'b mut Buffer>,
    width: u16,
    y: u16,
    ctx: &'c PageContext<'c>,
    spacing: Spacing,
    sections: Vec<SectionBounds>,
    targets: Vec<PageTarget>,
    carousel: Option<Rect>,
}

impl<'b, 'c> Composer<'b, 'c> {
    fn new(buf: Option<&'b mut Buffer>, width: u16, ctx: &'c PageContext<'c>) -> Self {
        Self {
            buf,
            width,
            y: 0,
            ctx,
            spacing: Spacing::for_size(ctx.text_size),
            sections: Vec::new(),
            targets: Vec::new(),
            carousel: None,
        }
    }

    fn finish(self) -> PageLayout {
        PageLayout {
            height: self.y,
            sections: self.sections,
            targets: self.targets,
            carousel: self.carousel,
        }
    }

    const fn inner_width(&self) -> u16 {
        self.width.saturating_sub(MARGIN * 2)
    }

    fn reserve(&mut self, height: u16) -> Rect {
        let area = Rect::new(MARGIN.min(self.width), self.y, self.inner_width(), height);
        self.y = self.y.saturating_add(height);
        area
    }

    fn gap(&mut self) {
        self.y = self.y.saturating_add(self.spacing.gap);
    }

    /// Draws only during the render pass.
    fn draw<W: Widget>(&mut self, area: Rect, widget: W) {
        if let Some(buf) = self.buf.as_deref_mut() {
            widget.render(area.intersection(buf.area), buf);
        }
    }

    fn section(&mut self, id: &str, body: impl FnOnce(&mut Self)) {
        let top = self.y;
        body(self);
        self.gap();
        self.sections.push(SectionBounds::new(
            SectionId::new(id),
            u32::from(top),
            u32::from(self.y.saturating_sub(top)),
        ));
    }

    fn text(&mut self, text: &str, style: Style) {
        let lines: Vec<Line<'static>> = wrap_text(text, self.inner_width().max(1))
            .into_iter()
            .map(|l| Line::styled(l, style))
            .collect();
        let height = u16::try_from(lines.len()).unwrap_or(u16::MAX);
        let area = self.reserve(height);
        self.draw(area, Paragraph::new(lines));
    }

    fn heading(&mut self, title: &str) {
        self.text(title, self.ctx.theme.heading_style);
        let rule = if self.ctx.text_size == TextSize::ExtraLarge {
            "═"
        } else {
            "─"
        };
        let width = title.width().min(usize::from(self.inner_width()));
        let area = self.reserve(1);
        self.draw(
            area,
            Line::styled(rule.repeat(width), Style::default().fg(self.ctx.theme.accent)),
        );
        self.gap();
    }

    fn next_target_focused(&self) -> bool {
        self.ctx.focused_target == Some(self.targets.len())
    }

    fn next_target_hovered(&self) -> bool {
        self.ctx.hovered_target == Some(self.targets.len())
    }

    fn push_target(&mut self, action: PageAction, label: String, area: Rect) {
        self.targets.push(PageTarget {
            action,
            label,
            area,
        });
    }

    fn button<'l>(&self, label: &'l str, variant: ButtonVariant) -> ElderButton<'l> {
        ElderButton::new(label)
            .variant(variant)
            .size(self.spacing.button)
            .theme(self.ctx.theme)
    }

    fn button_widths(&self, entries: &[ButtonSpec]) -> Vec<u16> {
        entries
            .iter()
            .map(|entry| self.button(&entry.label, entry.variant).width())
            .collect()
    }

    fn buttons_height(&self, entries: &[ButtonSpec], width: u16) -> u16 {
        let widths = self.button_widths(entries);
        flow(&widths, width, self.spacing.button.height(), BUTTON_GAP).1
    }

    /// Flows buttons from the top left of `area` and registers them as targets.
    fn place_buttons(&mut self, area: Rect, entries: Vec<ButtonSpec>) {
        let widths = self.button_widths(&entries);
        let height = self.spacing.button.height();
        let (offsets, _) = flow(&widths, area.width, height, BUTTON_GAP);

        for ((entry, width), (dx, dy)) in entries.into_iter().zip(widths).zip(offsets) {
            let rect = Rect::new(
                area.x.saturating_add(dx),
                area.y.saturating_add(dy),
                width.min(area.width),
                height,
            );
            let button = self
                .button(&entry.label, entry.variant)
                .focused(self.next_target_focused());
            self.draw(rect, &button);
            self.push_target(entry.action, entry.label, rect);
        }
    }

    fn button_row(&mut self, entries: Vec<ButtonSpec>) {
        let height = self.buttons_height(&entries, self.inner_width());
        let area = self.reserve(height);
        self.place_buttons(area, entries);
    }

    fn card<'l>(&self, title: &'l str) -> ElderCard<'l> {
        ElderCard::new()
            .title(title)
            .padding(self.spacing.padding)
            .theme(self.ctx.theme)
    }

    /// Reserves a grid of cells with the given heights. Rows take the tallest cell.
    fn grid(&mut self, heights: &[u16], columns: u16, column_width: u16) -> Vec<Rect> {
        let mut rects = Vec::with_capacity(heights.len());
        for row in heights.chunks(usize::from(columns)) {
            let row_height = row.iter().copied().max().unwrap_or(0);
            let area = self.reserve(row_height);
            let mut x = area.x;
            for _ in row {
                rects.push(Rect::new(x, area.y, column_width, row_height));
                x = x.saturating_add(column_width).saturating_add(BUTTON_GAP);
            }
            self.y = self.y.saturating_add(1);
        }
        rects
    }

    /// Column count, column width and card body width for card grids.
    fn columns(&self) -> (u16, u16, u16) {
        let columns = grid_columns(self.inner_width());
        let width = (self
            .inner_width()
            .saturating_sub(BUTTON_GAP * (columns - 1))
            / columns)
            .max(1);
        let (chrome_w, _) = self.card("").chrome();
        (columns, width, width.saturating_sub(chrome_w).max(1))
    }

    fn card_chrome_height(&self) -> u16 {
        self.card("").chrome().1
    }

    fn compose(&mut self, content: &ClinicContent) {
        self.gap();
        self.section(SectionId::HERO, |c| c.hero(content));
        self.section(SectionId::SERVICES, |c| c.services(content));
        self.section(SectionId::TESTIMONIALS, |c| c.testimonials(content));
        self.section(SectionId::WHY_US, |c| c.why_us(content));
        self.section(SectionId::LOCATIONS, |c| c.locations(content));
        self.section(SectionId::CONTACT, |c| c.contact(content));
        self.section(SectionId::FOOTER, |c| c.footer(content));
    }

    fn hero(&mut self, content: &ClinicContent) {
        let theme = self.ctx.theme;
        self.text(&content.name.to_uppercase(), theme.dimmed_style);
        self.text(
            &content.hero_heading,
            theme.heading_style.add_modifier(Modifier::UNDERLINED),
        );
        self.gap();
        self.text(&content.hero_body, theme.base_style);
        if !content.highlights.is_empty() {
            self.gap();
            let highlights = content
                .highlights
                .iter()
                .map(|h| format!("✓ {h}"))
                .collect::<Vec<_>>()
                .join("   ");
            self.text(&highlights, Style::default().fg(theme.success));
        }
        self.gap();

        self.button_row(vec![
            ButtonSpec::new(
                "Book Appointment",
                ButtonVariant::Primary,
                PageAction::BookAppointment(AppointmentSource::Hero),
            ),
            ButtonSpec::new(
                format!("Call {}", content.main_phone),
                ButtonVariant::Secondary,
                PageAction::Call {
                    phone: content.main_phone.clone(),
                },
            ),
            ButtonSpec::new(
                "Our Services",
                ButtonVariant::Outline,
                PageAction::ScrollTo(SectionId::new(SectionId::SERVICES)),
            ),
        ]);
    }

    fn services(&mut self, content: &ClinicContent) {
        self.heading("Our Services");
        let (columns, column_width, body_width) = self.columns();
        let chrome_h = self.card_chrome_height();

        let heights: Vec<u16> = content
            .services
            .iter()
            .map(|s| chrome_h.saturating_add(wrapped_height(&s.description, body_width)))
            .collect();
        let rects = self.grid(&heights, columns, column_width);

        for (service, rect) in content.services.iter().zip(rects) {
            let card = self
                .card(&service.title)
                .footer(" Learn More → ")
                .hoverable(true)
                .hovered(self.next_target_hovered())
                .focused(self.next_target_focused());
            let inner = card.inner(rect);
            self.draw(rect, &card);
            let lines: Vec<Line<'static>> = wrap_text(&service.description, inner.width.max(1))
                .into_iter()
                .map(Line::from)
                .collect();
            self.draw(inner, Paragraph::new(lines));
            self.push_target(
                PageAction::Service {
                    title: service.title.clone(),
                },
                service.title.clone(),
                rect,
            );
        }
    }

    fn testimonials(&mut self, content: &ClinicContent) {
        self.heading("What Our Patients Say");

        if let Some(average) = testimonial_queries::average_rating(&content.testimonials) {
            let five_star = testimonial_queries::featured(&content.testimonials).len();
            let today = Local::now().date_naive();
            let recent = match testimonial_queries::recent(&content.testimonials, today).len() {
                0 => String::new(),
                n => format!(" · {n} in the last 3 months"),
            };
            let summary = format!(
                "★ {average:.1} average from {} patients · {five_star} five-star reviews{recent}",
                content.testimonials.len()
            );
            self.text(&summary, Style::default().fg(self.ctx.theme.star));
            self.gap();
        }

        let view = CarouselView::new(self.ctx.carousel)
            .focused(self.ctx.carousel_focused)
            .theme(self.ctx.theme);
        let area = self.reserve(view.height(self.inner_width()));
        self.draw(area, &view);
        self.carousel = Some(area);
    }

    fn why_us(&mut self, content: &ClinicContent) {
        self.heading("Why Choose Us");
        let (columns, column_width, body_width) = self.columns();
        let chrome_h = self.card_chrome_height();

        let heights: Vec<u16> = content
            .benefits
            .iter()
            .map(|b| {
                chrome_h
                    .saturating_add(wrapped_height(&b.description, body_width))
                    .saturating_add(1)
            })
            .collect();
        let rects = self.grid(&heights, columns, column_width);

        let theme = self.ctx.theme;
        for (benefit, rect) in content.benefits.iter().zip(rects) {
            let card = self.card(&benefit.title).variant(CardVariant::Elevated);
            let inner = card.inner(rect);
            self.draw(rect, &card);

            let mut lines: Vec<Line<'static>> = wrap_text(&benefit.description, inner.width.max(1))
                .into_iter()
                .map(Line::from)
                .collect();
            lines.push(Line::styled(benefit.stat.clone(), theme.dimmed_style));
            self.draw(inner, Paragraph::new(lines));
        }
    }

    fn location_buttons(location: &ClinicLocation) -> Vec<ButtonSpec> {
        vec![
            ButtonSpec::new(
                "Get Directions",
                ButtonVariant::Primary,
                PageAction::Directions {
                    location: location.name.clone(),
                    url: location.directions_url(),
                },
            ),
            ButtonSpec::new(
                format!("Call {}", location.phone),
                ButtonVariant::Outline,
                PageAction::Call {
                    phone: location.phone.clone(),
                },
            ),
        ]
    }

    fn locations(&mut self, content: &ClinicContent) {
        self.heading("Our Locations");
        let (columns, column_width, body_width) = self.columns();
        let chrome_h = self.card_chrome_height();
        let theme = self.ctx.theme;

        let details = |location: &ClinicLocation, width: u16| -> Vec<Line<'static>> {
            [
                (location.address.as_str(), theme.base_style),
                (location.city.as_str(), theme.base_style),
                (location.phone.as_str(), theme.heading_style),
                (location.hours.as_str(), theme.dimmed_style),
            ]
            .into_iter()
            .flat_map(|(text, style)| {
                wrap_text(text, width.max(1))
                    .into_iter()
                    .map(move |l| Line::styled(l, style))
            })
            .collect()
        };

        let heights: Vec<u16> = content
            .locations
            .iter()
            .map(|l| {
                let rows = u16::try_from(details(l, body_width).len()).unwrap_or(u16::MAX);
                let buttons = self.buttons_height(&Self::location_buttons(l), body_width);
                chrome_h.saturating_add(rows).saturating_add(1).saturating_add(buttons)
            })
            .collect();
        let rects = self.grid(&heights, columns, column_width);

        for (location, rect) in content.locations.iter().zip(rects) {
            let card = self.card(&location.name).variant(CardVariant::Outlined);
            let inner = card.inner(rect);
            self.draw(rect, &card);

            let lines = details(location, inner.width);
            let rows = u16::try_from(lines.len()).unwrap_or(u16::MAX);
            self.draw(inner, Paragraph::new(lines));

            let offset = rows.saturating_add(1).min(inner.height);
            let buttons_area = Rect::new(
                inner.x,
                inner.y.saturating_add(offset),
                inner.width,
                inner.height - offset,
            );
            self.place_buttons(buttons_area, Self::location_buttons(location));
        }
    }

    fn contact(&mut self, content: &ClinicContent) {
        self.heading("Ready to Schedule Your Visit?");
        self.text(
            "Our caring team is here to help. Book an appointment or call us today.",
            self.ctx.theme.base_style,
        );
        self.gap();

        self.button_row(vec![
            ButtonSpec::new(
                "Book Appointment",
                ButtonVariant::Primary,
                PageAction::BookAppointment(AppointmentSource::Cta),
            ),
            ButtonSpec::new(
                format!("Call {}", content.main_phone),
                ButtonVariant::Outline,
                PageAction::Call {
                    phone: content.main_phone.clone(),
                },
            ),
            ButtonSpec::new(
                format!("Emergency {}", content.emergency_phone),
                ButtonVariant::Destructive,
                PageAction::Emergency,
            ),
        ]);
    }

    fn footer(&mut self, content: &ClinicContent) {
        let theme = self.ctx.theme;
        let year = Local::now().year();
        self.text(
            &format!("© {year} {}. All rights reserved.", content.name),
            theme.dimmed_style,
        );
        self.text(
            &format!(
                "Main line {} · Emergencies {}",
                content.main_phone, content.emergency_phone
            ),
            theme.dimmed_style,
        );
    }
}
