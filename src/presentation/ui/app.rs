//! Main application orchestrator.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::event::{Event, EventStream, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use futures_util::StreamExt;
use ratatui::{
    DefaultTerminal, Frame,
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
};
use tachyonfx::{Effect, Interpolation, fx};
use tokio::sync::mpsc;
use tokio::time::interval;
use tracing::{debug, info, warn};

use crate::application::dto::LoadedContent;
use crate::application::services::{
    CarouselController, CarouselTick, FocusManager, LiveRegion, NavigationState, Politeness,
    ScrollDepthTracker, ScrollSpy, TextSizeControl, Viewport,
};
use crate::domain::analytics::AnalyticsEvent;
use crate::domain::entities::{ClinicContent, SectionId, TextSize};
use crate::domain::keybinding::{Action, Keymap};
use crate::domain::ports::{AnalyticsPort, PreferencesPort, SchedulerPort};
use crate::infrastructure::{AppConfig, LinkOpener};
use crate::presentation::events::{self, EventResult};
use crate::presentation::theme::Theme;
use crate::presentation::ui::page::{Page, PageAction, PageContext, PageLayout, SharedDocumentRoot};
use crate::presentation::ui::utils::{centered_rect, hit};
use crate::presentation::widgets::{
    CarouselLayout, CarouselView, FocusRegion, FooterBar, FooterBarStyle, HeaderBar,
    HeaderBarLayout, HeaderBarStyle, SkipLinks, SkipLinksState, StatusBar, TextSizeControlView,
    TextSizeLayout,
};

const ANIMATION_TICK_RATE: Duration = Duration::from_millis(33);
const SLIDE_EFFECT_MS: u32 = 500;
const VERSION_INFO: &str = concat!(" v", env!("CARGO_PKG_VERSION"), " ");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AppState {
    Running,
    Exiting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CarouselClick {
    Previous,
    Toggle,
    Next,
    Dot(usize),
}

/// Screen-space hit regions from the last frame.
#[derive(Debug, Default)]
struct ScreenLayout {
    skip_links: Vec<Rect>,
    header: HeaderBarLayout,
    text_size: TextSizeLayout,
    content: Rect,
}

/// Adapters the app runs against.
pub struct AppPorts {
    pub preferences: Arc<dyn PreferencesPort>,
    pub analytics: Arc<dyn AnalyticsPort>,
    pub scheduler: Arc<dyn SchedulerPort>,
    pub links: LinkOpener,
}

pub struct App {
    state: AppState,
    content: ClinicContent,
    theme: Theme,
    keymap: Keymap,
    analytics: Arc<dyn AnalyticsPort>,
    links: LinkOpener,
    mouse_enabled: bool,
    reduce_motion: bool,

    carousel: CarouselController,
    carousel_ticks: mpsc::UnboundedReceiver<CarouselTick>,
    carousel_index: usize,
    slide_effect: Option<Effect>,
    pending_fx: Duration,

    text_size: TextSizeControl,
    document_root: Arc<SharedDocumentRoot>,
    scroll_anchor: Option<SectionId>,

    scroll_spy: ScrollSpy,
    scroll_depth: ScrollDepthTracker,
    depth_primed: bool,
    live_region: LiveRegion,
    focus: FocusManager<FocusRegion>,
    navigation: NavigationState,
    nav_cursor: usize,
    skip_links: SkipLinksState,
    target_cursor: Option<usize>,
    hovered_target: Option<usize>,
    show_help: bool,

    scroll_y: u16,
    page: PageLayout,
    carousel_layout: Option<CarouselLayout>,
    screen: ScreenLayout,
}

impl App {
    #[must_use]
    pub fn new(loaded: LoadedContent, config: &AppConfig, ports: AppPorts) -> Self {
        let LoadedContent { content, origin } = loaded;
        info!(%origin, testimonials = content.testimonials.len(), "Page content ready");

        let (tick_tx, carousel_ticks) = mpsc::unbounded_channel();
        let carousel = CarouselController::new(
            content.testimonials.clone(),
            config.carousel.clone(),
            ports.scheduler,
            Arc::clone(&ports.analytics),
            tick_tx,
        );

        let document_root = Arc::new(SharedDocumentRoot::new());
        let text_size = TextSizeControl::mount(
            config.accessibility.default_text_size,
            ports.preferences,
            document_root.clone(),
            Arc::clone(&ports.analytics),
        );

        let (keymap, rejected) = Keymap::with_overrides(&config.keybindings);
        for key in rejected {
            warn!(%key, "Ignoring keybinding with unrecognised key");
        }

        let mut focus = FocusManager::new(FocusRegion::ORDER.to_vec());
        focus.focus(FocusRegion::Content);

        Self {
            state: AppState::Running,
            theme: Theme::new(&config.theme.accent_color, config.theme.high_contrast),
            keymap,
            scroll_depth: ScrollDepthTracker::new(Arc::clone(&ports.analytics)),
            analytics: ports.analytics,
            links: ports.links,
            mouse_enabled: config.mouse,
            reduce_motion: config.accessibility.reduce_motion,
            carousel_index: carousel.state().index(),
            carousel,
            carousel_ticks,
            slide_effect: None,
            pending_fx: Duration::ZERO,
            text_size,
            document_root,
            scroll_anchor: None,
            scroll_spy: ScrollSpy::new(config.scroll_spy.clone()),
            depth_primed: false,
            live_region: LiveRegion::new(config.accessibility.announcement_clear_delay()),
            focus,
            navigation: NavigationState::clinic(),
            nav_cursor: 0,
            skip_links: SkipLinksState::default(),
            target_cursor: None,
            hovered_target: None,
            show_help: false,
            scroll_y: 0,
            page: PageLayout::default(),
            carousel_layout: None,
            screen: ScreenLayout::default(),
            content,
        }
    }

    /// # Errors
    /// Returns error if drawing to the terminal fails.
    pub async fn run(mut self, terminal: &mut DefaultTerminal) -> color_eyre::Result<()> {
        self.analytics.track(&AnalyticsEvent::PageView {
            path: "/".to_string(),
        });

        self.run_event_loop(terminal).await?;

        self.carousel.shutdown();
        info!("Application exiting normally");
        Ok(())
    }

    async fn run_event_loop(&mut self, terminal: &mut DefaultTerminal) -> color_eyre::Result<()> {
        let mut terminal_events = EventStream::new();
        let mut animation_interval = interval(ANIMATION_TICK_RATE);

        terminal.draw(|frame| self.render(frame))?;

        while self.state != AppState::Exiting {
            tokio::select! {
                biased;

                Some(tick) = self.carousel_ticks.recv() => {
                    if self.handle_carousel_tick(tick) {
                        terminal.draw(|frame| self.render(frame))?;
                    }
                }

                _ = animation_interval.tick() => {
                    if self.tick(Instant::now()) {
                        terminal.draw(|frame| self.render(frame))?;
                    }
                }

                Some(Ok(event)) = terminal_events.next() => {
                    match self.handle_terminal_event(&event) {
                        EventResult::Exit => self.state = AppState::Exiting,
                        EventResult::Consumed => {
                            terminal.draw(|frame| self.render(frame))?;
                        }
                        EventResult::Continue => {}
                    }
                }
            }
        }

        Ok(())
    }

    fn handle_carousel_tick(&mut self, tick: CarouselTick) -> bool {
        let advanced = self.carousel.handle_tick(tick);
        if advanced {
            self.after_carousel_change();
        }
        advanced
    }

    /// Expires announcements, settles scroll depth and advances effects.
    /// Returns whether a redraw is needed.
    fn tick(&mut self, now: Instant) -> bool {
        let had_message = self.live_region.current().is_some();
        self.live_region.tick_at(now);
        let cleared = had_message && self.live_region.current().is_none();

        self.scroll_depth.tick_at(now);

        if self.slide_effect.is_some() {
            self.pending_fx = self.pending_fx.saturating_add(ANIMATION_TICK_RATE);
            return true;
        }
        cleared
    }

    fn handle_terminal_event(&mut self, event: &Event) -> EventResult {
        if let Some(key) = events::key_press(event) {
            return self.handle_key(key);
        }
        match event {
            Event::Mouse(mouse) if self.mouse_enabled => self.handle_mouse(mouse),
            Event::Resize(..) => EventResult::Consumed,
            _ => EventResult::Continue,
        }
    }

    fn handle_key(&mut self, key: &KeyEvent) -> EventResult {
        let action = self.keymap.resolve(key);
        if self.show_help {
            if action == Some(Action::Quit) {
                return EventResult::Exit;
            }
            self.show_help = false;
            return EventResult::Consumed;
        }
        match action {
            Some(action) => self.handle_action(action),
            None => EventResult::Continue,
        }
    }

    fn handle_action(&mut self, action: Action) -> EventResult {
        if let Some(index) = action.section_index() {
            return EventResult::from_changed(self.go_to_nav_item(index));
        }

        let changed = match action {
            Action::Quit => return EventResult::Exit,
            Action::ToggleHelp => {
                self.show_help = true;
                true
            }
            Action::FocusNext => {
                self.focus.focus_next();
                true
            }
            Action::FocusPrevious => {
                self.focus.focus_previous();
                true
            }
            Action::IncreaseTextSize | Action::DecreaseTextSize | Action::ResetTextSize => {
                self.change_text_size(|control| control.handle_action(action))
            }
            Action::TogglePlay => self.carousel_action(action),
            Action::ScrollUp => self.scroll_by(-1),
            Action::ScrollDown => self.scroll_by(1),
            Action::PageUp => self.scroll_by(-self.page_step()),
            Action::PageDown => self.scroll_by(self.page_step()),
            Action::ScrollToTop => self.scroll_to(0),
            Action::ScrollToBottom => self.scroll_to(self.max_scroll()),
            _ => self.handle_region_action(action),
        };
        EventResult::from_changed(changed)
    }

    fn handle_region_action(&mut self, action: Action) -> bool {
        match self.focus.current().unwrap_or_default() {
            FocusRegion::SkipLinks => match action {
                Action::NavigateLeft | Action::NavigateUp => {
                    self.skip_links.select_previous();
                    true
                }
                Action::NavigateRight | Action::NavigateDown => {
                    self.skip_links.select_next();
                    true
                }
                Action::Activate => self.follow_skip_link(),
                _ => false,
            },
            FocusRegion::Navigation => {
                let count = self.navigation.items().len();
                match action {
                    Action::NavigateLeft if count > 0 => {
                        self.nav_cursor = (self.nav_cursor + count - 1) % count;
                        true
                    }
                    Action::NavigateRight if count > 0 => {
                        self.nav_cursor = (self.nav_cursor + 1) % count;
                        true
                    }
                    Action::SelectFirst => {
                        self.nav_cursor = 0;
                        true
                    }
                    Action::SelectLast => {
                        self.nav_cursor = count.saturating_sub(1);
                        true
                    }
                    Action::Activate => self.go_to_nav_item(self.nav_cursor),
                    _ => false,
                }
            }
            FocusRegion::TextSize => self.change_text_size(|control| control.handle_action(action)),
            FocusRegion::Content => match action {
                Action::NavigateUp => self.scroll_by(-1),
                Action::NavigateDown => self.scroll_by(1),
                Action::NavigateLeft => self.move_target(false),
                Action::NavigateRight => self.move_target(true),
                Action::SelectFirst => self.scroll_to(0),
                Action::SelectLast => self.scroll_to(self.max_scroll()),
                Action::Activate => match self.target_cursor {
                    Some(index) => self.activate_target(index),
                    None => false,
                },
                _ => false,
            },
            FocusRegion::Carousel => match action {
                Action::NavigateUp => self.scroll_by(-1),
                Action::NavigateDown => self.scroll_by(1),
                _ if self.carousel.state().config().enable_keyboard => {
                    self.carousel_action(action)
                }
                _ => false,
            },
        }
    }

    fn carousel_action(&mut self, action: Action) -> bool {
        let changed = match action {
            Action::NavigateLeft => self.carousel.previous(),
            Action::NavigateRight => self.carousel.next(),
            Action::SelectFirst => self.carousel.first(),
            Action::SelectLast => self.carousel.last(),
            Action::Activate | Action::TogglePlay => self.carousel.toggle_play(),
            _ => return false,
        };
        if changed {
            self.after_carousel_change();
        }
        changed
    }

    fn carousel_click(&mut self, click: CarouselClick) -> bool {
        self.focus.focus(FocusRegion::Carousel);
        let changed = match click {
            CarouselClick::Previous => self.carousel.previous(),
            CarouselClick::Toggle => self.carousel.toggle_play(),
            CarouselClick::Next => self.carousel.next(),
            CarouselClick::Dot(index) => self.carousel.jump_to(index),
        };
        if changed {
            self.after_carousel_change();
        }
        true
    }

    /// Starts the slide effect on a new card and announces the change.
    fn after_carousel_change(&mut self) {
        let index = self.carousel.state().index();
        if index != self.carousel_index {
            self.carousel_index = index;
            if !self.reduce_motion {
                self.slide_effect = Some(fx::coalesce((SLIDE_EFFECT_MS, Interpolation::CircOut)));
                self.pending_fx = Duration::ZERO;
            }
        }
        let message = self.carousel.state().announcement().to_string();
        self.live_region.announce(message, Instant::now());
    }

    fn change_text_size(&mut self, change: impl FnOnce(&mut TextSizeControl) -> bool) -> bool {
        let anchor = self.scroll_spy.active().cloned();
        if !change(&mut self.text_size) {
            return false;
        }
        let message = self.text_size.announcement().to_string();
        self.live_region.announce(message, Instant::now());
        self.scroll_anchor = anchor;
        true
    }

    fn set_text_size(&mut self, size: TextSize) -> bool {
        self.change_text_size(|control| control.set_exact(size))
    }

    fn follow_skip_link(&mut self) -> bool {
        let Some(link) = self.skip_links.selected().cloned() else {
            return false;
        };
        let target = if link.is_main_content() {
            self.page.sections.first().map(|s| s.id.clone())
        } else {
            Some(link.target)
        };
        let Some(target) = target else {
            return false;
        };

        self.scroll_to_section(&target);
        let region = if target.as_str() == SectionId::TESTIMONIALS {
            FocusRegion::Carousel
        } else {
            FocusRegion::Content
        };
        self.focus.focus(region);

        let top = self.page.section(&target).map_or(0, |s| s.top);
        self.target_cursor = self
            .page
            .targets
            .iter()
            .position(|t| u32::from(t.area.y) >= top);
        debug!(section = %target, "Followed skip link");
        true
    }

    fn go_to_nav_item(&mut self, index: usize) -> bool {
        match self.navigation.select(index) {
            Some(section) => {
                self.nav_cursor = index;
                self.scroll_to_section(&section)
            }
            None => false,
        }
    }

    fn scroll_to_section(&mut self, id: &SectionId) -> bool {
        let Some(top) = self.page.section(id).map(|s| s.top) else {
            return false;
        };
        self.scroll_to(u16::try_from(top).unwrap_or(u16::MAX));

        let label = self
            .navigation
            .items()
            .iter()
            .find(|item| &item.target == id)
            .map_or_else(|| id.to_string(), |item| item.label.clone());
        self.live_region
            .announce(format!("Jumped to {label}"), Instant::now());
        true
    }

    fn move_target(&mut self, forward: bool) -> bool {
        let count = self.page.targets.len();
        if count == 0 {
            return false;
        }
        let next = match self.target_cursor {
            Some(index) if forward => (index + 1) % count,
            Some(index) => (index + count - 1) % count,
            None => {
                let top = self.scroll_y;
                let visible = self.page.targets.iter().position(|t| t.area.y >= top);
                visible.unwrap_or(0)
            }
        };
        self.target_cursor = Some(next);

        let target = &self.page.targets[next];
        let (area, label) = (target.area, target.label.clone());
        self.reveal(area);
        self.live_region.announce(label, Instant::now());
        true
    }

    fn activate_target(&mut self, index: usize) -> bool {
        let Some(action) = self.page.targets.get(index).map(|t| t.action.clone()) else {
            return false;
        };
        self.activate(&action);
        true
    }

    fn activate(&mut self, action: &PageAction) {
        if let Some(event) = action.analytics_event() {
            self.analytics.track(&event);
        }
        if let Some(url) = action.link(&self.content) {
            self.links.open(url);
        }
        if let Some(section) = action.scroll_target() {
            self.scroll_to_section(&section);
        }

        let now = Instant::now();
        match action {
            PageAction::BookAppointment(_) => self.live_region.announce(
                format!("Calling {} to book an appointment", self.content.main_phone),
                now,
            ),
            PageAction::Call { phone } => {
                self.live_region.announce(format!("Calling {phone}"), now);
            }
            PageAction::Emergency => self.live_region.announce_with(
                format!("Calling emergency line {}", self.content.emergency_phone),
                Politeness::Assertive,
                now,
            ),
            PageAction::Directions { location, .. } => self
                .live_region
                .announce(format!("Opening directions to {location}"), now),
            PageAction::Service { .. } | PageAction::ScrollTo(_) => {}
        }
        info!(?action, "Page action activated");
    }

    fn handle_mouse(&mut self, mouse: &MouseEvent) -> EventResult {
        if let Some(delta) = events::wheel_delta(mouse.kind) {
            return EventResult::from_changed(self.scroll_by(delta));
        }
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => self.click(mouse.column, mouse.row),
            MouseEventKind::Moved => self.hover(mouse.column, mouse.row),
            _ => EventResult::Continue,
        }
    }

    fn click(&mut self, column: u16, row: u16) -> EventResult {
        if let Some(index) = self
            .screen
            .skip_links
            .iter()
            .position(|r| hit(*r, column, row))
        {
            self.skip_links.select(index);
            return EventResult::from_changed(self.follow_skip_link());
        }

        if let Some(index) = self
            .screen
            .header
            .items
            .iter()
            .position(|r| hit(*r, column, row))
        {
            return EventResult::from_changed(self.go_to_nav_item(index));
        }
        if self
            .screen
            .header
            .scroll_top
            .is_some_and(|r| hit(r, column, row))
        {
            return EventResult::from_changed(self.scroll_to(0));
        }

        if let Some(size) = self.text_size_at(column, row) {
            self.focus.focus(FocusRegion::TextSize);
            self.set_text_size(size);
            return EventResult::Consumed;
        }

        let Some((x, y)) = self.to_document(column, row) else {
            return EventResult::Continue;
        };
        if let Some(click) = self.carousel_click_at(x, y) {
            return EventResult::from_changed(self.carousel_click(click));
        }
        if let Some(index) = self.page.target_at(x, y) {
            self.focus.focus(FocusRegion::Content);
            self.target_cursor = Some(index);
            return EventResult::from_changed(self.activate_target(index));
        }
        EventResult::Continue
    }

    fn text_size_at(&self, column: u16, row: u16) -> Option<TextSize> {
        let layout = &self.screen.text_size;
        let current = self.text_size.current();
        if hit(layout.decrease, column, row) {
            return current.smaller();
        }
        if hit(layout.increase, column, row) {
            return current.larger();
        }
        layout
            .levels
            .iter()
            .find(|(_, rect)| hit(*rect, column, row))
            .map(|(size, _)| *size)
    }

    fn carousel_click_at(&self, x: u16, y: u16) -> Option<CarouselClick> {
        let layout = self.carousel_layout.as_ref()?;
        let on = |rect: Option<Rect>| rect.is_some_and(|r| hit(r, x, y));
        if on(layout.previous) {
            Some(CarouselClick::Previous)
        } else if on(layout.toggle) {
            Some(CarouselClick::Toggle)
        } else if on(layout.next) {
            Some(CarouselClick::Next)
        } else {
            layout
                .dots
                .iter()
                .position(|r| hit(*r, x, y))
                .map(CarouselClick::Dot)
        }
    }

    fn hover(&mut self, column: u16, row: u16) -> EventResult {
        let position = self.to_document(column, row);
        let over_carousel = position
            .zip(self.page.carousel)
            .is_some_and(|((x, y), area)| hit(area, x, y));
        let carousel_changed = if over_carousel {
            self.carousel.hover_enter()
        } else {
            self.carousel.hover_leave()
        };

        let hovered = position.and_then(|(x, y)| self.page.target_at(x, y));
        let hover_changed = hovered != self.hovered_target;
        self.hovered_target = hovered;

        EventResult::from_changed(carousel_changed || hover_changed)
    }

    fn to_document(&self, column: u16, row: u16) -> Option<(u16, u16)> {
        let content = self.screen.content;
        hit(content, column, row).then(|| {
            (
                column - content.x,
                (row - content.y).saturating_add(self.scroll_y),
            )
        })
    }

    /// Visible part of a document rect, in screen coordinates.
    fn to_screen(&self, rect: Rect) -> Option<Rect> {
        let content = self.screen.content;
        let viewport = Rect::new(0, self.scroll_y, content.width, content.height);
        let visible = rect.intersection(viewport);
        (!visible.is_empty()).then(|| {
            Rect::new(
                visible.x + content.x,
                visible.y - self.scroll_y + content.y,
                visible.width,
                visible.height,
            )
        })
    }

    fn page_step(&self) -> i32 {
        i32::from(self.screen.content.height.saturating_sub(2).max(1))
    }

    const fn max_scroll(&self) -> u16 {
        self.page.height.saturating_sub(self.screen.content.height)
    }

    fn viewport(&self) -> Viewport {
        Viewport::new(
            u32::from(self.scroll_y),
            u32::from(self.screen.content.height),
            u32::from(self.page.height),
        )
    }

    fn scroll_by(&mut self, delta: i32) -> bool {
        let target = (i32::from(self.scroll_y) + delta).clamp(0, i32::from(u16::MAX));
        self.scroll_to(u16::try_from(target).unwrap_or(0))
    }

    /// Returns whether the position changed.
    fn scroll_to(&mut self, y: u16) -> bool {
        let previous = self.scroll_y;
        self.scroll_y = y;
        self.sync_viewport(Instant::now());
        self.scroll_y != previous
    }

    /// Clamps the scroll position and feeds it to the scroll observers.
    fn sync_viewport(&mut self, now: Instant) {
        self.scroll_y = self.scroll_y.min(self.max_scroll());
        let viewport = self.viewport();
        self.navigation.on_scroll(viewport.scroll_y);
        if self.scroll_spy.observe(viewport) {
            self.navigation
                .set_active(self.scroll_spy.active().cloned());
        }
        self.scroll_depth.on_scroll(viewport, now);
    }

    /// Keeps `area` inside the viewport.
    fn reveal(&mut self, area: Rect) {
        let height = self.screen.content.height;
        if area.y < self.scroll_y {
            self.scroll_to(area.y.saturating_sub(1));
        } else if area.bottom() > self.scroll_y.saturating_add(height) {
            self.scroll_to(area.bottom().saturating_sub(height).saturating_add(1));
        }
    }

    fn focused(&self, region: FocusRegion) -> bool {
        self.focus.is_focused(region)
    }

    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let skip_height = SkipLinks::new(&self.skip_links)
            .focused(self.focused(FocusRegion::SkipLinks))
            .height();
        let [skip_area, header_area, controls_area, content_area, status_area, footer_area] =
            Layout::vertical([
                Constraint::Length(skip_height),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(1),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .areas(area);

        let skip_links = SkipLinks::new(&self.skip_links)
            .focused(self.focused(FocusRegion::SkipLinks))
            .theme(self.theme);
        self.screen.skip_links = skip_links.layout(skip_area);
        frame.render_widget(&skip_links, skip_area);

        let selected = self
            .focused(FocusRegion::Navigation)
            .then_some(self.nav_cursor);
        let header = HeaderBar::new(&self.content.name, &self.content.tagline, &self.navigation)
            .selected(selected)
            .style(HeaderBarStyle::from_theme(&self.theme));
        self.screen.header = header.layout(header_area);
        frame.render_widget(header, header_area);

        let control = TextSizeControlView::new(self.text_size.current())
            .focused(self.focused(FocusRegion::TextSize))
            .theme(self.theme);
        self.screen.text_size = control.layout(controls_area);
        frame.render_widget(&control, controls_area);

        self.render_page(frame.buffer_mut(), content_area);

        let section = self
            .navigation
            .active()
            .and_then(|id| self.navigation.items().iter().find(|i| &i.target == id))
            .map(|item| item.label.clone())
            .unwrap_or_default();
        let status = StatusBar::new()
            .message(self.live_region.message())
            .politeness(
                self.live_region
                    .current()
                    .map_or(Politeness::Polite, |a| a.politeness),
            )
            .section(section)
            .progress(self.scroll_spy.progress());
        frame.render_widget(&status, status_area);

        let footer = FooterBar::new(self.keymap.visible())
            .focus(self.focus.current().unwrap_or_default())
            .right_info(Some(VERSION_INFO))
            .style(FooterBarStyle::from_theme(&self.theme));
        frame.render_widget(footer, footer_area);

        if self.show_help {
            self.render_help(frame, area);
        }
    }

    fn render_page(&mut self, buf: &mut Buffer, area: Rect) {
        let ctx = PageContext {
            theme: self.theme,
            text_size: self.document_root.text_size(),
            carousel: self.carousel.state(),
            carousel_focused: self.focused(FocusRegion::Carousel),
            focused_target: self
                .focused(FocusRegion::Content)
                .then_some(self.target_cursor)
                .flatten(),
            hovered_target: self.hovered_target,
        };
        let rendered = Page::new(&self.content).render(&ctx, area.width);
        let carousel_layout = rendered
            .layout
            .carousel
            .map(|rect| CarouselView::new(self.carousel.state()).layout(rect));

        let relayout = rendered.layout.height != self.page.height || area != self.screen.content;
        if relayout
            && let Some(anchor) = self.scroll_anchor.take()
            && let Some(section) = rendered.layout.section(&anchor)
        {
            self.scroll_y = u16::try_from(section.top).unwrap_or(u16::MAX);
        }
        self.scroll_y = self
            .scroll_y
            .min(rendered.layout.height.saturating_sub(area.height));

        for y in 0..area.height {
            let doc_y = self.scroll_y.saturating_add(y);
            if doc_y >= rendered.buffer.area.height {
                break;
            }
            for x in 0..area.width {
                buf[(area.x + x, area.y + y)] = rendered.buffer[(x, doc_y)].clone();
            }
        }

        self.page = rendered.layout;
        self.carousel_layout = carousel_layout;
        self.screen.content = area;

        if relayout {
            self.scroll_spy.set_sections(self.page.sections.clone());
            self.sync_viewport(Instant::now());
        }
        if !self.depth_primed && self.page.height > 0 {
            self.depth_primed = true;
            let viewport = self.viewport();
            self.scroll_depth.evaluate(viewport);
        }

        self.process_slide_effect(buf);
    }

    fn process_slide_effect(&mut self, buf: &mut Buffer) {
        let card = self
            .carousel_layout
            .as_ref()
            .and_then(|layout| self.to_screen(layout.card));
        let (Some(card), Some(effect)) = (card, self.slide_effect.as_mut()) else {
            self.slide_effect = None;
            return;
        };

        let elapsed = std::mem::take(&mut self.pending_fx);
        if effect.process(elapsed.into(), buf, card).is_some() {
            self.slide_effect = None;
        }
    }

    fn render_help(&self, frame: &mut Frame, area: Rect) {
        let popup = centered_rect(60, 70, area);
        let key_style = self.theme.heading_style;

        let mut lines: Vec<Line> = self
            .keymap
            .visible()
            .map(|bind| {
                Line::from(vec![
                    Span::styled(format!("{:>8}  ", bind.key_label()), key_style),
                    Span::raw(bind.label.to_string()),
                ])
            })
            .collect();
        lines.push(Line::raw(""));
        for region in FocusRegion::ORDER {
            let hints = region
                .hints()
                .iter()
                .map(|(key, label)| format!("{key} {label}"))
                .collect::<Vec<_>>()
                .join(", ");
            lines.push(Line::from(vec![
                Span::styled(format!("{:>14}  ", region.display_name()), key_style),
                Span::raw(hints),
            ]));
        }
        lines.push(Line::raw(""));
        lines.push(Line::styled(
            "Numbers 1-6 jump to a section. Press any key to close.",
            self.theme.dimmed_style,
        ));

        let block = Block::default()
            .title(" Keyboard Help ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(self.theme.accent).add_modifier(Modifier::BOLD));

        frame.render_widget(Clear, popup);
        frame.render_widget(
            Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
            popup,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dto::ContentOrigin;
    use crate::domain::analytics::AppointmentSource;
    use crate::domain::ports::mocks::{ManualScheduler, MockPreferences};
    use crate::infrastructure::BundledContent;
    use crossterm::event::{KeyCode, KeyModifiers};
    use parking_lot::Mutex;
    use ratatui::{Terminal, backend::TestBackend};

    #[derive(Default)]
    struct RecordingAnalytics {
        events: Mutex<Vec<AnalyticsEvent>>,
    }

    impl AnalyticsPort for RecordingAnalytics {
        fn track(&self, event: &AnalyticsEvent) {
            self.events.lock().push(event.clone());
        }
    }

    fn app_with_scheduler(
        config: &AppConfig,
        scheduler: ManualScheduler,
    ) -> (App, Arc<RecordingAnalytics>) {
        let analytics = Arc::new(RecordingAnalytics::default());
        let ports = AppPorts {
            preferences: Arc::new(MockPreferences::new()),
            analytics: analytics.clone(),
            scheduler: Arc::new(scheduler),
            links: LinkOpener::new(false),
        };
        let loaded = LoadedContent {
            content: BundledContent::parse().unwrap(),
            origin: ContentOrigin::Bundled,
        };
        (App::new(loaded, config, ports), analytics)
    }

    fn app_with(config: &AppConfig) -> (App, Arc<RecordingAnalytics>) {
        app_with_scheduler(config, ManualScheduler::new())
    }

    fn app() -> (App, Arc<RecordingAnalytics>) {
        app_with(&AppConfig::default())
    }

    fn draw(app: &mut App) {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn click(column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn test_starts_focused_on_page_content() {
        let (app, _) = app();
        assert_eq!(app.focus.current(), Some(FocusRegion::Content));
    }

    #[test]
    fn test_tab_cycles_and_wraps() {
        let (mut app, _) = app();
        app.handle_action(Action::FocusNext);
        assert_eq!(app.focus.current(), Some(FocusRegion::Carousel));
        app.handle_action(Action::FocusNext);
        assert_eq!(app.focus.current(), Some(FocusRegion::SkipLinks));
        app.handle_action(Action::FocusPrevious);
        assert_eq!(app.focus.current(), Some(FocusRegion::Carousel));
    }

    #[test]
    fn test_quit_key_exits() {
        let (mut app, _) = app();
        assert_eq!(app.handle_key(&key(KeyCode::Char('q'))), EventResult::Exit);
    }

    #[test]
    fn test_help_closes_on_any_key() {
        let (mut app, _) = app();
        app.handle_action(Action::ToggleHelp);
        assert!(app.show_help);
        assert_eq!(app.handle_key(&key(KeyCode::Char('x'))), EventResult::Consumed);
        assert!(!app.show_help);
    }

    #[test]
    fn test_text_size_change_is_announced_and_grows_page() {
        let (mut app, analytics) = app();
        draw(&mut app);
        let before = app.page.height;

        assert_eq!(
            app.handle_action(Action::IncreaseTextSize),
            EventResult::Consumed
        );
        assert_eq!(app.live_region.message(), "Text size changed to Large");
        assert_eq!(app.document_root.text_size(), TextSize::Large);

        draw(&mut app);
        assert!(app.page.height > before);
        assert!(
            analytics
                .events
                .lock()
                .contains(&AnalyticsEvent::TextSizeChange {
                    size: TextSize::Large
                })
        );
    }

    #[test]
    fn test_text_size_at_limit_is_ignored() {
        let (mut app, _) = app();
        assert_eq!(
            app.handle_action(Action::DecreaseTextSize),
            EventResult::Continue
        );
        assert_eq!(app.live_region.message(), "");
    }

    #[test]
    fn test_section_jump_scrolls_and_announces() {
        let (mut app, _) = app();
        draw(&mut app);

        app.handle_action(Action::JumpToSection2);
        let top = app
            .page
            .section(&SectionId::new(SectionId::SERVICES))
            .unwrap()
            .top;
        assert_eq!(u32::from(app.scroll_y), top.min(u32::from(app.max_scroll())));
        assert_eq!(app.live_region.message(), "Jumped to Services");
    }

    #[test]
    fn test_scroll_is_clamped() {
        let (mut app, _) = app();
        draw(&mut app);

        app.handle_action(Action::ScrollToBottom);
        assert_eq!(app.scroll_y, app.max_scroll());
        assert_eq!(app.handle_action(Action::ScrollDown), EventResult::Continue);

        app.handle_action(Action::ScrollToTop);
        assert_eq!(app.scroll_y, 0);
        assert_eq!(app.handle_action(Action::ScrollUp), EventResult::Continue);
    }

    #[test]
    fn test_activating_targets_tracks_analytics() {
        let (mut app, analytics) = app();
        draw(&mut app);

        let book = app
            .page
            .targets
            .iter()
            .position(|t| t.action == PageAction::BookAppointment(AppointmentSource::Hero))
            .unwrap();
        app.target_cursor = Some(book);
        app.handle_action(Action::Activate);

        let emergency = app
            .page
            .targets
            .iter()
            .position(|t| t.action == PageAction::Emergency)
            .unwrap();
        app.target_cursor = Some(emergency);
        app.handle_action(Action::Activate);

        let events = analytics.events.lock();
        assert!(events.contains(&AnalyticsEvent::AppointmentClick {
            source: AppointmentSource::Hero
        }));
        assert!(events.contains(&AnalyticsEvent::EmergencyClick));
        drop(events);
        assert_eq!(
            app.live_region.current().map(|a| a.politeness),
            Some(Politeness::Assertive)
        );
    }

    #[test]
    fn test_arrow_keys_walk_targets() {
        let (mut app, _) = app();
        draw(&mut app);

        app.handle_action(Action::NavigateRight);
        assert_eq!(app.target_cursor, Some(0));
        app.handle_action(Action::NavigateLeft);
        assert_eq!(app.target_cursor, Some(app.page.targets.len() - 1));
        assert!(app.scroll_y > 0);
    }

    #[test]
    fn test_carousel_keys_change_slide() {
        let (mut app, _) = app();
        draw(&mut app);
        app.focus.focus(FocusRegion::Carousel);

        app.handle_action(Action::NavigateRight);
        assert_eq!(app.carousel.state().index(), 1);
        assert!(app.slide_effect.is_some());
        assert!(app.live_region.message().starts_with("Showing testimonial 2 of"));

        app.handle_action(Action::SelectFirst);
        assert_eq!(app.carousel.state().index(), 0);
    }

    #[test]
    fn test_auto_advance_is_announced() {
        let scheduler = ManualScheduler::new();
        let (mut app, _) = app_with_scheduler(&AppConfig::default(), scheduler.clone());
        let count = app.content.testimonials.len();
        let second = app.content.testimonials[1].patient_name.clone();

        scheduler.advance(Duration::from_millis(8000));
        let tick = app.carousel_ticks.try_recv().unwrap();
        assert!(app.handle_carousel_tick(tick));

        assert_eq!(app.carousel.state().index(), 1);
        assert_eq!(
            app.live_region.message(),
            format!("Showing testimonial 2 of {count}. {second}")
        );
        assert_eq!(
            app.live_region.current().map(|a| a.politeness),
            Some(Politeness::Polite)
        );
    }

    #[test]
    fn test_reduce_motion_skips_slide_effect() {
        let mut config = AppConfig::default();
        config.accessibility.reduce_motion = true;
        let (mut app, _) = app_with(&config);
        app.focus.focus(FocusRegion::Carousel);

        app.handle_action(Action::NavigateRight);
        assert_eq!(app.carousel.state().index(), 1);
        assert!(app.slide_effect.is_none());
    }

    #[test]
    fn test_skip_link_to_main_content() {
        let (mut app, _) = app();
        draw(&mut app);
        app.scroll_to(20);
        app.focus.focus(FocusRegion::SkipLinks);

        app.handle_action(Action::Activate);
        assert_eq!(app.focus.current(), Some(FocusRegion::Content));
        let hero = app.page.sections.first().unwrap().top;
        assert_eq!(u32::from(app.scroll_y), hero);
    }

    #[test]
    fn test_clicking_nav_item_scrolls() {
        let (mut app, _) = app();
        draw(&mut app);

        let contact = app.screen.header.items[5];
        let result = app.handle_terminal_event(&click(contact.x, contact.y));
        assert_eq!(result, EventResult::Consumed);
        assert_eq!(app.scroll_y, app.max_scroll());
    }

    #[test]
    fn test_clicks_ignored_without_mouse() {
        let mut config = AppConfig::default();
        config.mouse = false;
        let (mut app, _) = app_with(&config);
        draw(&mut app);

        let contact = app.screen.header.items[5];
        let result = app.handle_terminal_event(&click(contact.x, contact.y));
        assert_eq!(result, EventResult::Continue);
        assert_eq!(app.scroll_y, 0);
    }

    #[test]
    fn test_announcements_expire_on_tick() {
        let (mut app, _) = app();
        let start = Instant::now();
        app.live_region.announce("Hello", start);
        assert!(!app.tick(start));
        assert!(app.tick(start + Duration::from_secs(10)));
        assert_eq!(app.live_region.message(), "");
    }
}
