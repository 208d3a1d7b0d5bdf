pub mod carousel;
pub mod carousel_controller;
pub mod focus_manager;
pub mod live_region;
pub mod navigation;
pub mod scroll_depth;
pub mod scroll_spy;
pub mod testimonial_queries;
pub mod text_size_control;

pub use carousel::{CarouselConfig, CarouselState, EMPTY_CAROUSEL_MESSAGE, SlideDirection};
pub use carousel_controller::{CarouselController, CarouselTick};
pub use focus_manager::FocusManager;
pub use live_region::{LiveRegion, Politeness};
pub use navigation::NavigationState;
pub use scroll_depth::ScrollDepthTracker;
pub use scroll_spy::{
    ActiveSectionPolicy, RootMargin, ScrollDirection, ScrollSpy, ScrollSpyConfig, SectionBounds,
    Viewport, scroll_progress,
};
pub use text_size_control::TextSizeControl;
