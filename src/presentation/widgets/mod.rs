mod carousel;
mod elder_button;
mod elder_card;
mod footer_bar;
mod header_bar;
mod skip_links;
mod star_rating;
mod status_bar;
mod testimonial_card;
mod text_size_control;

pub use carousel::{CarouselLayout, CarouselView};
pub use elder_button::{ButtonSize, ButtonVariant, ElderButton, LOADING_LABEL};
pub use elder_card::{CardPadding, CardVariant, ElderCard};
pub use footer_bar::{FocusRegion, FooterBar, FooterBarStyle};
pub use header_bar::{HeaderBar, HeaderBarLayout, HeaderBarStyle};
pub use skip_links::{SkipLinks, SkipLinksState};
pub use star_rating::StarRating;
pub use status_bar::StatusBar;
pub use testimonial_card::TestimonialCard;
pub use text_size_control::{TextSizeControlView, TextSizeLayout};
