//! Domain entity definitions.

mod clinic;
mod section;
mod testimonial;
mod text_size;

pub use clinic::{ClinicBenefit, ClinicContent, ClinicLocation, ClinicService, tel_uri};
pub use section::{NavigationItem, SectionId, SkipLinkTarget};
pub use testimonial::{MAX_RATING, Rating, Testimonial, TestimonialId};
pub use text_size::TextSize;

#[cfg(test)]
pub(crate) use testimonial::fixtures;
