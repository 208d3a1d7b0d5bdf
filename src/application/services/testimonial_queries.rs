//! Read-only queries over the testimonial list.

use chrono::NaiveDate;

use crate::domain::entities::Testimonial;

/// Five-star testimonials.
#[must_use]
pub fn featured(testimonials: &[Testimonial]) -> Vec<&Testimonial> {
    testimonials.iter().filter(|t| t.is_featured()).collect()
}

/// Testimonials for treatment within three months before `today`.
#[must_use]
pub fn recent(testimonials: &[Testimonial], today: NaiveDate) -> Vec<&Testimonial> {
    testimonials.iter().filter(|t| t.is_recent(today)).collect()
}

/// Testimonials naming `doctor`, compared case-insensitively.
#[must_use]
pub fn by_doctor<'a>(testimonials: &'a [Testimonial], doctor: &str) -> Vec<&'a Testimonial> {
    let needle = doctor.to_lowercase();
    testimonials
        .iter()
        .filter(|t| t.doctor_name.to_lowercase().contains(&needle))
        .collect()
}

/// Mean rating rounded to one decimal, `None` for an empty list.
#[must_use]
pub fn average_rating(testimonials: &[Testimonial]) -> Option<f64> {
    if testimonials.is_empty() {
        return None;
    }
    let total: u32 = testimonials.iter().map(|t| u32::from(t.rating.value())).sum();
    #[allow(clippy::cast_precision_loss)]
    let mean = f64::from(total) / testimonials.len() as f64;
    Some((mean * 10.0).round() / 10.0)
}
