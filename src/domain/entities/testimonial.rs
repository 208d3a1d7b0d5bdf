//! Patient testimonial entity.

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::errors::ContentError;

/// Highest star rating a testimonial can carry.
pub const MAX_RATING: u8 = 5;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TestimonialId(pub String);

impl TestimonialId {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TestimonialId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for TestimonialId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Star rating in `1..=5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    /// Validates a raw star count.
    ///
    /// # Errors
    /// Returns [`ContentError::InvalidRating`] when the value is outside `1..=5`.
    pub fn new(value: u8) -> Result<Self, ContentError> {
        if (1..=MAX_RATING).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ContentError::InvalidRating { value })
        }
    }

    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Text alternative for the star graphic.
    #[must_use]
    pub fn label(self) -> String {
        format!("{} out of {MAX_RATING} stars", self.0)
    }
}

impl TryFrom<u8> for Rating {
    type Error = ContentError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

/// An immutable patient quote shown for social proof.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Testimonial {
    pub id: TestimonialId,
    /// Display name, usually anonymized ("Sarah M.").
    pub patient_name: String,
    pub condition: String,
    pub rating: Rating,
    pub text: String,
    pub treatment_date: NaiveDate,
    pub doctor_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doctor_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default)]
    pub verified: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl Testimonial {
    /// Treatment date as shown on the card, e.g. "October 2024".
    #[must_use]
    pub fn formatted_date(&self) -> String {
        self.treatment_date.format("%B %Y").to_string()
    }

    /// Provider name followed by the title when present.
    #[must_use]
    pub fn provider_line(&self) -> String {
        match &self.doctor_title {
            Some(title) => format!("{}, {title}", self.doctor_name),
            None => self.doctor_name.clone(),
        }
    }

    #[must_use]
    pub fn is_featured(&self) -> bool {
        self.rating.value() == MAX_RATING
    }

    /// Whether treatment happened within three months before `today`.
    #[must_use]
    pub fn is_recent(&self, today: NaiveDate) -> bool {
        today
            .checked_sub_months(Months::new(3))
            .is_some_and(|cutoff| self.treatment_date >= cutoff)
    }

    /// Initials used when no avatar is available.
    #[must_use]
    pub fn initials(&self) -> String {
        self.patient_name
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .filter(|c| c.is_alphabetic())
            .take(2)
            .collect::<String>()
            .to_uppercase()
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn testimonial(id: &str, name: &str, rating: u8) -> Testimonial {
        Testimonial {
            id: TestimonialId::from(id),
            patient_name: name.to_string(),
            condition: "Heart Health".to_string(),
            rating: Rating::new(rating).unwrap(),
            text: "Wonderful care.".to_string(),
            treatment_date: NaiveDate::from_ymd_opt(2024, 10, 15).unwrap(),
            doctor_name: "Dr. Maria Rodriguez".to_string(),
            doctor_title: Some("MD, Cardiology".to_string()),
            avatar: None,
            verified: true,
            location: Some("Berkeley, CA".to_string()),
        }
    }

    pub fn testimonials(count: usize) -> Vec<Testimonial> {
        (1..=count)
            .map(|i| testimonial(&format!("testimonial-{i}"), &format!("Patient {i}"), 5))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::testimonial;
    use super::*;
    use test_case::test_case;

    #[test_case(0, false ; "zero")]
    #[test_case(1, true ; "one")]
    #[test_case(5, true ; "five")]
    #[test_case(6, false ; "six")]
    fn test_rating_bounds(value: u8, valid: bool) {
        assert_eq!(Rating::new(value).is_ok(), valid);
    }

    #[test]
    fn test_rating_label() {
        assert_eq!(Rating::new(4).unwrap().label(), "4 out of 5 stars");
    }

    #[test]
    fn test_formatted_date() {
        let t = testimonial("t1", "Margaret S.", 5);
        assert_eq!(t.formatted_date(), "October 2024");
    }

    #[test]
    fn test_provider_line() {
        let mut t = testimonial("t1", "Margaret S.", 5);
        assert_eq!(t.provider_line(), "Dr. Maria Rodriguez, MD, Cardiology");
        t.doctor_title = None;
        assert_eq!(t.provider_line(), "Dr. Maria Rodriguez");
    }

    #[test]
    fn test_is_recent() {
        let t = testimonial("t1", "Margaret S.", 5);
        let close = NaiveDate::from_ymd_opt(2024, 12, 1).unwrap();
        let far = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        assert!(t.is_recent(close));
        assert!(!t.is_recent(far));
    }

    #[test]
    fn test_initials() {
        let t = testimonial("t1", "Margaret S.", 5);
        assert_eq!(t.initials(), "MS");
    }

    #[test]
    fn test_deserialize_camel_case() {
        let json = r#"{
            "id": "testimonial-9",
            "patientName": "Ana P.",
            "condition": "Geriatric Care",
            "rating": 4,
            "text": "Kind staff.",
            "treatmentDate": "2024-09-01",
            "doctorName": "Dr. Sarah Williams",
            "verified": true
        }"#;

        let t: Testimonial = serde_json::from_str(json).unwrap();
        assert_eq!(t.rating.value(), 4);
        assert_eq!(t.doctor_title, None);
        assert_eq!(t.formatted_date(), "September 2024");
    }

    #[test]
    fn test_deserialize_rejects_bad_rating() {
        let json = r#"{
            "id": "x", "patientName": "A", "condition": "C", "rating": 9,
            "text": "T", "treatmentDate": "2024-09-01", "doctorName": "D"
        }"#;

        assert!(serde_json::from_str::<Testimonial>(json).is_err());
    }
}
