use async_trait::async_trait;

use crate::domain::entities::ClinicContent;
use crate::domain::errors::ContentError;
use crate::domain::ports::ContentPort;

const BUNDLED_CONTENT: &str = include_str!("bundled_content.json");

/// Content compiled into the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct BundledContent;

impl BundledContent {
    /// Parses the bundled document.
    ///
    /// # Errors
    /// Returns [`ContentError::Parse`] if the bundled document is malformed.
    pub fn parse() -> Result<ClinicContent, ContentError> {
        Ok(serde_json::from_str(BUNDLED_CONTENT)?)
    }
}

#[async_trait]
impl ContentPort for BundledContent {
    async fn load(&self) -> Result<ClinicContent, ContentError> {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::testimonial_queries::{average_rating, featured};

    #[test]
    fn test_bundled_content_parses() {
        let content = BundledContent::parse().unwrap();

        assert_eq!(content.name, "Gabriel Family Clinic");
        assert_eq!(content.services.len(), 6);
        assert_eq!(content.benefits.len(), 4);
        assert_eq!(content.locations.len(), 3);
        assert_eq!(content.testimonials.len(), 7);
        assert_eq!(content.emergency_phone, "(415) 555-9911");
    }

    #[test]
    fn test_bundled_testimonials() {
        let content = BundledContent::parse().unwrap();
        let first = &content.testimonials[0];

        assert_eq!(first.patient_name, "Margaret S.");
        assert_eq!(first.formatted_date(), "October 2024");
        assert_eq!(featured(&content.testimonials).len(), 6);
        assert_eq!(average_rating(&content.testimonials), Some(4.9));
    }

    #[test]
    fn test_load_through_port() {
        let content = tokio_test::block_on(BundledContent.load()).unwrap();
        assert_eq!(content.hero_heading, "Excellence in Senior Healthcare");
    }
}
