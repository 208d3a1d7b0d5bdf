//! Clinic content source port.

use async_trait::async_trait;

use crate::domain::entities::ClinicContent;
use crate::domain::errors::ContentError;

/// Port for the page content (copy, services, locations, testimonials).
#[async_trait]
pub trait ContentPort: Send + Sync {
    /// Loads the full page content.
    async fn load(&self) -> Result<ClinicContent, ContentError>;
}
