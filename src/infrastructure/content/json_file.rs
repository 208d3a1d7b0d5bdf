use std::path::PathBuf;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::entities::ClinicContent;
use crate::domain::errors::ContentError;
use crate::domain::ports::ContentPort;

/// Content read from a JSON document in the bundled format.
#[derive(Debug, Clone)]
pub struct JsonFileContent {
    path: PathBuf,
}

impl JsonFileContent {
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

#[async_trait]
impl ContentPort for JsonFileContent {
    async fn load(&self) -> Result<ClinicContent, ContentError> {
        debug!(path = %self.path.display(), "Reading content file");
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| ContentError::io(&self.path, e))?;
        Ok(serde_json::from_str(&raw)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const MINIMAL: &str = r#"{
        "name": "Test Clinic",
        "tagline": "Care",
        "heroHeading": "Hello",
        "heroBody": "Body",
        "mainPhone": "(415) 555-0000",
        "emergencyPhone": "(415) 555-9999",
        "testimonials": [{
            "id": "t1",
            "patientName": "Ann P.",
            "condition": "Checkup",
            "rating": 5,
            "text": "Great.",
            "treatmentDate": "2024-05-02",
            "doctorName": "Dr. Lee"
        }]
    }"#;

    #[tokio::test]
    async fn test_reads_minimal_document() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("content.json");
        std::fs::write(&path, MINIMAL).unwrap();

        let content = JsonFileContent::new(path).load().await.unwrap();
        assert_eq!(content.name, "Test Clinic");
        assert!(content.services.is_empty());
        assert!(!content.testimonials[0].verified);
        assert_eq!(content.testimonials[0].doctor_title, None);
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let dir = tempdir().unwrap();
        let result = JsonFileContent::new(dir.path().join("absent.json")).load().await;
        assert!(matches!(result, Err(ContentError::Io { .. })));
    }

    #[tokio::test]
    async fn test_out_of_range_rating_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("content.json");
        std::fs::write(&path, MINIMAL.replace("\"rating\": 5", "\"rating\": 6")).unwrap();

        let result = JsonFileContent::new(path).load().await;
        assert!(matches!(result, Err(ContentError::Parse(_))));
    }
}
