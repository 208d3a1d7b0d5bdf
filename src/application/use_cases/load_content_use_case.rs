//! Content loading use case.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::application::dto::{ContentOrigin, LoadedContent};
use crate::domain::entities::ClinicContent;
use crate::domain::errors::ContentError;
use crate::domain::ports::ContentPort;

/// Loads page content from a content file, falling back to bundled content.
pub struct LoadContentUseCase {
    file_port: Option<Arc<dyn ContentPort>>,
    bundled_port: Arc<dyn ContentPort>,
}

impl LoadContentUseCase {
    /// Creates new use case.
    #[must_use]
    pub fn new(file_port: Option<Arc<dyn ContentPort>>, bundled_port: Arc<dyn ContentPort>) -> Self {
        Self {
            file_port,
            bundled_port,
        }
    }

    /// Loads and validates content.
    ///
    /// Priority:
    /// 1. Content file, when configured and valid
    /// 2. Bundled content
    ///
    /// # Errors
    /// Returns error if the bundled content is invalid.
    pub async fn execute(&self) -> Result<LoadedContent, ContentError> {
        if let Some(port) = &self.file_port {
            debug!("Loading content file");
            match port.load().await.and_then(validate) {
                Ok(content) => {
                    info!(
                        testimonials = content.testimonials.len(),
                        "Using content file"
                    );
                    return Ok(LoadedContent {
                        content,
                        origin: ContentOrigin::File,
                    });
                }
                Err(e) => {
                    warn!(error = %e, "Content file rejected, using bundled content");
                }
            }
        }

        let content = validate(self.bundled_port.load().await?)?;
        info!(
            testimonials = content.testimonials.len(),
            "Using bundled content"
        );
        Ok(LoadedContent {
            content,
            origin: ContentOrigin::Bundled,
        })
    }
}

fn validate(content: ClinicContent) -> Result<ClinicContent, ContentError> {
    let mut seen = HashSet::new();
    for testimonial in &content.testimonials {
        if !seen.insert(testimonial.id.as_str()) {
            return Err(ContentError::DuplicateTestimonial {
                id: testimonial.id.as_str().to_string(),
            });
        }
    }
    Ok(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::fixtures::testimonials;
    use async_trait::async_trait;

    struct StaticContent(Result<ClinicContent, &'static str>);

    #[async_trait]
    impl ContentPort for StaticContent {
        async fn load(&self) -> Result<ClinicContent, ContentError> {
            match &self.0 {
                Ok(content) => Ok(content.clone()),
                Err(message) => Err(ContentError::io(
                    "content.json",
                    std::io::Error::new(std::io::ErrorKind::NotFound, *message),
                )),
            }
        }
    }

    fn content(name: &str, testimonial_count: usize) -> ClinicContent {
        ClinicContent {
            name: name.to_string(),
            tagline: String::new(),
            hero_heading: String::new(),
            hero_body: String::new(),
            highlights: Vec::new(),
            main_phone: String::new(),
            emergency_phone: String::new(),
            services: Vec::new(),
            benefits: Vec::new(),
            locations: Vec::new(),
            testimonials: testimonials(testimonial_count),
        }
    }

    fn port(result: Result<ClinicContent, &'static str>) -> Arc<dyn ContentPort> {
        Arc::new(StaticContent(result))
    }

    #[tokio::test]
    async fn test_file_has_priority() {
        let use_case = LoadContentUseCase::new(
            Some(port(Ok(content("file", 2)))),
            port(Ok(content("bundled", 7))),
        );
        let loaded = use_case.execute().await.unwrap();
        assert_eq!(loaded.origin, ContentOrigin::File);
        assert_eq!(loaded.content.name, "file");
    }

    #[tokio::test]
    async fn test_missing_file_falls_back() {
        let use_case =
            LoadContentUseCase::new(Some(port(Err("missing"))), port(Ok(content("bundled", 7))));
        let loaded = use_case.execute().await.unwrap();
        assert_eq!(loaded.origin, ContentOrigin::Bundled);
        assert_eq!(loaded.content.testimonials.len(), 7);
    }

    #[tokio::test]
    async fn test_duplicate_ids_rejected() {
        let mut duplicated = content("file", 2);
        duplicated.testimonials[1].id = duplicated.testimonials[0].id.clone();

        let use_case = LoadContentUseCase::new(None, port(Ok(duplicated)));
        let err = use_case.execute().await.unwrap_err();
        assert!(matches!(err, ContentError::DuplicateTestimonial { .. }));
    }

    #[tokio::test]
    async fn test_empty_testimonials_are_valid() {
        let use_case = LoadContentUseCase::new(None, port(Ok(content("bundled", 0))));
        let loaded = use_case.execute().await.unwrap();
        assert!(loaded.content.testimonials.is_empty());
    }
}
