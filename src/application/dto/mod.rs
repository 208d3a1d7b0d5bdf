//! Data transfer objects for the application layer.

mod content_dto;

pub use content_dto::{ContentOrigin, LoadedContent};
