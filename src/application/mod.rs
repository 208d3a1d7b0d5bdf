//! Application layer with headless widget state, use cases and DTOs.

/// Data transfer objects.
pub mod dto;
/// Widget state machines and queries.
pub mod services;
/// Use case implementations.
pub mod use_cases;

pub use dto::{ContentOrigin, LoadedContent};
pub use use_cases::LoadContentUseCase;
