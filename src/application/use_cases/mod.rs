//! Use case implementations.

mod load_content_use_case;

pub use load_content_use_case::LoadContentUseCase;
