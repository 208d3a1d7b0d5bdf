//! Clinic Kiosk - the Gabriel Family Clinic landing page in the terminal.
//!
//! This crate renders the clinic's landing page as an accessible terminal
//! kiosk: an adjustable text size that persists between sessions, an
//! auto-advancing testimonial carousel, section navigation with a scroll
//! spy, and interaction analytics.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Application layer containing widget state machines, use cases and DTOs.
pub mod application;
/// Domain layer containing entities, errors, and port definitions.
pub mod domain;
/// Infrastructure layer containing adapters for storage, timers and analytics.
pub mod infrastructure;
/// Presentation layer containing UI components and event handling.
pub mod presentation;

/// Current version of the application.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name.
pub const NAME: &str = "clinic-kiosk";
