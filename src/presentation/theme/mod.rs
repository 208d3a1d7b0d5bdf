//! Colors and text styles.

pub mod adapter;
mod service;

pub use service::{Theme, parse_color};
