//! Page content sources.

mod bundled;
mod json_file;

pub use bundled::BundledContent;
pub use json_file::JsonFileContent;
