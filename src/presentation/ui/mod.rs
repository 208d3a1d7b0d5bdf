//! UI screens.

mod app;
pub mod page;
pub mod utils;

pub use app::{App, AppPorts};
pub use page::{Page, PageAction, PageLayout, SharedDocumentRoot};
