pub mod catalog;
pub mod clipboard;
pub mod config;
pub mod dom;
pub mod page;
pub mod scroll;
pub mod search;
pub mod state;
pub mod view;

pub use catalog::{Category, CommandEntry, TroubleshootingEntry, CATALOG};
pub use config::PageConfig;
pub use page::{start, start_with_config};
