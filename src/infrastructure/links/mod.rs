//! Link snapshot sources.
//!
//! Provides a [`LinkSource`] trait with two implementations:
//! - [`ReloadingLinks`] - Links file reloaded when its modification time changes
//! - [`StaticLinks`] - Fixed snapshot for testing or embedding

mod reloading;
mod source;
mod static_links;

pub use reloading::{ReloadOutcome, ReloadingLinks};
pub use source::LinkSource;
pub use static_links::StaticLinks;
