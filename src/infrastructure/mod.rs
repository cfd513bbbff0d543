//! Infrastructure layer: everything that touches the filesystem.
//!
//! # Modules
//!
//! - [`store`] - Links file parsing
//! - [`links`] - Snapshot sources, including the live-reloading cache

pub mod links;
pub mod store;
