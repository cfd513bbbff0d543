//! Domain layer: the link snapshot and the redirect algorithm that runs on it.
//!
//! Nothing here performs I/O. Loading and reloading snapshots lives in
//! [`crate::infrastructure`].
//!
//! # Modules
//!
//! - [`link_map`] - Immutable name → target mapping
//! - [`resolve`] - Name/suffix/query composition of a redirect URL

pub mod link_map;
pub mod resolve;

pub use link_map::{LinkMap, Name, Target};
pub use resolve::{ResolveError, resolve};
