//! # Goto
//!
//! A link forwarder: redirects short names to URLs declared in a JSON file,
//! keeping path suffixes and merging query parameters.
//!
//! ```text
//! config.json: { "docs": "https://docs.example.com/guide?lang=en" }
//!
//! GET /docs/intro?lang=de  ->  307 https://docs.example.com/guide/intro?lang=de
//! ```
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Link snapshot and redirect resolution
//! - **Infrastructure Layer** ([`infrastructure`]) - Links file loading and the live-reloading cache
//! - **API Layer** ([`api`]) - Redirect handler and middleware
//! - **Web Layer** ([`web`]) - Index page, OpenSearch description, favicon
//!
//! ## Live Reload
//!
//! The links file is checked at most once per check interval, on the back of
//! an incoming request, and reloaded only when its modification time changes.
//! Requests never wait for a reload and never observe a partially loaded
//! file. A broken file is logged and the last good links keep being served.
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod routes;
pub mod server;
pub mod state;
pub mod web;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::domain::{LinkMap, ResolveError, Target, resolve};
    pub use crate::error::AppError;
    pub use crate::infrastructure::links::{LinkSource, ReloadingLinks, StaticLinks};
    pub use crate::infrastructure::store::LoadError;
    pub use crate::routes::app_router;
    pub use crate::state::AppState;
}
