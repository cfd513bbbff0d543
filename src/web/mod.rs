//! Browser-facing pages served next to the redirects.
//!
//! Uses Askama templates for server-side rendering.
//!
//! # Modules
//!
//! - [`handlers`] - Index page, OpenSearch descriptor and favicon
//! - [`routes`] - Route configuration

pub mod handlers;
pub mod routes;
