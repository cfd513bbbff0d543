//! HTTP redirect surface.
//!
//! Translates requests into [`crate::domain::resolve`] calls against the
//! current link snapshot.
//!
//! # Modules
//!
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Request tracing and default response headers

pub mod handlers;
pub mod middleware;
