//! HTTP middleware for request processing.
//!
//! Provides observability and cache policy middleware.

pub mod cache_control;
pub mod tracing;
