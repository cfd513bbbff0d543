//! Top-level router configuration combining pages and redirects.
//!
//! # Route Structure
//!
//! - `GET  /`                - Link index
//! - `GET  /opensearch.xml`  - OpenSearch description
//! - `GET  /favicon.ico`     - Favicon
//! - `*    /{name}[/...]`    - Link redirect (fallback)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Cache-Control** - Default policy for responses without their own

use crate::api::handlers::redirect_handler;
use crate::api::middleware::{cache_control, tracing};
use crate::state::AppState;
use crate::web;
use axum::Router;
use std::path::Path;

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `static_dir` - directory the favicon is served from
pub fn app_router(state: AppState, static_dir: &Path) -> Router {
    Router::new()
        .merge(web::routes::routes(static_dir))
        .fallback(redirect_handler)
        .with_state(state)
        .layer(cache_control::layer())
        .layer(tracing::layer())
}
