//! Favicon served from the static directory.

use axum::{
    http::{HeaderValue, header},
    routing::{MethodRouter, get_service},
};
use std::path::Path;
use tower_http::{services::ServeFile, set_header::SetResponseHeaderLayer};

use crate::api::middleware::cache_control::FAVICON_CACHE_CONTROL;
use crate::state::AppState;

/// Serves `<static_dir>/favicon.ico` with a long-lived immutable cache policy.
///
/// # Endpoint
///
/// `GET /favicon.ico`
///
/// A missing file is answered with 404.
pub fn favicon_service(static_dir: &Path) -> MethodRouter<AppState> {
    get_service(ServeFile::new(static_dir.join("favicon.ico"))).layer(
        SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static(FAVICON_CACHE_CONTROL),
        ),
    )
}
