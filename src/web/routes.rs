//! Page route configuration.

use crate::state::AppState;
use crate::web::handlers::{favicon_service, index_handler, opensearch_handler};
use axum::{Router, routing::get};
use std::path::Path;

/// Pages served at fixed paths. These names cannot be used as links.
///
/// # Endpoints
///
/// - `GET /` - Link index
/// - `GET /opensearch.xml` - OpenSearch description
/// - `GET /favicon.ico` - Favicon from `static_dir`
pub fn routes(static_dir: &Path) -> Router<AppState> {
    Router::new()
        .route("/", get(index_handler))
        .route("/opensearch.xml", get(opensearch_handler))
        .route("/favicon.ico", favicon_service(static_dir))
}
