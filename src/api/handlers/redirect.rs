//! Handler for link redirects.

use axum::{
    extract::State,
    http::{Uri, header},
    response::{IntoResponse, Redirect},
};
use tracing::debug;

use crate::api::middleware::cache_control::LINK_CACHE_CONTROL;
use crate::domain::resolve::resolve;
use crate::error::AppError;
use crate::state::AppState;

/// Redirects a link name to its configured target.
///
/// # Endpoint
///
/// `GET /{name}` and `GET /{name}/{suffix...}`, with an optional query string.
/// Mounted as the router fallback so suffixes of any depth reach it.
///
/// # Request Flow
///
/// 1. Take the current link snapshot (may trigger a throttled reload check)
/// 2. Resolve name, suffix and query against that snapshot
/// 3. Return 307 Temporary Redirect with the link cache policy
///
/// # Errors
///
/// Returns 400 Bad Request if the path has nothing after the leading `/`.
/// Returns 404 Not Found if no link has the requested name.
pub async fn redirect_handler(
    State(state): State<AppState>,
    uri: Uri,
) -> Result<impl IntoResponse, AppError> {
    let links = state.links.links();
    let target = resolve(uri.path(), uri.query(), &links)?;

    debug!("Redirect {} -> {}", uri, target);

    Ok((
        [(header::CACHE_CONTROL, LINK_CACHE_CONTROL)],
        Redirect::temporary(target.as_str()),
    ))
}
