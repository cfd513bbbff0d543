//! Cache-Control policies.

use axum::http::{HeaderValue, header};
use tower_http::set_header::SetResponseHeaderLayer;

/// Policy for responses that do not set their own.
pub const DEFAULT_CACHE_CONTROL: &str = "public, max-age=3600, must-revalidate";

/// Policy for redirects and the link index. Shorter than the default so that
/// downstream caches do not keep serving a link after it changes.
pub const LINK_CACHE_CONTROL: &str = "public, max-age=600, stale-while-revalidate=2592000";

pub const FAVICON_CACHE_CONTROL: &str = "public, max-age=86400, immutable";

/// Adds [`DEFAULT_CACHE_CONTROL`] to every response that has no `Cache-Control`.
///
/// # Integration
///
/// ```rust,ignore
/// let app = Router::new()
///     .fallback(redirect_handler)
///     .layer(cache_control::layer());
/// ```
pub fn layer() -> SetResponseHeaderLayer<HeaderValue> {
    SetResponseHeaderLayer::if_not_present(
        header::CACHE_CONTROL,
        HeaderValue::from_static(DEFAULT_CACHE_CONTROL),
    )
}
