//! Link index page handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, http::header, response::IntoResponse};
use percent_encoding::utf8_percent_encode;

use super::base_prefix;
use crate::api::middleware::cache_control::LINK_CACHE_CONTROL;
use crate::domain::resolve::SEGMENT;
use crate::state::AppState;

/// Value of the `generator` meta tag.
pub const GENERATOR: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// One row of the index table.
pub struct LinkRow {
    pub name: String,
    /// Request path that redirects to `target`.
    pub href: String,
    pub target: String,
}

/// Template for the index page.
///
/// Renders `templates/index.html` with:
/// - Every configured link, in name order
/// - An OpenSearch `<link rel="search">` when a base URL is configured
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub links: Vec<LinkRow>,
    pub generator: &'static str,
    /// Empty when no base URL is configured.
    pub base_url: String,
}

/// Renders the index page for the current link snapshot.
///
/// # Endpoint
///
/// `GET /`
///
/// # Template
///
/// Uses `templates/index.html` for server-side rendering. Rendering errors are
/// logged and answered with 500.
pub async fn index_handler(State(state): State<AppState>) -> impl IntoResponse {
    let links = state.links.links();

    let rows = links
        .iter()
        .map(|(name, target)| LinkRow {
            name: name.to_string(),
            href: format!("/{}", utf8_percent_encode(name, SEGMENT)),
            target: target.to_string(),
        })
        .collect();

    let template = IndexTemplate {
        links: rows,
        generator: GENERATOR,
        base_url: state.base_url.as_ref().map(base_prefix).unwrap_or_default(),
    };

    ([(header::CACHE_CONTROL, LINK_CACHE_CONTROL)], template)
}
