//! OpenSearch description document.
//!
//! Lets browsers add the service as a search engine, so typing a link name
//! into the address bar redirects through it.

use askama::Template;
use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::error;
use url::Url;

use super::base_prefix;
use crate::error::AppError;
use crate::state::AppState;

pub const OPENSEARCH_CONTENT_TYPE: &str = "application/opensearchdescription+xml";

/// Template for `templates/opensearch.xml`.
#[derive(Template)]
#[template(path = "opensearch.xml")]
pub struct OpenSearchTemplate {
    /// `<base>/{searchTerms}`, braces left unencoded.
    pub search_template: String,
    pub self_url: String,
}

impl OpenSearchTemplate {
    pub fn new(base_url: &Url) -> Self {
        let base = base_prefix(base_url);
        Self {
            search_template: format!("{base}/{{searchTerms}}"),
            self_url: format!("{base}/opensearch.xml"),
        }
    }
}

/// Serves the OpenSearch description.
///
/// # Endpoint
///
/// `GET /opensearch.xml`
///
/// # Errors
///
/// Returns 404 Not Found if no base URL is configured.
/// Returns 500 Internal Server Error if the template fails to render.
pub async fn opensearch_handler(State(state): State<AppState>) -> Result<Response, AppError> {
    let Some(base_url) = state.base_url.as_ref() else {
        return Err(AppError::not_found(
            "OpenSearch description is not configured",
            json!({}),
        ));
    };

    let body = OpenSearchTemplate::new(base_url).render().map_err(|e| {
        error!("Failed to render OpenSearch description: {}", e);
        AppError::internal("Template error", json!({}))
    })?;

    Ok(([(header::CONTENT_TYPE, OPENSEARCH_CONTENT_TYPE)], body).into_response())
}
