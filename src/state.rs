//! Shared state injected into every handler.

use std::sync::Arc;
use url::Url;

use crate::infrastructure::links::LinkSource;

#[derive(Clone)]
pub struct AppState {
    /// Current link snapshot source, shared by all requests.
    pub links: Arc<dyn LinkSource>,
    /// Public base URL of the service, used by the OpenSearch descriptor.
    pub base_url: Option<Url>,
}

impl AppState {
    pub fn new(links: Arc<dyn LinkSource>, base_url: Option<Url>) -> Self {
        Self { links, base_url }
    }
}
