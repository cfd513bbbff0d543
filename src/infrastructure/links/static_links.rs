//! Fixed link snapshot for tests and embedding.

use std::sync::Arc;
use tracing::debug;

use super::source::LinkSource;
use crate::domain::link_map::LinkMap;

/// A link source that always returns the same snapshot.
///
/// # Use Cases
///
/// - Handler tests that do not need a file on disk
/// - Embedding the router with links built in code
pub struct StaticLinks {
    links: Arc<LinkMap>,
}

impl StaticLinks {
    pub fn new(links: LinkMap) -> Self {
        debug!(entries = links.len(), "Using static links (reloading disabled)");
        Self {
            links: Arc::new(links),
        }
    }
}

impl Default for StaticLinks {
    fn default() -> Self {
        Self::new(LinkMap::default())
    }
}

impl LinkSource for StaticLinks {
    fn links(&self) -> Arc<LinkMap> {
        Arc::clone(&self.links)
    }
}
