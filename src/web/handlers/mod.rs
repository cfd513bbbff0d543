//! Template rendering and static file handlers.

pub mod favicon;
pub mod index;
pub mod opensearch;

pub use favicon::favicon_service;
pub use index::index_handler;
pub use opensearch::opensearch_handler;

use url::Url;

/// Base URL without query, fragment or trailing `/`, ready to append `/path`.
pub(crate) fn base_prefix(base: &Url) -> String {
    let mut base = base.clone();
    base.set_query(None);
    base.set_fragment(None);
    base.as_str().trim_end_matches('/').to_string()
}
