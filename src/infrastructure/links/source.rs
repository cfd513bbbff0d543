//! Read-only snapshot access shared by every HTTP handler.

use std::sync::Arc;

use crate::domain::link_map::LinkMap;

/// Source of the current link snapshot.
///
/// Implementations must be cheap to call from any number of concurrent
/// requests and must never block the caller on a reload. The returned
/// snapshot stays valid for as long as the caller holds it, even if a newer
/// one is installed in the meantime.
///
/// # Implementations
///
/// - [`crate::infrastructure::links::ReloadingLinks`] - File-backed, refreshed on change
/// - [`crate::infrastructure::links::StaticLinks`] - Fixed snapshot, never reloads
pub trait LinkSource: Send + Sync {
    /// Returns the most recently loaded snapshot.
    fn links(&self) -> Arc<LinkMap>;
}
