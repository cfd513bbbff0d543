//! Immutable name → target mapping loaded from the links file.

use std::collections::BTreeMap;
use std::fmt;
use url::Url;

/// Short name of a link, the first path segment of a request.
pub type Name = String;

/// Destination URL of a link.
///
/// Always an absolute URL that can act as a base, so a request suffix can be
/// joined onto its path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target(Url);

impl Target {
    /// Wraps an already validated URL.
    pub fn new(url: Url) -> Self {
        Self(url)
    }

    pub fn url(&self) -> &Url {
        &self.0
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

/// One loaded generation of link definitions.
///
/// Never mutated after construction. A reload builds a new `LinkMap` and
/// swaps it in whole; readers holding an `Arc<LinkMap>` keep a complete
/// snapshot for as long as they need it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkMap {
    links: BTreeMap<Name, Target>,
}

impl LinkMap {
    /// Builds a map from name/target pairs. Later duplicates replace earlier ones.
    pub fn new(links: impl IntoIterator<Item = (Name, Target)>) -> Self {
        Self {
            links: links.into_iter().collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Target> {
        self.links.get(name)
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Iterates links in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Target)> {
        self.links.iter().map(|(name, target)| (name.as_str(), target))
    }
}

impl FromIterator<(Name, Target)> for LinkMap {
    fn from_iter<I: IntoIterator<Item = (Name, Target)>>(iter: I) -> Self {
        Self::new(iter)
    }
}

/// Returns true if `name` can be requested as a single path segment.
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && !name.contains('/')
}
