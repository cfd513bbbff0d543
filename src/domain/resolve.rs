//! Redirect resolution against a link snapshot.
//!
//! All of these request paths are valid:
//!
//! ```text
//! /name
//! /name?query=value
//! /name/suffix
//! /name/suffix?query=value
//! ```
//!
//! `http://target/foo` requested as `/name/suffix?query=value` resolves to
//! `http://target/foo/suffix?query=value`.

use percent_encoding::{AsciiSet, CONTROLS, percent_decode_str, utf8_percent_encode};
use std::collections::BTreeMap;
use url::{Url, form_urlencoded};

use crate::domain::link_map::LinkMap;

/// Characters escaped when a decoded suffix segment is written back into a URL path.
pub(crate) const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'\\')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Per-request resolution failures. Neither affects any shared state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// Nothing after the leading `/`, or a path that does not decode to UTF-8.
    #[error("invalid path")]
    BadRequest,

    #[error("no link named '{name}'")]
    NotFound { name: String },
}

/// Resolves a request path and raw query string to a redirect URL.
///
/// 1. The path is percent-decoded and split into `name` (first segment) and
///    `suffix` (the rest, possibly empty).
/// 2. `name` is looked up in `links`.
/// 3. `suffix` is joined onto the target path; an empty suffix leaves it as is.
/// 4. Request query parameters replace the target's parameters key by key;
///    target keys absent from the request are kept.
///
/// The merged query is encoded with keys in sorted order, so resolving the same
/// request against the same snapshot always yields the same URL.
///
/// # Errors
///
/// - [`ResolveError::BadRequest`] if the path is empty after the leading `/`
/// - [`ResolveError::NotFound`] if no link has that name
pub fn resolve(path: &str, query: Option<&str>, links: &LinkMap) -> Result<Url, ResolveError> {
    let decoded = percent_decode_str(path)
        .decode_utf8()
        .map_err(|_| ResolveError::BadRequest)?;

    let rest = decoded.strip_prefix('/').unwrap_or(&decoded);
    if rest.is_empty() {
        return Err(ResolveError::BadRequest);
    }

    let (name, suffix) = rest.split_once('/').unwrap_or((rest, ""));

    let target = links.get(name).ok_or_else(|| ResolveError::NotFound {
        name: name.to_string(),
    })?;

    let mut url = target.url().clone();

    if !suffix.is_empty() {
        let joined = join_path(url.path(), suffix);
        url.set_path(&joined);
    }

    let merged = merge_query(url.query(), query);
    if merged.is_empty() {
        url.set_query(None);
    } else {
        url.set_query(Some(&merged));
    }

    Ok(url)
}

/// Joins a decoded `suffix` onto an already encoded `base` path.
///
/// Empty and `.` segments are dropped and `..` removes the previous segment.
/// A trailing `/` on the suffix is kept.
fn join_path(base: &str, suffix: &str) -> String {
    let mut segments: Vec<String> = base
        .split('/')
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();

    for segment in suffix.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            s => segments.push(utf8_percent_encode(s, SEGMENT).to_string()),
        }
    }

    let mut joined = String::with_capacity(base.len() + suffix.len() + 1);
    for segment in &segments {
        joined.push('/');
        joined.push_str(segment);
    }

    if joined.is_empty() || suffix.ends_with('/') {
        joined.push('/');
    }

    joined
}

/// Groups a raw query string by key, keeping value order per key.
fn parse_query(raw: Option<&str>) -> BTreeMap<String, Vec<String>> {
    let mut params: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (key, value) in form_urlencoded::parse(raw.unwrap_or_default().as_bytes()) {
        params
            .entry(key.into_owned())
            .or_default()
            .push(value.into_owned());
    }
    params
}

/// Merges request parameters over target parameters and encodes the result.
fn merge_query(target: Option<&str>, request: Option<&str>) -> String {
    let mut params = parse_query(target);
    params.extend(parse_query(request));

    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, values) in &params {
        for value in values {
            serializer.append_pair(key, value);
        }
    }
    serializer.finish()
}
