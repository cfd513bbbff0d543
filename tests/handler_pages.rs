mod common;

use goto::api::middleware::cache_control::{FAVICON_CACHE_CONTROL, LINK_CACHE_CONTROL};
use goto::infrastructure::links::StaticLinks;
use goto::web::handlers::index::GENERATOR;
use goto::web::handlers::opensearch::OPENSEARCH_CONTENT_TYPE;
use std::sync::Arc;

#[tokio::test]
async fn test_index_lists_links() {
    let links = common::link_map(&[
        ("docs", "https://docs.example.com/guide"),
        ("my link", "https://example.com/spaced"),
    ]);
    let server = common::create_test_server(links, None);

    let response = server.get("/").await;

    response.assert_status_ok();
    assert_eq!(response.header("cache-control"), LINK_CACHE_CONTROL);

    let html = response.text();
    assert!(html.contains("docs"));
    assert!(html.contains("https://docs.example.com/guide"));
    assert!(html.contains(r#"href="/my%20link""#));
    assert!(html.contains(GENERATOR));
    assert!(!html.contains("opensearchdescription+xml"));
}

#[tokio::test]
async fn test_index_empty() {
    let server = common::create_test_server(common::link_map(&[]), None);

    let response = server.get("/").await;

    response.assert_status_ok();
    assert!(response.text().contains("No links configured."));
}

#[tokio::test]
async fn test_index_advertises_opensearch_with_base_url() {
    let server =
        common::create_test_server(common::default_links(), Some("https://go.example.com/"));

    let html = server.get("/").await.text();

    assert!(html.contains("opensearchdescription+xml"));
    assert!(html.contains("opensearch.xml"));
}

#[tokio::test]
async fn test_opensearch_not_configured() {
    let server = common::create_test_server(common::default_links(), None);

    let response = server.get("/opensearch.xml").await;

    response.assert_status_not_found();
}

#[tokio::test]
async fn test_opensearch_description() {
    let server =
        common::create_test_server(common::default_links(), Some("https://go.example.com"));

    let response = server.get("/opensearch.xml").await;

    response.assert_status_ok();
    assert_eq!(response.header("content-type"), OPENSEARCH_CONTENT_TYPE);

    let xml = response.text();
    assert!(xml.contains("<ShortName>Goto</ShortName>"));
    assert!(xml.contains("<Description>Link forwarder</Description>"));
    assert!(xml.contains("{searchTerms}"));
    assert!(xml.contains(r#"rel="self""#));
}

#[tokio::test]
async fn test_favicon_served_from_static_dir() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("favicon.ico"), b"\x00\x00\x01\x00").unwrap();

    let state = common::create_test_state(Arc::new(StaticLinks::default()), None);
    let server = common::create_server_with_state(state, dir.path());

    let response = server.get("/favicon.ico").await;

    response.assert_status_ok();
    assert_eq!(response.header("cache-control"), FAVICON_CACHE_CONTROL);
    assert_eq!(response.as_bytes().as_ref(), b"\x00\x00\x01\x00");
}
