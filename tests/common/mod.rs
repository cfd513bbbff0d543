#![allow(dead_code)]

use axum_test::TestServer;
use goto::domain::{LinkMap, Target};
use goto::infrastructure::links::{LinkSource, StaticLinks};
use goto::routes::app_router;
use goto::state::AppState;
use std::fs::{self, File};
use std::path::Path;
use std::sync::Arc;
use std::time::SystemTime;
use url::Url;

pub fn link_map(entries: &[(&str, &str)]) -> LinkMap {
    entries
        .iter()
        .map(|(name, url)| (name.to_string(), Target::new(Url::parse(url).unwrap())))
        .collect()
}

pub fn default_links() -> LinkMap {
    link_map(&[
        ("link1", "http://dst/one"),
        ("link2", "http://dst/two?a=1"),
    ])
}

pub fn create_test_state(links: Arc<dyn LinkSource>, base_url: Option<&str>) -> AppState {
    AppState::new(links, base_url.map(|u| Url::parse(u).unwrap()))
}

pub fn create_test_server(links: LinkMap, base_url: Option<&str>) -> TestServer {
    let state = create_test_state(Arc::new(StaticLinks::new(links)), base_url);
    TestServer::new(app_router(state, Path::new("static"))).unwrap()
}

pub fn create_server_with_state(state: AppState, static_dir: &Path) -> TestServer {
    TestServer::new(app_router(state, static_dir)).unwrap()
}

/// Writes a links file and pins its modification time.
pub fn write_links(path: &Path, contents: &str, modified: SystemTime) {
    fs::write(path, contents).unwrap();
    File::options()
        .write(true)
        .open(path)
        .unwrap()
        .set_modified(modified)
        .unwrap();
}
