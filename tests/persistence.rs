//! Last-URL persistence through the on-disk store.

use std::sync::Arc;

use zen_toolbox::config::ToolboxConfig;
use zen_toolbox::format::HtmlFormatter;
use zen_toolbox::net::select_fetcher;
use zen_toolbox::storage::{JsonFileStore, KeyValueStore};
use zen_toolbox::tool::{HtmlFetcher, STORAGE_KEY};

fn open_tool(store: Arc<dyn KeyValueStore>) -> HtmlFetcher {
    let fetcher = select_fetcher(&ToolboxConfig::default()).unwrap();
    HtmlFetcher::new(fetcher, store, HtmlFormatter::default())
}

#[test]
fn url_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("zen-toolbox/storage.json");

    let mut tool = open_tool(Arc::new(JsonFileStore::new(&path)));
    tool.set_url("example.org/docs");
    drop(tool);

    let reopened = open_tool(Arc::new(JsonFileStore::new(&path)));
    assert_eq!(reopened.url(), "example.org/docs");

    let raw = std::fs::read_to_string(&path).unwrap();
    let map: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(map[STORAGE_KEY], "example.org/docs");
}

#[test]
fn unreadable_store_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");
    std::fs::write(&path, "not json at all").unwrap();

    let mut tool = open_tool(Arc::new(JsonFileStore::new(&path)));
    assert_eq!(tool.url(), "");

    // Writing replaces the corrupt file.
    tool.set_url("rust-lang.org");
    let reopened = open_tool(Arc::new(JsonFileStore::new(&path)));
    assert_eq!(reopened.url(), "rust-lang.org");
}

#[test]
fn last_write_wins() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");

    let mut tool = open_tool(Arc::new(JsonFileStore::new(&path)));
    for url in ["e", "ex", "exa", "example.com"] {
        tool.set_url(url);
    }

    let reopened = open_tool(Arc::new(JsonFileStore::new(&path)));
    assert_eq!(reopened.url(), "example.com");
}
