//! Shared helpers for the integration harnesses.

#![allow(dead_code)]

pub mod fake_mediawiki;

use british_days::config::{SearchConfig, SearchMode};
use british_days::SlangStore;
use tempfile::TempDir;

pub use fake_mediawiki::FakeMediaWiki;

/// A store in a fresh temporary directory. Keep the `TempDir` alive for the
/// duration of the test.
pub fn temp_store() -> (TempDir, SlangStore) {
    let _ = env_logger::builder().is_test(true).try_init();
    let dir = tempfile::tempdir().unwrap();
    let store = SlangStore::open_at(dir.path().join("slang.db")).unwrap();
    (dir, store)
}

/// API-mode search config pointing every source at `endpoint`.
pub fn api_config(endpoint: &str, sources: &[&str]) -> SearchConfig {
    SearchConfig {
        mode: SearchMode::Api,
        sources: sources.iter().map(|s| s.to_string()).collect(),
        wikipedia_endpoint: endpoint.to_string(),
        wiktionary_endpoint: endpoint.to_string(),
        timeout: 5,
        ..SearchConfig::default()
    }
}
