//! Produces one candidate slang term per call.
//!
//! In mock mode the searcher picks from the built-in list. In API mode it
//! rotates through the configured web sources, skipping pages already in
//! the store's ledger, and falls back to the built-in list when a full
//! rotation (two passes over every source) finds nothing new.

use crate::config::{SearchConfig, SearchMode};
use crate::error::Result;
use crate::lookup::MediaWikiClient;
use crate::models::{NewCachedTerm, SlangRecord};
use crate::parse::{ParsedEntry, parse_dictionary_html, parse_extract};
use crate::synthetic::{SYNTHETIC_TERMS, SyntheticEntry};
use crate::SlangStore;
use chrono::Utc;
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;
use std::fmt;

/// Letters cycled through for dictionary searches.
const DICTIONARY_LETTERS: [&str; 9] = ["b", "c", "d", "g", "k", "m", "p", "s", "w"];

/// A configured source identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    Wikipedia,
    Wiktionary,
    Synthetic,
}

impl SourceKind {
    /// Maps a config identifier to a source; unknown names act as the
    /// built-in list.
    pub fn from_identifier(id: &str) -> Self {
        match id.trim().to_ascii_lowercase().as_str() {
            "wikipedia" => SourceKind::Wikipedia,
            "wiktionary" => SourceKind::Wiktionary,
            "mock" | "synthetic" => SourceKind::Synthetic,
            other => {
                warn!("Unknown search source '{}'; treating it as the built-in list.", other);
                SourceKind::Synthetic
            }
        }
    }

    /// Name stored in the ledger and the cache.
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Wikipedia => "wikipedia",
            SourceKind::Wiktionary => "wiktionary",
            SourceKind::Synthetic => "mock",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where the searcher is in its rotation. Lives only as long as the
/// searcher unless the caller saves and restores it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RotationState {
    /// Total source attempts so far; the next source is this modulo the
    /// number of sources.
    pub source_index: usize,
    /// MediaWiki continuation token for the category listing.
    pub wikipedia_continue: Option<String>,
    pub wiktionary_letter_index: usize,
}

/// Searches for British slang across the configured sources.
pub struct SlangSearcher {
    config: SearchConfig,
    sources: Vec<SourceKind>,
    store: Option<SlangStore>,
    client: MediaWikiClient,
    rotation: RotationState,
    synthetic: Vec<SyntheticEntry>,
    rng: StdRng,
}

impl SlangSearcher {
    /// Creates a searcher. `store` backs the ledger and cache; without it
    /// every page counts as unvisited and nothing is cached.
    pub fn new(config: SearchConfig, store: Option<SlangStore>) -> Result<Self> {
        let client = MediaWikiClient::new(config.request_timeout())?;
        let sources = config
            .sources
            .iter()
            .map(|s| SourceKind::from_identifier(s))
            .collect();
        Ok(SlangSearcher {
            config,
            sources,
            store,
            client,
            rotation: RotationState::default(),
            synthetic: SYNTHETIC_TERMS.to_vec(),
            rng: StdRng::from_os_rng(),
        })
    }

    /// Resumes from a previously saved rotation.
    pub fn with_rotation(mut self, rotation: RotationState) -> Self {
        self.rotation = rotation;
        self
    }

    /// Replaces the random source, e.g. with a seeded one.
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    /// Replaces the built-in list. An empty list keeps the built-in one.
    pub fn with_synthetic_entries(mut self, entries: Vec<SyntheticEntry>) -> Self {
        if !entries.is_empty() {
            self.synthetic = entries;
        }
        self
    }

    pub fn rotation(&self) -> &RotationState {
        &self.rotation
    }

    /// Returns one slang record. Never fails: source errors are logged and
    /// the built-in list is the last resort.
    pub async fn search_new_slang(&mut self) -> SlangRecord {
        if self.config.mode == SearchMode::Mock || self.sources.is_empty() {
            return self.synthetic_pick();
        }

        let attempts = self.sources.len() * 2;
        for _ in 0..attempts {
            let source = self.sources[self.rotation.source_index % self.sources.len()];
            self.rotation.source_index += 1;

            let outcome = match source {
                SourceKind::Wikipedia => self.search_wikipedia().await,
                SourceKind::Wiktionary => self.search_wiktionary().await,
                SourceKind::Synthetic => Ok(Some(self.synthetic_pick())),
            };
            match outcome {
                Ok(Some(record)) => {
                    info!("Found '{}' via {}", record.term, source);
                    return record;
                }
                Ok(None) => debug!("Source {} yielded nothing this round", source),
                Err(e) => warn!("Error searching {}: {}", source, e),
            }
        }

        info!(
            "No new terms after {} source attempts; using the built-in list.",
            attempts
        );
        self.synthetic_pick()
    }

    /// Uniform random pick from the built-in list.
    pub fn synthetic_pick(&mut self) -> SlangRecord {
        match self.synthetic.choose(&mut self.rng) {
            Some(entry) => entry.to_record(),
            // Unreachable in practice: the list is never empty.
            None => SYNTHETIC_TERMS[0].to_record(),
        }
    }

    fn is_searched(&self, source: SourceKind, identifier: &str) -> Result<bool> {
        match &self.store {
            Some(store) => store.is_location_searched(source.as_str(), identifier),
            None => Ok(false),
        }
    }

    /// Picks a random title that is not in the ledger yet.
    fn pick_unvisited(&mut self, source: SourceKind, titles: &[String]) -> Result<Option<String>> {
        let mut fresh = Vec::with_capacity(titles.len());
        for title in titles {
            if !self.is_searched(source, title)? {
                fresh.push(title);
            }
        }
        Ok(fresh.choose(&mut self.rng).map(|t| t.to_string()))
    }

    async fn search_wikipedia(&mut self) -> Result<Option<SlangRecord>> {
        let endpoint = self.config.wikipedia_endpoint.clone();
        let mut page = self
            .client
            .category_members(
                &endpoint,
                &self.config.wikipedia_category,
                self.rotation.wikipedia_continue.as_deref(),
            )
            .await?;

        if page.titles.is_empty() && self.rotation.wikipedia_continue.is_some() {
            debug!("Category listing exhausted; restarting from the first page.");
            self.rotation.wikipedia_continue = None;
            page = self
                .client
                .category_members(&endpoint, &self.config.wikipedia_category, None)
                .await?;
        }

        let Some(title) = self.pick_unvisited(SourceKind::Wikipedia, &page.titles)? else {
            // Everything on this page was visited; move on to the next one.
            self.rotation.wikipedia_continue = page.next;
            return Ok(None);
        };

        let extract = self.client.page_extract(&endpoint, &title).await?;
        let Some(parsed) = extract.as_deref().and_then(parse_extract) else {
            self.mark_empty(SourceKind::Wikipedia, &title)?;
            return Ok(None);
        };

        let url = format!(
            "https://en.wikipedia.org/wiki/{}",
            title.replace(' ', "_")
        );
        Ok(Some(self.record_hit(SourceKind::Wikipedia, title, parsed, url)))
    }

    async fn search_wiktionary(&mut self) -> Result<Option<SlangRecord>> {
        let endpoint = self.config.wiktionary_endpoint.clone();
        let letter =
            DICTIONARY_LETTERS[self.rotation.wiktionary_letter_index % DICTIONARY_LETTERS.len()];
        let query = format!("{} incategory:\"British English\"", letter);
        let titles = self.client.search_titles(&endpoint, &query).await?;

        let Some(title) = self.pick_unvisited(SourceKind::Wiktionary, &titles)? else {
            self.rotation.wiktionary_letter_index += 1;
            return Ok(None);
        };

        let html = self
            .client
            .section_html(&endpoint, &title)
            .await?
            .unwrap_or_default();
        let Some(parsed) = parse_dictionary_html(&html) else {
            self.mark_empty(SourceKind::Wiktionary, &title)?;
            self.rotation.wiktionary_letter_index += 1;
            return Ok(None);
        };

        let url = format!("https://en.wiktionary.org/wiki/{}", title);
        Ok(Some(self.record_hit(SourceKind::Wiktionary, title, parsed, url)))
    }

    /// Records a page that had nothing usable so it is not fetched again.
    fn mark_empty(&self, source: SourceKind, identifier: &str) -> Result<()> {
        if let Some(store) = &self.store {
            store.mark_location_searched(source.as_str(), identifier, 0)?;
        }
        Ok(())
    }

    /// Builds the record for a fresh page, marks the page in the ledger and
    /// stages the term in the cache.
    fn record_hit(
        &self,
        source: SourceKind,
        title: String,
        parsed: ParsedEntry,
        url: String,
    ) -> SlangRecord {
        let record = SlangRecord {
            term: title,
            definition: parsed.definition,
            example: parsed.example.unwrap_or_default(),
            category: "slang".to_string(),
            polish: String::new(), // No translation source
            pronunciation: String::new(),
            source: source.as_str().to_string(),
            source_url: Some(url),
            search_date: Utc::now(),
        };
        // Bookkeeping failures are logged; the hit is still returned.
        if let Some(store) = &self.store {
            if let Err(e) = store.add_to_cache(&NewCachedTerm::from(&record)) {
                warn!("Could not cache '{}': {}", record.term, e);
            }
            if let Err(e) = store.mark_location_searched(source.as_str(), &record.term, 1) {
                warn!("Could not mark {}:{} as searched: {}", source, record.term, e);
            }
        }
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SearchConfig;
    use std::collections::HashSet;

    fn mock_searcher() -> SlangSearcher {
        SlangSearcher::new(SearchConfig::default(), None)
            .unwrap()
            .with_rng(StdRng::seed_from_u64(7))
    }

    #[tokio::test]
    async fn test_mock_mode_draws_from_builtin_list() {
        let names: HashSet<&str> = SYNTHETIC_TERMS.iter().map(|e| e.term).collect();
        let mut searcher = mock_searcher();
        for _ in 0..1000 {
            let record = searcher.search_new_slang().await;
            assert!(!record.term.is_empty());
            assert!(names.contains(record.term.as_str()), "unexpected term {}", record.term);
            assert_eq!(record.source, "mock_database");
        }
        // Mock mode never touches the rotation.
        assert_eq!(searcher.rotation(), &RotationState::default());
    }

    #[tokio::test]
    async fn test_mock_mode_covers_the_list() {
        let mut searcher = mock_searcher();
        let mut seen = HashSet::new();
        for _ in 0..1000 {
            seen.insert(searcher.search_new_slang().await.term);
        }
        assert!(seen.len() > SYNTHETIC_TERMS.len() / 2);
    }

    #[test]
    fn test_source_identifiers() {
        assert_eq!(SourceKind::from_identifier("Wikipedia"), SourceKind::Wikipedia);
        assert_eq!(SourceKind::from_identifier("wiktionary"), SourceKind::Wiktionary);
        assert_eq!(SourceKind::from_identifier("mock"), SourceKind::Synthetic);
        assert_eq!(SourceKind::from_identifier("urban"), SourceKind::Synthetic);
    }

    #[tokio::test]
    async fn test_synthetic_source_in_api_mode_hits_first_try() {
        let config = SearchConfig {
            mode: SearchMode::Api,
            sources: vec!["mock".to_string(), "wikipedia".to_string()],
            ..SearchConfig::default()
        };
        let mut searcher = SlangSearcher::new(config, None).unwrap();
        let record = searcher.search_new_slang().await;
        assert_eq!(record.source, "mock_database");
        assert_eq!(searcher.rotation().source_index, 1);
    }

    #[tokio::test]
    async fn test_unreachable_sources_fall_back_to_builtin_list() {
        let _ = env_logger::builder().is_test(true).try_init();
        let config = SearchConfig {
            mode: SearchMode::Api,
            sources: vec!["wikipedia".to_string(), "wiktionary".to_string()],
            wikipedia_endpoint: "http://127.0.0.1:9/w/api.php".to_string(),
            wiktionary_endpoint: "http://127.0.0.1:9/w/api.php".to_string(),
            timeout: 1,
            ..SearchConfig::default()
        };
        let mut searcher = SlangSearcher::new(config, None)
            .unwrap()
            .with_rotation(RotationState {
                source_index: 10,
                ..RotationState::default()
            });
        let record = searcher.search_new_slang().await;
        assert_eq!(record.source, "mock_database");
        assert_eq!(searcher.rotation().source_index, 14);
    }

    #[test]
    fn test_custom_synthetic_entries() {
        let entry = SyntheticEntry {
            term: "innit",
            definition: "Isn't it",
            example: "Cold out, innit?",
            category: "tag",
            polish: "Prawda?",
            pronunciation: "IN-it",
        };
        let mut searcher = mock_searcher().with_synthetic_entries(vec![entry]);
        assert_eq!(searcher.synthetic_pick().term, "innit");
    }
}
