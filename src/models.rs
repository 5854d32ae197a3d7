use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_CATEGORY: &str = "slang";
pub const DEFAULT_SOURCE: &str = "internet";

// --- Terms ---

/// A stored slang entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Term {
    pub id: i64,
    pub term: String,
    pub definition: Option<String>,
    pub example: Option<String>,
    pub category: Option<String>,
    pub source: Option<String>,
    pub polish: Option<String>,
    pub pronunciation: Option<String>,
    /// UTC, set by the store on insert.
    pub date_added: NaiveDateTime,
}

/// Writable fields of a term, used for inserts and updates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TermFields {
    pub term: String,
    pub definition: Option<String>,
    pub example: Option<String>,
    pub category: Option<String>,
    pub source: Option<String>,
    pub polish: Option<String>,
    pub pronunciation: Option<String>,
}

impl TermFields {
    pub fn new(term: impl Into<String>) -> Self {
        TermFields {
            term: term.into(),
            ..Default::default()
        }
    }

    pub fn definition(mut self, value: impl Into<String>) -> Self {
        self.definition = Some(value.into());
        self
    }

    pub fn example(mut self, value: impl Into<String>) -> Self {
        self.example = Some(value.into());
        self
    }

    pub fn category(mut self, value: impl Into<String>) -> Self {
        self.category = Some(value.into());
        self
    }

    pub fn source(mut self, value: impl Into<String>) -> Self {
        self.source = Some(value.into());
        self
    }

    pub fn polish(mut self, value: impl Into<String>) -> Self {
        self.polish = Some(value.into());
        self
    }

    pub fn pronunciation(mut self, value: impl Into<String>) -> Self {
        self.pronunciation = Some(value.into());
        self
    }
}

impl From<&SlangRecord> for TermFields {
    fn from(record: &SlangRecord) -> Self {
        TermFields {
            term: record.term.clone(),
            definition: non_empty(&record.definition),
            example: non_empty(&record.example),
            category: non_empty(&record.category),
            source: non_empty(&record.source),
            polish: non_empty(&record.polish),
            pronunciation: non_empty(&record.pronunciation),
        }
    }
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() { None } else { Some(s.to_string()) }
}

// --- Search history ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHistoryEntry {
    pub id: i64,
    pub search_term: String,
    pub search_date: NaiveDateTime,
    pub result_count: i64,
}

// --- Ledger ---

/// A source page that has already been visited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchedLocation {
    pub source_type: String,
    pub source_identifier: String,
    pub terms_found: i64,
    pub last_searched: NaiveDateTime,
}

// --- Cache ---

/// A term discovered on an external source, staged before promotion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedTerm {
    pub term: String,
    pub definition: Option<String>,
    pub example: Option<String>,
    pub category: Option<String>,
    pub polish: Option<String>,
    pub pronunciation: Option<String>,
    pub source_type: Option<String>,
    pub source_url: Option<String>,
    pub date_cached: NaiveDateTime,
    pub added_to_database: bool,
}

/// Input for `SlangStore::add_to_cache`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewCachedTerm {
    pub fields: TermFields,
    pub source_type: Option<String>,
    pub source_url: Option<String>,
}

impl From<&SlangRecord> for NewCachedTerm {
    fn from(record: &SlangRecord) -> Self {
        NewCachedTerm {
            fields: TermFields::from(record),
            source_type: non_empty(&record.source),
            source_url: record.source_url.clone(),
        }
    }
}

// --- Stats ---

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatabaseStats {
    pub total_terms: i64,
    pub total_searches: i64,
    pub searched_locations: i64,
    pub pending_cache: i64,
    pub storage_path: PathBuf,
}

// --- Searcher output ---

/// One candidate term produced by the searcher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlangRecord {
    pub term: String,
    pub definition: String,
    pub example: String,
    pub category: String,
    pub polish: String,
    pub pronunciation: String,
    pub source: String,
    pub source_url: Option<String>,
    pub search_date: DateTime<Utc>,
}
