//! Collects British slang terms into a local SQLite store.
//!
//! [`SlangStore`] owns the database file; [`SlangSearcher`] produces one
//! candidate term per call from a built-in list or from MediaWiki sources;
//! [`Harvester`] drives the two in a loop.
//!
//! ```
//! # tokio_test::block_on(async {
//! use british_days::{SearchConfig, SlangSearcher, SlangStore, TermFields};
//!
//! let dir = tempfile::tempdir().unwrap();
//! let store = SlangStore::open_at(dir.path().join("slang.db")).unwrap();
//! let mut searcher = SlangSearcher::new(SearchConfig::default(), Some(store.clone())).unwrap();
//!
//! let record = searcher.search_new_slang().await;
//! assert!(store.add_term(&TermFields::from(&record)).is_ok());
//! # });
//! ```

// Declare modules
pub mod config;
pub mod db;
pub mod error;
pub mod harvest;
pub mod lookup;
pub mod models;
pub mod parse;
pub mod progress;
pub mod search;
pub mod synthetic;

// Re-export key types for easier use
pub use config::{Config, HarvestConfig, SearchConfig, SearchMode};
pub use error::{Result, SlangError, StoreOutcome};
pub use harvest::{HarvestSummary, Harvester, StopReason};
pub use models::{
    CachedTerm, DatabaseStats, NewCachedTerm, SearchHistoryEntry, SearchedLocation, SlangRecord, Term,
    TermFields,
};
pub use progress::HarvestEvent;
pub use search::{RotationState, SlangSearcher, SourceKind};

use chrono::Utc;
use log::{debug, error, info};
use models::{DEFAULT_CATEGORY, DEFAULT_SOURCE};
use rusqlite::{Connection, OpenFlags, OptionalExtension, params};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

/// Options for opening the store.
#[derive(Debug, Default, Clone)]
pub struct StoreOptions {
    /// Optional path to a specific database file to use or create.
    /// If None, the path derived from `config` is used.
    pub db_path: Option<PathBuf>,
    pub config: Config,
}

/// Thread-safe handle to the slang database.
///
/// Every operation holds the connection mutex for its whole
/// read-modify-write sequence, so calls from different threads are
/// serialized.
#[derive(Clone)] // Clone is cheap due to Arc<Mutex<...>>
pub struct SlangStore {
    conn: Arc<Mutex<Connection>>,
    db_file_path: Arc<PathBuf>,
}

// Helper function to open/create the database connection
fn open_db_connection(path: &Path) -> Result<Connection> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let conn = Connection::open_with_flags(
        path,
        OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_CREATE,
    )?;

    conn.pragma_update(None, "journal_mode", "WAL")?;
    conn.pragma_update(None, "synchronous", "NORMAL")?;
    conn.busy_timeout(std::time::Duration::from_secs(5))?;

    Ok(conn)
}

impl SlangStore {
    /// Opens the store at the location configured in `options`, creating
    /// and migrating the schema as needed.
    pub fn open(options: StoreOptions) -> Result<Self> {
        let db_path = match options.db_path {
            Some(path) => {
                info!("Using provided database path: {:?}", path);
                path
            }
            None => options.config.db_path()?,
        };
        Self::open_at(db_path)
    }

    /// Opens (or creates) the database file at `path`.
    pub fn open_at(path: impl Into<PathBuf>) -> Result<Self> {
        let db_path = path.into();
        info!("Using database path: {:?}", db_path);
        let mut conn = open_db_connection(&db_path)?;
        db::initialize_database(&mut conn)?;
        Ok(SlangStore {
            conn: Arc::new(Mutex::new(conn)),
            db_file_path: Arc::new(db_path),
        })
    }

    /// Re-runs schema creation and migration. Idempotent.
    pub fn initialize(&self) -> Result<()> {
        let mut conn = self.lock()?;
        db::initialize_database(&mut conn)
    }

    pub fn path(&self) -> &Path {
        &self.db_file_path
    }

    /// Deletes the database file along with its WAL and SHM files.
    pub fn clear_database(path: &Path) -> Result<()> {
        if !path.exists() {
            info!("Database file not found, nothing to clear: {:?}", path);
            return Ok(()); // Not an error if the file doesn't exist
        }
        match fs::remove_file(path) {
            Ok(_) => {
                info!("Successfully deleted database file: {:?}", path);
                for suffix in ["-wal", "-shm"] {
                    let mut sibling = path.as_os_str().to_owned();
                    sibling.push(suffix);
                    let sibling = PathBuf::from(sibling);
                    if sibling.exists() {
                        let _ = fs::remove_file(sibling); // Ignore error if deletion fails
                    }
                }
                Ok(())
            }
            Err(e) => {
                error!("Failed to delete database file {:?}: {}", path, e);
                Err(SlangError::Io(e))
            }
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| SlangError::Internal("Mutex poisoned".to_string()))
    }

    // --- Terms ---

    /// Inserts a new term. A name that already exists under any casing
    /// yields `Conflict` and leaves the table untouched.
    pub fn add_term(&self, fields: &TermFields) -> StoreOutcome<i64> {
        let name = fields.term.trim();
        if name.is_empty() {
            return StoreOutcome::Fatal(SlangError::InvalidArgument(
                "term name must not be empty".to_string(),
            ));
        }
        match self.insert_term(name, fields) {
            Ok(Some(id)) => {
                debug!("Added term '{}' with id {}", name, id);
                StoreOutcome::Ok(id)
            }
            Ok(None) => {
                debug!("Term '{}' already exists", name);
                StoreOutcome::Conflict
            }
            Err(e) => StoreOutcome::from_error("Error adding term", e),
        }
    }

    fn insert_term(&self, name: &str, fields: &TermFields) -> Result<Option<i64>> {
        let conn = self.lock()?;
        if term_exists(&conn, name)? {
            return Ok(None);
        }
        conn.execute(
            "INSERT INTO slang_terms (term, definition, example, category, source, polish, pronunciation, date_added)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                name,
                fields.definition,
                fields.example,
                fields.category.as_deref().unwrap_or(DEFAULT_CATEGORY),
                fields.source.as_deref().unwrap_or(DEFAULT_SOURCE),
                fields.polish,
                fields.pronunciation,
                Utc::now().naive_utc(),
            ],
        )?;
        Ok(Some(conn.last_insert_rowid()))
    }

    /// Replaces every writable field of term `id`. `date_added` is kept.
    pub fn update_term(&self, id: i64, fields: &TermFields) -> StoreOutcome<()> {
        let name = fields.term.trim();
        if name.is_empty() {
            return StoreOutcome::Fatal(SlangError::InvalidArgument(
                "term name must not be empty".to_string(),
            ));
        }
        let result = self.lock().and_then(|conn| {
            let clash: Option<i64> = conn
                .query_row(
                    "SELECT id FROM slang_terms WHERE term = ?1 COLLATE NOCASE AND id != ?2 LIMIT 1",
                    params![name, id],
                    |row| row.get(0),
                )
                .optional()?;
            if clash.is_some() {
                return Ok(None);
            }
            conn.execute(
                "UPDATE slang_terms
                 SET term = ?1, definition = ?2, example = ?3, category = ?4,
                     source = ?5, polish = ?6, pronunciation = ?7
                 WHERE id = ?8",
                params![
                    name,
                    fields.definition,
                    fields.example,
                    fields.category,
                    fields.source,
                    fields.polish,
                    fields.pronunciation,
                    id,
                ],
            )
            .map(Some)
            .map_err(SlangError::from)
        });
        match result {
            Ok(None) => StoreOutcome::Conflict,
            Ok(Some(0)) => StoreOutcome::NotFound,
            Ok(Some(_)) => StoreOutcome::Ok(()),
            Err(e) => StoreOutcome::from_error("Error updating term", e),
        }
    }

    pub fn delete_term(&self, id: i64) -> StoreOutcome<()> {
        let result = self.lock().and_then(|conn| {
            conn.execute("DELETE FROM slang_terms WHERE id = ?1", params![id])
                .map_err(SlangError::from)
        });
        match result {
            Ok(0) => StoreOutcome::NotFound,
            Ok(_) => StoreOutcome::Ok(()),
            Err(e) => StoreOutcome::from_error("Error deleting term", e),
        }
    }

    /// All terms, newest first.
    pub fn all_terms(&self) -> Result<Vec<Term>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM slang_terms ORDER BY date_added DESC, id DESC",
            db::TERM_COLUMNS
        ))?;
        let rows = stmt.query_map([], db::row_to_term)?;
        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(SlangError::from)
    }

    pub fn term_by_id(&self, id: i64) -> Result<Option<Term>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM slang_terms WHERE id = ?1",
            db::TERM_COLUMNS
        ))?;
        stmt.query_row(params![id], db::row_to_term)
            .optional()
            .map_err(SlangError::from)
    }

    /// Case-insensitive substring search over term, definition, example
    /// and Polish gloss, newest first.
    pub fn search_terms(&self, query: &str) -> Result<Vec<Term>> {
        let pattern = db::like_pattern(query);
        let conn = self.lock()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM slang_terms
             WHERE term LIKE ?1 ESCAPE '\\'
                OR definition LIKE ?1 ESCAPE '\\'
                OR example LIKE ?1 ESCAPE '\\'
                OR polish LIKE ?1 ESCAPE '\\'
             ORDER BY date_added DESC, id DESC",
            db::TERM_COLUMNS
        ))?;
        let rows = stmt.query_map(params![pattern], db::row_to_term)?;
        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(SlangError::from)
    }

    /// Whether a term with this name exists, ignoring case.
    pub fn contains_term(&self, name: &str) -> Result<bool> {
        let conn = self.lock()?;
        term_exists(&conn, name.trim())
    }

    // --- Search history ---

    pub fn add_search_history(&self, search_term: &str, result_count: i64) -> Result<()> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO search_history (search_term, search_date, result_count) VALUES (?1, ?2, ?3)",
            params![search_term, Utc::now().naive_utc(), result_count],
        )?;
        Ok(())
    }

    pub fn recent_searches(&self, limit: usize) -> Result<Vec<SearchHistoryEntry>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT id, search_term, search_date, result_count FROM search_history
             ORDER BY search_date DESC, id DESC LIMIT ?1",
        )?;
        let rows = stmt.query_map(params![limit as i64], db::row_to_history)?;
        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(SlangError::from)
    }

    pub fn database_stats(&self) -> Result<DatabaseStats> {
        let conn = self.lock()?;
        let count = |sql: &str| -> Result<i64> {
            conn.query_row(sql, [], |row| row.get(0))
                .map_err(SlangError::from)
        };
        Ok(DatabaseStats {
            total_terms: count("SELECT COUNT(*) FROM slang_terms")?,
            total_searches: count("SELECT COUNT(*) FROM search_history")?,
            searched_locations: count("SELECT COUNT(*) FROM searched_locations")?,
            pending_cache: count("SELECT COUNT(*) FROM term_cache WHERE added_to_database = 0")?,
            storage_path: self.db_file_path.as_ref().clone(),
        })
    }

    // --- Ledger ---

    /// Records that a source page was visited. Re-marking the same
    /// `(source_type, identifier)` overwrites the previous row.
    pub fn mark_location_searched(
        &self,
        source_type: &str,
        identifier: &str,
        terms_found: i64,
    ) -> Result<()> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO searched_locations (source_type, source_identifier, terms_found, last_searched)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(source_type, source_identifier) DO UPDATE SET
                terms_found = excluded.terms_found,
                last_searched = excluded.last_searched",
            params![source_type, identifier, terms_found, Utc::now().naive_utc()],
        )?;
        debug!("Marked {}:{} as searched", source_type, identifier);
        Ok(())
    }

    /// Visited source pages, most recently searched first.
    pub fn searched_locations(&self, limit: usize) -> Result<Vec<SearchedLocation>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT source_type, source_identifier, terms_found, last_searched FROM searched_locations
             ORDER BY last_searched DESC, id DESC LIMIT ?1",
        )?;
        let rows = stmt.query_map(params![limit as i64], db::row_to_location)?;
        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(SlangError::from)
    }

    pub fn is_location_searched(&self, source_type: &str, identifier: &str) -> Result<bool> {
        let conn = self.lock()?;
        let found: Option<i64> = conn
            .query_row(
                "SELECT 1 FROM searched_locations WHERE source_type = ?1 AND source_identifier = ?2",
                params![source_type, identifier],
                |row| row.get(0),
            )
            .optional()?;
        Ok(found.is_some())
    }

    // --- Cache ---

    /// Stages an externally discovered term. Returns false (not an error)
    /// when the name is already cached under any casing.
    pub fn add_to_cache(&self, entry: &NewCachedTerm) -> Result<bool> {
        let conn = self.lock()?;
        let fields = &entry.fields;
        if name_exists(&conn, "term_cache", fields.term.trim())? {
            debug!("Term '{}' already cached", fields.term);
            return Ok(false);
        }
        let inserted = conn.execute(
            "INSERT OR IGNORE INTO term_cache
                (term, definition, example, category, polish, pronunciation, source_type, source_url, date_cached)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                fields.term.trim(),
                fields.definition,
                fields.example,
                fields.category,
                fields.polish,
                fields.pronunciation,
                entry.source_type,
                entry.source_url,
                Utc::now().naive_utc(),
            ],
        )?;
        if inserted == 0 {
            debug!("Term '{}' already cached", fields.term);
        }
        Ok(inserted > 0)
    }

    pub fn cached_term(&self, term: &str) -> Result<Option<CachedTerm>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM term_cache WHERE term = ?1 COLLATE NOCASE",
            db::CACHE_COLUMNS
        ))?;
        stmt.query_row(params![term.trim()], db::row_to_cached_term)
            .optional()
            .map_err(SlangError::from)
    }

    /// Flags a cached term as promoted. Returns false if it is not cached.
    pub fn mark_cache_added_to_db(&self, term: &str) -> Result<bool> {
        let conn = self.lock()?;
        let updated = conn.execute(
            "UPDATE term_cache SET added_to_database = 1 WHERE term = ?1 COLLATE NOCASE",
            params![term.trim()],
        )?;
        Ok(updated > 0)
    }

    /// Number of cached terms not yet promoted into the term table.
    pub fn uncached_terms_count(&self) -> Result<i64> {
        let conn = self.lock()?;
        conn.query_row(
            "SELECT COUNT(*) FROM term_cache WHERE added_to_database = 0",
            [],
            |row| row.get(0),
        )
        .map_err(SlangError::from)
    }
}

fn term_exists(conn: &Connection, name: &str) -> Result<bool> {
    name_exists(conn, "slang_terms", name)
}

// Case-insensitive lookup; files from older releases may lack the unique
// NOCASE index, so inserts check here first.
fn name_exists(conn: &Connection, table: &str, name: &str) -> Result<bool> {
    let found: Option<i64> = conn
        .query_row(
            &format!("SELECT 1 FROM {} WHERE term = ?1 COLLATE NOCASE LIMIT 1", table),
            params![name],
            |row| row.get(0),
        )
        .optional()?;
    Ok(found.is_some())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::{TempDir, tempdir};

    fn open_temp_store() -> (TempDir, SlangStore) {
        let _ = env_logger::builder().is_test(true).try_init();
        let dir = tempdir().expect("Failed to create temp dir");
        let store = SlangStore::open_at(dir.path().join("test.db")).expect("open store");
        (dir, store)
    }

    #[test]
    fn test_duplicate_term_is_conflict() {
        let (_dir, store) = open_temp_store();
        let first = store.add_term(&TermFields::new("Chuffed").definition("Very pleased"));
        assert!(first.is_ok());

        let second = store.add_term(&TermFields::new("chuffed").definition("Happy"));
        assert!(matches!(second, StoreOutcome::Conflict));
        assert_eq!(store.database_stats().unwrap().total_terms, 1);
        assert_eq!(
            store.all_terms().unwrap()[0].definition.as_deref(),
            Some("Very pleased")
        );
    }

    #[test]
    fn test_add_term_applies_defaults() {
        let (_dir, store) = open_temp_store();
        let id = store.add_term(&TermFields::new("kip")).ok().unwrap();
        let term = store.term_by_id(id).unwrap().unwrap();
        assert_eq!(term.category.as_deref(), Some("slang"));
        assert_eq!(term.source.as_deref(), Some("internet"));
        assert_eq!(term.polish, None);
    }

    #[test]
    fn test_empty_term_is_rejected() {
        let (_dir, store) = open_temp_store();
        assert!(matches!(
            store.add_term(&TermFields::new("   ")),
            StoreOutcome::Fatal(SlangError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_all_terms_newest_first() {
        let (_dir, store) = open_temp_store();
        for name in ["mate", "chuffed", "knackered"] {
            assert!(store.add_term(&TermFields::new(name)).is_ok());
            std::thread::sleep(std::time::Duration::from_millis(5));
        }
        let names: Vec<String> = store
            .all_terms()
            .unwrap()
            .into_iter()
            .map(|t| t.term)
            .collect();
        assert_eq!(names, vec!["knackered", "chuffed", "mate"]);
    }

    #[test]
    fn test_search_terms() {
        let (_dir, store) = open_temp_store();
        store
            .add_term(&TermFields::new("chuffed").definition("Very pleased"))
            .ok()
            .unwrap();
        store
            .add_term(
                &TermFields::new("skint")
                    .definition("Having no money; broke")
                    .polish("Spłukany, bez grosza"),
            )
            .ok()
            .unwrap();

        let hits = store.search_terms("chuff").unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].term, "chuffed");

        assert_eq!(store.search_terms("PLEASED").unwrap().len(), 1);
        assert_eq!(store.search_terms("grosza").unwrap()[0].term, "skint");
        assert!(store.search_terms("zzz-no-match").unwrap().is_empty());
        assert!(store.search_terms("%").unwrap().is_empty());
    }

    #[test]
    fn test_update_and_delete() {
        let (_dir, store) = open_temp_store();
        let id = store.add_term(&TermFields::new("bog")).ok().unwrap();
        let other = store.add_term(&TermFields::new("loo")).ok().unwrap();
        let before = store.term_by_id(id).unwrap().unwrap();

        let updated = store.update_term(
            id,
            &TermFields::new("bog")
                .definition("Toilet or bathroom")
                .category("place"),
        );
        assert!(updated.is_ok());
        let after = store.term_by_id(id).unwrap().unwrap();
        assert_eq!(after.definition.as_deref(), Some("Toilet or bathroom"));
        assert_eq!(after.date_added, before.date_added);

        // Renaming onto another term's name is a conflict.
        assert!(matches!(
            store.update_term(other, &TermFields::new("BOG")),
            StoreOutcome::Conflict
        ));

        assert!(store.delete_term(id).is_ok());
        assert!(store.term_by_id(id).unwrap().is_none());
        assert!(matches!(store.delete_term(id), StoreOutcome::NotFound));
        assert!(matches!(
            store.update_term(9999, &TermFields::new("ghost")),
            StoreOutcome::NotFound
        ));
    }

    #[test]
    fn test_location_ledger() {
        let (_dir, store) = open_temp_store();
        store.mark_location_searched("wikipedia", "Page1", 3).unwrap();
        assert!(store.is_location_searched("wikipedia", "Page1").unwrap());
        assert!(!store.is_location_searched("wikipedia", "Page2").unwrap());
        assert!(!store.is_location_searched("wiktionary", "Page1").unwrap());

        store.mark_location_searched("wikipedia", "Page1", 5).unwrap();
        let conn = store.lock().unwrap();
        let (rows, found): (i64, i64) = conn
            .query_row(
                "SELECT COUNT(*), MAX(terms_found) FROM searched_locations",
                [],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .unwrap();
        assert_eq!(rows, 1);
        assert_eq!(found, 5);
        drop(conn);

        store.mark_location_searched("wiktionary", "skint", 1).unwrap();
        let visited = store.searched_locations(10).unwrap();
        assert_eq!(visited.len(), 2);
        assert_eq!(visited[0].source_type, "wiktionary");
        assert_eq!(visited[0].source_identifier, "skint");
        assert_eq!(visited[1].terms_found, 5);
        assert_eq!(store.searched_locations(1).unwrap().len(), 1);
    }

    #[test]
    fn test_cache_lifecycle() {
        let (_dir, store) = open_temp_store();
        let entry = NewCachedTerm {
            fields: TermFields::new("test_slang").definition("A test definition"),
            source_type: Some("wikipedia".to_string()),
            source_url: Some("https://en.wikipedia.org/wiki/Test_slang".to_string()),
        };
        assert!(store.add_to_cache(&entry).unwrap());

        let mut shouted = entry.clone();
        shouted.fields.term = "TEST_SLANG".to_string();
        assert!(!store.add_to_cache(&shouted).unwrap());
        assert_eq!(store.uncached_terms_count().unwrap(), 1);

        let cached = store.cached_term("Test_Slang").unwrap().unwrap();
        assert_eq!(cached.term, "test_slang");
        assert_eq!(cached.definition.as_deref(), Some("A test definition"));
        assert!(!cached.added_to_database);

        assert!(store.mark_cache_added_to_db("test_slang").unwrap());
        assert!(store.cached_term("test_slang").unwrap().unwrap().added_to_database);
        assert_eq!(store.uncached_terms_count().unwrap(), 0);
        assert!(!store.mark_cache_added_to_db("missing").unwrap());
    }

    #[test]
    fn test_stats_and_history() {
        let (_dir, store) = open_temp_store();
        store.add_term(&TermFields::new("mate")).ok().unwrap();
        store.add_search_history("mate", 1).unwrap();
        store.add_search_history("quid", 0).unwrap();

        let stats = store.database_stats().unwrap();
        assert_eq!(stats.total_terms, 1);
        assert_eq!(stats.total_searches, 2);
        assert_eq!(stats.storage_path, store.path());

        let history = store.recent_searches(1).unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].search_term, "quid");
    }

    #[test]
    fn test_reopen_preserves_data() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("reopen.db");
        {
            let store = SlangStore::open_at(&path).unwrap();
            store.add_term(&TermFields::new("cuppa")).ok().unwrap();
            store.initialize().unwrap();
            store.initialize().unwrap();
        }
        let store = SlangStore::open_at(&path).unwrap();
        assert!(store.contains_term("CUPPA").unwrap());
        assert_eq!(store.all_terms().unwrap().len(), 1);
    }

    #[test]
    fn test_clear_database() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("clear.db");
        {
            let store = SlangStore::open_at(&path).unwrap();
            store.add_term(&TermFields::new("naff")).ok().unwrap();
        }
        assert!(path.exists());
        SlangStore::clear_database(&path).unwrap();
        assert!(!path.exists());
        // Clearing a missing file is fine.
        SlangStore::clear_database(&path).unwrap();
    }

    #[test]
    fn test_concurrent_adds_are_serialized() {
        let (_dir, store) = open_temp_store();
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let store = store.clone();
                std::thread::spawn(move || {
                    (0..10)
                        .filter(|i| store.add_term(&TermFields::new(format!("term-{i}"))).is_ok())
                        .count()
                })
            })
            .collect();
        let added: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
        assert_eq!(added, 10);
        assert_eq!(store.all_terms().unwrap().len(), 10);
    }
}
