use crate::error::{Result, SlangError};
use crate::models::{CachedTerm, SearchHistoryEntry, SearchedLocation, Term};
use log::{debug, info, warn};
use rusqlite::{Connection, OptionalExtension, Row, Transaction, params};

// --- Schema Definition ---

pub const SCHEMA_VERSION: u32 = 3;

const CREATE_METADATA_TABLE: &str = "
CREATE TABLE IF NOT EXISTS metadata (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
);";

// Column set of the first released schema; polish/pronunciation arrive in V2.
const CREATE_SLANG_TERMS_TABLE: &str = "
CREATE TABLE IF NOT EXISTS slang_terms (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    term TEXT NOT NULL UNIQUE COLLATE NOCASE,
    definition TEXT,
    example TEXT,
    category TEXT,
    date_added TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
    source TEXT
);";

const CREATE_SEARCH_HISTORY_TABLE: &str = "
CREATE TABLE IF NOT EXISTS search_history (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    search_term TEXT,
    search_date TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
    result_count INTEGER
);";

const CREATE_SEARCHED_LOCATIONS_TABLE: &str = "
CREATE TABLE IF NOT EXISTS searched_locations (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    source_type TEXT NOT NULL,
    source_identifier TEXT NOT NULL,
    terms_found INTEGER NOT NULL DEFAULT 0,
    last_searched TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
    UNIQUE (source_type, source_identifier)
);";

const CREATE_TERM_CACHE_TABLE: &str = "
CREATE TABLE IF NOT EXISTS term_cache (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    term TEXT NOT NULL UNIQUE COLLATE NOCASE,
    definition TEXT,
    example TEXT,
    category TEXT,
    polish TEXT,
    pronunciation TEXT,
    source_type TEXT,
    source_url TEXT,
    date_cached TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
    added_to_database INTEGER NOT NULL DEFAULT 0 -- 0 for false, 1 for true
);";

/// Columns a pre-existing `term_cache` may lack, with the type used to add them.
const TERM_CACHE_COLUMNS: [(&str, &str); 9] = [
    ("definition", "TEXT"),
    ("example", "TEXT"),
    ("category", "TEXT"),
    ("polish", "TEXT"),
    ("pronunciation", "TEXT"),
    ("source_type", "TEXT"),
    ("source_url", "TEXT"),
    ("date_cached", "TIMESTAMP"),
    ("added_to_database", "INTEGER NOT NULL DEFAULT 0"),
];

// --- Indices ---

const CREATE_TERM_DATE_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_slang_terms_date ON slang_terms (date_added);";
const CREATE_CACHE_PENDING_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_term_cache_pending ON term_cache (added_to_database);";

// --- Migrations ---

type Migration = fn(&Transaction) -> Result<()>;

/// Ordered migration steps; entry `i` brings the schema to version `i + 1`.
const MIGRATIONS: &[Migration] = &[migrate_v1, migrate_v2, migrate_v3];

fn migrate_v1(tx: &Transaction) -> Result<()> {
    tx.execute(CREATE_SLANG_TERMS_TABLE, [])?;
    tx.execute(CREATE_SEARCH_HISTORY_TABLE, [])?;
    Ok(())
}

fn migrate_v2(tx: &Transaction) -> Result<()> {
    for column in ["polish", "pronunciation"] {
        if column_exists(tx, "slang_terms", column)? {
            debug!("Column slang_terms.{} already present.", column);
            continue;
        }
        info!("Adding column slang_terms.{}", column);
        tx.execute(&format!("ALTER TABLE slang_terms ADD COLUMN {} TEXT", column), [])?;
    }
    Ok(())
}

fn migrate_v3(tx: &Transaction) -> Result<()> {
    tx.execute(CREATE_SEARCHED_LOCATIONS_TABLE, [])?;
    tx.execute(CREATE_TERM_CACHE_TABLE, [])?;
    for (column, decl) in TERM_CACHE_COLUMNS {
        if !column_exists(tx, "term_cache", column)? {
            info!("Adding column term_cache.{}", column);
            tx.execute(&format!("ALTER TABLE term_cache ADD COLUMN {} {}", column, decl), [])?;
        }
    }
    tx.execute(
        "UPDATE term_cache SET date_cached = CURRENT_TIMESTAMP WHERE date_cached IS NULL",
        [],
    )?;
    create_term_nocase_index(tx, "slang_terms")?;
    create_term_nocase_index(tx, "term_cache")?;
    tx.execute(CREATE_TERM_DATE_INDEX, [])?;
    tx.execute(CREATE_CACHE_PENDING_INDEX, [])?;
    Ok(())
}

/// Counts names in `table` that appear more than once ignoring case.
fn case_variant_duplicates(conn: &Connection, table: &str) -> Result<i64> {
    let count = conn.query_row(
        &format!(
            "SELECT COUNT(*) FROM (SELECT 1 FROM {} GROUP BY term COLLATE NOCASE HAVING COUNT(*) > 1)",
            table
        ),
        [],
        |row| row.get(0),
    )?;
    Ok(count)
}

/// Adds a case-insensitive unique index on `table.term`.
///
/// Older files declared `term` as case-sensitive and may hold names that
/// differ only in case. Those rows are kept; the table gets a plain index
/// instead and uniqueness is left to the insert-time existence check.
/// Returns whether the unique index was created.
fn create_term_nocase_index(tx: &Transaction, table: &str) -> Result<bool> {
    let duplicates = case_variant_duplicates(tx, table)?;
    if duplicates > 0 {
        warn!(
            "{} has {} name(s) differing only in case; skipping the case-insensitive unique index.",
            table, duplicates
        );
        tx.execute(
            &format!(
                "CREATE INDEX IF NOT EXISTS idx_{0}_term ON {0} (term COLLATE NOCASE)",
                table
            ),
            [],
        )?;
        return Ok(false);
    }
    tx.execute(
        &format!(
            "CREATE UNIQUE INDEX IF NOT EXISTS idx_{0}_term_nocase ON {0} (term COLLATE NOCASE)",
            table
        ),
        [],
    )?;
    Ok(true)
}

pub(crate) fn column_exists(conn: &Connection, table: &str, column: &str) -> Result<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({})", table))?;
    let names = stmt.query_map([], |row| row.get::<_, String>(1))?;
    for name in names {
        if name?.eq_ignore_ascii_case(column) {
            return Ok(true);
        }
    }
    Ok(false)
}

// --- Initialization Function ---

/// Brings the schema up to `SCHEMA_VERSION`.
///
/// Safe to call on every startup: files created before the metadata table
/// existed count as version 0, and every step tolerates tables or columns
/// that are already there.
pub fn initialize_database(conn: &mut Connection) -> Result<()> {
    debug!(
        "Initializing database schema (version {})...",
        SCHEMA_VERSION
    );
    let tx = conn.transaction()?;
    tx.execute(CREATE_METADATA_TABLE, [])?;

    let existing_version_str: Option<String> = tx
        .query_row(
            "SELECT value FROM metadata WHERE key = 'schema_version'",
            [],
            |row| row.get(0),
        )
        .optional()?;

    let existing_version: u32 = match existing_version_str {
        Some(v_str) => v_str.parse().map_err(|e| {
            SlangError::ParseError(format!(
                "Failed to parse existing schema version '{}': {}",
                v_str, e
            ))
        })?,
        None => 0,
    };

    match existing_version.cmp(&SCHEMA_VERSION) {
        std::cmp::Ordering::Less => {
            for (index, step) in MIGRATIONS.iter().enumerate() {
                let target = index as u32 + 1;
                if target > existing_version {
                    info!("Applying schema migration to version {}", target);
                    step(&tx)?;
                }
            }
            tx.execute(
                "INSERT INTO metadata (key, value) VALUES ('schema_version', ?1)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                params![SCHEMA_VERSION.to_string()],
            )?;
            info!(
                "Database schema migrated from version {} to {}.",
                existing_version, SCHEMA_VERSION
            );
        }
        std::cmp::Ordering::Greater => {
            warn!(
                "Database schema version ({}) is newer than expected ({}). Using potentially incompatible schema.",
                existing_version, SCHEMA_VERSION
            );
        }
        std::cmp::Ordering::Equal => {
            debug!(
                "Database schema version ({}) matches expected version.",
                existing_version
            );
        }
    }

    tx.commit()?;
    Ok(())
}

/// Reads the stored schema version, if any.
pub fn schema_version(conn: &Connection) -> Result<Option<u32>> {
    let value: Option<String> = conn
        .query_row(
            "SELECT value FROM metadata WHERE key = 'schema_version'",
            [],
            |row| row.get(0),
        )
        .optional()?;
    Ok(value.and_then(|v| v.parse().ok()))
}

// --- Mapping Helpers (Row -> Struct) ---

pub(crate) const TERM_COLUMNS: &str =
    "id, term, definition, example, category, source, polish, pronunciation, date_added";

pub(crate) fn row_to_term(row: &Row) -> rusqlite::Result<Term> {
    Ok(Term {
        id: row.get("id")?,
        term: row.get("term")?,
        definition: row.get("definition")?,
        example: row.get("example")?,
        category: row.get("category")?,
        source: row.get("source")?,
        polish: row.get("polish")?,
        pronunciation: row.get("pronunciation")?,
        date_added: row.get("date_added")?,
    })
}

pub(crate) const CACHE_COLUMNS: &str = "term, definition, example, category, polish, pronunciation, source_type, source_url, date_cached, added_to_database";

pub(crate) fn row_to_cached_term(row: &Row) -> rusqlite::Result<CachedTerm> {
    Ok(CachedTerm {
        term: row.get("term")?,
        definition: row.get("definition")?,
        example: row.get("example")?,
        category: row.get("category")?,
        polish: row.get("polish")?,
        pronunciation: row.get("pronunciation")?,
        source_type: row.get("source_type")?,
        source_url: row.get("source_url")?,
        date_cached: row.get("date_cached")?,
        added_to_database: row.get::<_, i64>("added_to_database")? != 0, // Convert integer back to bool
    })
}

pub(crate) fn row_to_history(row: &Row) -> rusqlite::Result<SearchHistoryEntry> {
    Ok(SearchHistoryEntry {
        id: row.get("id")?,
        search_term: row.get::<_, Option<String>>("search_term")?.unwrap_or_default(),
        search_date: row.get("search_date")?,
        result_count: row.get::<_, Option<i64>>("result_count")?.unwrap_or(0),
    })
}

pub(crate) fn row_to_location(row: &Row) -> rusqlite::Result<SearchedLocation> {
    Ok(SearchedLocation {
        source_type: row.get("source_type")?,
        source_identifier: row.get("source_identifier")?,
        terms_found: row.get("terms_found")?,
        last_searched: row.get("last_searched")?,
    })
}

/// Escapes `%`, `_` and `\` so user input matches literally inside LIKE.
pub(crate) fn like_pattern(query: &str) -> String {
    let mut escaped = String::with_capacity(query.len() + 2);
    escaped.push('%');
    for c in query.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}
