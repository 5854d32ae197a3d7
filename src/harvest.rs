//! The search-and-insert loop.
//!
//! Each iteration asks the searcher for a record, checks its name against
//! the terms already known (ignoring case) and inserts it when new. The run
//! ends once `max_consecutive_failures` iterations in a row add nothing, or
//! when the stop flag is raised. The flag is only checked between
//! iterations, so stopping can take up to one fetch plus one sleep.

use crate::config::HarvestConfig;
use crate::error::{Result, StoreOutcome};
use crate::models::{DEFAULT_CATEGORY, DEFAULT_SOURCE, SlangRecord, Term, TermFields};
use crate::progress::{HarvestEvent, HarvestReporter, report};
use crate::search::SlangSearcher;
use crate::SlangStore;
use log::{debug, info, warn};
use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

pub use crate::progress::StopReason;

/// Totals for one harvest run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HarvestSummary {
    pub attempts: usize,
    pub added: usize,
    pub reason: StopReason,
}

/// Runs the harvest loop with a fixed failure bound and sleep interval.
#[derive(Debug, Clone)]
pub struct Harvester {
    max_consecutive_failures: u32,
    interval: Duration,
    stop: Arc<AtomicBool>,
}

impl Harvester {
    pub fn new(config: &HarvestConfig) -> Self {
        Harvester {
            max_consecutive_failures: config.max_consecutive_failures.max(1),
            interval: config.interval(),
            stop: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Flag that ends the run after the current iteration when set.
    pub fn stop_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop)
    }

    pub async fn run(
        &self,
        searcher: &mut SlangSearcher,
        store: &SlangStore,
        reporter: Option<&HarvestReporter>,
    ) -> Result<HarvestSummary> {
        let mut known: HashSet<String> = store
            .all_terms()?
            .into_iter()
            .map(|t| t.term.to_lowercase())
            .collect();
        info!(
            "Starting harvest with {} known terms (stop after {} consecutive failures)",
            known.len(),
            self.max_consecutive_failures
        );
        report(reporter, HarvestEvent::Started { known_terms: known.len() });

        let mut attempts = 0;
        let mut added = 0;
        let mut consecutive_failures: u32 = 0;

        let reason = loop {
            if self.stop.load(Ordering::Relaxed) {
                break StopReason::Cancelled;
            }
            if consecutive_failures >= self.max_consecutive_failures {
                break StopReason::ConsecutiveFailures;
            }

            attempts += 1;
            let record = searcher.search_new_slang().await;
            let key = record.term.to_lowercase();

            if known.contains(&key) {
                consecutive_failures += 1;
                debug!("'{}' is already known", record.term);
                report(
                    reporter,
                    HarvestEvent::Duplicate {
                        term: record.term,
                        consecutive_failures,
                    },
                );
            } else {
                match store.add_term(&TermFields::from(&record)) {
                    StoreOutcome::Ok(id) => {
                        consecutive_failures = 0;
                        added += 1;
                        known.insert(key);
                        // Web finds were staged in the cache; mark them promoted.
                        if record.source_url.is_some() {
                            if let Err(e) = store.mark_cache_added_to_db(&record.term) {
                                warn!("Could not mark cached '{}' as added: {}", record.term, e);
                            }
                        }
                        let term = match store.term_by_id(id) {
                            Ok(Some(term)) => term,
                            Ok(None) => added_term(id, &record),
                            Err(e) => {
                                warn!("Could not reload '{}' after insert: {}", record.term, e);
                                added_term(id, &record)
                            }
                        };
                        report(
                            reporter,
                            HarvestEvent::Added {
                                term,
                                total_added: added,
                            },
                        );
                    }
                    StoreOutcome::Conflict => {
                        consecutive_failures += 1;
                        known.insert(key);
                        report(
                            reporter,
                            HarvestEvent::Duplicate {
                                term: record.term,
                                consecutive_failures,
                            },
                        );
                    }
                    failure => {
                        consecutive_failures += 1;
                        warn!("Could not add '{}': {}", record.term, failure.kind());
                        let reason = match failure {
                            StoreOutcome::Transient(e) | StoreOutcome::Fatal(e) => e.to_string(),
                            other => other.kind().to_string(),
                        };
                        report(
                            reporter,
                            HarvestEvent::Failed {
                                term: record.term,
                                reason,
                                consecutive_failures,
                            },
                        );
                    }
                }
            }

            if !self.interval.is_zero() && !self.stop.load(Ordering::Relaxed) {
                tokio::time::sleep(self.interval).await;
            }
        };

        info!(
            "Harvest finished: {} added in {} attempts ({:?})",
            added, attempts, reason
        );
        report(
            reporter,
            HarvestEvent::Finished {
                added,
                attempts,
                reason,
            },
        );
        Ok(HarvestSummary {
            attempts,
            added,
            reason,
        })
    }
}

/// The stored row as it was written, for when it cannot be read back.
fn added_term(id: i64, record: &SlangRecord) -> Term {
    let fields = TermFields::from(record);
    Term {
        id,
        term: fields.term.trim().to_string(),
        definition: fields.definition,
        example: fields.example,
        category: Some(fields.category.unwrap_or_else(|| DEFAULT_CATEGORY.to_string())),
        source: Some(fields.source.unwrap_or_else(|| DEFAULT_SOURCE.to_string())),
        polish: fields.polish,
        pronunciation: fields.pronunciation,
        date_added: record.search_date.naive_utc(),
    }
}
