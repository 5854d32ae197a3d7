//! Messages the harvest loop sends to whoever is displaying progress.

use crate::models::Term;
use tokio::sync::mpsc::UnboundedSender;

/// Why a harvest run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Too many attempts in a row added nothing.
    ConsecutiveFailures,
    /// The stop flag was raised.
    Cancelled,
}

/// A snapshot of harvest progress.
#[derive(Debug, Clone, PartialEq)]
pub enum HarvestEvent {
    Started { known_terms: usize },
    Added { term: Term, total_added: usize },
    /// The term is already stored.
    Duplicate { term: String, consecutive_failures: u32 },
    /// The insert failed for a reason other than a duplicate name.
    Failed { term: String, reason: String, consecutive_failures: u32 },
    Finished { added: usize, attempts: usize, reason: StopReason },
}

/// Sending half of the progress channel. Sends never block; a dropped
/// receiver just means nobody is watching.
pub type HarvestReporter = UnboundedSender<HarvestEvent>;

pub(crate) fn report(reporter: Option<&HarvestReporter>, event: HarvestEvent) {
    if let Some(tx) = reporter {
        let _ = tx.send(event);
    }
}
