//! Pipeline entry points for lookup operations.
//!
//! - `prepare_queries` / `build_fetcher`: compile the filter, pick cache or network
//! - `run_find`: search the compiled rooms for a name
//! - `run_dump`: write everyone living in the compiled rooms

pub mod dump;
pub mod find;
pub mod prepare;

pub use dump::run_dump;
pub use find::run_find;
pub use prepare::{build_fetcher, prepare_queries};

use crate::services::FetchSummary;

/// Result of a find or dump run.
#[derive(Debug, Clone)]
pub struct LookupOutcome {
    /// Engine statistics
    pub summary: FetchSummary,
    /// People written to the output
    pub emitted: usize,
}

impl LookupOutcome {
    /// Log a closing summary line.
    pub fn log_summary(&self) {
        let s = &self.summary;
        log::info!(
            "Resolved {}/{} queries in {} batches, {} failed attempts, {} dropped, {} people written{}",
            s.succeeded,
            s.queries,
            s.batches,
            s.failed_attempts,
            s.dropped,
            self.emitted,
            if s.stopped { " (stopped early)" } else { "" }
        );
    }
}
