// src/services/fetcher.rs

//! Batch fetch engine.
//!
//! Drives compiled room queries through either a preloaded [`PersonCache`] or
//! a [`RecordSource`]. In network mode queries go out in fixed-size batches:
//! every query of a batch is in flight at once, the whole batch settles before
//! the next one is issued, and the engine sleeps between batches. Failed
//! queries are retried as extra batches once the primary list is exhausted.

use std::collections::HashMap;
use std::time::Duration;

use futures::future::join_all;

use crate::models::{FetcherConfig, Person};
use crate::services::{PersonCache, RecordSource};

/// What the consumer wants after seeing a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunControl {
    /// Keep fetching
    Continue,
    /// Issue nothing further; the in-flight batch still settles
    Stop,
}

impl RunControl {
    pub fn is_stop(self) -> bool {
        self == Self::Stop
    }
}

/// Where the engine resolves queries.
pub enum FetchMode {
    /// Synchronous lookups in a preloaded record set
    Cache(PersonCache),
    /// Requests to a record source
    Network(Box<dyn RecordSource>),
}

/// Batching knobs for network mode.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Queries per batch, also the concurrency bound
    pub batch_size: usize,
    /// Pause between batches
    pub fetch_delay: Duration,
    /// Total attempts per query
    pub max_attempts: u32,
}

impl From<&FetcherConfig> for BatchOptions {
    fn from(config: &FetcherConfig) -> Self {
        Self {
            batch_size: config.batch_size.max(1),
            fetch_delay: Duration::from_millis(config.fetch_delay_ms),
            max_attempts: config.max_attempts.max(1),
        }
    }
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self::from(&FetcherConfig::default())
    }
}

/// Failed attempt counts for one run, keyed by query.
#[derive(Debug)]
pub struct RetryState {
    attempts: HashMap<String, u32>,
    max_attempts: u32,
}

impl RetryState {
    pub fn new(max_attempts: u32) -> Self {
        Self {
            attempts: HashMap::new(),
            max_attempts,
        }
    }

    /// Record a failed attempt. Returns true if the query may be tried again.
    pub fn record_failure(&mut self, query: &str) -> bool {
        let count = self.attempts.entry(query.to_string()).or_insert(0);
        *count += 1;
        *count < self.max_attempts
    }

    /// Failed attempts recorded so far for `query`.
    pub fn failures(&self, query: &str) -> u32 {
        self.attempts.get(query).copied().unwrap_or(0)
    }
}

/// Summary of a fetch run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchSummary {
    /// Queries in the compiled list
    pub queries: usize,
    /// Batches issued (network mode)
    pub batches: usize,
    /// Lookups that returned a result
    pub succeeded: usize,
    /// Failed attempts, retried or not
    pub failed_attempts: usize,
    /// Queries re-submitted after a failure
    pub retried: usize,
    /// Queries given up on
    pub dropped: usize,
    /// Whether the consumer stopped the run
    pub stopped: bool,
}

/// Resolves query lists in cache or network mode.
pub struct BatchFetcher {
    mode: FetchMode,
    options: BatchOptions,
}

impl BatchFetcher {
    pub fn new(mode: FetchMode, options: BatchOptions) -> Self {
        Self { mode, options }
    }

    /// Engine answering from a preloaded record set.
    pub fn cached(cache: PersonCache) -> Self {
        Self::new(FetchMode::Cache(cache), BatchOptions::default())
    }

    /// Engine querying a record source.
    pub fn network(source: impl RecordSource + 'static, options: BatchOptions) -> Self {
        Self::new(FetchMode::Network(Box::new(source)), options)
    }

    pub fn is_cached(&self) -> bool {
        matches!(self.mode, FetchMode::Cache(_))
    }

    /// Resolve `queries` in order, handing each result to `on_batch`.
    ///
    /// Cache mode only reports non-empty matches; network mode reports every
    /// successful lookup, empty ones included.
    pub async fn run<F>(&self, queries: &[String], on_batch: F) -> FetchSummary
    where
        F: FnMut(&[Person]) -> RunControl,
    {
        match &self.mode {
            FetchMode::Cache(cache) => Self::run_cached(cache, queries, on_batch),
            FetchMode::Network(source) => {
                self.run_network(source.as_ref(), queries, on_batch).await
            }
        }
    }

    fn run_cached<F>(cache: &PersonCache, queries: &[String], mut on_batch: F) -> FetchSummary
    where
        F: FnMut(&[Person]) -> RunControl,
    {
        let mut summary = FetchSummary {
            queries: queries.len(),
            ..FetchSummary::default()
        };

        for query in queries {
            let people = cache.lookup(query);
            summary.succeeded += 1;

            if !people.is_empty() && on_batch(&people).is_stop() {
                summary.stopped = true;
                break;
            }
        }

        summary
    }

    async fn run_network<F>(
        &self,
        source: &dyn RecordSource,
        queries: &[String],
        mut on_batch: F,
    ) -> FetchSummary
    where
        F: FnMut(&[Person]) -> RunControl,
    {
        let batch_size = self.options.batch_size.max(1);
        let delay = self.options.fetch_delay;

        let mut retries = RetryState::new(self.options.max_attempts);
        let mut summary = FetchSummary {
            queries: queries.len(),
            ..FetchSummary::default()
        };
        let mut pending: Vec<String> = queries.to_vec();

        'rounds: while !pending.is_empty() {
            let mut retry_queue: Vec<String> = Vec::new();
            let batch_count = pending.len().div_ceil(batch_size);

            for (index, batch) in pending.chunks(batch_size).enumerate() {
                let results = join_all(batch.iter().map(|query| source.fetch(query))).await;
                summary.batches += 1;

                let mut failed = 0;
                for (query, result) in batch.iter().zip(results) {
                    match result {
                        Ok(people) => {
                            summary.succeeded += 1;
                            if on_batch(&people).is_stop() {
                                summary.stopped = true;
                                break;
                            }
                        }
                        Err(e) => {
                            failed += 1;
                            summary.failed_attempts += 1;
                            if retries.record_failure(query) {
                                log::debug!("Query {query} failed, will retry: {e}");
                                retry_queue.push(query.clone());
                            } else {
                                summary.dropped += 1;
                                log::warn!(
                                    "Giving up on {query} after {} attempts: {e}",
                                    retries.failures(query)
                                );
                            }
                        }
                    }
                }

                log::info!(
                    "Failed {} queries out of {}, retrying {} queries...",
                    failed,
                    batch.len(),
                    retry_queue.len()
                );

                if summary.stopped {
                    break 'rounds;
                }

                let is_final = index + 1 == batch_count && retry_queue.is_empty();
                if !is_final && !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
            }

            summary.retried += retry_queue.len();
            pending = retry_queue;
        }

        summary
    }
}
