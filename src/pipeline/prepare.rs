// src/pipeline/prepare.rs

//! Run preparation: query compilation and fetcher selection.

use std::path::Path;

use crate::error::{AppError, Result};
use crate::models::{Config, QueryFilter};
use crate::services::{BatchFetcher, BatchOptions, DirectorySource, PersonCache, compile};

/// Compile `filter`, rejecting filters that yield nothing to fetch.
pub fn prepare_queries(filter: &QueryFilter) -> Result<Vec<String>> {
    log::debug!("Trying to compile the input filter...");
    let queries = compile(filter)?;

    if queries.is_empty() {
        return Err(AppError::EmptyQuerySet);
    }

    log::info!(
        "Filter compiled successfully with {} results to fetch.",
        queries.len()
    );
    log::debug!("{queries:?}");
    Ok(queries)
}

/// Build the fetch engine: cache mode when `input` is given, network otherwise.
pub fn build_fetcher(config: &Config, input: Option<&Path>) -> Result<BatchFetcher> {
    match input {
        Some(path) => {
            log::debug!("Trying to load input file...");
            let cache = PersonCache::load(path)?;
            Ok(BatchFetcher::cached(cache))
        }
        None => {
            let source = DirectorySource::new(&config.fetcher)?;
            Ok(BatchFetcher::network(
                source,
                BatchOptions::from(&config.fetcher),
            ))
        }
    }
}
