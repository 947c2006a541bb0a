//! Service layer for the directory lookup.
//!
//! This module contains the business logic for:
//! - Filter compilation (`compile`)
//! - Record retrieval (`RecordSource`, `DirectorySource`, `PersonCache`)
//! - Batched fetching with retry and pacing (`BatchFetcher`)
//! - Name matching (`NameMatcher`)

pub mod compiler;
mod cache;
mod fetcher;
mod matcher;
mod source;

pub use cache::PersonCache;
pub use compiler::compile;
pub use fetcher::{BatchFetcher, BatchOptions, FetchMode, FetchSummary, RetryState, RunControl};
pub use matcher::{NameMatcher, normalize_name};
pub use source::{DirectorySource, RecordSource, parse_people};
