// src/pipeline/dump.rs

//! Dump-all mode.

use crate::error::{AppError, Result};
use crate::output::OutputSink;
use crate::services::{BatchFetcher, RunControl};

use super::LookupOutcome;

/// Write every person found in the compiled rooms.
pub async fn run_dump(
    fetcher: &BatchFetcher,
    queries: &[String],
    mut sink: OutputSink,
) -> Result<LookupOutcome> {
    log::info!("Dumping all the people matching the filter...");

    let mut write_error: Option<AppError> = None;
    let summary = fetcher
        .run(queries, |people| {
            log::debug!("Fetched {} people.", people.len());
            for person in people {
                if let Err(e) = sink.write(person) {
                    write_error = Some(e);
                    return RunControl::Stop;
                }
            }
            RunControl::Continue
        })
        .await;

    if let Some(e) = write_error {
        return Err(e);
    }

    let emitted = sink.written();
    sink.finish()?;
    log::info!("Finished fetching the queries.");

    Ok(LookupOutcome { summary, emitted })
}
