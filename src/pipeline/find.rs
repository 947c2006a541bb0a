// src/pipeline/find.rs

//! Find-by-name mode.

use crate::error::{AppError, Result};
use crate::output::OutputSink;
use crate::services::{BatchFetcher, NameMatcher, RunControl};

use super::LookupOutcome;

/// Search the compiled rooms for people matching `name`.
///
/// Without `multiple` the first match is written and the run stops; with it
/// every match is written and the run goes through all queries.
pub async fn run_find(
    fetcher: &BatchFetcher,
    queries: &[String],
    name: &str,
    multiple: bool,
    mut sink: OutputSink,
) -> Result<LookupOutcome> {
    let matcher = NameMatcher::new(name);
    log::info!("Trying to find a person named \"{}\"...", matcher.needle());

    let mut write_error: Option<AppError> = None;
    let summary = fetcher
        .run(queries, |people| {
            let found = matcher.select(people);
            log::debug!(
                "Fetched {} people, {} match the filter.",
                people.len(),
                found.len()
            );

            let Some(first) = found.first() else {
                return RunControl::Continue;
            };

            let emit = if multiple { &found[..] } else { std::slice::from_ref(first) };
            for person in emit {
                if let Err(e) = sink.write(person) {
                    write_error = Some(e);
                    return RunControl::Stop;
                }
            }

            if multiple {
                RunControl::Continue
            } else {
                RunControl::Stop
            }
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
