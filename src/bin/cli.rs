//! kolnet CLI
//!
//! Finds dormitory residents by name or dumps everyone matching a room filter.

use std::path::PathBuf;

use clap::{Args, Parser};
use kolnet::{
    error::Result,
    models::{Config, QueryFilter, taxonomy},
    output::{OutputFormat, OutputSink},
    pipeline,
};

const EXAMPLES: &str = "\
Examples:
    kolnet -f \"Smith\" -b B02 --floor 3            Single person from B02 on the 3rd floor named \"Smith\"
    kolnet -f \"someone\" -r 418                    Single person from room 418 named \"someone\"
    kolnet -f \"Tomas\" -m                          All the people named \"Tomas\" from all blocks and rooms
    kolnet --dump --block-type A                  Dump all the people from all A blocks
    kolnet --dump -o database.json                Dump all the people to database.json
    kolnet -i database.json -f name -o out.csv    Find \"name\" in database.json, write CSV";

fn block_help() -> String {
    format!("Block types:\n{}\n{EXAMPLES}", taxonomy::listing())
}

/// kolnet - Dormitory Directory Lookup
#[derive(Parser, Debug)]
#[command(
    name = "kolnet",
    version,
    about = "Find dormitory residents by room or name",
    after_long_help = block_help()
)]
struct Cli {
    /// Target file to output the results to
    #[arg(short, long, default_value = kolnet::output::STDOUT)]
    output: String,

    /// Dumped JSON data to use instead of fetching from the server
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Find a person by name, surname or login (case and diacritics insensitive)
    #[arg(short, long, conflicts_with = "dump", required_unless_present = "dump")]
    find: Option<String>,

    /// Allow multiple results instead of returning after the first match
    #[arg(short, long, requires = "find")]
    multiple: bool,

    /// Dump all the people matching the filter to the selected output
    #[arg(long)]
    dump: bool,

    /// Output format: text, csv or json (default: from -o extension)
    #[arg(long)]
    format: Option<String>,

    /// Number of rooms to fetch at once
    #[arg(long)]
    batch_size: Option<usize>,

    /// Delay in ms between fetching batches
    #[arg(long)]
    fetch_delay: Option<u64>,

    /// Path to configuration file
    #[arg(short, long, default_value = "kolnet.toml")]
    config: PathBuf,

    /// Show more information about the process (to stderr)
    #[arg(short, long)]
    verbose: bool,

    #[command(flatten)]
    filter: FilterArgs,
}

/// Room filter flags.
#[derive(Args, Debug)]
struct FilterArgs {
    /// Filter by block (e.g. A01)
    #[arg(short, long)]
    block: Option<String>,

    /// Filter by room (e.g. 218)
    #[arg(short, long)]
    room: Option<u32>,

    /// Filter by floor (ignored if --room is set)
    #[arg(long)]
    floor: Option<u32>,

    /// Filter by block type, A-D (ignored if --block is set)
    #[arg(long)]
    block_type: Option<String>,

    /// Filter by block number (ignored if --block is set)
    #[arg(long)]
    block_number: Option<u32>,
}

impl From<FilterArgs> for QueryFilter {
    fn from(args: FilterArgs) -> Self {
        Self {
            block: args.block,
            room: args.room,
            floor: args.floor,
            block_type: args.block_type,
            block_number: args.block_number,
        }
    }
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = Config::load_or_default(&cli.config);
    if let Some(batch_size) = cli.batch_size {
        config.fetcher.batch_size = batch_size;
    }
    if let Some(delay) = cli.fetch_delay {
        config.fetcher.fetch_delay_ms = delay;
    }
    config.validate()?;

    let explicit_format = cli.format.as_deref().or(config.output.format.as_deref());
    let format = OutputFormat::resolve(explicit_format, &cli.output)?;

    let queries = pipeline::prepare_queries(&QueryFilter::from(cli.filter))?;
    let fetcher = pipeline::build_fetcher(&config, cli.input.as_deref())?;
    let sink = OutputSink::open(&cli.output, format)?;

    let outcome = match cli.find {
        Some(name) => pipeline::run_find(&fetcher, &queries, &name, cli.multiple, sink).await?,
        None => pipeline::run_dump(&fetcher, &queries, sink).await?,
    };
    outcome.log_summary();

    Ok(())
}
