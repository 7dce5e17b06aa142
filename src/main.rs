//! Auction History - WoW Classic market data scraper and query tool
//!
//! `update` merges the latest NexusHub scan into the local database,
//! `query` prints (and optionally exports) an item's price history.

use auction_history::config::{DEFAULT_API_URL, DEFAULT_MIN_INTERVAL_MS, DEFAULT_SERVER};
use auction_history::formatters::format_item_details;
use auction_history::query::format_candidates;
use auction_history::{
    default_db_path, export_history, format_history, history_rows, refresh, resolve, Candidate,
    ClientConfig, ExportFormat, NexusHubClient, Outcome, Result, Store,
};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Local database of WoW Classic auction house market data
#[derive(Parser, Debug)]
#[command(name = "auction_history")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the JSON database file
    #[arg(short, long, global = true, default_value_t = default_db_path())]
    database: String,

    /// NexusHub API root
    #[arg(long, global = true, default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Realm and faction slug, e.g. earthfury-horde
    #[arg(long, global = true, default_value = DEFAULT_SERVER)]
    server: String,

    /// Minimum delay between API calls in milliseconds
    #[arg(long, global = true, default_value_t = DEFAULT_MIN_INTERVAL_MS)]
    min_interval_ms: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Merge the latest market scan into the database
    Update {
        /// Update the db by each individual item. Much slower, but picks up
        /// every scan NexusHub still has for each item.
        #[arg(short, long, default_value_t = false)]
        exhaustive: bool,
    },
    /// Show an item's price history
    Query {
        /// Name of the item to search for
        item_name: String,

        /// Also write the price history to this file
        #[arg(short, long)]
        outfile: Option<PathBuf>,

        /// Format of the output file
        #[arg(short = 't', long, value_enum, default_value_t = ExportFormat::Csv)]
        output_type: ExportFormat,
    },
}

fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let db_path = PathBuf::from(&args.database);
    let config = ClientConfig {
        base_url: args.api_url.clone(),
        server: args.server.clone(),
        min_interval: Duration::from_millis(args.min_interval_ms),
        ..ClientConfig::default()
    };

    let result = match args.command {
        Command::Update { exhaustive } => run_update(&db_path, config, exhaustive),
        Command::Query {
            item_name,
            outfile,
            output_type,
        } => run_query(&db_path, &item_name, outfile.as_deref(), output_type),
    };

    match result {
        Ok(()) => {}
        Err(e) if e.is_user_facing() => println!("{}", e),
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    }
}

/// Refresh the database and write it back if anything changed
fn run_update(db_path: &Path, config: ClientConfig, exhaustive: bool) -> Result<()> {
    log::info!("Database path: {}", db_path.display());
    log::info!("Tracking {} via {}", config.server, config.base_url);

    let mut store = Store::load(db_path)?;
    let mut client = NexusHubClient::new(config)?;

    let report = refresh(&mut store, &mut client, exhaustive)?;
    if report.outcome == Outcome::UpToDate {
        log::info!("Nothing to update!");
        return Ok(());
    }

    store.save(db_path)?;
    log::info!(
        "All done! {} new price points ({} from latest scan, {} from history), {} new items",
        report.inserted(),
        report.bulk.inserted,
        report.history.inserted,
        report.items_fetched
    );
    Ok(())
}

/// Resolve an item, print its details and history, optionally export
fn run_query(
    db_path: &Path,
    item_name: &str,
    outfile: Option<&Path>,
    output_type: ExportFormat,
) -> Result<()> {
    let store = Store::load(db_path)?;
    let item_id = resolve(&store, item_name, prompt_selection)?;

    println!("Item Details\n================================");
    if let Some(item) = store.item(item_id) {
        println!("{}", format_item_details(item)?);
    }

    println!("\n\nPrice History\n================================");
    let mut rows = store.history(item_id).map(history_rows).unwrap_or_default();
    print!("{}", format_history(&rows));

    if let Some(path) = outfile {
        export_history(&mut rows, output_type, path)?;
        println!("Saved price history to {}", path.display());
    }
    Ok(())
}

/// Ask which of several matching items the user meant
fn prompt_selection(candidates: &[Candidate<'_>]) -> Result<i64> {
    print!("{}", format_candidates(candidates));
    println!("Which item are you searching for (the #)?");
    std::io::stdout().flush()?;

    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    // Anything that is not a number is out of range
    Ok(line.trim().parse().unwrap_or(0))
}
