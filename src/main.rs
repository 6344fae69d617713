//! Part number web search
//!
//! Looks up a part number (or any search term) through the Google Custom
//! Search JSON API and prints the response as one line of JSON. Failures are
//! printed as `{"error": "<message>"}`.

mod core;
mod models;

use crate::core::config::Config;
use crate::core::constants::DEFAULT_LOG_LEVEL;
use crate::core::invoker::SearchInvoker;
use crate::core::logging::init_logging;
use crate::models::search::{FailureCategory, SearchOutcome};
use tracing::{debug, error, warn};

/// Exit code for a missing query argument
const EXIT_USAGE: i32 = 2;

/// Parsed command line
#[derive(Debug, PartialEq, Eq)]
enum Command {
    Help,
    Search(String),
    Usage,
}

/// Interpret the arguments after the program name
///
/// Only the first argument matters; anything after it is ignored.
fn parse_args<I>(args: I) -> Command
where
    I: IntoIterator<Item = String>,
{
    match args.into_iter().next() {
        Some(arg) if arg == "--help" || arg == "-h" => Command::Help,
        Some(query) => Command::Search(query),
        None => Command::Usage,
    }
}

#[tokio::main]
async fn main() {
    let args = std::env::args_os()
        .skip(1)
        .map(|arg| arg.to_string_lossy().into_owned());

    let query = match parse_args(args) {
        Command::Help => {
            print_help();
            return;
        }
        Command::Usage => {
            eprintln!("Usage: part-search <query>");
            eprintln!("Try 'part-search --help' for more information.");
            std::process::exit(EXIT_USAGE);
        }
        Command::Search(query) => query,
    };

    // Load configuration
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            init_logging(DEFAULT_LOG_LEVEL);
            error!("Configuration error: {:#}", e);
            let outcome = SearchOutcome::failure(
                FailureCategory::Configuration,
                format!("Configuration error: {e:#}"),
            );
            println!("{}", outcome.to_json());
            return;
        }
    };

    init_logging(&config.log_level);

    if let Some(env_file) = &config.env_file {
        debug!("Loaded environment file {}", env_file.path.display());
        for skipped in &env_file.skipped {
            warn!(
                "Skipped malformed line in {}: {}",
                env_file.path.display(),
                skipped
            );
        }
    }
    debug!("Resolved credentials: {:?}", config.credentials);
    if !config.has_credentials() {
        warn!("Search credentials are incomplete; the search will fail");
    }

    let invoker = SearchInvoker::new(config);
    println!("{}", invoker.search_json(&query).await);
}

/// Print help message
fn print_help() {
    println!("part-search v{}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Usage: part-search <query>");
    println!();
    println!("Searches Google Custom Search for <query> and prints the JSON response.");
    println!("On failure prints {{\"error\": \"<message>\"}} instead.");
    println!();
    println!("Options:");
    println!("  -h, --help    Display this help message");
    println!();
    println!("Environment variables (also read from a .env file):");
    println!("  GOOGLE_API_KEY      - Custom Search API key (required)");
    println!("  GOOGLE_CSE_ID       - Custom Search Engine ID (required)");
    println!("  GOOGLE_CSE_BASE_URL - API host (default: https://www.googleapis.com)");
    println!("  REQUEST_TIMEOUT     - Request timeout in seconds (default: HTTP client default)");
    println!("  LOG_LEVEL           - Logging level on stderr (default: warn)");
    println!("  DOTENV_PATH         - Path of the .env file (default: ./.env or a parent)");
}
