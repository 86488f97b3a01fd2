//! lolgg command-line client.
//!
//! Drives the library the way the site's pages do: search a player (and
//! remember the search), browse match history, look up tiers, manage the
//! search history and resolve page paths.
//!
//! ```text
//! lolgg search "Hide on bush" KR1
//! lolgg matches <puuid> --count 10 --queue 420
//! lolgg tiers <puuid> <puuid> ...
//! lolgg history list | lolgg history remove 0
//! lolgg route /summoner/Faker/KR1
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde_json::Value;

use lolgg_client::api::{ApiClient, MatchFilter, MatchQuery};
use lolgg_client::config::{load_config, ClientConfig};
use lolgg_client::history::{FileStorage, Outcome, SearchHistory};
use lolgg_client::observability::{logging, metrics};
use lolgg_client::routing::{Page, RouteMatch, Router};

#[derive(Parser)]
#[command(name = "lolgg")]
#[command(about = "Command-line client for the lolgg statistics backend", long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the configured API base URL
    #[arg(short, long)]
    url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up a player and remember the search
    Search { game_name: String, tag_line: String },
    /// Fetch match history for a player
    Matches {
        identifier: String,
        #[arg(long, default_value_t = 0)]
        start: u32,
        #[arg(long, default_value_t = 20)]
        count: u32,
        /// Queue id filter
        #[arg(long)]
        queue: Option<i32>,
        /// Match type filter
        #[arg(long = "type")]
        game_type: Option<String>,
        /// Extra filter as key=value (repeatable)
        #[arg(short, long = "filter", value_parser = parse_key_val)]
        filter: Vec<(String, String)>,
    },
    /// Fetch tiers for several players at once
    Tiers {
        #[arg(required = true)]
        identifiers: Vec<String>,
    },
    /// Inspect or edit the search history
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },
    /// Resolve a location path to a page
    Route { path: String },
}

#[derive(Subcommand)]
enum HistoryAction {
    /// Show remembered searches, most recent first
    List,
    /// Forget the search at an index
    Remove { index: usize },
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected key=value, got '{}'", s))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ClientConfig::default(),
    };
    if let Some(url) = cli.url {
        config.api.base_url = url;
    }

    logging::init_logging(&config.observability);

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => {
                if let Err(e) = metrics::init_metrics(addr) {
                    tracing::error!(error = %e, "Failed to start metrics endpoint");
                }
            }
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    tracing::debug!(
        base_url = %config.api.base_url,
        storage_path = %config.history.storage_path,
        "Configuration loaded"
    );

    let router = Router::default();

    match cli.command {
        Commands::Search { game_name, tag_line } => {
            let api = ApiClient::new(&config.api)?;
            let summoner = api.search_summoner(&game_name, &tag_line).await?;
            print_json(&summoner)?;

            let mut history = open_history(&config);
            report(history.save(&game_name, &tag_line));

            if let Some(path) = router.path_for(&Page::summoner(game_name, tag_line)) {
                eprintln!("page: {}", path);
            }
        }
        Commands::Matches {
            identifier,
            start,
            count,
            queue,
            game_type,
            filter,
        } => {
            let mut match_filter = MatchFilter::new();
            if let Some(queue) = queue {
                match_filter = match_filter.queue(queue);
            }
            if let Some(game_type) = game_type {
                match_filter = match_filter.game_type(&game_type);
            }
            for (k, v) in filter {
                match_filter.insert(k, v);
            }

            let api = ApiClient::new(&config.api)?;
            let query = MatchQuery::page(start, count).with_filter(match_filter);
            print_json(&api.get_matches_with(&identifier, &query).await?)?;
        }
        Commands::Tiers { identifiers } => {
            let api = ApiClient::new(&config.api)?;
            print_json(&api.get_tiers(&identifiers).await?)?;
        }
        Commands::History { action } => {
            let mut history = open_history(&config);
            match action {
                HistoryAction::List => {
                    for (i, entry) in history.entries().iter().enumerate() {
                        let page =
                            Page::summoner(entry.game_name.as_str(), entry.tag_line.as_str());
                        let path = router.path_for(&page).unwrap_or_default();
                        println!("{:>2}  {:<32} {}", i, entry, path);
                    }
                }
                HistoryAction::Remove { index } => match history.remove(index) {
                    Outcome::Ignored => eprintln!("no history entry at index {}", index),
                    outcome => report(outcome),
                },
            }
        }
        Commands::Route { path } => match router.resolve(&path) {
            RouteMatch::Matched(Page::Home) => println!("Home"),
            RouteMatch::Matched(Page::Summoner { game_name, tag_line }) => {
                println!("Summoner gameName={} tagLine={}", game_name, tag_line)
            }
            RouteMatch::NoMatch => {
                eprintln!("no route for {}", path);
                std::process::exit(2);
            }
        },
    }

    Ok(())
}

fn open_history(config: &ClientConfig) -> SearchHistory<FileStorage> {
    let storage = FileStorage::new(&config.history.storage_path);
    let mut history = SearchHistory::with_key(storage, config.history.key.as_str());
    report(history.load());
    history
}

/// History failures are soft; tell the user and carry on.
fn report(outcome: Outcome) {
    if let Outcome::Discarded(e) = outcome {
        eprintln!("warning: search history not updated: {}", e);
    }
}

fn print_json(value: &Value) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
