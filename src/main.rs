//! Puzzle Checker - validate puzzle share links from the command line
//!
//! Usage: puzzle_checker [--db-path PATH | --catalogue PATH] LINK...
//!
//! Prints one JSON outcome per link. Exits 0 when every link is valid,
//! 2 otherwise.

use puzzle_checker::config::AppConfig;
use puzzle_checker::db;
use puzzle_checker::{
    HttpShareInfoClient, InMemoryStore, LinkValidator, PieceCatalogue, PuzzleStore, SqliteStore,
    TokenLookup,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

struct Args {
    db_path: Option<PathBuf>,
    catalogue: Option<PathBuf>,
    links: Vec<String>,
}

fn print_usage() {
    println!("Usage: puzzle_checker [--db-path PATH | --catalogue PATH] LINK...");
    println!("  --db-path PATH    SQLite catalogue (default: database.path from config)");
    println!("  --catalogue PATH  JSON catalogue {{\"puzzles\": [...], \"pieces\": [...]}}");
}

fn parse_args() -> Args {
    let args: Vec<String> = std::env::args().collect();
    let mut parsed = Args {
        db_path: None,
        catalogue: None,
        links: Vec::new(),
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db-path" | "--catalogue" => {
                if i + 1 >= args.len() {
                    eprintln!("ERROR: {} requires a value", args[i]);
                    std::process::exit(1);
                }
                let value = PathBuf::from(&args[i + 1]);
                if args[i] == "--db-path" {
                    parsed.db_path = Some(value);
                } else {
                    parsed.catalogue = Some(value);
                }
                i += 2;
            }
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            flag if flag.starts_with("--") => {
                eprintln!("Unknown argument: {}", flag);
                std::process::exit(1);
            }
            link => {
                parsed.links.push(link.to_string());
                i += 1;
            }
        }
    }

    if parsed.links.is_empty() {
        print_usage();
        std::process::exit(1);
    }

    parsed
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let args = parse_args();
    let mut config = load_config()?;
    if let Some(path) = args.db_path {
        config.database.path = path;
    }

    let (puzzles, pieces): (Arc<dyn PuzzleStore>, Arc<dyn PieceCatalogue>) =
        match &args.catalogue {
            Some(path) => {
                let store = Arc::new(InMemoryStore::from_json_file(path)?);
                let puzzles: Arc<dyn PuzzleStore> = store.clone();
                let pieces: Arc<dyn PieceCatalogue> = store;
                (puzzles, pieces)
            }
            None => {
                let pool = db::init_pool(&config.database).await?;
                db::run_migrations(&pool).await?;
                let store = Arc::new(SqliteStore::new(pool));
                let puzzles: Arc<dyn PuzzleStore> = store.clone();
                let pieces: Arc<dyn PieceCatalogue> = store;
                (puzzles, pieces)
            }
        };

    let lookup = Arc::new(TokenLookup::new(puzzles, config.lookup.cache_capacity));
    let source = Arc::new(HttpShareInfoClient::from_config(&config.share_api));
    let validator = LinkValidator::new(source, pieces, lookup);

    let mut all_valid = true;
    for link in &args.links {
        let outcome = validator.validate(link).await;
        all_valid &= outcome.is_valid();
        println!("{}", serde_json::to_string(&outcome)?);
    }

    if !all_valid {
        std::process::exit(2);
    }

    Ok(())
}

/// Initialize tracing with JSON output
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "puzzle_checker=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
        .init();
}

/// Load and validate configuration
fn load_config() -> anyhow::Result<AppConfig> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let config = AppConfig::load().map_err(|e| {
        tracing::error!(error = %e, "Failed to load configuration");
        anyhow::anyhow!("Configuration error: {}", e)
    })?;

    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Configuration validation failed: {}", e))?;

    Ok(config)
}
