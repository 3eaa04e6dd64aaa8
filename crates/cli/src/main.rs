//! spotlight command-line driver.
//!
//! Thin front over the cache-and-sync session: answers queries cache-first,
//! probes the cache, syncs against the remote service, and reports cache
//! stats. Logging goes to stderr so stdout stays parseable JSON.

use clap::Parser;
use spotlight_client::{AnswerClient, AnswerConfig, AnswerService, MockAnswerService, Session};
use spotlight_core::{AppConfig, CacheDb};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "spotlight")]
#[command(version, about = "Query cache and sync layer for the spotlight answer service", long_about = None)]
struct Cli {
    /// Use the request-intercepting mock backend instead of the remote service
    #[arg(long, global = true)]
    mock: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Answer a query, cache-first
    Query {
        /// Query text (sanitized before use)
        text: String,
    },
    /// Probe the local cache without touching the network
    Lookup {
        /// Query text (sanitized before use)
        text: String,
    },
    /// Clear the local cache and notify the remote service
    Sync,
    /// Show how many answers are cached locally
    Stats,
    /// Check the remote service health endpoint
    Health,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "spotlight=info".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = AppConfig::load()?;

    let cache = CacheDb::open(&config.db_path).await?;
    let remote: Arc<dyn AnswerService> = if cli.mock {
        tracing::info!("using mock answer backend");
        Arc::new(MockAnswerService::new())
    } else {
        Arc::new(AnswerClient::new(AnswerConfig::from_app_config(&config))?)
    };
    let session = Session::new(cache.clone(), remote.clone());

    match cli.command {
        Commands::Query { text } => {
            let answer = session.send(&text).await?;
            println!("{}", serde_json::to_string_pretty(&answer)?);
        }
        Commands::Lookup { text } => match session.lookup(&text).await? {
            Some(answer) => println!("{}", serde_json::to_string_pretty(&answer)?),
            None => println!("not cached"),
        },
        Commands::Sync => {
            session.sync().await?;
            println!("synced");
        }
        Commands::Stats => {
            let count = cache.count_answers().await?;
            println!("{count} cached answers");
        }
        Commands::Health => {
            let health = remote.health().await?;
            println!("{}", serde_json::to_string_pretty(&health)?);
        }
    }

    Ok(())
}
