//! Krino server entry point.
//!
//! Runs the function host by default; `krino-server ingest` runs the
//! ingestion job once and exits.

use clap::{Parser, Subcommand};
use krino::{AppState, Config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(
    name = "krino-server",
    author = "Dirmacs <build@dirmacs.com>",
    version,
    about = "Krino - query triage for product teams",
    long_about = "Classifies product-manager queries into Feature, Insight, or Competitive\n\
                  and answers them with category-scoped retrieval-augmented generation.\n\n\
                  Run without arguments to start the function host; use 'ingest' to load\n\
                  documents from object storage into the vector indexes."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the function host (default)
    Serve,
    /// Run the ingestion job once and exit
    Ingest,
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;
    let state = AppState::from_config(config);

    match cli.command {
        None | Some(Commands::Serve) => {
            let server = state.config.server.clone();
            krino::api::serve(&server, state).await?;
        }
        Some(Commands::Ingest) => {
            let report = state.ingest.run().await?;
            tracing::info!(
                indexed = report.indexed,
                skipped = report.skipped,
                "Ingestion finished"
            );
        }
    }

    Ok(())
}
