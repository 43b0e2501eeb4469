mod snapshot;
mod sync;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "eatlist")]
#[command(about = "Build the restaurant snapshot from the published sheet and Google Places")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch the sheet, enrich every place and write the snapshot (default)
    Sync {
        /// Published CSV URL (overrides `EATLIST_SHEET_CSV_URL`)
        #[arg(long)]
        csv_url: Option<String>,

        /// Snapshot destination (overrides `EATLIST_OUTPUT_PATH`)
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Print the snapshot to stdout instead of writing the file
        #[arg(long, conflicts_with = "output")]
        stdout: bool,
    },
    /// Fetch and validate the sheet without calling the Places API
    Check {
        /// Published CSV URL (overrides `EATLIST_SHEET_CSV_URL`)
        #[arg(long)]
        csv_url: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Also loads `.env`, so it must run before the log filter reads RUST_LOG.
    let config = eatlist_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    // stderr keeps `sync --stdout` output machine-readable.
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Some(Commands::Sync {
            csv_url,
            output,
            stdout,
        }) => {
            let args = sync::SyncArgs {
                csv_url,
                output,
                stdout,
            };
            sync::run_sync(&config, args).await
        }
        Some(Commands::Check { csv_url }) => sync::run_check(&config, csv_url.as_deref()).await,
        None => sync::run_sync(&config, sync::SyncArgs::default()).await,
    }
}

#[cfg(test)]
mod tests;
