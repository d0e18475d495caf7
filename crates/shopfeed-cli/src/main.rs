use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod check;
mod logging;
mod sync;

#[derive(Debug, Parser)]
#[command(name = "shopfeed")]
#[command(about = "Syncs a Google Sheet of products into a JSON catalog")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch the sheet, normalize rows, and rewrite the catalog document
    Sync {
        /// Spreadsheet id (the long token in the sheet URL)
        #[arg(long, env = "SHOPFEED_SHEET_ID")]
        sheet_id: String,

        /// A1-notation range to read, e.g. `Sheet1` or `Sheet1!A1:P500`
        #[arg(long)]
        range: Option<String>,

        /// Service-account key file
        #[arg(long)]
        credentials: Option<PathBuf>,

        /// Catalog document to maintain
        #[arg(long)]
        output: Option<PathBuf>,

        /// Directory that receives timestamped copies of the previous catalog
        #[arg(long)]
        backup_dir: Option<PathBuf>,
    },
    /// Verify credentials and sheet access without writing anything
    Check {
        /// Spreadsheet id (the long token in the sheet URL)
        #[arg(long, env = "SHOPFEED_SHEET_ID")]
        sheet_id: String,

        /// A1-notation range to probe
        #[arg(long)]
        range: Option<String>,

        /// Service-account key file
        #[arg(long)]
        credentials: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env before clap parses, so env-backed args see it.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let mut config = shopfeed_core::load_app_config_from_env()?;
    let _guard = logging::init(&config)?;

    match cli.command {
        Commands::Sync {
            sheet_id,
            range,
            credentials,
            output,
            backup_dir,
        } => {
            if let Some(range) = range {
                config.sheet_range = range;
            }
            if let Some(credentials) = credentials {
                config.credentials_path = credentials;
            }
            if let Some(output) = output {
                config.output_path = output;
            }
            if let Some(backup_dir) = backup_dir {
                config.backup_dir = backup_dir;
            }
            sync::run_sync(&config, &sheet_id).await?;
        }
        Commands::Check {
            sheet_id,
            range,
            credentials,
        } => {
            if let Some(range) = range {
                config.sheet_range = range;
            }
            if let Some(credentials) = credentials {
                config.credentials_path = credentials;
            }
            check::run_check(&config, &sheet_id).await?;
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------


#[cfg(test)]
mod testutil;
