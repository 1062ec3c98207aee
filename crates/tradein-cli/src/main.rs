mod clean;
mod scrape;

use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use tradein_core::Brand;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "tradein")]
#[command(about = "Capture and clean trade-in quotes")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Walk every selection path and write the raw capture table
    Scrape {
        /// Purchase device model label on the landing page
        #[arg(long, env = "TRADEIN_PURCHASE_DEVICE_MODEL")]
        purchase_device_model: String,
        /// Specific model label inside the purchase line
        #[arg(long, env = "TRADEIN_SELECTED_MODEL")]
        selected_model: String,
        /// Scrape a single brand (samsung or apple); defaults to all
        #[arg(long)]
        brand: Option<Brand>,
        /// Also write the cleaned table next to the raw one
        #[arg(long)]
        clean: bool,
    },
    /// Pivot a raw capture table into one row per device
    Clean {
        /// Raw capture CSV to read
        #[arg(long)]
        input: PathBuf,
        /// Output path; defaults to `Clean_<input name>` beside the input
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Scrape {
            purchase_device_model,
            selected_model,
            brand,
            clean,
        }) => {
            let config =
                tradein_core::load_app_config_with_models(&purchase_device_model, &selected_model)?;
            init_tracing(&config.log_level)?;
            scrape::run_scrape(&config, brand, clean).await?;
        }
        Some(Commands::Clean { input, output }) => {
            let level = std::env::var("TRADEIN_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
            init_tracing(&level)?;
            clean::run_clean(&input, output.as_deref())?;
        }
        None => Cli::command().print_help()?,
    }

    Ok(())
}

/// `RUST_LOG` wins; otherwise the configured level is the filter.
fn init_tracing(default_level: &str) -> anyhow::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default_level))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
    Ok(())
}

#[cfg(test)]
mod tests;
