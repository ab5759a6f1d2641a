use clap::{Parser, Subcommand};
use std::sync::Arc;
use tracing::info;

use sitesmith::config::Config;
use sitesmith::logging;
use sitesmith::seed;
use sitesmith::server;
use sitesmith::storage::{InMemoryStorage, Storage};

#[derive(Parser)]
#[command(name = "sitesmith")]
#[command(about = "Content management backend for the marketing website")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(long, default_value = "config.toml")]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Seed starter content before serving
        #[arg(long)]
        seed: bool,
    },
    /// Provision the admin user, settings, menu, and starter pages
    Seed,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    logging::init_logging();

    let cli = Cli::parse();
    let config = Config::load(&cli.config)?;
    let storage: Arc<dyn Storage> = Arc::new(InMemoryStorage::new());

    match cli.command {
        Commands::Serve { seed: run_seed } => {
            if run_seed {
                info!("Seeding before serve");
                seed::seed(storage.as_ref(), &config).await?;
            }
            server::start_server(storage, config).await?;
        }
        Commands::Seed => {
            seed::seed(storage.as_ref(), &config).await?;
            println!("✅ Seeded admin user, settings, menu, and starter pages");
        }
    }

    Ok(())
}
