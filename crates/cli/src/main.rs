use std::path::PathBuf;

use anyhow::Context;
use catalog_app::{seed, Application};
use catalog_kernel::settings::Settings;
use clap::{Parser, Subcommand};

/// Local library catalog
#[derive(Debug, Parser)]
#[command(name = "catalog-cli", version, about)]
struct Cli {
    /// Directory holding `base.toml` and the per-environment overlays
    #[arg(long, global = true, env = "CATALOG_CONFIG_DIR")]
    config_dir: Option<PathBuf>,

    /// Environment overlay to load (local, staging, production)
    #[arg(long = "env", global = true, env = "CATALOG_ENV", default_value = "local")]
    environment: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Migrate the database and serve the catalog over HTTP
    Serve {
        /// Override the configured listen port
        #[arg(long)]
        port: Option<u16>,
    },
    /// Apply pending migrations and exit
    Migrate,
    /// Migrate, then add sample genres, authors and books
    Seed,
}

impl Cli {
    fn settings(&self) -> anyhow::Result<Settings> {
        let config_dir = self
            .config_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("config"));
        Settings::load_from(&config_dir, &self.environment)
            .context("failed to load catalog settings")
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // a missing `.env` is fine
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    let mut settings = cli.settings()?;
    catalog_telemetry::init(&settings.telemetry)?;

    tracing::info!(env = ?settings.environment, command = ?cli.command, "catalog-cli starting");

    match cli.command {
        Command::Serve { port } => {
            if let Some(port) = port {
                settings.server.port = port;
            }
            Application::build(settings).await?.serve().await
        }
        Command::Migrate => {
            let app = Application::build(settings).await?;
            let applied = app.migrate().await?;
            println!("applied {applied} migration(s)");
            Ok(())
        }
        Command::Seed => {
            let app = Application::build(settings).await?;
            app.migrate().await?;
            let report = seed::seed(app.catalog())
                .await
                .context("failed to seed the catalog")?;
            println!(
                "added {} genre(s), {} author(s), {} book(s)",
                report.genres, report.authors, report.books
            );
            Ok(())
        }
    }
}
