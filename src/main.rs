//! Task List Web Server
//!
//! A minimal task list web app: an HTML list with add, edit, complete, and
//! delete, persisted to a flat JSON file on disk.

use anyhow::Result;
use clap::Parser;
use std::fs::OpenOptions;
use std::sync::Arc;
use tasklist::cli::Cli;
use tasklist::config::Config;
use tasklist::store::TaskStore;
use tasklist::web;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on --log option
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    match cli.log.as_str() {
        "0" | "off" => {
            // No logging
        }
        "1" | "stdout" => {
            let subscriber = FmtSubscriber::builder()
                .with_max_level(level)
                .with_writer(std::io::stdout)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        "2" | "stderr" => {
            let subscriber = FmtSubscriber::builder()
                .with_max_level(level)
                .with_writer(std::io::stderr)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        filename => {
            // Log to file (append mode)
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(filename)?;
            let subscriber = FmtSubscriber::builder()
                .with_max_level(level)
                .with_writer(file)
                .with_ansi(false)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
    }

    // Load configuration and apply CLI overrides
    let mut config = Config::load(cli.config.as_deref().map(std::path::Path::new))?;
    if let Some(data) = &cli.data {
        config.server.data_path = data.into();
    }
    if let Some(static_dir) = &cli.static_dir {
        config.server.static_dir = static_dir.into();
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    // Ensure the data directory exists
    config.ensure_data_dir()?;

    info!("Starting tasklist v{}", env!("CARGO_PKG_VERSION"));
    info!("Data file: {:?}", config.server.data_path);
    info!("Static dir: {:?}", config.server.static_dir);

    let store = Arc::new(TaskStore::new(config.server.data_path.clone()));

    let handle = web::start_server(Arc::clone(&store), &config.server).await?;
    info!("Task list available at http://{}", handle.addr());

    tokio::signal::ctrl_c().await?;
    info!("Received ctrl-c, shutting down");
    handle.shutdown().await;

    Ok(())
}
