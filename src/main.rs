mod cli;
mod config;
mod error;
mod history;
mod models;
mod session;
mod uploader;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Args, SessionMode};
use config::UploaderConfig;
use std::io;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use uploader::UploadController;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let config = match args.base_url {
        Some(base_url) => UploaderConfig::new(base_url),
        None => UploaderConfig::from_env()?,
    }
    .with_min_loading(Duration::from_millis(args.min_loading_ms))
    .with_proxy(args.proxy);

    let mut controller =
        UploadController::new(config).context("Failed to create upload controller")?;

    let mut stdout = io::stdout();
    match args.mode {
        SessionMode::Batch => {
            session::run_batch(&mut controller, &args.files, true, &mut stdout).await?;
        }
        SessionMode::Interactive => {
            if let Some(path) = args.files.first() {
                controller.select_path(path)?;
            }
            let stdin = io::stdin();
            session::run_interactive(&mut controller, stdin.lock(), true, &mut stdout).await?;
        }
    }

    Ok(())
}
