mod app;
mod config;
mod domain;
mod infra;
mod ui;
mod usecase;


use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use crate::config::{AppConfig, Cli};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::resolve(Cli::parse()).context("failed to resolve configuration")?;
    info!(
        dataset = %config.dataset_path.display(),
        version = env!("CARGO_PKG_VERSION"),
        "starting diagtree"
    );

    dioxus::LaunchBuilder::desktop()
        .with_cfg(
            dioxus::desktop::Config::new()
                .with_window(dioxus::desktop::WindowBuilder::new().with_title("Diagnostic Tree"))
                .with_data_directory(config.webview_data_dir.clone()),
        )
        .with_context(config)
        .launch(app::App);

    Ok(())
}
