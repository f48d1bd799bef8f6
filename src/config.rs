use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use directories::ProjectDirs;

pub const DEFAULT_DATASET_FILE: &str = "data.json";

#[derive(Debug, Parser)]
#[command(name = "diagtree", version, about = "Guided troubleshooting over a support action table")]
pub struct Cli {
    /// Dataset to open (.json, .csv, .xlsx). Defaults to ./data.json, then
    /// data.json in the application data directory.
    pub dataset: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub dataset_path: PathBuf,
    pub webview_data_dir: PathBuf,
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("com", "hellhbbd", "diagtree")
        .ok_or_else(|| anyhow!("unable to resolve data directory"))
}

fn ensure_webview_data_dir(base_data_dir: &Path) -> Result<PathBuf> {
    let webview_data_dir = base_data_dir.join("webview2");
    std::fs::create_dir_all(&webview_data_dir).with_context(|| {
        format!(
            "failed to create webview dir: {}",
            webview_data_dir.display()
        )
    })?;
    Ok(webview_data_dir)
}

/// Explicit path first, then the working directory, then the data directory.
pub fn resolve_dataset_path(explicit: Option<PathBuf>, cwd: &Path, data_dir: &Path) -> PathBuf {
    if let Some(path) = explicit {
        return path;
    }
    let local = cwd.join(DEFAULT_DATASET_FILE);
    if local.is_file() {
        local
    } else {
        data_dir.join(DEFAULT_DATASET_FILE)
    }
}

impl AppConfig {
    pub fn resolve(cli: Cli) -> Result<Self> {
        let dirs = project_dirs()?;
        let cwd = std::env::current_dir().context("failed to read working directory")?;
        Ok(Self {
            dataset_path: resolve_dataset_path(cli.dataset, &cwd, dirs.data_local_dir()),
            webview_data_dir: ensure_webview_data_dir(dirs.data_local_dir())?,
        })
    }
}
