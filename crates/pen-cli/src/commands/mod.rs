pub mod build;
pub mod routes;
pub mod tree;

use anyhow::{Context, Result};
use pen_router::{Config, FileNode};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Loads `pen.toml` (or the given file) and applies the `--app-dir` override
fn load_config(config: Option<&Path>, app_dir: Option<&Path>) -> Result<(Config, PathBuf)> {
    let config = match config {
        Some(path) => Config::load(path)?,
        None => Config::load_default()?,
    };

    let app_dir = app_dir
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(&config.routing.app_dir));
    debug!(app_dir = %app_dir.display(), "Resolved app directory");

    Ok((config, app_dir))
}

fn scan(app_dir: &Path) -> Result<FileNode> {
    pen_router::scan_directory(app_dir)
        .with_context(|| format!("Failed to scan app directory: {:?}", app_dir))
}
