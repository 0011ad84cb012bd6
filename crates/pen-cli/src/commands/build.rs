use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;
use std::time::Instant;

use super::{load_config, scan};

pub fn execute(config: Option<&Path>, app_dir: Option<&Path>, out_dir: Option<&Path>) -> Result<()> {
    let started = Instant::now();
    let (config, app_dir) = load_config(config, app_dir)?;

    println!("{}", "Building routes...".green().bold());
    println!();
    println!("App: {}", app_dir.display().to_string().cyan());

    let file_tree = scan(&app_dir)?;
    println!("  {} Scanned app directory", "✓".green());

    let manifest = pen_router::compile(&file_tree, &config.routing.matcher())?;
    println!("  {} Compiled {} route(s)", "✓".green(), manifest.len());

    let manifest_path = match out_dir {
        Some(dir) => dir.join(&config.build.manifest_file),
        None => config.build.manifest_path(),
    };
    manifest
        .write_to(&manifest_path)
        .with_context(|| format!("Failed to write manifest: {:?}", manifest_path))?;
    println!("  {} Wrote {}", "✓".green(), manifest_path.display());

    if manifest.is_empty() {
        println!();
        println!("{}", "⚠ No screen files found".yellow());
    }

    println!();
    println!(
        "{} in {:.2?}",
        "Build finished".green().bold(),
        started.elapsed()
    );

    Ok(())
}
