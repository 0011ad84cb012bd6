use anyhow::Result;
use colored::Colorize;
use pen_router::{RouteManifest, RouteMetadata};
use std::path::Path;

use super::{load_config, scan};

pub fn execute(config: Option<&Path>, app_dir: Option<&Path>, json: bool) -> Result<()> {
    let (config, app_dir) = load_config(config, app_dir)?;
    let file_tree = scan(&app_dir)?;
    let manifest = pen_router::compile(&file_tree, &config.routing.matcher())?;

    if json {
        println!("{}", manifest.to_json()?);
        return Ok(());
    }

    if manifest.is_empty() {
        println!("{}", "⚠ No routes found".yellow());
        return Ok(());
    }

    print_routes(&manifest);
    Ok(())
}

fn print_routes(manifest: &RouteManifest) {
    println!("{}", format!("Routes ({})", manifest.len()).green().bold());
    println!();

    for route in manifest {
        println!("{}", route.url.cyan().bold());
        for line in route_details(route) {
            println!("{}", line);
        }
    }
}

/// Indented screen and layout lines shown under a URL
fn route_details(route: &RouteMetadata) -> Vec<String> {
    let mut lines = vec![format!("  screen  {}", route.screen)];
    lines.extend(
        route
            .layout_chain()
            .iter()
            .enumerate()
            .map(|(depth, layout)| format!("  layout{}{}", " ".repeat(2 + depth * 2), layout)),
    );
    lines
}
