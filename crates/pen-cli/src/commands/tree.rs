use anyhow::Result;
use colored::Colorize;
use pen_router::{RouteKind, RouteNode};
use std::path::Path;

use super::{load_config, scan};

pub fn execute(config: Option<&Path>, app_dir: Option<&Path>, json: bool) -> Result<()> {
    let (config, app_dir) = load_config(config, app_dir)?;
    let file_tree = scan(&app_dir)?;

    let Some(root) = pen_router::build_route_tree_with(&file_tree, &config.routing.matcher())? else {
        if json {
            println!("null");
        } else {
            println!("{}", "⚠ App directory is empty".yellow());
        }
        return Ok(());
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&root)?);
        return Ok(());
    }

    for (prefix, node) in tree_lines(&root) {
        let label = match node.kind {
            RouteKind::Group => node.segment.dimmed().to_string(),
            RouteKind::Page => format!("{} {}", node.segment, node.url.cyan()),
        };
        let mut markers = Vec::new();
        if node.layout.is_some() {
            markers.push("layout".magenta().to_string());
        }
        if node.screen.is_some() {
            markers.push("screen".green().to_string());
        }

        if markers.is_empty() {
            println!("{}{}", prefix, label);
        } else {
            println!("{}{} [{}]", prefix, label, markers.join(", "));
        }
    }

    Ok(())
}

/// Box-drawing prefix for every node, in preorder
fn tree_lines(root: &RouteNode) -> Vec<(String, &RouteNode)> {
    let mut lines = vec![(String::new(), root)];
    push_children(root, "", &mut lines);
    lines
}

fn push_children<'a>(node: &'a RouteNode, indent: &str, lines: &mut Vec<(String, &'a RouteNode)>) {
    let count = node.children.len();
    for (i, child) in node.children.iter().enumerate() {
        let last = i + 1 == count;
        let branch = if last { "└── " } else { "├── " };
        lines.push((format!("{}{}", indent, branch), child));

        let next_indent = format!("{}{}", indent, if last { "    " } else { "│   " });
        push_children(child, &next_indent, lines);
    }
}
