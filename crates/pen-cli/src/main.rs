mod commands;

use clap::{ArgAction, Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;

#[derive(Parser)]
#[command(name = "pen")]
#[command(version, about = "Pen CLI - compile an app directory into a route manifest", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile the app directory and write the route manifest
    Build {
        /// Config file (default: ./pen.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// App directory, overrides routing.app_dir
        #[arg(long)]
        app_dir: Option<PathBuf>,

        /// Output directory, overrides build.out_dir
        #[arg(short, long)]
        out_dir: Option<PathBuf>,
    },

    /// List every addressable URL with its screen and layouts
    Routes {
        /// Config file (default: ./pen.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// App directory, overrides routing.app_dir
        #[arg(long)]
        app_dir: Option<PathBuf>,

        /// Print the manifest as JSON instead
        #[arg(long)]
        json: bool,
    },

    /// Show the route tree, groups included
    Tree {
        /// Config file (default: ./pen.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// App directory, overrides routing.app_dir
        #[arg(long)]
        app_dir: Option<PathBuf>,

        /// Print the tree as JSON instead
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    // Execute command
    let result = match cli.command {
        Commands::Build { config, app_dir, out_dir } => {
            commands::build::execute(config.as_deref(), app_dir.as_deref(), out_dir.as_deref())
        }
        Commands::Routes { config, app_dir, json } => {
            commands::routes::execute(config.as_deref(), app_dir.as_deref(), json)
        }
        Commands::Tree { config, app_dir, json } => {
            commands::tree::execute(config.as_deref(), app_dir.as_deref(), json)
        }
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };

    // Logs go to stderr so `--json` output stays clean
    tracing_subscriber::fmt()
        .with_max_level(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
