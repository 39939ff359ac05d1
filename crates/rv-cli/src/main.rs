//! CLI frontend for RagVenture, a natural-language text adventure.

mod commands;
mod config;
mod logging;
mod presenter;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::GameConfig;

#[derive(Parser)]
#[command(
    name = "rv",
    about = "RagVenture: explore a world by typing plain English",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a session (the bundled world unless one is given)
    Play {
        /// World JSON file [env: RAGVENTURE_WORLD]
        #[arg(short, long)]
        world: Option<PathBuf>,

        /// Line-based output instead of the full-screen UI
        #[arg(long)]
        plain: bool,

        /// Write logs to this file [env: RAGVENTURE_LOG_FILE]
        #[arg(long)]
        log_file: Option<PathBuf>,
    },

    /// Write the bundled starter world to a JSON file
    Init {
        /// Path of the world file to create
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Load and validate a world file
    Check {
        /// Path of the world file
        path: PathBuf,
    },
}

fn main() -> miette::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match cli.command {
        Commands::Play {
            world,
            plain,
            log_file,
        } => {
            let config = GameConfig::from_env()
                .with_world(world)
                .with_log_file(log_file);
            commands::play::run(&config, plain)
        }
        Commands::Init { path, force } => commands::init::run(&path, force),
        Commands::Check { path } => commands::check::run(&path),
    }
}
