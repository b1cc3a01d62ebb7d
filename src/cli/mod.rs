//! CLI module for Code Weaver.
//!
//! Subcommands:
//! - `layout`: Lay out an analyzer snapshot and write scene JSON
//! - `stats`: Summarise an analyzer snapshot
//! - `visualize`: Show a snapshot in 3D, optionally reloading on change

mod layout;
mod stats;
mod visualize;

use clap::{Args, Parser, Subcommand};

use crate::config::Config;
use crate::engine::LayoutEngine;
use crate::layout::LayoutAlgorithm;

pub use layout::LayoutCommand;
pub use stats::StatsCommand;
pub use visualize::VisualizeCommand;

/// Code Weaver - code graph layout engine
#[derive(Parser)]
#[command(name = "codeweaver")]
#[command(about = "Lay out and visually encode code call graphs in 3D")]
#[command(version)]
pub struct App {
    /// Run in verbose mode
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Compute a scene from analyzer JSON
    Layout(LayoutCommand),

    /// Print snapshot statistics
    Stats(StatsCommand),

    /// Visualize a snapshot in 3D
    Visualize(VisualizeCommand),
}

impl App {
    /// Run the CLI application.
    pub fn run(self) -> color_eyre::Result<()> {
        match self.command {
            Command::Layout(cmd) => cmd.run(),
            Command::Stats(cmd) => cmd.run(),
            Command::Visualize(cmd) => cmd.run(),
        }
    }
}

/// Overrides applied on top of loaded configuration.
#[derive(Args, Debug, Default)]
pub struct LayoutArgs {
    /// Layout algorithm (sphere, force-directed, hierarchical, circular)
    #[arg(short, long)]
    pub algorithm: Option<String>,

    /// RNG seed for reproducible force layouts and edge curves
    #[arg(long)]
    pub seed: Option<u64>,
}

impl LayoutArgs {
    /// Load configuration, apply overrides and build the engine.
    pub fn engine(&self) -> color_eyre::Result<(Config, LayoutEngine)> {
        let mut config = Config::load()?;
        if let Some(name) = &self.algorithm {
            config.layout.algorithm = name.parse::<LayoutAlgorithm>()?;
        }
        if let Some(seed) = self.seed {
            config.layout.seed = Some(seed);
        }

        let engine = LayoutEngine::from_config(&config)?;
        tracing::debug!(
            algorithm = %engine.layout_config().algorithm(),
            seed = ?engine.layout_config().seed(),
            "Configured layout engine"
        );
        Ok((config, engine))
    }
}
