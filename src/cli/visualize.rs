//! Visualize subcommand - render a snapshot in 3D.

use std::path::PathBuf;

use bevy::app::AppExit;
use clap::Parser;
use color_eyre::eyre::eyre;

use super::LayoutArgs;
use crate::visualization::{run_visualizer, SnapshotSource};

/// Visualize a graph snapshot in 3D.
#[derive(Parser)]
pub struct VisualizeCommand {
    /// Path to analyzer JSON.
    pub input: PathBuf,

    /// Reload and animate to the new layout whenever the file changes.
    #[arg(short, long)]
    pub watch: bool,

    #[command(flatten)]
    pub layout: LayoutArgs,
}

impl VisualizeCommand {
    /// Run the visualize command.
    pub fn run(self) -> color_eyre::Result<()> {
        let (config, engine) = self.layout.engine()?;
        let mut source = SnapshotSource::new(&self.input, engine);
        let initial = source
            .poll()?
            .ok_or_else(|| eyre!("Could not read {}", self.input.display()))?;

        let source = self.watch.then_some(source);
        match run_visualizer(initial, source, config.transition) {
            AppExit::Success => Ok(()),
            AppExit::Error(code) => Err(eyre!("Viewer exited with code {}", code)),
        }
    }
}
