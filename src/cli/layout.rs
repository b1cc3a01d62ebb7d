//! Layout subcommand - snapshot JSON in, scene JSON out.

use std::path::PathBuf;

use clap::Parser;

use super::LayoutArgs;
use crate::models::GraphSnapshot;

/// Lay out a graph snapshot.
#[derive(Parser)]
pub struct LayoutCommand {
    /// Path to analyzer JSON (`{"nodes": [...], "edges": [...]}`).
    pub input: PathBuf,

    /// Write the scene here instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Pretty-print the scene JSON.
    #[arg(long)]
    pub pretty: bool,

    #[command(flatten)]
    pub layout: LayoutArgs,
}

impl LayoutCommand {
    /// Run the layout command.
    pub fn run(self) -> color_eyre::Result<()> {
        let (_, engine) = self.layout.engine()?;
        let snapshot = GraphSnapshot::load(&self.input)?;
        let scene = engine.compute(&snapshot);

        if scene.dropped_edges > 0 {
            tracing::warn!(
                "Ignored {} edge(s) referencing unknown nodes",
                scene.dropped_edges
            );
        }

        let json = if self.pretty {
            serde_json::to_string_pretty(&scene)?
        } else {
            serde_json::to_string(&scene)?
        };

        match &self.output {
            Some(path) => {
                std::fs::write(path, json)?;
                tracing::info!(
                    "Wrote {} nodes and {} edges to {}",
                    scene.nodes.len(),
                    scene.edges.len(),
                    path.display()
                );
            }
            None => println!("{json}"),
        }
        Ok(())
    }
}
