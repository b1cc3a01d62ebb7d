//! Stats subcommand.

use std::path::PathBuf;

use clap::Parser;

use crate::models::{GraphSnapshot, GraphStatistics};

/// Summarise a graph snapshot.
#[derive(Parser)]
pub struct StatsCommand {
    /// Path to analyzer JSON.
    pub input: PathBuf,
}

impl StatsCommand {
    pub fn run(self) -> color_eyre::Result<()> {
        let snapshot = GraphSnapshot::load(&self.input)?;
        let stats = GraphStatistics::from_snapshot(&snapshot);
        println!("{}", serde_json::to_string_pretty(&stats)?);
        Ok(())
    }
}
