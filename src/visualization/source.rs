//! Snapshot file watched for changes.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use bevy::prelude::*;

use crate::engine::LayoutEngine;
use crate::error::Result;
use crate::models::{GraphSnapshot, Scene};

use super::constants::RELOAD_INTERVAL_SECS;

/// An analyzer output file plus the engine that lays it out.
///
/// Polled on a timer; a new scene is produced only when the file's
/// modification time changes.
#[derive(Resource)]
pub struct SnapshotSource {
    path: PathBuf,
    engine: LayoutEngine,
    modified: Option<SystemTime>,
    pub(crate) timer: Timer,
}

impl SnapshotSource {
    pub fn new(path: impl Into<PathBuf>, engine: LayoutEngine) -> Self {
        Self {
            path: path.into(),
            engine,
            modified: None,
            timer: Timer::from_seconds(RELOAD_INTERVAL_SECS, TimerMode::Repeating),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Lay out the file if it changed since the last successful poll.
    ///
    /// A file that fails to parse is retried on the next poll, which covers
    /// readers racing a writer that has not finished yet.
    pub fn poll(&mut self) -> Result<Option<Scene>> {
        let modified = std::fs::metadata(&self.path)?.modified()?;
        if self.modified == Some(modified) {
            return Ok(None);
        }

        let snapshot = GraphSnapshot::load(&self.path)?;
        let scene = self.engine.compute(&snapshot);
        self.modified = Some(modified);

        tracing::info!(
            path = %self.path.display(),
            nodes = scene.nodes.len(),
            edges = scene.edges.len(),
            "Loaded graph snapshot"
        );
        Ok(Some(scene))
    }
}
