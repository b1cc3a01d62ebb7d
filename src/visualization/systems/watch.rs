//! Reloading the snapshot file.

use bevy::prelude::*;

use crate::visualization::resources::SceneLoaded;
use crate::visualization::source::SnapshotSource;

/// Re-layout the watched file when it changes.
pub fn reload_snapshot_system(
    time: Res<Time>,
    source: Option<ResMut<SnapshotSource>>,
    mut loaded: EventWriter<SceneLoaded>,
) {
    let Some(mut source) = source else {
        return;
    };
    if !source.timer.tick(time.delta()).just_finished() {
        return;
    }

    match source.poll() {
        Ok(Some(scene)) => {
            loaded.send(SceneLoaded(scene));
        }
        Ok(None) => {}
        Err(e) => tracing::warn!(path = %source.path().display(), "Failed to reload snapshot: {}", e),
    }
}
