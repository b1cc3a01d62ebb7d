//! Bevy plugins for animated graph layouts.

use std::sync::Mutex;

use bevy::prelude::*;

use super::resources::{
    CameraApproachRes, CameraOrbitRes, SceneLoaded, SceneRes, TransitionRes,
};
use super::setup::setup_scene;
use super::source::SnapshotSource;
use super::systems;
use crate::config::TransitionConfig;
use crate::models::Scene;
use crate::transition::LayoutTransitionController;

/// Drives layout transitions and camera approach from the frame loop.
///
/// Needs only time and frame counting, so it runs under `MinimalPlugins`.
/// Send [`SceneLoaded`] events to feed it new layouts; entities carrying
/// [`super::GraphNode`] are moved to their drawn positions every frame.
#[derive(Default)]
pub struct TransitionPlugin {
    pub config: TransitionConfig,
}

impl Plugin for TransitionPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<SceneLoaded>()
            .insert_resource(TransitionRes(LayoutTransitionController::new(&self.config)))
            .init_resource::<SceneRes>()
            .init_resource::<CameraOrbitRes>()
            .init_resource::<CameraApproachRes>()
            .add_systems(
                Update,
                (
                    systems::apply_scene_system,
                    systems::advance_transition_system,
                    systems::camera_approach_system,
                )
                    .chain(),
            );
    }
}

/// Full viewer: meshes, lights, orbit controls and edge drawing on top of
/// [`TransitionPlugin`].
///
/// The `source` field uses `Mutex<Option<...>>` to allow moving
/// ownership into the resource during `build()` (which takes `&self`).
pub struct VisualizationPlugin {
    /// Scene shown on the first frame.
    pub initial: Scene,
    /// File to watch for new snapshots (taken during build).
    pub source: Mutex<Option<SnapshotSource>>,
    pub transition: TransitionConfig,
}

impl VisualizationPlugin {
    pub fn new(initial: Scene, source: Option<SnapshotSource>, transition: TransitionConfig) -> Self {
        Self {
            initial,
            source: Mutex::new(source),
            transition,
        }
    }
}

impl Plugin for VisualizationPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(TransitionPlugin {
            config: self.transition.clone(),
        });

        // Take ownership of the source (moves it out, leaves None)
        if let Some(source) = self.source.lock().ok().and_then(|mut slot| slot.take()) {
            app.insert_resource(source);
        }

        let initial = self.initial.clone();
        app.add_systems(
            Startup,
            (setup_scene, move |mut loaded: EventWriter<SceneLoaded>| {
                loaded.send(SceneLoaded(initial.clone()));
            }),
        )
        .add_systems(
            Update,
            (
                systems::reload_snapshot_system.before(systems::apply_scene_system),
                systems::camera_orbit_system.before(systems::camera_approach_system),
                systems::sync_node_entities_system.after(systems::apply_scene_system),
                systems::draw_edges_system.after(systems::advance_transition_system),
            ),
        );
    }
}
