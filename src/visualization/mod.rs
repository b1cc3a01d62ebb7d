//! 3D viewer for computed scenes, using Bevy.
//!
//! ## Module Structure
//!
//! - `components` - ECS components for node entities
//! - `resources` - ECS resources for scene, transition and camera state
//! - `systems` - ECS systems (scene intake, transition, camera, edges, reload)
//! - `source` - Snapshot file polling
//! - `setup` - Camera, lights and shared meshes
//! - `plugin` - Bevy plugin definitions
//! - `constants` - Rendering constants

mod components;
mod constants;
mod plugin;
mod resources;
mod setup;
mod source;
mod systems;

pub use components::GraphNode;
pub use plugin::{TransitionPlugin, VisualizationPlugin};
pub use resources::{CameraApproachRes, CameraOrbitRes, SceneLoaded, SceneRes, TransitionRes};
pub use source::SnapshotSource;

use bevy::prelude::*;

use crate::config::TransitionConfig;
use crate::models::Scene;

use constants::CLEAR_COLOR;

/// Open a window showing `initial`, reloading from `source` when given.
///
/// Blocks until the window is closed.
pub fn run_visualizer(
    initial: Scene,
    source: Option<SnapshotSource>,
    transition: TransitionConfig,
) -> AppExit {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Code Weaver".to_string(),
                resolution: (1280.0, 720.0).into(),
                ..default()
            }),
            ..default()
        }))
        .insert_resource(ClearColor(CLEAR_COLOR))
        .add_plugins(VisualizationPlugin::new(initial, source, transition))
        .run()
}
