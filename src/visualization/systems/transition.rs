//! Snapshot intake and per-frame transition updates.

use bevy::core::FrameCount;
use bevy::prelude::*;

use crate::geometry::CameraApproach;
use crate::transition::TransitionPhase;
use crate::visualization::components::GraphNode;
use crate::visualization::resources::{
    CameraApproachRes, CameraOrbitRes, SceneLoaded, SceneRes, TransitionRes,
};

/// Hand each loaded scene to the transition controller and re-aim the camera.
///
/// The first scene snaps the camera into place; later ones ease toward the
/// new frame.
pub fn apply_scene_system(
    mut loaded: EventReader<SceneLoaded>,
    mut transition: ResMut<TransitionRes>,
    mut current: ResMut<SceneRes>,
    mut orbit: ResMut<CameraOrbitRes>,
    mut approach: ResMut<CameraApproachRes>,
) {
    for SceneLoaded(scene) in loaded.read() {
        if transition.0.phase() == TransitionPhase::Idle {
            orbit.0 = scene.camera;
            approach.0 = None;
        } else {
            approach.0 = Some(CameraApproach::new(orbit.0, scene.camera));
        }
        transition.0.push_snapshot(scene.nodes.clone());
        current.0 = scene.clone();
    }
}

/// Advance the transition one frame and move node entities to their drawn positions.
pub fn advance_transition_system(
    time: Res<Time>,
    frame: Res<FrameCount>,
    mut transition: ResMut<TransitionRes>,
    mut node_query: Query<(&GraphNode, &mut Transform)>,
) {
    transition.0.tick(u64::from(frame.0), time.delta_secs());
    if transition.0.phase() == TransitionPhase::Idle {
        return;
    }

    let rendered = transition.0.rendered_positions();
    for (graph_node, mut transform) in node_query.iter_mut() {
        if let Some(position) = rendered.get(&graph_node.id) {
            transform.translation = *position;
        }
    }
}
