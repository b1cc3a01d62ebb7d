//! ECS resources for viewer state.
//!
//! Resources are global singleton data - there's only one instance
//! of each resource in the entire app.

use bevy::prelude::*;

use crate::geometry::{CameraApproach, CameraOrbit};
use crate::models::Scene;
use crate::transition::LayoutTransitionController;

// =============================================================================
// Layout State
// =============================================================================

/// Animates node positions between layouts.
#[derive(Resource, Default)]
pub struct TransitionRes(pub LayoutTransitionController);

/// The most recently computed scene.
#[derive(Resource, Default)]
pub struct SceneRes(pub Scene);

/// A freshly computed scene to show.
#[derive(Event, Debug, Clone)]
pub struct SceneLoaded(pub Scene);

// =============================================================================
// Camera State
// =============================================================================

/// Live camera orbit, written to the camera transform every frame.
#[derive(Resource, Default)]
pub struct CameraOrbitRes(pub CameraOrbit);

/// In-flight ease toward a newly framed orbit, if any.
#[derive(Resource, Default)]
pub struct CameraApproachRes(pub Option<CameraApproach>);

// =============================================================================
// Assets
// =============================================================================

/// Shared unit sphere for node entities.
#[derive(Resource)]
pub struct NodeMesh(pub Handle<Mesh>);
