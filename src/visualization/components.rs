//! ECS components for graph visualization.

use bevy::prelude::*;

/// Marker component for graph node entities.
///
/// Attached to sphere meshes; `id` matches [`crate::models::Node::id`] so the
/// entity survives across snapshots that keep the node.
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct GraphNode {
    pub id: String,
}
