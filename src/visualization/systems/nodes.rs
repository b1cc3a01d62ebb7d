//! Node entity lifecycle.

use std::collections::{HashMap, HashSet};

use bevy::prelude::*;

use crate::models::NodeStyle;
use crate::visualization::components::GraphNode;
use crate::visualization::resources::{NodeMesh, SceneRes, TransitionRes};

/// Material for a styled node.
pub fn node_material(style: &NodeStyle) -> StandardMaterial {
    StandardMaterial {
        base_color: style.color.with_alpha(style.opacity),
        emissive: style.emissive.to_linear(),
        metallic: 0.3,
        perceptual_roughness: 0.5,
        reflectance: 0.3,
        alpha_mode: if style.opacity < 1.0 {
            AlphaMode::Blend
        } else {
            AlphaMode::Opaque
        },
        ..default()
    }
}

/// Keep one entity per node of the current scene.
///
/// Entities whose node vanished are despawned, surviving ones are restyled
/// in place, and new nodes spawn at their drawn position.
pub fn sync_node_entities_system(
    mut commands: Commands,
    scene: Res<SceneRes>,
    transition: Res<TransitionRes>,
    mesh: Res<NodeMesh>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut node_query: Query<(
        Entity,
        &GraphNode,
        &mut Transform,
        &MeshMaterial3d<StandardMaterial>,
    )>,
) {
    if !scene.is_changed() {
        return;
    }

    let styles: HashMap<&str, &NodeStyle> = scene
        .0
        .nodes
        .iter()
        .map(|n| (n.node.id.as_str(), &n.style))
        .collect();
    let mut present = HashSet::new();

    for (entity, graph_node, mut transform, material) in node_query.iter_mut() {
        match styles.get(graph_node.id.as_str()) {
            Some(style) => {
                if let Some(existing) = materials.get_mut(&material.0) {
                    *existing = node_material(style);
                }
                transform.scale = Vec3::splat(style.scale);
                present.insert(graph_node.id.clone());
            }
            None => commands.entity(entity).despawn_recursive(),
        }
    }

    let rendered = transition.0.rendered_positions();
    for positioned in scene.0.nodes.iter().filter(|n| !present.contains(&n.node.id)) {
        let position = rendered
            .get(&positioned.node.id)
            .copied()
            .unwrap_or(positioned.position);
        commands.spawn((
            Mesh3d(mesh.0.clone()),
            MeshMaterial3d(materials.add(node_material(&positioned.style))),
            Transform::from_translation(position).with_scale(Vec3::splat(positioned.style.scale)),
            GraphNode {
                id: positioned.node.id.clone(),
            },
        ));
    }
}
