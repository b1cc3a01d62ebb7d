//! Scene initialization for the viewer.

use bevy::prelude::*;

use crate::visualization::constants::NODE_RADIUS;
use crate::visualization::resources::{CameraOrbitRes, NodeMesh};

/// Spawn the camera and lights, and create the shared node mesh.
pub fn setup_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    orbit: Res<CameraOrbitRes>,
) {
    // Camera
    commands.spawn((
        Camera3d::default(),
        Transform::from_translation(orbit.0.position()).looking_at(orbit.0.target, Vec3::Y),
    ));

    // Main directional light (sun-like)
    commands.spawn((
        DirectionalLight {
            illuminance: 20000.0,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_xyz(10.0, 20.0, 10.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    // Secondary fill light from opposite side
    commands.spawn((
        DirectionalLight {
            illuminance: 8000.0,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_xyz(-8.0, 10.0, -8.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 300.0,
    });

    commands.insert_resource(NodeMesh(meshes.add(Sphere::new(NODE_RADIUS))));
}
