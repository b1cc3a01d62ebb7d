//! Camera approach and orbit controls.

use bevy::core::FrameCount;
use bevy::input::mouse::{MouseMotion, MouseWheel};
use bevy::prelude::*;

use crate::geometry::CameraApproach;
use crate::visualization::constants::{
    MAX_PITCH, MIN_ORBIT_DISTANCE, ORBIT_SENSITIVITY, ZOOM_STEP,
};
use crate::visualization::resources::{CameraApproachRes, CameraOrbitRes, SceneRes};

/// Ease the orbit toward its framed destination and place the camera.
pub fn camera_approach_system(
    time: Res<Time>,
    frame: Res<FrameCount>,
    mut approach: ResMut<CameraApproachRes>,
    mut orbit: ResMut<CameraOrbitRes>,
    mut camera_query: Query<&mut Transform, With<Camera3d>>,
) {
    if let Some(active) = approach.0.as_mut() {
        orbit.0 = active.tick(u64::from(frame.0), time.delta_secs());
        if active.is_finished() {
            approach.0 = None;
        }
    }

    if let Ok(mut transform) = camera_query.get_single_mut() {
        *transform = Transform::from_translation(orbit.0.position()).looking_at(orbit.0.target, Vec3::Y);
    }
}

/// Camera orbit control system.
///
/// Controls:
/// - Right-click drag: Orbit around target
/// - Scroll wheel: Zoom
/// - R: Re-frame the current scene
///
/// Any manual input cancels a running approach.
pub fn camera_orbit_system(
    mut orbit: ResMut<CameraOrbitRes>,
    mut approach: ResMut<CameraApproachRes>,
    scene: Res<SceneRes>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    keyboard: Res<ButtonInput<KeyCode>>,
    mut mouse_motion: EventReader<MouseMotion>,
    mut scroll: EventReader<MouseWheel>,
) {
    let mut moved = false;

    if mouse_button.pressed(MouseButton::Right) {
        for ev in mouse_motion.read() {
            orbit.0.yaw -= ev.delta.x * ORBIT_SENSITIVITY;
            orbit.0.pitch = (orbit.0.pitch + ev.delta.y * ORBIT_SENSITIVITY).clamp(-MAX_PITCH, MAX_PITCH);
            moved = true;
        }
    } else {
        mouse_motion.clear();
    }

    // Let the user zoom out well past the framed distance, never closer than the floor
    let max_distance = (scene.0.camera.distance * 4.0).max(100.0);
    for ev in scroll.read() {
        orbit.0.distance = (orbit.0.distance - ev.y * ZOOM_STEP).clamp(MIN_ORBIT_DISTANCE, max_distance);
        moved = true;
    }

    if moved {
        approach.0 = None;
    }

    if keyboard.just_pressed(KeyCode::KeyR) {
        approach.0 = Some(CameraApproach::new(orbit.0, scene.0.camera));
    }
}
