//! Rendering constants for the viewer.

use bevy::prelude::*;

/// Background color.
pub const CLEAR_COLOR: Color = Color::srgb(0.1, 0.1, 0.12);

/// Node sphere radius before style scale is applied.
pub const NODE_RADIUS: f32 = 0.5;

/// Seconds between checks of the watched snapshot file.
pub const RELOAD_INTERVAL_SECS: f32 = 1.0;

/// Radians of orbit per pixel of mouse motion.
pub const ORBIT_SENSITIVITY: f32 = 0.01;
/// Distance change per scroll line.
pub const ZOOM_STEP: f32 = 1.0;
/// Closest the user can zoom.
pub const MIN_ORBIT_DISTANCE: f32 = 2.0;
/// Pitch limit, just short of straight up/down.
pub const MAX_PITCH: f32 = 1.5;
