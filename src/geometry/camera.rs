//! Camera framing and animated approach.

use bevy::math::Vec3;
use serde::Serialize;

use crate::models::PositionedNode;
use crate::transition::{ease_out_cubic, FrameClock};

/// Default pitch above the horizon (radians).
pub const DEFAULT_PITCH: f32 = 0.3;
/// Orbit distance when there is nothing to frame.
pub const DEFAULT_DISTANCE: f32 = 25.0;
/// Default vertical field of view (radians), matching Bevy's perspective default.
pub const DEFAULT_FOV_Y: f32 = std::f32::consts::FRAC_PI_4;
/// Closest the framer ever puts the camera.
const MIN_FRAME_DISTANCE: f32 = 10.0;
/// Seconds a camera approach lasts.
pub const APPROACH_DURATION_SECS: f32 = 0.8;

/// Camera orbit state: a target plus spherical offset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(into = "CameraPose")]
pub struct CameraOrbit {
    /// Horizontal rotation angle (radians).
    pub yaw: f32,
    /// Vertical rotation angle (radians).
    pub pitch: f32,
    /// Distance from target.
    pub distance: f32,
    /// Point the camera orbits around.
    pub target: Vec3,
}

impl Default for CameraOrbit {
    fn default() -> Self {
        Self {
            yaw: 0.0,
            pitch: DEFAULT_PITCH,
            distance: DEFAULT_DISTANCE,
            target: Vec3::ZERO,
        }
    }
}

impl CameraOrbit {
    /// Camera position from orbit parameters.
    pub fn position(&self) -> Vec3 {
        let x = self.distance * self.pitch.cos() * self.yaw.sin();
        let y = self.distance * self.pitch.sin();
        let z = self.distance * self.pitch.cos() * self.yaw.cos();
        self.target + Vec3::new(x, y, z)
    }

    /// Whether `point` lies inside the view cone of half-angle `fov_y / 2`.
    pub fn sees(&self, point: Vec3, fov_y: f32) -> bool {
        let eye = self.position();
        let forward = (self.target - eye).normalize_or_zero();
        let to_point = point - eye;
        if to_point.length_squared() == 0.0 {
            return false;
        }
        forward.angle_between(to_point) <= fov_y / 2.0 + 1e-4
    }

    fn lerp(&self, other: &Self, t: f32) -> Self {
        Self {
            yaw: self.yaw + (other.yaw - self.yaw) * t,
            pitch: self.pitch + (other.pitch - self.pitch) * t,
            distance: self.distance + (other.distance - self.distance) * t,
            target: self.target.lerp(other.target, t),
        }
    }
}

/// Wire form of a camera: where it is and what it looks at.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CameraPose {
    pub position: Vec3,
    pub target: Vec3,
    pub distance: f32,
    pub yaw: f32,
    pub pitch: f32,
}

impl From<CameraOrbit> for CameraPose {
    fn from(orbit: CameraOrbit) -> Self {
        Self {
            position: orbit.position(),
            target: orbit.target,
            distance: orbit.distance,
            yaw: orbit.yaw,
            pitch: orbit.pitch,
        }
    }
}

/// Fits a camera around a set of positions.
///
/// The target is the centroid. Distance grows with the largest bounding-box
/// dimension and is never less than what keeps the bounding sphere around
/// the target inside the vertical field of view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraFramer {
    /// Vertical field of view (radians).
    pub fov_y: f32,
    /// Distance per unit of largest bounding-box dimension.
    pub frame_factor: f32,
    /// Extra distance added after fitting.
    pub margin: f32,
}

impl Default for CameraFramer {
    fn default() -> Self {
        Self {
            fov_y: DEFAULT_FOV_Y,
            frame_factor: 1.2,
            margin: 2.0,
        }
    }
}

impl CameraFramer {
    pub fn frame(&self, positions: &[Vec3]) -> CameraOrbit {
        if positions.is_empty() {
            return CameraOrbit::default();
        }

        let target = positions.iter().copied().sum::<Vec3>() / positions.len() as f32;
        let (min, max) = positions
            .iter()
            .fold((Vec3::splat(f32::INFINITY), Vec3::splat(f32::NEG_INFINITY)), |(lo, hi), p| {
                (lo.min(*p), hi.max(*p))
            });
        let largest = (max - min).max_element();
        let radius = positions
            .iter()
            .map(|p| p.distance(target))
            .fold(0.0_f32, f32::max);

        let fit = radius / (self.fov_y / 2.0).sin();
        let distance = ((largest * self.frame_factor).max(fit) + self.margin).max(MIN_FRAME_DISTANCE);

        CameraOrbit {
            yaw: 0.0,
            pitch: DEFAULT_PITCH,
            distance,
            target,
        }
    }

    pub fn frame_nodes(&self, nodes: &[PositionedNode]) -> CameraOrbit {
        let positions: Vec<Vec3> = nodes.iter().map(|n| n.position).collect();
        self.frame(&positions)
    }
}

/// Eases a live camera toward a newly framed orbit.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraApproach {
    from: CameraOrbit,
    to: CameraOrbit,
    clock: FrameClock,
}

impl CameraApproach {
    pub fn new(from: CameraOrbit, to: CameraOrbit) -> Self {
        Self {
            from,
            to,
            clock: FrameClock::new(APPROACH_DURATION_SECS),
        }
    }

    /// Advance by `delta_secs` unless `frame` was already applied.
    pub fn tick(&mut self, frame: u64, delta_secs: f32) -> CameraOrbit {
        self.clock.advance(frame, delta_secs);
        self.current()
    }

    pub fn current(&self) -> CameraOrbit {
        self.from.lerp(&self.to, ease_out_cubic(self.clock.progress()))
    }

    pub fn is_finished(&self) -> bool {
        self.clock.is_finished()
    }

    pub fn destination(&self) -> CameraOrbit {
        self.to
    }
}
