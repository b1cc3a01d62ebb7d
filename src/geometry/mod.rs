//! Spatial helpers shared by layout output and the renderer.
//!
//! - `curve` - Curved edge sampling
//! - `camera` - Camera framing and approach

mod camera;
mod curve;

pub use camera::{
    CameraApproach, CameraFramer, CameraOrbit, CameraPose, APPROACH_DURATION_SECS,
    DEFAULT_DISTANCE, DEFAULT_FOV_Y, DEFAULT_PITCH,
};
pub use curve::EdgeCurveGenerator;
