//! Concentric ring layout.

use bevy::math::Vec3;
use rand::rngs::StdRng;

use super::{LayoutInput, LayoutStrategy};

/// Maximum nodes placed on one ring.
pub const MAX_NODES_PER_RING: usize = 12;
/// Radius of the innermost ring.
const INNER_RADIUS: f32 = 5.0;
/// Radius added per ring.
const RING_SPACING: f32 = 4.0;

/// Fills rings of at most [`MAX_NODES_PER_RING`] nodes from the inside out,
/// spacing each ring's nodes evenly by angle on the XZ plane.
#[derive(Debug, Clone, Copy, Default)]
pub struct CircularLayout;

impl CircularLayout {
    pub fn ring_radius(ring: usize) -> f32 {
        INNER_RADIUS + ring as f32 * RING_SPACING
    }
}

impl LayoutStrategy for CircularLayout {
    fn positions(&self, input: &LayoutInput<'_>, _rng: &mut StdRng) -> Vec<Vec3> {
        let n = input.nodes.len();
        let mut positions = Vec::with_capacity(n);

        for ring_start in (0..n).step_by(MAX_NODES_PER_RING) {
            let ring = ring_start / MAX_NODES_PER_RING;
            let count = (n - ring_start).min(MAX_NODES_PER_RING);
            let radius = Self::ring_radius(ring);
            let step = std::f32::consts::TAU / count as f32;

            for slot in 0..count {
                let angle = step * slot as f32;
                positions.push(Vec3::new(radius * angle.cos(), 0.0, radius * angle.sin()));
            }
        }

        positions
    }
}
