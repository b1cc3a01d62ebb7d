//! Fibonacci sphere layout.

use bevy::math::Vec3;
use rand::rngs::StdRng;

use super::{LayoutInput, LayoutStrategy};

/// Radius of the smallest sphere.
const BASE_RADIUS: f32 = 3.0;
/// Radius growth per square root of node count.
const RADIUS_PER_SQRT_NODE: f32 = 2.0;

/// Spreads nodes evenly over a sphere whose radius grows with `√n`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SphereLayout;

impl SphereLayout {
    pub fn radius(node_count: usize) -> f32 {
        BASE_RADIUS + (node_count as f32).sqrt() * RADIUS_PER_SQRT_NODE
    }
}

impl LayoutStrategy for SphereLayout {
    fn positions(&self, input: &LayoutInput<'_>, _rng: &mut StdRng) -> Vec<Vec3> {
        let n = input.nodes.len();
        let radius = Self::radius(n);
        (0..n).map(|i| fibonacci_point(i, n) * radius).collect()
    }
}

/// Point `i` of `n` on the unit Fibonacci sphere.
fn fibonacci_point(i: usize, n: usize) -> Vec3 {
    let golden_angle = std::f32::consts::PI * (3.0 - 5.0_f32.sqrt());
    let n = n.max(1) as f32;
    let y = 1.0 - 2.0 * (i as f32 + 0.5) / n;
    let ring = (1.0 - y * y).max(0.0).sqrt();
    let theta = golden_angle * i as f32;
    Vec3::new(ring * theta.cos(), y, ring * theta.sin())
}
