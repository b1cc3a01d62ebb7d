//! Curved edge geometry.

use bevy::math::Vec3;
use rand::Rng;

use crate::config::EncodingConfig;

/// Edge length below which the bulge is computed as if the edge had this length.
///
/// Keeps self-loops and very short edges visibly curved.
const MIN_BULGE_LENGTH: f32 = 1.0;

/// Samples a quadratic Bézier between two endpoints, bent through a randomly
/// offset midpoint.
///
/// The offset is cosmetic and bounded by `bulge × max(length, 1)`. Holds no
/// state between calls; the caller supplies the RNG.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeCurveGenerator {
    samples: usize,
    bulge: f32,
}

impl Default for EdgeCurveGenerator {
    fn default() -> Self {
        Self::from_config(&EncodingConfig::default())
    }
}

impl EdgeCurveGenerator {
    /// `samples` is raised to at least 2.
    pub fn new(samples: usize, bulge: f32) -> Self {
        Self {
            samples: samples.max(2),
            bulge: bulge.max(0.0),
        }
    }

    pub fn from_config(config: &EncodingConfig) -> Self {
        Self::new(config.curve_samples, config.curve_bulge)
    }

    pub fn samples(&self) -> usize {
        self.samples
    }

    /// Largest midpoint offset for an edge between `from` and `to`.
    pub fn max_offset(&self, from: Vec3, to: Vec3) -> f32 {
        self.bulge * from.distance(to).max(MIN_BULGE_LENGTH)
    }

    /// Points from `from` to `to`, both included.
    pub fn curve(&self, from: Vec3, to: Vec3, rng: &mut impl Rng) -> Vec<Vec3> {
        let offset = random_in_unit_ball(rng) * self.max_offset(from, to);
        let midpoint = (from + to) / 2.0 + offset;
        // Control point chosen so the curve passes through `midpoint` at t = 0.5
        let control = midpoint * 2.0 - (from + to) / 2.0;

        let last = self.samples - 1;
        (0..self.samples)
            .map(|i| match i {
                0 => from,
                i if i == last => to,
                i => quadratic_bezier(from, control, to, i as f32 / last as f32),
            })
            .collect()
    }
}

fn quadratic_bezier(p0: Vec3, p1: Vec3, p2: Vec3, t: f32) -> Vec3 {
    let u = 1.0 - t;
    p0 * (u * u) + p1 * (2.0 * u * t) + p2 * (t * t)
}

fn random_in_unit_ball(rng: &mut impl Rng) -> Vec3 {
    Vec3::new(
        rng.gen_range(-1.0..=1.0),
        rng.gen_range(-1.0..=1.0),
        rng.gen_range(-1.0..=1.0),
    )
    .clamp_length_max(1.0)
}
