//! Force-directed layout.
//!
//! A modified Eades model run for a fixed number of iterations:
//! - Repulsion: inverse-square between all pairs
//! - Attraction: Hooke springs along edges (stronger for frequent calls)
//! - Centering: linear pull toward the origin, growing with distance
//! - Damping: velocity friction per iteration
//! - Cooling: forces decay linearly to zero over the run
//!
//! Repulsion visits every node pair, so one pass costs O(n² · iterations).
//! That is the scaling limit of this strategy; graphs of a few thousand
//! nodes take seconds and belong on a worker thread.

use bevy::math::Vec3;
use rand::rngs::StdRng;
use rand::Rng;

use super::{LayoutInput, LayoutStrategy};
use crate::config::LayoutConfig;

/// Distance floor for force computation; prevents division by zero.
const MIN_DISTANCE: f32 = 0.1;
/// Inner radius of the initial placement shell, relative to its outer radius.
const SHELL_INNER_RATIO: f32 = 0.5;

/// Physics relaxation seeded by random placement.
///
/// Exact coordinates depend on the RNG; with a fixed seed the output repeats
/// bit-for-bit.
#[derive(Debug, Clone, Copy)]
pub struct ForceDirectedLayout {
    node_spacing: f32,
    center_force: f32,
    repulsion: f32,
    attraction: f32,
    damping: f32,
    iterations: usize,
}

impl ForceDirectedLayout {
    pub fn new(config: &LayoutConfig) -> Self {
        Self {
            node_spacing: config.node_spacing(),
            center_force: config.center_force(),
            repulsion: config.repulsion(),
            attraction: config.attraction(),
            damping: config.damping(),
            iterations: config.iterations(),
        }
    }

    /// Outer radius of the initial placement shell.
    fn shell_radius(&self, node_count: usize) -> f32 {
        self.node_spacing * (node_count as f32).cbrt()
    }

    /// Largest distance a node may travel in one iteration.
    fn max_step(&self) -> f32 {
        self.node_spacing
    }

    /// Accumulate one iteration's forces into a fresh buffer.
    fn forces(&self, positions: &[Vec3], input: &LayoutInput<'_>) -> Vec<Vec3> {
        let n = positions.len();
        let mut forces = vec![Vec3::ZERO; n];

        // --- Repulsion: F_r = K / d² ---
        for i in 0..n {
            for j in (i + 1)..n {
                let mut delta = positions[i] - positions[j];
                if delta.length_squared() < MIN_DISTANCE * MIN_DISTANCE * 1e-4 {
                    // Coincident nodes: separate along a deterministic axis
                    delta = separation_axis(i, j) * MIN_DISTANCE;
                }
                let dist = delta.length().max(MIN_DISTANCE);
                let force = self.repulsion / (dist * dist);
                let dir = delta / delta.length();

                forces[i] += dir * force;
                forces[j] -= dir * force;
            }
        }

        // --- Attraction: F_a = k · w · d ---
        for edge in input.index.edges().iter().filter(|e| !e.is_self_loop()) {
            let delta = positions[edge.to_idx] - positions[edge.from_idx];
            let weight = 1.0 + (edge.frequency as f32).ln();
            let pull = delta * self.attraction * weight;

            forces[edge.from_idx] += pull;
            forces[edge.to_idx] -= pull;
        }

        // --- Centering: F_c = -c · p ---
        for (force, position) in forces.iter_mut().zip(positions) {
            *force -= *position * self.center_force;
        }

        forces
    }
}

impl LayoutStrategy for ForceDirectedLayout {
    fn positions(&self, input: &LayoutInput<'_>, rng: &mut StdRng) -> Vec<Vec3> {
        let n = input.nodes.len();
        let outer = self.shell_radius(n);
        let mut positions: Vec<Vec3> = (0..n)
            .map(|_| random_in_shell(rng, outer * SHELL_INNER_RATIO, outer))
            .collect();
        let mut velocities = vec![Vec3::ZERO; n];

        for iteration in 0..self.iterations {
            let cooldown = 1.0 - iteration as f32 / self.iterations as f32;
            let forces = self.forces(&positions, input);

            positions = positions
                .iter()
                .zip(velocities.iter_mut())
                .zip(&forces)
                .map(|((position, velocity), force)| {
                    *velocity = (*velocity + *force * cooldown) * self.damping;
                    *velocity = velocity.clamp_length_max(self.max_step());
                    *position + *velocity
                })
                .collect();
        }

        tracing::debug!(
            nodes = n,
            edges = input.index.edges().len(),
            iterations = self.iterations,
            "Force-directed layout settled"
        );

        positions
    }
}

/// Uniformly random direction scaled to a radius within `[inner, outer]`.
fn random_in_shell(rng: &mut StdRng, inner: f32, outer: f32) -> Vec3 {
    let theta = rng.gen_range(0.0..std::f32::consts::TAU);
    let y: f32 = rng.gen_range(-1.0..=1.0);
    let ring = (1.0 - y * y).max(0.0).sqrt();
    let radius = rng.gen_range(inner..=outer);
    Vec3::new(ring * theta.cos(), y, ring * theta.sin()) * radius
}

/// Unit vector used to push apart two nodes occupying the same point.
fn separation_axis(i: usize, j: usize) -> Vec3 {
    let angle = (i * 31 + j) as f32 * 2.399_963;
    Vec3::new(angle.cos(), 0.5, angle.sin()).normalize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutSettings;
    use crate::layout::{GraphIndex, LayoutAlgorithm};
    use crate::models::{Edge, Node};
    use rand::SeedableRng;

    fn run(nodes: &[Node], edges: &[Edge], seed: u64) -> Vec<Vec3> {
        let index = GraphIndex::new(nodes, edges);
        let depths = vec![0; nodes.len()];
        let input = LayoutInput {
            nodes,
            index: &index,
            depths: &depths,
        };
        let config = LayoutConfig::with_algorithm(LayoutAlgorithm::ForceDirected);
        ForceDirectedLayout::new(&config).positions(&input, &mut StdRng::seed_from_u64(seed))
    }

    #[test]
    fn test_connected_pair_is_closer_than_stranger() {
        let nodes = vec![
            Node::function("a", "m"),
            Node::function("b", "m"),
            Node::function("c", "m"),
        ];
        let edges = vec![Edge::new("a", "b")];

        let trials = 100;
        let successes = (0..trials)
            .filter(|&seed| {
                let p = run(&nodes, &edges, seed);
                let pair = p[0].distance(p[1]);
                pair < p[0].distance(p[2]) && pair < p[1].distance(p[2])
            })
            .count();
        assert!(successes >= 95, "only {successes}/{trials} trials clustered");
    }

    #[test]
    fn test_coincident_nodes_separate() {
        let nodes = vec![Node::function("a", "m"), Node::function("b", "m")];
        let index = GraphIndex::new(&nodes, &[]);
        let depths = vec![0; 2];
        let input = LayoutInput {
            nodes: &nodes,
            index: &index,
            depths: &depths,
        };
        let layout = ForceDirectedLayout::new(&LayoutConfig::default());

        let forces = layout.forces(&[Vec3::ONE, Vec3::ONE], &input);
        assert!(forces.iter().all(|f| f.is_finite()));
        assert!(forces[0].distance(forces[1]) > 0.0);
    }

    #[test]
    fn test_layout_stays_bounded() {
        let nodes: Vec<Node> = (0..25).map(|i| Node::function(format!("f{i}"), "m")).collect();
        let edges: Vec<Edge> = (1..25)
            .map(|i| Edge::new(format!("f{}", i / 2), format!("f{i}")))
            .collect();
        let positions = run(&nodes, &edges, 11);

        assert!(positions.iter().all(|p| p.is_finite()));
        let centroid = positions.iter().copied().sum::<Vec3>() / positions.len() as f32;
        assert!(centroid.length() < 10.0, "drifted to {centroid:?}");
        assert!(positions.iter().all(|p| p.length() < 200.0));
    }

    #[test]
    fn test_stronger_attraction_tightens_edges() {
        let nodes = vec![Node::function("a", "m"), Node::function("b", "m")];
        let edges = vec![Edge::new("a", "b")];
        let index = GraphIndex::new(&nodes, &edges);
        let depths = vec![0; 2];
        let input = LayoutInput {
            nodes: &nodes,
            index: &index,
            depths: &depths,
        };

        let distance_with = |attraction: f32| {
            let config = LayoutConfig::new(LayoutSettings {
                attraction,
                ..LayoutSettings::default()
            })
            .unwrap();
            let p = ForceDirectedLayout::new(&config)
                .positions(&input, &mut StdRng::seed_from_u64(4));
            p[0].distance(p[1])
        };

        assert!(distance_with(0.2) < distance_with(0.02));
    }
}
