//! Node placement strategies.
//!
//! ## Module Structure
//!
//! - `index` - Edge endpoint resolution (drops unknown ids)
//! - `depth` - Call depth by multi-source BFS
//! - `sphere` - Fibonacci sphere distribution
//! - `force` - Force-directed relaxation
//! - `hierarchical` - Depth / module / node grid
//! - `circular` - Concentric rings
//!
//! Every strategy returns one position per node, in node order. Empty input
//! gives empty output and a lone node sits at the origin.

mod circular;
mod depth;
mod force;
mod hierarchical;
mod index;
mod sphere;

use std::fmt;
use std::str::FromStr;

use bevy::math::Vec3;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

pub use circular::CircularLayout;
pub use depth::{DepthResolver, DEFAULT_ENTRY_MARKER};
pub use force::ForceDirectedLayout;
pub use hierarchical::HierarchicalLayout;
pub use index::{GraphIndex, IndexedEdge};
pub use sphere::SphereLayout;

use crate::config::LayoutConfig;
use crate::error::AppError;
use crate::models::{Edge, Node};

/// Layout algorithm selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutAlgorithm {
    /// Even spread over a sphere surface.
    Sphere,
    /// Physics relaxation (non-deterministic without a seed).
    #[default]
    #[serde(alias = "force_directed", alias = "force")]
    ForceDirected,
    /// Depth layers, grouped by module.
    Hierarchical,
    /// Concentric rings.
    Circular,
}

impl LayoutAlgorithm {
    pub const ALL: [LayoutAlgorithm; 4] = [
        LayoutAlgorithm::Sphere,
        LayoutAlgorithm::ForceDirected,
        LayoutAlgorithm::Hierarchical,
        LayoutAlgorithm::Circular,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LayoutAlgorithm::Sphere => "sphere",
            LayoutAlgorithm::ForceDirected => "force-directed",
            LayoutAlgorithm::Hierarchical => "hierarchical",
            LayoutAlgorithm::Circular => "circular",
        }
    }
}

impl fmt::Display for LayoutAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LayoutAlgorithm {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sphere" => Ok(LayoutAlgorithm::Sphere),
            "force-directed" | "force_directed" | "force" => Ok(LayoutAlgorithm::ForceDirected),
            "hierarchical" => Ok(LayoutAlgorithm::Hierarchical),
            "circular" => Ok(LayoutAlgorithm::Circular),
            other => Err(AppError::UnknownAlgorithm(other.to_string())),
        }
    }
}

/// Everything a strategy may look at.
#[derive(Debug, Clone, Copy)]
pub struct LayoutInput<'a> {
    pub nodes: &'a [Node],
    pub index: &'a GraphIndex,
    /// Call depth per node, aligned with `nodes`.
    pub depths: &'a [u32],
}

/// A way of placing nodes in 3D space.
pub trait LayoutStrategy {
    /// One position per node, in node order.
    ///
    /// `rng` is the only source of randomness a strategy may use.
    fn positions(&self, input: &LayoutInput<'_>, rng: &mut StdRng) -> Vec<Vec3>;
}

/// Seeded RNG when the config fixes a seed, entropy otherwise.
pub fn rng_for(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Place `nodes` using the configured algorithm.
///
/// Edges naming unknown ids are ignored.
pub fn layout(nodes: &[Node], edges: &[Edge], config: &LayoutConfig) -> Vec<Vec3> {
    let index = GraphIndex::new(nodes, edges);
    let depths = DepthResolver::new(config.entry_marker()).resolve_indexed(nodes, &index);
    let input = LayoutInput {
        nodes,
        index: &index,
        depths: &depths,
    };
    layout_indexed(&input, config, &mut rng_for(config.seed()))
}

/// Place nodes over a prepared [`LayoutInput`].
pub fn layout_indexed(input: &LayoutInput<'_>, config: &LayoutConfig, rng: &mut StdRng) -> Vec<Vec3> {
    match input.nodes.len() {
        0 => return Vec::new(),
        1 => return vec![Vec3::ZERO],
        _ => {}
    }

    match config.algorithm() {
        LayoutAlgorithm::Sphere => SphereLayout.positions(input, rng),
        LayoutAlgorithm::ForceDirected => ForceDirectedLayout::new(config).positions(input, rng),
        LayoutAlgorithm::Hierarchical => HierarchicalLayout.positions(input, rng),
        LayoutAlgorithm::Circular => CircularLayout.positions(input, rng),
    }
}

/// Deterministic value in `[0, 1)` from a string, used for cosmetic offsets.
pub(crate) fn unit_hash(value: &str) -> f32 {
    let hash = crate::encoding::rolling_hash(value);
    (hash % 10_000) as f32 / 10_000.0
}
