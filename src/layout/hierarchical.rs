//! Layered layout: depth on Y, module groups on X, group members on Z.

use std::collections::BTreeMap;

use bevy::math::Vec3;
use rand::rngs::StdRng;

use super::{unit_hash, LayoutInput, LayoutStrategy};

/// Vertical distance between depth layers.
pub const LEVEL_SPACING: f32 = 6.0;
/// Horizontal distance between module groups in a layer.
const MODULE_SPACING: f32 = 8.0;
/// Distance between nodes of one group.
const NODE_SPACING: f32 = 3.0;
/// Largest cosmetic offset applied on X and Z.
pub const MAX_JITTER: f32 = 0.3;

/// Depth 0 sits at `y = 0` and each deeper layer sits [`LEVEL_SPACING`] lower.
///
/// Within a layer, nodes are grouped by owning module (groups ordered by
/// module path) and groups are centred on X. Members of a group are centred on
/// Z in input order. A jitter derived from the node id separates overlapping
/// labels; it never touches Y, so layer membership stays exact.
#[derive(Debug, Clone, Copy, Default)]
pub struct HierarchicalLayout;

impl LayoutStrategy for HierarchicalLayout {
    fn positions(&self, input: &LayoutInput<'_>, _rng: &mut StdRng) -> Vec<Vec3> {
        let nodes = input.nodes;

        // depth -> module -> node indices (in input order)
        let mut layers: BTreeMap<u32, BTreeMap<&str, Vec<usize>>> = BTreeMap::new();
        for (idx, node) in nodes.iter().enumerate() {
            let depth = input.depths.get(idx).copied().unwrap_or(0);
            layers
                .entry(depth)
                .or_default()
                .entry(node.module.as_str())
                .or_default()
                .push(idx);
        }

        let mut positions = vec![Vec3::ZERO; nodes.len()];
        for (depth, groups) in &layers {
            let y = -(*depth as f32) * LEVEL_SPACING;
            for (group_idx, members) in groups.values().enumerate() {
                let x = centered(group_idx, groups.len()) * MODULE_SPACING;
                for (slot, &idx) in members.iter().enumerate() {
                    let z = centered(slot, members.len()) * NODE_SPACING;
                    let (jx, jz) = jitter(&nodes[idx].id);
                    positions[idx] = Vec3::new(x + jx, y, z + jz);
                }
            }
        }

        positions
    }
}

/// Offset of slot `i` among `count` slots centred on zero, in slot units.
fn centered(i: usize, count: usize) -> f32 {
    i as f32 - (count as f32 - 1.0) / 2.0
}

/// Bounded, id-stable offset on X and Z.
fn jitter(id: &str) -> (f32, f32) {
    let a = unit_hash(id);
    let b = unit_hash(&format!("{id}#z"));
    ((a * 2.0 - 1.0) * MAX_JITTER, (b * 2.0 - 1.0) * MAX_JITTER)
}
