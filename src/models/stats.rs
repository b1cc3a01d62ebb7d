//! Summary statistics for a graph snapshot.

use std::collections::BTreeMap;

use serde::Serialize;

use super::{GraphSnapshot, NodeKind};
use crate::layout::{DepthResolver, GraphIndex};

/// How many of the most-called functions are reported.
const MOST_CALLED_LIMIT: usize = 10;

/// A function and how often it is called.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalledNode {
    pub id: String,
    pub label: String,
    pub call_count: u64,
}

/// Aggregate view of a snapshot, mirroring what the analyzer reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphStatistics {
    pub node_count: usize,
    pub edge_count: usize,
    /// Edges referencing node ids that are not in the snapshot.
    pub dropped_edges: usize,
    pub dead_code_count: usize,
    /// Node count per kind, keyed by wire name.
    pub kind_counts: BTreeMap<String, usize>,
    /// Functions with at least one call, most called first.
    pub most_called: Vec<CalledNode>,
    /// Deepest call depth reached from any entry point.
    pub max_depth: u32,
}

impl GraphStatistics {
    pub fn from_snapshot(snapshot: &GraphSnapshot) -> Self {
        let index = GraphIndex::new(&snapshot.nodes, &snapshot.edges);
        let depths = DepthResolver::default().resolve_indexed(&snapshot.nodes, &index);

        let mut kind_counts = BTreeMap::new();
        for node in &snapshot.nodes {
            *kind_counts.entry(node.kind.as_str().to_string()).or_insert(0) += 1;
        }

        let mut called: Vec<&_> = snapshot
            .nodes
            .iter()
            .filter(|n| n.kind == NodeKind::Function && n.call_count > 0)
            .collect();
        // Stable sort keeps snapshot order among equal counts.
        called.sort_by(|a, b| b.call_count.cmp(&a.call_count));
        let most_called = called
            .into_iter()
            .take(MOST_CALLED_LIMIT)
            .map(|n| CalledNode {
                id: n.id.clone(),
                label: n.label.clone(),
                call_count: n.call_count,
            })
            .collect();

        Self {
            node_count: snapshot.nodes.len(),
            edge_count: index.edges().len(),
            dropped_edges: index.dropped(),
            dead_code_count: snapshot.nodes.iter().filter(|n| n.dead).count(),
            kind_counts,
            most_called,
            max_depth: depths.iter().copied().max().unwrap_or(0),
        }
    }
}
