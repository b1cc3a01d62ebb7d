//! Resolution of edge endpoints to node indices.

use std::collections::HashMap;

use crate::models::{Edge, Node};

/// An edge whose endpoints both exist in the snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexedEdge {
    /// Position of the edge in the input edge list.
    pub edge_idx: usize,
    /// Source node index.
    pub from_idx: usize,
    /// Target node index.
    pub to_idx: usize,
    /// Effective call frequency (at least 1).
    pub frequency: u32,
}

impl IndexedEdge {
    pub fn is_self_loop(&self) -> bool {
        self.from_idx == self.to_idx
    }
}

/// Node id lookup plus the edges that survive endpoint resolution.
///
/// Edges naming an id absent from the node list are dropped here, so no
/// later stage ever sees them.
#[derive(Debug, Clone, Default)]
pub struct GraphIndex {
    id_to_idx: HashMap<String, usize>,
    edges: Vec<IndexedEdge>,
    dropped: usize,
}

impl GraphIndex {
    pub fn new(nodes: &[Node], edges: &[Edge]) -> Self {
        let mut id_to_idx = HashMap::with_capacity(nodes.len());
        for (idx, node) in nodes.iter().enumerate() {
            // First occurrence wins for duplicated ids
            id_to_idx.entry(node.id.clone()).or_insert(idx);
        }

        let mut resolved = Vec::with_capacity(edges.len());
        let mut dropped = 0;
        for (edge_idx, e) in edges.iter().enumerate() {
            if let (Some(&from_idx), Some(&to_idx)) =
                (id_to_idx.get(&e.source), id_to_idx.get(&e.target))
            {
                resolved.push(IndexedEdge {
                    edge_idx,
                    from_idx,
                    to_idx,
                    frequency: e.frequency(),
                });
            } else {
                dropped += 1;
            }
        }

        if dropped > 0 {
            tracing::debug!(dropped, "Dropped edges referencing unknown node ids");
        }

        Self {
            id_to_idx,
            edges: resolved,
            dropped,
        }
    }

    /// Index of the node with the given id.
    pub fn get(&self, id: &str) -> Option<usize> {
        self.id_to_idx.get(id).copied()
    }

    /// Edges with both endpoints resolved, in input order.
    pub fn edges(&self) -> &[IndexedEdge] {
        &self.edges
    }

    /// Number of edges dropped during resolution.
    pub fn dropped(&self) -> usize {
        self.dropped
    }
}
