//! Call-depth resolution by multi-source BFS from entry points.

use std::collections::VecDeque;

use super::GraphIndex;
use crate::models::{Edge, Node};

/// Default name fragment marking an entry point.
pub const DEFAULT_ENTRY_MARKER: &str = "main";

/// Computes, per node, the shortest call distance from any entry point.
///
/// Entry points are nodes nobody calls, plus nodes whose display name contains
/// the entry marker. When every node is called by something (a cycle-only
/// graph), the nodes with the smallest in-degree stand in as roots. Nodes no
/// entry point reaches get depth 0.
#[derive(Debug, Clone)]
pub struct DepthResolver {
    entry_marker: String,
}

impl Default for DepthResolver {
    fn default() -> Self {
        Self::new(DEFAULT_ENTRY_MARKER)
    }
}

impl DepthResolver {
    pub fn new(entry_marker: impl Into<String>) -> Self {
        Self {
            entry_marker: entry_marker.into(),
        }
    }

    /// Depth per node, aligned with `nodes`.
    pub fn resolve(&self, nodes: &[Node], edges: &[Edge]) -> Vec<u32> {
        self.resolve_indexed(nodes, &GraphIndex::new(nodes, edges))
    }

    /// Same as [`resolve`](Self::resolve) over an already built index.
    pub fn resolve_indexed(&self, nodes: &[Node], index: &GraphIndex) -> Vec<u32> {
        let n = nodes.len();
        let mut depths = vec![0u32; n];
        if n == 0 {
            return depths;
        }

        let mut adjacency: Vec<Vec<usize>> = vec![Vec::new(); n];
        for edge in index.edges() {
            adjacency[edge.from_idx].push(edge.to_idx);
        }

        let mut visited = vec![false; n];
        let mut queue = VecDeque::new();
        for idx in self.entry_points(nodes, index) {
            visited[idx] = true;
            queue.push_back(idx);
        }

        // BFS visits in non-decreasing distance, so first visit is the minimum
        while let Some(current) = queue.pop_front() {
            for &next in &adjacency[current] {
                if !visited[next] {
                    visited[next] = true;
                    depths[next] = depths[current] + 1;
                    queue.push_back(next);
                }
            }
        }

        depths
    }

    /// Indices of the BFS roots, in node order.
    pub fn entry_points(&self, nodes: &[Node], index: &GraphIndex) -> Vec<usize> {
        let mut in_degree = vec![0usize; nodes.len()];
        for edge in index.edges().iter().filter(|e| !e.is_self_loop()) {
            in_degree[edge.to_idx] += 1;
        }

        let root_degree = in_degree.iter().copied().min().unwrap_or(0);
        if root_degree > 0 {
            tracing::debug!(
                root_degree,
                "No uncalled nodes; using minimum in-degree as roots"
            );
        }

        nodes
            .iter()
            .enumerate()
            .filter(|(idx, node)| {
                in_degree[*idx] == root_degree || self.is_marked_entry(node)
            })
            .map(|(idx, _)| idx)
            .collect()
    }

    fn is_marked_entry(&self, node: &Node) -> bool {
        !self.entry_marker.is_empty() && node.label.contains(self.entry_marker.as_str())
    }
}
