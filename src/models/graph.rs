//! Graph snapshot models as produced by the static analyzer.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Kind of code entity a node stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// A free function or method.
    #[default]
    Function,
    /// A class definition.
    Class,
    /// A whole source module.
    Module,
}

impl NodeKind {
    /// Wire name of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Function => "function",
            NodeKind::Class => "class",
            NodeKind::Module => "module",
        }
    }
}

/// A code entity in a graph snapshot.
///
/// `id` is stable across snapshots describing the same entity, which is what
/// lets transitions match old and new positions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    /// Unique identifier within a snapshot (e.g. `services/api.py:handle`).
    pub id: String,
    /// Display name.
    #[serde(alias = "name")]
    pub label: String,
    /// Owning module path.
    #[serde(rename = "file", alias = "module", default)]
    pub module: String,
    /// Function, class or module.
    #[serde(rename = "type", default)]
    pub kind: NodeKind,
    /// Flagged unreachable/unused by the analyzer.
    #[serde(default)]
    pub dead: bool,
    /// Number of call sites referring to this entity.
    #[serde(default)]
    pub call_count: u64,
    /// Source line count, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_count: Option<u32>,
    /// Source text, if the analyzer captured it.
    #[serde(rename = "code", default, skip_serializing_if = "Option::is_none")]
    pub source_text: Option<String>,
    /// Enclosing class for methods.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
}

impl Node {
    /// Creates a live node with no recorded calls.
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        module: impl Into<String>,
        kind: NodeKind,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            module: module.into(),
            kind,
            dead: false,
            call_count: 0,
            line_count: None,
            source_text: None,
            class_name: None,
        }
    }

    /// Creates a function node whose label equals its id.
    pub fn function(id: impl Into<String>, module: impl Into<String>) -> Self {
        let id = id.into();
        Self::new(id.clone(), id, module, NodeKind::Function)
    }

    /// Marks the node as dead code.
    pub fn dead(mut self) -> Self {
        self.dead = true;
        self
    }

    /// Sets the call count.
    pub fn with_calls(mut self, call_count: u64) -> Self {
        self.call_count = call_count;
        self
    }
}

/// A directed call/reference between two nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    /// Caller node id.
    pub source: String,
    /// Callee node id.
    pub target: String,
    /// How often the call happens; absent means once.
    #[serde(
        default,
        alias = "callFrequency",
        skip_serializing_if = "Option::is_none"
    )]
    pub frequency: Option<u32>,
    /// Relationship label (e.g. `CALLS`).
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub relationship: Option<String>,
}

impl Edge {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            frequency: None,
            relationship: None,
        }
    }

    pub fn with_frequency(mut self, frequency: u32) -> Self {
        self.frequency = Some(frequency);
        self
    }

    /// Effective call frequency, always at least 1.
    pub fn frequency(&self) -> u32 {
        self.frequency.unwrap_or(1).max(1)
    }
}

/// Top-level analyzer document: `{ "nodes": [...], "edges": [...] }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub edges: Vec<Edge>,
}

impl GraphSnapshot {
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        Self { nodes, edges }
    }

    /// Parse a snapshot from analyzer JSON.
    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Read and parse a snapshot file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_analyzer_output() {
        let json = r#"{
            "nodes": [
                {"id": "main.py", "type": "module", "file": "main.py", "label": "main", "dead": false, "callCount": 0},
                {"id": "main.py:run", "type": "function", "file": "main.py", "label": "run", "dead": true, "callCount": 3, "className": null}
            ],
            "edges": [
                {"source": "main.py", "target": "main.py:run", "type": "CALLS"}
            ]
        }"#;

        let snapshot = GraphSnapshot::from_json(json).unwrap();
        assert_eq!(snapshot.nodes.len(), 2);
        assert_eq!(snapshot.nodes[0].kind, NodeKind::Module);
        assert_eq!(snapshot.nodes[1].module, "main.py");
        assert!(snapshot.nodes[1].dead);
        assert_eq!(snapshot.nodes[1].call_count, 3);
        assert_eq!(snapshot.edges[0].relationship.as_deref(), Some("CALLS"));
        assert_eq!(snapshot.edges[0].frequency(), 1);
    }

    #[test]
    fn test_decode_defaults_and_aliases() {
        let json = r#"{"nodes": [{"id": "a", "name": "alpha", "module": "pkg/a"}]}"#;
        let snapshot = GraphSnapshot::from_json(json).unwrap();
        let node = &snapshot.nodes[0];
        assert_eq!(node.label, "alpha");
        assert_eq!(node.module, "pkg/a");
        assert_eq!(node.kind, NodeKind::Function);
        assert!(!node.dead);
        assert_eq!(node.call_count, 0);
        assert!(snapshot.edges.is_empty());
    }

    #[test]
    fn test_zero_frequency_counts_as_one() {
        let edge = Edge::new("a", "b").with_frequency(0);
        assert_eq!(edge.frequency(), 1);
        assert_eq!(Edge::new("a", "b").with_frequency(7).frequency(), 7);
    }

    #[test]
    fn test_node_serialization_uses_wire_names() {
        let node = Node::function("f", "m.py").with_calls(4);
        let json = serde_json::to_string(&node).unwrap();
        assert!(json.contains("\"type\":\"function\""));
        assert!(json.contains("\"file\":\"m.py\""));
        assert!(json.contains("\"callCount\":4"));
        assert!(!json.contains("lineCount"));
    }
}
