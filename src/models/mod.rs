//! Domain models for code graphs and their positioned, styled form.

mod graph;
mod scene;
mod stats;

pub use graph::{Edge, GraphSnapshot, Node, NodeKind};
pub use scene::{NodeStyle, PositionedEdge, PositionedNode, Scene};
pub use stats::{CalledNode, GraphStatistics};
