//! Positioned, styled output handed to the renderer.

use bevy::color::{Color, Srgba};
use bevy::math::Vec3;
use serde::{Serialize, Serializer};

use super::{Edge, Node};
use crate::geometry::CameraOrbit;

/// Visual encoding of a node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NodeStyle {
    /// Base color.
    #[serde(serialize_with = "serialize_hex")]
    pub color: Color,
    /// Emissive (glow) color.
    #[serde(serialize_with = "serialize_hex")]
    pub emissive: Color,
    /// Opacity in `[0, 1]`.
    pub opacity: f32,
    /// Uniform scale, always positive.
    pub scale: f32,
}

/// A node with its computed position, depth and style.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionedNode {
    #[serde(flatten)]
    pub node: Node,
    pub position: Vec3,
    pub depth: u32,
    pub style: NodeStyle,
}

/// An edge with its sampled curve and style.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionedEdge {
    #[serde(flatten)]
    pub edge: Edge,
    /// Curve samples from source to target.
    pub points: Vec<Vec3>,
    #[serde(serialize_with = "serialize_hex")]
    pub color: Color,
    pub opacity: f32,
}

/// Result of one layout pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Scene {
    pub nodes: Vec<PositionedNode>,
    pub edges: Vec<PositionedEdge>,
    pub camera: CameraOrbit,
    /// Edges dropped because they referenced unknown node ids.
    pub dropped_edges: usize,
}

impl Scene {
    /// Look up a positioned node by id.
    pub fn node(&self, id: &str) -> Option<&PositionedNode> {
        self.nodes.iter().find(|n| n.node.id == id)
    }
}

fn serialize_hex<S: Serializer>(color: &Color, serializer: S) -> Result<S::Ok, S::Error> {
    let srgba: Srgba = color.to_srgba();
    serializer.serialize_str(&srgba.to_hex())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NodeKind;

    #[test]
    fn test_positioned_node_serialization() {
        let positioned = PositionedNode {
            node: Node::new("m.py:f", "f", "m.py", NodeKind::Function),
            position: Vec3::new(1.0, 2.0, 3.0),
            depth: 2,
            style: NodeStyle {
                color: Color::srgb(1.0, 0.0, 0.0),
                emissive: Color::BLACK,
                opacity: 0.5,
                scale: 1.0,
            },
        };

        let value = serde_json::to_value(&positioned).unwrap();
        assert_eq!(value["id"], "m.py:f");
        assert_eq!(value["depth"], 2);
        assert_eq!(value["position"], serde_json::json!([1.0, 2.0, 3.0]));
        assert_eq!(value["style"]["color"], "#FF0000");
        assert_eq!(value["style"]["emissive"], "#000000");
    }
}
