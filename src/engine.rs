//! End-to-end layout pass: snapshot in, scene out.

use rand::rngs::StdRng;

use crate::config::{Config, LayoutConfig};
use crate::encoding::VisualEncoder;
use crate::error::InvalidConfig;
use crate::geometry::{CameraFramer, EdgeCurveGenerator};
use crate::layout::{layout_indexed, rng_for, DepthResolver, GraphIndex, LayoutInput};
use crate::models::{GraphSnapshot, PositionedEdge, PositionedNode, Scene};

/// Mixed into the layout seed so edge curves draw from their own stream.
const CURVE_SEED_SALT: u64 = 0x9E37_79B9_7F4A_7C15;

/// Runs every stage of a layout pass with one immutable configuration.
#[derive(Debug, Clone, Default)]
pub struct LayoutEngine {
    layout: LayoutConfig,
    encoder: VisualEncoder,
    curves: EdgeCurveGenerator,
    framer: CameraFramer,
}

impl LayoutEngine {
    pub fn new(layout: LayoutConfig, encoder: VisualEncoder, curves: EdgeCurveGenerator) -> Self {
        Self {
            layout,
            encoder,
            curves,
            framer: CameraFramer::default(),
        }
    }

    /// Build from loaded configuration, validating every section.
    pub fn from_config(config: &Config) -> Result<Self, InvalidConfig> {
        config.validate()?;
        Ok(Self::new(
            config.layout_config()?,
            VisualEncoder::new(config.encoding.clone()),
            EdgeCurveGenerator::from_config(&config.encoding),
        ))
    }

    pub fn with_framer(mut self, framer: CameraFramer) -> Self {
        self.framer = framer;
        self
    }

    pub fn layout_config(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Position, style and frame every node and edge in `snapshot`.
    pub fn compute(&self, snapshot: &GraphSnapshot) -> Scene {
        let nodes = &snapshot.nodes;
        let index = GraphIndex::new(nodes, &snapshot.edges);
        let depths =
            DepthResolver::new(self.layout.entry_marker()).resolve_indexed(nodes, &index);

        let input = LayoutInput {
            nodes,
            index: &index,
            depths: &depths,
        };
        let positions = layout_indexed(&input, &self.layout, &mut rng_for(self.layout.seed()));

        let positioned: Vec<PositionedNode> = nodes
            .iter()
            .zip(positions)
            .zip(&depths)
            .map(|((node, position), &depth)| PositionedNode {
                style: self.encoder.node_style(node, Some(depth)),
                node: node.clone(),
                position,
                depth,
            })
            .collect();

        let edges = self.edges(snapshot, &index, &positioned, &mut self.curve_rng());
        let camera = self.framer.frame_nodes(&positioned);

        tracing::debug!(
            algorithm = %self.layout.algorithm(),
            nodes = positioned.len(),
            edges = edges.len(),
            dropped_edges = index.dropped(),
            "Computed scene"
        );

        Scene {
            nodes: positioned,
            edges,
            camera,
            dropped_edges: index.dropped(),
        }
    }

    fn edges(
        &self,
        snapshot: &GraphSnapshot,
        index: &GraphIndex,
        positioned: &[PositionedNode],
        rng: &mut StdRng,
    ) -> Vec<PositionedEdge> {
        index
            .edges()
            .iter()
            .map(|e| {
                let source = &positioned[e.from_idx];
                let target = &positioned[e.to_idx];
                let (color, opacity) =
                    self.encoder
                        .edge_style(&source.node, &target.node, &source.style, e.frequency);
                PositionedEdge {
                    edge: snapshot.edges[e.edge_idx].clone(),
                    points: self.curves.curve(source.position, target.position, rng),
                    color,
                    opacity,
                }
            })
            .collect()
    }

    fn curve_rng(&self) -> StdRng {
        rng_for(self.layout.seed().map(|seed| seed ^ CURVE_SEED_SALT))
    }
}
