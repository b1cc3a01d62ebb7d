//! Node and edge styling rules.

use bevy::color::{Color, Hsla, Mix, Srgba};

use super::constants::*;
use super::rolling_hash;
use crate::config::EncodingConfig;
use crate::models::{Node, NodeKind, NodeStyle};

/// Depth at which depth-based perturbation reaches half its maximum.
const DEPTH_HALF_EFFECT: f32 = 4.0;
/// Saturation reduction approached as depth grows.
const DEPTH_SATURATION_DROP: f32 = 0.3;
/// Lightness never goes below this.
const MIN_LIGHTNESS: f32 = 0.05;

/// Maps node and edge attributes to color, emission, opacity and scale.
///
/// Rules, first match wins:
/// 1. dead code gets the fixed dead style (depends only on kind)
/// 2. call count above the high-usage threshold gets the hot style, with
///    scale growing with `ln(1 + calls)`
/// 3. everything else takes its module's palette color, shifted by depth
///
/// Kind then applies a secondary scale/opacity modifier.
#[derive(Debug, Clone, Default)]
pub struct VisualEncoder {
    config: EncodingConfig,
}

impl VisualEncoder {
    pub fn new(config: EncodingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EncodingConfig {
        &self.config
    }

    /// Style for a node, optionally shaded by its call depth.
    pub fn node_style(&self, node: &Node, depth: Option<u32>) -> NodeStyle {
        let (kind_scale, kind_opacity) = kind_modifier(node.kind);

        let style = if node.dead {
            NodeStyle {
                color: COLOR_DEAD,
                emissive: COLOR_NO_EMISSION,
                opacity: DEAD_OPACITY * kind_opacity,
                scale: BASE_NODE_SCALE * DEAD_SCALE_FACTOR * kind_scale,
            }
        } else if node.call_count > self.config.high_usage_threshold {
            let growth = 1.0 + self.config.hot_scale_per_log * (node.call_count as f32).ln_1p();
            NodeStyle {
                color: COLOR_HOT,
                emissive: COLOR_HOT_EMISSIVE,
                opacity: kind_opacity,
                scale: BASE_NODE_SCALE * kind_scale * growth,
            }
        } else {
            let base = module_color(&node.module);
            let color = match depth {
                Some(depth) => self.shade_by_depth(base, depth),
                None => base,
            };
            NodeStyle {
                color,
                emissive: dim(color, BASE_EMISSIVE_FACTOR),
                opacity: kind_opacity,
                scale: BASE_NODE_SCALE * kind_scale,
            }
        };

        self.bounded(style)
    }

    /// Color and opacity for an edge between two styled nodes.
    pub fn edge_style(
        &self,
        source: &Node,
        target: &Node,
        source_style: &NodeStyle,
        frequency: u32,
    ) -> (Color, f32) {
        if source.dead || target.dead {
            return (COLOR_EDGE_DEAD, EDGE_DEAD_OPACITY);
        }

        let blended: Srgba = source_style
            .color
            .to_srgba()
            .mix(&COLOR_EDGE_NEUTRAL.to_srgba(), 0.5);
        let color = Color::from(blended);
        let opacity = EDGE_BASE_OPACITY + EDGE_OPACITY_PER_LOG * (frequency.max(1) as f32).ln();
        (color, opacity.clamp(0.0, EDGE_MAX_OPACITY))
    }

    /// Rotate hue and darken by a bounded, monotonic function of depth.
    fn shade_by_depth(&self, base: Color, depth: u32) -> Color {
        let depth = depth as f32;
        let t = depth / (depth + DEPTH_HALF_EFFECT);
        let hsla = Hsla::from(base);
        Color::from(Hsla {
            hue: (hsla.hue + t * self.config.depth_hue_shift).rem_euclid(360.0),
            saturation: hsla.saturation * (1.0 - DEPTH_SATURATION_DROP * t),
            lightness: (hsla.lightness - t * self.config.depth_lightness_drop).max(MIN_LIGHTNESS),
            alpha: hsla.alpha,
        })
    }

    fn bounded(&self, style: NodeStyle) -> NodeStyle {
        let scale = if style.scale.is_finite() {
            style.scale.clamp(MIN_NODE_SCALE, self.config.max_scale.max(MIN_NODE_SCALE))
        } else {
            self.config.max_scale
        };
        let opacity = if style.opacity.is_finite() {
            style.opacity.clamp(0.0, 1.0)
        } else {
            1.0
        };
        NodeStyle {
            scale,
            opacity,
            ..style
        }
    }
}

/// Palette color for a module path, stable across runs.
pub fn module_color(module: &str) -> Color {
    MODULE_PALETTE[rolling_hash(module) as usize % MODULE_PALETTE.len()]
}

/// (scale, opacity) multipliers per kind.
fn kind_modifier(kind: NodeKind) -> (f32, f32) {
    match kind {
        NodeKind::Function => (1.0, 1.0),
        NodeKind::Class => (1.25, 0.95),
        NodeKind::Module => (1.6, 0.8),
    }
}

fn dim(color: Color, factor: f32) -> Color {
    let srgba = color.to_srgba();
    Color::srgb(srgba.red * factor, srgba.green * factor, srgba.blue * factor)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encoder() -> VisualEncoder {
        VisualEncoder::default()
    }

    #[test]
    fn test_dead_style_ignores_usage_and_module() {
        let encoder = encoder();
        let cold = Node::function("f", "a.py").dead();
        let hot = Node::function("g", "b.py").dead().with_calls(1000);

        let cold_style = encoder.node_style(&cold, Some(0));
        let hot_style = encoder.node_style(&hot, Some(7));
        assert_eq!(cold_style, hot_style);
        assert_eq!(cold_style.color, COLOR_DEAD);
        assert_eq!(cold_style.emissive, COLOR_NO_EMISSION);
    }

    #[test]
    fn test_dead_nodes_are_smaller_and_fainter() {
        let encoder = encoder();
        let live = encoder.node_style(&Node::function("f", "a.py"), None);
        let dead = encoder.node_style(&Node::function("f", "a.py").dead(), None);
        assert!(dead.scale < live.scale);
        assert!(dead.opacity < live.opacity);
    }

    #[test]
    fn test_dead_scale_depends_on_kind() {
        let encoder = encoder();
        let function = encoder.node_style(&Node::function("f", "m").dead(), None);
        let module = encoder.node_style(&Node::new("m", "m", "m", NodeKind::Module).dead(), None);
        assert!(module.scale > function.scale);
        assert_eq!(module.color, function.color);
    }

    #[test]
    fn test_hot_nodes_override_module_color() {
        let encoder = encoder();
        let style = encoder.node_style(&Node::function("f", "a.py").with_calls(11), Some(2));
        assert_eq!(style.color, COLOR_HOT);

        // At the threshold the node is still ordinary
        let style = encoder.node_style(&Node::function("f", "a.py").with_calls(10), None);
        assert_eq!(style.color, module_color("a.py"));
    }

    #[test]
    fn test_hot_scale_grows_logarithmically() {
        let encoder = encoder();
        let scale = |calls| encoder.node_style(&Node::function("f", "m").with_calls(calls), None).scale;

        let s20 = scale(20);
        let s200 = scale(200);
        let s2000 = scale(2000);
        assert!(s20 < s200 && s200 < s2000 || s2000 == encoder.config().max_scale);
        // Tenfold calls add roughly a constant step, not a tenfold size
        assert!((s2000 - s200) - (s200 - s20) < 0.05);
        assert!(scale(u64::MAX) <= encoder.config().max_scale);
    }

    #[test]
    fn test_module_color_is_stable() {
        let encoder = encoder();
        let a = encoder.node_style(&Node::function("f", "services/api.py"), None);
        let b = encoder.node_style(&Node::function("g", "services/api.py"), None);
        assert_eq!(a.color, b.color);
        assert_eq!(module_color("services/api.py"), a.color);
    }

    #[test]
    fn test_depth_darkens_monotonically_within_module_hue() {
        let encoder = encoder();
        let node = Node::function("f", "core.py");
        let base = Hsla::from(module_color("core.py"));

        let mut last_lightness = f32::INFINITY;
        for depth in 0..8 {
            let hsla = Hsla::from(encoder.node_style(&node, Some(depth)).color);
            assert!(hsla.lightness < last_lightness || depth == 0);
            last_lightness = hsla.lightness;

            let hue_delta = (hsla.hue - base.hue).rem_euclid(360.0);
            assert!(hue_delta <= encoder.config().depth_hue_shift + 1e-3);
        }
    }

    #[test]
    fn test_kind_modifies_scale() {
        let encoder = encoder();
        let function = encoder.node_style(&Node::function("f", "m"), None);
        let class = encoder.node_style(&Node::new("C", "C", "m", NodeKind::Class), None);
        let module = encoder.node_style(&Node::new("m", "m", "m", NodeKind::Module), None);
        assert!(function.scale < class.scale && class.scale < module.scale);
    }

    #[test]
    fn test_styles_always_bounded() {
        let encoder = encoder();
        for node in [
            Node::function("f", "m"),
            Node::function("f", "m").dead(),
            Node::function("f", "m").with_calls(u64::MAX),
            Node::new("m", "m", "", NodeKind::Module),
        ] {
            for depth in [None, Some(0), Some(u32::MAX)] {
                let style = encoder.node_style(&node, depth);
                assert!((0.0..=1.0).contains(&style.opacity));
                assert!(style.scale.is_finite() && style.scale >= MIN_NODE_SCALE);
            }
        }
    }

    #[test]
    fn test_edge_style() {
        let encoder = encoder();
        let a = Node::function("a", "m");
        let b = Node::function("b", "m");
        let style = encoder.node_style(&a, None);

        let (_, single) = encoder.edge_style(&a, &b, &style, 1);
        let (_, frequent) = encoder.edge_style(&a, &b, &style, 50);
        assert!(frequent > single);
        assert!(frequent <= EDGE_MAX_OPACITY);

        let (color, opacity) = encoder.edge_style(&a, &b.clone().dead(), &style, 50);
        assert_eq!(color, COLOR_EDGE_DEAD);
        assert_eq!(opacity, EDGE_DEAD_OPACITY);
    }
}
