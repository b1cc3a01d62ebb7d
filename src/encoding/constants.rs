//! Colors and sizing constants for node and edge encoding.

use bevy::prelude::*;

// =============================================================================
// Module Palette
// =============================================================================

/// Base colors assigned to modules by hash.
pub const MODULE_PALETTE: [Color; 10] = [
    Color::srgb(0.29, 0.56, 0.85), // #4A90D9 blue
    Color::srgb(0.36, 0.72, 0.36), // #5CB85C green
    Color::srgb(0.6, 0.4, 0.8),    // purple
    Color::srgb(0.3, 0.7, 0.9),    // cyan
    Color::srgb(0.8, 0.3, 0.5),    // pink
    Color::srgb(0.5, 0.8, 0.4),    // light green
    Color::srgb(0.95, 0.55, 0.25), // orange
    Color::srgb(0.25, 0.75, 0.65), // teal
    Color::srgb(0.85, 0.45, 0.35), // coral
    Color::srgb(0.55, 0.6, 0.95),  // periwinkle
];

// =============================================================================
// State Colors
// =============================================================================

/// Dead code color (muted dark gray).
pub const COLOR_DEAD: Color = Color::srgb(0.22, 0.22, 0.24);
/// Hot (heavily called) node color (Gold).
pub const COLOR_HOT: Color = Color::srgb(1.0, 0.84, 0.0); // #FFD700
/// Hot node glow.
pub const COLOR_HOT_EMISSIVE: Color = Color::srgb(0.6, 0.35, 0.0);
/// No emission.
pub const COLOR_NO_EMISSION: Color = Color::BLACK;

// =============================================================================
// Edge Colors
// =============================================================================

/// Edge touching dead code.
pub const COLOR_EDGE_DEAD: Color = Color::srgb(0.3, 0.3, 0.3);
/// Neutral gray that live edge colors are blended toward.
pub const COLOR_EDGE_NEUTRAL: Color = Color::srgb(0.5, 0.5, 0.5);

// =============================================================================
// Sizing and Opacity
// =============================================================================

/// Scale of a live function node.
pub const BASE_NODE_SCALE: f32 = 1.0;
/// Scale multiplier for dead nodes.
pub const DEAD_SCALE_FACTOR: f32 = 0.6;
/// Opacity multiplier for dead nodes.
pub const DEAD_OPACITY: f32 = 0.35;
/// Smallest scale any node may get.
pub const MIN_NODE_SCALE: f32 = 0.1;
/// Emission strength of normal nodes relative to their base color.
pub const BASE_EMISSIVE_FACTOR: f32 = 0.15;

/// Opacity of edges touching dead code.
pub const EDGE_DEAD_OPACITY: f32 = 0.12;
/// Opacity of a single-call edge.
pub const EDGE_BASE_OPACITY: f32 = 0.35;
/// Extra edge opacity per unit of `ln(frequency)`.
pub const EDGE_OPACITY_PER_LOG: f32 = 0.12;
/// Upper bound on edge opacity.
pub const EDGE_MAX_OPACITY: f32 = 0.9;
