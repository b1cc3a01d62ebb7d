//! Animated interpolation between successive layouts.
//!
//! ```text
//! Idle --snapshot--> Settled --snapshot--> Transitioning --elapsed >= duration--> Settled
//!                                            |      ^
//!                                            +------+ snapshot (restarts from rendered positions)
//! ```
//!
//! The controller is advanced by the host frame loop through
//! [`LayoutTransitionController::tick`]. Each frame number is applied at most
//! once, so re-running a frame (e.g. on resize) never double-advances.

use std::collections::HashMap;

use bevy::math::Vec3;

use crate::config::TransitionConfig;
use crate::models::PositionedNode;

/// `1 - (1 - t)³`, with `t` clamped to `[0, 1]`.
pub fn ease_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

/// Elapsed time toward a fixed duration, advanced once per frame number.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameClock {
    elapsed: f32,
    duration: f32,
    last_frame: Option<u64>,
}

impl FrameClock {
    pub fn new(duration: f32) -> Self {
        Self::resume(duration, None)
    }

    /// A fresh clock that treats `last_frame` as already applied.
    pub fn resume(duration: f32, last_frame: Option<u64>) -> Self {
        Self {
            elapsed: 0.0,
            duration: duration.max(f32::EPSILON),
            last_frame,
        }
    }

    /// Add `delta_secs` unless `frame` was already applied. Returns whether it advanced.
    pub fn advance(&mut self, frame: u64, delta_secs: f32) -> bool {
        if self.last_frame.is_some_and(|last| frame <= last) {
            return false;
        }
        self.last_frame = Some(frame);
        if delta_secs.is_finite() && delta_secs > 0.0 {
            self.elapsed = (self.elapsed + delta_secs).min(self.duration);
        }
        true
    }

    /// Linear progress in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        (self.elapsed / self.duration).clamp(0.0, 1.0)
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    pub fn last_frame(&self) -> Option<u64> {
        self.last_frame
    }
}

/// Observable controller state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionPhase {
    /// No snapshot received yet.
    Idle,
    /// Showing the latest layout at rest.
    Settled,
    /// Interpolating toward the latest layout.
    Transitioning,
}

/// An in-flight transition. Replaced, never patched, when a snapshot arrives.
#[derive(Debug, Clone)]
struct TransitionState {
    /// Start position per node id.
    previous: HashMap<String, Vec3>,
    /// Target layout.
    current: Vec<PositionedNode>,
    clock: FrameClock,
}

impl TransitionState {
    fn position_of(&self, node: &PositionedNode) -> Vec3 {
        match self.previous.get(&node.node.id) {
            Some(start) => start.lerp(node.position, ease_out_cubic(self.clock.progress())),
            // New nodes appear at their final position
            None => node.position,
        }
    }

    fn rendered_positions(&self) -> HashMap<String, Vec3> {
        self.current
            .iter()
            .map(|n| (n.node.id.clone(), self.position_of(n)))
            .collect()
    }
}

#[derive(Debug, Clone, Default)]
enum Phase {
    #[default]
    Idle,
    Settled(Vec<PositionedNode>),
    Transitioning(TransitionState),
}

/// Owns the transition state between layout passes.
#[derive(Debug, Clone)]
pub struct LayoutTransitionController {
    duration: f32,
    phase: Phase,
    last_frame: Option<u64>,
}

impl Default for LayoutTransitionController {
    fn default() -> Self {
        Self::new(&TransitionConfig::default())
    }
}

impl LayoutTransitionController {
    pub fn new(config: &TransitionConfig) -> Self {
        Self {
            duration: config.duration_secs,
            phase: Phase::Idle,
            last_frame: None,
        }
    }

    pub fn phase(&self) -> TransitionPhase {
        match self.phase {
            Phase::Idle => TransitionPhase::Idle,
            Phase::Settled(_) => TransitionPhase::Settled,
            Phase::Transitioning(_) => TransitionPhase::Transitioning,
        }
    }

    /// Linear progress of the current transition; 1 when settled, 0 when idle.
    pub fn progress(&self) -> f32 {
        match &self.phase {
            Phase::Idle => 0.0,
            Phase::Settled(_) => 1.0,
            Phase::Transitioning(state) => state.clock.progress(),
        }
    }

    /// The latest layout (transition target).
    pub fn current(&self) -> &[PositionedNode] {
        match &self.phase {
            Phase::Idle => &[],
            Phase::Settled(nodes) => nodes,
            Phase::Transitioning(state) => &state.current,
        }
    }

    /// Accept a new layout result.
    ///
    /// Mid-transition, the new transition starts from what is on screen now,
    /// not from the old transition's starting point.
    pub fn push_snapshot(&mut self, nodes: Vec<PositionedNode>) {
        let previous = match std::mem::take(&mut self.phase) {
            Phase::Idle => {
                self.phase = Phase::Settled(nodes);
                return;
            }
            Phase::Settled(old) => old
                .into_iter()
                .map(|n| (n.node.id, n.position))
                .collect(),
            Phase::Transitioning(state) => state.rendered_positions(),
        };

        tracing::debug!(
            nodes = nodes.len(),
            matched = nodes.iter().filter(|n| previous.contains_key(&n.node.id)).count(),
            "Starting layout transition"
        );

        self.phase = Phase::Transitioning(TransitionState {
            previous,
            current: nodes,
            clock: FrameClock::resume(self.duration, self.last_frame),
        });
    }

    /// Advance by one host frame. Repeated calls with the same `frame` are no-ops.
    pub fn tick(&mut self, frame: u64, delta_secs: f32) {
        if self.last_frame.is_some_and(|last| frame <= last) {
            return;
        }
        self.last_frame = Some(frame);

        let finished = match &mut self.phase {
            Phase::Transitioning(state) => {
                state.clock.advance(frame, delta_secs);
                state.clock.is_finished()
            }
            _ => false,
        };
        if finished {
            if let Phase::Transitioning(done) = std::mem::take(&mut self.phase) {
                self.phase = Phase::Settled(done.current);
            }
        }
    }

    /// Where a node is drawn this frame.
    pub fn rendered_position(&self, id: &str) -> Option<Vec3> {
        match &self.phase {
            Phase::Idle => None,
            Phase::Settled(nodes) => nodes.iter().find(|n| n.node.id == id).map(|n| n.position),
            Phase::Transitioning(state) => state
                .current
                .iter()
                .find(|n| n.node.id == id)
                .map(|n| state.position_of(n)),
        }
    }

    /// Drawn position of every node in the latest layout, keyed by id.
    pub fn rendered_positions(&self) -> HashMap<String, Vec3> {
        match &self.phase {
            Phase::Idle => HashMap::new(),
            Phase::Settled(nodes) => nodes
                .iter()
                .map(|n| (n.node.id.clone(), n.position))
                .collect(),
            Phase::Transitioning(state) => state.rendered_positions(),
        }
    }

    /// The latest layout with positions as drawn this frame.
    pub fn rendered(&self) -> Vec<PositionedNode> {
        match &self.phase {
            Phase::Idle => Vec::new(),
            Phase::Settled(nodes) => nodes.clone(),
            Phase::Transitioning(state) => state
                .current
                .iter()
                .map(|n| PositionedNode {
                    position: state.position_of(n),
                    ..n.clone()
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Node, NodeStyle};
    use bevy::color::Color;

    const DURATION: f32 = 1.0;

    fn positioned(id: &str, position: Vec3) -> PositionedNode {
        PositionedNode {
            node: Node::function(id, "m"),
            position,
            depth: 0,
            style: NodeStyle {
                color: Color::WHITE,
                emissive: Color::BLACK,
                opacity: 1.0,
                scale: 1.0,
            },
        }
    }

    fn controller() -> LayoutTransitionController {
        LayoutTransitionController::new(&TransitionConfig {
            duration_secs: DURATION,
        })
    }

    #[test]
    fn test_ease_out_cubic_endpoints() {
        assert_eq!(ease_out_cubic(0.0), 0.0);
        assert_eq!(ease_out_cubic(1.0), 1.0);
        assert_eq!(ease_out_cubic(0.5), 0.875);
        assert_eq!(ease_out_cubic(2.0), 1.0);
    }

    #[test]
    fn test_first_snapshot_settles_immediately() {
        let mut controller = controller();
        assert_eq!(controller.phase(), TransitionPhase::Idle);
        assert_eq!(controller.rendered_position("a"), None);

        controller.push_snapshot(vec![positioned("a", Vec3::X)]);
        assert_eq!(controller.phase(), TransitionPhase::Settled);
        assert_eq!(controller.rendered_position("a"), Some(Vec3::X));
    }

    #[test]
    fn test_progress_endpoints() {
        let mut controller = controller();
        controller.push_snapshot(vec![positioned("a", Vec3::ZERO)]);
        controller.push_snapshot(vec![
            positioned("a", Vec3::new(10.0, 0.0, 0.0)),
            positioned("new", Vec3::new(0.0, 5.0, 0.0)),
        ]);

        assert_eq!(controller.phase(), TransitionPhase::Transitioning);
        assert_eq!(controller.progress(), 0.0);
        assert_eq!(controller.rendered_position("a"), Some(Vec3::ZERO));
        // Unmatched nodes skip interpolation
        assert_eq!(controller.rendered_position("new"), Some(Vec3::new(0.0, 5.0, 0.0)));

        controller.tick(1, DURATION / 2.0);
        let mid = controller.rendered_position("a").unwrap();
        assert!((mid.x - 8.75).abs() < 1e-4);

        controller.tick(2, DURATION);
        assert_eq!(controller.phase(), TransitionPhase::Settled);
        assert_eq!(controller.progress(), 1.0);
        assert_eq!(controller.rendered_position("a"), Some(Vec3::new(10.0, 0.0, 0.0)));
    }

    #[test]
    fn test_same_frame_does_not_double_advance() {
        let mut controller = controller();
        controller.push_snapshot(vec![positioned("a", Vec3::ZERO)]);
        controller.push_snapshot(vec![positioned("a", Vec3::X)]);

        controller.tick(7, 0.25);
        controller.tick(7, 0.25);
        controller.tick(6, 0.25);
        assert!((controller.progress() - 0.25).abs() < 1e-6);

        controller.tick(8, 0.25);
        assert!((controller.progress() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_snapshot_in_frame_already_ticked_waits_for_next_frame() {
        let mut controller = controller();
        controller.push_snapshot(vec![positioned("a", Vec3::ZERO)]);
        controller.tick(3, 0.1);
        controller.push_snapshot(vec![positioned("a", Vec3::X)]);

        controller.tick(3, 0.1);
        assert_eq!(controller.progress(), 0.0);
        controller.tick(4, 0.1);
        assert!(controller.progress() > 0.0);
    }

    #[test]
    fn test_interrupted_transition_continues_from_rendered_position() {
        let mut controller = controller();
        controller.push_snapshot(vec![positioned("a", Vec3::ZERO)]);
        controller.push_snapshot(vec![positioned("a", Vec3::new(10.0, 0.0, 0.0))]);
        controller.tick(1, DURATION / 2.0);
        let on_screen = controller.rendered_position("a").unwrap();

        controller.push_snapshot(vec![positioned("a", Vec3::new(20.0, 0.0, 0.0))]);
        assert_eq!(controller.progress(), 0.0);
        assert_eq!(controller.rendered_position("a"), Some(on_screen));

        // Moves forward from there, never back toward the first origin
        controller.tick(2, DURATION / 10.0);
        let next = controller.rendered_position("a").unwrap();
        assert!(next.x > on_screen.x);
    }

    #[test]
    fn test_rendered_matches_rendered_position() {
        let mut controller = controller();
        controller.push_snapshot(vec![positioned("a", Vec3::ZERO), positioned("b", Vec3::Y)]);
        controller.push_snapshot(vec![positioned("a", Vec3::X), positioned("b", Vec3::Z)]);
        controller.tick(1, 0.3);

        let by_id = controller.rendered_positions();
        for node in controller.rendered() {
            assert_eq!(Some(node.position), controller.rendered_position(&node.node.id));
            assert_eq!(by_id.get(&node.node.id), Some(&node.position));
        }
        assert_eq!(controller.current().len(), 2);
    }

    #[test]
    fn test_frame_clock() {
        let mut clock = FrameClock::new(2.0);
        assert!(clock.advance(0, 1.0));
        assert!(!clock.advance(0, 1.0));
        assert_eq!(clock.progress(), 0.5);
        assert!(clock.advance(1, 5.0));
        assert!(clock.is_finished());
        assert_eq!(clock.progress(), 1.0);
        assert_eq!(clock.last_frame(), Some(1));
    }
}
