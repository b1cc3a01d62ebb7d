//! ECS systems for the viewer.
//!
//! Systems are functions that operate on components and resources each frame.

pub mod camera;
pub mod edges;
pub mod nodes;
pub mod transition;
pub mod watch;

pub use camera::{camera_approach_system, camera_orbit_system};
pub use edges::draw_edges_system;
pub use nodes::sync_node_entities_system;
pub use transition::{advance_transition_system, apply_scene_system};
pub use watch::reload_snapshot_system;
