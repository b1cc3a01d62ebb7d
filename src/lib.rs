//! Code Weaver - layout and visual encoding for code call graphs.
//!
//! Turns an analyzer's node/edge lists into positioned, styled nodes, curved
//! edges and a camera frame, and animates between successive layouts.

pub mod cli;
pub mod config;
pub mod encoding;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod models;
pub mod transition;
pub mod visualization;

pub use engine::LayoutEngine;
pub use error::{AppError, Result};
