//! Edge drawing.

use bevy::prelude::*;

use crate::visualization::resources::{SceneRes, TransitionRes};

/// Move a sampled curve along with its endpoints.
///
/// Each point is displaced by a blend of the source and target displacement,
/// weighted by its position along the curve, so the endpoints land exactly
/// on the drawn nodes while the curve keeps its shape.
pub fn shifted_points(points: &[Vec3], source_shift: Vec3, target_shift: Vec3) -> Vec<Vec3> {
    let last = points.len().saturating_sub(1).max(1) as f32;
    points
        .iter()
        .enumerate()
        .map(|(i, p)| *p + source_shift.lerp(target_shift, i as f32 / last))
        .collect()
}

/// Draw every edge of the current scene as a line strip.
pub fn draw_edges_system(mut gizmos: Gizmos, scene: Res<SceneRes>, transition: Res<TransitionRes>) {
    let rendered = transition.0.rendered_positions();
    let shift = |id: &str, settled: Option<&Vec3>| match (rendered.get(id), settled) {
        (Some(drawn), Some(settled)) => *drawn - *settled,
        _ => Vec3::ZERO,
    };

    for edge in &scene.0.edges {
        let source_shift = shift(&edge.edge.source, edge.points.first());
        let target_shift = shift(&edge.edge.target, edge.points.last());
        gizmos.linestrip(
            shifted_points(&edge.points, source_shift, target_shift),
            edge.color.with_alpha(edge.opacity),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shifted_points_follow_endpoints() {
        let points = vec![Vec3::ZERO, Vec3::new(1.0, 1.0, 0.0), Vec3::new(2.0, 0.0, 0.0)];
        let shifted = shifted_points(&points, Vec3::Y, Vec3::Z);

        assert_eq!(shifted[0], Vec3::Y);
        assert_eq!(shifted[2], Vec3::new(2.0, 0.0, 1.0));
        assert_eq!(shifted[1], Vec3::new(1.0, 1.5, 0.5));
    }

    #[test]
    fn test_no_shift_keeps_curve() {
        let points = vec![Vec3::ZERO, Vec3::ONE];
        assert_eq!(shifted_points(&points, Vec3::ZERO, Vec3::ZERO), points);
        assert!(shifted_points(&[], Vec3::X, Vec3::Y).is_empty());
    }
}
