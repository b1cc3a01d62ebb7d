//! End-to-end tests: analyzer JSON through layout, encoding, framing and transitions.

use codeweaver::config::{Config, LayoutConfig};
use codeweaver::encoding::{VisualEncoder, COLOR_DEAD};
use codeweaver::geometry::{CameraFramer, EdgeCurveGenerator};
use codeweaver::layout::LayoutAlgorithm;
use codeweaver::models::{GraphSnapshot, GraphStatistics};
use codeweaver::transition::{LayoutTransitionController, TransitionPhase};
use codeweaver::LayoutEngine;
use serial_test::serial;

const ANALYZER_OUTPUT: &str = r#"{
    "nodes": [
        {"id": "app.py", "type": "module", "file": "app.py", "label": "app", "dead": false, "callCount": 0},
        {"id": "app.py:main", "type": "function", "file": "app.py", "label": "main", "dead": false, "callCount": 1},
        {"id": "core.py:Engine", "type": "class", "file": "core.py", "label": "Engine", "dead": false, "callCount": 4},
        {"id": "core.py:run", "type": "function", "file": "core.py", "label": "run", "dead": false, "callCount": 25, "className": "Engine"},
        {"id": "core.py:step", "type": "function", "file": "core.py", "label": "step", "dead": false, "callCount": 3},
        {"id": "legacy.py:old", "type": "function", "file": "legacy.py", "label": "old", "dead": true, "callCount": 0}
    ],
    "edges": [
        {"source": "app.py", "target": "app.py:main", "type": "CALLS"},
        {"source": "app.py:main", "target": "core.py:Engine", "type": "CALLS"},
        {"source": "core.py:Engine", "target": "core.py:run", "type": "CALLS"},
        {"source": "core.py:run", "target": "core.py:step", "type": "CALLS", "callFrequency": 12},
        {"source": "core.py:step", "target": "core.py:step", "type": "CALLS"},
        {"source": "core.py:run", "target": "vendor.py:lib", "type": "CALLS"}
    ]
}"#;

fn engine(algorithm: LayoutAlgorithm) -> LayoutEngine {
    LayoutEngine::new(
        LayoutConfig::with_algorithm(algorithm).seeded(2024),
        VisualEncoder::default(),
        EdgeCurveGenerator::default(),
    )
}

#[test]
fn test_every_algorithm_produces_a_framed_scene() {
    let snapshot = GraphSnapshot::from_json(ANALYZER_OUTPUT).unwrap();
    let fov = CameraFramer::default().fov_y;

    for algorithm in LayoutAlgorithm::ALL {
        let scene = engine(algorithm).compute(&snapshot);

        assert_eq!(scene.nodes.len(), 6, "{algorithm}");
        assert_eq!(scene.edges.len(), 5, "{algorithm}");
        assert_eq!(scene.dropped_edges, 1, "{algorithm}");
        for node in &scene.nodes {
            assert!(node.position.is_finite(), "{algorithm}: {}", node.node.id);
            assert!(scene.camera.sees(node.position, fov), "{algorithm}: {}", node.node.id);
        }
        assert_eq!(scene.node("legacy.py:old").unwrap().style.color, COLOR_DEAD);
    }
}

#[test]
fn test_hierarchical_depths_follow_calls() {
    let snapshot = GraphSnapshot::from_json(ANALYZER_OUTPUT).unwrap();
    let scene = engine(LayoutAlgorithm::Hierarchical).compute(&snapshot);

    let depth = |id: &str| scene.node(id).unwrap().depth;
    assert_eq!(depth("app.py"), 0);
    assert_eq!(depth("app.py:main"), 0);
    assert_eq!(depth("core.py:Engine"), 1);
    assert_eq!(depth("core.py:run"), 2);
    assert_eq!(depth("core.py:step"), 3);

    let y = |id: &str| scene.node(id).unwrap().position.y;
    assert!(y("core.py:Engine") < y("app.py:main"));
    assert!(y("core.py:step") < y("core.py:run"));
}

#[test]
fn test_scene_json_shape() {
    let snapshot = GraphSnapshot::from_json(ANALYZER_OUTPUT).unwrap();
    let scene = engine(LayoutAlgorithm::Circular).compute(&snapshot);
    let value = serde_json::to_value(&scene).unwrap();

    let node = &value["nodes"][0];
    assert_eq!(node["id"], "app.py");
    assert_eq!(node["type"], "module");
    assert_eq!(node["position"].as_array().unwrap().len(), 3);
    let color = node["style"]["color"].as_str().unwrap();
    assert!(color.starts_with('#') && color.len() == 7, "{color}");

    let edge = &value["edges"][3];
    assert_eq!(edge["frequency"], 12);
    assert_eq!(edge["points"].as_array().unwrap().len(), 24);
    assert!(value["camera"]["position"].is_array());
    assert_eq!(value["dropped_edges"], 1);
}

#[test]
fn test_successive_scenes_transition_smoothly() {
    let snapshot = GraphSnapshot::from_json(ANALYZER_OUTPUT).unwrap();
    let first = engine(LayoutAlgorithm::Sphere).compute(&snapshot);
    let second = engine(LayoutAlgorithm::Hierarchical).compute(&snapshot);

    let mut controller = LayoutTransitionController::default();
    controller.push_snapshot(first.nodes.clone());
    controller.push_snapshot(second.nodes.clone());
    assert_eq!(controller.phase(), TransitionPhase::Transitioning);

    for node in &first.nodes {
        assert_eq!(controller.rendered_position(&node.node.id), Some(node.position));
    }

    let mut frame = 0;
    while controller.phase() == TransitionPhase::Transitioning {
        frame += 1;
        controller.tick(frame, 1.0 / 60.0);
        assert!(frame < 1000, "transition never settled");
    }
    for node in &second.nodes {
        assert_eq!(controller.rendered_position(&node.node.id), Some(node.position));
    }
}

#[test]
fn test_statistics_match_snapshot() {
    let snapshot = GraphSnapshot::from_json(ANALYZER_OUTPUT).unwrap();
    let stats = GraphStatistics::from_snapshot(&snapshot);

    assert_eq!(stats.node_count, 6);
    assert_eq!(stats.edge_count, 5);
    assert_eq!(stats.dropped_edges, 1);
    assert_eq!(stats.dead_code_count, 1);
    assert_eq!(stats.kind_counts["function"], 4);
    assert_eq!(stats.most_called[0].id, "core.py:run");
    assert_eq!(stats.max_depth, 3);
}

#[test]
#[serial]
fn test_config_from_files_and_environment_drives_engine() {
    let dir = tempfile::tempdir().unwrap();
    let project = dir.path().join(".codeweaver.toml");
    std::fs::write(
        &project,
        "[layout]\nalgorithm = \"circular\"\nseed = 7\n\n[encoding]\ncurve_samples = 8\n",
    )
    .unwrap();

    std::env::set_var("CODEWEAVER_LAYOUT__ALGORITHM", "hierarchical");
    let config = Config::load_from(dir.path().join("missing.toml"), &project);
    std::env::remove_var("CODEWEAVER_LAYOUT__ALGORITHM");
    let config = config.unwrap();

    let engine = LayoutEngine::from_config(&config).unwrap();
    assert_eq!(engine.layout_config().algorithm(), LayoutAlgorithm::Hierarchical);
    assert_eq!(engine.layout_config().seed(), Some(7));

    let snapshot = GraphSnapshot::from_json(ANALYZER_OUTPUT).unwrap();
    let scene = engine.compute(&snapshot);
    assert!(scene.edges.iter().all(|e| e.points.len() == 8));
}
