//! Whole-pipeline runs checked against the expected shape of the resulting dungeon.

use pretty_assertions::assert_eq;
use rstest::rstest;

use dungen::math::{FreeVector, GridCoordinate, GridPoint};
use dungen::rules::{
    ConflictStrategy, GridPathfinderConfig, LatticeMode, PathDirection, PathStart,
    PathWalkerConfig, ResizeConfig,
};
use dungen::{ConfigError, GenError, Pipeline, PipelineConfig, RuleConfig, RuleSettings};

fn p(x: i32, y: i32, z: i32) -> GridPoint {
    GridPoint::new(x, y, z)
}

fn walker(name: &str, start: GridPoint, direction: PathDirection, length: usize) -> RuleConfig {
    PathWalkerConfig {
        category: format!("path:{name}"),
        start: PathStart::Coordinates(start),
        direction,
        min_length: length,
        max_length: length,
        ..PathWalkerConfig::new(name)
    }
    .into()
}

fn pipeline(rules: Vec<RuleConfig>) -> Pipeline {
    Pipeline::from_config(PipelineConfig {
        seed: 0x5eed,
        rules,
        ..PipelineConfig::default()
    })
    .unwrap()
}

#[test]
fn forward_walk_of_three() {
    let mut pipeline = pipeline(vec![walker("main", p(0, 0, 0), PathDirection::Forward, 3)]);
    assert!(pipeline.generate().is_success());

    let dungeon = pipeline.dungeon();
    let expected = [p(0, 0, 0), p(0, 0, 1), p(0, 0, 2), p(0, 0, 3)];
    assert_eq!(dungeon.chunks_with_categories(&["path:main"]), expected);
    assert_eq!(dungeon.graph().edges().len(), 3);
    assert_eq!(dungeon.connectors().count(), 3);
    for pair in expected.windows(2) {
        assert!(dungeon.graph().neighbors(&pair[0]).contains(&pair[1]));
        assert!(dungeon.graph().neighbors(&pair[1]).contains(&pair[0]));
    }
}

#[rstest]
fn walk_length_gives_chunk_count(#[values(0, 1, 7)] length: usize) {
    let mut pipeline = pipeline(vec![walker("main", p(0, 0, 0), PathDirection::Up, length)]);
    assert!(pipeline.generate().is_success());
    assert_eq!(pipeline.dungeon().chunk_count(), length + 1);
    assert_eq!(
        pipeline.dungeon().graph().bfs(p(0, 0, 0)).len(),
        length + 1
    );
}

#[test]
fn branch_from_main_path() {
    let mut pipeline = pipeline(vec![
        walker("main", p(0, 0, 0), PathDirection::Forward, 4),
        PathWalkerConfig {
            category: "path:branch".into(),
            start: PathStart::Path {
                path: "main".into(),
                min_index: 2,
                max_index: 3,
            },
            direction: PathDirection::Left,
            min_length: 2,
            max_length: 2,
            ..PathWalkerConfig::new("branch")
        }
        .into(),
    ]);
    assert!(pipeline.generate().is_success());

    let dungeon = pipeline.dungeon();
    assert_eq!(
        dungeon.chunks_with_categories(&["path:branch"]),
        [p(0, 0, 2), p(-1, 0, 2), p(-2, 0, 2)]
    );
    assert_eq!(dungeon.graph().neighbors(&p(0, 0, 2)).len(), 3);
    assert_eq!(dungeon.graph().bfs(p(-2, 0, 2)).len(), 7);
}

#[test]
fn horizontal_pathfinder_between_paths() {
    let mut pipeline = pipeline(vec![
        walker("a", p(0, 0, 0), PathDirection::Left, 1),
        walker("b", p(3, 0, 0), PathDirection::Right, 1),
        GridPathfinderConfig {
            padding: 1,
            start_min_index: 0,
            start_max_index: 0,
            end_min_index: 0,
            end_max_index: 0,
            ..GridPathfinderConfig::new("loop", "a", "b")
        }
        .into(),
    ]);
    assert!(pipeline.generate().is_success());

    let route = pipeline.dungeon().chunks_with_categories(&["path:loop"]);
    assert_eq!(route.len(), 4);
    assert!(route.iter().all(|coord| coord.y == route[0].y));
    assert_eq!(pipeline.dungeon().graph().bfs(p(-1, 0, 0)).len(), 6);
}

#[rstest]
fn vertical_pathfinder_stays_in_column(#[values(0, 1, 2, 3)] seed: u64) {
    let mut pipeline = Pipeline::new(PipelineConfig {
        seed,
        rules: vec![
            walker("low", p(1, 0, 1), PathDirection::Right, 2),
            walker("high", p(1, 5, 1), PathDirection::Forward, 2),
            GridPathfinderConfig {
                mode: LatticeMode::Vertical,
                start_min_index: 0,
                start_max_index: 0,
                end_min_index: 0,
                end_max_index: 0,
                ..GridPathfinderConfig::new("shaft", "low", "high")
            }
            .into(),
        ],
        ..PipelineConfig::default()
    });
    assert!(pipeline.generate().is_success());

    let route = pipeline.dungeon().chunks_with_categories(&["path:loop"]);
    assert_eq!(route.len(), 6);
    for coord in route {
        assert_eq!((coord.x, coord.z), (1, 1), "{coord:?}");
    }
}

#[test]
fn resize_on_disconnected_components() {
    let mut pipeline = pipeline(vec![
        walker("a", p(0, 0, 0), PathDirection::Forward, 2),
        walker("b", p(10, 0, 0), PathDirection::Forward, 2),
        ResizeConfig {
            categories: vec!["path:a".into()],
            sizes: vec![FreeVector::new(8.0, 2.0, 8.0)],
            ..ResizeConfig::new("rooms")
        }
        .into(),
    ]);
    let report = pipeline.generate();

    assert!(report.stopped);
    assert_eq!(
        report.diagnostics[0].error,
        GenError::DisconnectedGraph {
            reached: 3,
            total: 6
        }
    );
    let dungeon = pipeline.dungeon();
    // Sizes were assigned, but nothing was laid out again.
    assert_eq!(
        dungeon.chunk(p(0, 0, 1)).unwrap().size(),
        FreeVector::new(8.0, 2.0, 8.0)
    );
    assert_eq!(dungeon.chunk(p(0, 0, 1)).unwrap().position().z, 9.5);
    assert_eq!(dungeon.chunk(p(10, 0, 0)).unwrap().position().x, 65.0);
}

#[test]
fn walker_merges_chunks_tagged_later() {
    // "side" runs beside "main" and gives its chunks main's category; main adopts them.
    let mut pipeline = pipeline(vec![
        walker("main", p(0, 0, 0), PathDirection::Forward, 2),
        PathWalkerConfig {
            category: "path:main".into(),
            start: PathStart::Coordinates(p(1, 0, 3)),
            direction: PathDirection::Backward,
            conflict: ConflictStrategy::Stop,
            min_length: 1,
            max_length: 1,
            ..PathWalkerConfig::new("side")
        }
        .into(),
    ]);
    assert!(pipeline.generate().is_success());

    let graph = pipeline.dungeon().graph();
    assert!(graph.neighbors(&p(1, 0, 2)).contains(&p(0, 0, 2)));
    assert_eq!(graph.bfs(p(0, 0, 0)).len(), 5);
}

#[test]
fn start_conflict_stops_generation() {
    let mut pipeline = pipeline(vec![
        walker("main", p(0, 0, 0), PathDirection::Forward, 3),
        walker("again", p(0, 0, 1), PathDirection::Right, 3),
        walker("never", p(5, 5, 5), PathDirection::Right, 3),
    ]);
    let report = pipeline.generate();
    assert!(report.stopped);
    assert_eq!(report.diagnostics.len(), 1);
    assert_eq!(report.diagnostics[0].rule, "again");
    assert_eq!(
        report.diagnostics[0].error,
        GenError::StartConflict { coord: p(0, 0, 1) }
    );
    assert!(pipeline.dungeon().chunk(p(5, 5, 5)).is_none());
}

#[test]
fn failures_without_stop_are_advisory() {
    let mut pipeline = pipeline(vec![
        walker("main", p(0, 0, 0), PathDirection::Forward, 3),
        PathWalkerConfig {
            settings: RuleSettings {
                stop_on_error: false,
                ..RuleSettings::default()
            },
            start: PathStart::Path {
                path: "missing".into(),
                min_index: 0,
                max_index: 1,
            },
            ..PathWalkerConfig::new("lost")
        }
        .into(),
        walker("later", p(5, 5, 5), PathDirection::Right, 1),
    ]);
    let report = pipeline.generate();
    assert!(!report.stopped);
    assert_eq!(report.diagnostics.len(), 1);
    assert_eq!(
        report.diagnostics[0].to_string(),
        "[lost]: there is no path named \"missing\""
    );
    assert!(pipeline.dungeon().chunk(p(6, 5, 5)).is_some());
}

#[test]
fn start_at_grid_limit_is_reported() {
    let limit = p(GridCoordinate::MAX, 0, 0);
    let mut pipeline = pipeline(vec![walker("edge", limit, PathDirection::Right, 2)]);
    let report = pipeline.generate();
    assert!(report.stopped);
    assert_eq!(
        report.diagnostics[0].error,
        GenError::Configuration(ConfigError::CoordinateOutOfRange(limit))
    );
}

#[test]
fn pathfinder_beside_grid_limit() {
    let x = GridCoordinate::MAX - 1;
    let mut pipeline = pipeline(vec![
        walker("a", p(x, 0, 0), PathDirection::Backward, 1),
        walker("b", p(x, 0, 3), PathDirection::Forward, 1),
        GridPathfinderConfig {
            start_min_index: 0,
            start_max_index: 0,
            end_min_index: 0,
            end_max_index: 0,
            ..GridPathfinderConfig::new("loop", "a", "b")
        }
        .into(),
        walker("past", p(x, 5, 0), PathDirection::Right, 1),
    ]);
    let report = pipeline.generate();

    let route = pipeline.dungeon().chunks_with_categories(&["path:loop"]);
    // In creation order: the two endpoints came from the walkers.
    assert_eq!(route, [p(x, 0, 0), p(x, 0, 3), p(x, 0, 1), p(x, 0, 2)]);
    assert!(report.stopped);
    assert_eq!(report.diagnostics.len(), 1);
    assert_eq!(report.diagnostics[0].rule, "past");
    assert_eq!(
        report.diagnostics[0].error,
        GenError::NoRouteFound { from: p(x, 5, 0) }
    );
}

#[test]
fn config_file_round_trip() {
    let config: PipelineConfig = serde_json::from_str(
        r#"{
            "seed": 3,
            "rules": [
                { "type": "path_walker", "name": "main", "direction": "random",
                  "min_length": 6, "max_length": 6, "conflict": "stop" },
                { "type": "resize", "name": "rooms" }
            ]
        }"#,
    )
    .unwrap();
    let mut pipeline = Pipeline::from_config(config).unwrap();
    let report = pipeline.generate();
    assert_eq!(report.seed, 3);
    assert!(report.is_success(), "{:?}", report.diagnostics);
    assert_eq!(pipeline.dungeon().chunk_count(), 7);
    for chunk in pipeline.dungeon().chunks() {
        assert_eq!(chunk.size(), FreeVector::new(10.0, 5.0, 10.0));
    }
}
