//! Runs the bundled example script end to end.

use playboard_cli::{parse, RunConfig, Step};
use playboard_core::{CourtMode, Team};
use playboard_renderer::DrawOp;

const GIVE_AND_GO: &str = include_str!("../scripts/give-and-go.json");

#[test]
fn test_bundled_script_runs_and_plays() {
    let steps = parse(GIVE_AND_GO).expect("bundled script parses");
    assert!(steps.iter().any(|s| matches!(s, Step::Drag(_))));

    let mut runner = RunConfig::default().runner().expect("runner");
    runner.run(&steps).expect("script runs");

    let summary = runner.summary();
    assert_eq!(summary.players, 3);
    assert_eq!(summary.drawings, 1);
    assert_eq!(summary.paths, 2);
    assert!(summary.advisories.is_empty());

    let scene = runner.editor().scene();
    let labels: Vec<_> = scene
        .players()
        .filter_map(|t| t.player_info())
        .map(|info| (info.label.as_str(), info.team, info.has_ball))
        .collect();
    assert_eq!(
        labels,
        [("7", Team::One, true), ("2", Team::One, false), ("3", Team::Two, false)]
    );

    // 40 moves + seed on the longest path.
    let ticks = runner.play_to_end().expect("play");
    assert_eq!(ticks, 42);
    assert!(runner.surface().ops().iter().any(|op| matches!(op, DrawOp::Text { .. })));
}

#[test]
fn test_full_court_surface_size() {
    let config = RunConfig {
        court: CourtMode::Full,
        max_width: 2000.0,
        max_height: 600.0,
        ..RunConfig::default()
    };
    let mut runner = config.runner().expect("runner");
    runner
        .run(&parse(r#"["render"]"#).expect("parse"))
        .expect("render");
    assert_eq!(runner.editor().court(), CourtMode::Full);
    assert_eq!(
        playboard_renderer::Surface::width(runner.surface()),
        1100
    );
}
