//! Editor Scenario Tests
//!
//! End-to-end pointer/command sequences:
//! - Path recording on and off
//! - Concatenation of successive recorded drags
//! - Arrow commit and erase
//! - Playback with position restore

use playboard_core::{
    Command, Drawing, Editor, InputEvent, KeyEvent, Point, PointerEvent, PointerPhase, TokenId,
    Tool, TouchEvent, TouchPhase, TouchPoint,
};

fn down(editor: &mut Editor, x: f32, y: f32) {
    editor.handle_pointer(&PointerEvent::new(PointerPhase::Down, x, y));
}

fn drag(editor: &mut Editor, from: (f32, f32), to: (f32, f32), steps: u16) {
    down(editor, from.0, from.1);
    for i in 1..=steps {
        let t = f32::from(i) / f32::from(steps);
        editor.handle_pointer(&PointerEvent::new(
            PointerPhase::Move,
            from.0 + (to.0 - from.0) * t,
            from.1 + (to.1 - from.1) * t,
        ));
    }
    editor.handle_pointer(&PointerEvent::new(PointerPhase::Up, to.0, to.1));
}

fn place_player(editor: &mut Editor, x: f32, y: f32) -> TokenId {
    down(editor, x, y);
    editor.handle_pointer(&PointerEvent::new(PointerPhase::Up, x, y));
    editor.scene().selected_id().expect("placed player is selected")
}

fn close(a: Point, b: Point) -> bool {
    a.distance_to(b) < 1e-3
}

// ============================================================================
// Path Recording
// ============================================================================

#[test]
fn test_drag_without_recording_leaves_path_empty() {
    let mut editor = Editor::default();
    let a = place_player(&mut editor, 100.0, 100.0);

    drag(&mut editor, (100.0, 100.0), (150.0, 120.0), 5);

    let token = editor.scene().token(a).expect("player");
    assert!(close(token.position, Point::new(150.0, 120.0)));
    assert!(token.path.is_empty());
}

#[test]
fn test_recorded_drag_samples_path() {
    let mut editor = Editor::default();
    let a = place_player(&mut editor, 100.0, 100.0);
    drag(&mut editor, (100.0, 100.0), (150.0, 120.0), 5);

    editor.execute(Command::TogglePathRecording).expect("toggle");
    drag(&mut editor, (150.0, 120.0), (200.0, 200.0), 10);

    let path = &editor.scene().token(a).expect("player").path;
    assert_eq!(path.len(), 11, "seed point plus one per move");
    assert!(close(path[0], Point::new(150.0, 120.0)));
    assert!(close(path[path.len() - 1], Point::new(200.0, 200.0)));
}

#[test]
fn test_successive_recorded_drags_concatenate() {
    let mut editor = Editor::default();
    let a = place_player(&mut editor, 0.0, 0.0);
    editor.execute(Command::TogglePathRecording).expect("toggle");

    drag(&mut editor, (0.0, 0.0), (30.0, 0.0), 3);
    let first = editor.scene().token(a).expect("player").path.clone();
    assert_eq!(first.len(), 4);

    editor.execute(Command::TogglePathRecording).expect("stop");
    editor.execute(Command::TogglePathRecording).expect("start again");
    drag(&mut editor, (30.0, 0.0), (30.0, 20.0), 2);

    let path = &editor.scene().token(a).expect("player").path;
    let second = [
        Point::new(30.0, 0.0),
        Point::new(30.0, 10.0),
        Point::new(30.0, 20.0),
    ];
    assert_eq!(path.len(), first.len() + second.len());
    assert_eq!(&path[..first.len()], first.as_slice());
    for (got, want) in path[first.len()..].iter().zip(second) {
        assert!(close(*got, want));
    }
}

#[test]
fn test_click_without_move_records_nothing() {
    let mut editor = Editor::default();
    let a = place_player(&mut editor, 50.0, 50.0);
    editor.execute(Command::TogglePathRecording).expect("toggle");
    drag(&mut editor, (50.0, 50.0), (50.0, 50.0), 0);
    assert!(editor.scene().token(a).expect("player").path.is_empty());
}

#[test]
fn test_leave_mid_drag_keeps_recording() {
    let mut editor = Editor::default();
    let a = place_player(&mut editor, 50.0, 50.0);
    editor.execute(Command::TogglePathRecording).expect("toggle");
    down(&mut editor, 50.0, 50.0);
    editor.handle_pointer(&PointerEvent::new(PointerPhase::Move, 80.0, 50.0));
    editor.handle_pointer(&PointerEvent::new(PointerPhase::Leave, 900.0, 900.0));

    assert!(!editor.is_gesture_active());
    assert_eq!(editor.scene().token(a).expect("player").path.len(), 2);
}

// ============================================================================
// Annotations
// ============================================================================

#[test]
fn test_arrow_commit_records_coordinates() {
    let mut editor = Editor::default();
    editor
        .execute(Command::SetTool { tool: Tool::Arrow })
        .expect("tool");
    drag(&mut editor, (10.0, 10.0), (10.0, 25.0), 3);

    let drawings = editor.scene().drawings();
    assert_eq!(drawings.len(), 1);
    match &drawings[0] {
        Drawing::Arrow(arrow) => {
            assert_eq!(arrow.start, Point::new(10.0, 10.0));
            assert_eq!(arrow.end, Point::new(10.0, 25.0));
        }
        other => panic!("expected arrow, got {other:?}"),
    }
}

#[test]
fn test_erase_on_arrow_segment_removes_it() {
    let mut editor = Editor::default();
    editor
        .execute(Command::SetTool { tool: Tool::Arrow })
        .expect("tool");
    drag(&mut editor, (10.0, 10.0), (10.0, 25.0), 1);
    editor
        .execute(Command::SetTool { tool: Tool::Draw })
        .expect("tool");
    drag(&mut editor, (300.0, 300.0), (320.0, 300.0), 4);
    assert_eq!(editor.scene().drawings().len(), 2);

    editor
        .execute(Command::SetTool { tool: Tool::Erase })
        .expect("tool");
    down(&mut editor, 10.0, 18.0);

    let drawings = editor.scene().drawings();
    assert_eq!(drawings.len(), 1);
    assert!(matches!(drawings[0], Drawing::Stroke(_)));
}

#[test]
fn test_clear_drawings_keeps_tokens() {
    let mut editor = Editor::default();
    place_player(&mut editor, 200.0, 200.0);
    editor
        .execute(Command::SetTool { tool: Tool::Draw })
        .expect("tool");
    drag(&mut editor, (0.0, 0.0), (40.0, 40.0), 4);
    editor.execute(Command::ClearDrawings).expect("clear");
    assert!(editor.scene().drawings().is_empty());
    assert_eq!(editor.scene().token_count(), 1);
}

// ============================================================================
// Playback
// ============================================================================

#[test]
fn test_playback_runs_and_restores() {
    let mut editor = Editor::default();
    let a = place_player(&mut editor, 0.0, 0.0);
    editor.execute(Command::TogglePathRecording).expect("toggle");
    drag(&mut editor, (0.0, 0.0), (100.0, 0.0), 20);
    // Move away after recording, without recording.
    editor.execute(Command::TogglePathRecording).expect("toggle");
    drag(&mut editor, (100.0, 0.0), (100.0, 100.0), 2);

    editor.execute(Command::PlayPaths).expect("play");
    assert!(editor.is_playing());
    assert_eq!(editor.scene().token(a).expect("player").position, Point::new(0.0, 0.0));

    // A second request while active is ignored.
    editor.execute(Command::PlayPaths).expect("no-op");

    let mut ticks = 0;
    while editor.tick() {
        ticks += 1;
    }
    assert_eq!(ticks, 21);
    assert!(!editor.is_playing());
    assert!(close(
        editor.scene().token(a).expect("player").position,
        Point::new(100.0, 100.0)
    ));
}

#[test]
fn test_cancel_playback_restores_positions() {
    let mut editor = Editor::default();
    let a = place_player(&mut editor, 0.0, 0.0);
    editor.execute(Command::TogglePathRecording).expect("toggle");
    drag(&mut editor, (0.0, 0.0), (90.0, 0.0), 9);

    editor.execute(Command::PlayPaths).expect("play");
    editor.tick();
    editor.tick();
    editor.execute(Command::CancelPlayback).expect("cancel");

    assert!(!editor.is_playing());
    assert!(close(
        editor.scene().token(a).expect("player").position,
        Point::new(90.0, 0.0)
    ));
}

#[test]
fn test_play_drops_drag_in_progress() {
    let mut editor = Editor::default();
    let a = place_player(&mut editor, 100.0, 100.0);
    editor.execute(Command::TogglePathRecording).expect("toggle");
    drag(&mut editor, (100.0, 100.0), (200.0, 100.0), 10);
    assert_eq!(editor.scene().token(a).expect("player").path.len(), 11);

    // Button still held on the player when playback starts.
    down(&mut editor, 200.0, 100.0);
    assert_eq!(editor.dragging(), Some(a));
    editor.execute(Command::PlayPaths).expect("play");
    assert!(editor.is_playing());
    assert_eq!(editor.dragging(), None);

    editor.handle_pointer(&PointerEvent::new(PointerPhase::Move, 300.0, 300.0));
    editor.handle_pointer(&PointerEvent::new(PointerPhase::Move, 320.0, 320.0));
    editor.handle_pointer(&PointerEvent::new(PointerPhase::Up, 320.0, 320.0));

    let token = editor.scene().token(a).expect("player");
    assert!(!close(token.position, Point::new(320.0, 320.0)));
    assert_eq!(token.path.len(), 11);

    while editor.tick() {}
    assert!(close(
        editor.scene().token(a).expect("player").position,
        Point::new(200.0, 100.0)
    ));
}

#[test]
fn test_reset_during_playback_stops_it() {
    let mut editor = Editor::default();
    place_player(&mut editor, 0.0, 0.0);
    editor.execute(Command::TogglePathRecording).expect("toggle");
    drag(&mut editor, (0.0, 0.0), (90.0, 0.0), 9);
    editor.execute(Command::PlayPaths).expect("play");

    editor.execute(Command::ResetAll).expect("reset");
    assert!(!editor.is_playing());
    assert!(!editor.tick());
    assert!(editor.scene().is_empty());
}

// ============================================================================
// Input normalization
// ============================================================================

#[test]
fn test_touch_drives_same_gestures() {
    let mut editor = Editor::default();
    let touch = |phase, x, y| {
        InputEvent::Touch(TouchEvent::new(phase, vec![TouchPoint { id: 0, x, y }]))
    };

    let response = editor
        .handle_event(&touch(TouchPhase::Start, 60.0, 60.0))
        .expect("touch");
    assert!(response.handled && response.prevent_default);
    editor
        .handle_event(&touch(TouchPhase::End, 60.0, 60.0))
        .expect("touch");
    let id = editor.scene().selected_id().expect("placed by touch");

    editor
        .handle_event(&touch(TouchPhase::Start, 60.0, 60.0))
        .expect("touch");
    editor
        .handle_event(&touch(TouchPhase::Move, 70.0, 80.0))
        .expect("touch");
    editor
        .handle_event(&touch(TouchPhase::Cancel, 70.0, 80.0))
        .expect("touch");
    assert_eq!(
        editor.scene().token(id).expect("player").position,
        Point::new(70.0, 80.0)
    );
}

#[test]
fn test_keyboard_delete_removes_selection() {
    let mut editor = Editor::default();
    place_player(&mut editor, 60.0, 60.0);
    let response = editor
        .handle_event(&InputEvent::Key(KeyEvent::new("Delete")))
        .expect("delete");
    assert!(response.handled);
    assert_eq!(editor.scene().token_count(), 0);

    let ignored = editor
        .handle_event(&InputEvent::Key(KeyEvent {
            key: "d".into(),
            in_text_field: true,
        }))
        .expect("ignored");
    assert!(!ignored.handled);
    assert_eq!(editor.tools().tool(), Tool::None);
}
