//! Pointer gesture lifecycle.
//!
//! One gesture is active at a time. Each gesture moves through
//! down -> move* -> (up | cancel), where cancel means the pointer left the
//! surface. Cancel commits like up for strokes and drags; an arrow in
//! progress is discarded because no end point is known.

use crate::{
    AddMode, Arrow, Drawing, Editor, Point, PointerAction, PointerEvent, PointerPhase, Stroke,
    TokenId,
};

/// The gesture currently in progress.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Gesture {
    /// No button held.
    #[default]
    Idle,
    /// Freehand stroke being drawn.
    Stroke(Stroke),
    /// Arrow being dragged out.
    Arrow {
        /// Where the pointer went down.
        start: Point,
        /// Latest pointer position.
        current: Point,
    },
    /// Token being dragged.
    Drag {
        /// Token under the pointer at drag start.
        id: TokenId,
        /// Pointer position minus token position at drag start.
        offset: Point,
        /// Positions captured during this drag, seeded with the start position.
        capture: Vec<Point>,
    },
}

/// Uncommitted annotation to draw on top of the scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Preview<'a> {
    /// Stroke in progress.
    Stroke(&'a Stroke),
    /// Arrow from `start` to the pointer.
    Arrow {
        /// Tail.
        start: Point,
        /// Tip (current pointer).
        end: Point,
    },
}

impl Editor {
    /// Route a pointer event to the matching gesture transition.
    pub fn handle_pointer(&mut self, event: &PointerEvent) {
        match event.phase {
            PointerPhase::Down => self.pointer_down(event.position),
            PointerPhase::Move => self.pointer_move(event.position),
            PointerPhase::Up => self.pointer_up(event.position),
            PointerPhase::Leave => self.pointer_cancel(),
        }
    }

    /// Begin a gesture at `at`.
    pub fn pointer_down(&mut self, at: Point) {
        if self.gesture != Gesture::Idle {
            // A lost up event; close the stale gesture before starting over.
            self.pointer_cancel();
        }

        let action = self.tools.classify(&self.scene, at, &self.config);
        let touches_tokens = matches!(
            action,
            PointerAction::Drag(_) | PointerAction::PlacePlayer | PointerAction::PlaceBall
        );
        if touches_tokens && self.playback.is_some() {
            tracing::debug!("Pointer down ignored during playback");
            return;
        }

        match action {
            PointerAction::BeginStroke => {
                self.gesture = Gesture::Stroke(Stroke::begin(
                    at,
                    self.config.annotation_color.clone(),
                    self.config.stroke_width,
                ));
            }
            PointerAction::BeginArrow => {
                self.gesture = Gesture::Arrow {
                    start: at,
                    current: at,
                };
            }
            PointerAction::Erase => {
                if self.scene.erase_nearest(at, self.config.erase_threshold).is_some() {
                    self.needs_redraw = true;
                }
            }
            PointerAction::Drag(id) => self.begin_drag(id, at),
            PointerAction::PlaceBall => {
                self.scene.add_ball(at, self.config.ball_color.clone());
                self.tools.set_add_mode(AddMode::Player);
                self.needs_redraw = true;
            }
            PointerAction::PlacePlayer => {
                let id = self.place_player(at);
                self.scene.select(id).ok();
                self.needs_redraw = true;
            }
        }
    }

    /// Continue the active gesture with the pointer at `at`.
    pub fn pointer_move(&mut self, at: Point) {
        match &mut self.gesture {
            Gesture::Idle => return,
            Gesture::Stroke(stroke) => stroke.points.push(at),
            Gesture::Arrow { current, .. } => *current = at,
            Gesture::Drag {
                id,
                offset,
                capture,
            } => {
                let Some(token) = self.scene.token_mut(*id) else {
                    return;
                };
                token.position = at - *offset;
                if self.path_recording {
                    capture.push(token.position);
                }
            }
        }
        self.needs_redraw = true;
    }

    /// Finish the active gesture with the pointer released at `at`.
    pub fn pointer_up(&mut self, at: Point) {
        match std::mem::take(&mut self.gesture) {
            Gesture::Idle => {}
            Gesture::Stroke(stroke) => self.commit_stroke(stroke),
            Gesture::Arrow { start, .. } => {
                let arrow = Arrow {
                    start,
                    end: at,
                    color: self.config.annotation_color.clone(),
                };
                if arrow.length() > self.config.min_arrow_length {
                    tracing::debug!("Commit arrow, length {:.1}", arrow.length());
                    self.scene.push_drawing(Drawing::Arrow(arrow));
                }
                self.needs_redraw = true;
            }
            Gesture::Drag { id, capture, .. } => self.finish_drag(id, capture),
        }
    }

    /// The pointer left the surface: end the active gesture without a
    /// release position.
    pub fn pointer_cancel(&mut self) {
        match std::mem::take(&mut self.gesture) {
            Gesture::Idle => {}
            Gesture::Stroke(stroke) => self.commit_stroke(stroke),
            Gesture::Arrow { .. } => self.needs_redraw = true,
            Gesture::Drag { id, capture, .. } => self.finish_drag(id, capture),
        }
    }

    /// Whether a gesture is in progress.
    #[must_use]
    pub fn is_gesture_active(&self) -> bool {
        self.gesture != Gesture::Idle
    }

    /// Id of the token being dragged, if any.
    #[must_use]
    pub fn dragging(&self) -> Option<TokenId> {
        match self.gesture {
            Gesture::Drag { id, .. } => Some(id),
            _ => None,
        }
    }

    /// Annotation in progress, for live rendering.
    #[must_use]
    pub fn preview(&self) -> Option<Preview<'_>> {
        match &self.gesture {
            Gesture::Stroke(stroke) => Some(Preview::Stroke(stroke)),
            Gesture::Arrow { start, current } => Some(Preview::Arrow {
                start: *start,
                end: *current,
            }),
            Gesture::Idle | Gesture::Drag { .. } => None,
        }
    }

    fn begin_drag(&mut self, id: TokenId, at: Point) {
        let Some(token) = self.scene.token(id) else {
            return;
        };
        let origin = token.position;
        self.scene.select(id).ok();
        self.gesture = Gesture::Drag {
            id,
            offset: at - origin,
            capture: vec![origin],
        };
        self.needs_redraw = true;
    }

    fn finish_drag(&mut self, id: TokenId, capture: Vec<Point>) {
        if !self.path_recording || capture.len() < 2 {
            return;
        }
        if let Some(token) = self.scene.token_mut(id) {
            tracing::debug!("Token {id}: recorded {} path points", capture.len());
            token.path.extend(capture);
            self.needs_redraw = true;
        }
    }

    fn commit_stroke(&mut self, stroke: Stroke) {
        if stroke.is_committable() {
            tracing::debug!("Commit stroke, {} points", stroke.points.len());
            self.scene.push_drawing(Drawing::Stroke(stroke));
        }
        self.needs_redraw = true;
    }

    fn place_player(&mut self, at: Point) -> TokenId {
        let label = match self.placement.jersey_label.trim() {
            "" => (self.scene.player_count() + 1).to_string(),
            label => label.to_string(),
        };
        let team = self.placement.active_team;
        let color = self.team_color(team).to_string();
        self.scene.add_player(at, label, team, color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Command, Tool};

    fn editor_with_tool(tool: Tool) -> Editor {
        let mut editor = Editor::default();
        if tool != Tool::None {
            editor.execute(Command::SetTool { tool }).expect("tool");
        }
        editor
    }

    #[test]
    fn test_single_point_stroke_is_dropped() {
        let mut editor = editor_with_tool(Tool::Draw);
        editor.pointer_down(Point::new(5.0, 5.0));
        editor.pointer_up(Point::new(5.0, 5.0));
        assert!(editor.scene().drawings().is_empty());
        assert!(!editor.is_gesture_active());
    }

    #[test]
    fn test_stroke_preview_then_commit() {
        let mut editor = editor_with_tool(Tool::Draw);
        editor.pointer_down(Point::new(0.0, 0.0));
        editor.pointer_move(Point::new(3.0, 4.0));
        assert!(matches!(editor.preview(), Some(Preview::Stroke(s)) if s.points.len() == 2));
        assert!(editor.scene().drawings().is_empty());
        editor.pointer_up(Point::new(3.0, 4.0));
        assert_eq!(editor.scene().drawings().len(), 1);
        assert!(editor.preview().is_none());
    }

    #[test]
    fn test_leave_commits_stroke() {
        let mut editor = editor_with_tool(Tool::Draw);
        editor.pointer_down(Point::new(0.0, 0.0));
        editor.pointer_move(Point::new(10.0, 0.0));
        editor.pointer_cancel();
        assert_eq!(editor.scene().drawings().len(), 1);
    }

    #[test]
    fn test_short_arrow_is_dropped() {
        let mut editor = editor_with_tool(Tool::Arrow);
        editor.pointer_down(Point::new(10.0, 10.0));
        editor.pointer_up(Point::new(10.0, 20.0));
        assert!(editor.scene().drawings().is_empty());
    }

    #[test]
    fn test_leave_discards_arrow() {
        let mut editor = editor_with_tool(Tool::Arrow);
        editor.pointer_down(Point::new(10.0, 10.0));
        editor.pointer_move(Point::new(100.0, 10.0));
        editor.pointer_cancel();
        assert!(editor.scene().drawings().is_empty());
        assert!(!editor.is_gesture_active());
    }

    #[test]
    fn test_drag_keeps_grab_offset() {
        let mut editor = Editor::default();
        editor.pointer_down(Point::new(100.0, 100.0));
        editor.pointer_up(Point::new(100.0, 100.0));
        let id = editor.scene().selected_id().expect("placed");

        editor.pointer_down(Point::new(105.0, 103.0));
        assert_eq!(editor.dragging(), Some(id));
        editor.pointer_move(Point::new(155.0, 123.0));
        editor.pointer_up(Point::new(155.0, 123.0));
        assert_eq!(
            editor.scene().token(id).expect("token").position,
            Point::new(150.0, 120.0)
        );
    }

    #[test]
    fn test_ball_placement_reverts_add_mode() {
        let mut editor = Editor::default();
        editor
            .execute(Command::SetAddMode { mode: AddMode::Ball })
            .expect("mode");
        editor.pointer_down(Point::new(40.0, 40.0));
        editor.pointer_up(Point::new(40.0, 40.0));
        assert_eq!(editor.scene().balls().count(), 1);
        assert_eq!(editor.tools().add_mode(), AddMode::Player);
        assert!(editor.scene().selected_id().is_none());
    }

    #[test]
    fn test_default_labels_count_players() {
        let mut editor = Editor::default();
        editor.pointer_down(Point::new(40.0, 40.0));
        editor.pointer_down(Point::new(200.0, 40.0));
        editor
            .execute(Command::SetJerseyLabel { label: "22".into() })
            .expect("label");
        editor.pointer_down(Point::new(400.0, 40.0));
        let labels: Vec<_> = editor
            .scene()
            .players()
            .filter_map(|t| t.player_info().map(|i| i.label.clone()))
            .collect();
        assert_eq!(labels, ["1", "2", "22"]);
    }

    #[test]
    fn test_drag_of_deleted_token_is_silent() {
        let mut editor = Editor::default();
        editor.execute(Command::TogglePathRecording).expect("rec");
        editor.pointer_down(Point::new(100.0, 100.0));
        editor.pointer_up(Point::new(100.0, 100.0));
        editor.pointer_down(Point::new(100.0, 100.0));
        editor.execute(Command::DeleteSelection).expect("delete");
        editor.pointer_move(Point::new(120.0, 100.0));
        editor.pointer_up(Point::new(120.0, 100.0));
        assert_eq!(editor.scene().token_count(), 0);
    }

    #[test]
    fn test_erase_removes_nearest() {
        let mut editor = editor_with_tool(Tool::Arrow);
        editor.pointer_down(Point::new(0.0, 0.0));
        editor.pointer_up(Point::new(100.0, 0.0));
        editor.execute(Command::SetTool { tool: Tool::Erase }).expect("erase");
        editor.pointer_down(Point::new(50.0, 20.0));
        assert_eq!(editor.scene().drawings().len(), 1);
        editor.pointer_down(Point::new(50.0, 0.0));
        assert!(editor.scene().drawings().is_empty());
    }

    #[test]
    fn test_drag_ignored_during_playback() {
        let mut editor = Editor::default();
        editor.execute(Command::TogglePathRecording).expect("rec");
        editor.pointer_down(Point::new(100.0, 100.0));
        editor.pointer_up(Point::new(100.0, 100.0));
        editor.pointer_down(Point::new(100.0, 100.0));
        editor.pointer_move(Point::new(150.0, 100.0));
        editor.pointer_up(Point::new(150.0, 100.0));
        editor.execute(Command::PlayPaths).expect("play");

        editor.pointer_down(Point::new(100.0, 100.0));
        assert!(!editor.is_gesture_active());
        assert_eq!(editor.scene().token_count(), 1);

        // Annotation tools still work during playback.
        editor.execute(Command::SetTool { tool: Tool::Draw }).expect("draw");
        editor.pointer_down(Point::new(10.0, 10.0));
        assert!(editor.is_gesture_active());
    }
}
