//! Scripted editor sessions.
//!
//! A script is a JSON array of steps, each an object with a single key:
//!
//! ```json
//! [
//!   {"pointer": {"phase": "down", "x": 100, "y": 100}},
//!   {"pointer": {"phase": "up", "x": 100, "y": 100}},
//!   {"command": {"command": "toggle_path_recording"}},
//!   {"drag": {"from": [100, 100], "to": [200, 200], "steps": 10}},
//!   {"key": {"key": "d"}},
//!   {"tick": 5},
//!   "render"
//! ]
//! ```

use std::fmt;

use playboard_core::{Command, CoreError, Editor, KeyEvent, Point, PointerEvent, PointerPhase};
use playboard_renderer::{RecordingSurface, RenderError, Renderer};
use serde::Deserialize;
use thiserror::Error;

/// Errors from loading or running a script.
#[derive(Debug, Error)]
pub enum ScriptError {
    /// The script or config file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The script is not valid JSON or names an unknown step.
    #[error("Invalid script: {0}")]
    Parse(#[from] serde_json::Error),

    /// The editor configuration was rejected.
    #[error("Invalid configuration: {0}")]
    Config(#[source] CoreError),

    /// A step failed for a reason other than an advisory.
    #[error("Step {index} failed: {source}")]
    Step {
        /// Zero-based step index.
        index: usize,
        /// Underlying editor error.
        source: CoreError,
    },

    /// Rendering a frame failed.
    #[error("Render failed: {0}")]
    Render(#[from] RenderError),
}

/// Result type for script operations.
pub type ScriptResult<T> = Result<T, ScriptError>;

/// A single pointer sample.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct PointerStep {
    /// Gesture phase.
    pub phase: PointerPhase,
    /// X in surface coordinates.
    pub x: f32,
    /// Y in surface coordinates.
    pub y: f32,
}

/// A straight-line drag: down at `from`, `steps` evenly spaced moves, up at `to`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct DragStep {
    /// Pointer-down position.
    pub from: [f32; 2],
    /// Pointer-up position.
    pub to: [f32; 2],
    /// Number of move events between down and up.
    #[serde(default = "default_drag_steps")]
    pub steps: u16,
}

fn default_drag_steps() -> u16 {
    10
}

/// One scripted action.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    /// Raw pointer event.
    Pointer(PointerStep),
    /// Interpolated drag.
    Drag(DragStep),
    /// Key press.
    Key(KeyEvent),
    /// UI command.
    Command(Command),
    /// Advance playback this many animation ticks.
    Tick(usize),
    /// Render a frame now.
    Render,
}

/// Parse a script from JSON.
///
/// # Errors
///
/// Returns [`ScriptError::Parse`] if the JSON is malformed.
pub fn parse(json: &str) -> ScriptResult<Vec<Step>> {
    Ok(serde_json::from_str(json)?)
}

/// What a run did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    /// Steps executed.
    pub steps: usize,
    /// Players on the field at the end.
    pub players: usize,
    /// Balls on the field at the end.
    pub balls: usize,
    /// Committed drawings at the end.
    pub drawings: usize,
    /// Tokens with a playable recorded path.
    pub paths: usize,
    /// Playback ticks run.
    pub playback_ticks: usize,
    /// Frames rendered.
    pub frames: u64,
    /// Advisory messages raised along the way.
    pub advisories: Vec<String>,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "steps:          {}", self.steps)?;
        writeln!(f, "players:        {}", self.players)?;
        writeln!(f, "balls:          {}", self.balls)?;
        writeln!(f, "drawings:       {}", self.drawings)?;
        writeln!(f, "recorded paths: {}", self.paths)?;
        writeln!(f, "playback ticks: {}", self.playback_ticks)?;
        write!(f, "frames:         {}", self.frames)?;
        for advisory in &self.advisories {
            write!(f, "\nadvisory:       {advisory}")?;
        }
        Ok(())
    }
}

/// Drives an [`Editor`] from script steps, rendering to a recording surface.
pub struct Runner {
    editor: Editor,
    renderer: Renderer,
    surface: RecordingSurface,
    steps: usize,
    playback_ticks: usize,
    advisories: Vec<String>,
}

impl Runner {
    /// Create a runner around `editor`, rendering at `width` x `height`.
    #[must_use]
    pub fn new(editor: Editor, renderer: Renderer, width: u32, height: u32) -> Self {
        Self {
            editor,
            renderer,
            surface: RecordingSurface::new(width, height),
            steps: 0,
            playback_ticks: 0,
            advisories: Vec::new(),
        }
    }

    /// The editor being driven.
    #[must_use]
    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    /// The surface the last frame was rendered to.
    #[must_use]
    pub fn surface(&self) -> &RecordingSurface {
        &self.surface
    }

    /// Run every step in order.
    ///
    /// # Errors
    ///
    /// Stops at the first step that fails with a non-advisory error.
    pub fn run(&mut self, steps: &[Step]) -> ScriptResult<()> {
        for (index, step) in steps.iter().enumerate() {
            tracing::debug!("Step {index}: {step:?}");
            self.apply(step)
                .map_err(|source| ScriptError::Step { index, source })?;
            self.steps += 1;
            self.redraw()?;
        }
        Ok(())
    }

    fn apply(&mut self, step: &Step) -> Result<(), CoreError> {
        match step {
            Step::Pointer(p) => {
                self.editor
                    .handle_pointer(&PointerEvent::new(p.phase, p.x, p.y));
                Ok(())
            }
            Step::Drag(drag) => {
                self.drag(drag);
                Ok(())
            }
            Step::Key(key) => {
                let result = self.editor.handle_key(key).map(|_| ());
                self.advise(result)
            }
            Step::Command(command) => {
                let result = self.editor.execute(command.clone());
                self.advise(result)
            }
            Step::Tick(n) => {
                for _ in 0..*n {
                    if !self.tick() {
                        break;
                    }
                }
                Ok(())
            }
            Step::Render => {
                self.editor.request_redraw();
                Ok(())
            }
        }
    }

    /// Keep advisories as notes; pass anything else through.
    fn advise(&mut self, result: Result<(), CoreError>) -> Result<(), CoreError> {
        match result {
            Err(e) if e.is_advisory() => {
                tracing::warn!("{e}");
                self.advisories.push(e.to_string());
                Ok(())
            }
            other => other,
        }
    }

    fn drag(&mut self, drag: &DragStep) {
        let from = Point::from((drag.from[0], drag.from[1]));
        let to = Point::from((drag.to[0], drag.to[1]));
        self.editor.pointer_down(from);
        for i in 1..=drag.steps {
            let t = f32::from(i) / f32::from(drag.steps);
            self.editor.pointer_move(Point::new(
                from.x + (to.x - from.x) * t,
                from.y + (to.y - from.y) * t,
            ));
        }
        self.editor.pointer_up(to);
    }

    fn tick(&mut self) -> bool {
        if !self.editor.is_playing() {
            return false;
        }
        self.playback_ticks += 1;
        self.editor.tick()
    }

    fn redraw(&mut self) -> ScriptResult<()> {
        if self.editor.take_redraw() {
            self.renderer.render(&mut self.surface, &self.editor)?;
        }
        Ok(())
    }

    /// Start playback and tick until it finishes, rendering every frame.
    ///
    /// Returns the number of ticks run, or zero with an advisory recorded if
    /// nothing was recorded.
    ///
    /// # Errors
    ///
    /// Returns an error if a frame fails to render.
    pub fn play_to_end(&mut self) -> ScriptResult<usize> {
        let result = self.editor.play_paths();
        if let Err(e) = self.advise(result) {
            return Err(ScriptError::Step {
                index: self.steps,
                source: e,
            });
        }
        let mut ticks = 0;
        while self.editor.is_playing() {
            self.tick();
            ticks += 1;
            self.redraw()?;
        }
        Ok(ticks)
    }

    /// Summarize the current state.
    #[must_use]
    pub fn summary(&self) -> Summary {
        let scene = self.editor.scene();
        Summary {
            steps: self.steps,
            players: scene.player_count(),
            balls: scene.balls().count(),
            drawings: scene.drawings().len(),
            paths: scene.tokens().filter(|t| t.has_playable_path()).count(),
            playback_ticks: self.playback_ticks,
            frames: self.renderer.frame_count(),
            advisories: self.advisories.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn runner() -> Runner {
        Runner::new(Editor::default(), Renderer::default(), 800, 600)
    }

    #[test]
    fn test_parse_all_step_kinds() {
        let steps = parse(
            r#"[
                {"pointer": {"phase": "down", "x": 1, "y": 2}},
                {"drag": {"from": [0, 0], "to": [10, 0]}},
                {"key": {"key": "d"}},
                {"command": {"command": "set_tool", "tool": "arrow"}},
                {"tick": 3},
                "render"
            ]"#,
        )
        .expect("parse");
        assert_eq!(steps.len(), 6);
        assert!(matches!(steps[1], Step::Drag(DragStep { steps: 10, .. })));
        assert_eq!(steps[5], Step::Render);
    }

    #[test]
    fn test_unknown_step_is_parse_error() {
        assert!(matches!(parse(r#"[{"teleport": 1}]"#), Err(ScriptError::Parse(_))));
    }

    #[test]
    fn test_advisory_does_not_abort() {
        let mut runner = runner();
        let steps = parse(r#"[{"command": {"command": "play_paths"}}, {"key": {"key": "b"}}]"#)
            .expect("parse");
        runner.run(&steps).expect("advisories are not failures");
        let summary = runner.summary();
        assert_eq!(summary.steps, 2);
        assert_eq!(summary.advisories.len(), 1);
    }

    #[test]
    fn test_play_to_end_counts_ticks() {
        let mut runner = runner();
        let steps = parse(
            r#"[
                {"pointer": {"phase": "down", "x": 100, "y": 100}},
                {"pointer": {"phase": "up", "x": 100, "y": 100}},
                {"command": {"command": "toggle_path_recording"}},
                {"drag": {"from": [100, 100], "to": [200, 100], "steps": 9}}
            ]"#,
        )
        .expect("parse");
        runner.run(&steps).expect("run");
        let ticks = runner.play_to_end().expect("play");
        assert_eq!(ticks, 11);
        assert!(!runner.editor().is_playing());
        assert_eq!(runner.summary().paths, 1);
    }

    #[test]
    fn test_summary_display() {
        let summary = Summary {
            advisories: vec!["Nothing to play".into()],
            ..Summary::default()
        };
        let text = summary.to_string();
        assert!(text.contains("players:        0"));
        assert!(text.ends_with("advisory:       Nothing to play"));
    }
}
