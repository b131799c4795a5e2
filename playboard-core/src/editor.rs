//! The editor: one owned object holding the scene, tool state, gesture,
//! playback and capture state.
//!
//! Pointer handling lives in [`crate::interaction`]; this module covers
//! construction, commands, keyboard shortcuts and the playback clock.

use serde::{Deserialize, Serialize};

use crate::capture::{NoCapture, VideoCapture};
use crate::command::{self, Command};
use crate::interaction::Gesture;
use crate::{
    AddMode, CoreResult, CourtMode, EditorConfig, InputEvent, KeyEvent, Playback,
    PlaybackStatus, RosterEntry, Scene, Team, TokenId, Tool, ToolState,
};

/// What the host should do after an input event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventResponse {
    /// The editor acted on the event.
    pub handled: bool,
    /// The host should suppress the platform's default action.
    pub prevent_default: bool,
}

/// Settings that shape newly placed players.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    /// Team new players join.
    pub active_team: Team,
    /// Current color per team.
    pub team_colors: [String; 2],
    /// Label for the next player; empty means "next number".
    pub jersey_label: String,
}

/// Read-only view of editor state for UI adapters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorSnapshot {
    /// Court mode.
    pub court: CourtMode,
    /// Active tool.
    pub tool: Tool,
    /// Stored add-mode.
    pub add_mode: AddMode,
    /// Placement settings.
    pub placement: Placement,
    /// Whether drags record paths.
    pub path_recording: bool,
    /// Whether playback is running.
    pub playing: bool,
    /// Whether video capture is running.
    pub capturing_video: bool,
    /// Selected token.
    pub selected: Option<TokenId>,
    /// Player list.
    pub roster: Vec<RosterEntry>,
    /// One-line usage hint for the current mode.
    pub hint: String,
}

/// The complete editor state.
#[derive(Debug)]
pub struct Editor {
    pub(crate) config: EditorConfig,
    pub(crate) scene: Scene,
    pub(crate) tools: ToolState,
    pub(crate) court: CourtMode,
    pub(crate) placement: Placement,
    pub(crate) path_recording: bool,
    pub(crate) gesture: Gesture,
    pub(crate) playback: Option<Playback>,
    capture: Box<dyn VideoCapture>,
    capturing_video: bool,
    pub(crate) needs_redraw: bool,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl Editor {
    /// Create an editor with an empty scene.
    #[must_use]
    pub fn new(config: EditorConfig) -> Self {
        let placement = Placement {
            active_team: Team::One,
            team_colors: config.team_colors.clone(),
            jersey_label: String::new(),
        };
        Self {
            config,
            scene: Scene::new(),
            tools: ToolState::default(),
            court: CourtMode::default(),
            placement,
            path_recording: false,
            gesture: Gesture::Idle,
            playback: None,
            capture: Box::new(NoCapture),
            capturing_video: false,
            needs_redraw: true,
        }
    }

    /// Use `capture` for [`Command::ToggleVideo`].
    #[must_use]
    pub fn with_capture(mut self, capture: Box<dyn VideoCapture>) -> Self {
        self.set_capture(capture);
        self
    }

    /// Replace the capture backend, stopping any capture in progress.
    pub fn set_capture(&mut self, capture: Box<dyn VideoCapture>) {
        if self.capturing_video {
            self.capture.stop();
            self.capturing_video = false;
        }
        self.capture = capture;
    }

    /// The scene.
    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// The configuration.
    #[must_use]
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Tool and add-mode.
    #[must_use]
    pub fn tools(&self) -> &ToolState {
        &self.tools
    }

    /// Court mode.
    #[must_use]
    pub fn court(&self) -> CourtMode {
        self.court
    }

    /// Placement settings.
    #[must_use]
    pub fn placement(&self) -> &Placement {
        &self.placement
    }

    /// Whether drags record paths.
    #[must_use]
    pub fn is_recording_paths(&self) -> bool {
        self.path_recording
    }

    /// Whether playback is running.
    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.playback.is_some()
    }

    /// Whether video capture is running.
    #[must_use]
    pub fn is_capturing_video(&self) -> bool {
        self.capturing_video
    }

    /// Whether something changed since the last [`Editor::take_redraw`].
    #[must_use]
    pub fn needs_redraw(&self) -> bool {
        self.needs_redraw
    }

    /// Return and clear the redraw flag.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.needs_redraw)
    }

    /// Force the next frame to repaint (after a resize, for instance).
    pub fn request_redraw(&mut self) {
        self.needs_redraw = true;
    }

    /// Route any input event.
    ///
    /// # Errors
    ///
    /// Propagates advisories from keyboard-triggered commands.
    pub fn handle_event(&mut self, event: &InputEvent) -> CoreResult<EventResponse> {
        match event {
            InputEvent::Pointer(pointer) => {
                self.handle_pointer(pointer);
                Ok(EventResponse {
                    handled: true,
                    prevent_default: false,
                })
            }
            InputEvent::Touch(touch) => {
                let handled = touch.to_pointer().map(|p| self.handle_pointer(&p)).is_some();
                // Touches never scroll or zoom the page while over the field.
                Ok(EventResponse {
                    handled,
                    prevent_default: true,
                })
            }
            InputEvent::Key(key) => self.handle_key(key),
        }
    }

    /// Run the shortcut bound to `key`, if any.
    ///
    /// # Errors
    ///
    /// Propagates advisories from the bound command.
    pub fn handle_key(&mut self, key: &KeyEvent) -> CoreResult<EventResponse> {
        let Some(shortcut) = command::shortcut(key) else {
            return Ok(EventResponse::default());
        };
        self.execute(shortcut.command)?;
        Ok(EventResponse {
            handled: true,
            prevent_default: shortcut.prevent_default,
        })
    }

    /// Execute a UI command.
    ///
    /// Commands with nothing to act on (no selection, a ball selected for
    /// has-ball) succeed without effect.
    ///
    /// # Errors
    ///
    /// Returns an advisory for [`Command::PlayPaths`] with nothing recorded
    /// and for [`Command::ToggleVideo`] when capture is unsupported.
    pub fn execute(&mut self, command: Command) -> CoreResult<()> {
        tracing::debug!("Command: {command:?}");
        match command {
            Command::SetCourt { mode } => self.court = mode,
            Command::SetTool { tool } => self.tools.set_tool(tool),
            Command::SetAddMode { mode } => self.tools.set_add_mode(mode),
            Command::SelectTeam { team } => self.placement.active_team = team,
            Command::SetTeamColor { team, color } => {
                self.placement.team_colors[team.index()] = color;
            }
            Command::SetJerseyLabel { label } => self.placement.jersey_label = label,
            Command::TogglePathRecording => self.path_recording = !self.path_recording,
            Command::PlayPaths => self.play_paths()?,
            Command::CancelPlayback => self.cancel_playback(),
            Command::ClearSelectedPath => {
                if let Some(id) = self.scene.selected_id() {
                    self.scene.clear_path(id)?;
                }
            }
            Command::ClearAllPaths => self.scene.clear_all_paths(),
            Command::ToggleVideo => self.toggle_video()?,
            Command::ToggleHasBall => self.toggle_has_ball(),
            Command::DeleteSelection => self.delete_selection(),
            Command::ClearDrawings => self.scene.clear_drawings(),
            Command::ResetAll => self.reset_all(),
            Command::Escape => {
                self.tools.clear_tool();
                self.scene.deselect();
            }
        }
        self.needs_redraw = true;
        Ok(())
    }

    fn toggle_has_ball(&mut self) {
        let Some(id) = self.scene.selected_id() else {
            return;
        };
        match self.scene.toggle_has_ball(id) {
            Ok(has_ball) => tracing::debug!("Player {id} has ball: {has_ball}"),
            Err(e) => tracing::debug!("Toggle has-ball ignored: {e}"),
        }
    }

    fn delete_selection(&mut self) {
        if let Some(id) = self.scene.selected_id() {
            if let Err(e) = self.scene.remove(id) {
                tracing::debug!("Delete ignored: {e}");
            }
        }
        self.scene.deselect();
    }

    fn reset_all(&mut self) {
        self.cancel_playback();
        self.gesture = Gesture::Idle;
        self.scene.clear_all();
        tracing::info!("Editor reset");
    }

    /// Start playback of every recorded path. No-op while already playing.
    ///
    /// # Errors
    ///
    /// Returns [`crate::CoreError::NothingToPlay`] if no token has a playable path.
    pub fn play_paths(&mut self) -> CoreResult<()> {
        if self.playback.is_some() {
            tracing::debug!("Playback already running");
            return Ok(());
        }
        if self.dragging().is_some() {
            // Playback owns token positions until it ends.
            tracing::debug!("Dropping dragged token before playback");
            self.pointer_cancel();
        }
        let playback = Playback::start(&mut self.scene, self.config.playback_frame_budget)?;
        self.playback = Some(playback);
        self.needs_redraw = true;
        Ok(())
    }

    /// Stop playback early, restoring every pre-playback position.
    pub fn cancel_playback(&mut self) {
        if let Some(playback) = self.playback.take() {
            playback.restore(&mut self.scene);
            self.needs_redraw = true;
            tracing::debug!("Playback cancelled");
        }
    }

    /// Advance playback by one animation tick. Returns whether playback is
    /// still running afterwards.
    pub fn tick(&mut self) -> bool {
        let Some(playback) = self.playback.as_mut() else {
            return false;
        };
        self.needs_redraw = true;
        match playback.tick(&mut self.scene) {
            PlaybackStatus::Running => true,
            PlaybackStatus::Finished => {
                self.playback = None;
                false
            }
        }
    }

    /// Start or stop video capture.
    ///
    /// # Errors
    ///
    /// Returns [`crate::CoreError::CaptureUnsupported`] if the backend cannot record.
    pub fn toggle_video(&mut self) -> CoreResult<()> {
        if self.capturing_video {
            self.capture.stop();
            self.capturing_video = false;
        } else {
            self.capture.start()?;
            self.capturing_video = true;
        }
        tracing::info!("Video capture: {}", self.capturing_video);
        Ok(())
    }

    /// Color new players on `team` receive.
    #[must_use]
    pub fn team_color(&self, team: Team) -> &str {
        &self.placement.team_colors[team.index()]
    }

    /// Usage hint for the current mode.
    #[must_use]
    pub fn hint(&self) -> &'static str {
        match self.tools.tool() {
            Tool::Draw => "Drag to draw freehand",
            Tool::Arrow => "Drag to draw a movement arrow",
            Tool::Erase => "Click a line to erase it",
            Tool::None if self.tools.add_mode() == AddMode::Ball => "Click field to place the ball",
            Tool::None if self.path_recording => {
                "Path recording on - drag players or ball to record movement"
            }
            Tool::None => "Click to place player, drag to move, enable path recording to trace",
        }
    }

    /// Capture the state a UI needs to reflect.
    #[must_use]
    pub fn snapshot(&self) -> EditorSnapshot {
        EditorSnapshot {
            court: self.court,
            tool: self.tools.tool(),
            add_mode: self.tools.add_mode(),
            placement: self.placement.clone(),
            path_recording: self.path_recording,
            playing: self.is_playing(),
            capturing_video: self.capturing_video,
            selected: self.scene.selected_id(),
            roster: self.scene.roster(),
            hint: self.hint().to_string(),
        }
    }
}
