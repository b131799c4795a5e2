//! # Playboard WASM Application
//!
//! Browser bindings for the Playboard editor.
//!
//! ## Usage
//!
//! Build for WASM:
//! ```bash
//! wasm-pack build --target web playboard-app
//! ```
//!
//! Then import in JavaScript:
//! ```javascript
//! import init, { PlayboardApp } from './pkg/playboard_app.js';
//!
//! await init();
//! const app = new PlayboardApp('field');
//! app.resize(wrap.clientWidth, wrap.clientHeight);
//!
//! canvas.addEventListener('mousedown', e => app.pointerDown(e.offsetX, e.offsetY));
//! document.addEventListener('keydown', e => {
//!     if (app.keyDown(e.key, e.target.tagName === 'INPUT')) e.preventDefault();
//! });
//!
//! function frame() {
//!     app.frame();
//!     requestAnimationFrame(frame);
//! }
//! frame();
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod capture;
pub mod surface;

use playboard_core::{
    AddMode, Command, CoreError, CourtMode, Editor, EditorConfig, KeyEvent, Point, Team, Tool,
    TouchEvent, TouchPhase, TouchPoint,
};
use playboard_renderer::Renderer;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

pub use capture::JsCapture;
pub use surface::Canvas2dSurface;

/// Initialize the WASM module.
#[wasm_bindgen(start)]
pub fn init_wasm() {
    console_error_panic_hook::set_once();
    tracing::info!("Playboard WASM initialized");
}

fn js_error(err: &CoreError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Map a DOM touch event name to a phase.
fn touch_phase(phase: &str) -> TouchPhase {
    match phase {
        "move" | "touchmove" => TouchPhase::Move,
        "end" | "touchend" => TouchPhase::End,
        "cancel" | "touchcancel" => TouchPhase::Cancel,
        _ => TouchPhase::Start,
    }
}

fn add_mode(name: &str) -> Result<AddMode, JsValue> {
    match name {
        "player" => Ok(AddMode::Player),
        "ball" => Ok(AddMode::Ball),
        other => Err(JsValue::from_str(&format!("Unknown add mode: {other}"))),
    }
}

/// Editor bound to a `<canvas>` element.
#[wasm_bindgen]
pub struct PlayboardApp {
    editor: Editor,
    renderer: Renderer,
    surface: Canvas2dSurface,
    bounds: Option<(f32, f32)>,
    advisory: Option<String>,
}

#[wasm_bindgen]
impl PlayboardApp {
    /// Attach to the canvas element with the given ID, using default settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the canvas element is not found or 2D context fails.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str) -> Result<PlayboardApp, JsValue> {
        Self::attach(canvas_id, EditorConfig::default())
    }

    /// Attach with an editor configuration given as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is invalid or the canvas cannot be used.
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(canvas_id: &str, config_json: &str) -> Result<PlayboardApp, JsValue> {
        let config = EditorConfig::from_json(config_json).map_err(|e| js_error(&e))?;
        Self::attach(canvas_id, config)
    }

    fn attach(canvas_id: &str, config: EditorConfig) -> Result<PlayboardApp, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window object"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("No document object"))?;

        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| JsValue::from_str(&format!("Canvas element '{canvas_id}' not found")))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| JsValue::from_str("Element is not a canvas"))?;

        let ctx = canvas
            .get_context("2d")
            .map_err(|_| JsValue::from_str("Failed to get 2D context"))?
            .ok_or_else(|| JsValue::from_str("2D context not available"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| JsValue::from_str("Failed to cast to 2D context"))?;

        Ok(Self {
            editor: Editor::new(config),
            renderer: Renderer::default(),
            surface: Canvas2dSurface::new(canvas, ctx),
            bounds: None,
            advisory: None,
        })
    }

    /// Fit the canvas to the court's aspect ratio inside `max_width` x `max_height`.
    pub fn resize(&mut self, max_width: f32, max_height: f32) {
        self.bounds = Some((max_width, max_height));
        self.fit();
    }

    fn fit(&mut self) {
        if let Some((max_width, max_height)) = self.bounds {
            let (width, height) = self.editor.court().fit(max_width, max_height);
            self.surface.resize(width, height);
            self.editor.request_redraw();
        }
    }

    /// Advance playback and repaint if anything changed. Call once per
    /// animation frame. Returns whether playback is running.
    pub fn frame(&mut self) -> bool {
        let playing = self.editor.tick();
        if self.editor.take_redraw() {
            self.render();
        }
        playing
    }

    /// Repaint unconditionally.
    pub fn render(&mut self) {
        if let Err(err) = self.renderer.render(&mut self.surface, &self.editor) {
            tracing::error!("Renderer error: {:?}", err);
        }
    }

    /// Get the number of frames rendered.
    #[wasm_bindgen(js_name = frameCount)]
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.renderer.frame_count()
    }

    /// Mouse button pressed at canvas-local coordinates.
    #[wasm_bindgen(js_name = pointerDown)]
    pub fn pointer_down(&mut self, x: f32, y: f32) {
        self.editor.pointer_down(Point::new(x, y));
    }

    /// Mouse moved.
    #[wasm_bindgen(js_name = pointerMove)]
    pub fn pointer_move(&mut self, x: f32, y: f32) {
        self.editor.pointer_move(Point::new(x, y));
    }

    /// Mouse button released.
    #[wasm_bindgen(js_name = pointerUp)]
    pub fn pointer_up(&mut self, x: f32, y: f32) {
        self.editor.pointer_up(Point::new(x, y));
    }

    /// Mouse left the canvas.
    #[wasm_bindgen(js_name = pointerLeave)]
    pub fn pointer_leave(&mut self) {
        self.editor.pointer_cancel();
    }

    /// Handle a touch at canvas-local coordinates. Returns whether the
    /// page should call `preventDefault()`.
    #[wasm_bindgen(js_name = handleTouch)]
    pub fn handle_touch(&mut self, phase: &str, x: f32, y: f32) -> bool {
        let event = TouchEvent::new(touch_phase(phase), vec![TouchPoint { id: 0, x, y }]);
        match self
            .editor
            .handle_event(&playboard_core::InputEvent::Touch(event))
        {
            Ok(response) => response.prevent_default,
            Err(e) => {
                tracing::warn!("Touch ignored: {e}");
                true
            }
        }
    }

    /// Handle a key press. Returns whether the page should call
    /// `preventDefault()`.
    #[wasm_bindgen(js_name = keyDown)]
    pub fn key_down(&mut self, key: &str, in_text_field: bool) -> bool {
        let event = KeyEvent {
            key: key.to_string(),
            in_text_field,
        };
        let Some(shortcut) = playboard_core::shortcut(&event) else {
            return false;
        };
        if let Err(e) = self.run(shortcut.command) {
            tracing::warn!("Shortcut failed: {:?}", e);
        }
        shortcut.prevent_default
    }

    /// Execute a command given as JSON, e.g. `{"command":"set_tool","tool":"draw"}`.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON does not describe a command.
    pub fn command(&mut self, json: &str) -> Result<(), JsValue> {
        let command: Command =
            serde_json::from_str(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.run(command)
    }

    fn run(&mut self, command: Command) -> Result<(), JsValue> {
        let refit = matches!(command, Command::SetCourt { .. });
        match self.editor.execute(command) {
            Ok(()) => {}
            Err(e) if e.is_advisory() => {
                tracing::warn!("{e}");
                self.advisory = Some(e.to_string());
            }
            Err(e) => return Err(js_error(&e)),
        }
        if refit {
            self.fit();
        }
        Ok(())
    }

    /// Take the most recent advisory message (e.g. "nothing to play"), if any.
    #[wasm_bindgen(js_name = takeAdvisory)]
    pub fn take_advisory(&mut self) -> Option<String> {
        self.advisory.take()
    }

    /// Switch court mode by name (`"half"` or `"full"`).
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown mode name.
    #[wasm_bindgen(js_name = setCourt)]
    pub fn set_court(&mut self, mode: &str) -> Result<(), JsValue> {
        let mode: CourtMode = mode.parse().map_err(|e| js_error(&e))?;
        self.run(Command::SetCourt { mode })
    }

    /// Toggle a tool by name (`"draw"`, `"arrow"`, `"erase"`).
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown tool name.
    #[wasm_bindgen(js_name = setTool)]
    pub fn set_tool(&mut self, tool: &str) -> Result<(), JsValue> {
        let tool: Tool = tool.parse().map_err(|e| js_error(&e))?;
        self.run(Command::SetTool { tool })
    }

    /// Choose what empty-field clicks place (`"player"` or `"ball"`).
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown mode name.
    #[wasm_bindgen(js_name = setAddMode)]
    pub fn set_add_mode(&mut self, mode: &str) -> Result<(), JsValue> {
        let mode = add_mode(mode)?;
        self.run(Command::SetAddMode { mode })
    }

    /// Make team 1 or 2 active.
    ///
    /// # Errors
    ///
    /// Returns an error for any other team number.
    #[wasm_bindgen(js_name = selectTeam)]
    pub fn select_team(&mut self, team: u8) -> Result<(), JsValue> {
        let team = Team::try_from(team).map_err(|e| js_error(&e))?;
        self.run(Command::SelectTeam { team })
    }

    /// Recolor team 1 or 2 for new players.
    ///
    /// # Errors
    ///
    /// Returns an error for any other team number.
    #[wasm_bindgen(js_name = setTeamColor)]
    pub fn set_team_color(&mut self, team: u8, color: &str) -> Result<(), JsValue> {
        let team = Team::try_from(team).map_err(|e| js_error(&e))?;
        self.run(Command::SetTeamColor {
            team,
            color: color.to_string(),
        })
    }

    /// Set the jersey label for the next player.
    ///
    /// # Errors
    ///
    /// Never fails; returns `Result` for a uniform JS surface.
    #[wasm_bindgen(js_name = setJerseyLabel)]
    pub fn set_jersey_label(&mut self, label: &str) -> Result<(), JsValue> {
        self.run(Command::SetJerseyLabel {
            label: label.to_string(),
        })
    }

    /// Attach JS callbacks that start and stop recording the canvas.
    #[wasm_bindgen(js_name = setCaptureHooks)]
    pub fn set_capture_hooks(&mut self, start: js_sys::Function, stop: js_sys::Function) {
        self.editor
            .set_capture(Box::new(JsCapture::new(start, stop)));
    }

    /// Editor state for the chrome, as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    #[wasm_bindgen(js_name = stateJson)]
    pub fn state_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.editor.snapshot()).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Color swatches for team 1 or 2, as a JSON array.
    #[wasm_bindgen(js_name = paletteJson)]
    #[must_use]
    pub fn palette_json(&self, team: u8) -> String {
        Team::try_from(team)
            .ok()
            .and_then(|team| serde_json::to_string(self.editor.config().palette(team)).ok())
            .unwrap_or_else(|| "[]".to_string())
    }
}

#[wasm_bindgen]
impl PlayboardApp {
    /// Toggle recording of drag paths.
    ///
    /// # Errors
    ///
    /// Returns an error only for non-advisory failures.
    #[wasm_bindgen(js_name = togglePathRecording)]
    pub fn toggle_path_recording(&mut self) -> Result<(), JsValue> {
        self.run(Command::TogglePathRecording)
    }

    /// Play back every recorded path. Sets an advisory when nothing is recorded.
    ///
    /// # Errors
    ///
    /// Returns an error only for non-advisory failures.
    #[wasm_bindgen(js_name = playPaths)]
    pub fn play_paths(&mut self) -> Result<(), JsValue> {
        self.run(Command::PlayPaths)
    }

    /// Stop playback and restore positions.
    ///
    /// # Errors
    ///
    /// Returns an error only for non-advisory failures.
    #[wasm_bindgen(js_name = cancelPlayback)]
    pub fn cancel_playback(&mut self) -> Result<(), JsValue> {
        self.run(Command::CancelPlayback)
    }

    /// Forget the selected token's path.
    ///
    /// # Errors
    ///
    /// Returns an error only for non-advisory failures.
    #[wasm_bindgen(js_name = clearSelectedPath)]
    pub fn clear_selected_path(&mut self) -> Result<(), JsValue> {
        self.run(Command::ClearSelectedPath)
    }

    /// Forget every recorded path.
    ///
    /// # Errors
    ///
    /// Returns an error only for non-advisory failures.
    #[wasm_bindgen(js_name = clearAllPaths)]
    pub fn clear_all_paths(&mut self) -> Result<(), JsValue> {
        self.run(Command::ClearAllPaths)
    }

    /// Start or stop video capture. Sets an advisory when capture is unavailable.
    ///
    /// # Errors
    ///
    /// Returns an error only for non-advisory failures.
    #[wasm_bindgen(js_name = toggleVideo)]
    pub fn toggle_video(&mut self) -> Result<(), JsValue> {
        self.run(Command::ToggleVideo)
    }

    /// Toggle ball possession on the selected player.
    ///
    /// # Errors
    ///
    /// Returns an error only for non-advisory failures.
    #[wasm_bindgen(js_name = toggleHasBall)]
    pub fn toggle_has_ball(&mut self) -> Result<(), JsValue> {
        self.run(Command::ToggleHasBall)
    }

    /// Delete the selected token.
    ///
    /// # Errors
    ///
    /// Returns an error only for non-advisory failures.
    #[wasm_bindgen(js_name = deleteSelection)]
    pub fn delete_selection(&mut self) -> Result<(), JsValue> {
        self.run(Command::DeleteSelection)
    }

    /// Remove every annotation.
    ///
    /// # Errors
    ///
    /// Returns an error only for non-advisory failures.
    #[wasm_bindgen(js_name = clearDrawings)]
    pub fn clear_drawings(&mut self) -> Result<(), JsValue> {
        self.run(Command::ClearDrawings)
    }

    /// Remove every token and annotation.
    ///
    /// # Errors
    ///
    /// Returns an error only for non-advisory failures.
    #[wasm_bindgen(js_name = resetAll)]
    pub fn reset_all(&mut self) -> Result<(), JsValue> {
        self.run(Command::ResetAll)
    }

    /// Drop the active tool and the selection.
    ///
    /// # Errors
    ///
    /// Returns an error only for non-advisory failures.
    #[wasm_bindgen(js_name = escape)]
    pub fn escape(&mut self) -> Result<(), JsValue> {
        self.run(Command::Escape)
    }
}
