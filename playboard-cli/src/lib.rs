//! # Playboard CLI
//!
//! Headless host for the Playboard editor. Replays a JSON script of pointer
//! events, key presses and commands, optionally plays recorded paths to the
//! end, and reports what happened.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p playboard-cli -- --script playboard-cli/scripts/give-and-go.json --play
//! ```
//!
//! ## Architecture
//!
//! - `CliArgs` - Command-line arguments parsed with clap
//! - `RunConfig` - Surface bounds, court, config and script locations
//! - `Runner` - Drives an `Editor` step by step and renders to a `RecordingSurface`

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]

pub mod script;

pub use script::{parse, DragStep, PointerStep, Runner, ScriptError, ScriptResult, Step, Summary};

use std::path::PathBuf;

use clap::Parser;
use playboard_core::{Command, CourtMode, Editor, EditorConfig};
use playboard_renderer::Renderer;

/// Command-line arguments for playboard.
#[derive(Debug, Clone, Parser)]
#[command(name = "playboard")]
#[command(about = "Replay a scripted Playboard session headlessly")]
#[command(version)]
pub struct CliArgs {
    /// JSON script of steps to replay
    #[arg(long, env = "PLAYBOARD_SCRIPT")]
    pub script: Option<PathBuf>,

    /// Editor configuration JSON (token sizes, thresholds, colors)
    #[arg(long, env = "PLAYBOARD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Maximum surface width in pixels
    #[arg(long, default_value = "800")]
    pub width: f32,

    /// Maximum surface height in pixels
    #[arg(long, default_value = "600")]
    pub height: f32,

    /// Court mode: half or full
    #[arg(long, default_value = "half")]
    pub court: CourtMode,

    /// Play recorded paths to the end after the script
    #[arg(long)]
    pub play: bool,

    /// Print the final scene as JSON
    #[arg(long)]
    pub dump_scene: bool,
}

/// Run configuration.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Script to replay, if any.
    pub script: Option<PathBuf>,
    /// Editor config file, if any.
    pub config: Option<PathBuf>,
    /// Surface bounds the court is fitted into.
    pub max_width: f32,
    /// Surface bounds the court is fitted into.
    pub max_height: f32,
    /// Initial court mode.
    pub court: CourtMode,
    /// Play paths to completion after the script.
    pub play: bool,
    /// Print the final scene.
    pub dump_scene: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            script: None,
            config: None,
            max_width: 800.0,
            max_height: 600.0,
            court: CourtMode::Half,
            play: false,
            dump_scene: false,
        }
    }
}

impl From<CliArgs> for RunConfig {
    fn from(args: CliArgs) -> Self {
        Self {
            script: args.script,
            config: args.config,
            max_width: args.width,
            max_height: args.height,
            court: args.court,
            play: args.play,
            dump_scene: args.dump_scene,
        }
    }
}

impl RunConfig {
    /// Load the editor configuration, falling back to defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn editor_config(&self) -> ScriptResult<EditorConfig> {
        match &self.config {
            Some(path) => {
                let json = std::fs::read_to_string(path)?;
                EditorConfig::from_json(&json).map_err(ScriptError::Config)
            }
            None => Ok(EditorConfig::default()),
        }
    }

    /// Load the script, or an empty one if none was given.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn steps(&self) -> ScriptResult<Vec<Step>> {
        match &self.script {
            Some(path) => parse(&std::fs::read_to_string(path)?),
            None => Ok(Vec::new()),
        }
    }

    /// Build a runner with the configured editor and surface size.
    ///
    /// # Errors
    ///
    /// Returns an error if the editor configuration cannot be loaded.
    pub fn runner(&self) -> ScriptResult<Runner> {
        let mut editor = Editor::new(self.editor_config()?);
        if self.court != CourtMode::default() {
            editor
                .execute(Command::SetCourt { mode: self.court })
                .map_err(ScriptError::Config)?;
        }
        let (width, height) = self.court.fit(self.max_width, self.max_height);
        tracing::info!("Surface {}x{} ({} court)", width, height, self.court);
        Ok(Runner::new(editor, Renderer::default(), width, height))
    }
}
