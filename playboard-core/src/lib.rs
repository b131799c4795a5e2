//! # Playboard Core
//!
//! Scene and interaction engine for sketching team-sport plays: place and
//! drag players and balls, annotate with strokes and arrows, record drag
//! paths and play them back.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                   Editor                    │
//! ├─────────────────────────────────────────────┤
//! │  Scene           │  Interaction             │
//! │  - Tokens        │  - Tool state machine    │
//! │  - Drawings      │  - Drag + path capture   │
//! │  - Selection     │  - Stroke / arrow / erase│
//! ├─────────────────────────────────────────────┤
//! │  Playback        │  Commands                │
//! │  - Sub-sampling  │  - UI commands           │
//! │  - Restore       │  - Keyboard shortcuts    │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! Everything is synchronous and single-threaded. Hosts feed pointer and
//! keyboard events in, call [`Editor::tick`] once per animation frame while
//! playback runs, and repaint when [`Editor::take_redraw`] says so.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod capture;
pub mod command;
pub mod config;
pub mod court;
pub mod drawing;
pub mod editor;
pub mod error;
pub mod event;
pub mod geometry;
pub mod interaction;
pub mod playback;
pub mod scene;
pub mod token;
pub mod tool;

pub use capture::{NoCapture, VideoCapture};
pub use command::{shortcut, Command, Shortcut};
pub use config::EditorConfig;
pub use court::CourtMode;
pub use drawing::{Arrow, Drawing, Stroke};
pub use editor::{Editor, EditorSnapshot, EventResponse, Placement};
pub use error::{CoreError, CoreResult};
pub use event::{InputEvent, KeyEvent, PointerEvent, PointerPhase, TouchEvent, TouchPhase, TouchPoint};
pub use geometry::Point;
pub use interaction::{Gesture, Preview};
pub use playback::{Playback, PlaybackStatus};
pub use scene::{RosterEntry, Scene};
pub use token::{PlayerInfo, Team, Token, TokenId, TokenKind};
pub use tool::{AddMode, PointerAction, Tool, ToolState};

/// Playboard core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
