//! UI commands and keyboard shortcuts.

use serde::{Deserialize, Serialize};

use crate::{AddMode, CourtMode, KeyEvent, Team, Tool};

/// Every command the editor chrome can trigger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Command {
    /// Switch between half and full court.
    SetCourt {
        /// New court mode.
        mode: CourtMode,
    },
    /// Toggle an annotation tool.
    SetTool {
        /// Tool to toggle.
        tool: Tool,
    },
    /// Choose what empty-field clicks place.
    SetAddMode {
        /// New add-mode.
        mode: AddMode,
    },
    /// Make a team active for new players.
    SelectTeam {
        /// Team to activate.
        team: Team,
    },
    /// Change a team's color for new players.
    SetTeamColor {
        /// Team to recolor.
        team: Team,
        /// CSS color.
        color: String,
    },
    /// Set the jersey label used for the next player.
    SetJerseyLabel {
        /// Label text; empty means "next number".
        label: String,
    },
    /// Toggle recording of drag paths.
    TogglePathRecording,
    /// Play back every recorded path.
    PlayPaths,
    /// Stop playback and restore positions.
    CancelPlayback,
    /// Forget the selected token's path.
    ClearSelectedPath,
    /// Forget every path.
    ClearAllPaths,
    /// Start or stop video capture.
    ToggleVideo,
    /// Toggle ball possession on the selected player.
    ToggleHasBall,
    /// Delete the selected token.
    DeleteSelection,
    /// Remove every annotation.
    ClearDrawings,
    /// Remove everything.
    ResetAll,
    /// Drop the active tool and the selection.
    Escape,
}

/// A command bound to a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shortcut {
    /// Command to run.
    pub command: Command,
    /// Whether the host should suppress the key's default action.
    pub prevent_default: bool,
}

impl Shortcut {
    fn plain(command: Command) -> Self {
        Self {
            command,
            prevent_default: false,
        }
    }
}

/// Look up the shortcut for a key press.
///
/// Keys typed into a text field never trigger shortcuts.
#[must_use]
pub fn shortcut(key: &KeyEvent) -> Option<Shortcut> {
    if key.in_text_field {
        return None;
    }
    let command = match key.key.as_str() {
        "Delete" | "Backspace" => Command::DeleteSelection,
        "d" => Command::SetTool { tool: Tool::Draw },
        "a" => Command::SetTool { tool: Tool::Arrow },
        "e" => Command::SetTool { tool: Tool::Erase },
        "b" => Command::ToggleHasBall,
        "p" => Command::TogglePathRecording,
        " " => {
            return Some(Shortcut {
                command: Command::PlayPaths,
                prevent_default: true,
            })
        }
        "1" => Command::SelectTeam { team: Team::One },
        "2" => Command::SelectTeam { team: Team::Two },
        "Escape" => Command::Escape,
        _ => return None,
    };
    Some(Shortcut::plain(command))
}
