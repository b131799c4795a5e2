//! Error types for editor operations.

use thiserror::Error;

use crate::TokenId;

/// Result type for editor operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in editor operations.
///
/// None of these are fatal: the editor stays usable after any of them.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Token not found in scene.
    #[error("Token not found: {0}")]
    TokenNotFound(TokenId),

    /// The operation needs a player but the id refers to a ball.
    #[error("Token {0} is not a player")]
    NotAPlayer(TokenId),

    /// Playback requested with no recorded paths.
    #[error("No paths recorded yet. Enable path recording, then drag players or the ball.")]
    NothingToPlay,

    /// Video capture is unavailable in this environment.
    #[error("Video capture unavailable: {0}")]
    CaptureUnsupported(String),

    /// Team number outside 1..=2.
    #[error("Unknown team: {0}")]
    UnknownTeam(u8),

    /// Unrecognized tool name.
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// Unrecognized court mode name.
    #[error("Unknown court mode: {0}")]
    UnknownCourtMode(String),

    /// Configuration could not be parsed.
    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),
}

impl CoreError {
    /// Whether this error is a user-facing advisory rather than a fault.
    ///
    /// Advisories are shown to the user and otherwise ignored.
    #[must_use]
    pub fn is_advisory(&self) -> bool {
        matches!(self, Self::NothingToPlay | Self::CaptureUnsupported(_))
    }
}
