//! Renderer error types.

use thiserror::Error;

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors that can occur during rendering.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The drawing backend rejected a call.
    #[error("Surface error: {0}")]
    Surface(String),

    /// A shape had too few points to draw.
    #[error("Invalid shape: {0}")]
    InvalidShape(String),
}
