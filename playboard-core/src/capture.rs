//! Video capture hook.
//!
//! Encoding happens outside the core; the editor only starts and stops
//! whatever capture backend the host provides.

use crate::{CoreError, CoreResult};

/// A host-provided recorder for the drawing surface.
pub trait VideoCapture: std::fmt::Debug {
    /// Begin recording.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::CaptureUnsupported`] if the environment cannot record.
    fn start(&mut self) -> CoreResult<()>;

    /// Stop recording and hand the result to the host.
    fn stop(&mut self);
}

/// Capture backend for hosts without recording support.
#[derive(Debug, Default)]
pub struct NoCapture;

impl VideoCapture for NoCapture {
    fn start(&mut self) -> CoreResult<()> {
        Err(CoreError::CaptureUnsupported(
            "no capture backend configured".to_string(),
        ))
    }

    fn stop(&mut self) {}
}
