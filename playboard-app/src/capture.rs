//! Video capture delegated to page-level JavaScript hooks.

use js_sys::Function;
use playboard_core::{CoreError, CoreResult, VideoCapture};
use wasm_bindgen::JsValue;

/// Calls JS `start()` / `stop()` callbacks, typically wrapping a
/// `MediaRecorder` on the canvas stream.
///
/// `start` may return `false` to report that recording is unavailable.
#[derive(Debug)]
pub struct JsCapture {
    start: Function,
    stop: Function,
}

impl JsCapture {
    /// Wrap the two callbacks.
    #[must_use]
    pub fn new(start: Function, stop: Function) -> Self {
        Self { start, stop }
    }
}

impl VideoCapture for JsCapture {
    fn start(&mut self) -> CoreResult<()> {
        match self.start.call0(&JsValue::NULL) {
            Ok(v) if v.as_bool() == Some(false) => Err(CoreError::CaptureUnsupported(
                "recording is not available in this browser".to_string(),
            )),
            Ok(_) => Ok(()),
            Err(e) => Err(CoreError::CaptureUnsupported(format!("{e:?}"))),
        }
    }

    fn stop(&mut self) {
        if let Err(e) = self.stop.call0(&JsValue::NULL) {
            tracing::warn!("Capture stop hook failed: {:?}", e);
        }
    }
}
