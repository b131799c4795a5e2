//! Input events consumed by the editor.
//!
//! Mouse and touch input both normalize to [`PointerEvent`] in
//! surface-local coordinates.

use serde::{Deserialize, Serialize};

use crate::Point;

/// Phase of a pointer gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerPhase {
    /// Button pressed / finger down.
    Down,
    /// Pointer moved.
    Move,
    /// Button released / finger lifted.
    Up,
    /// Pointer left the surface mid-gesture.
    Leave,
}

/// A pointer event in surface-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    /// Gesture phase.
    pub phase: PointerPhase,
    /// Pointer position.
    pub position: Point,
}

impl PointerEvent {
    /// Create a pointer event.
    #[must_use]
    pub const fn new(phase: PointerPhase, x: f32, y: f32) -> Self {
        Self {
            phase,
            position: Point::new(x, y),
        }
    }
}

/// Phase of a touch event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TouchPhase {
    /// Touch started (finger down).
    Start,
    /// Touch moved (finger dragging).
    Move,
    /// Touch ended (finger up).
    End,
    /// Touch cancelled (e.g., palm rejection).
    Cancel,
}

/// A single touch point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TouchPoint {
    /// Touch identifier (for multi-touch).
    pub id: u32,
    /// X position in surface coordinates.
    pub x: f32,
    /// Y position in surface coordinates.
    pub y: f32,
}

/// A touch event with one or more touch points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TouchEvent {
    /// Phase of this touch event.
    pub phase: TouchPhase,
    /// Active touches, or the changed touches for `End`/`Cancel`.
    pub touches: Vec<TouchPoint>,
}

impl TouchEvent {
    /// Create a new touch event.
    #[must_use]
    pub fn new(phase: TouchPhase, touches: Vec<TouchPoint>) -> Self {
        Self { phase, touches }
    }

    /// Get the primary (first) touch point.
    #[must_use]
    pub fn primary_touch(&self) -> Option<&TouchPoint> {
        self.touches.first()
    }

    /// Normalize to a single-pointer event using the primary touch.
    ///
    /// Returns `None` when there is no touch to read a position from.
    #[must_use]
    pub fn to_pointer(&self) -> Option<PointerEvent> {
        let touch = self.primary_touch()?;
        let phase = match self.phase {
            TouchPhase::Start => PointerPhase::Down,
            TouchPhase::Move => PointerPhase::Move,
            TouchPhase::End => PointerPhase::Up,
            TouchPhase::Cancel => PointerPhase::Leave,
        };
        Some(PointerEvent::new(phase, touch.x, touch.y))
    }
}

/// A key press.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEvent {
    /// Key name as reported by the platform (`"d"`, `" "`, `"Escape"`, ...).
    pub key: String,
    /// Whether focus was in a text field; shortcuts are ignored if so.
    #[serde(default)]
    pub in_text_field: bool,
}

impl KeyEvent {
    /// A key press outside any text field.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            in_text_field: false,
        }
    }
}

/// All input events the editor can receive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum InputEvent {
    /// Mouse or pen pointer.
    Pointer(PointerEvent),
    /// Raw touch event.
    Touch(TouchEvent),
    /// Keyboard.
    Key(KeyEvent),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_touch_normalizes_to_pointer() {
        let touch = TouchEvent::new(
            TouchPhase::Cancel,
            vec![
                TouchPoint { id: 3, x: 4.0, y: 5.0 },
                TouchPoint { id: 4, x: 9.0, y: 9.0 },
            ],
        );
        let pointer = touch.to_pointer().expect("primary touch");
        assert_eq!(pointer.phase, PointerPhase::Leave);
        assert_eq!(pointer.position, Point::new(4.0, 5.0));
    }

    #[test]
    fn test_touch_without_points() {
        assert!(TouchEvent::new(TouchPhase::End, vec![]).to_pointer().is_none());
    }

    #[test]
    fn test_input_event_json_shape() {
        let event: InputEvent = serde_json::from_str(
            r#"{"type":"pointer","data":{"phase":"down","position":{"x":1.0,"y":2.0}}}"#,
        )
        .expect("parse");
        assert_eq!(
            event,
            InputEvent::Pointer(PointerEvent::new(PointerPhase::Down, 1.0, 2.0))
        );
    }
}
