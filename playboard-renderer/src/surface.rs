//! The drawing surface abstraction.
//!
//! A [`Surface`] is an immediate-mode 2D target with CSS-style color
//! strings. The browser adapter backs it with a `<canvas>` 2D context;
//! [`crate::backend::RecordingSurface`] records calls for headless use.

use playboard_core::Point;

use crate::RenderResult;

/// How a line is stroked.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle<'a> {
    /// CSS color.
    pub color: &'a str,
    /// Line width in pixels.
    pub width: f32,
    /// Dash pattern (on, off, ...). Empty for a solid line.
    pub dash: &'a [f32],
}

impl<'a> StrokeStyle<'a> {
    /// A solid line.
    #[must_use]
    pub const fn solid(color: &'a str, width: f32) -> Self {
        Self {
            color,
            width,
            dash: &[],
        }
    }

    /// A dashed line.
    #[must_use]
    pub const fn dashed(color: &'a str, width: f32, dash: &'a [f32]) -> Self {
        Self { color, width, dash }
    }
}

/// Text placement and styling. Text is centered on its anchor point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle<'a> {
    /// CSS font shorthand, e.g. `"bold 12px sans-serif"`.
    pub font: &'a str,
    /// CSS color.
    pub color: &'a str,
}

/// Immediate-mode 2D drawing target.
///
/// Lines use round caps and joins.
pub trait Surface {
    /// Surface width in pixels.
    fn width(&self) -> u32;

    /// Surface height in pixels.
    fn height(&self) -> u32;

    /// Erase everything.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the call.
    fn clear(&mut self) -> RenderResult<()>;

    /// Fill an axis-aligned rectangle.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the call.
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: &str)
        -> RenderResult<()>;

    /// Stroke an open polyline through `points`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the call.
    fn stroke_polyline(&mut self, points: &[Point], style: &StrokeStyle<'_>) -> RenderResult<()>;

    /// Fill a closed polygon.
    ///
    /// # Errors
    ///
    /// Returns [`crate::RenderError::InvalidShape`] for fewer than three
    /// points, or an error if the backend rejects the call.
    fn fill_polygon(&mut self, points: &[Point], color: &str) -> RenderResult<()>;

    /// Fill a circle.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the call.
    fn fill_circle(&mut self, center: Point, radius: f32, color: &str) -> RenderResult<()>;

    /// Stroke a circle outline.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the call.
    fn stroke_circle(
        &mut self,
        center: Point,
        radius: f32,
        style: &StrokeStyle<'_>,
    ) -> RenderResult<()>;

    /// Draw `text` centered on `at`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the call.
    fn fill_text(&mut self, text: &str, at: Point, style: &TextStyle<'_>) -> RenderResult<()>;
}
