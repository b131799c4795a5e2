//! Headless surface that records draw calls instead of rasterizing them.
//!
//! Used by the CLI and by tests to inspect what a frame would paint.

use playboard_core::Point;

use crate::{RenderError, RenderResult, StrokeStyle, Surface, TextStyle};

/// One recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// Surface cleared.
    Clear,
    /// Filled rectangle.
    FillRect {
        /// Left edge.
        x: f32,
        /// Top edge.
        y: f32,
        /// Width.
        width: f32,
        /// Height.
        height: f32,
        /// Fill color.
        color: String,
    },
    /// Stroked polyline.
    Polyline {
        /// Vertices in order.
        points: Vec<Point>,
        /// Stroke color.
        color: String,
        /// Line width.
        width: f32,
        /// Dash pattern, empty for solid.
        dash: Vec<f32>,
    },
    /// Filled polygon.
    Polygon {
        /// Vertices in order.
        points: Vec<Point>,
        /// Fill color.
        color: String,
    },
    /// Filled circle.
    FillCircle {
        /// Center.
        center: Point,
        /// Radius.
        radius: f32,
        /// Fill color.
        color: String,
    },
    /// Stroked circle.
    StrokeCircle {
        /// Center.
        center: Point,
        /// Radius.
        radius: f32,
        /// Stroke color.
        color: String,
        /// Line width.
        width: f32,
    },
    /// Centered text.
    Text {
        /// Text content.
        text: String,
        /// Anchor point.
        at: Point,
        /// Font shorthand.
        font: String,
        /// Fill color.
        color: String,
    },
}

impl DrawOp {
    /// Primary color of the operation, if it has one.
    #[must_use]
    pub fn color(&self) -> Option<&str> {
        match self {
            Self::Clear => None,
            Self::FillRect { color, .. }
            | Self::Polyline { color, .. }
            | Self::Polygon { color, .. }
            | Self::FillCircle { color, .. }
            | Self::StrokeCircle { color, .. }
            | Self::Text { color, .. } => Some(color),
        }
    }
}

/// Surface that appends every call to an in-memory log.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    width: u32,
    height: u32,
    ops: Vec<DrawOp>,
}

impl RecordingSurface {
    /// Create a recording surface of the given size.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ops: Vec::new(),
        }
    }

    /// Change the surface size.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        tracing::debug!("Recording surface resized to {}x{}", width, height);
    }

    /// Recorded operations since the last clear.
    #[must_use]
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Index of the first operation matching `pred`.
    #[must_use]
    pub fn position(&self, pred: impl FnMut(&DrawOp) -> bool) -> Option<usize> {
        self.ops.iter().position(pred)
    }

    fn push(&mut self, op: DrawOp) {
        tracing::trace!("Draw {op:?}");
        self.ops.push(op);
    }
}

impl Surface for RecordingSurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn clear(&mut self) -> RenderResult<()> {
        self.ops.clear();
        self.push(DrawOp::Clear);
        Ok(())
    }

    fn fill_rect(
        &mut self,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: &str,
    ) -> RenderResult<()> {
        self.push(DrawOp::FillRect {
            x,
            y,
            width,
            height,
            color: color.to_string(),
        });
        Ok(())
    }

    fn stroke_polyline(&mut self, points: &[Point], style: &StrokeStyle<'_>) -> RenderResult<()> {
        self.push(DrawOp::Polyline {
            points: points.to_vec(),
            color: style.color.to_string(),
            width: style.width,
            dash: style.dash.to_vec(),
        });
        Ok(())
    }

    fn fill_polygon(&mut self, points: &[Point], color: &str) -> RenderResult<()> {
        if points.len() < 3 {
            return Err(RenderError::InvalidShape(format!(
                "polygon needs 3 points, got {}",
                points.len()
            )));
        }
        self.push(DrawOp::Polygon {
            points: points.to_vec(),
            color: color.to_string(),
        });
        Ok(())
    }

    fn fill_circle(&mut self, center: Point, radius: f32, color: &str) -> RenderResult<()> {
        self.push(DrawOp::FillCircle {
            center,
            radius,
            color: color.to_string(),
        });
        Ok(())
    }

    fn stroke_circle(
        &mut self,
        center: Point,
        radius: f32,
        style: &StrokeStyle<'_>,
    ) -> RenderResult<()> {
        self.push(DrawOp::StrokeCircle {
            center,
            radius,
            color: style.color.to_string(),
            width: style.width,
        });
        Ok(())
    }

    fn fill_text(&mut self, text: &str, at: Point, style: &TextStyle<'_>) -> RenderResult<()> {
        self.push(DrawOp::Text {
            text: text.to_string(),
            at,
            font: style.font.to_string(),
            color: style.color.to_string(),
        });
        Ok(())
    }
}
