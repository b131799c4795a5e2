//! `<canvas>` 2D context as a render [`Surface`].

use std::f64::consts::TAU;

use playboard_core::Point;
use playboard_renderer::{RenderError, RenderResult, StrokeStyle, Surface, TextStyle};
use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

fn js_error(context: &str, err: &JsValue) -> RenderError {
    RenderError::Surface(format!("{context}: {err:?}"))
}

/// Browser canvas surface.
pub struct Canvas2dSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl Canvas2dSurface {
    /// Wrap a canvas and its 2D context.
    pub fn new(canvas: HtmlCanvasElement, ctx: CanvasRenderingContext2d) -> Self {
        ctx.set_line_cap("round");
        ctx.set_line_join("round");
        Self { canvas, ctx }
    }

    /// Set the backing-store size of the canvas.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        // Resizing resets context state.
        self.ctx.set_line_cap("round");
        self.ctx.set_line_join("round");
        tracing::debug!("Canvas resized to {}x{}", width, height);
    }

    fn trace_path(&self, points: &[Point]) {
        self.ctx.begin_path();
        let mut iter = points.iter();
        if let Some(first) = iter.next() {
            self.ctx.move_to(f64::from(first.x), f64::from(first.y));
        }
        for p in iter {
            self.ctx.line_to(f64::from(p.x), f64::from(p.y));
        }
    }

    fn circle(&self, center: Point, radius: f32) -> RenderResult<()> {
        self.ctx.begin_path();
        self.ctx
            .arc(
                f64::from(center.x),
                f64::from(center.y),
                f64::from(radius.max(0.0)),
                0.0,
                TAU,
            )
            .map_err(|e| js_error("arc", &e))
    }

    fn apply_stroke(&self, style: &StrokeStyle<'_>) -> RenderResult<()> {
        self.ctx.set_stroke_style_str(style.color);
        self.ctx.set_line_width(f64::from(style.width));
        let dash: js_sys::Array = style
            .dash
            .iter()
            .map(|d| JsValue::from_f64(f64::from(*d)))
            .collect();
        self.ctx
            .set_line_dash(&dash)
            .map_err(|e| js_error("setLineDash", &e))
    }
}

impl Surface for Canvas2dSurface {
    fn width(&self) -> u32 {
        self.canvas.width()
    }

    fn height(&self) -> u32 {
        self.canvas.height()
    }

    fn clear(&mut self) -> RenderResult<()> {
        self.ctx.clear_rect(
            0.0,
            0.0,
            f64::from(self.canvas.width()),
            f64::from(self.canvas.height()),
        );
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
        self.ctx.set_fill_style_str(color);
        self.ctx.fill_rect(
            f64::from(x),
            f64::from(y),
            f64::from(width),
            f64::from(height),
        );
        Ok(())
    }

    fn stroke_polyline(&mut self, points: &[Point], style: &StrokeStyle<'_>) -> RenderResult<()> {
        if points.len() < 2 {
            return Ok(());
        }
        self.trace_path(points);
        self.apply_stroke(style)?;
        self.ctx.stroke();
        Ok(())
    }

    fn fill_polygon(&mut self, points: &[Point], color: &str) -> RenderResult<()> {
        if points.len() < 3 {
            return Err(RenderError::InvalidShape(format!(
                "polygon needs 3 points, got {}",
                points.len()
            )));
        }
        self.trace_path(points);
        self.ctx.close_path();
        self.ctx.set_fill_style_str(color);
        self.ctx.fill();
        Ok(())
    }

    fn fill_circle(&mut self, center: Point, radius: f32, color: &str) -> RenderResult<()> {
        self.circle(center, radius)?;
        self.ctx.set_fill_style_str(color);
        self.ctx.fill();
        Ok(())
    }

    fn stroke_circle(
        &mut self,
        center: Point,
        radius: f32,
        style: &StrokeStyle<'_>,
    ) -> RenderResult<()> {
        self.circle(center, radius)?;
        self.apply_stroke(style)?;
        self.ctx.stroke();
        Ok(())
    }

    fn fill_text(&mut self, text: &str, at: Point, style: &TextStyle<'_>) -> RenderResult<()> {
        self.ctx.set_font(style.font);
        self.ctx.set_text_align("center");
        self.ctx.set_text_baseline("middle");
        self.ctx.set_fill_style_str(style.color);
        self.ctx
            .fill_text(text, f64::from(at.x), f64::from(at.y))
            .map_err(|e| js_error("fillText", &e))
    }
}
