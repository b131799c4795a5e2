//! Field background.
//!
//! The field is static scenery painted first on every frame. Hosts with a
//! detailed sport-specific field supply their own [`FieldRenderer`].

use playboard_core::{CourtMode, Point};

use crate::{RenderResult, StrokeStyle, Surface};

/// Paints the static field background.
pub trait FieldRenderer {
    /// Paint the field for `court` over a `width` x `height` area.
    ///
    /// # Errors
    ///
    /// Returns an error if a draw call fails.
    fn draw(
        &self,
        surface: &mut dyn Surface,
        width: f32,
        height: f32,
        court: CourtMode,
    ) -> RenderResult<()>;
}

/// Turf with mowing stripes, a boundary and, on the full court, a center
/// line and circle.
#[derive(Debug, Clone)]
pub struct PlainField {
    /// Turf color.
    pub turf: String,
    /// Stripe overlay color.
    pub stripe: String,
    /// Boundary line color.
    pub line: String,
    /// Center line color.
    pub center_line: String,
}

impl Default for PlainField {
    fn default() -> Self {
        Self {
            turf: "#2c7a2c".to_string(),
            stripe: "rgba(0,0,0,0.04)".to_string(),
            line: "rgba(255,255,255,0.88)".to_string(),
            center_line: "rgba(255,255,255,0.45)".to_string(),
        }
    }
}

const CENTER_DASH: [f32; 2] = [7.0, 5.0];

impl PlainField {
    fn boundary(width: f32, height: f32, court: CourtMode) -> [Point; 5] {
        let (pad_x, pad_y) = match court {
            CourtMode::Half => (0.035, 0.035),
            CourtMode::Full => (0.03, 0.04),
        };
        let (lx, rx) = (width * pad_x, width * (1.0 - pad_x));
        let (ty, by) = (height * pad_y, height * (1.0 - pad_y));
        [
            Point::new(lx, ty),
            Point::new(rx, ty),
            Point::new(rx, by),
            Point::new(lx, by),
            Point::new(lx, ty),
        ]
    }
}

impl FieldRenderer for PlainField {
    fn draw(
        &self,
        surface: &mut dyn Surface,
        width: f32,
        height: f32,
        court: CourtMode,
    ) -> RenderResult<()> {
        surface.fill_rect(0.0, 0.0, width, height, &self.turf)?;

        let stripes: u8 = match court {
            CourtMode::Half => 10,
            CourtMode::Full => 12,
        };
        let stripe_width = width / f32::from(stripes);
        for i in (0..stripes).step_by(2) {
            surface.fill_rect(
                f32::from(i) * stripe_width,
                0.0,
                stripe_width,
                height,
                &self.stripe,
            )?;
        }

        let boundary = Self::boundary(width, height, court);
        surface.stroke_polyline(&boundary, &StrokeStyle::solid(&self.line, 2.5))?;

        if court == CourtMode::Full {
            let left = boundary[0].x;
            let right = boundary[1].x;
            let mid = Point::new(width / 2.0, height / 2.0);
            surface.stroke_polyline(
                &[Point::new(left, mid.y), Point::new(right, mid.y)],
                &StrokeStyle::dashed(&self.center_line, 1.8, &CENTER_DASH),
            )?;
            surface.stroke_circle(
                mid,
                (right - left) * 0.05,
                &StrokeStyle::solid(&self.line, 1.8),
            )?;
        }
        Ok(())
    }
}
