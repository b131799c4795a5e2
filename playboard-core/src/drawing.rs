//! Committed annotations: freehand strokes and straight arrows.

use serde::{Deserialize, Serialize};

use crate::geometry::{distance_to_segment, Point};

/// A freehand polyline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    /// Sampled pointer positions, in order.
    pub points: Vec<Point>,
    /// CSS color.
    pub color: String,
    /// Line width in pixels.
    pub width: f32,
}

impl Stroke {
    /// Start a stroke at a single point.
    #[must_use]
    pub fn begin(start: Point, color: String, width: f32) -> Self {
        Self {
            points: vec![start],
            color,
            width,
        }
    }

    /// Whether the stroke has enough points to be kept.
    #[must_use]
    pub fn is_committable(&self) -> bool {
        self.points.len() >= 2
    }
}

/// A straight arrow from `start` to `end`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Arrow {
    /// Tail of the arrow.
    pub start: Point,
    /// Tip of the arrow.
    pub end: Point,
    /// CSS color.
    pub color: String,
}

impl Arrow {
    /// Length of the shaft.
    #[must_use]
    pub fn length(&self) -> f32 {
        self.start.distance_to(self.end)
    }
}

/// A committed annotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Drawing {
    /// Freehand stroke.
    Stroke(Stroke),
    /// Straight arrow.
    Arrow(Arrow),
}

impl Drawing {
    /// Representative distance from `point` to this drawing, used by erase.
    ///
    /// Strokes measure to their nearest sample point, arrows to their shaft.
    #[must_use]
    pub fn distance_to(&self, point: Point) -> f32 {
        match self {
            Self::Stroke(stroke) => stroke
                .points
                .iter()
                .map(|p| p.distance_to(point))
                .fold(f32::INFINITY, f32::min),
            Self::Arrow(arrow) => distance_to_segment(point, arrow.start, arrow.end),
        }
    }
}

/// Index of the drawing nearest to `point`, with its distance.
///
/// Scans in order and keeps the first strict minimum, so earlier drawings
/// win exact ties.
#[must_use]
pub fn nearest(drawings: &[Drawing], point: Point) -> Option<(usize, f32)> {
    let mut best: Option<(usize, f32)> = None;
    for (index, drawing) in drawings.iter().enumerate() {
        let dist = drawing.distance_to(point);
        let closer = match best {
            Some((_, d)) => dist < d,
            None => true,
        };
        if closer {
            best = Some((index, dist));
        }
    }
    best.filter(|(_, d)| d.is_finite())
}
