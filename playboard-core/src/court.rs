//! Court modes and surface sizing.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::CoreError;

/// Which part of the field is shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CourtMode {
    /// Attacking half with one goal.
    #[default]
    Half,
    /// Whole field.
    Full,
}

impl CourtMode {
    /// Nominal field dimensions (width, height) in meters.
    #[must_use]
    pub const fn dimensions(self) -> (f32, f32) {
        match self {
            Self::Half => (100.0, 75.0),
            Self::Full => (110.0, 60.0),
        }
    }

    /// Width-to-height ratio of the drawn field.
    #[must_use]
    pub fn aspect_ratio(self) -> f32 {
        let (w, h) = self.dimensions();
        w / h
    }

    /// Largest whole-pixel surface size with this ratio that fits in
    /// `max_width` x `max_height`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn fit(self, max_width: f32, max_height: f32) -> (u32, u32) {
        let (rw, rh) = self.dimensions();
        let (mut w, mut h) = (max_width, max_width * rh / rw);
        if h > max_height {
            h = max_height;
            w = max_height * rw / rh;
        }
        (w.max(0.0).floor() as u32, h.max(0.0).floor() as u32)
    }
}

impl FromStr for CourtMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "half" => Ok(Self::Half),
            "full" => Ok(Self::Full),
            other => Err(CoreError::UnknownCourtMode(other.to_string())),
        }
    }
}

impl std::fmt::Display for CourtMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Half => "half",
            Self::Full => "full",
        })
    }
}
