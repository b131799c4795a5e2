//! Editor configuration: token sizes, gesture thresholds and default colors.

use serde::{Deserialize, Serialize};

use crate::{CoreResult, Team};

/// Tunables for the interaction engine.
///
/// Every field has a default, so a JSON config only needs to name the
/// values it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Visual radius of a player token.
    pub player_radius: f32,
    /// Visual radius of a ball token.
    pub ball_radius: f32,
    /// Extra grab margin around players for hit-testing.
    pub player_grab_margin: f32,
    /// Extra grab margin around balls for hit-testing.
    pub ball_grab_margin: f32,
    /// Arrows must be strictly longer than this to be committed.
    pub min_arrow_length: f32,
    /// Erase only removes drawings strictly closer than this.
    pub erase_threshold: f32,
    /// Upper bound on the number of frames a playback runs for.
    pub playback_frame_budget: usize,
    /// Color of freehand strokes and arrows.
    pub annotation_color: String,
    /// Width of freehand strokes.
    pub stroke_width: f32,
    /// Fill color of ball tokens.
    pub ball_color: String,
    /// Swatches offered per team.
    pub team_palettes: [Vec<String>; 2],
    /// Initial team colors.
    pub team_colors: [String; 2],
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            player_radius: 17.0,
            ball_radius: 9.0,
            player_grab_margin: 5.0,
            ball_grab_margin: 6.0,
            min_arrow_length: 10.0,
            erase_threshold: 14.0,
            playback_frame_budget: 150,
            annotation_color: "rgba(255,220,50,.9)".to_string(),
            stroke_width: 2.5,
            ball_color: "#f9a825".to_string(),
            team_palettes: [
                ["#e74c3c", "#c0392b", "#ff6b6b", "#ff8e53", "#e67e22"]
                    .map(String::from)
                    .to_vec(),
                ["#3498db", "#2980b9", "#1abc9c", "#9b59b6", "#2ecc71"]
                    .map(String::from)
                    .to_vec(),
            ],
            team_colors: ["#e74c3c".to_string(), "#3498db".to_string()],
        }
    }
}

impl EditorConfig {
    /// Parse a configuration from JSON, filling unspecified fields with defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or has mistyped fields.
    pub fn from_json(json: &str) -> CoreResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Hit-test radius for players.
    #[must_use]
    pub fn player_hit_radius(&self) -> f32 {
        self.player_radius + self.player_grab_margin
    }

    /// Hit-test radius for balls.
    #[must_use]
    pub fn ball_hit_radius(&self) -> f32 {
        self.ball_radius + self.ball_grab_margin
    }

    /// Swatches available for `team`.
    #[must_use]
    pub fn palette(&self, team: Team) -> &[String] {
        &self.team_palettes[team.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_hit_radii() {
        let config = EditorConfig::default();
        assert!((config.player_hit_radius() - 22.0).abs() < f32::EPSILON);
        assert!((config.ball_hit_radius() - 15.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config =
            EditorConfig::from_json(r#"{"erase_threshold": 20.0, "playback_frame_budget": 60}"#)
                .expect("valid config");
        assert!((config.erase_threshold - 20.0).abs() < f32::EPSILON);
        assert_eq!(config.playback_frame_budget, 60);
        assert!((config.player_radius - 17.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_mistyped_json_is_rejected() {
        let result = EditorConfig::from_json(r#"{"player_radius": "big"}"#);
        assert!(matches!(result, Err(crate::CoreError::Config(_))));
    }

    #[test]
    fn test_palettes_start_with_team_colors() {
        let config = EditorConfig::default();
        assert_eq!(config.palette(Team::One)[0], config.team_colors[0]);
        assert_eq!(config.palette(Team::Two)[0], config.team_colors[1]);
    }
}
