//! Tool state machine and pointer-down classification.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{CoreError, EditorConfig, Point, Scene, TokenId};

/// Active annotation tool.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    /// No tool - pointer places, selects and drags tokens.
    #[default]
    None,
    /// Freehand drawing.
    Draw,
    /// Straight arrows.
    Arrow,
    /// Erase the nearest annotation.
    Erase,
}

impl FromStr for Tool {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Self::None),
            "draw" => Ok(Self::Draw),
            "arrow" => Ok(Self::Arrow),
            "erase" => Ok(Self::Erase),
            other => Err(CoreError::UnknownTool(other.to_string())),
        }
    }
}

impl std::fmt::Display for Tool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::None => "none",
            Self::Draw => "draw",
            Self::Arrow => "arrow",
            Self::Erase => "erase",
        })
    }
}

/// What a click on empty field places.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddMode {
    /// Place a player.
    #[default]
    Player,
    /// Place a ball, then fall back to [`AddMode::Player`].
    Ball,
}

/// What a pointer-down should do, given the tool state and the scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerAction {
    /// Start a freehand stroke.
    BeginStroke,
    /// Start an arrow.
    BeginArrow,
    /// Erase the nearest annotation.
    Erase,
    /// Pick up and drag this token.
    Drag(TokenId),
    /// Place a new player.
    PlacePlayer,
    /// Place a new ball.
    PlaceBall,
}

/// Current tool and add-mode.
///
/// The stored add-mode survives tool changes but only takes effect while
/// the tool is [`Tool::None`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolState {
    tool: Tool,
    add_mode: AddMode,
}

impl ToolState {
    /// Active tool.
    #[must_use]
    pub const fn tool(&self) -> Tool {
        self.tool
    }

    /// Stored add-mode.
    #[must_use]
    pub const fn add_mode(&self) -> AddMode {
        self.add_mode
    }

    /// Whether a click on empty field would place a token.
    #[must_use]
    pub fn placement_enabled(&self) -> bool {
        self.tool == Tool::None
    }

    /// Toggle `tool`: selecting the active tool reverts to [`Tool::None`].
    pub fn set_tool(&mut self, tool: Tool) {
        self.tool = if self.tool == tool { Tool::None } else { tool };
        tracing::debug!("Tool: {:?}", self.tool);
    }

    /// Set the add-mode. Always drops back to [`Tool::None`].
    pub fn set_add_mode(&mut self, mode: AddMode) {
        self.add_mode = mode;
        self.tool = Tool::None;
        tracing::debug!("Add mode: {:?}", self.add_mode);
    }

    /// Drop any tool without touching the add-mode.
    pub fn clear_tool(&mut self) {
        self.tool = Tool::None;
    }

    /// Classify a pointer-down at `point`.
    #[must_use]
    pub fn classify(&self, scene: &Scene, point: Point, config: &EditorConfig) -> PointerAction {
        match self.tool {
            Tool::Draw => PointerAction::BeginStroke,
            Tool::Arrow => PointerAction::BeginArrow,
            Tool::Erase => PointerAction::Erase,
            Tool::None => {
                match scene.token_at(point, config.player_hit_radius(), config.ball_hit_radius())
                {
                    Some(id) => PointerAction::Drag(id),
                    None if self.add_mode == AddMode::Ball => PointerAction::PlaceBall,
                    None => PointerAction::PlacePlayer,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Team;

    #[test]
    fn test_set_tool_toggles() {
        let mut tools = ToolState::default();
        tools.set_tool(Tool::Draw);
        assert_eq!(tools.tool(), Tool::Draw);
        tools.set_tool(Tool::Arrow);
        assert_eq!(tools.tool(), Tool::Arrow);
        tools.set_tool(Tool::Arrow);
        assert_eq!(tools.tool(), Tool::None);
    }

    #[test]
    fn test_tool_name_parses_back() {
        for tool in [Tool::None, Tool::Draw, Tool::Arrow, Tool::Erase] {
            assert_eq!(tool.to_string().parse::<Tool>().expect("parse"), tool);
        }
        assert!("lasso".parse::<Tool>().is_err());
    }

    #[test]
    fn test_set_add_mode_clears_tool() {
        let mut tools = ToolState::default();
        tools.set_tool(Tool::Erase);
        tools.set_add_mode(AddMode::Ball);
        assert_eq!(tools.tool(), Tool::None);
        assert_eq!(tools.add_mode(), AddMode::Ball);
    }

    #[test]
    fn test_tool_keeps_add_mode_but_suppresses_placement() {
        let mut tools = ToolState::default();
        tools.set_add_mode(AddMode::Ball);
        tools.set_tool(Tool::Draw);
        assert_eq!(tools.add_mode(), AddMode::Ball);
        assert!(!tools.placement_enabled());

        let scene = Scene::new();
        let action = tools.classify(&scene, Point::new(1.0, 1.0), &EditorConfig::default());
        assert_eq!(action, PointerAction::BeginStroke);
    }

    #[test]
    fn test_classify_none_tool() {
        let config = EditorConfig::default();
        let mut scene = Scene::new();
        let id = scene.add_player(Point::new(50.0, 50.0), "9".into(), Team::Two, "#3498db".into());
        let mut tools = ToolState::default();

        assert_eq!(
            tools.classify(&scene, Point::new(50.0, 71.0), &config),
            PointerAction::Drag(id)
        );
        assert_eq!(
            tools.classify(&scene, Point::new(50.0, 73.0), &config),
            PointerAction::PlacePlayer
        );
        tools.set_add_mode(AddMode::Ball);
        assert_eq!(
            tools.classify(&scene, Point::new(300.0, 300.0), &config),
            PointerAction::PlaceBall
        );
    }

    #[test]
    fn test_tool_from_str() {
        assert_eq!("erase".parse::<Tool>().ok(), Some(Tool::Erase));
        assert!(matches!("lasso".parse::<Tool>(), Err(CoreError::UnknownTool(_))));
    }
}
