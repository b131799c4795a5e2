//! Tokens - the draggable players and balls on the field.

use serde::{Deserialize, Serialize};

use crate::{CoreError, Point};

/// Unique identifier for a token.
///
/// Ids are allocated by the [`Scene`](crate::Scene) in strictly increasing
/// order and are never reused while the editor runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenId(u64);

impl TokenId {
    /// Wrap a raw id value.
    #[must_use]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw id value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for TokenId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Team a player belongs to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Team {
    /// Team 1.
    #[default]
    One,
    /// Team 2.
    Two,
}

impl Team {
    /// The team number as shown to users (1 or 2).
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Self::One => 1,
            Self::Two => 2,
        }
    }

    /// Zero-based index, for per-team tables.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::One => 0,
            Self::Two => 1,
        }
    }
}

impl TryFrom<u8> for Team {
    type Error = CoreError;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        match n {
            1 => Ok(Self::One),
            2 => Ok(Self::Two),
            other => Err(CoreError::UnknownTeam(other)),
        }
    }
}

impl From<Team> for u8 {
    fn from(team: Team) -> Self {
        team.number()
    }
}

/// Player-only attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerInfo {
    /// Team color at placement time.
    pub team_color: String,
    /// Team membership.
    pub team: Team,
    /// Jersey label.
    pub label: String,
    /// Whether this player carries the ball.
    pub has_ball: bool,
}

/// What kind of token this is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TokenKind {
    /// A player on one of the two teams.
    Player(PlayerInfo),
    /// A ball.
    Ball,
}

/// A placeable, draggable token with an optional recorded path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// Unique identifier.
    pub id: TokenId,
    /// Current position (center).
    pub position: Point,
    /// Recorded positions for playback, oldest first.
    pub path: Vec<Point>,
    /// Fill color.
    pub color: String,
    /// Player or ball.
    pub kind: TokenKind,
}

impl Token {
    /// Create a player token.
    #[must_use]
    pub fn player(id: TokenId, position: Point, label: String, team: Team, color: String) -> Self {
        Self {
            id,
            position,
            path: Vec::new(),
            color: color.clone(),
            kind: TokenKind::Player(PlayerInfo {
                team_color: color,
                team,
                label,
                has_ball: false,
            }),
        }
    }

    /// Create a ball token.
    #[must_use]
    pub fn ball(id: TokenId, position: Point, color: String) -> Self {
        Self {
            id,
            position,
            path: Vec::new(),
            color,
            kind: TokenKind::Ball,
        }
    }

    /// Whether this token is a player.
    #[must_use]
    pub fn is_player(&self) -> bool {
        matches!(self.kind, TokenKind::Player(_))
    }

    /// Whether this token is a ball.
    #[must_use]
    pub fn is_ball(&self) -> bool {
        matches!(self.kind, TokenKind::Ball)
    }

    /// Player attributes, if this is a player.
    #[must_use]
    pub fn player_info(&self) -> Option<&PlayerInfo> {
        match &self.kind {
            TokenKind::Player(info) => Some(info),
            TokenKind::Ball => None,
        }
    }

    /// Mutable player attributes, if this is a player.
    pub fn player_info_mut(&mut self) -> Option<&mut PlayerInfo> {
        match &mut self.kind {
            TokenKind::Player(info) => Some(info),
            TokenKind::Ball => None,
        }
    }

    /// Whether this token is a player carrying the ball.
    #[must_use]
    pub fn has_ball(&self) -> bool {
        self.player_info().is_some_and(|info| info.has_ball)
    }

    /// Whether the recorded path is long enough to animate.
    #[must_use]
    pub fn has_playable_path(&self) -> bool {
        self.path.len() >= 2
    }

    /// Check if `point` lies within `radius` of the token center (inclusive).
    #[must_use]
    pub fn contains_point(&self, point: Point, radius: f32) -> bool {
        self.position.distance_squared(point) <= radius * radius
    }
}
