//! Scene model: owns every token and drawing, allocates ids, tracks selection.

use serde::{Deserialize, Serialize};

use crate::drawing;
use crate::{CoreError, CoreResult, Drawing, Point, Team, Token, TokenId};

/// Summary of one player, as listed in the roster panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterEntry {
    /// Player id.
    pub id: TokenId,
    /// Jersey label.
    pub label: String,
    /// Team membership.
    pub team: Team,
    /// Body color.
    pub color: String,
    /// Whether the player carries the ball.
    pub has_ball: bool,
    /// Whether the player has a playable recorded path.
    pub has_path: bool,
    /// Whether the player is selected.
    pub selected: bool,
}

/// All tokens and annotations on the field.
///
/// Tokens are kept in one insertion-ordered list; players and balls are
/// views filtered by kind, so "reverse insertion order within each kind"
/// is a reverse scan of that list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scene {
    tokens: Vec<Token>,
    drawings: Vec<Drawing>,
    selected: Option<TokenId>,
    next_id: u64,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    /// Create an empty scene.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tokens: Vec::new(),
            drawings: Vec::new(),
            selected: None,
            next_id: 1,
        }
    }

    fn allocate_id(&mut self) -> TokenId {
        let id = TokenId::from_raw(self.next_id);
        self.next_id += 1;
        id
    }

    /// Place a player and return its fresh id.
    pub fn add_player(&mut self, at: Point, label: String, team: Team, color: String) -> TokenId {
        let id = self.allocate_id();
        tracing::debug!("Add player {id} '{label}' team {} at ({}, {})", team.number(), at.x, at.y);
        self.tokens.push(Token::player(id, at, label, team, color));
        id
    }

    /// Place a ball and return its fresh id.
    pub fn add_ball(&mut self, at: Point, color: String) -> TokenId {
        let id = self.allocate_id();
        tracing::debug!("Add ball {id} at ({}, {})", at.x, at.y);
        self.tokens.push(Token::ball(id, at, color));
        id
    }

    /// Remove a token. Clears the selection if it pointed at this token.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is not found.
    pub fn remove(&mut self, id: TokenId) -> CoreResult<Token> {
        let index = self
            .tokens
            .iter()
            .position(|t| t.id == id)
            .ok_or(CoreError::TokenNotFound(id))?;
        if self.selected == Some(id) {
            self.selected = None;
        }
        Ok(self.tokens.remove(index))
    }

    /// Remove every drawing.
    pub fn clear_drawings(&mut self) {
        self.drawings.clear();
    }

    /// Remove every token and drawing and clear the selection.
    ///
    /// The id counter keeps running, so ids are never reused.
    pub fn clear_all(&mut self) {
        self.tokens.clear();
        self.drawings.clear();
        self.selected = None;
    }

    /// Get a token by id.
    #[must_use]
    pub fn token(&self, id: TokenId) -> Option<&Token> {
        self.tokens.iter().find(|t| t.id == id)
    }

    /// Get a mutable reference to a token by id.
    pub fn token_mut(&mut self, id: TokenId) -> Option<&mut Token> {
        self.tokens.iter_mut().find(|t| t.id == id)
    }

    /// All tokens, in insertion order.
    #[must_use]
    pub fn tokens(&self) -> impl DoubleEndedIterator<Item = &Token> {
        self.tokens.iter()
    }

    /// All tokens, mutable, in insertion order.
    #[must_use]
    pub fn tokens_mut(&mut self) -> impl Iterator<Item = &mut Token> {
        self.tokens.iter_mut()
    }

    /// Players, in insertion order.
    #[must_use]
    pub fn players(&self) -> impl DoubleEndedIterator<Item = &Token> {
        self.tokens.iter().filter(|t| t.is_player())
    }

    /// Balls, in insertion order.
    #[must_use]
    pub fn balls(&self) -> impl DoubleEndedIterator<Item = &Token> {
        self.tokens.iter().filter(|t| t.is_ball())
    }

    /// Number of players.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players().count()
    }

    /// Number of tokens.
    #[must_use]
    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }

    /// Check if the scene has no tokens and no drawings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty() && self.drawings.is_empty()
    }

    /// Find the token under `point`.
    ///
    /// Players are checked before balls, each in reverse insertion order, so
    /// the most recently placed (top-most rendered) token wins overlaps.
    #[must_use]
    pub fn token_at(&self, point: Point, player_radius: f32, ball_radius: f32) -> Option<TokenId> {
        self.players()
            .rev()
            .find(|t| t.contains_point(point, player_radius))
            .or_else(|| self.balls().rev().find(|t| t.contains_point(point, ball_radius)))
            .map(|t| t.id)
    }

    /// Select a token.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is not found.
    pub fn select(&mut self, id: TokenId) -> CoreResult<()> {
        if self.token(id).is_none() {
            return Err(CoreError::TokenNotFound(id));
        }
        self.selected = Some(id);
        Ok(())
    }

    /// Clear the selection.
    pub fn deselect(&mut self) {
        self.selected = None;
    }

    /// The selected id, if it still refers to a live token.
    #[must_use]
    pub fn selected_id(&self) -> Option<TokenId> {
        self.selected.filter(|id| self.token(*id).is_some())
    }

    /// The selected token, if any.
    #[must_use]
    pub fn selected(&self) -> Option<&Token> {
        self.selected.and_then(|id| self.token(id))
    }

    /// Make `id` the ball carrier (or not), clearing every other player first.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is missing or is not a player.
    pub fn set_has_ball(&mut self, id: TokenId, has_ball: bool) -> CoreResult<()> {
        match self.token(id) {
            None => return Err(CoreError::TokenNotFound(id)),
            Some(t) if !t.is_player() => return Err(CoreError::NotAPlayer(id)),
            Some(_) => {}
        }
        for token in &mut self.tokens {
            let is_target = token.id == id;
            if let Some(info) = token.player_info_mut() {
                info.has_ball = has_ball && is_target;
            }
        }
        Ok(())
    }

    /// Flip whether `id` carries the ball. Returns the new value.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is missing or is not a player.
    pub fn toggle_has_ball(&mut self, id: TokenId) -> CoreResult<bool> {
        let had = self.token(id).is_some_and(Token::has_ball);
        self.set_has_ball(id, !had)?;
        Ok(!had)
    }

    /// Forget the recorded path of one token.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is not found.
    pub fn clear_path(&mut self, id: TokenId) -> CoreResult<()> {
        let token = self.token_mut(id).ok_or(CoreError::TokenNotFound(id))?;
        token.path.clear();
        Ok(())
    }

    /// Forget every recorded path.
    pub fn clear_all_paths(&mut self) {
        for token in &mut self.tokens {
            token.path.clear();
        }
    }

    /// Whether any token has a path long enough to animate.
    #[must_use]
    pub fn has_playable_paths(&self) -> bool {
        self.tokens.iter().any(Token::has_playable_path)
    }

    /// Committed drawings, oldest first.
    #[must_use]
    pub fn drawings(&self) -> &[Drawing] {
        &self.drawings
    }

    /// Append a committed drawing.
    pub fn push_drawing(&mut self, drawing: Drawing) {
        self.drawings.push(drawing);
    }

    /// Remove the drawing nearest to `point` if it is strictly closer than
    /// `threshold`. Returns the removed drawing.
    pub fn erase_nearest(&mut self, point: Point, threshold: f32) -> Option<Drawing> {
        let (index, dist) = drawing::nearest(&self.drawings, point)?;
        if dist < threshold {
            tracing::debug!("Erase drawing {index} at distance {dist:.1}");
            Some(self.drawings.remove(index))
        } else {
            None
        }
    }

    /// Player summaries in insertion order.
    #[must_use]
    pub fn roster(&self) -> Vec<RosterEntry> {
        let selected = self.selected_id();
        self.players()
            .filter_map(|t| {
                t.player_info().map(|info| RosterEntry {
                    id: t.id,
                    label: info.label.clone(),
                    team: info.team,
                    color: t.color.clone(),
                    has_ball: info.has_ball,
                    has_path: t.has_playable_path(),
                    selected: selected == Some(t.id),
                })
            })
            .collect()
    }
}
