//! # Playboard Renderer
//!
//! Paints an [`Editor`] onto any [`Surface`] in a fixed layer order.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ 6. Preview     (stroke / arrow in progress) │
//! │ 5. Players     (shadow, body, ring, label)  │
//! │ 4. Balls                                    │
//! │ 3. Drawings    (strokes, arrows)            │
//! │ 2. Ghost paths (dashed recorded motion)     │
//! │ 1. Field       (FieldRenderer)              │
//! └─────────────────────────────────────────────┘
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod backend;
pub mod error;
pub mod field;
pub mod surface;

pub use backend::{DrawOp, RecordingSurface};
pub use error::{RenderError, RenderResult};
pub use field::{FieldRenderer, PlainField};
pub use surface::{StrokeStyle, Surface, TextStyle};

use playboard_core::geometry::arrowhead;
use playboard_core::{Drawing, Editor, Point, Preview, Token, TokenKind};

/// Configuration for the renderer.
#[derive(Debug, Clone)]
pub struct RendererConfig {
    /// Width of recorded-path ghosts.
    pub ghost_width: f32,
    /// Dash pattern of recorded-path ghosts.
    pub ghost_dash: [f32; 2],
    /// Alpha suffix appended to the token color for ghost lines.
    pub ghost_alpha: String,
    /// Alpha suffix appended to the token color for ghost arrowheads.
    pub ghost_head_alpha: String,
    /// Arrowhead size at the end of a ghost path.
    pub ghost_head_size: f32,
    /// Shaft width of arrow annotations.
    pub arrow_width: f32,
    /// Arrowhead size of arrow annotations.
    pub arrow_head_size: f32,
    /// Color of the live arrow preview.
    pub preview_color: String,
    /// Player selection ring color.
    pub selection_color: String,
    /// Gap between a selected player's body and its ring.
    pub selection_gap: f32,
    /// Drop shadow color.
    pub shadow_color: String,
    /// Drop shadow offset, both axes.
    pub shadow_offset: f32,
    /// Outline of unselected tokens.
    pub outline_color: String,
    /// Fill of the has-ball badge.
    pub badge_color: String,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            ghost_width: 2.5,
            ghost_dash: [5.0, 4.0],
            ghost_alpha: "99".to_string(),
            ghost_head_alpha: "cc".to_string(),
            ghost_head_size: 9.0,
            arrow_width: 2.5,
            arrow_head_size: 13.0,
            preview_color: "rgba(255,220,50,.9)".to_string(),
            selection_color: "#e8c84a".to_string(),
            selection_gap: 5.0,
            shadow_color: "rgba(0,0,0,0.3)".to_string(),
            shadow_offset: 1.5,
            outline_color: "rgba(255,255,255,.35)".to_string(),
            badge_color: "#f9a825".to_string(),
        }
    }
}

/// Layered renderer for the editor scene.
pub struct Renderer {
    config: RendererConfig,
    field: Box<dyn FieldRenderer>,
    frame_count: u64,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(RendererConfig::default())
    }
}

impl Renderer {
    /// Create a renderer that paints the [`PlainField`].
    #[must_use]
    pub fn new(config: RendererConfig) -> Self {
        Self {
            config,
            field: Box::new(PlainField::default()),
            frame_count: 0,
        }
    }

    /// Use `field` for the background layer.
    #[must_use]
    pub fn with_field(mut self, field: Box<dyn FieldRenderer>) -> Self {
        self.field = field;
        self
    }

    /// Render a frame.
    ///
    /// # Errors
    ///
    /// Returns an error if the surface rejects a draw call.
    #[allow(clippy::cast_precision_loss)]
    pub fn render(&mut self, surface: &mut dyn Surface, editor: &Editor) -> RenderResult<()> {
        let (width, height) = (surface.width() as f32, surface.height() as f32);
        let scene = editor.scene();
        tracing::trace!(
            "Render frame {}: {} tokens, {} drawings, {width}x{height}",
            self.frame_count,
            scene.token_count(),
            scene.drawings().len()
        );

        surface.clear()?;
        self.field.draw(surface, width, height, editor.court())?;

        for token in scene.players().chain(scene.balls()) {
            self.draw_ghost(surface, token)?;
        }
        for drawing in scene.drawings() {
            self.draw_drawing(surface, drawing)?;
        }

        let selected = scene.selected_id();
        let config = editor.config();
        for ball in scene.balls() {
            self.draw_ball(surface, ball, config.ball_radius, selected == Some(ball.id))?;
        }
        for player in scene.players() {
            self.draw_player(
                surface,
                player,
                config.player_radius,
                selected == Some(player.id),
            )?;
        }

        match editor.preview() {
            Some(Preview::Stroke(stroke)) => surface.stroke_polyline(
                &stroke.points,
                &StrokeStyle::solid(&stroke.color, stroke.width),
            )?,
            Some(Preview::Arrow { start, end }) => {
                self.draw_arrow(surface, start, end, &self.config.preview_color)?;
            }
            None => {}
        }

        self.frame_count += 1;
        Ok(())
    }

    /// Get the current frame count.
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Get the renderer configuration.
    #[must_use]
    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    fn draw_ghost(&self, surface: &mut dyn Surface, token: &Token) -> RenderResult<()> {
        let [.., before, last] = token.path.as_slice() else {
            return Ok(());
        };
        let line = with_alpha(&token.color, &self.config.ghost_alpha);
        surface.stroke_polyline(
            &token.path,
            &StrokeStyle::dashed(&line, self.config.ghost_width, &self.config.ghost_dash),
        )?;
        let head = with_alpha(&token.color, &self.config.ghost_head_alpha);
        surface.fill_polygon(
            &arrowhead(*before, *last, self.config.ghost_head_size),
            &head,
        )
    }

    fn draw_drawing(&self, surface: &mut dyn Surface, drawing: &Drawing) -> RenderResult<()> {
        match drawing {
            Drawing::Stroke(stroke) => {
                if !stroke.is_committable() {
                    return Ok(());
                }
                surface.stroke_polyline(
                    &stroke.points,
                    &StrokeStyle::solid(&stroke.color, stroke.width),
                )
            }
            Drawing::Arrow(arrow) => self.draw_arrow(surface, arrow.start, arrow.end, &arrow.color),
        }
    }

    fn draw_arrow(
        &self,
        surface: &mut dyn Surface,
        start: Point,
        end: Point,
        color: &str,
    ) -> RenderResult<()> {
        surface.stroke_polyline(
            &[start, end],
            &StrokeStyle::solid(color, self.config.arrow_width),
        )?;
        surface.fill_polygon(&arrowhead(start, end, self.config.arrow_head_size), color)
    }

    fn draw_shadow(&self, surface: &mut dyn Surface, at: Point, radius: f32) -> RenderResult<()> {
        let offset = Point::new(self.config.shadow_offset, self.config.shadow_offset);
        surface.fill_circle(at + offset, radius, &self.config.shadow_color)
    }

    fn draw_ball(
        &self,
        surface: &mut dyn Surface,
        ball: &Token,
        radius: f32,
        selected: bool,
    ) -> RenderResult<()> {
        self.draw_shadow(surface, ball.position, radius)?;
        surface.fill_circle(ball.position, radius, &ball.color)?;
        let outline = if selected {
            StrokeStyle::solid("#fff", 2.2)
        } else {
            StrokeStyle::solid(&self.config.outline_color, 1.2)
        };
        surface.stroke_circle(ball.position, radius, &outline)
    }

    fn draw_player(
        &self,
        surface: &mut dyn Surface,
        player: &Token,
        radius: f32,
        selected: bool,
    ) -> RenderResult<()> {
        let TokenKind::Player(info) = &player.kind else {
            return Ok(());
        };
        let at = player.position;

        self.draw_shadow(surface, at, radius)?;
        surface.fill_circle(at, radius, &player.color)?;
        if selected {
            surface.stroke_circle(
                at,
                radius + self.config.selection_gap,
                &StrokeStyle::solid(&self.config.selection_color, 2.5),
            )?;
        } else {
            surface.stroke_circle(
                at,
                radius,
                &StrokeStyle::solid(&self.config.outline_color, 1.5),
            )?;
        }

        let font = if info.label.chars().count() > 1 {
            "bold 10px 'Barlow Condensed', sans-serif"
        } else {
            "bold 12px 'Barlow Condensed', sans-serif"
        };
        surface.fill_text(
            &info.label,
            Point::new(at.x, at.y + 1.0),
            &TextStyle {
                font,
                color: contrast(&player.color),
            },
        )?;

        if info.has_ball {
            let badge = Point::new(at.x + radius - 2.0, at.y - radius + 2.0);
            surface.fill_circle(badge, 7.0, &self.config.badge_color)?;
            surface.stroke_circle(badge, 7.0, &StrokeStyle::solid("#fff", 1.5))?;
            surface.fill_text(
                "B",
                Point::new(badge.x, badge.y + 0.5),
                &TextStyle {
                    font: "bold 7px sans-serif",
                    color: "#000",
                },
            )?;
        }

        let dot = with_alpha(&info.team_color, &self.config.ghost_head_alpha);
        surface.fill_circle(Point::new(at.x, at.y + radius + 4.0), 3.0, &dot)
    }
}

/// Text color readable on `background`: dark on light fills, white on dark.
///
/// Anything other than a `#rrggbb` color gets dark text.
#[must_use]
pub fn contrast(background: &str) -> &'static str {
    const DARK: &str = "#111";
    const LIGHT: &str = "#fff";
    let Some((r, g, b)) = parse_hex(background) else {
        return DARK;
    };
    let luma = f32::from(r) * 0.299 + f32::from(g) * 0.587 + f32::from(b) * 0.114;
    if luma > 145.0 {
        DARK
    } else {
        LIGHT
    }
}

/// Append a two-digit hex alpha to a `#rrggbb` color. Other color syntaxes
/// are returned unchanged.
#[must_use]
pub fn with_alpha(color: &str, alpha: &str) -> String {
    if parse_hex(color).is_some() && color.len() == 7 {
        format!("{color}{alpha}")
    } else {
        color.to_string()
    }
}

fn parse_hex(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.strip_prefix('#')?;
    if hex.len() < 6 || !hex.is_char_boundary(6) {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}
