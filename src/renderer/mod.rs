//! Rendering
//!
//! `render` is a pure read of a session: it issues draw calls against a
//! `Surface` and never mutates game state. Scores are not drawn here; they
//! go to a `ScoreDisplay` when they change.

pub mod draw_list;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

pub use draw_list::{DrawCommand, DrawList, LogScoreboard};

#[cfg(target_arch = "wasm32")]
pub use canvas::{CanvasSurface, DomScoreboard};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::{GameEvent, Session};

/// Drawing primitives over the field's coordinate space
pub trait Surface {
    /// Clear a region to transparent
    fn clear(&mut self, x: f32, y: f32, w: f32, h: f32);
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: &str);
    fn fill_round_rect(&mut self, x: f32, y: f32, w: f32, h: f32, radius: f32, color: &str);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: &str);
    fn stroke_dashed_line(&mut self, from: Vec2, to: Vec2, dash: [f32; 2], width: f32, color: &str);
}

/// Text display for the two scores
pub trait ScoreDisplay {
    fn show(&mut self, player: u32, opponent: u32);
}

/// Colours and line styling (CSS colour strings)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderStyle {
    pub field: String,
    pub divider: String,
    pub divider_dash: [f32; 2],
    pub divider_width: f32,
    /// Gap between the divider ends and the walls
    pub divider_inset: f32,
    pub player: String,
    pub opponent: String,
    pub paddle_corner_radius: f32,
    pub ball: String,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            field: "rgba(255,255,255,0.02)".to_string(),
            divider: "rgba(255,255,255,0.08)".to_string(),
            divider_dash: [6.0, 12.0],
            divider_width: 4.0,
            divider_inset: 10.0,
            player: "#00d1ff".to_string(),
            opponent: "#ff7ca3".to_string(),
            paddle_corner_radius: 6.0,
            ball: "#f8f9fb".to_string(),
        }
    }
}

/// Push the latest score to `display` if any event changed it.
///
/// Frames without a score change leave the display untouched.
pub fn publish_scores<D: ScoreDisplay + ?Sized>(events: &[GameEvent], display: &mut D) {
    if let Some(score) = events.iter().rev().find_map(GameEvent::changed_score) {
        display.show(score.player, score.opponent);
    }
}

/// Draw the current frame
pub fn render<R, S: Surface + ?Sized>(session: &Session<R>, surface: &mut S, style: &RenderStyle) {
    let field = session.field;
    let (w, h) = (field.width, field.height);

    surface.clear(0.0, 0.0, w, h);
    surface.fill_rect(0.0, 0.0, w, h, &style.field);

    surface.stroke_dashed_line(
        Vec2::new(w / 2.0, style.divider_inset),
        Vec2::new(w / 2.0, h - style.divider_inset),
        style.divider_dash,
        style.divider_width,
        &style.divider,
    );

    for (paddle, color) in [
        (&session.player, &style.player),
        (&session.opponent, &style.opponent),
    ] {
        surface.fill_round_rect(
            paddle.x,
            paddle.y,
            paddle.width,
            paddle.height,
            style.paddle_corner_radius,
            color,
        );
    }

    let ball = &session.ball;
    surface.fill_circle(ball.pos, ball.radius, &style.ball);
}
