//! HTML canvas 2D surface and DOM score display (WASM only)

use glam::Vec2;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, Element, HtmlCanvasElement};

use super::{ScoreDisplay, Surface};

/// `Surface` backed by a canvas 2D context
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self { ctx })
    }

    fn warn_on_err(op: &str, result: Result<(), JsValue>) {
        if let Err(e) = result {
            log::warn!("canvas {} failed: {:?}", op, e);
        }
    }
}

impl Surface for CanvasSurface {
    fn clear(&mut self, x: f32, y: f32, w: f32, h: f32) {
        self.ctx.clear_rect(x as f64, y as f64, w as f64, h as f64);
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: &str) {
        self.ctx.set_fill_style_str(color);
        self.ctx.fill_rect(x as f64, y as f64, w as f64, h as f64);
    }

    fn fill_round_rect(&mut self, x: f32, y: f32, w: f32, h: f32, radius: f32, color: &str) {
        let (x, y, w, h, r) = (x as f64, y as f64, w as f64, h as f64, radius as f64);
        let ctx = &self.ctx;
        ctx.set_fill_style_str(color);
        ctx.begin_path();
        ctx.move_to(x + r, y);
        Self::warn_on_err("arc_to", ctx.arc_to(x + w, y, x + w, y + h, r));
        Self::warn_on_err("arc_to", ctx.arc_to(x + w, y + h, x, y + h, r));
        Self::warn_on_err("arc_to", ctx.arc_to(x, y + h, x, y, r));
        Self::warn_on_err("arc_to", ctx.arc_to(x, y, x + w, y, r));
        ctx.fill();
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: &str) {
        let ctx = &self.ctx;
        ctx.set_fill_style_str(color);
        ctx.begin_path();
        Self::warn_on_err(
            "arc",
            ctx.arc(
                center.x as f64,
                center.y as f64,
                radius as f64,
                0.0,
                std::f64::consts::TAU,
            ),
        );
        ctx.fill();
    }

    fn stroke_dashed_line(&mut self, from: Vec2, to: Vec2, dash: [f32; 2], width: f32, color: &str) {
        let ctx = &self.ctx;
        let pattern = js_sys::Array::of2(&JsValue::from_f64(dash[0] as f64), &JsValue::from_f64(dash[1] as f64));
        Self::warn_on_err("set_line_dash", ctx.set_line_dash(&pattern));
        ctx.set_stroke_style_str(color);
        ctx.set_line_width(width as f64);
        ctx.begin_path();
        ctx.move_to(from.x as f64, from.y as f64);
        ctx.line_to(to.x as f64, to.y as f64);
        ctx.stroke();
        Self::warn_on_err("set_line_dash", ctx.set_line_dash(&js_sys::Array::new()));
    }
}

/// Writes scores into two DOM elements
pub struct DomScoreboard {
    player: Option<Element>,
    opponent: Option<Element>,
}

impl DomScoreboard {
    /// Look up the score elements by id; missing elements are logged and skipped
    pub fn new(document: &web_sys::Document, player_id: &str, opponent_id: &str) -> Self {
        let find = |id: &str| {
            let el = document.get_element_by_id(id);
            if el.is_none() {
                log::warn!("Score element #{} not found", id);
            }
            el
        };
        Self {
            player: find(player_id),
            opponent: find(opponent_id),
        }
    }
}

impl ScoreDisplay for DomScoreboard {
    fn show(&mut self, player: u32, opponent: u32) {
        if let Some(el) = &self.player {
            el.set_text_content(Some(&player.to_string()));
        }
        if let Some(el) = &self.opponent {
            el.set_text_content(Some(&opponent.to_string()));
        }
    }
}
