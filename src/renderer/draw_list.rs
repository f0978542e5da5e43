//! Recording surface
//!
//! Stores draw calls instead of rasterizing them. Used by tests and by the
//! headless native runner.

use glam::Vec2;

use super::{ScoreDisplay, Surface};

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear { x: f32, y: f32, w: f32, h: f32 },
    FillRect { x: f32, y: f32, w: f32, h: f32, color: String },
    RoundRect { x: f32, y: f32, w: f32, h: f32, radius: f32, color: String },
    Circle { center: Vec2, radius: f32, color: String },
    DashedLine { from: Vec2, to: Vec2, dash: [f32; 2], width: f32, color: String },
}

#[derive(Debug, Clone, Default)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Drop recorded commands, keeping the allocation
    pub fn clear_commands(&mut self) {
        self.commands.clear();
    }
}

impl Surface for DrawList {
    fn clear(&mut self, x: f32, y: f32, w: f32, h: f32) {
        self.commands.push(DrawCommand::Clear { x, y, w, h });
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: &str) {
        self.commands.push(DrawCommand::FillRect {
            x,
            y,
            w,
            h,
            color: color.to_string(),
        });
    }

    fn fill_round_rect(&mut self, x: f32, y: f32, w: f32, h: f32, radius: f32, color: &str) {
        self.commands.push(DrawCommand::RoundRect {
            x,
            y,
            w,
            h,
            radius,
            color: color.to_string(),
        });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: &str) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color: color.to_string(),
        });
    }

    fn stroke_dashed_line(&mut self, from: Vec2, to: Vec2, dash: [f32; 2], width: f32, color: &str) {
        self.commands.push(DrawCommand::DashedLine {
            from,
            to,
            dash,
            width,
            color: color.to_string(),
        });
    }
}

/// Score display that logs each change
#[derive(Debug, Clone, Default)]
pub struct LogScoreboard {
    pub shown: Option<(u32, u32)>,
    pub updates: usize,
}

impl ScoreDisplay for LogScoreboard {
    fn show(&mut self, player: u32, opponent: u32) {
        log::info!("Score {} - {}", player, opponent);
        self.shown = Some((player, opponent));
        self.updates += 1;
    }
}
