//! Paddle Duel - a two-paddle arcade ball game
//!
//! Core modules:
//! - `sim`: Frame-driven simulation (physics, collisions, scoring, session lifecycle)
//! - `input`: Key/pointer translation into paddle motion and commands
//! - `renderer`: Pure drawing of session state onto a 2D surface
//! - `settings`: Data-driven game configuration

pub mod input;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::Settings;
pub use sim::Session;

/// Game configuration constants
pub mod consts {
    /// Default field dimensions (the host canvas usually overrides these)
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 12.0;
    pub const PADDLE_HEIGHT: f32 = 90.0;
    /// Gap between a paddle and its side boundary
    pub const PADDLE_MARGIN: f32 = 10.0;
    /// Keyboard movement per frame for the player paddle
    pub const PLAYER_SPEED: f32 = 6.0;
    /// Maximum pursuit step per frame for the opponent paddle
    pub const OPPONENT_SPEED: f32 = 4.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 8.0;
    /// Hard cap on ball speed (units per frame)
    pub const MAX_SPEED: f32 = 12.0;
    /// Speed added on every paddle hit
    pub const SPEED_INCREASE: f32 = 0.25;
    /// Steepest return off a paddle edge: 75 degrees
    pub const MAX_BOUNCE_ANGLE: f32 = 5.0 * std::f32::consts::PI / 12.0;

    /// Serve speed is drawn from [SERVE_SPEED_MIN, SERVE_SPEED_MAX)
    pub const SERVE_SPEED_MIN: f32 = 5.0;
    pub const SERVE_SPEED_MAX: f32 = 7.0;
    /// Serve launch angle is drawn from [-SERVE_MAX_ANGLE, SERVE_MAX_ANGLE): 22.5 degrees
    pub const SERVE_MAX_ANGLE: f32 = std::f32::consts::PI / 8.0;

    /// Nominal winning score. Not enforced: the game runs indefinitely.
    pub const WIN_SCORE: u32 = 11;
}
