//! Simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering
//! and platform dependencies:
//! - One `update` per display frame, driven by `Session::frame`
//! - Serves draw from an injected RNG only
//! - Paddle and ball positions are clamped, never rejected

pub mod collision;
pub mod opponent;
pub mod serve;
pub mod state;
pub mod tick;

pub use collision::{Contact, bounce_angle, paddle_contact, reflect_from_paddle, wall_collision};
pub use opponent::pursue;
pub use serve::serve_ball;
pub use state::{Ball, Field, GameEvent, Paddle, RunState, Score, Session, Side, Snapshot};
pub use tick::update;
