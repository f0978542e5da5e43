//! Input controller
//!
//! Translates key and pointer events into paddle motion. Keys are looked up
//! through `KeyBindings` first, so physical key names never reach the
//! controller itself.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::sim::Paddle;

/// Logical input actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    MoveUp,
    MoveDown,
    ToggleRun,
    Reset,
}

/// Session-level requests produced by input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    ToggleRun,
    Reset,
}

/// Mapping from DOM `KeyboardEvent.key` values to actions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyBindings {
    map: BTreeMap<String, Action>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        let map = [
            ("ArrowUp", Action::MoveUp),
            ("ArrowDown", Action::MoveDown),
            (" ", Action::ToggleRun),
            ("Spacebar", Action::ToggleRun),
            ("r", Action::Reset),
            ("R", Action::Reset),
        ]
        .into_iter()
        .map(|(key, action)| (key.to_string(), action))
        .collect();
        Self { map }
    }
}

impl KeyBindings {
    pub fn action(&self, key: &str) -> Option<Action> {
        self.map.get(key).copied()
    }

    pub fn bind(&mut self, key: impl Into<String>, action: Action) {
        self.map.insert(key.into(), action);
    }

    /// Whether the host should suppress the browser default for `key`
    pub fn handled(&self, key: &str) -> bool {
        self.map.contains_key(key)
    }
}

/// Held-key state for the player paddle
#[derive(Debug, Clone, Default)]
pub struct InputController {
    up_held: bool,
    down_held: bool,
}

impl InputController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Press: movement sets the paddle velocity, other actions become commands
    pub fn key_down(&mut self, action: Action, paddle: &mut Paddle) -> Option<Command> {
        match action {
            Action::MoveUp => {
                self.up_held = true;
                paddle.dy = -paddle.speed;
                None
            }
            Action::MoveDown => {
                self.down_held = true;
                paddle.dy = paddle.speed;
                None
            }
            Action::ToggleRun => Some(Command::ToggleRun),
            Action::Reset => Some(Command::Reset),
        }
    }

    /// Release: if the opposite key is still held its velocity takes over
    pub fn key_up(&mut self, action: Action, paddle: &mut Paddle) {
        match action {
            Action::MoveUp => {
                self.up_held = false;
                paddle.dy = if self.down_held { paddle.speed } else { 0.0 };
            }
            Action::MoveDown => {
                self.down_held = false;
                paddle.dy = if self.up_held { -paddle.speed } else { 0.0 };
            }
            Action::ToggleRun | Action::Reset => {}
        }
    }

    /// Pointer positioning is instantaneous: center the paddle on `field_y`
    pub fn pointer_move(field_y: f32, paddle: &mut Paddle, field_height: f32) {
        paddle.center_on(field_y, field_height);
    }

    pub fn up_held(&self) -> bool {
        self.up_held
    }

    pub fn down_held(&self) -> bool {
        self.down_held
    }
}

/// Convert a pointer's client Y to field coordinates using the canvas
/// bounding rectangle. Accounts for CSS scaling of the canvas.
pub fn client_to_field_y(client_y: f32, rect_top: f32, rect_height: f32, field_height: f32) -> f32 {
    let y = client_y - rect_top;
    if rect_height > 0.0 {
        y * field_height / rect_height
    } else {
        y
    }
}
