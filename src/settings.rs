//! Game settings
//!
//! Geometry, speeds, colours and key bindings. Every field has a default, so
//! a config document only needs to name what it overrides.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::input::KeyBindings;
use crate::renderer::RenderStyle;

/// Game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Field ===
    pub field_width: f32,
    pub field_height: f32,

    // === Paddles ===
    pub paddle_width: f32,
    pub paddle_height: f32,
    /// Gap between each paddle and its side boundary
    pub paddle_margin: f32,
    /// Player keyboard speed (units per frame)
    pub player_speed: f32,
    /// Opponent pursuit speed (units per frame)
    pub opponent_speed: f32,

    // === Ball ===
    pub ball_radius: f32,

    // === Session ===
    /// Fixed serve seed; `None` seeds from the clock
    pub seed: Option<u64>,
    /// Start running as soon as the page loads
    pub autostart: bool,

    pub style: RenderStyle,
    pub keys: KeyBindings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_margin: PADDLE_MARGIN,
            player_speed: PLAYER_SPEED,
            opponent_speed: OPPONENT_SPEED,
            ball_radius: BALL_RADIUS,
            seed: None,
            autostart: true,
            style: RenderStyle::default(),
            keys: KeyBindings::default(),
        }
    }
}

impl Settings {
    /// Parse settings from JSON, filling unspecified fields with defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Self>(json).map(Self::validated)
    }

    /// Replace values that would break the field geometry
    pub fn validated(mut self) -> Self {
        let defaults = Self::default();

        fn positive(name: &str, value: &mut f32, fallback: f32) {
            if !(value.is_finite() && *value > 0.0) {
                log::warn!("Setting {} = {} is not positive, using {}", name, value, fallback);
                *value = fallback;
            }
        }

        positive("field_width", &mut self.field_width, defaults.field_width);
        positive("field_height", &mut self.field_height, defaults.field_height);
        positive("paddle_width", &mut self.paddle_width, defaults.paddle_width);
        positive("paddle_height", &mut self.paddle_height, defaults.paddle_height);
        positive("ball_radius", &mut self.ball_radius, defaults.ball_radius);

        if !(self.paddle_margin.is_finite() && self.paddle_margin >= 0.0) {
            log::warn!("Setting paddle_margin = {} is invalid, using 0", self.paddle_margin);
            self.paddle_margin = 0.0;
        }
        for (name, speed) in [
            ("player_speed", &mut self.player_speed),
            ("opponent_speed", &mut self.opponent_speed),
        ] {
            if !(speed.is_finite() && *speed >= 0.0) {
                log::warn!("Setting {} = {} is invalid, using 0", name, speed);
                *speed = 0.0;
            }
        }

        if self.paddle_height > self.field_height {
            log::warn!(
                "Paddle height {} exceeds field height {}, clamping",
                self.paddle_height,
                self.field_height
            );
            self.paddle_height = self.field_height;
        }
        let ball_limit = self.field_height.min(self.field_width) / 4.0;
        if self.ball_radius > ball_limit {
            log::warn!("Ball radius {} too large for field, clamping", self.ball_radius);
            self.ball_radius = ball_limit;
        }
        let max_margin = self.field_width / 2.0 - self.paddle_width;
        if self.paddle_margin > max_margin {
            log::warn!("Paddle margin {} too large for field, clamping", self.paddle_margin);
            self.paddle_margin = max_margin.max(0.0);
        }

        self
    }

    /// Element id of the optional inline JSON config (WASM only)
    #[allow(dead_code)]
    const CONFIG_ELEMENT_ID: &'static str = "pong-config";

    /// Load settings from `<script id="pong-config" type="application/json">` (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let json = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(Self::CONFIG_ELEMENT_ID))
            .and_then(|el| el.text_content());

        match json {
            Some(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from #{}", Self::CONFIG_ELEMENT_ID);
                    settings
                }
                Err(e) => {
                    log::warn!("Invalid settings JSON ({}), using defaults", e);
                    Self::default()
                }
            },
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Load settings from an optional JSON file path (native)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: Option<&std::path::Path>) -> Self {
        let Some(path) = path else {
            log::info!("Using default settings");
            return Self::default();
        };

        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Invalid settings in {} ({}), using defaults", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Cannot read {} ({}), using defaults", path.display(), e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Action;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{ "opponent_speed": 5.5, "seed": 42 }"#).unwrap();
        assert_eq!(settings.opponent_speed, 5.5);
        assert_eq!(settings.seed, Some(42));
        assert_eq!(settings.paddle_height, PADDLE_HEIGHT);
        assert!(settings.autostart);
        assert_eq!(settings.keys.action("ArrowUp"), Some(Action::MoveUp));
    }

    #[test]
    fn test_custom_keys_and_colours() {
        let json = r##"{
            "keys": { "w": "MoveUp", "s": "MoveDown", "p": "ToggleRun" },
            "style": { "player": "#ffffff" }
        }"##;
        let settings = Settings::from_json(json).unwrap();
        assert_eq!(settings.keys.action("w"), Some(Action::MoveUp));
        assert_eq!(settings.keys.action("ArrowUp"), None);
        assert_eq!(settings.style.player, "#ffffff");
        assert_eq!(settings.style.ball, RenderStyle::default().ball);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(Settings::from_json("{ not json").is_err());
        assert!(Settings::from_json(r#"{ "field_width": "wide" }"#).is_err());
    }

    #[test]
    fn test_validated_repairs_geometry() {
        let settings = Settings {
            field_height: 50.0,
            paddle_height: 90.0,
            ball_radius: -1.0,
            player_speed: f32::NAN,
            ..Settings::default()
        }
        .validated();
        assert_eq!(settings.paddle_height, 50.0);
        assert_eq!(settings.ball_radius, BALL_RADIUS);
        assert_eq!(settings.player_speed, 0.0);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_load_missing_file_falls_back() {
        let settings = Settings::load(Some(std::path::Path::new("/nonexistent/pong.json")));
        assert_eq!(settings, Settings::default());
    }
}
