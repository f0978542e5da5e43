//! Game state and core simulation types
//!
//! Everything a session owns lives here: the field, both paddles, the ball,
//! the score and the run/pause lifecycle.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::serve::serve_ball;
use crate::consts::MAX_SPEED;
use crate::settings::Settings;

/// Which end of the field a paddle defends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Human-controlled player paddle
    Left,
    /// AI-controlled opponent paddle
    Right,
}

impl Side {
    /// Horizontal sign of a ball leaving this side's paddle
    #[inline]
    pub fn outgoing(self) -> f32 {
        match self {
            Side::Left => 1.0,
            Side::Right => -1.0,
        }
    }

    /// Horizontal sign of a ball travelling toward this side
    #[inline]
    pub fn heading(self) -> f32 {
        -self.outgoing()
    }

    pub fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// Session lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunState {
    Running,
    Paused,
}

/// The rectangular playable area
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub width: f32,
    pub height: f32,
}

impl Field {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

/// A paddle. `x` is fixed per side, `y` is the mutable top edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    pub side: Side,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Movement speed (keyboard step for the player, pursuit step for the opponent)
    pub speed: f32,
    /// Signed per-frame keyboard velocity
    pub dy: f32,
}

impl Paddle {
    /// Create a paddle vertically centered against its side boundary
    pub fn new(side: Side, field: Field, width: f32, height: f32, margin: f32, speed: f32) -> Self {
        let x = match side {
            Side::Left => margin,
            Side::Right => field.width - margin - width,
        };
        Self {
            side,
            x,
            y: field.height / 2.0 - height / 2.0,
            width,
            height,
            speed,
            dy: 0.0,
        }
    }

    /// Keep the paddle fully inside the field
    pub fn clamp(&mut self, field_height: f32) {
        if self.y < 0.0 {
            self.y = 0.0;
        }
        if self.y + self.height > field_height {
            self.y = field_height - self.height;
        }
    }

    /// Place the paddle's vertical center at `center_y`, then clamp
    pub fn center_on(&mut self, center_y: f32, field_height: f32) {
        self.y = center_y - self.height / 2.0;
        self.clamp(field_height);
    }

    #[inline]
    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }

    /// Whether `y` falls within the paddle's vertical span (inclusive)
    #[inline]
    pub fn spans(&self, y: f32) -> bool {
        y >= self.y && y <= self.y + self.height
    }

    /// X coordinate of the face the ball strikes
    #[inline]
    pub fn face_x(&self) -> f32 {
        match self.side {
            Side::Left => self.x + self.width,
            Side::Right => self.x,
        }
    }

    pub fn in_bounds(&self, field_height: f32) -> bool {
        self.y >= 0.0 && self.y <= field_height - self.height
    }
}

/// The ball
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    /// Frame-normalized velocity (units per frame)
    pub vel: Vec2,
    pub radius: f32,
    /// Scalar speed, kept equal to |vel| on every serve and paddle hit
    pub speed: f32,
}

impl Ball {
    /// A stationary ball at the field center; serve it before play
    pub fn new(field: Field, radius: f32) -> Self {
        Self {
            pos: field.center(),
            vel: Vec2::ZERO,
            radius,
            speed: 0.0,
        }
    }

    /// Advance by one frame of velocity
    #[inline]
    pub fn advance(&mut self) {
        self.pos += self.vel;
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x - self.radius
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.radius
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y - self.radius
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.radius
    }
}

/// Points per side
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub player: u32,
    pub opponent: u32,
}

impl Score {
    /// Award a point to `side` (Left is the player)
    pub fn credit(&mut self, side: Side) {
        match side {
            Side::Left => self.player += 1,
            Side::Right => self.opponent += 1,
        }
    }

    pub fn get(&self, side: Side) -> u32 {
        match side {
            Side::Left => self.player,
            Side::Right => self.opponent,
        }
    }
}

/// Something noteworthy that happened during a frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Ball struck a paddle and left at `speed`
    PaddleHit { side: Side, speed: f32 },
    /// Ball bounced off the top or bottom wall
    WallBounce,
    /// `scorer` won a point; `score` is the new tally
    Scored { scorer: Side, score: Score },
    /// Scores were zeroed by an explicit reset
    ScoresReset,
}

impl GameEvent {
    /// The score to display if this event changed it
    pub fn changed_score(&self) -> Option<Score> {
        match *self {
            GameEvent::Scored { score, .. } => Some(score),
            GameEvent::ScoresReset => Some(Score::default()),
            _ => None,
        }
    }
}

/// Read-only view of a session for inspection and logging
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub field: Field,
    pub run_state: RunState,
    pub score: Score,
    pub player: Paddle,
    pub opponent: Paddle,
    pub ball: Ball,
    pub last_time: f64,
}

/// One game session: owns every entity plus the random source used for serves
#[derive(Debug, Clone)]
pub struct Session<R = Pcg32> {
    pub(crate) field: Field,
    pub(crate) player: Paddle,
    pub(crate) opponent: Paddle,
    pub(crate) ball: Ball,
    pub(crate) score: Score,
    pub(crate) run_state: RunState,
    /// Timestamp (ms) of the previous frame
    pub(crate) last_time: f64,
    /// Elapsed seconds passed to the latest update
    pub(crate) last_dt: f32,
    pub(crate) rng: R,
}

impl Session<Pcg32> {
    /// Create a paused session with a seeded RNG and a freshly served ball
    pub fn new(settings: &Settings, seed: u64) -> Self {
        Self::with_rng(settings, Pcg32::seed_from_u64(seed))
    }
}

impl<R: Rng> Session<R> {
    /// Create a paused session drawing serves from `rng`.
    ///
    /// Settings are validated first, so out-of-range values are repaired.
    pub fn with_rng(settings: &Settings, rng: R) -> Self {
        let settings = settings.clone().validated();
        let field = Field::new(settings.field_width, settings.field_height);
        let player = Paddle::new(
            Side::Left,
            field,
            settings.paddle_width,
            settings.paddle_height,
            settings.paddle_margin,
            settings.player_speed,
        );
        let opponent = Paddle::new(
            Side::Right,
            field,
            settings.paddle_width,
            settings.paddle_height,
            settings.paddle_margin,
            settings.opponent_speed,
        );

        let mut session = Self {
            field,
            player,
            opponent,
            ball: Ball::new(field, settings.ball_radius),
            score: Score::default(),
            run_state: RunState::Paused,
            last_time: 0.0,
            last_dt: 0.0,
            rng,
        };
        session.serve(None);
        session
    }

    /// Re-center and launch the ball toward `toward`, or a random side
    pub fn serve(&mut self, toward: Option<Side>) {
        serve_ball(&mut self.ball, self.field, toward, &mut self.rng);
    }

    /// Paused -> Running, taking `now` as the frame reference.
    /// Returns false if the session was already running.
    pub fn start(&mut self, now: f64) -> bool {
        if self.run_state == RunState::Running {
            return false;
        }
        self.run_state = RunState::Running;
        self.last_time = now;
        log::info!("Session running");
        true
    }

    pub fn stop(&mut self) {
        if self.run_state == RunState::Running {
            self.run_state = RunState::Paused;
            log::info!("Session paused");
        }
    }

    /// Flip between running and paused
    pub fn toggle(&mut self, now: f64) -> RunState {
        match self.run_state {
            RunState::Running => self.stop(),
            RunState::Paused => {
                self.start(now);
            }
        }
        self.run_state
    }

    /// Zero the scores, serve from the center and force running
    pub fn reset(&mut self, now: f64) -> GameEvent {
        self.score = Score::default();
        self.serve(None);
        self.start(now);
        log::info!("Session reset");
        GameEvent::ScoresReset
    }

    /// Advance one display frame. Does nothing while paused.
    pub fn frame(&mut self, now: f64) -> Vec<GameEvent> {
        if self.run_state != RunState::Running {
            return Vec::new();
        }
        let dt = ((now - self.last_time) / 1000.0) as f32;
        self.last_time = now;
        super::tick::update(self, dt)
    }

    pub fn field(&self) -> Field {
        self.field
    }

    pub fn player(&self) -> &Paddle {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Paddle {
        &mut self.player
    }

    pub fn opponent(&self) -> &Paddle {
        &self.opponent
    }

    pub fn opponent_mut(&mut self) -> &mut Paddle {
        &mut self.opponent
    }

    pub fn ball(&self) -> &Ball {
        &self.ball
    }

    pub fn ball_mut(&mut self) -> &mut Ball {
        &mut self.ball
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn is_running(&self) -> bool {
        self.run_state == RunState::Running
    }

    pub fn last_time(&self) -> f64 {
        self.last_time
    }

    pub fn last_dt(&self) -> f32 {
        self.last_dt
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            field: self.field,
            run_state: self.run_state,
            score: self.score,
            player: self.player.clone(),
            opponent: self.opponent.clone(),
            ball: self.ball.clone(),
            last_time: self.last_time,
        }
    }

    /// Check the entity invariants (used by debug assertions and tests)
    pub fn invariants_hold(&self) -> bool {
        self.player.in_bounds(self.field.height)
            && self.opponent.in_bounds(self.field.height)
            && self.ball.speed <= MAX_SPEED
    }
}
