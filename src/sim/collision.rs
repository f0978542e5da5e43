//! Collision detection and response
//!
//! Walls reflect the ball without energy loss. Paddles use an arcade
//! reflection: the outgoing angle depends only on where the ball struck
//! the paddle, not on the incoming angle.

use super::state::{Ball, Field, Paddle, Side};
use crate::consts::{MAX_BOUNCE_ANGLE, MAX_SPEED, SPEED_INCREASE};

/// Outcome of testing the ball against one paddle's end of the field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    /// Ball has not reached the paddle face
    None,
    /// Ball reached the face within the paddle's span
    Hit,
    /// Ball slipped past the paddle and out of the field
    Miss,
}

/// Bounce off the top/bottom walls. Returns true if a wall was hit.
pub fn wall_collision(ball: &mut Ball, field_height: f32) -> bool {
    let mut bounced = false;
    if ball.top() < 0.0 {
        ball.pos.y = ball.radius;
        ball.vel.y = -ball.vel.y;
        bounced = true;
    }
    if ball.bottom() > field_height {
        ball.pos.y = field_height - ball.radius;
        ball.vel.y = -ball.vel.y;
        bounced = true;
    }
    bounced
}

/// Classify the ball against `paddle` once its leading edge crosses the face
pub fn paddle_contact(ball: &Ball, paddle: &Paddle, field: Field) -> Contact {
    let (reached, escaped) = match paddle.side {
        Side::Left => (ball.left() <= paddle.face_x(), ball.left() < 0.0),
        Side::Right => (ball.right() >= paddle.face_x(), ball.right() > field.width),
    };

    if !reached {
        Contact::None
    } else if paddle.spans(ball.pos.y) {
        Contact::Hit
    } else if escaped {
        Contact::Miss
    } else {
        Contact::None
    }
}

/// Move the ball just outside the paddle face so it cannot stick or tunnel
pub fn push_out(ball: &mut Ball, paddle: &Paddle) {
    ball.pos.x = paddle.face_x() + paddle.side.outgoing() * ball.radius;
}

/// Outgoing angle for a ball striking `paddle` at height `ball_y`.
///
/// Center hits return 0, the top edge returns +75° and the bottom edge -75°.
pub fn bounce_angle(paddle: &Paddle, ball_y: f32) -> f32 {
    let half = paddle.height / 2.0;
    let offset = paddle.center_y() - ball_y;
    (offset / half) * MAX_BOUNCE_ANGLE
}

/// Reflect the ball off `paddle` and apply the per-hit speed ratchet.
///
/// Returns the new speed.
pub fn reflect_from_paddle(ball: &mut Ball, paddle: &Paddle) -> f32 {
    let angle = bounce_angle(paddle, ball.pos.y);
    let speed = (ball.vel.length() + SPEED_INCREASE).min(MAX_SPEED);

    ball.speed = speed;
    ball.vel.x = paddle.side.outgoing() * speed * angle.cos();
    ball.vel.y = -speed * angle.sin();
    speed
}
