//! Reactive opponent: constant-speed pursuit of the ball's height

use super::state::Paddle;

/// Move `paddle` so its center tracks `ball_y`, at most `paddle.speed` per frame.
///
/// Snaps exactly onto the target when within one step, then clamps.
pub fn pursue(paddle: &mut Paddle, ball_y: f32, field_height: f32) {
    let target = ball_y - paddle.height / 2.0;
    let diff = target - paddle.y;
    if diff.abs() > paddle.speed {
        paddle.y += paddle.speed.copysign(diff);
    } else {
        paddle.y = target;
    }
    paddle.clamp(field_height);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Field, Side};

    fn opponent() -> Paddle {
        Paddle::new(Side::Right, Field::new(800.0, 600.0), 12.0, 90.0, 10.0, 4.0)
    }

    #[test]
    fn test_moves_one_step_toward_far_target() {
        let mut p = opponent();
        let start = p.y;
        pursue(&mut p, 500.0, 600.0);
        assert_eq!(p.y, start + 4.0);
        pursue(&mut p, 0.0, 600.0);
        assert_eq!(p.y, start);
    }

    #[test]
    fn test_snaps_when_close() {
        let mut p = opponent();
        let target = p.center_y() + 3.0;
        pursue(&mut p, target, 600.0);
        assert_eq!(p.center_y(), 303.0);
    }

    #[test]
    fn test_clamps_at_walls() {
        let mut p = opponent();
        p.y = 2.0;
        pursue(&mut p, 0.0, 600.0);
        assert_eq!(p.y, 0.0);

        p.y = 508.0;
        pursue(&mut p, 600.0, 600.0);
        assert_eq!(p.y, 510.0);
    }
}
