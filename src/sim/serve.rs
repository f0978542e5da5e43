//! Ball serve: re-center and launch with a randomized velocity

use rand::Rng;

use super::state::{Ball, Field, Side};
use crate::consts::{SERVE_MAX_ANGLE, SERVE_SPEED_MAX, SERVE_SPEED_MIN};

/// Center the ball and launch it toward `toward` (or a fair coin flip).
///
/// Speed is uniform in [5, 7) and the launch angle uniform in
/// [-22.5°, 22.5°) off the horizontal. Each quantity consumes one
/// `f32` draw from `rng`, in the order direction, speed, angle.
pub fn serve_ball<R: Rng + ?Sized>(ball: &mut Ball, field: Field, toward: Option<Side>, rng: &mut R) {
    ball.pos = field.center();

    let coin: f32 = rng.random();
    let dir = match toward {
        Some(side) => side.heading(),
        None if coin < 0.5 => -1.0,
        None => 1.0,
    };
    let speed = SERVE_SPEED_MIN + rng.random::<f32>() * (SERVE_SPEED_MAX - SERVE_SPEED_MIN);
    let angle = rng.random::<f32>() * 2.0 * SERVE_MAX_ANGLE - SERVE_MAX_ANGLE;

    ball.speed = speed;
    ball.vel.x = dir * speed * angle.cos();
    ball.vel.y = speed * angle.sin();

    log::debug!(
        "Serve dir={} speed={:.2} angle={:.1}°",
        dir,
        speed,
        angle.to_degrees()
    );
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use rand::{RngCore, SeedableRng};
    use rand_pcg::Pcg32;
    use std::f32::consts::PI;

    /// RNG that returns the same word forever
    pub(crate) struct FixedRng(pub u32);

    impl RngCore for FixedRng {
        fn next_u32(&mut self) -> u32 {
            self.0
        }

        fn next_u64(&mut self) -> u64 {
            ((self.0 as u64) << 32) | self.0 as u64
        }

        fn fill_bytes(&mut self, dst: &mut [u8]) {
            for (i, byte) in dst.iter_mut().enumerate() {
                *byte = self.0.to_le_bytes()[i % 4];
            }
        }
    }

    fn field() -> Field {
        Field::new(800.0, 600.0)
    }

    #[test]
    fn test_serve_low_draws() {
        // All draws 0.0: leftward, slowest, steepest upward angle
        let mut ball = Ball::new(field(), 8.0);
        serve_ball(&mut ball, field(), None, &mut FixedRng(0));
        assert_eq!(ball.speed, 5.0);
        assert!((ball.vel.x - (-5.0 * (PI / 8.0).cos())).abs() < 1e-5);
        assert!((ball.vel.y - (-5.0 * (PI / 8.0).sin())).abs() < 1e-5);
    }

    #[test]
    fn test_serve_mid_draws() {
        // All draws exactly 0.5: rightward, speed 6, flat
        let mut ball = Ball::new(field(), 8.0);
        serve_ball(&mut ball, field(), None, &mut FixedRng(0x8000_0000));
        assert_eq!(ball.speed, 6.0);
        assert!((ball.vel.x - 6.0).abs() < 1e-5);
        assert!(ball.vel.y.abs() < 1e-5);
    }

    #[test]
    fn test_forced_direction_wins_over_coin() {
        let mut ball = Ball::new(field(), 8.0);
        serve_ball(&mut ball, field(), Some(Side::Right), &mut FixedRng(0));
        assert!(ball.vel.x > 0.0);
        serve_ball(&mut ball, field(), Some(Side::Left), &mut FixedRng(0xFFFF_FFFF));
        assert!(ball.vel.x < 0.0);
    }

    #[test]
    fn test_serve_recenters_and_stays_in_range() {
        let mut rng = Pcg32::seed_from_u64(42);
        let mut ball = Ball::new(field(), 8.0);
        for _ in 0..500 {
            ball.pos = glam::Vec2::new(3.0, 597.0);
            serve_ball(&mut ball, field(), None, &mut rng);
            assert_eq!(ball.pos, field().center());
            assert!(ball.speed >= 5.0 && ball.speed < 7.0);
            assert!((ball.vel.length() - ball.speed).abs() < 1e-4);
            let min_vx = 5.0 * (PI / 8.0).cos() - 1e-4;
            assert!(ball.vel.x.abs() >= min_vx && ball.vel.x.abs() <= 7.0);
        }
    }

    #[test]
    fn test_serve_is_reproducible() {
        let mut a = Ball::new(field(), 8.0);
        let mut b = Ball::new(field(), 8.0);
        let mut rng_a = Pcg32::seed_from_u64(1234);
        let mut rng_b = Pcg32::seed_from_u64(1234);
        for _ in 0..10 {
            serve_ball(&mut a, field(), None, &mut rng_a);
            serve_ball(&mut b, field(), None, &mut rng_b);
            assert_eq!(a, b);
        }
    }
}
