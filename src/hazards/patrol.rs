//! Back-and-forth horizontal motion between two fixed bounds.
//!
//! Patrols ignore gravity and world geometry entirely; they only bounce off
//! their own bounds.

use crate::body::KinematicBody;

/// Patrol bounds and the velocity the hazard started with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Patrol {
    lower: f64,
    upper: f64,
    initial_speed: f64,
}

impl Patrol {
    /// A patrol covering `range` pixels from `start` in the direction of
    /// `speed`'s sign.
    #[must_use]
    pub fn new(start: i32, range: i32, speed: f64) -> Self {
        let near = f64::from(start);
        let far = near + f64::from(range) * speed.signum();
        Self {
            lower: near.min(far),
            upper: near.max(far),
            initial_speed: speed,
        }
    }

    /// Signed speed the patrol starts and resets with.
    #[must_use]
    pub const fn initial_speed(&self) -> f64 {
        self.initial_speed
    }

    /// Moves `body` one tick, clamping at a bound and reversing there.
    pub fn advance(&self, body: &mut KinematicBody) {
        let vx = body.velocity.x;
        body.true_position.x += vx;
        body.sync_box_x();
        let x = body.true_position.x;

        if vx > 0.0 && x >= self.upper {
            body.true_position.x = self.upper;
            body.sync_box_x();
            body.velocity.x = -vx;
        } else if vx < 0.0 && x <= self.lower {
            body.true_position.x = self.lower;
            body.sync_box_x();
            body.velocity.x = -vx;
        }
    }

    /// Restores the starting velocity; position is restored by the caller.
    pub const fn reset(&self, body: &mut KinematicBody) {
        body.velocity.x = self.initial_speed;
        body.velocity.y = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::IVec2;
    use rstest::rstest;

    fn patrolling_body(x: i32, speed: f64) -> KinematicBody {
        let mut body = KinematicBody::new(IVec2::new(x, 100), IVec2::new(40, 20));
        body.velocity.x = speed;
        body
    }

    #[rstest]
    #[case::rightwards(2.0)]
    #[case::leftwards(-2.0)]
    #[case::fast(8.0)]
    fn full_cycle_returns_home(#[case] speed: f64) {
        let patrol = Patrol::new(200, 80, speed);
        let mut body = patrolling_body(200, speed);
        let ticks = (2.0 * 80.0 / speed.abs()) as u32;
        for _ in 0..ticks {
            patrol.advance(&mut body);
        }
        assert_eq!(body.box_position.x, 200);
        assert_eq!(body.velocity.x, speed);
    }

    #[test]
    fn reverses_at_far_bound() {
        let patrol = Patrol::new(0, 80, 2.0);
        let mut body = patrolling_body(0, 2.0);
        for _ in 0..40 {
            patrol.advance(&mut body);
        }
        assert_eq!(body.box_position.x, 80);
        assert_eq!(body.velocity.x, -2.0);
        patrol.advance(&mut body);
        assert_eq!(body.box_position.x, 78);
    }

    #[test]
    fn overshoot_is_clamped() {
        let patrol = Patrol::new(0, 10, 3.0);
        let mut body = patrolling_body(0, 3.0);
        for _ in 0..4 {
            patrol.advance(&mut body);
        }
        assert_eq!(body.box_position.x, 10);
        assert_eq!(body.true_position.x, 10.0);
    }
}
