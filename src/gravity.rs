//! Global gravity direction and its flip transition.
//!
//! A flip is requested, runs for a fixed number of ticks while the
//! presentation layer rotates the screen, and then commits. Physics reads
//! [`GravityState::current`] throughout, so bodies keep falling the old way
//! until the exact tick the transition commits. A transition in flight cannot
//! be interrupted or queued behind.

use glam::IVec2;
use log::info;
use serde::{Deserialize, Serialize};

use crate::numeric::ticks_to_f64;

/// The axis gravity can occupy. Only the vertical axis is used, so walls are
/// always on X and friction always acts on X.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GravityDirection {
    /// Towards screen +Y.
    #[default]
    Down,
    /// Towards screen -Y.
    Up,
}

impl GravityDirection {
    /// `+1.0` for `Down` (screen +Y), `-1.0` for `Up`.
    #[must_use]
    pub const fn sign(self) -> f64 {
        match self {
            Self::Down => 1.0,
            Self::Up => -1.0,
        }
    }

    /// One-pixel step along gravity, used for the grounding check.
    #[must_use]
    pub const fn unit(self) -> IVec2 {
        match self {
            Self::Down => IVec2::new(0, 1),
            Self::Up => IVec2::new(0, -1),
        }
    }

    /// The other direction.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Down => Self::Up,
            Self::Up => Self::Down,
        }
    }

    /// Screen rotation the presentation layer shows for this direction.
    #[must_use]
    pub const fn rotation_degrees(self) -> f64 {
        match self {
            Self::Down => 0.0,
            Self::Up => 180.0,
        }
    }
}

/// Whether a flip is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GravityPhase {
    /// No flip running.
    #[default]
    Stable,
    /// A flip is animating and has not committed yet.
    Transitioning,
}

/// Current/target direction and transition progress.
#[derive(Debug, Clone, PartialEq)]
pub struct GravityState {
    current: GravityDirection,
    target: GravityDirection,
    phase: GravityPhase,
    progress: f64,
    elapsed_ticks: u32,
    duration_ticks: u32,
}

impl GravityState {
    /// Creates a stable state pointing `direction`.
    ///
    /// # Examples
    /// ```
    /// use flipside::gravity::{GravityDirection, GravityState};
    ///
    /// let mut gravity = GravityState::new(GravityDirection::Down, 2);
    /// assert!(gravity.request_flip());
    /// gravity.advance();
    /// assert_eq!(gravity.commit_if_complete(), None);
    /// gravity.advance();
    /// assert_eq!(gravity.commit_if_complete(), Some(GravityDirection::Up));
    /// assert_eq!(gravity.current(), GravityDirection::Up);
    /// ```
    #[must_use]
    pub const fn new(direction: GravityDirection, duration_ticks: u32) -> Self {
        Self {
            current: direction,
            target: direction,
            phase: GravityPhase::Stable,
            progress: 0.0,
            elapsed_ticks: 0,
            duration_ticks,
        }
    }

    /// Direction every body uses for physics this tick.
    #[must_use]
    pub const fn current(&self) -> GravityDirection {
        self.current
    }

    /// Direction gravity will point once the flip commits.
    #[must_use]
    pub const fn target(&self) -> GravityDirection {
        self.target
    }

    /// Whether a flip is running.
    #[must_use]
    pub const fn phase(&self) -> GravityPhase {
        self.phase
    }

    /// Transition progress in `[0, 1]`; zero while stable.
    #[must_use]
    pub const fn progress(&self) -> f64 {
        self.progress
    }

    /// Shorthand for a `Transitioning` phase.
    #[must_use]
    pub const fn is_transitioning(&self) -> bool {
        matches!(self.phase, GravityPhase::Transitioning)
    }

    /// Starts a flip to the opposite direction.
    ///
    /// Returns `false`, changing nothing, when a transition is already
    /// running.
    pub fn request_flip(&mut self) -> bool {
        if self.is_transitioning() {
            return false;
        }
        self.target = self.current.opposite();
        self.phase = GravityPhase::Transitioning;
        self.elapsed_ticks = 0;
        self.progress = if self.duration_ticks == 0 { 1.0 } else { 0.0 };
        info!(
            "gravity transition started: {:?} -> {:?}",
            self.current, self.target
        );
        true
    }

    /// Moves a running transition forward by one tick.
    pub fn advance(&mut self) {
        if !self.is_transitioning() {
            return;
        }
        self.elapsed_ticks = self.elapsed_ticks.saturating_add(1);
        self.progress = if self.duration_ticks == 0 {
            1.0
        } else {
            (ticks_to_f64(self.elapsed_ticks) / ticks_to_f64(self.duration_ticks)).min(1.0)
        };
    }

    /// Applies the target direction once progress reaches 1.
    ///
    /// Returns the newly active direction on the tick it commits.
    pub fn commit_if_complete(&mut self) -> Option<GravityDirection> {
        if !self.is_transitioning() || self.progress < 1.0 {
            return None;
        }
        self.current = self.target;
        self.phase = GravityPhase::Stable;
        self.progress = 0.0;
        self.elapsed_ticks = 0;
        info!("gravity transition committed: {:?}", self.current);
        Some(self.current)
    }

    /// Forces a stable state pointing `direction`, abandoning any transition.
    pub fn reset(&mut self, direction: GravityDirection) {
        *self = Self::new(direction, self.duration_ticks);
    }

    /// Screen rotation for the presentation layer, eased across the
    /// transition.
    #[must_use]
    pub fn visual_rotation_degrees(&self) -> f64 {
        let from = self.current.rotation_degrees();
        if !self.is_transitioning() {
            return from;
        }
        let to = self.target.rotation_degrees();
        from + (to - from) * smoothstep(self.progress)
    }
}

fn smoothstep(t: f64) -> f64 {
    let x = t.clamp(0.0, 1.0);
    x * x * (3.0 - 2.0 * x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[test]
    fn physics_direction_holds_until_commit() {
        let mut gravity = GravityState::new(GravityDirection::Down, 3);
        assert!(gravity.request_flip());
        for _ in 0..2 {
            gravity.advance();
            assert_eq!(gravity.commit_if_complete(), None);
            assert_eq!(gravity.current(), GravityDirection::Down);
            assert_eq!(gravity.target(), GravityDirection::Up);
        }
        gravity.advance();
        assert_relative_eq!(gravity.progress(), 1.0);
        assert_eq!(gravity.commit_if_complete(), Some(GravityDirection::Up));
        assert_eq!(gravity.phase(), GravityPhase::Stable);
        assert_relative_eq!(gravity.progress(), 0.0);
    }

    #[test]
    fn second_request_during_transition_is_ignored() {
        let mut gravity = GravityState::new(GravityDirection::Down, 10);
        assert!(gravity.request_flip());
        gravity.advance();
        let before = gravity.clone();
        assert!(!gravity.request_flip());
        assert_eq!(gravity, before);
    }

    #[test]
    fn zero_length_transition_commits_immediately() {
        let mut gravity = GravityState::new(GravityDirection::Up, 0);
        assert!(gravity.request_flip());
        assert_eq!(gravity.commit_if_complete(), Some(GravityDirection::Down));
    }

    #[test]
    fn advance_is_inert_while_stable() {
        let mut gravity = GravityState::new(GravityDirection::Down, 5);
        gravity.advance();
        assert_eq!(gravity, GravityState::new(GravityDirection::Down, 5));
    }

    #[rstest]
    #[case(0, 0.0)]
    #[case(2, 90.0)]
    #[case(4, 180.0)]
    fn rotation_is_eased(#[case] ticks: u32, #[case] expected: f64) {
        let mut gravity = GravityState::new(GravityDirection::Down, 4);
        gravity.request_flip();
        for _ in 0..ticks {
            gravity.advance();
        }
        assert_relative_eq!(gravity.visual_rotation_degrees(), expected);
    }

    #[test]
    fn easing_is_slow_at_the_ends() {
        let mut gravity = GravityState::new(GravityDirection::Down, 10);
        gravity.request_flip();
        gravity.advance();
        assert!(gravity.visual_rotation_degrees() < 18.0);
    }
}
