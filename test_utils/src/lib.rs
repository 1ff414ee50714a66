//! Utility helpers for tests.
//!
//! [`LevelBuilder`] lays levels out on the tile grid so tests read like the
//! maps they describe; [`run`] drives a simulation for a number of ticks.

pub mod level;
pub mod run;

pub use level::LevelBuilder;
pub use run::{run_ticks, run_until};

use flipside::SimEvent;

/// Assert that `events` contains an event matching `predicate`.
///
/// # Panics
/// Panics listing every event when none matches.
pub fn assert_event(events: &[SimEvent], predicate: impl Fn(&SimEvent) -> bool) {
    assert!(
        events.iter().any(predicate),
        "expected event not found in {events:?}"
    );
}
