//! Helpers for stepping a simulation in tests.

use flipside::{InputIntent, SimEvent, Simulation};

/// Steps `simulation` `ticks` times with the same input and gathers every
/// event emitted.
pub fn run_ticks(simulation: &mut Simulation, input: InputIntent, ticks: u32) -> Vec<SimEvent> {
    (0..ticks)
        .flat_map(|_| simulation.step(input))
        .collect()
}

/// Steps with `input` until `done` holds, for at most `limit` ticks.
///
/// Returns the number of ticks taken, or `None` if `done` never held.
pub fn run_until(
    simulation: &mut Simulation,
    input: InputIntent,
    limit: u32,
    mut done: impl FnMut(&Simulation) -> bool,
) -> Option<u32> {
    for tick in 1..=limit {
        simulation.step(input);
        if done(simulation) {
            return Some(tick);
        }
    }
    None
}
