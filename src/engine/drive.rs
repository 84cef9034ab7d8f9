//! Standard drivers for pumping the engine state machine.
//!
//! The engine itself never sleeps; it hands out [`Step::Wait`] values and
//! lets the driver decide what a wait means. Tests and headless consumers
//! use [`run_unpaced`]; the animated CLI uses [`run_paced`].

use super::{Engine, InputRequest, RunOutcome, Step};
use std::thread;
use std::time::Duration;

/// Granularity of paced sleeps. Long waits are sliced so the caller regains
/// control often enough to flip the pause flag between slices.
const SLICE: Duration = Duration::from_millis(25);

/// Drives the run to completion, consuming timed waits instantly.
/// Input requests are resolved through `input`.
pub fn run_unpaced(
    engine: &mut Engine<'_>,
    mut input: impl FnMut(&InputRequest) -> String,
) -> RunOutcome {
    loop {
        match engine.step() {
            Step::Wait(_) => {}
            Step::NeedInput(request) => {
                let value = input(&request);
                if let Err(error) = engine.provide_input(&value) {
                    log::warn!("input rejected: {error}");
                }
            }
            Step::Finished(outcome) => return outcome,
        }
    }
}

/// Drives the run to completion in real time, sleeping out each wait in
/// small slices.
pub fn run_paced(
    engine: &mut Engine<'_>,
    mut input: impl FnMut(&InputRequest) -> String,
) -> RunOutcome {
    loop {
        match engine.step() {
            Step::Wait(duration) => sleep_sliced(duration),
            Step::NeedInput(request) => {
                let value = input(&request);
                if let Err(error) = engine.provide_input(&value) {
                    log::warn!("input rejected: {error}");
                }
            }
            Step::Finished(outcome) => return outcome,
        }
    }
}

fn sleep_sliced(duration: Duration) {
    let mut remaining = duration;
    while remaining > Duration::ZERO {
        let slice = remaining.min(SLICE);
        thread::sleep(slice);
        remaining -= slice;
    }
}
