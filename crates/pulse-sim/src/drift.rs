//! Pure drift step.
//!
//! Stands in for the dashboard's interval timers that nudged progress and
//! workload figures to fake a live data source. Each tick is a pure
//! function of `(state, config, rng)`, so replaying the same seed over
//! the same snapshot always yields the same trajectory.

use pulse_core::model::clamp_u8;
use pulse_core::{DriftSettings, Store};
use tracing::trace;

use crate::rng::DeterministicRng;

/// Advance one tick of simulated external updates.
///
/// - Every incomplete work item below 100% progress gains one point.
///   Items are never auto-completed; finishing is an explicit user
///   action.
/// - Every member workload moves by `±workload_jitter`, clamped to
///   `[workload_floor, 100]`.
/// - Every project's progress moves within
///   `project_jitter_lo..=project_jitter_hi`, clamped to `[0, 100]`.
#[must_use]
pub fn tick(store: &Store, settings: &DriftSettings, rng: &mut DeterministicRng) -> Store {
    let mut next = store.snapshot();

    next.map_items(|item| {
        if !item.completed && item.progress < 100 {
            item.progress += 1;
        }
    });

    let floor = settings.workload_floor.min(100);
    next.map_members(|member| {
        let jitter = rng.jitter(settings.workload_jitter);
        member.workload =
            clamp_u8(i32::from(member.workload).saturating_add(jitter), floor, 100);
        for project in &mut member.projects {
            let delta = rng.jitter_in(settings.project_jitter_lo, settings.project_jitter_hi);
            project.progress =
                clamp_u8(i32::from(project.progress).saturating_add(delta), 0, 100);
        }
    });

    trace!("drift tick applied");
    next
}

/// Fold [`tick`] `n` times; deterministic replay for the CLI and tests.
#[must_use]
pub fn run_ticks(
    store: &Store,
    settings: &DriftSettings,
    rng: &mut DeterministicRng,
    n: u64,
) -> Store {
    let mut state = store.snapshot();
    for _ in 0..n {
        state = tick(&state, settings, rng);
    }
    state
}
