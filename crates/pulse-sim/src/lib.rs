#![forbid(unsafe_code)]
//! Simulated drift for the Pulse tracking engine.
//!
//! Models the "live" updates the dashboard faked with interval timers:
//! a pure, seedable [`drift::tick`] step plus a scoped background
//! [`runner::DriftRunner`] for consumers that want the timer managed.
//!
//! # Conventions
//!
//! - **Errors**: configuration is validated in `pulse-core`; the step
//!   functions here are total.
//! - **Logging**: `tracing` macros (`trace!` per tick, `debug!`/`warn!`
//!   in the runner).

pub mod drift;
pub mod rng;
pub mod runner;

pub use drift::{run_ticks, tick};
pub use rng::DeterministicRng;
pub use runner::{DriftRunner, SharedStore};
