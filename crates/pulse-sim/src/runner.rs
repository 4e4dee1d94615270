//! Scoped background drift runner.
//!
//! The dashboard brackets the simulated-update timer with the lifetime of
//! the view that owns it: acquire on mount, release on teardown. The
//! runner models that contract as an owned handle — [`DriftRunner::start`]
//! spawns exactly one worker thread, and [`DriftRunner::stop`] (or drop)
//! signals it and joins, so no tick can fire after disposal.

use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;

use pulse_core::{DriftSettings, Store};
use tracing::{debug, warn};

use crate::drift::tick;
use crate::rng::DeterministicRng;

/// Store handle shared between the runner and its consumers.
pub type SharedStore = Arc<Mutex<Store>>;

/// Owned handle to a running drift worker.
///
/// At most one tick is outstanding at a time: the worker applies a tick,
/// then waits out the full interval before the next.
pub struct DriftRunner {
    stop: Sender<()>,
    worker: Option<JoinHandle<u64>>,
}

impl DriftRunner {
    /// Spawn the interval worker.
    ///
    /// Ticks run every `settings.interval_ms` until [`Self::stop`] is
    /// called or the handle is dropped.
    #[must_use]
    pub fn start(store: SharedStore, settings: DriftSettings, seed: u64) -> Self {
        let (stop, stop_rx) = mpsc::channel();
        let interval = Duration::from_millis(settings.interval_ms);
        let worker = std::thread::spawn(move || {
            let mut rng = DeterministicRng::new(seed);
            let mut ticks: u64 = 0;
            loop {
                match stop_rx.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => {
                        let Ok(mut guard) = store.lock() else {
                            warn!("store lock poisoned, drift worker exiting");
                            break;
                        };
                        let next = tick(&guard, &settings, &mut rng);
                        *guard = next;
                        ticks += 1;
                    }
                    // Stop requested, or the handle was dropped.
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
            }
            debug!(ticks, "drift worker stopped");
            ticks
        });
        Self {
            stop,
            worker: Some(worker),
        }
    }

    /// Signal the worker and wait for it to finish.
    ///
    /// Returns the number of ticks applied. Idempotent; a second call
    /// returns 0.
    pub fn stop(&mut self) -> u64 {
        let _ = self.stop.send(());
        self.worker
            .take()
            .and_then(|w| w.join().ok())
            .unwrap_or(0)
    }
}

impl Drop for DriftRunner {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast_settings() -> DriftSettings {
        DriftSettings {
            interval_ms: 10,
            ..DriftSettings::default()
        }
    }

    #[test]
    fn runner_ticks_until_stopped() {
        let store: SharedStore = Arc::new(Mutex::new(Store::seeded()));
        let mut runner = DriftRunner::start(Arc::clone(&store), fast_settings(), 1);
        std::thread::sleep(Duration::from_millis(120));
        let ticks = runner.stop();
        assert!(ticks > 0, "worker should have ticked at least once");

        let progressed = store.lock().expect("unpoisoned").item(5).expect("seed item").progress;
        assert!(progressed > 0, "pending item progress should have drifted");
    }

    #[test]
    fn no_tick_fires_after_stop() {
        let store: SharedStore = Arc::new(Mutex::new(Store::seeded()));
        let mut runner = DriftRunner::start(Arc::clone(&store), fast_settings(), 1);
        std::thread::sleep(Duration::from_millis(50));
        runner.stop();

        let frozen = store.lock().expect("unpoisoned").snapshot();
        std::thread::sleep(Duration::from_millis(60));
        assert_eq!(store.lock().expect("unpoisoned").snapshot(), frozen);
    }

    #[test]
    fn stop_is_idempotent() {
        let store: SharedStore = Arc::new(Mutex::new(Store::seeded()));
        let mut runner = DriftRunner::start(store, fast_settings(), 1);
        std::thread::sleep(Duration::from_millis(30));
        runner.stop();
        assert_eq!(runner.stop(), 0);
    }

    #[test]
    fn drop_releases_the_worker() {
        let store: SharedStore = Arc::new(Mutex::new(Store::seeded()));
        {
            let _runner = DriftRunner::start(Arc::clone(&store), fast_settings(), 1);
            std::thread::sleep(Duration::from_millis(30));
        }
        // Dropped runner must not keep mutating.
        let frozen = store.lock().expect("unpoisoned").snapshot();
        std::thread::sleep(Duration::from_millis(60));
        assert_eq!(store.lock().expect("unpoisoned").snapshot(), frozen);
    }
}
