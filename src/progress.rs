//! Cosmetic progress indicator.
//!
//! The bar is driven by a timer, not by the request it decorates: it climbs to
//! 95% over a fixed duration and waits there. Callers join it with the real
//! work at exactly two points, [`ProgressReporter::complete`] on success and
//! [`ProgressReporter::hide`] on failure.
use crate::store::{Action, ProgressVariant, Store};
use crate::tasks::{TaskHandle, schedule};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

pub const STEPS: u32 = 20;
pub const SIMULATED_CEILING: u8 = 95;
pub const COMPLETE_GRACE: Duration = Duration::from_millis(500);

pub const RECIPE_DURATION: Duration = Duration::from_millis(4000);
pub const OPTIMIZE_DURATION: Duration = Duration::from_millis(2500);
pub const ANALYSIS_DURATION: Duration = Duration::from_millis(3000);
pub const IMAGE_DURATION: Duration = Duration::from_millis(6000);

/// Percent shown at `step` of [`STEPS`].
pub fn simulated_percent(step: u32) -> u8 {
    let raw = (f64::from(step) / f64::from(STEPS) * 100.0).round();
    (raw as u8).min(SIMULATED_CEILING)
}

#[derive(Default)]
struct Pending {
    ticker: Option<TaskHandle>,
    hide: Option<TaskHandle>,
}

impl Pending {
    fn cancel_all(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.abort();
        }
        if let Some(hide) = self.hide.take() {
            hide.abort();
        }
    }
}

#[derive(Clone)]
pub struct ProgressReporter {
    store: Store,
    pending: Arc<Mutex<Pending>>,
}

impl ProgressReporter {
    pub fn new(store: Store) -> Self {
        Self {
            store,
            pending: Arc::new(Mutex::new(Pending::default())),
        }
    }

    fn pending(&self) -> MutexGuard<'_, Pending> {
        self.pending.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Show the bar and start stepping it towards 95% over `duration`.
    /// A simulation already running is replaced.
    pub fn simulate(&self, message: impl Into<String>, variant: ProgressVariant, duration: Duration) {
        let mut pending = self.pending();
        pending.cancel_all();

        self.store.dispatch(Action::ShowProgress {
            message: message.into(),
            variant,
        });

        let store = self.store.clone();
        let step_duration = duration / STEPS;
        pending.ticker = Some(TaskHandle::spawn(async move {
            for step in 0..=STEPS {
                store.dispatch(Action::UpdateProgress(f64::from(simulated_percent(step))));
                if step < STEPS {
                    tokio::time::sleep(step_duration).await;
                }
            }
        }));
    }

    /// Jump to 100% and hide after [`COMPLETE_GRACE`].
    pub fn complete(&self) {
        let mut pending = self.pending();
        pending.cancel_all();

        self.store.dispatch(Action::UpdateProgress(100.0));
        let store = self.store.clone();
        pending.hide = Some(schedule(COMPLETE_GRACE, move || {
            store.dispatch(Action::HideProgress);
        }));
    }

    /// Hide immediately, skipping the 100% state.
    pub fn hide(&self) {
        self.pending().cancel_all();
        self.store.dispatch(Action::HideProgress);
    }
}
