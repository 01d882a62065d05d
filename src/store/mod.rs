//! Application state store.
//!
//! A [`Store`] owns the single [`AppState`] and only changes it through
//! [`Action`]s run by the pure [`reduce`] function. Each dispatch is one whole,
//! synchronous transition, so observers never see a half-applied update.
//! Views subscribe through a `tokio::sync::watch` channel.
mod action;
mod reducer;
mod state;

pub use action::{Action, ErrorKind};
pub use reducer::{clamp_percent, reduce};
pub use state::{
    AppState, ImageTab, ProgressState, ProgressVariant, TabKind, TabSession, TextTab, UiState,
};

use std::sync::Arc;
use tokio::sync::watch;

/// Cheap to clone; every clone dispatches into the same state.
#[derive(Clone)]
pub struct Store {
    tx: Arc<watch::Sender<AppState>>,
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl Store {
    pub fn new() -> Self {
        Self::with_state(AppState::default())
    }

    pub fn with_state(state: AppState) -> Self {
        let (tx, _rx) = watch::channel(state);
        Self { tx: Arc::new(tx) }
    }

    /// Owned copy of the current state.
    pub fn snapshot(&self) -> AppState {
        self.tx.borrow().clone()
    }

    /// Read the current state without cloning it.
    pub fn read<R>(&self, f: impl FnOnce(&AppState) -> R) -> R {
        f(&self.tx.borrow())
    }

    pub fn dispatch(&self, action: Action) {
        tracing::trace!(action = action.name(), "dispatch");
        self.tx.send_modify(|state| {
            let next = reduce(state, action);
            *state = next;
        });
    }

    pub fn subscribe(&self) -> watch::Receiver<AppState> {
        self.tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_state() {
        let store = Store::new();
        let other = store.clone();
        other.dispatch(Action::SetActiveTab(TabKind::Image));
        assert_eq!(store.snapshot().active_tab, TabKind::Image);
        assert_eq!(store.read(|s| s.active_tab), TabKind::Image);
    }

    #[tokio::test]
    async fn subscribers_see_dispatches() {
        let store = Store::new();
        let mut rx = store.subscribe();
        store.dispatch(Action::UpdateTextInput("鱼香肉丝".into()));
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().text.input, "鱼香肉丝");
    }
}
