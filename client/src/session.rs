use std::sync::{
    atomic::{AtomicBool, AtomicU8, Ordering},
    Arc,
};

use log::info;
use serde::{Deserialize, Serialize};

/// Relationship with the remote graph
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    Disconnected,
    /// Handshake done, not yet told to run in lockstep
    Connected,
    Synced,
}

impl SessionState {
    fn to_u8(self) -> u8 {
        match self {
            SessionState::Disconnected => 0,
            SessionState::Connected => 1,
            SessionState::Synced => 2,
        }
    }

    fn from_u8(value: u8) -> Self {
        match value {
            1 => SessionState::Connected,
            2 => SessionState::Synced,
            _ => SessionState::Disconnected,
        }
    }
}

/// Execution state requested by the remote side
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExecutionState {
    Idle,
    Synced,
}

#[derive(Default)]
struct SessionShared {
    state: AtomicU8,
    sync_requested: AtomicBool,
}

/// Session state shared between the network and simulation contexts.
///
/// A `Synced` request is only latched here and takes effect at the next
/// begin-frame. `Idle` takes effect immediately.
#[derive(Clone, Default)]
pub struct SessionControl {
    shared: Arc<SessionShared>,
}

impl SessionControl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SessionState {
        SessionState::from_u8(self.shared.state.load(Ordering::SeqCst))
    }

    pub fn is_connected(&self) -> bool {
        self.state() != SessionState::Disconnected
    }

    pub fn is_sync_requested(&self) -> bool {
        self.shared.sync_requested.load(Ordering::SeqCst)
    }

    /// Safe to call from any thread
    pub fn on_state_changed(&self, state: ExecutionState) {
        match state {
            ExecutionState::Synced => {
                self.shared.sync_requested.store(true, Ordering::SeqCst);
            }
            ExecutionState::Idle => {
                self.shared.sync_requested.store(false, Ordering::SeqCst);
                let leaving_sync = self.transition(SessionState::Synced, SessionState::Connected);
                if leaving_sync {
                    info!("Session back to idle");
                }
            }
        }
    }

    pub(crate) fn connect(&self) {
        self.shared.sync_requested.store(false, Ordering::SeqCst);
        self.shared
            .state
            .store(SessionState::Connected.to_u8(), Ordering::SeqCst);
    }

    pub(crate) fn disconnect(&self) {
        self.shared.sync_requested.store(false, Ordering::SeqCst);
        self.shared
            .state
            .store(SessionState::Disconnected.to_u8(), Ordering::SeqCst);
    }

    /// Applies a latched `Synced` request. Returns whether the state changed.
    pub(crate) fn apply_pending_sync(&self) -> bool {
        if !self.shared.sync_requested.swap(false, Ordering::SeqCst) {
            return false;
        }
        self.transition(SessionState::Connected, SessionState::Synced)
    }

    fn transition(&self, from: SessionState, to: SessionState) -> bool {
        self.shared
            .state
            .compare_exchange(from.to_u8(), to.to_u8(), Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
    }
}
