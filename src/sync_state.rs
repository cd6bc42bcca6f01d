//! # Sync State Derivation (C6)
//!
//! The mesh clock has no stored state machine for ALONE/SYNCED/LOST.
//! [`derive`] computes the current state on demand from `ClockState` and the
//! host clock, per invariant I4. This keeps the three states consistent by
//! construction: there is no transition table to get out of sync with the
//! atomics it reads.

use std::fmt;

use crate::config::NodeConfig;
use crate::state::ClockState;

/// The mesh clock's externally-visible sync status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    /// No clock frame has ever been received.
    Alone,
    /// At least one frame has been received within `sync_timeout_ms`.
    Synced,
    /// A frame was received previously, but not within `sync_timeout_ms`.
    Lost,
}

impl fmt::Display for SyncState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SyncState::Alone => "ALONE",
            SyncState::Synced => "SYNCED",
            SyncState::Lost => "LOST",
        };
        f.write_str(label)
    }
}

/// Derives the current [`SyncState`] from `state` and `config`.
///
/// `now_ms` is the host monotonic millisecond timestamp at which the
/// derivation is being performed, typically the same clock driving the
/// tick loop, not the mesh clock itself.
pub fn derive(state: &ClockState, config: &NodeConfig, now_ms: u64) -> SyncState {
    if !state.is_synced() {
        return SyncState::Alone;
    }

    let elapsed = now_ms.saturating_sub(state.last_sync_ms());
    if elapsed > config.sync_timeout_ms {
        SyncState::Lost
    } else {
        SyncState::Synced
    }
}
