//! # Shared Clock State
//!
//! The runtime fields that the tick path and the receive path both touch
//! (`offset`, `synced`, `last_sync_ms`, `last_broadcast_ms`, and
//! `next_interval_ms`) live here behind atomics, per the concurrency model
//! in the protocol's design notes: "Model as an object holding
//! atomically-updatable integer fields … the former is preferred" (over a
//! sequence lock or disabling the receive callback around mutations).
//!
//! All loads/stores use [`Ordering::SeqCst`]. The core is not a hot path
//! relative to radio air time, so the simplest correct ordering is used
//! throughout rather than reasoning about weaker ones.

use std::sync::atomic::{AtomicBool, AtomicI64, AtomicU64, Ordering};

const ORDER: Ordering = Ordering::SeqCst;

/// Shared, atomically-updated fields mutated from both the tick path and
/// the receive path.
#[derive(Debug, Default)]
pub struct ClockState {
    offset: AtomicI64,
    synced: AtomicBool,
    last_sync_ms: AtomicU64,
    last_broadcast_ms: AtomicU64,
    /// 0 means "pick a new randomized interval on the next tick".
    next_interval_ms: AtomicI64,
}

impl ClockState {
    /// The current offset added to the local counter to obtain mesh time.
    pub fn offset(&self) -> i64 {
        self.offset.load(ORDER)
    }

    pub(crate) fn add_offset(&self, delta: i64) {
        self.offset.fetch_add(delta, ORDER);
    }

    /// Whether at least one valid clock frame has ever been received.
    pub fn is_synced(&self) -> bool {
        self.synced.load(ORDER)
    }

    pub(crate) fn set_synced(&self, value: bool) {
        self.synced.store(value, ORDER);
    }

    /// Millisecond timestamp of the most recent valid reception.
    pub fn last_sync_ms(&self) -> u64 {
        self.last_sync_ms.load(ORDER)
    }

    pub(crate) fn set_last_sync_ms(&self, value: u64) {
        self.last_sync_ms.store(value, ORDER);
    }

    /// Millisecond timestamp of the most recent broadcast emission.
    pub fn last_broadcast_ms(&self) -> u64 {
        self.last_broadcast_ms.load(ORDER)
    }

    pub(crate) fn set_last_broadcast_ms(&self, value: u64) {
        self.last_broadcast_ms.store(value, ORDER);
    }

    /// The currently chosen randomized interval, or 0 if unchosen.
    pub fn next_interval_ms(&self) -> i64 {
        self.next_interval_ms.load(ORDER)
    }

    pub(crate) fn set_next_interval_ms(&self, value: i64) {
        self.next_interval_ms.store(value, ORDER);
    }
}

/// A point-in-time, non-atomic snapshot of [`ClockState`], for diagnostics
/// and tests that want a single consistent read of several fields at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeshClockStats {
    pub offset: i64,
    pub synced: bool,
    pub last_sync_ms: u64,
    pub last_broadcast_ms: u64,
}

impl ClockState {
    /// Snapshots the current fields. Not atomic across fields: callers
    /// needing a single instant-in-time view across multiple fields should
    /// treat this as approximate, matching the lock-free design.
    pub fn snapshot(&self) -> MeshClockStats {
        MeshClockStats {
            offset: self.offset(),
            synced: self.is_synced(),
            last_sync_ms: self.last_sync_ms(),
            last_broadcast_ms: self.last_broadcast_ms(),
        }
    }
}
