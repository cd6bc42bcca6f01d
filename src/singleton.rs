//! # Process-Wide Instance Registration
//!
//! Escape hatch for `Radio` implementations that can only be handed a bare
//! function pointer rather than a capturing closure. Every `Radio`
//! implementation in this crate accepts `Arc<dyn Fn(...)>`, so nothing here
//! is exercised by the crate's own code paths. It exists purely as the
//! documented seam for host integrations that need it.

use std::sync::Arc;

use lazy_static::lazy_static;
use std::sync::Mutex;

use crate::core::MeshClock;

lazy_static! {
    static ref INSTANCE: Mutex<Option<Arc<MeshClock>>> = Mutex::new(None);
}

/// Registers `clock` as the process-wide instance, replacing any previous
/// registration.
pub fn install(clock: Arc<MeshClock>) {
    *INSTANCE.lock().expect("mesh clock singleton lock poisoned") = Some(clock);
}

/// Returns the currently registered instance, if any.
pub fn instance() -> Option<Arc<MeshClock>> {
    INSTANCE.lock().expect("mesh clock singleton lock poisoned").clone()
}

/// Clears the process-wide instance. Intended for test teardown only:
/// production hosts register exactly once at `begin()` and never clear it.
pub fn clear() {
    *INSTANCE.lock().expect("mesh clock singleton lock poisoned") = None;
}
