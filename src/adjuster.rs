//! # Clock Adjuster (C3)
//!
//! Implements the forward-only slew / large-step rule. The adjuster never
//! decreases `offset`. This is what gives the mesh clock its monotonicity
//! invariant (I1), and is leader-follower-free: any node whose clock runs
//! ahead pulls the rest of the mesh toward it, and losing a node never
//! strands the others.
//!
//! The large-step branch exists because slewing a very large positive delta
//! at `slew_alpha` per reception would take many receptions to converge; at
//! startup, and after a gross resynchronization, an instant jump is
//! preferred instead.

use crate::config::NodeConfig;
use crate::state::ClockState;

/// Applies one observation of a remote mesh timestamp to `state`.
///
/// `remote_us` is the decoded timestamp from a received clock frame.
/// `local_us` is this node's own mesh time (`clock_source() + offset`) at
/// the moment of reception. `now_ms` is the host monotonic millisecond
/// timestamp used to update `last_sync_ms`.
///
/// `last_sync_ms` is updated unconditionally, even when `offset` does not
/// change: a reception is a reception regardless of which way the delta
/// points.
pub fn observe(state: &ClockState, config: &NodeConfig, remote_us: u64, local_us: u64, now_ms: u64) {
    state.set_last_sync_ms(now_ms);

    let delta = remote_us as i64 - local_us as i64;
    let was_synced = state.is_synced();

    if !was_synced || delta.unsigned_abs() > config.large_step_threshold_us {
        // Discontinuous correction: jump forward on a positive delta, leave
        // offset untouched on a nonpositive one, but mark synced either way.
        if delta > 0 {
            state.add_offset(delta);
        }
        state.set_synced(true);
    } else if delta > 0 {
        // Small positive delta while already synced: partial forward catch-up.
        let increment = (delta as f64 * config.slew_alpha).floor() as i64;
        state.add_offset(increment);
    }
    // delta <= 0 while already synced: no adjustment, forward-only.
}
