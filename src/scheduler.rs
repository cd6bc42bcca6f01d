//! # Broadcast Scheduler (C4)
//!
//! Decides when the next clock frame should be emitted. Every emission
//! clears the chosen interval, and the next call to `due` draws a fresh
//! jittered one lazily, so that two nodes that happen to start in lockstep
//! drift apart rather than repeatedly colliding on the shared medium.

use rand::RngCore;

use crate::config::NodeConfig;
use crate::state::ClockState;

/// Returns `true` if a broadcast is due at `now_ms`.
///
/// If no interval has been drawn yet (`next_interval_ms == 0`, including on
/// the very first call), one is drawn now via `rng` and stored before the
/// due-check runs, so even the first broadcast of a node's lifetime uses a
/// jittered interval rather than the bare nominal one. This is what keeps
/// two nodes that boot in lockstep from firing their first broadcast at
/// exactly the same moment.
pub fn due(state: &ClockState, config: &NodeConfig, now_ms: u64, rng: &mut dyn RngCore) -> bool {
    if state.next_interval_ms() == 0 {
        state.set_next_interval_ms(jittered_interval_ms(config, rng));
    }

    let interval = state.next_interval_ms();
    let elapsed = now_ms.saturating_sub(state.last_broadcast_ms());
    elapsed as i64 >= interval
}

/// Records that a broadcast was just emitted at `now_ms` and resets
/// `next_interval_ms` to 0, so the next call to `due` draws a fresh
/// jittered interval.
pub fn record_emission(state: &ClockState, now_ms: u64) {
    state.set_last_broadcast_ms(now_ms);
    state.set_next_interval_ms(0);
}

/// Draws `interval_ms ± jitter_percent%` uniformly at random.
fn jittered_interval_ms(config: &NodeConfig, rng: &mut dyn RngCore) -> i64 {
    let base = config.interval_ms as i64;
    if config.jitter_percent == 0 {
        return base;
    }
    let spread = (base * i64::from(config.jitter_percent)) / 100;
    if spread == 0 {
        return base;
    }
    // Uniform draw in [-spread, spread].
    let span = (2 * spread + 1) as u64;
    let offset = (rng.next_u64() % span) as i64 - spread;
    (base + offset).max(1)
}
