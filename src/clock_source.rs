//! # Monotonic Counter (C1)
//!
//! The core is driven by a free-running, non-wrapping microsecond counter
//! supplied by the host. This module defines the contract
//! ([`ClockSource`]) and ships two process-local implementations backed by
//! [`std::time::Instant`]; real embedded hosts are expected to supply their
//! own implementation backed by a hardware timer.

use std::sync::OnceLock;
use std::time::Instant;

/// A free-running, non-wrapping source of microsecond time.
///
/// Implementations must never return a value lower than a previous call
/// (within the lifetime of the process) and must be safe to call from
/// whatever execution context the host's receive path runs in, including
/// an interrupt or driver bottom-half, for embedded hosts. `now_us` takes
/// `&self`, not `&mut self`, precisely so it can be shared between the tick
/// path and the receive path without a lock.
pub trait ClockSource: Send + Sync {
    /// Returns the current reading, in microseconds, of this counter.
    fn now_us(&self) -> u64;
}

fn process_epoch() -> Instant {
    static EPOCH: OnceLock<Instant> = OnceLock::new();
    *EPOCH.get_or_init(Instant::now)
}

/// A [`ClockSource`] safe to call from any execution context.
///
/// Backed by a process-wide [`Instant`] epoch established on first use.
/// This is the counterpart of the distilled protocol's
/// "safe-for-arbitrary-context reader."
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl ClockSource for SystemClock {
    fn now_us(&self) -> u64 {
        process_epoch().elapsed().as_micros() as u64
    }
}

/// A [`ClockSource`] intended for the interrupt-context receive path.
///
/// Reads the same process-wide epoch as [`SystemClock`] but avoids the
/// `Duration` round trip, matching the distilled protocol's "faster reader
/// intended for interrupt context." On a hosted (non-embedded) target the
/// two readers are equally cheap; the distinction exists so the API shape
/// carries over to a bare-metal port where it matters.
#[derive(Debug, Default, Clone, Copy)]
pub struct FastSystemClock;

impl ClockSource for FastSystemClock {
    fn now_us(&self) -> u64 {
        let elapsed = process_epoch().elapsed();
        elapsed.as_secs() * 1_000_000 + u64::from(elapsed.subsec_micros())
    }
}

/// Performs the startup "timer not advancing" self-check described in the
/// protocol's error handling design: reads the counter twice, separated by
/// a short sleep, and logs a warning (but does not fail) if the two reads
/// come back identical.
pub fn diagnose_monotonicity(clock: &dyn ClockSource) {
    let first = clock.now_us();
    std::thread::sleep(std::time::Duration::from_millis(5));
    let second = clock.now_us();

    if second <= first {
        log::warn!(
            "clock source did not advance across a 5ms sleep (first={first}, second={second}); \
             this looks like a hardware/driver bug, continuing anyway"
        );
    }
}
