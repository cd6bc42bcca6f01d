//! # Core Façade (C7)
//!
//! [`MeshClock`] binds the monotonic counter, codec, adjuster, scheduler,
//! discriminator, and sync-state tracker into the single object hosts
//! construct and drive. It owns no thread of its own: hosts call
//! [`MeshClock::tick`] from their own loop and, in delegated mode, call
//! [`MeshClock::handle_frame`] from their own receive path.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use rand::rngs::ThreadRng;

use crate::clock_source::ClockSource;
use crate::codec;
use crate::config::NodeConfig;
use crate::constants::BROADCAST_ADDRESS;
use crate::discriminator::Discriminator;
use crate::error::MeshClockError;
use crate::radio::Radio;
use crate::scheduler;
use crate::state::{ClockState, MeshClockStats};
use crate::sync_state::{self, SyncState};

/// The mesh clock core. Constructed once per node and held for the life of
/// the process, typically behind an `Arc`.
pub struct MeshClock {
    state: Arc<ClockState>,
    config: NodeConfig,
    clock_source: Arc<dyn ClockSource>,
    radio: Arc<dyn Radio>,
    discriminator: Arc<Discriminator>,
    begun: AtomicBool,
    rng: Mutex<ThreadRng>,
}

impl MeshClock {
    /// Builds a new core. Does not touch the radio: call [`begin`](Self::begin)
    /// to initialize it and start participating in the mesh.
    pub fn new(config: NodeConfig, clock_source: Arc<dyn ClockSource>, radio: Arc<dyn Radio>) -> Self {
        let state = Arc::new(ClockState::default());
        let discriminator = Arc::new(Discriminator::new(
            Arc::clone(&state),
            config,
            Arc::clone(&clock_source),
        ));

        MeshClock {
            state,
            config,
            clock_source,
            radio,
            discriminator,
            begun: AtomicBool::new(false),
            rng: Mutex::new(rand::thread_rng()),
        }
    }

    /// Initializes the radio, registers for the broadcast group, and (when
    /// `register_callback` is `true`) installs this core as the radio's
    /// receive callback (owning mode). When `false`, the host is
    /// responsible for calling [`handle_frame`](Self::handle_frame) itself
    /// (delegated mode).
    pub fn begin(&self, register_callback: bool) -> Result<(), MeshClockError> {
        self.radio.init()?;
        self.radio.register_broadcast_peer()?;

        if register_callback {
            let discriminator = Arc::clone(&self.discriminator);
            self.radio.set_receive_callback(Arc::new(move |src, bytes| discriminator.handle(src, bytes)));
        }

        self.begun.store(true, Ordering::SeqCst);
        crate::clock_source::diagnose_monotonicity(self.clock_source.as_ref());
        log::info!("mesh clock started (owning={register_callback})");
        Ok(())
    }

    /// Drives time forward: emits a broadcast if one is due. Call this
    /// periodically from the host's main loop; it never blocks.
    pub fn tick(&self) {
        let now_us = self.clock_source.now_us();
        let now_ms = now_us / 1000;

        let due = {
            let mut rng = self.rng.lock().expect("mesh clock rng lock poisoned");
            scheduler::due(&self.state, &self.config, now_ms, &mut *rng)
        };

        if due {
            let stamp = self.mesh_now_us().saturating_add(self.config.tx_delay_us);
            let frame = codec::encode(stamp);

            if let Err(err) = self.radio.send(&BROADCAST_ADDRESS, &frame) {
                log::debug!("broadcast send failed, will retry next tick: {err}");
            }

            scheduler::record_emission(&self.state, now_ms);
        }
    }

    /// The current mesh time, in microseconds.
    pub fn mesh_now_us(&self) -> u64 {
        (self.clock_source.now_us() as i64 + self.state.offset()) as u64
    }

    /// The current mesh time, in milliseconds, truncated to 32 bits.
    ///
    /// This is a diagnostic convenience, not a wire value. The wire
    /// timestamp is always the full 56-bit microsecond field from
    /// [`mesh_now_us`](Self::mesh_now_us).
    pub fn mesh_now_ms(&self) -> u32 {
        (self.mesh_now_us() / 1000) as u32
    }

    /// The current derived sync state.
    pub fn sync_state(&self) -> SyncState {
        let now_ms = self.clock_source.now_us() / 1000;
        sync_state::derive(&self.state, &self.config, now_ms)
    }

    /// Delegated-mode entry point: hosts not using the owning callback
    /// call this directly from their own receive path. Returns `true` if
    /// `bytes` was a clock frame.
    pub fn handle_frame(&self, src: &[u8; 6], bytes: &[u8]) -> bool {
        self.discriminator.handle(src, bytes)
    }

    /// Installs a callback invoked for every received frame that is *not*
    /// a well-formed clock frame.
    pub fn set_user_callback(&self, cb: impl Fn(&[u8; 6], &[u8]) + Send + Sync + 'static) {
        self.discriminator.set_user_callback(cb);
    }

    /// A point-in-time snapshot of the runtime state, for diagnostics.
    pub fn stats(&self) -> MeshClockStats {
        self.state.snapshot()
    }
}
