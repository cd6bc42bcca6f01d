//! # Receive Discriminator (C5)
//!
//! Wraps the codec and adjuster behind a single entry point, [`Discriminator::handle`],
//! shared by both coexistence modes the core supports:
//!
//! - **Owning**: the core installs a trampoline closure as the radio's
//!   receive callback, which calls `handle` directly.
//! - **Delegated**: host code calls `MeshClock::handle_frame`, which also
//!   just calls `handle`.
//!
//! Because both modes funnel through the same method, there is no way for
//! the two coexistence modes to observe different semantics.

use std::sync::{Arc, Mutex};

use crate::adjuster;
use crate::clock_source::ClockSource;
use crate::codec;
use crate::config::NodeConfig;
use crate::state::ClockState;

type UserCallback = Arc<dyn Fn(&[u8; 6], &[u8]) + Send + Sync>;

/// Parses and applies received frames, and forwards every received frame
/// (clock or not) to an optional host-installed callback.
pub struct Discriminator {
    state: Arc<ClockState>,
    config: NodeConfig,
    clock_source: Arc<dyn ClockSource>,
    user_callback: Mutex<Option<UserCallback>>,
}

impl Discriminator {
    pub fn new(state: Arc<ClockState>, config: NodeConfig, clock_source: Arc<dyn ClockSource>) -> Self {
        Discriminator {
            state,
            config,
            clock_source,
            user_callback: Mutex::new(None),
        }
    }

    pub fn set_user_callback(&self, cb: impl Fn(&[u8; 6], &[u8]) + Send + Sync + 'static) {
        *self.user_callback.lock().expect("discriminator lock poisoned") = Some(Arc::new(cb));
    }

    /// Handles one received frame, regardless of source. Returns `true` if
    /// `bytes` was a well-formed clock frame and was consumed.
    ///
    /// Performs no allocation on the clock-frame path: `codec::decode`
    /// operates directly on `bytes`. Non-clock-frame content, and malformed
    /// clock frames, are silently forwarded to the user callback (if any)
    /// and otherwise ignored. Per the protocol's error handling design,
    /// parse failures are not logged above `trace` level.
    pub fn handle(&self, src: &[u8; 6], bytes: &[u8]) -> bool {
        match codec::decode(bytes) {
            Ok(remote_us) => {
                let local_us = (self.clock_source.now_us() as i64 + self.state.offset()) as u64;
                let now_ms = self.clock_source.now_us() / 1000;
                adjuster::observe(&self.state, &self.config, remote_us, local_us, now_ms);
                log::trace!("received clock frame from {src:?}: remote_us={remote_us}");
                true
            }
            Err(_) => {
                log::trace!("received non-clock-frame of {} bytes from {src:?}", bytes.len());
                if let Some(cb) = self.user_callback.lock().expect("discriminator lock poisoned").clone() {
                    cb(src, bytes);
                }
                false
            }
        }
    }
}
