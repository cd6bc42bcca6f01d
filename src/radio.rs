//! # Radio Collaborator Boundary
//!
//! [`Radio`] is the external seam the core depends on for sending and
//! receiving raw bytes. The core never touches a transceiver directly:
//! hosts supply a `Radio` implementation appropriate to their hardware.
//! [`loopback`] ships an in-process double for tests and the CLI demo.

use std::sync::Arc;

use crate::error::MeshClockError;

/// The group-broadcast address registered at `begin()`.
pub const BROADCAST_ADDRESS: [u8; 6] = crate::constants::BROADCAST_ADDRESS;

/// The external send/receive collaborator the core depends on.
///
/// Implementations must be safe to call `send` from the tick path and to
/// invoke the registered receive callback from whatever context frames
/// arrive in (a driver interrupt, a poll loop, an async task); the core
/// places no locking of its own around either direction.
pub trait Radio: Send + Sync {
    /// Performs one-time hardware/driver initialization.
    fn init(&self) -> Result<(), MeshClockError>;

    /// Registers this node to receive frames sent to [`BROADCAST_ADDRESS`].
    fn register_broadcast_peer(&self) -> Result<(), MeshClockError>;

    /// Sends `bytes` to `dest`. Failures are not represented as
    /// `MeshClockError`: per the protocol's error handling design a send
    /// failure is logged and the next scheduled broadcast simply retries.
    fn send(&self, dest: &[u8; 6], bytes: &[u8]) -> Result<(), MeshClockError>;

    /// Installs the callback invoked on every received frame, regardless
    /// of source or content. The callback returns `true` if it consumed
    /// the frame.
    fn set_receive_callback(&self, cb: Arc<dyn Fn(&[u8; 6], &[u8]) -> bool + Send + Sync>);
}

pub mod loopback {
    //! An in-process [`Radio`] double backed by a broadcast channel,
    //! standing in for real hardware in tests and the CLI demo harness.

    use std::sync::{Arc, Mutex};

    use super::Radio;
    use crate::error::MeshClockError;

    type Callback = Arc<dyn Fn(&[u8; 6], &[u8]) -> bool + Send + Sync>;

    /// One node's view of a shared in-process medium: every [`LoopbackRadio`]
    /// sharing the same [`LoopbackMedium`] receives every other member's
    /// sends, mimicking a single shared broadcast domain.
    #[derive(Default)]
    pub struct LoopbackMedium {
        peers: Mutex<Vec<Arc<LoopbackRadio>>>,
    }

    impl LoopbackMedium {
        pub fn new() -> Arc<Self> {
            Arc::new(Self::default())
        }

        /// Creates a new node on this medium with address `address`.
        pub fn join(self: &Arc<Self>, address: [u8; 6]) -> Arc<LoopbackRadio> {
            let radio = Arc::new(LoopbackRadio {
                address,
                medium: Arc::clone(self),
                callback: Mutex::new(None),
            });
            self.peers.lock().expect("loopback medium lock poisoned").push(Arc::clone(&radio));
            radio
        }

        fn deliver(&self, from: [u8; 6], dest: &[u8; 6], bytes: &[u8]) {
            let peers = self.peers.lock().expect("loopback medium lock poisoned");
            for peer in peers.iter() {
                if peer.address == from {
                    continue;
                }
                if *dest == super::BROADCAST_ADDRESS || *dest == peer.address {
                    peer.deliver(&from, bytes);
                }
            }
        }
    }

    /// One simulated node's radio on a [`LoopbackMedium`].
    pub struct LoopbackRadio {
        address: [u8; 6],
        medium: Arc<LoopbackMedium>,
        callback: Mutex<Option<Callback>>,
    }

    impl LoopbackRadio {
        fn deliver(&self, from: &[u8; 6], bytes: &[u8]) {
            let cb = self.callback.lock().expect("loopback radio lock poisoned").clone();
            if let Some(cb) = cb {
                cb(from, bytes);
            }
        }
    }

    impl Radio for LoopbackRadio {
        fn init(&self) -> Result<(), MeshClockError> {
            Ok(())
        }

        fn register_broadcast_peer(&self) -> Result<(), MeshClockError> {
            Ok(())
        }

        fn send(&self, dest: &[u8; 6], bytes: &[u8]) -> Result<(), MeshClockError> {
            self.medium.deliver(self.address, dest, bytes);
            Ok(())
        }

        fn set_receive_callback(&self, cb: Arc<dyn Fn(&[u8; 6], &[u8]) -> bool + Send + Sync>) {
            *self.callback.lock().expect("loopback radio lock poisoned") = Some(cb);
        }
    }

}
