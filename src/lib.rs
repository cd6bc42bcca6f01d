//! # mesh-clock - a master-less, forward-only mesh time synchronization core
//!
//! `mesh-clock` establishes a shared 64-bit microsecond clock across a set
//! of wireless nodes exchanging short broadcast datagrams on a lossy,
//! half-duplex radio link. Every node continuously broadcasts its own view
//! of mesh time; every node, on reception, conditionally pulls its own
//! clock forward toward any advertised time that is ahead of it. There is
//! no leader election and no backward correction: the mesh clock is
//! monotonically non-decreasing and converges toward the fastest-advancing
//! node.
//!
//! ## Usage
//!
//! ```toml
//! [dependencies]
//! mesh-clock = "0.1.0"
//! ```
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use mesh_clock::{MeshClock, NodeConfig};
//! use mesh_clock::clock_source::SystemClock;
//! use mesh_clock::radio::loopback::LoopbackMedium;
//!
//! let medium = LoopbackMedium::new();
//! let radio = medium.join([1, 2, 3, 4, 5, 6]);
//! let clock = MeshClock::new(NodeConfig::new().unwrap(), Arc::new(SystemClock), radio);
//! clock.begin(true).unwrap();
//! clock.tick();
//! println!("mesh time: {}us, state: {}", clock.mesh_now_us(), clock.sync_state());
//! ```

pub mod adjuster;
pub mod clock_source;
pub mod codec;
pub mod config;
pub mod constants;
pub mod core;
pub mod discriminator;
pub mod error;
pub mod logging;
pub mod radio;
pub mod scheduler;
pub mod singleton;
pub mod state;
pub mod sync_state;

pub use crate::config::NodeConfig;
pub use crate::core::MeshClock;
pub use crate::error::MeshClockError;
pub use crate::logging::{init_logger, log_info};
pub use crate::radio::Radio;
pub use crate::state::MeshClockStats;
pub use crate::sync_state::SyncState;
