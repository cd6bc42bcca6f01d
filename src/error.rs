//! # Mesh Clock Error Handling
//!
//! This module defines [`MeshClockError`], the taxonomy of fatal or
//! configuration-time errors the core can surface. Transient send failures
//! and malformed received frames are *not* represented here: per the
//! protocol's error handling design they are logged and otherwise ignored;
//! see [`crate::discriminator`] and [`crate::scheduler`].

use thiserror::Error;

/// Fatal or configuration-time errors raised by the mesh clock core.
#[derive(Debug, Error)]
pub enum MeshClockError {
    /// The radio subsystem refused to initialize at `begin()`. The core has
    /// no useful function without the radio; the recommended host response
    /// is to log this and restart the process.
    #[error("radio initialization failed: {0}")]
    RadioInit(String),

    /// Registering the broadcast peer address on the radio failed.
    #[error("broadcast peer registration failed: {0}")]
    PeerRegistration(String),

    /// A `NodeConfig` value was out of the ranges the protocol requires.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
