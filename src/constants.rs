//! Mesh Clock Protocol Constants

/// Wire-frame magic bytes, spelling "MCK".
pub const FRAME_MAGIC: [u8; 3] = [0x4D, 0x43, 0x4B];

/// Total wire-frame length: 3-byte magic + 7-byte little-endian timestamp.
pub const FRAME_LEN: usize = 10;

/// Number of bytes carrying the timestamp field.
pub const TIMESTAMP_BYTES: usize = 7;

/// Number of significant bits in the wire timestamp field (56 = 7 * 8).
pub const TIMESTAMP_BITS: u32 = 56;

/// Mask that keeps only the low 56 bits of a `u64`.
pub const TIMESTAMP_MASK: u64 = (1u64 << TIMESTAMP_BITS) - 1;

/// All-ones group-broadcast address for the underlying radio protocol.
pub const BROADCAST_ADDRESS: [u8; 6] = [0xFF; 6];

/// Nominal broadcast period, in milliseconds.
pub const DEFAULT_INTERVAL_MS: u64 = 1000;

/// Fraction applied to small positive deltas during forward-only slewing.
pub const DEFAULT_SLEW_ALPHA: f64 = 0.25;

/// Microseconds above which corrections are applied whole instead of slewed.
pub const DEFAULT_LARGE_STEP_THRESHOLD_US: u64 = 10_000;

/// Milliseconds of reception silence after which SYNCED degrades to LOST.
pub const DEFAULT_SYNC_TIMEOUT_MS: u64 = 5000;

/// Percent randomization applied to the broadcast interval.
pub const DEFAULT_JITTER_PERCENT: u8 = 10;

/// Estimated one-way transmission delay, in microseconds, pre-compensated
/// into the outgoing stamp. Zero disables pre-compensation.
pub const DEFAULT_TX_DELAY_US: u64 = 1000;
