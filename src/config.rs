//! # Node Configuration
//!
//! [`NodeConfig`] is immutable once constructed and holds the tunables for
//! the clock adjuster, broadcast scheduler, and sync-state tracker. It
//! carries no reference to the clock source or radio: those collaborators
//! are supplied separately to [`crate::core::MeshClock::new`].

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_INTERVAL_MS, DEFAULT_JITTER_PERCENT, DEFAULT_LARGE_STEP_THRESHOLD_US,
    DEFAULT_SLEW_ALPHA, DEFAULT_SYNC_TIMEOUT_MS, DEFAULT_TX_DELAY_US,
};
use crate::error::MeshClockError;

/// Immutable tunables for a mesh clock node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeConfig {
    /// Nominal broadcast period, in milliseconds.
    pub interval_ms: u64,
    /// Fraction in `[0.0, 1.0]` applied to small positive deltas.
    pub slew_alpha: f64,
    /// Microseconds above which corrections are applied whole instead of
    /// slewed.
    pub large_step_threshold_us: u64,
    /// Milliseconds of reception silence after which SYNCED degrades to
    /// LOST.
    pub sync_timeout_ms: u64,
    /// Integer in `[0, 100]` giving the ± randomization applied to
    /// `interval_ms`.
    pub jitter_percent: u8,
    /// Estimated one-way transmission delay in microseconds, added to the
    /// outgoing stamp as pre-compensation. Zero disables it.
    pub tx_delay_us: u64,
}

impl Default for NodeConfig {
    fn default() -> Self {
        NodeConfig {
            interval_ms: DEFAULT_INTERVAL_MS,
            slew_alpha: DEFAULT_SLEW_ALPHA,
            large_step_threshold_us: DEFAULT_LARGE_STEP_THRESHOLD_US,
            sync_timeout_ms: DEFAULT_SYNC_TIMEOUT_MS,
            jitter_percent: DEFAULT_JITTER_PERCENT,
            tx_delay_us: DEFAULT_TX_DELAY_US,
        }
    }
}

impl NodeConfig {
    /// Builds a config from defaults, validating the result.
    pub fn new() -> Result<Self, MeshClockError> {
        Self::default().validated()
    }

    /// Loads a [`NodeConfig`] from a JSON file, validating the result.
    ///
    /// This is ambient tooling for the CLI demo harness, not part of the
    /// wire protocol. Nothing about the protocol itself is persisted.
    pub fn from_json_path(path: impl AsRef<Path>) -> Result<Self, MeshClockError> {
        let text = fs::read_to_string(path.as_ref()).map_err(|e| {
            MeshClockError::InvalidConfig(format!(
                "cannot read {}: {e}",
                path.as_ref().display()
            ))
        })?;
        let config: NodeConfig = serde_json::from_str(&text)
            .map_err(|e| MeshClockError::InvalidConfig(format!("invalid config JSON: {e}")))?;
        config.validated()
    }

    /// Returns `self` if every field is within the ranges the protocol
    /// requires, otherwise an [`MeshClockError::InvalidConfig`].
    pub fn validated(self) -> Result<Self, MeshClockError> {
        if !(0.0..=1.0).contains(&self.slew_alpha) {
            return Err(MeshClockError::InvalidConfig(format!(
                "slew_alpha must be in [0.0, 1.0], got {}",
                self.slew_alpha
            )));
        }
        if self.jitter_percent > 100 {
            return Err(MeshClockError::InvalidConfig(format!(
                "jitter_percent must be in [0, 100], got {}",
                self.jitter_percent
            )));
        }
        if self.interval_ms == 0 {
            return Err(MeshClockError::InvalidConfig(
                "interval_ms must be nonzero".to_string(),
            ));
        }
        Ok(self)
    }

    /// The nominal broadcast period as a [`Duration`].
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    /// The reception-silence sync timeout as a [`Duration`].
    pub fn sync_timeout(&self) -> Duration {
        Duration::from_millis(self.sync_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_protocol_defaults() {
        let config = NodeConfig::new().unwrap();
        assert_eq!(config.interval_ms, 1000);
        assert_eq!(config.slew_alpha, 0.25);
        assert_eq!(config.large_step_threshold_us, 10_000);
        assert_eq!(config.sync_timeout_ms, 5000);
        assert_eq!(config.jitter_percent, 10);
        assert_eq!(config.tx_delay_us, 1000);
    }

    #[test]
    fn rejects_out_of_range_slew_alpha() {
        let config = NodeConfig {
            slew_alpha: 1.5,
            ..NodeConfig::default()
        };
        assert!(matches!(
            config.validated(),
            Err(MeshClockError::InvalidConfig(_))
        ));
    }

    #[test]
    fn rejects_out_of_range_jitter() {
        let config = NodeConfig {
            jitter_percent: 101,
            ..NodeConfig::default()
        };
        assert!(matches!(
            config.validated(),
            Err(MeshClockError::InvalidConfig(_))
        ));
    }

    #[test]
    fn rejects_zero_interval() {
        let config = NodeConfig {
            interval_ms: 0,
            ..NodeConfig::default()
        };
        assert!(matches!(
            config.validated(),
            Err(MeshClockError::InvalidConfig(_))
        ));
    }

    #[test]
    fn loads_from_json_file() {
        let dir = std::env::temp_dir();
        let path = dir.join(format!("mesh_clock_config_test_{}.json", std::process::id()));
        std::fs::write(&path, r#"{"interval_ms": 2000, "jitter_percent": 20}"#).unwrap();

        let config = NodeConfig::from_json_path(&path).unwrap();
        assert_eq!(config.interval_ms, 2000);
        assert_eq!(config.jitter_percent, 20);
        // Fields omitted from the JSON fall back to defaults via #[serde(default)].
        assert_eq!(config.slew_alpha, 0.25);

        std::fs::remove_file(&path).ok();
    }
}
