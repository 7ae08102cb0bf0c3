use serde::{Deserialize, Serialize};

/// Session settings for [`crate::Goblin`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GoblinConfig {
    /// Number of SRS points taken from the global CRS for merge commitments.
    pub commitment_key_size: usize,
    /// Log per-check verification results at `info` instead of `debug`.
    pub verbose: bool,
}

impl Default for GoblinConfig {
    fn default() -> Self {
        Self {
            commitment_key_size: 1 << 14,
            verbose: false,
        }
    }
}
