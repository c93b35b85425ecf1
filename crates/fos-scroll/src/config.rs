//! Scroll Configuration

use std::time::Duration;

use serde::Deserialize;

/// Scroll smoothing configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    /// Minimum distance (px) for a change to count as a jump
    pub jump_distance_px: u32,

    /// Minimum quiet time (ms) since the previous change
    pub jump_interval_ms: u64,

    /// Animation duration (ms)
    pub animation_ms: u64,

    /// Delay (ms) before the controller accepts new jumps
    pub settle_ms: u64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            jump_distance_px: 100,
            jump_interval_ms: 100,
            animation_ms: 300,
            settle_ms: 350,
        }
    }
}

impl ScrollConfig {
    pub fn jump_interval(&self) -> Duration {
        Duration::from_millis(self.jump_interval_ms)
    }

    pub fn animation_duration(&self) -> Duration {
        Duration::from_millis(self.animation_ms)
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }
}
