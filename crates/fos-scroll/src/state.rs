//! Scroll State
//!
//! Per-view bookkeeping and jump classification.

use std::time::{Duration, Instant};

use crate::config::ScrollConfig;

/// Controller phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollPhase {
    #[default]
    Idle,
    /// A smoothed jump is in flight; no new jump is accepted
    Animating,
}

/// Scroll state for one view
#[derive(Debug, Clone, Default)]
pub struct ScrollState {
    pub last_scroll_y: i32,
    /// `None` until the first change is seen
    pub last_scroll_at: Option<Instant>,
    pub phase: ScrollPhase,
}

impl ScrollState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_animating(&self) -> bool {
        self.phase == ScrollPhase::Animating
    }

    /// Time since the last recorded change
    pub fn elapsed_since_last(&self, now: Instant) -> Duration {
        match self.last_scroll_at {
            Some(at) => now.saturating_duration_since(at),
            None => Duration::MAX,
        }
    }

    /// Default bookkeeping for a change
    pub fn record(&mut self, y: i32, now: Instant) {
        self.last_scroll_y = y;
        self.last_scroll_at = Some(now);
    }
}

/// Distance/quiet-time jump heuristic
///
/// Dragging produces many small, closely spaced changes; assistive
/// page scrolls produce one large change after a quiet period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JumpDetector {
    distance_px: u32,
    interval: Duration,
}

impl Default for JumpDetector {
    fn default() -> Self {
        Self::from_config(&ScrollConfig::default())
    }
}

impl JumpDetector {
    pub fn from_config(config: &ScrollConfig) -> Self {
        Self {
            distance_px: config.jump_distance_px,
            interval: config.jump_interval(),
        }
    }

    pub fn is_jump(&self, distance: u32, elapsed: Duration, phase: ScrollPhase) -> bool {
        distance > self.distance_px && elapsed > self.interval && phase == ScrollPhase::Idle
    }
}
