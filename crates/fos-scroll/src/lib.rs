//! fOS Scroll Smoothing
//!
//! Detects large, instantaneous scroll jumps issued by assistive technology
//! and replaces them with a short animated scroll.
//!
//! Features:
//! - Distance/quiet-time jump detection
//! - Snap-back and script-driven sine animation
//! - Discrete page scroll actions clamped to document bounds
//! - Single-threaded delayed task queue

pub mod config;
pub mod state;
pub mod animation;
pub mod tasks;
pub mod surface;
pub mod controller;

pub use config::ScrollConfig;
pub use state::{JumpDetector, ScrollPhase, ScrollState};
pub use animation::{AnimationRequest, Easing};
pub use tasks::{TaskId, TaskQueue};
pub use surface::{RecordingSurface, ScrollSurface, SurfaceCall, SurfaceError};
pub use controller::{page_target, ScrollAction, ScrollChange, ScrollController, ScrollOutcome, ScrollTask};
