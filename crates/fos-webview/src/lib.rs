//! fOS Web View
//!
//! Content host view that exposes a hosted document to assistive
//! technology.
//!
//! Features:
//! - Structured label promotion on the host node and virtual nodes
//! - Smoothing of assistive-technology scroll jumps
//! - Page scroll actions for the host node
//! - QuickJS content surface with animation frames
//!
//! # Example
//! ```rust,ignore
//! use fos_webview::{ScriptSurface, WebHostView, WebViewConfig};
//!
//! let surface = ScriptSurface::new(800, 2000)?;
//! let mut view = WebHostView::new(surface, &WebViewConfig::default());
//! view.surface_mut().scroll_to(800);
//! while view.pump() > 0 {}
//! ```

mod bindings;
pub mod clock;
pub mod config;
pub mod logging;
pub mod surface;
pub mod view;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::WebViewConfig;
pub use surface::{ContentSurface, ScriptSurface, SurfaceModel};
pub use view::{WebHostView, HOST_CLASS_NAME};

// Re-export sub-crates for advanced usage
pub use fos_a11y as a11y;
pub use fos_scroll as scroll;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Web view error
#[derive(Debug, thiserror::Error)]
pub enum WebViewError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Script engine error: {0}")]
    Script(String),

    #[error("Surface error: {0}")]
    Surface(#[from] fos_scroll::SurfaceError),
}
