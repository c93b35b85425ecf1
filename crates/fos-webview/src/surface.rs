//! Content Surface
//!
//! QuickJS-backed surface holding the document's scroll geometry.

use std::sync::{Arc, Mutex};

use fos_scroll::{ScrollChange, ScrollSurface, SurfaceError};
use rquickjs::{Context, Runtime, Value};

use crate::bindings::{self, as_number, lock};
use crate::WebViewError;

/// Script heap limit per surface
const MEMORY_LIMIT: usize = 16 * 1024 * 1024;

/// Surface the host view drives: scroll geometry, scripts and frames
pub trait ContentSurface: ScrollSurface {
    /// Update the time seen by scripts (`performance.now()`)
    fn set_time(&mut self, now_ms: f64);

    /// Scroll changes since the last call, oldest first
    fn take_scroll_changes(&mut self) -> Vec<ScrollChange>;

    /// Run queued animation frame callbacks; returns how many are queued next
    fn run_frame(&mut self, now_ms: f64) -> Result<usize, SurfaceError>;
}

/// Scroll geometry shared with script bindings
#[derive(Debug, Default)]
pub struct SurfaceModel {
    pub scroll_y: i32,
    pub viewport_height: i32,
    pub content_height: i32,
    pub clock_ms: f64,
    pending: Vec<ScrollChange>,
}

impl SurfaceModel {
    pub fn new(viewport_height: i32, content_height: i32) -> Self {
        Self { viewport_height, content_height, ..Default::default() }
    }

    pub fn max_scroll_y(&self) -> i32 {
        (self.content_height - self.viewport_height).max(0)
    }

    /// Move to `y` (clamped), recording a change if the offset moved
    pub fn scroll_to(&mut self, y: i32) {
        let new_y = y.clamp(0, self.max_scroll_y());
        if new_y != self.scroll_y {
            self.pending.push(ScrollChange::new(new_y, self.scroll_y));
            self.scroll_y = new_y;
        }
    }
}

/// Content surface running scripts in QuickJS
pub struct ScriptSurface {
    _runtime: Runtime,
    context: Context,
    model: Arc<Mutex<SurfaceModel>>,
    ready: bool,
}

impl ScriptSurface {
    pub fn new(viewport_height: i32, content_height: i32) -> Result<Self, WebViewError> {
        let runtime = Runtime::new().map_err(|e| WebViewError::Script(e.to_string()))?;
        runtime.set_memory_limit(MEMORY_LIMIT);

        let context = Context::full(&runtime).map_err(|e| WebViewError::Script(e.to_string()))?;
        let model = Arc::new(Mutex::new(SurfaceModel::new(viewport_height, content_height)));

        context
            .with(|ctx| bindings::install(&ctx, model.clone()))
            .map_err(|e| WebViewError::Script(e.to_string()))?;

        tracing::debug!("Script surface ready ({}x{})", viewport_height, content_height);

        Ok(Self { _runtime: runtime, context, model, ready: true })
    }

    /// Start at `y` without reporting a change, e.g. a restored position
    pub fn with_scroll_y(self, y: i32) -> Self {
        {
            let mut model = lock(&self.model);
            model.scroll_y = y.clamp(0, model.max_scroll_y());
        }
        self
    }

    /// Public scroll, as the platform would do for an assistive action
    pub fn scroll_to(&mut self, y: i32) {
        lock(&self.model).scroll_to(y);
    }

    /// Scripts fail with `NotReady` while the surface is not ready
    pub fn set_ready(&mut self, ready: bool) {
        self.ready = ready;
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn set_content_height(&mut self, content_height: i32) {
        let mut model = lock(&self.model);
        model.content_height = content_height;
        let max = model.max_scroll_y();
        if model.scroll_y > max {
            model.scroll_to(max);
        }
    }

    /// Animation frame callbacks currently queued
    pub fn pending_frames(&self) -> usize {
        self.context.with(|ctx| {
            ctx.eval::<Value, _>("__fosPendingFrames()")
                .ok()
                .and_then(|v| as_number(&v))
                .map_or(0, |n| n as usize)
        })
    }
}

impl ScrollSurface for ScriptSurface {
    fn scroll_y(&self) -> i32 {
        lock(&self.model).scroll_y
    }

    fn viewport_height(&self) -> i32 {
        lock(&self.model).viewport_height
    }

    fn content_height(&self) -> i32 {
        lock(&self.model).content_height
    }

    fn raw_scroll_to(&mut self, _x: i32, y: i32) {
        lock(&self.model).scroll_to(y);
    }

    fn evaluate_script(&mut self, script: &str) -> Result<(), SurfaceError> {
        if !self.ready {
            return Err(SurfaceError::NotReady);
        }
        self.context.with(|ctx| {
            ctx.eval::<Value, _>(script)
                .map(|_| ())
                .map_err(|e| SurfaceError::Script(e.to_string()))
        })
    }
}

impl ContentSurface for ScriptSurface {
    fn set_time(&mut self, now_ms: f64) {
        lock(&self.model).clock_ms = now_ms;
    }

    fn take_scroll_changes(&mut self) -> Vec<ScrollChange> {
        std::mem::take(&mut lock(&self.model).pending)
    }

    fn run_frame(&mut self, now_ms: f64) -> Result<usize, SurfaceError> {
        self.set_time(now_ms);
        if !self.ready {
            return Ok(0);
        }
        self.context.with(|ctx| {
            ctx.eval::<Value, _>(format!("__fosRunFrame({})", now_ms))
                .map(|remaining| as_number(&remaining).map_or(0, |n| n as usize))
                .map_err(|e| SurfaceError::Script(e.to_string()))
        })
    }
}

impl std::fmt::Debug for ScriptSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScriptSurface")
            .field("model", &*lock(&self.model))
            .field("ready", &self.ready)
            .finish()
    }
}
