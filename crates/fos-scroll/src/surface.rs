//! Content Surface
//!
//! What the controller needs from the surface rendering the document.

/// Content surface error
#[derive(Debug, thiserror::Error)]
pub enum SurfaceError {
    #[error("Content surface not ready")]
    NotReady,

    #[error("Script error: {0}")]
    Script(String),
}

/// Scrollable content surface
pub trait ScrollSurface {
    /// Current vertical offset
    fn scroll_y(&self) -> i32;

    /// Visible height
    fn viewport_height(&self) -> i32;

    /// Full document height
    fn content_height(&self) -> i32;

    /// Position the content without going through the public scroll API
    fn raw_scroll_to(&mut self, x: i32, y: i32);

    /// Run a script in the surface's own context; fire and forget
    fn evaluate_script(&mut self, script: &str) -> Result<(), SurfaceError>;
}

/// Primitive call seen by a [`RecordingSurface`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceCall {
    RawScrollTo(i32),
    Script(String),
}

/// Surface that records primitive calls instead of rendering
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub scroll_y: i32,
    pub viewport_height: i32,
    pub content_height: i32,
    /// Fail every script evaluation
    pub fail_scripts: bool,
    calls: Vec<SurfaceCall>,
}

impl RecordingSurface {
    pub fn new(viewport_height: i32, content_height: i32) -> Self {
        Self { viewport_height, content_height, ..Default::default() }
    }

    pub fn calls(&self) -> &[SurfaceCall] {
        &self.calls
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }
}

impl ScrollSurface for RecordingSurface {
    fn scroll_y(&self) -> i32 {
        self.scroll_y
    }

    fn viewport_height(&self) -> i32 {
        self.viewport_height
    }

    fn content_height(&self) -> i32 {
        self.content_height
    }

    fn raw_scroll_to(&mut self, _x: i32, y: i32) {
        self.scroll_y = y;
        self.calls.push(SurfaceCall::RawScrollTo(y));
    }

    fn evaluate_script(&mut self, script: &str) -> Result<(), SurfaceError> {
        self.calls.push(SurfaceCall::Script(script.to_string()));
        if self.fail_scripts {
            return Err(SurfaceError::NotReady);
        }
        Ok(())
    }
}
