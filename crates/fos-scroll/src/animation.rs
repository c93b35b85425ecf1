//! Scroll Animation
//!
//! Animated scroll requests and the script that runs them inside the
//! content surface.

use std::f64::consts::FRAC_PI_2;
use std::time::Duration;

/// Easing curve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    Linear,
    /// `sin(progress * PI / 2)`
    #[default]
    Sine,
}

impl Easing {
    /// Eased value for progress in `[0, 1]`
    pub fn apply(&self, progress: f64) -> f64 {
        match self {
            Self::Linear => progress,
            Self::Sine => (progress * FRAC_PI_2).sin(),
        }
    }

    /// JavaScript expression for the eased value of `progress`
    fn js_expr(&self) -> &'static str {
        match self {
            Self::Linear => "progress",
            Self::Sine => "Math.sin((progress * Math.PI) / 2)",
        }
    }
}

/// A single animated vertical scroll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationRequest {
    pub start_y: i32,
    pub target_y: i32,
    pub duration: Duration,
    pub easing: Easing,
}

impl AnimationRequest {
    pub fn new(start_y: i32, target_y: i32, duration: Duration) -> Self {
        Self { start_y, target_y, duration, easing: Easing::Sine }
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn distance(&self) -> i32 {
        self.target_y - self.start_y
    }

    pub fn is_noop(&self) -> bool {
        self.distance() == 0
    }

    /// Linear progress in `[0, 1]`
    pub fn progress_at(&self, elapsed: Duration) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    /// Scroll position after `elapsed`; exactly `target_y` once finished
    pub fn position_at(&self, elapsed: Duration) -> f64 {
        let progress = self.progress_at(elapsed);
        if progress >= 1.0 {
            return self.target_y as f64;
        }
        self.start_y as f64 + self.distance() as f64 * self.easing.apply(progress)
    }

    /// Self-contained script driving the animation with animation frames
    pub fn to_script(&self) -> String {
        format!(
            r#"(function() {{
  var start = {start};
  var target = {target};
  var distance = target - start;
  var duration = {duration};
  var startTime = performance.now();
  if (distance === 0) {{
    return;
  }}
  function animate(currentTime) {{
    var elapsed = currentTime - startTime;
    var progress = duration > 0 ? Math.min(elapsed / duration, 1) : 1;
    var newScroll = progress < 1 ? start + distance * {ease} : target;
    window.scrollTo(0, newScroll);
    if (progress < 1) {{
      requestAnimationFrame(animate);
    }}
  }}
  requestAnimationFrame(animate);
}})();"#,
            start = self.start_y,
            target = self.target_y,
            duration = self.duration.as_millis(),
            ease = self.easing.js_expr(),
        )
    }
}
