//! Scroll Smoothing Controller
//!
//! Replaces instantaneous assistive-technology scroll jumps with an
//! animated scroll run inside the content surface.
//!
//! On a jump the controller stamps its state first, then snaps the surface
//! back to the old offset with the raw positioning call, then animates to
//! the new offset. The snap-back produces a change of its own; because the
//! controller is already `Animating` it is recorded as organic.

use std::time::Instant;

use crate::animation::AnimationRequest;
use crate::config::ScrollConfig;
use crate::state::{JumpDetector, ScrollPhase, ScrollState};
use crate::surface::ScrollSurface;
use crate::tasks::{TaskId, TaskQueue};

/// A scroll position change reported by the surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollChange {
    pub new_y: i32,
    pub old_y: i32,
}

impl ScrollChange {
    pub fn new(new_y: i32, old_y: i32) -> Self {
        Self { new_y, old_y }
    }

    pub fn distance(&self) -> u32 {
        self.new_y.abs_diff(self.old_y)
    }
}

/// How a change was handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollOutcome {
    /// Recorded as-is
    Organic,
    /// Snapped back and replaced by an animation
    Smoothed(AnimationRequest),
}

/// Deferred work posted by the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollTask {
    /// Return to `Idle` after an animation window
    Settle,
}

/// Discrete page scroll issued by assistive technology
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollAction {
    Forward,
    Backward,
}

/// Scroll smoothing controller, one per view
#[derive(Debug, Default)]
pub struct ScrollController {
    config: ScrollConfig,
    detector: JumpDetector,
    state: ScrollState,
    settle_task: Option<TaskId>,
}

impl ScrollController {
    pub fn new(config: ScrollConfig) -> Self {
        Self {
            detector: JumpDetector::from_config(&config),
            config,
            state: ScrollState::new(),
            settle_task: None,
        }
    }

    pub fn config(&self) -> &ScrollConfig {
        &self.config
    }

    pub fn state(&self) -> &ScrollState {
        &self.state
    }

    pub fn is_animating(&self) -> bool {
        self.state.is_animating()
    }

    /// Handle a scroll position change
    pub fn on_scroll_changed<S>(
        &mut self,
        change: ScrollChange,
        now: Instant,
        surface: &mut S,
        tasks: &mut TaskQueue<ScrollTask>,
    ) -> ScrollOutcome
    where
        S: ScrollSurface + ?Sized,
    {
        let distance = change.distance();
        let elapsed = self.state.elapsed_since_last(now);

        tracing::trace!(
            "Scroll changed: new={} old={} distance={} elapsed={:?} phase={:?}",
            change.new_y,
            change.old_y,
            distance,
            elapsed,
            self.state.phase
        );

        if !self.detector.is_jump(distance, elapsed, self.state.phase) {
            self.state.record(change.new_y, now);
            return ScrollOutcome::Organic;
        }

        tracing::debug!(
            "Scroll jump {} -> {} detected, smoothing",
            change.old_y,
            change.new_y
        );

        // Must precede the snap-back so its own change is not a jump
        self.state.last_scroll_at = Some(now);
        self.state.phase = ScrollPhase::Animating;

        surface.raw_scroll_to(0, change.old_y);
        let request = self.animate(surface, change.old_y, change.new_y);
        self.post_settle(now, tasks);

        self.state.last_scroll_y = change.new_y;
        ScrollOutcome::Smoothed(request)
    }

    /// Run a task posted by this controller
    pub fn handle_task(&mut self, task: ScrollTask) {
        match task {
            ScrollTask::Settle => {
                self.settle_task = None;
                self.state.phase = ScrollPhase::Idle;
                tracing::trace!("Scroll animation window closed");
            }
        }
    }

    /// Cancel any pending settle and return to `Idle`
    pub fn reset(&mut self, tasks: &mut TaskQueue<ScrollTask>) {
        if let Some(id) = self.settle_task.take() {
            tasks.cancel(id);
        }
        self.state = ScrollState::new();
    }

    /// Animate one viewport height forward or backward.
    ///
    /// The controller stays `Animating` until the settle task runs, so the
    /// animation's own frames are never classified as jumps. Returns false
    /// when already at the bound in that direction or while another
    /// animation is in flight.
    pub fn page_scroll<S>(
        &mut self,
        action: ScrollAction,
        now: Instant,
        surface: &mut S,
        tasks: &mut TaskQueue<ScrollTask>,
    ) -> bool
    where
        S: ScrollSurface + ?Sized,
    {
        if self.state.is_animating() {
            tracing::debug!("Page scroll {:?} ignored, animation in flight", action);
            return false;
        }

        let scroll_y = surface.scroll_y();
        let target = page_target(action, scroll_y, surface.viewport_height(), surface.content_height());

        tracing::debug!("Page scroll {:?}: {} -> {}", action, scroll_y, target);

        if target == scroll_y {
            return false;
        }

        self.state.last_scroll_at = Some(now);
        self.state.phase = ScrollPhase::Animating;
        self.animate(surface, scroll_y, target);
        self.post_settle(now, tasks);
        true
    }

    /// Replace any pending settle with one due after the settle delay
    fn post_settle(&mut self, now: Instant, tasks: &mut TaskQueue<ScrollTask>) {
        if let Some(previous) = self.settle_task.take() {
            tasks.cancel(previous);
        }
        self.settle_task = Some(tasks.post_delayed(now, self.config.settle_delay(), ScrollTask::Settle));
    }

    /// Hand an animation to the surface; failures are not retried
    fn animate<S>(&self, surface: &mut S, start_y: i32, target_y: i32) -> AnimationRequest
    where
        S: ScrollSurface + ?Sized,
    {
        let request = AnimationRequest::new(start_y, target_y, self.config.animation_duration());
        if let Err(e) = surface.evaluate_script(&request.to_script()) {
            tracing::warn!("Smooth scroll {} -> {} not started: {}", start_y, target_y, e);
        }
        request
    }
}

/// Target offset of a page scroll, clamped to `[0, content - viewport]`
pub fn page_target(action: ScrollAction, scroll_y: i32, viewport_height: i32, content_height: i32) -> i32 {
    let max_y = content_height.saturating_sub(viewport_height).max(0);
    let target = match action {
        ScrollAction::Forward => scroll_y.saturating_add(viewport_height),
        ScrollAction::Backward => scroll_y.saturating_sub(viewport_height),
    };
    target.clamp(0, max_y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{RecordingSurface, SurfaceCall};
    use std::time::Duration;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    struct Harness {
        controller: ScrollController,
        surface: RecordingSurface,
        tasks: TaskQueue<ScrollTask>,
        t0: Instant,
    }

    impl Harness {
        fn new() -> Self {
            Self {
                controller: ScrollController::default(),
                surface: RecordingSurface::new(800, 2000),
                tasks: TaskQueue::new(),
                t0: Instant::now(),
            }
        }

        fn change(&mut self, new_y: i32, old_y: i32, at_ms: u64) -> ScrollOutcome {
            let now = self.t0 + ms(at_ms);
            self.controller.on_scroll_changed(ScrollChange::new(new_y, old_y), now, &mut self.surface, &mut self.tasks)
        }

        fn run_tasks(&mut self, at_ms: u64) {
            for task in self.tasks.drain_due(self.t0 + ms(at_ms)) {
                self.controller.handle_task(task);
            }
        }
    }

    #[test]
    fn test_jump_is_smoothed() {
        let mut h = Harness::new();
        h.change(500, 480, 0);
        h.surface.clear_calls();

        let outcome = h.change(820, 500, 150);
        let request = match outcome {
            ScrollOutcome::Smoothed(r) => r,
            ScrollOutcome::Organic => panic!("Expected smoothed jump"),
        };
        assert_eq!((request.start_y, request.target_y), (500, 820));
        assert_eq!(request.duration, ms(300));

        let calls = h.surface.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0], SurfaceCall::RawScrollTo(500));
        assert!(matches!(&calls[1], SurfaceCall::Script(s) if s.contains("var target = 820;")));

        assert!(h.controller.is_animating());
        assert_eq!(h.controller.state().last_scroll_y, 820);
        assert_eq!(h.controller.state().last_scroll_at, Some(h.t0 + ms(150)));
    }

    #[test]
    fn test_settles_after_window() {
        let mut h = Harness::new();
        h.change(820, 500, 150);
        assert_eq!(h.tasks.time_until_next(h.t0 + ms(150)), Some(ms(350)));

        h.run_tasks(499);
        assert!(h.controller.is_animating());
        h.run_tasks(500);
        assert!(!h.controller.is_animating());
    }

    #[test]
    fn test_small_change_is_organic() {
        let mut h = Harness::new();
        h.change(500, 480, 0);
        h.surface.clear_calls();

        assert_eq!(h.change(540, 500, 20), ScrollOutcome::Organic);
        assert!(h.surface.calls().is_empty());
        assert_eq!(h.controller.state().last_scroll_y, 540);
        assert_eq!(h.controller.state().last_scroll_at, Some(h.t0 + ms(20)));
    }

    #[test]
    fn test_fast_large_change_is_organic() {
        let mut h = Harness::new();
        h.change(500, 480, 0);
        assert_eq!(h.change(900, 500, 50), ScrollOutcome::Organic);
        assert!(h.tasks.is_empty());
    }

    #[test]
    fn test_first_large_change_is_jump() {
        let mut h = Harness::new();
        assert!(matches!(h.change(800, 0, 0), ScrollOutcome::Smoothed(_)));
    }

    #[test]
    fn test_snap_back_is_not_reclassified() {
        let mut h = Harness::new();
        h.change(820, 500, 150);

        // Surface reports the snap-back and animation frames
        assert_eq!(h.change(500, 820, 150), ScrollOutcome::Organic);
        assert_eq!(h.change(700, 500, 400), ScrollOutcome::Organic);
        assert_eq!(h.change(820, 700, 460), ScrollOutcome::Organic);
        assert_eq!(h.controller.state().last_scroll_y, 820);
        assert_eq!(h.tasks.len(), 1);
    }

    #[test]
    fn test_script_failure_is_swallowed() {
        let mut h = Harness::new();
        h.surface.fail_scripts = true;

        assert!(matches!(h.change(820, 500, 150), ScrollOutcome::Smoothed(_)));
        // Only the snap-back moved the surface
        assert_eq!(h.surface.scroll_y, 500);
        assert!(h.controller.is_animating());

        h.run_tasks(500);
        assert!(!h.controller.is_animating());
    }

    #[test]
    fn test_reset_cancels_settle() {
        let mut h = Harness::new();
        h.change(820, 500, 150);
        h.controller.reset(&mut h.tasks);
        assert!(h.tasks.is_empty());
        assert!(!h.controller.is_animating());
        assert_eq!(h.controller.state().last_scroll_at, None);
    }

    #[test]
    fn test_page_target() {
        assert_eq!(page_target(ScrollAction::Forward, 0, 800, 2000), 800);
        assert_eq!(page_target(ScrollAction::Forward, 800, 800, 2000), 1200);
        assert_eq!(page_target(ScrollAction::Backward, 300, 800, 2000), 0);
        assert_eq!(page_target(ScrollAction::Backward, 1200, 800, 2000), 400);
        // Content shorter than the viewport
        assert_eq!(page_target(ScrollAction::Forward, 0, 800, 500), 0);
    }

    #[test]
    fn test_page_target_stays_in_bounds() {
        for scroll_y in (-400..2400).step_by(137) {
            for action in [ScrollAction::Forward, ScrollAction::Backward] {
                let target = page_target(action, scroll_y, 800, 2000);
                assert!((0..=1200).contains(&target), "{:?} from {} gave {}", action, scroll_y, target);
            }
        }
    }

    #[test]
    fn test_page_scroll_forward() {
        let mut h = Harness::new();
        let now = h.t0;
        assert!(h.controller.page_scroll(ScrollAction::Forward, now, &mut h.surface, &mut h.tasks));

        let calls = h.surface.calls();
        assert_eq!(calls.len(), 1);
        assert!(matches!(&calls[0], SurfaceCall::Script(s) if s.contains("var start = 0;") && s.contains("var target = 800;")));
        assert!(h.controller.is_animating());
        assert_eq!(h.tasks.len(), 1);
    }

    #[test]
    fn test_page_scroll_frames_are_organic() {
        let mut h = Harness::new();
        let now = h.t0 + ms(500);
        assert!(h.controller.page_scroll(ScrollAction::Forward, now, &mut h.surface, &mut h.tasks));
        h.surface.clear_calls();

        // Frames pumped at 33ms move well over 100px each
        let mut y = 0;
        for (i, next) in [138, 270, 395, 510, 612, 700, 770, 800].into_iter().enumerate() {
            let at = 500 + 33 * (i as u64 + 1);
            assert_eq!(h.change(next, y, at), ScrollOutcome::Organic);
            y = next;
        }
        assert!(h.surface.calls().is_empty());
        assert_eq!(h.controller.state().last_scroll_y, 800);

        h.run_tasks(850);
        assert!(!h.controller.is_animating());
    }

    #[test]
    fn test_page_scroll_while_animating() {
        let mut h = Harness::new();
        h.change(820, 500, 150);
        h.surface.clear_calls();

        let now = h.t0 + ms(200);
        assert!(!h.controller.page_scroll(ScrollAction::Forward, now, &mut h.surface, &mut h.tasks));
        assert!(h.surface.calls().is_empty());
        assert_eq!(h.tasks.len(), 1);
    }

    #[test]
    fn test_page_scroll_at_bound() {
        let mut h = Harness::new();
        let now = h.t0;
        assert!(!h.controller.page_scroll(ScrollAction::Backward, now, &mut h.surface, &mut h.tasks));

        h.surface.scroll_y = 1200;
        assert!(!h.controller.page_scroll(ScrollAction::Forward, now, &mut h.surface, &mut h.tasks));
        assert!(h.surface.calls().is_empty());
        assert!(!h.controller.is_animating());
        assert!(h.tasks.is_empty());
    }
}
