//! Web Host View
//!
//! Embeddable view wiring the accessibility interceptor and the scroll
//! smoothing controller to a content surface. Accessibility queries and
//! scroll changes are independent and share no state.

use std::time::Instant;

use fos_a11y::{
    AccessibilityNodeInfo, AccessibilityNodeProvider, AccessibilityTransform, InterceptingProvider,
    LabelInterceptor, NodeAction, SharedTransformChain,
};
use fos_scroll::{
    ScrollAction, ScrollChange, ScrollController, ScrollOutcome, ScrollTask, TaskQueue,
};

use crate::clock::{Clock, SystemClock};
use crate::config::WebViewConfig;
use crate::surface::ContentSurface;

/// Class name reported for the host node
pub const HOST_CLASS_NAME: &str = "fos.webview.WebHostView";

/// Content host view
pub struct WebHostView<S, C = SystemClock> {
    surface: S,
    clock: C,
    epoch: Instant,
    transforms: SharedTransformChain,
    scroll: ScrollController,
    tasks: TaskQueue<ScrollTask>,
}

impl<S: ContentSurface> WebHostView<S, SystemClock> {
    pub fn new(surface: S, config: &WebViewConfig) -> Self {
        Self::with_clock(surface, SystemClock, config)
    }
}

impl<S: ContentSurface, C: Clock> WebHostView<S, C> {
    pub fn with_clock(surface: S, clock: C, config: &WebViewConfig) -> Self {
        let transforms = SharedTransformChain::new();
        transforms.register(LabelInterceptor::with_config(config.accessibility.clone()));

        Self {
            surface,
            epoch: clock.now(),
            clock,
            transforms,
            scroll: ScrollController::new(config.scroll.clone()),
            tasks: TaskQueue::new(),
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn scroll_controller(&self) -> &ScrollController {
        &self.scroll
    }

    pub fn is_animating(&self) -> bool {
        self.scroll.is_animating()
    }

    pub fn pending_tasks(&self) -> usize {
        self.tasks.len()
    }

    /// Register an extra transform, run after label interception on the
    /// host node and on nodes from every wrapped provider
    pub fn register_transform(&mut self, transform: impl AccessibilityTransform + 'static) {
        self.transforms.register(transform);
    }

    // === Accessibility ===

    /// Fill in and rewrite the host node for an accessibility query
    pub fn on_initialize_accessibility_node(&self, node: &mut AccessibilityNodeInfo) {
        if node.class_name.is_none() {
            node.class_name = Some(HOST_CLASS_NAME.to_string());
        }

        let scroll_y = self.surface.scroll_y();
        let max_y = (self.surface.content_height() - self.surface.viewport_height()).max(0);
        node.scrollable = max_y > 0;
        if scroll_y < max_y {
            node.add_action(NodeAction::ScrollForward);
        }
        if scroll_y > 0 {
            node.add_action(NodeAction::ScrollBackward);
        }

        self.transforms.transform(node);
    }

    /// Wrap the provider of the hosted document's virtual nodes
    pub fn node_provider<P>(&self, inner: P) -> InterceptingProvider<P, SharedTransformChain>
    where
        P: AccessibilityNodeProvider,
    {
        InterceptingProvider::new(inner, self.transforms.clone())
    }

    /// Perform an action on the host node
    pub fn perform_accessibility_action(&mut self, action: NodeAction) -> bool {
        let scroll_action = match action {
            NodeAction::ScrollForward => ScrollAction::Forward,
            NodeAction::ScrollBackward => ScrollAction::Backward,
            _ => {
                tracing::trace!("Host ignores action {}", action.name());
                return false;
            }
        };
        self.sync_surface_time();
        let now = self.clock.now();
        self.scroll.page_scroll(scroll_action, now, &mut self.surface, &mut self.tasks)
    }

    // === Scrolling ===

    /// Handle one scroll position change reported by the surface
    pub fn on_scroll_changed(&mut self, new_y: i32, old_y: i32) -> ScrollOutcome {
        let now = self.clock.now();
        self.scroll.on_scroll_changed(ScrollChange::new(new_y, old_y), now, &mut self.surface, &mut self.tasks)
    }

    /// Deliver pending scroll changes, run one animation frame, then run
    /// due tasks. Returns the number of frame callbacks still queued.
    pub fn pump(&mut self) -> usize {
        self.sync_surface_time();
        self.deliver_scroll_changes();

        let pending = match self.surface.run_frame(self.now_ms()) {
            Ok(pending) => pending,
            Err(e) => {
                tracing::warn!("Animation frame failed: {}", e);
                0
            }
        };

        // Frame changes belong to the animation window still open
        self.deliver_scroll_changes();

        let now = self.clock.now();
        for task in self.tasks.drain_due(now) {
            self.scroll.handle_task(task);
        }
        pending
    }

    /// Drop animation state, e.g. after new content is loaded
    pub fn reset_scroll_state(&mut self) {
        self.surface.take_scroll_changes();
        self.scroll.reset(&mut self.tasks);
    }

    fn deliver_scroll_changes(&mut self) {
        // Handling a change can produce more (the snap-back)
        loop {
            let changes = self.surface.take_scroll_changes();
            if changes.is_empty() {
                break;
            }
            for change in changes {
                self.on_scroll_changed(change.new_y, change.old_y);
            }
        }
    }

    fn now_ms(&self) -> f64 {
        self.clock.now().saturating_duration_since(self.epoch).as_secs_f64() * 1000.0
    }

    fn sync_surface_time(&mut self) {
        let now_ms = self.now_ms();
        self.surface.set_time(now_ms);
    }
}

impl<S: std::fmt::Debug, C> std::fmt::Debug for WebHostView<S, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebHostView")
            .field("surface", &self.surface)
            .field("scroll", &self.scroll)
            .field("pending_tasks", &self.tasks.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use fos_a11y::{StaticNodeProvider, VirtualId};
    use fos_scroll::{RecordingSurface, SurfaceCall, SurfaceError};

    impl ContentSurface for RecordingSurface {
        fn set_time(&mut self, _now_ms: f64) {}

        fn take_scroll_changes(&mut self) -> Vec<ScrollChange> {
            Vec::new()
        }

        fn run_frame(&mut self, _now_ms: f64) -> Result<usize, SurfaceError> {
            Ok(0)
        }
    }

    fn view() -> WebHostView<RecordingSurface, ManualClock> {
        WebHostView::with_clock(RecordingSurface::new(800, 2000), ManualClock::new(), &WebViewConfig::default())
    }

    #[test]
    fn test_host_node_label() {
        let view = view();
        let mut node = AccessibilityNodeInfo::host().with_text(r#"{"contentDescription":"Play button"}"#);
        view.on_initialize_accessibility_node(&mut node);

        assert_eq!(node.content_description(), Some("Play button"));
        assert_eq!(node.class_name.as_deref(), Some(HOST_CLASS_NAME));
        assert!(node.scrollable);
        assert!(node.has_action(NodeAction::ScrollForward));
        assert!(!node.has_action(NodeAction::ScrollBackward));
    }

    #[test]
    fn test_host_node_dedupe() {
        let view = view();
        let mut node = AccessibilityNodeInfo::host().with_text("Hello").with_content_description("Hello");
        view.on_initialize_accessibility_node(&mut node);
        assert_eq!(node.content_description(), None);
    }

    #[test]
    fn test_registered_transform_runs_after_interceptor() {
        let mut view = view();
        view.register_transform(|node: &mut AccessibilityNodeInfo| {
            if node.content_description().is_none() {
                node.set_content_description(Some("Web content".to_string()));
            }
        });

        let mut node = AccessibilityNodeInfo::host().with_text("Hi").with_content_description("Hi");
        view.on_initialize_accessibility_node(&mut node);
        assert_eq!(node.content_description(), Some("Web content"));
    }

    #[test]
    fn test_node_provider_is_wrapped() {
        let view = view();
        let inner = StaticNodeProvider::new(vec![
            AccessibilityNodeInfo::new(VirtualId(7)).with_text(r#"{"contentDescription":"Badge"}"#),
        ]);
        let provider = view.node_provider(inner);
        let node = provider.create_node_info(VirtualId(7)).unwrap();
        assert_eq!(node.content_description(), Some("Badge"));
    }

    #[test]
    fn test_jump_then_settle() {
        let mut view = view();
        view.surface_mut().scroll_y = 500;
        view.on_scroll_changed(500, 480);

        view.clock().advance_ms(150);
        view.surface_mut().scroll_y = 820;
        assert!(matches!(view.on_scroll_changed(820, 500), ScrollOutcome::Smoothed(_)));
        assert_eq!(view.surface().calls()[0], SurfaceCall::RawScrollTo(500));
        assert!(view.is_animating());
        assert_eq!(view.pending_tasks(), 1);

        view.clock().advance_ms(349);
        view.pump();
        assert!(view.is_animating());

        view.clock().advance_ms(1);
        view.pump();
        assert!(!view.is_animating());
        assert_eq!(view.pending_tasks(), 0);
    }

    #[test]
    fn test_scroll_forward_action() {
        let mut view = view();
        assert!(view.perform_accessibility_action(NodeAction::ScrollForward));
        assert!(matches!(&view.surface().calls()[0], SurfaceCall::Script(s) if s.contains("var target = 800;")));

        assert!(!view.perform_accessibility_action(NodeAction::ScrollBackward));
        assert!(!view.perform_accessibility_action(NodeAction::Click));
    }

    #[test]
    fn test_reset_scroll_state() {
        let mut view = view();
        view.on_scroll_changed(900, 0);
        assert!(view.is_animating());
        view.reset_scroll_state();
        assert!(!view.is_animating());
        assert_eq!(view.pending_tasks(), 0);
    }

    #[test]
    fn test_registered_transform_reaches_virtual_nodes() {
        let mut view = view();
        let inner = StaticNodeProvider::new(vec![AccessibilityNodeInfo::new(VirtualId(3)).with_text("Menu")]);
        let provider = view.node_provider(inner);

        view.register_transform(|node: &mut AccessibilityNodeInfo| {
            if node.content_description().is_none() {
                node.set_content_description(Some("Web content".to_string()));
            }
        });

        let node = provider.create_node_info(VirtualId(3)).unwrap();
        assert_eq!(node.content_description(), Some("Web content"));
    }

    #[test]
    fn test_page_scroll_holds_animation_window() {
        let mut view = view();
        view.clock().advance_ms(500);
        assert!(view.perform_accessibility_action(NodeAction::ScrollForward));
        assert!(view.is_animating());
        assert_eq!(view.pending_tasks(), 1);

        // A frame well over the jump distance stays organic
        view.clock().advance_ms(33);
        assert_eq!(view.on_scroll_changed(138, 0), ScrollOutcome::Organic);

        view.clock().advance_ms(317);
        view.pump();
        assert!(!view.is_animating());
    }
}
