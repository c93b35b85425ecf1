//! fOS Web View demo
//!
//! Simulates an assistive-technology page jump on a QuickJS surface and
//! lets the view smooth it.
//!
//! Usage: fos-webview [config.toml]

use std::time::Duration;

use anyhow::Context;
use fos_webview::a11y::{AccessibilityNodeInfo, NodeAction};
use fos_webview::scroll::ScrollSurface;
use fos_webview::{logging, ScriptSurface, WebHostView, WebViewConfig};

const FRAME: Duration = Duration::from_millis(16);

fn main() -> anyhow::Result<()> {
    let config = match std::env::args().nth(1) {
        Some(path) => WebViewConfig::load(&path).with_context(|| format!("loading {}", path))?,
        None => WebViewConfig::default(),
    };
    logging::init(&config.log_filter);

    tracing::info!("fOS Web View v{}", fos_webview::VERSION);

    let surface = ScriptSurface::new(800, 2000)?;
    let mut view = WebHostView::new(surface, &config);

    let mut node = AccessibilityNodeInfo::host().with_text(r#"{"contentDescription":"Demo page"}"#);
    view.on_initialize_accessibility_node(&mut node);
    tracing::info!("Host node announces {:?}", node.announced_text());

    // Instantaneous jump, as a screen reader swipe would produce
    view.surface_mut().scroll_to(800);
    settle(&mut view);
    tracing::info!("After jump: scrollY={}", view.surface().scroll_y());

    view.perform_accessibility_action(NodeAction::ScrollForward);
    settle(&mut view);
    tracing::info!("After page forward: scrollY={}", view.surface().scroll_y());

    Ok(())
}

fn settle(view: &mut WebHostView<ScriptSurface>) {
    while view.pump() > 0 || view.is_animating() {
        std::thread::sleep(FRAME);
    }
}
