//! Node Providers
//!
//! Virtualized subtrees expose their nodes through a provider. The
//! intercepting provider decorates one and only touches created nodes.

use crate::intercept::AccessibilityTransform;
use crate::node::{AccessibilityNodeInfo, ActionArguments, FocusKind, NodeAction, VirtualId};

/// Provider of nodes for a virtualized subtree
pub trait AccessibilityNodeProvider {
    /// Build the node for a virtual id
    fn create_node_info(&self, virtual_id: VirtualId) -> Option<AccessibilityNodeInfo>;

    /// Find nodes containing `text` below `virtual_id`
    fn find_nodes_by_text(&self, text: &str, virtual_id: VirtualId) -> Vec<AccessibilityNodeInfo>;

    /// Dispatch an action to a virtual node
    fn perform_action(&mut self, virtual_id: VirtualId, action: NodeAction, arguments: &ActionArguments) -> bool;

    /// Node currently holding the given focus
    fn find_focus(&self, kind: FocusKind) -> Option<AccessibilityNodeInfo>;
}

/// Provider decorator applying a transform to created nodes
#[derive(Debug)]
pub struct InterceptingProvider<P, T> {
    inner: P,
    transform: T,
}

impl<P, T> InterceptingProvider<P, T>
where
    P: AccessibilityNodeProvider,
    T: AccessibilityTransform,
{
    pub fn new(inner: P, transform: T) -> Self {
        Self { inner, transform }
    }

    pub fn inner(&self) -> &P {
        &self.inner
    }

    pub fn into_inner(self) -> P {
        self.inner
    }
}

impl<P, T> AccessibilityNodeProvider for InterceptingProvider<P, T>
where
    P: AccessibilityNodeProvider,
    T: AccessibilityTransform,
{
    fn create_node_info(&self, virtual_id: VirtualId) -> Option<AccessibilityNodeInfo> {
        let mut node = self.inner.create_node_info(virtual_id)?;
        self.transform.transform(&mut node);
        Some(node)
    }

    fn find_nodes_by_text(&self, text: &str, virtual_id: VirtualId) -> Vec<AccessibilityNodeInfo> {
        self.inner.find_nodes_by_text(text, virtual_id)
    }

    fn perform_action(&mut self, virtual_id: VirtualId, action: NodeAction, arguments: &ActionArguments) -> bool {
        self.inner.perform_action(virtual_id, action, arguments)
    }

    fn find_focus(&self, kind: FocusKind) -> Option<AccessibilityNodeInfo> {
        self.inner.find_focus(kind)
    }
}

/// In-memory provider over a fixed, flat set of nodes
#[derive(Debug, Default)]
pub struct StaticNodeProvider {
    nodes: Vec<AccessibilityNodeInfo>,
    accessibility_focus: Option<VirtualId>,
    performed: Vec<(VirtualId, NodeAction)>,
}

impl StaticNodeProvider {
    pub fn new(nodes: Vec<AccessibilityNodeInfo>) -> Self {
        Self { nodes, ..Default::default() }
    }

    /// Actions dispatched so far
    pub fn performed(&self) -> &[(VirtualId, NodeAction)] {
        &self.performed
    }
}

impl AccessibilityNodeProvider for StaticNodeProvider {
    fn create_node_info(&self, virtual_id: VirtualId) -> Option<AccessibilityNodeInfo> {
        self.nodes.iter().find(|n| n.virtual_id == virtual_id).cloned()
    }

    /// Nodes are flat, so the search always covers every node whatever
    /// `virtual_id` it starts from
    fn find_nodes_by_text(&self, text: &str, _virtual_id: VirtualId) -> Vec<AccessibilityNodeInfo> {
        let needle = text.to_lowercase();
        self.nodes
            .iter()
            .filter(|n| n.text().is_some_and(|t| t.to_lowercase().contains(&needle)))
            .cloned()
            .collect()
    }

    fn perform_action(&mut self, virtual_id: VirtualId, action: NodeAction, _arguments: &ActionArguments) -> bool {
        if !self.nodes.iter().any(|n| n.virtual_id == virtual_id) {
            return false;
        }
        match action {
            NodeAction::AccessibilityFocus => self.accessibility_focus = Some(virtual_id),
            NodeAction::ClearAccessibilityFocus => self.accessibility_focus = None,
            _ => {}
        }
        self.performed.push((virtual_id, action));
        true
    }

    fn find_focus(&self, kind: FocusKind) -> Option<AccessibilityNodeInfo> {
        match kind {
            FocusKind::Accessibility => self.accessibility_focus.and_then(|id| self.create_node_info(id)),
            FocusKind::Input => None,
        }
    }
}
