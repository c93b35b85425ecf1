//! Accessibility Node
//!
//! Platform-facing node info handed out on each accessibility query.

use std::collections::HashMap;

/// Identifies a node inside a virtualized subtree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VirtualId(pub i32);

impl VirtualId {
    /// Sentinel for the host view itself
    pub const HOST: VirtualId = VirtualId(-1);

    pub fn is_host(&self) -> bool {
        *self == Self::HOST
    }
}

impl Default for VirtualId {
    fn default() -> Self {
        Self::HOST
    }
}

/// Action an assistive technology can perform on a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeAction {
    Focus,
    ClearFocus,
    Click,
    AccessibilityFocus,
    ClearAccessibilityFocus,
    ScrollForward,
    ScrollBackward,
}

impl NodeAction {
    /// Name used in log output
    pub fn name(&self) -> &'static str {
        match self {
            Self::Focus => "FOCUS",
            Self::ClearFocus => "CLEAR_FOCUS",
            Self::Click => "CLICK",
            Self::AccessibilityFocus => "ACCESSIBILITY_FOCUS",
            Self::ClearAccessibilityFocus => "CLEAR_ACCESSIBILITY_FOCUS",
            Self::ScrollForward => "SCROLL_FORWARD",
            Self::ScrollBackward => "SCROLL_BACKWARD",
        }
    }

    pub fn is_scroll(&self) -> bool {
        matches!(self, Self::ScrollForward | Self::ScrollBackward)
    }
}

/// Which focus a lookup refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusKind {
    Input,
    Accessibility,
}

/// Extra arguments passed along with an action
pub type ActionArguments = HashMap<String, String>;

/// Accessibility node info
///
/// Created per query and discarded once the walker consumed it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AccessibilityNodeInfo {
    pub virtual_id: VirtualId,
    pub class_name: Option<String>,
    /// Raw exposed text, possibly a serialized structured label
    pub text: Option<String>,
    /// Label announced by assistive technology
    pub content_description: Option<String>,
    pub actions: Vec<NodeAction>,
    pub scrollable: bool,
}

impl AccessibilityNodeInfo {
    pub fn new(virtual_id: VirtualId) -> Self {
        Self { virtual_id, ..Default::default() }
    }

    /// Node for the host view
    pub fn host() -> Self {
        Self::new(VirtualId::HOST)
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_content_description(mut self, desc: impl Into<String>) -> Self {
        self.content_description = Some(desc.into());
        self
    }

    pub fn with_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn content_description(&self) -> Option<&str> {
        self.content_description.as_deref()
    }

    pub fn set_content_description(&mut self, desc: Option<String>) {
        self.content_description = desc;
    }

    /// Add an action if not already present
    pub fn add_action(&mut self, action: NodeAction) {
        if !self.actions.contains(&action) {
            self.actions.push(action);
        }
    }

    pub fn has_action(&self, action: NodeAction) -> bool {
        self.actions.contains(&action)
    }

    /// Text an assistive technology would announce
    pub fn announced_text(&self) -> &str {
        match self.content_description() {
            Some(desc) if !desc.is_empty() => desc,
            _ => self.text().unwrap_or(""),
        }
    }
}
