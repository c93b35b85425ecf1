//! Label Interception
//!
//! Rewrites node labels before they reach the assistive technology walker.

use std::cell::RefCell;
use std::rc::Rc;

use serde::Deserialize;

use crate::label::StructuredLabel;
use crate::node::AccessibilityNodeInfo;

/// A transform registered against a host's accessibility query path
pub trait AccessibilityTransform {
    /// Rewrite a node in place
    fn transform(&self, node: &mut AccessibilityNodeInfo);
}

impl<F> AccessibilityTransform for F
where
    F: Fn(&mut AccessibilityNodeInfo),
{
    fn transform(&self, node: &mut AccessibilityNodeInfo) {
        self(node)
    }
}

/// Interceptor configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct InterceptorConfig {
    /// Promote structured labels found in node text
    pub promote_structured_labels: bool,
    /// Clear labels that repeat the node text
    pub dedupe_redundant_labels: bool,
}

impl Default for InterceptorConfig {
    fn default() -> Self {
        Self {
            promote_structured_labels: true,
            dedupe_redundant_labels: true,
        }
    }
}

/// Promotes structured labels and removes duplicate ones
#[derive(Debug, Clone, Default)]
pub struct LabelInterceptor {
    config: InterceptorConfig,
}

impl LabelInterceptor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: InterceptorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &InterceptorConfig {
        &self.config
    }

    /// Apply label promotion and de-duplication to a node
    pub fn intercept(&self, node: &mut AccessibilityNodeInfo) {
        if self.config.promote_structured_labels {
            if let Some(desc) = node.text().and_then(StructuredLabel::detect) {
                tracing::debug!(
                    "Promoting structured label {:?} for node {}",
                    desc,
                    node.virtual_id.0
                );
                node.set_content_description(Some(desc));
            }
        }

        if self.config.dedupe_redundant_labels && is_redundant(node) {
            node.set_content_description(None);
        }
    }
}

impl AccessibilityTransform for LabelInterceptor {
    fn transform(&self, node: &mut AccessibilityNodeInfo) {
        self.intercept(node);
    }
}

/// Label is non-empty and reads exactly like the text
fn is_redundant(node: &AccessibilityNodeInfo) -> bool {
    match (node.content_description(), node.text()) {
        (Some(desc), Some(text)) => !desc.is_empty() && desc == text,
        _ => false,
    }
}

/// Ordered set of transforms
#[derive(Default)]
pub struct TransformChain {
    transforms: Vec<Box<dyn AccessibilityTransform>>,
}

impl TransformChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a transform; transforms run in registration order
    pub fn register(&mut self, transform: impl AccessibilityTransform + 'static) {
        self.transforms.push(Box::new(transform));
    }

    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }
}

impl AccessibilityTransform for TransformChain {
    fn transform(&self, node: &mut AccessibilityNodeInfo) {
        for t in &self.transforms {
            t.transform(node);
        }
    }
}

impl std::fmt::Debug for TransformChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransformChain").field("len", &self.transforms.len()).finish()
    }
}

/// Transform chain shared by a host node and every provider it wraps.
///
/// Clones share one chain, so a transform registered later also applies
/// to nodes built by providers wrapped earlier.
#[derive(Debug, Clone, Default)]
pub struct SharedTransformChain {
    chain: Rc<RefCell<TransformChain>>,
}

impl SharedTransformChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, transform: impl AccessibilityTransform + 'static) {
        self.chain.borrow_mut().register(transform);
    }

    pub fn len(&self) -> usize {
        self.chain.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.chain.borrow().is_empty()
    }
}

impl AccessibilityTransform for SharedTransformChain {
    fn transform(&self, node: &mut AccessibilityNodeInfo) {
        self.chain.borrow().transform(node);
    }
}
