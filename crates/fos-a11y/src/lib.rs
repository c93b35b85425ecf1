//! fOS Accessibility Interception
//!
//! Accessibility node rewriting for web views that expose hosted
//! documents to assistive technology.
//!
//! Features:
//! - Structured labels serialized in node text (`{"contentDescription": ...}`)
//! - Duplicate label removal
//! - Pluggable transforms on the accessibility query path
//! - Node provider decoration for virtualized subtrees

pub mod node;
pub mod label;
pub mod intercept;
pub mod provider;

pub use node::{AccessibilityNodeInfo, ActionArguments, FocusKind, NodeAction, VirtualId};
pub use label::{LabelError, StructuredLabel};
pub use intercept::{
    AccessibilityTransform, InterceptorConfig, LabelInterceptor, SharedTransformChain, TransformChain,
};
pub use provider::{AccessibilityNodeProvider, InterceptingProvider, StaticNodeProvider};
