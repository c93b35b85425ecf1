//! Structured Labels
//!
//! Documents can serialize a richer label into the text a node exposes,
//! e.g. `{"contentDescription":"Play button"}`.

use serde::Deserialize;

/// Opening character of a serialized label
const OBJECT_OPEN: char = '{';

/// Structured label error
#[derive(Debug, thiserror::Error)]
pub enum LabelError {
    #[error("Text is not a structured label")]
    NotAnObject,

    #[error("Malformed structured label: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Parsed structured label
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct StructuredLabel {
    #[serde(rename = "contentDescription", default)]
    pub content_description: Option<String>,
}

impl StructuredLabel {
    /// Parse a label out of exposed node text
    pub fn parse(text: &str) -> Result<Self, LabelError> {
        if !text.starts_with(OBJECT_OPEN) {
            return Err(LabelError::NotAnObject);
        }
        Ok(serde_json::from_str(text)?)
    }

    /// Non-empty content description carried by `text`, if any
    pub fn detect(text: &str) -> Option<String> {
        match Self::parse(text) {
            Ok(label) => label.content_description.filter(|desc| !desc.is_empty()),
            Err(LabelError::NotAnObject) => None,
            Err(e) => {
                tracing::trace!("Ignoring label text: {}", e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_label() {
        let label = StructuredLabel::parse(r#"{"contentDescription":"Play button"}"#).unwrap();
        assert_eq!(label.content_description.as_deref(), Some("Play button"));
    }

    #[test]
    fn test_extra_fields_ignored() {
        let text = r#"{"contentDescription":"Open","action":"click","viewId":"7"}"#;
        assert_eq!(StructuredLabel::detect(text).as_deref(), Some("Open"));
    }

    #[test]
    fn test_plain_text() {
        assert!(matches!(StructuredLabel::parse("Hello"), Err(LabelError::NotAnObject)));
        assert_eq!(StructuredLabel::detect("Hello"), None);
        // Leading whitespace is not an object opening
        assert_eq!(StructuredLabel::detect(r#" {"contentDescription":"x"}"#), None);
    }

    #[test]
    fn test_malformed() {
        assert!(matches!(StructuredLabel::parse("{not json"), Err(LabelError::Malformed(_))));
        assert_eq!(StructuredLabel::detect("{not json"), None);
        assert_eq!(StructuredLabel::detect(r#"{"contentDescription":42}"#), None);
    }

    #[test]
    fn test_missing_or_empty() {
        assert_eq!(StructuredLabel::detect("{}"), None);
        assert_eq!(StructuredLabel::detect(r#"{"contentDescription":""}"#), None);
        assert_eq!(StructuredLabel::detect(r#"{"contentDescription":null}"#), None);
    }
}
