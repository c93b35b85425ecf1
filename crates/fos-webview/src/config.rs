//! Web View Configuration

use std::path::Path;

use fos_a11y::InterceptorConfig;
use fos_scroll::ScrollConfig;
use serde::Deserialize;

use crate::WebViewError;

/// Web view configuration options
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct WebViewConfig {
    /// Scroll smoothing
    pub scroll: ScrollConfig,

    /// Accessibility label interception
    pub accessibility: InterceptorConfig,

    /// Log filter used when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Default for WebViewConfig {
    fn default() -> Self {
        Self {
            scroll: ScrollConfig::default(),
            accessibility: InterceptorConfig::default(),
            log_filter: "info".to_string(),
        }
    }
}

impl WebViewConfig {
    /// Parse from TOML; missing keys keep their defaults
    pub fn from_toml_str(s: &str) -> Result<Self, WebViewError> {
        Ok(toml::from_str(s)?)
    }

    /// Load from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, WebViewError> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_is_default() {
        assert_eq!(WebViewConfig::from_toml_str("").unwrap(), WebViewConfig::default());
    }

    #[test]
    fn test_partial_config() {
        let config = WebViewConfig::from_toml_str(
            r#"
            log_filter = "fos_scroll=debug"

            [scroll]
            animation_ms = 250

            [accessibility]
            dedupe_redundant_labels = false
            "#,
        )
        .unwrap();

        assert_eq!(config.log_filter, "fos_scroll=debug");
        assert_eq!(config.scroll.animation_ms, 250);
        assert_eq!(config.scroll.jump_distance_px, 100);
        assert!(config.accessibility.promote_structured_labels);
        assert!(!config.accessibility.dedupe_redundant_labels);
    }

    #[test]
    fn test_invalid_config() {
        let err = WebViewConfig::from_toml_str("[scroll]\nsettle_ms = \"soon\"").unwrap_err();
        assert!(matches!(err, WebViewError::Config(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = WebViewConfig::load("/nonexistent/fos-webview.toml").unwrap_err();
        assert!(matches!(err, WebViewError::Io(_)));
    }
}
