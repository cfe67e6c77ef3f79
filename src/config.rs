//! Component configuration files
//!
//! A TOML file can carry everything a render needs besides the template and
//! its data: the component identity, the revision fallback (or the page state
//! it is derived from) and the host element settings.
//!
//! ```toml
//! page_state = "edit"
//!
//! [component]
//! library_id = "library123"
//! component_id = "component123"
//! component_version = "version123"
//! component_host_name = "components.example.com"
//!
//! [element]
//! tag_name = "feaas-component"
//! ```

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::endpoint::{ComponentParams, PageState, RevisionFallback};
use crate::renderer::ElementConfig;

/// Errors that can occur when loading or parsing configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ComponentConfig {
    /// Explicit fallback, takes precedence over `page_state`
    pub revision_fallback: Option<RevisionFallback>,
    pub page_state: Option<PageState>,
    pub component: ComponentParams,
    pub element: ElementConfig,
}

impl ComponentConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load configuration from a TOML string
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// The revision fallback, derived from the page state when not set
    pub fn revision_fallback(&self) -> RevisionFallback {
        self.revision_fallback.unwrap_or_else(|| {
            RevisionFallback::for_page_state(self.page_state.unwrap_or_default())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_defaults() {
        let config = ComponentConfig::from_str("").expect("Should parse");
        assert_eq!(config.component, ComponentParams::default());
        assert_eq!(config.element, ElementConfig::default());
        assert_eq!(config.revision_fallback(), RevisionFallback::Published);
    }

    #[test]
    fn test_full_config() {
        let toml_str = r#"
page_state = "preview"

[component]
library_id = "library123"
component_id = "component123"
component_version = "version123"
component_host_name = "host123"
data_override = '{ "foo": "bar" }'

[element]
tag_name = "x-fragment"
"#;
        let config = ComponentConfig::from_str(toml_str).expect("Should parse");
        assert_eq!(config.component.library_id, "library123");
        assert_eq!(config.component.host_name(), Some("host123"));
        assert_eq!(config.component.revision(), None);
        assert_eq!(config.component.data_override.as_deref(), Some(r#"{ "foo": "bar" }"#));
        assert_eq!(config.element.tag_name, "x-fragment");
        assert_eq!(config.revision_fallback(), RevisionFallback::Staged);
    }

    #[test]
    fn test_explicit_fallback_wins_over_page_state() {
        let toml_str = r#"
revision_fallback = "published"
page_state = "edit"
"#;
        let config = ComponentConfig::from_str(toml_str).expect("Should parse");
        assert_eq!(config.revision_fallback(), RevisionFallback::Published);
    }

    #[test]
    fn test_unknown_fallback_rejected() {
        let result = ComponentConfig::from_str(r#"revision_fallback = "draft""#);
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("component.toml");
        std::fs::write(&path, "[component]\nlibrary_id = \"lib\"\n").expect("write");
        let config = ComponentConfig::from_file(&path).expect("Should load");
        assert_eq!(config.component.library_id, "lib");
    }

    #[test]
    fn test_missing_file_error() {
        let result = ComponentConfig::from_file(Path::new("/nonexistent/component.toml"));
        assert!(matches!(result, Err(ConfigError::IoError(_))));
    }
}
