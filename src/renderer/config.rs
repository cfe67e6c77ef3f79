//! Configuration for the host element wrapping a rendered component

use serde::Deserialize;

/// Configuration options for the host element
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ElementConfig {
    /// Tag name of the host element
    pub tag_name: String,

    /// Value of the `class` attribute, omitted when `None`
    pub class: Option<String>,
}

impl Default for ElementConfig {
    fn default() -> Self {
        Self {
            tag_name: "feaas-component".to_string(),
            class: Some("-feaas".to_string()),
        }
    }
}

impl ElementConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the host element's tag name
    pub fn with_tag_name(mut self, tag_name: impl Into<String>) -> Self {
        self.tag_name = tag_name.into();
        self
    }

    /// Set the host element's class
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    /// Remove the class attribute
    pub fn without_class(mut self) -> Self {
        self.class = None;
        self
    }
}
