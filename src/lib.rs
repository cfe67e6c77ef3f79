//! Fragment Binder - render remotely hosted, data-bound HTML components
//!
//! This library composes the endpoint a component definition is fetched
//! from, picks the data a render uses, and binds that data into the
//! component's HTML template.
//!
//! # Example
//!
//! ```rust
//! use fragment_binder::{render_template, DataSources};
//!
//! let sources = DataSources::new().with_override(r#"{"foo": "bar"}"#);
//! let html = render_template(r#"<h1 data-path="foo"></h1>"#, &sources).unwrap();
//! assert_eq!(html, r#"<h1 data-path="foo">bar</h1>"#);
//! ```

pub mod binding;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod parser;
pub mod renderer;
pub mod server_props;

pub use binding::{
    bind_fragment, bind_template, select_data, DataMap, DataSourceKind, DataSources,
    ResolvedData,
};
pub use config::{ComponentConfig, ConfigError};
pub use endpoint::{compose_endpoint, ComponentParams, PageState, RevisionFallback};
pub use error::{DataError, ParseError};
pub use parser::{parse, Fragment};
pub use renderer::{render_component_element, render_html, ElementConfig};
pub use server_props::{
    fetch_server_props, DirectoryTemplateSource, FetchError, ServerProps, TemplateSource,
};

use thiserror::Error;

/// Errors that can occur during rendering
#[derive(Debug, Error)]
pub enum RenderError {
    /// The override data could not be used
    #[error(transparent)]
    Data(#[from] DataError),
}

/// Configuration for the complete render pipeline
#[derive(Debug, Clone, Default)]
pub struct RenderConfig {
    /// Host element configuration
    pub element: ElementConfig,
}

impl RenderConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the host element configuration
    pub fn with_element(mut self, config: ElementConfig) -> Self {
        self.element = config;
        self
    }
}

/// Everything a component render can be given
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComponentProps {
    /// Identity and override data
    pub params: Option<ComponentParams>,
    /// Template markup, when already fetched
    pub template: Option<String>,
    /// Data resolved by the caller ahead of rendering
    pub fetched_data: Option<DataMap>,
    /// Content-management fields
    pub fields: Option<DataMap>,
    /// Revision used when the params do not pin one
    pub revision_fallback: Option<RevisionFallback>,
}

impl ComponentProps {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_params(mut self, params: ComponentParams) -> Self {
        self.params = Some(params);
        self
    }

    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = Some(template.into());
        self
    }

    pub fn with_fetched_data(mut self, data: DataMap) -> Self {
        self.fetched_data = Some(data);
        self
    }

    pub fn with_fields(mut self, fields: DataMap) -> Self {
        self.fields = Some(fields);
        self
    }

    pub fn with_revision_fallback(mut self, fallback: RevisionFallback) -> Self {
        self.revision_fallback = Some(fallback);
        self
    }

    /// The non-empty template, if any
    pub fn template(&self) -> Option<&str> {
        self.template.as_deref().filter(|t| !t.is_empty())
    }

    /// The pinned revision, else the fallback label
    pub fn revision(&self) -> Option<&str> {
        self.params
            .as_ref()
            .and_then(|p| p.revision())
            .or_else(|| self.revision_fallback.map(|f| f.as_str()))
    }

    /// Whether the params identify a component completely
    pub fn has_identity(&self) -> bool {
        match &self.params {
            Some(p) => {
                !p.library_id.is_empty()
                    && !p.component_id.is_empty()
                    && !p.component_version.is_empty()
                    && self.revision().is_some()
            }
            None => false,
        }
    }

    /// Candidate data sources, override taken from the params
    pub fn data_sources(&self) -> DataSources {
        DataSources {
            override_data: self.params.as_ref().and_then(|p| p.data_override.clone()),
            fetched: self.fetched_data.clone(),
            fields: self.fields.clone(),
        }
    }
}

/// Bind data from the selected source into a template
///
/// # Example
///
/// ```rust
/// use fragment_binder::{render_template, DataSources};
/// use serde_json::json;
///
/// let fields = json!({"title": {"value": "Hello"}}).as_object().unwrap().clone();
/// let sources = DataSources::new().with_fields(fields);
/// let html = render_template(r#"<p data-path="title"></p>"#, &sources).unwrap();
/// assert_eq!(html, r#"<p data-path="title">Hello</p>"#);
/// ```
pub fn render_template(template: &str, sources: &DataSources) -> Result<String, RenderError> {
    let data = sources.select()?;
    Ok(bind_template(template, data.as_ref()))
}

/// Render a component with default configuration
///
/// Returns `Ok(None)` when there is neither a template nor a complete
/// component identity to render from.
pub fn render_component(props: &ComponentProps) -> Result<Option<String>, RenderError> {
    render_component_with_config(props, &RenderConfig::default())
}

/// Render a component with custom configuration
pub fn render_component_with_config(
    props: &ComponentProps,
    config: &RenderConfig,
) -> Result<Option<String>, RenderError> {
    let template = props.template();
    if template.is_none() && !props.has_identity() {
        tracing::debug!("component has no template and incomplete params, nothing rendered");
        return Ok(None);
    }

    let data = select_data(
        props.params.as_ref().and_then(|p| p.data_override.as_deref()),
        props.fetched_data.as_ref(),
        props.fields.as_ref(),
    )?;
    let inner = template
        .map(|t| bind_template(t, data.as_ref()))
        .unwrap_or_default();

    Ok(Some(render_component_element(
        props.params.as_ref(),
        props.revision(),
        &inner,
        &config.element,
    )))
}
