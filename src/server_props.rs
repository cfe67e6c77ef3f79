//! Fetching component templates ahead of rendering
//!
//! Before a component renders, the template behind its endpoint is fetched
//! once. A failed fetch is logged and leaves the template empty: the
//! component then renders from its params alone, the same as when the
//! template was never requested.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::endpoint::{compose_endpoint, ComponentParams, PageState, RevisionFallback};
use crate::ComponentProps;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("no template found at {endpoint}")]
    NotFound { endpoint: String },

    #[error("error reading template file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Somewhere component templates can be fetched from by endpoint
pub trait TemplateSource {
    fn fetch(&self, endpoint: &str) -> Result<String, FetchError>;
}

/// In-memory templates keyed by full endpoint URL
impl TemplateSource for HashMap<String, String> {
    fn fetch(&self, endpoint: &str) -> Result<String, FetchError> {
        self.get(endpoint).cloned().ok_or_else(|| FetchError::NotFound {
            endpoint: endpoint.to_string(),
        })
    }
}

/// Templates mirrored to a local directory
///
/// The endpoint path after the host maps to `<root>/<path>.html`, so
/// `https://host/lib/comp/v1/staged` is read from `<root>/lib/comp/v1/staged.html`.
#[derive(Debug, Clone)]
pub struct DirectoryTemplateSource {
    root: PathBuf,
}

impl DirectoryTemplateSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, endpoint: &str) -> PathBuf {
        let without_scheme = endpoint
            .split_once("://")
            .map(|(_, rest)| rest)
            .unwrap_or(endpoint);
        let path = without_scheme
            .split_once('/')
            .map(|(_, path)| path)
            .unwrap_or_default();

        let segments: Vec<&str> = path
            .split('/')
            .filter(|s| !s.is_empty() && *s != "..")
            .collect();

        let mut file = self.root.clone();
        if let Some((last, dirs)) = segments.split_last() {
            file.extend(dirs);
            file.push(format!("{}.html", last));
        }
        file
    }
}

impl TemplateSource for DirectoryTemplateSource {
    fn fetch(&self, endpoint: &str) -> Result<String, FetchError> {
        let path = self.path_for(endpoint);
        if !path.is_file() {
            return Err(FetchError::NotFound {
                endpoint: endpoint.to_string(),
            });
        }
        std::fs::read_to_string(&path).map_err(|source| FetchError::Io { path, source })
    }
}

/// What a server hands the renderer for one component
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerProps {
    pub revision_fallback: RevisionFallback,
    pub endpoint: String,
    /// Empty when the fetch failed
    pub template: String,
}

impl ServerProps {
    /// Combine with the component params into renderer props
    pub fn into_props(self, params: ComponentParams) -> ComponentProps {
        ComponentProps {
            params: Some(params),
            template: Some(self.template).filter(|t| !t.is_empty()),
            revision_fallback: Some(self.revision_fallback),
            ..ComponentProps::default()
        }
    }
}

/// Resolve the revision fallback for the page and fetch the component template
pub fn fetch_server_props(
    params: &ComponentParams,
    page_state: PageState,
    source: &dyn TemplateSource,
) -> ServerProps {
    let revision_fallback = RevisionFallback::for_page_state(page_state);
    let endpoint = compose_endpoint(params, revision_fallback);

    let template = match source.fetch(&endpoint) {
        Ok(template) => template,
        Err(err) => {
            tracing::error!(%endpoint, error = %err, "failed to fetch component template");
            String::new()
        }
    };

    ServerProps {
        revision_fallback,
        endpoint,
        template,
    }
}
