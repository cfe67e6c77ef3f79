//! Component identity and endpoint composition
//!
//! A component definition lives at
//! `{host}/{library}/{component}/{version}/{revision}`. When the caller does
//! not pin a revision, the revision fallback (derived from the page state)
//! decides whether the staged or the published definition is used.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use thiserror::Error;

/// Scheme prepended to hosts that do not carry one
const DEFAULT_SCHEME: &str = "https://";

/// Parameters identifying one remote component definition
///
/// Identity fields left empty render as empty path segments; validating them
/// is up to the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ComponentParams {
    pub library_id: String,
    pub component_id: String,
    pub component_version: String,
    pub component_revision: Option<String>,
    pub component_host_name: Option<String>,
    /// JSON object that replaces all other data sources when non-empty
    pub data_override: Option<String>,
}

impl ComponentParams {
    pub fn new(
        library_id: impl Into<String>,
        component_id: impl Into<String>,
        component_version: impl Into<String>,
    ) -> Self {
        Self {
            library_id: library_id.into(),
            component_id: component_id.into(),
            component_version: component_version.into(),
            ..Self::default()
        }
    }

    pub fn with_revision(mut self, revision: impl Into<String>) -> Self {
        self.component_revision = Some(revision.into());
        self
    }

    pub fn with_host_name(mut self, host: impl Into<String>) -> Self {
        self.component_host_name = Some(host.into());
        self
    }

    pub fn with_data_override(mut self, json: impl Into<String>) -> Self {
        self.data_override = Some(json.into());
        self
    }

    /// The pinned revision, if present and non-empty
    pub fn revision(&self) -> Option<&str> {
        self.component_revision.as_deref().filter(|r| !r.is_empty())
    }

    /// The host name, if present and non-empty
    pub fn host_name(&self) -> Option<&str> {
        self.component_host_name.as_deref().filter(|h| !h.is_empty())
    }
}

/// Revision label used when no revision is pinned
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RevisionFallback {
    Staged,
    #[default]
    Published,
}

impl RevisionFallback {
    /// Editing and preview show staged definitions, live pages published ones
    pub fn for_page_state(state: PageState) -> Self {
        match state {
            PageState::Normal => RevisionFallback::Published,
            PageState::Edit | PageState::Preview => RevisionFallback::Staged,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RevisionFallback::Staged => "staged",
            RevisionFallback::Published => "published",
        }
    }
}

impl fmt::Display for RevisionFallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// State of the page the component is rendered on
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageState {
    #[default]
    Normal,
    Edit,
    Preview,
}

#[derive(Debug, Error)]
#[error("unknown {kind} '{value}' (expected one of: {expected})")]
pub struct UnknownVariant {
    kind: &'static str,
    value: String,
    expected: &'static str,
}

impl FromStr for RevisionFallback {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "staged" => Ok(RevisionFallback::Staged),
            "published" => Ok(RevisionFallback::Published),
            _ => Err(UnknownVariant {
                kind: "revision fallback",
                value: s.to_string(),
                expected: "staged, published",
            }),
        }
    }
}

impl FromStr for PageState {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "normal" => Ok(PageState::Normal),
            "edit" => Ok(PageState::Edit),
            "preview" => Ok(PageState::Preview),
            _ => Err(UnknownVariant {
                kind: "page state",
                value: s.to_string(),
                expected: "normal, edit, preview",
            }),
        }
    }
}

/// Compose the URL a component definition is fetched from
pub fn compose_endpoint(params: &ComponentParams, fallback: RevisionFallback) -> String {
    let host = match params.host_name() {
        Some(host) if has_scheme(host) => host.to_string(),
        Some(host) => format!("{}{}", DEFAULT_SCHEME, host),
        None => DEFAULT_SCHEME.to_string(),
    };
    let revision = params.revision().unwrap_or(fallback.as_str());

    format!(
        "{}/{}/{}/{}/{}",
        host, params.library_id, params.component_id, params.component_version, revision
    )
}

/// `scheme://` prefix check, no URL parsing
fn has_scheme(host: &str) -> bool {
    match host.find("://") {
        Some(idx) if idx > 0 => host[..idx]
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.')),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn required_params() -> ComponentParams {
        ComponentParams::new("library123", "component123", "version123")
            .with_revision("staged")
            .with_host_name("host123")
    }

    #[test]
    fn test_host_without_scheme_gets_https() {
        let endpoint = compose_endpoint(&required_params(), RevisionFallback::Staged);
        assert_eq!(
            endpoint,
            "https://host123/library123/component123/version123/staged"
        );
    }

    #[test]
    fn test_host_with_scheme_used_as_is() {
        let params = required_params().with_host_name("http://localhost:8080");
        let endpoint = compose_endpoint(&params, RevisionFallback::Staged);
        assert!(endpoint.starts_with("http://localhost:8080/library123/"));
    }

    #[test]
    fn test_missing_host_still_https() {
        let mut params = required_params();
        params.component_host_name = None;
        let endpoint = compose_endpoint(&params, RevisionFallback::Published);
        assert_eq!(endpoint, "https:///library123/component123/version123/staged");
    }

    #[test]
    fn test_fallback_used_without_revision() {
        let mut params = required_params();
        params.component_revision = None;
        let endpoint = compose_endpoint(&params, RevisionFallback::Published);
        assert!(endpoint.ends_with("/published"));
    }

    #[test]
    fn test_empty_revision_uses_fallback() {
        let params = required_params().with_revision("");
        let endpoint = compose_endpoint(&params, RevisionFallback::Staged);
        assert!(endpoint.ends_with("/version123/staged"));
    }

    #[test]
    fn test_missing_identity_renders_empty_segments() {
        let endpoint = compose_endpoint(&ComponentParams::default(), RevisionFallback::Published);
        assert_eq!(endpoint, "https://////published");
    }

    #[test]
    fn test_scheme_detection_is_prefix_only() {
        assert!(has_scheme("https://cdn"));
        assert!(has_scheme("svn+ssh://x"));
        assert!(!has_scheme("cdn.example.com/path?next=https://x"));
        assert!(!has_scheme("://cdn"));
    }

    #[test]
    fn test_fallback_for_page_state() {
        assert_eq!(
            RevisionFallback::for_page_state(PageState::Normal),
            RevisionFallback::Published
        );
        assert_eq!(
            RevisionFallback::for_page_state(PageState::Edit),
            RevisionFallback::Staged
        );
        assert_eq!(
            RevisionFallback::for_page_state(PageState::Preview),
            RevisionFallback::Staged
        );
    }

    #[test]
    fn test_parse_labels() {
        assert_eq!("Staged".parse::<RevisionFallback>().unwrap(), RevisionFallback::Staged);
        assert_eq!("preview".parse::<PageState>().unwrap(), PageState::Preview);
        let err = "draft".parse::<RevisionFallback>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "unknown revision fallback 'draft' (expected one of: staged, published)"
        );
    }
}
