//! Binding markers found on template elements

use std::fmt;

use crate::parser::ast::{Attribute, Element};

/// Attribute binding an element's text content
pub const TEXT_MARKER: &str = "data-path";

/// Prefix of attributes binding another attribute: `data-path-<attr>`
pub const ATTRIBUTE_MARKER_PREFIX: &str = "data-path-";

/// Dot-separated lookup path, e.g. `sampleImage.src`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPath(Vec<String>);

impl KeyPath {
    /// Parse a dotted path; empty paths and empty segments are rejected
    pub fn parse(s: &str) -> Option<Self> {
        let segments: Vec<String> = s.trim().split('.').map(str::to_string).collect();
        if segments.iter().any(|seg| seg.is_empty()) {
            return None;
        }
        Some(Self(segments))
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("."))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Marker {
    /// `data-path="path"` sets the element's text
    Text(KeyPath),
    /// `data-path-<name>="path"` sets attribute `name`
    Attribute { name: String, path: KeyPath },
}

impl Marker {
    pub fn from_attribute(attr: &Attribute) -> Option<Self> {
        let value = attr.value.as_deref()?;
        let name = attr.name.to_ascii_lowercase();

        if name == TEXT_MARKER {
            return KeyPath::parse(value).map(Marker::Text);
        }

        let target = name.strip_prefix(ATTRIBUTE_MARKER_PREFIX)?;
        // A marker must never overwrite another marker
        if target.is_empty() || target.starts_with(TEXT_MARKER) {
            return None;
        }
        Some(Marker::Attribute {
            name: target.to_string(),
            path: KeyPath::parse(value)?,
        })
    }
}

/// Markers on an element, in attribute order
pub fn markers(element: &Element) -> Vec<Marker> {
    element
        .attributes
        .iter()
        .filter_map(Marker::from_attribute)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_path_parse() {
        let path = KeyPath::parse("sampleImage.src").unwrap();
        assert_eq!(path.segments(), ["sampleImage", "src"]);
        assert_eq!(path.to_string(), "sampleImage.src");
        assert_eq!(KeyPath::parse(""), None);
        assert_eq!(KeyPath::parse("a..b"), None);
        assert_eq!(KeyPath::parse("a."), None);
    }

    #[test]
    fn test_text_marker() {
        let marker = Marker::from_attribute(&Attribute::new("data-path", "foo"));
        assert_eq!(marker, Some(Marker::Text(KeyPath::parse("foo").unwrap())));
    }

    #[test]
    fn test_attribute_marker() {
        let marker = Marker::from_attribute(&Attribute::new("data-path-src", "sampleImage.src"));
        assert_eq!(
            marker,
            Some(Marker::Attribute {
                name: "src".to_string(),
                path: KeyPath::parse("sampleImage.src").unwrap(),
            })
        );
    }

    #[test]
    fn test_marker_names_case_insensitive() {
        assert!(Marker::from_attribute(&Attribute::new("DATA-PATH", "foo")).is_some());
    }

    #[test]
    fn test_non_markers_ignored() {
        assert_eq!(Marker::from_attribute(&Attribute::new("class", "x")), None);
        assert_eq!(Marker::from_attribute(&Attribute::new("data-paths", "x")), None);
        assert_eq!(Marker::from_attribute(&Attribute::new("data-path-", "x")), None);
        assert_eq!(
            Marker::from_attribute(&Attribute::new("data-path-data-path", "x")),
            None
        );
        let bare = Attribute {
            name: "data-path".to_string(),
            value: None,
        };
        assert_eq!(Marker::from_attribute(&bare), None);
    }

    #[test]
    fn test_markers_in_attribute_order() {
        let el = Element::new(
            "a",
            vec![
                Attribute::new("data-path-href", "link.href"),
                Attribute::new("class", "btn"),
                Attribute::new("data-path-id", "link.id"),
            ],
        );
        let names: Vec<_> = markers(&el)
            .into_iter()
            .map(|m| match m {
                Marker::Attribute { name, .. } => name,
                Marker::Text(_) => panic!("Expected attribute marker"),
            })
            .collect();
        assert_eq!(names, vec!["href", "id"]);
    }
}
