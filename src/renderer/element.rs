//! The host element a rendered component is mounted in

use crate::endpoint::ComponentParams;
use crate::parser::ast::{Attribute, Element, Node};

use super::html::{escape_html, write_element};
use super::ElementConfig;

/// Wrap rendered template markup in the host element
///
/// Identity attributes are written in the order `cdn`, `library`, `version`,
/// `component`, `revision`, each omitted when empty. `inner_html` is inserted
/// as markup.
pub fn render_component_element(
    params: Option<&ComponentParams>,
    revision: Option<&str>,
    inner_html: &str,
    config: &ElementConfig,
) -> String {
    let mut attributes = Vec::new();
    if let Some(class) = &config.class {
        attributes.push(Attribute::new("class", escape_html(class)));
    }

    if let Some(params) = params {
        let identity = [
            ("cdn", params.host_name()),
            ("library", Some(params.library_id.as_str())),
            ("version", Some(params.component_version.as_str())),
            ("component", Some(params.component_id.as_str())),
        ];
        for (name, value) in identity {
            if let Some(value) = value.filter(|v| !v.is_empty()) {
                attributes.push(Attribute::new(name, escape_html(value)));
            }
        }
    }
    if let Some(revision) = revision.filter(|r| !r.is_empty()) {
        attributes.push(Attribute::new("revision", escape_html(revision)));
    }
    attributes.push(Attribute::new("fetch", ""));

    let mut element = Element::new(config.tag_name.as_str(), attributes);
    if !inner_html.is_empty() {
        element.children.push(Node::Text(inner_html.to_string()));
    }

    let mut out = String::new();
    write_element(&mut out, &element);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_params_become_attributes() {
        let params = ComponentParams::new("library123", "component123", "version123")
            .with_host_name("host123");
        let out = render_component_element(Some(&params), Some("staged"), "", &ElementConfig::default());
        assert_eq!(
            out,
            r#"<feaas-component class="-feaas" cdn="host123" library="library123" version="version123" component="component123" revision="staged" fetch=""></feaas-component>"#
        );
    }

    #[test]
    fn test_template_only() {
        let out = render_component_element(None, None, "<div>test output</div>", &ElementConfig::default());
        assert_eq!(
            out,
            r#"<feaas-component class="-feaas" fetch=""><div>test output</div></feaas-component>"#
        );
    }

    #[test]
    fn test_custom_element_config() {
        let config = ElementConfig::new().with_tag_name("x-fragment").without_class();
        let out = render_component_element(None, None, "", &config);
        assert_eq!(out, r#"<x-fragment fetch=""></x-fragment>"#);
    }

    #[test]
    fn test_attribute_values_escaped() {
        let params = ComponentParams::new("lib\"1", "c", "v");
        let out = render_component_element(Some(&params), None, "", &ElementConfig::default());
        assert!(out.contains(r#"library="lib&quot;1""#));
    }
}
