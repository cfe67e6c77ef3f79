//! Substitute data into template markers

use super::data::ResolvedData;
use super::marker::{markers, Marker};
use crate::parser::{self, Element, Fragment, Node};
use crate::renderer::html::{escape_html, render_html};

/// Bind data into a template string
///
/// Without data the template is returned unchanged. Otherwise the template is
/// parsed, every marker that resolves to a scalar receives its value, and the
/// tree is serialized again. Markers stay in the output, so binding the output
/// again with the same data changes nothing.
pub fn bind_template(template: &str, data: Option<&ResolvedData<'_>>) -> String {
    let Some(data) = data else {
        return template.to_string();
    };

    let mut fragment = parser::parse(template);
    let bound = bind_fragment(&mut fragment, data);
    tracing::debug!(source = %data.kind(), bound, "bound template");
    render_html(&fragment)
}

/// Bind data into a parsed template in place
///
/// Returns the number of markers that received a value.
pub fn bind_fragment(fragment: &mut Fragment, data: &ResolvedData<'_>) -> usize {
    bind_nodes(&mut fragment.nodes, data)
}

fn bind_nodes(nodes: &mut [Node], data: &ResolvedData<'_>) -> usize {
    let mut bound = 0;
    for node in nodes.iter_mut() {
        if let Node::Element(el) = node {
            bound += bind_element(el, data);
            bound += bind_nodes(&mut el.children, data);
        }
    }
    bound
}

fn bind_element(el: &mut Element, data: &ResolvedData<'_>) -> usize {
    let mut bound = 0;
    for marker in markers(el) {
        match marker {
            Marker::Text(path) => {
                if el.is_void() {
                    continue;
                }
                if let Some(text) = data.resolve_text(&path) {
                    el.set_text(escape_html(&text));
                    bound += 1;
                }
            }
            Marker::Attribute { name, path } => {
                if let Some(value) = data.resolve_text(&path) {
                    el.set_attribute(&name, escape_html(&value));
                    bound += 1;
                }
            }
        }
    }
    bound
}
