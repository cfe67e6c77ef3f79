//! Serialize element trees back to markup

use crate::parser::ast::{Attribute, Element, Fragment, Node};

/// Serialize a fragment
///
/// Text and verbatim nodes are written as stored. Void elements are written
/// self-closed (`<img src="a.png"/>`), every other element gets an end tag.
pub fn render_html(fragment: &Fragment) -> String {
    let mut out = String::new();
    for node in &fragment.nodes {
        write_node(&mut out, node);
    }
    out
}

pub fn write_node(out: &mut String, node: &Node) {
    match node {
        Node::Text(text) | Node::Raw(text) => out.push_str(text),
        Node::Element(el) => write_element(out, el),
    }
}

pub fn write_element(out: &mut String, el: &Element) {
    out.push('<');
    out.push_str(&el.name);
    write_attributes(out, &el.attributes);

    if el.is_void() {
        out.push_str("/>");
        return;
    }

    out.push('>');
    for child in &el.children {
        write_node(out, child);
    }
    out.push_str("</");
    out.push_str(&el.name);
    out.push('>');
}

fn write_attributes(out: &mut String, attributes: &[Attribute]) {
    for attr in attributes {
        out.push(' ');
        out.push_str(&attr.name);
        if let Some(value) = &attr.value {
            out.push_str("=\"");
            out.push_str(value);
            out.push('"');
        }
    }
}

/// Escape a plain string for use as element text or a quoted attribute value
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}
