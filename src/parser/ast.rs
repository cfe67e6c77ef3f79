//! Element tree types for parsed templates

/// Elements that never have children or an end tag
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Elements whose content is raw text rather than markup
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style", "textarea", "title"];

/// Root of a parsed template - a sequence of sibling nodes
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Fragment {
    pub nodes: Vec<Node>,
}

impl Fragment {
    /// Visit every element in document order, parents before children
    pub fn elements(&self) -> Vec<&Element> {
        fn collect<'a>(nodes: &'a [Node], out: &mut Vec<&'a Element>) {
            for node in nodes {
                if let Node::Element(el) = node {
                    out.push(el);
                    collect(&el.children, out);
                }
            }
        }
        let mut out = Vec::new();
        collect(&self.nodes, &mut out);
        out
    }
}

/// A node in the element tree
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    /// Text exactly as it appeared in the source (entities not decoded)
    Text(String),
    /// Comments, doctypes and processing instructions, kept verbatim
    Raw(String),
}

/// An element with its attributes in source order
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<Attribute>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(name: impl Into<String>, attributes: Vec<Attribute>) -> Self {
        Self {
            name: name.into(),
            attributes,
            children: Vec::new(),
        }
    }

    pub fn is_void(&self) -> bool {
        is_void_element(&self.name)
    }

    /// Value of the first attribute with this name
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name.eq_ignore_ascii_case(name))
            .and_then(|a| a.value.as_deref())
    }

    /// Replace the value of an existing attribute, or append a new one
    pub fn set_attribute(&mut self, name: &str, value: impl Into<String>) {
        let value = Some(value.into());
        match self
            .attributes
            .iter_mut()
            .find(|a| a.name.eq_ignore_ascii_case(name))
        {
            Some(attr) => attr.value = value,
            None => self.attributes.push(Attribute {
                name: name.to_string(),
                value,
            }),
        }
    }

    /// Replace all children with a single text node
    ///
    /// `text` is inserted as markup, callers escape it first.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.children = vec![Node::Text(text.into())];
    }

    /// Concatenated text of direct text children
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|n| match n {
                Node::Text(t) => Some(t.as_str()),
                _ => None,
            })
            .collect()
    }
}

/// `name="value"`, or a bare `name` when `value` is `None`
///
/// Values are stored as markup: entity references are not decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: Option<String>,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
        }
    }
}

pub fn is_void_element(name: &str) -> bool {
    VOID_ELEMENTS.iter().any(|v| v.eq_ignore_ascii_case(name))
}

pub fn is_raw_text_element(name: &str) -> bool {
    RAW_TEXT_ELEMENTS.iter().any(|v| v.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_attribute_replaces_in_place() {
        let mut el = Element::new(
            "img",
            vec![Attribute::new("src", "/old.png"), Attribute::new("alt", "x")],
        );
        el.set_attribute("src", "/new.png");
        assert_eq!(el.attributes[0], Attribute::new("src", "/new.png"));
        assert_eq!(el.attributes.len(), 2);
    }

    #[test]
    fn test_set_attribute_appends() {
        let mut el = Element::new("a", vec![]);
        el.set_attribute("href", "/");
        assert_eq!(el.attribute("href"), Some("/"));
    }

    #[test]
    fn test_set_text_drops_children() {
        let mut el = Element::new("p", vec![]);
        el.children.push(Node::Element(Element::new("b", vec![])));
        el.set_text("hi");
        assert_eq!(el.children, vec![Node::Text("hi".to_string())]);
    }

    #[test]
    fn test_void_elements_case_insensitive() {
        assert!(is_void_element("IMG"));
        assert!(!is_void_element("div"));
        assert!(is_raw_text_element("Script"));
    }
}
