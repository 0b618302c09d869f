//! Owned element tree
//!
//! The sanitizer works on its own copy of `<body>` instead of the parser's
//! arena, so every stage takes a tree by value and hands back a new one.

use scraper::{ElementRef, Html};
use std::fmt;

use crate::error::{Result, ScrapeError};

/// Elements that never have children or a closing tag
const VOID_ELEMENTS: [&str; 13] = [
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
    "source", "wbr",
];

/// A node in the element tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

/// An element with its attributes and ordered children
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    /// Create an element without attributes
    pub fn new(name: &str, children: Vec<Node>) -> Self {
        Self {
            name: name.to_string(),
            attrs: Vec::new(),
            children,
        }
    }

    /// Builder-style attribute setter
    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.attrs.push((name.to_string(), value.to_string()));
        self
    }

    /// Copy an element and its subtree out of a parsed document
    pub fn from_element_ref(element: ElementRef<'_>) -> Self {
        let value = element.value();
        let attrs = value
            .attrs()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();

        let mut children = Vec::new();
        for child in element.children() {
            if let Some(child_element) = ElementRef::wrap(child) {
                children.push(Node::Element(Self::from_element_ref(child_element)));
            } else if let Some(text) = child.value().as_text() {
                children.push(Node::Text((**text).to_string()));
            }
            // Comments, doctypes and processing instructions are dropped
        }

        Self {
            name: value.name().to_string(),
            attrs,
            children,
        }
    }

    /// Extract the `<body>` of a parsed document
    pub fn body_of(document: &Html) -> Result<Self> {
        document
            .root_element()
            .children()
            .filter_map(ElementRef::wrap)
            .find(|element| element.value().name() == "body")
            .map(Self::from_element_ref)
            .ok_or_else(|| ScrapeError::HtmlParse("document has no <body> element".to_string()))
    }

    /// Parse a full HTML document and extract its `<body>`
    pub fn parse_body(html: &str) -> Result<Self> {
        Self::body_of(&Html::parse_document(html))
    }

    /// Whether this is an anchor element
    pub fn is_anchor(&self) -> bool {
        self.name == "a"
    }

    /// Value of an attribute, if present
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Concatenated text of every descendant text node
    pub fn visible_text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for child in &self.children {
            match child {
                Node::Text(text) => out.push_str(text),
                Node::Element(element) => element.collect_text(out),
            }
        }
    }

    /// True when the element has no non-whitespace text anywhere below it
    pub fn has_visible_text(&self) -> bool {
        !self.visible_text().trim().is_empty()
    }

    /// Iterate over this element and all descendant elements in document order
    pub fn descendants(&self) -> Vec<&Element> {
        let mut out = vec![self];
        for child in &self.children {
            if let Node::Element(element) = child {
                out.extend(element.descendants());
            }
        }
        out
    }

    /// Serialize the element back into markup
    pub fn to_html(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}", self.name)?;
        for (name, value) in &self.attrs {
            write!(f, " {}=\"{}\"", name, escape_attribute(value))?;
        }

        if VOID_ELEMENTS.contains(&self.name.as_str()) && self.children.is_empty() {
            return write!(f, "/>");
        }

        write!(f, ">")?;
        for child in &self.children {
            write!(f, "{}", child)?;
        }
        write!(f, "</{}>", self.name)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Element(element) => write!(f, "{}", element),
            Node::Text(text) => write!(f, "{}", escape_text(text)),
        }
    }
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attribute(value: &str) -> String {
    value.replace('&', "&amp;").replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_body_keeps_structure() {
        let body = Element::parse_body(
            r#"<html><body class="x"><p>Hello <a href="/a">link</a></p></body></html>"#,
        )
        .unwrap();

        assert_eq!(body.name, "body");
        assert_eq!(body.attr("class"), Some("x"));
        assert_eq!(body.children.len(), 1);
        assert_eq!(body.visible_text(), "Hello link");
    }

    #[test]
    fn test_comments_are_dropped() {
        let body = Element::parse_body("<body><!-- hidden --><p>shown</p></body>").unwrap();
        assert_eq!(body.to_html(), "<body><p>shown</p></body>");
    }

    #[test]
    fn test_frameset_document_has_no_body() {
        let result = Element::parse_body(
            r#"<html><frameset><frame src="a.html"></frameset></html>"#,
        );
        assert!(matches!(result, Err(ScrapeError::HtmlParse(_))));
    }

    #[test]
    fn test_serialization_escapes() {
        let element = Element::new(
            "a",
            vec![Node::Text("Fish & <Chips>".to_string())],
        )
        .with_attr("href", "/q?a=1&b=\"2\"");

        assert_eq!(
            element.to_html(),
            r#"<a href="/q?a=1&amp;b=&quot;2&quot;">Fish &amp; &lt;Chips&gt;</a>"#
        );
    }

    #[test]
    fn test_void_elements_self_close() {
        let element = Element::new("p", vec![Node::Element(Element::new("br", vec![]))]);
        assert_eq!(element.to_html(), "<p><br/></p>");
    }

    #[test]
    fn test_whitespace_only_text_is_not_visible() {
        let element = Element::new("div", vec![Node::Text(" \n\t ".to_string())]);
        assert!(!element.has_visible_text());
    }

    #[test]
    fn test_descendants_in_document_order() {
        let body = Element::parse_body("<body><div><p>a</p></div><span>b</span></body>").unwrap();
        let names: Vec<&str> = body
            .descendants()
            .iter()
            .map(|element| element.name.as_str())
            .collect();
        assert_eq!(names, vec!["body", "div", "p", "span"]);
    }
}
