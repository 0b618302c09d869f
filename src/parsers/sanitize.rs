//! Tree sanitizer
//!
//! Three passes, each a transform from one tree value to the next:
//!
//! 1. [`remove_excluded`] drops non-content elements with their subtrees
//! 2. [`strip_attributes`] keeps only `href` on anchors and nothing elsewhere
//! 3. [`collapse`] removes empty elements and unwraps single-text wrappers
//!
//! Collapse decisions look at attributes, so the passes must run in this order.

use super::tree::{Element, Node};

/// Elements removed together with everything inside them
pub const EXCLUDED_TAGS: [&str; 7] = [
    "script", "style", "nav", "aside", "footer", "header", "noscript",
];

/// Run all sanitizer passes in order
pub fn sanitize(body: Element) -> Element {
    let body = remove_excluded(body);
    let body = strip_attributes(body);
    collapse(body)
}

/// Remove every descendant whose tag is in [`EXCLUDED_TAGS`]
pub fn remove_excluded(mut element: Element) -> Element {
    element.children = element
        .children
        .into_iter()
        .filter_map(|child| match child {
            Node::Element(el) if EXCLUDED_TAGS.contains(&el.name.as_str()) => None,
            Node::Element(el) => Some(Node::Element(remove_excluded(el))),
            text => Some(text),
        })
        .collect();
    element
}

/// Reduce anchors to their `href` and drop every other attribute
pub fn strip_attributes(mut element: Element) -> Element {
    element.attrs = if element.is_anchor() {
        element
            .attrs
            .into_iter()
            .filter(|(name, _)| name == "href")
            .take(1)
            .collect()
    } else {
        Vec::new()
    };

    element.children = element
        .children
        .into_iter()
        .map(|child| match child {
            Node::Element(el) => Node::Element(strip_attributes(el)),
            text => text,
        })
        .collect();
    element
}

/// Remove empty elements and unwrap wrappers around a single text node
///
/// The root itself is kept as is. Children are collapsed before their parent
/// so one pass reaches a fixed point.
pub fn collapse(mut root: Element) -> Element {
    root.children = collapse_children(root.children);
    root
}

fn collapse_children(children: Vec<Node>) -> Vec<Node> {
    children.into_iter().filter_map(collapse_node).collect()
}

fn collapse_node(node: Node) -> Option<Node> {
    let mut element = match node {
        Node::Element(element) => element,
        text => return Some(text),
    };

    element.children = collapse_children(element.children);

    if element.is_anchor() {
        return Some(Node::Element(element));
    }

    if element.attrs.is_empty() && !element.has_visible_text() {
        return None;
    }

    if let [Node::Text(_)] = element.children.as_slice() {
        return element.children.pop();
    }

    Some(Node::Element(element))
}
