//! Structured markup tree.
//!
//! Widgets build their output as a [`Markup`] fragment instead of
//! concatenating strings. The tree can be inspected directly (which is what
//! the widget tests do) and is serialized to HTML only when it is injected
//! into a page element.
//!
//! # Example
//!
//! ```
//! use atelier_core::markup::{Markup, Tag};
//!
//! let fragment = Markup::from(
//!     Tag::new("div")
//!         .class("col-12 text-center")
//!         .text("Hello & welcome"),
//! );
//! assert_eq!(
//!     fragment.to_html(),
//!     r#"<div class="col-12 text-center">Hello &amp; welcome</div>"#
//! );
//! ```

use std::fmt;

/// Elements that never have children or a closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "br", "col", "hr", "img", "input", "link", "meta", "source",
];

/// A node in the markup tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// An element with attributes and children.
    Tag(Tag),
    /// Character data. Escaped on serialization.
    Text(String),
}

impl Node {
    /// Concatenated text of this node and all descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Self::Text(text) => out.push_str(text),
            Self::Tag(tag) => tag.children.iter().for_each(|c| c.collect_text(out)),
        }
    }

    fn write_html(&self, out: &mut String) {
        match self {
            Self::Text(text) => escape_into(text, false, out),
            Self::Tag(tag) => tag.write_html(out),
        }
    }
}

impl From<Tag> for Node {
    fn from(tag: Tag) -> Self {
        Self::Tag(tag)
    }
}

/// An element of the markup tree, built with chained calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<Node>,
}

impl Tag {
    /// Create an element with the given tag name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Set an attribute, replacing any previous value.
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((name, value)),
        }
        self
    }

    /// Append one or more space-separated classes.
    pub fn class(mut self, classes: impl AsRef<str>) -> Self {
        let classes = classes.as_ref().trim();
        if classes.is_empty() {
            return self;
        }
        match self.attributes.iter_mut().find(|(n, _)| n == "class") {
            Some((_, existing)) if !existing.is_empty() => {
                existing.push(' ');
                existing.push_str(classes);
            }
            Some((_, existing)) => existing.push_str(classes),
            None => self.attributes.push(("class".to_string(), classes.to_string())),
        }
        self
    }

    /// Append a class only when `condition` holds.
    pub fn class_if(self, condition: bool, classes: impl AsRef<str>) -> Self {
        if condition { self.class(classes) } else { self }
    }

    /// Append a child node.
    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Append several child nodes.
    pub fn children<I>(mut self, children: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Node>,
    {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }

    /// Append a text child.
    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Node::Text(text.into()))
    }

    /// The tag name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Look up an attribute value.
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Iterate over the classes of this element.
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.get_attr("class").unwrap_or_default().split_whitespace()
    }

    /// Check whether the element carries a class.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes().any(|c| c == class)
    }

    /// Concatenated text of all descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.children.iter().for_each(|c| c.collect_text(&mut out));
        out
    }

    fn is_void(&self) -> bool {
        VOID_ELEMENTS.contains(&self.name.as_str())
    }

    fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.name);
        for (name, value) in &self.attributes {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            escape_into(value, true, out);
            out.push('"');
        }
        out.push('>');
        if self.is_void() {
            return;
        }
        for child in &self.children {
            child.write_html(out);
        }
        out.push_str("</");
        out.push_str(&self.name);
        out.push('>');
    }

    fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Tag)) {
        visit(self);
        for child in &self.children {
            if let Node::Tag(tag) = child {
                tag.walk(visit);
            }
        }
    }
}

/// An ordered fragment of sibling nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Markup {
    nodes: Vec<Node>,
}

impl Markup {
    /// Create an empty fragment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a node to the fragment.
    pub fn push(&mut self, node: impl Into<Node>) {
        self.nodes.push(node.into());
    }

    /// Top-level nodes in order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Check if the fragment has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All elements in document order (pre-order, depth first).
    pub fn elements(&self) -> Vec<&Tag> {
        let mut found = Vec::new();
        for node in &self.nodes {
            if let Node::Tag(tag) = node {
                tag.walk(&mut |t| found.push(t));
            }
        }
        found
    }

    /// All elements matching a predicate, in document order.
    pub fn find_all(&self, mut predicate: impl FnMut(&Tag) -> bool) -> Vec<&Tag> {
        self.elements().into_iter().filter(|t| predicate(*t)).collect()
    }

    /// All elements carrying the given class, in document order.
    pub fn find_by_class(&self, class: &str) -> Vec<&Tag> {
        self.find_all(|t| t.has_class(class))
    }

    /// Concatenated text of the whole fragment.
    pub fn text_content(&self) -> String {
        self.nodes.iter().map(Node::text_content).collect()
    }

    /// Serialize the fragment to HTML.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        for node in &self.nodes {
            node.write_html(&mut out);
        }
        out
    }
}

impl fmt::Display for Markup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_html())
    }
}

impl From<Tag> for Markup {
    fn from(tag: Tag) -> Self {
        Self {
            nodes: vec![Node::Tag(tag)],
        }
    }
}

impl From<Node> for Markup {
    fn from(node: Node) -> Self {
        Self { nodes: vec![node] }
    }
}

impl<N: Into<Node>> FromIterator<N> for Markup {
    fn from_iter<I: IntoIterator<Item = N>>(iter: I) -> Self {
        Self {
            nodes: iter.into_iter().map(Into::into).collect(),
        }
    }
}

fn escape_into(text: &str, attribute: bool, out: &mut String) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attribute => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
}
