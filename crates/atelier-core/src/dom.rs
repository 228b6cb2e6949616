//! In-memory page model.
//!
//! A page is a tree of [`ElementRef`] handles. Handles are cheap to clone and
//! share the element they point to, so a widget can hold on to its target
//! container across an await point while the host keeps editing the page.
//! An element removed from its parent stays alive for as long as some handle
//! refers to it; writing into such a detached element is harmless and
//! invisible to the page.
//!
//! Only what widgets and their host need is modelled: tag, id, classes,
//! structural children and an injected markup fragment.

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::logging::targets;
use crate::markup::{Markup, Node, Tag};
use crate::selector::{MatchContext, Selector, SelectorMatcher};

#[derive(Debug)]
struct ElementData {
    tag: String,
    id: Option<String>,
    classes: Vec<String>,
    children: Vec<ElementRef>,
    content: Markup,
    /// Number of content mutations applied to this element.
    revision: u64,
}

/// A shared handle to a page element.
#[derive(Clone)]
pub struct ElementRef(Arc<RwLock<ElementData>>);

impl ElementRef {
    /// Create a detached element with the given tag.
    pub fn new(tag: impl Into<String>) -> Self {
        Self(Arc::new(RwLock::new(ElementData {
            tag: tag.into(),
            id: None,
            classes: Vec::new(),
            children: Vec::new(),
            content: Markup::new(),
            revision: 0,
        })))
    }

    /// Set the element id (builder pattern).
    pub fn with_id(self, id: impl Into<String>) -> Self {
        self.0.write().id = Some(id.into());
        self
    }

    /// Add one or more space-separated classes (builder pattern).
    pub fn with_class(self, classes: impl AsRef<str>) -> Self {
        self.0
            .write()
            .classes
            .extend(classes.as_ref().split_whitespace().map(str::to_string));
        self
    }

    /// Append a child element (builder pattern).
    pub fn with_child(self, child: ElementRef) -> Self {
        self.append_child(child);
        self
    }

    /// The element's tag name.
    pub fn tag(&self) -> String {
        self.0.read().tag.clone()
    }

    /// The element's id, if any.
    pub fn id(&self) -> Option<String> {
        self.0.read().id.clone()
    }

    /// The element's classes.
    pub fn classes(&self) -> Vec<String> {
        self.0.read().classes.clone()
    }

    /// Check whether the element carries a class.
    pub fn has_class(&self, class: &str) -> bool {
        self.0.read().classes.iter().any(|c| c == class)
    }

    /// Check whether two handles point at the same element.
    pub fn ptr_eq(&self, other: &ElementRef) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Append a structural child element.
    pub fn append_child(&self, child: ElementRef) {
        self.0.write().children.push(child);
    }

    /// Remove a structural child. Returns `false` if it was not a child.
    pub fn remove_child(&self, child: &ElementRef) -> bool {
        let mut data = self.0.write();
        let before = data.children.len();
        data.children.retain(|c| !c.ptr_eq(child));
        before != data.children.len()
    }

    /// Structural children in document order.
    pub fn children(&self) -> Vec<ElementRef> {
        self.0.read().children.clone()
    }

    /// Replace the whole content of the element with a markup fragment.
    ///
    /// Structural children are dropped, like assigning inner HTML.
    pub fn set_inner_markup(&self, markup: Markup) {
        let mut data = self.0.write();
        data.children.clear();
        data.content = markup;
        data.revision += 1;
        tracing::trace!(
            target: targets::DOM,
            tag = %data.tag,
            id = data.id.as_deref().unwrap_or(""),
            revision = data.revision,
            "inner markup replaced"
        );
    }

    /// The markup fragment last injected into this element.
    pub fn inner_markup(&self) -> Markup {
        self.0.read().content.clone()
    }

    /// Number of content replacements applied so far.
    pub fn revision(&self) -> u64 {
        self.0.read().revision
    }

    /// Serialize the element's children and injected content to HTML.
    pub fn inner_html(&self) -> String {
        let inner: Markup = self.inner_nodes().into_iter().collect();
        inner.to_html()
    }

    /// Serialize the element itself, including its own tag, to HTML.
    pub fn outer_html(&self) -> String {
        Markup::from(self.to_tag()).to_html()
    }

    fn inner_nodes(&self) -> Vec<Node> {
        let data = self.0.read();
        data.children
            .iter()
            .map(|c| Node::Tag(c.to_tag()))
            .chain(data.content.nodes().iter().cloned())
            .collect()
    }

    fn to_tag(&self) -> Tag {
        let (mut tag, classes) = {
            let data = self.0.read();
            let mut tag = Tag::new(data.tag.clone());
            if let Some(id) = &data.id {
                tag = tag.attr("id", id.clone());
            }
            (tag, data.classes.join(" "))
        };
        tag = tag.class(classes);
        tag.children(self.inner_nodes())
    }

    /// Find the first descendant matching a selector, in document order.
    ///
    /// Combinators are resolved against ancestors inside this element's
    /// subtree, this element included.
    pub fn query_selector(&self, selector: &Selector) -> Option<ElementRef> {
        let mut found = Vec::new();
        self.collect_matches(selector, false, true, &mut found);
        found.into_iter().next()
    }

    /// Find all descendants matching a selector, in document order.
    pub fn query_selector_all(&self, selector: &Selector) -> Vec<ElementRef> {
        let mut found = Vec::new();
        self.collect_matches(selector, false, false, &mut found);
        found
    }

    fn collect_matches(
        &self,
        selector: &Selector,
        include_self: bool,
        first_only: bool,
        found: &mut Vec<ElementRef>,
    ) {
        let mut chain = Vec::new();
        self.visit(selector, include_self, first_only, &mut chain, found);
    }

    fn visit(
        &self,
        selector: &Selector,
        include_self: bool,
        first_only: bool,
        chain: &mut Vec<Snapshot>,
        found: &mut Vec<ElementRef>,
    ) {
        let children = {
            let data = self.0.read();
            chain.push(Snapshot {
                tag: data.tag.clone(),
                id: data.id.clone(),
                classes: data.classes.clone(),
            });
            data.children.clone()
        };

        if include_self {
            let contexts: Vec<MatchContext<'_>> = chain.iter().map(Snapshot::context).collect();
            if SelectorMatcher::matches_chain(selector, &contexts) {
                found.push(self.clone());
            }
        }

        for child in &children {
            if first_only && !found.is_empty() {
                break;
            }
            child.visit(selector, true, first_only, chain, found);
        }

        chain.pop();
    }
}

impl fmt::Debug for ElementRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.0.read();
        f.debug_struct("ElementRef")
            .field("tag", &data.tag)
            .field("id", &data.id)
            .field("classes", &data.classes)
            .field("children", &data.children.len())
            .field("revision", &data.revision)
            .finish()
    }
}

struct Snapshot {
    tag: String,
    id: Option<String>,
    classes: Vec<String>,
}

impl Snapshot {
    fn context(&self) -> MatchContext<'_> {
        MatchContext {
            tag: &self.tag,
            id: self.id.as_deref(),
            classes: &self.classes,
        }
    }
}

/// A page: the root element plus whole-document queries.
#[derive(Debug, Clone)]
pub struct Document {
    body: ElementRef,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create an empty page with a `body` root.
    pub fn new() -> Self {
        Self {
            body: ElementRef::new("body"),
        }
    }

    /// Wrap an existing root element.
    pub fn from_root(body: ElementRef) -> Self {
        Self { body }
    }

    /// The root element.
    pub fn body(&self) -> &ElementRef {
        &self.body
    }

    /// Find every element in the page matching a selector, root included.
    pub fn query_selector_all(&self, selector: &Selector) -> Vec<ElementRef> {
        let mut found = Vec::new();
        self.body.collect_matches(selector, true, false, &mut found);
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sel(source: &str) -> Selector {
        Selector::parse(source).unwrap()
    }

    fn snippet_page() -> (Document, ElementRef, ElementRef) {
        let row = ElementRef::new("div").with_id("categories-row").with_class("row");
        let snippet = ElementRef::new("section")
            .with_class("categories-snippet o_snippet")
            .with_child(ElementRef::new("div").with_class("container").with_child(row.clone()));
        let doc = Document::new();
        doc.body().append_child(snippet.clone());
        (doc, snippet, row)
    }

    #[test]
    fn query_selector_finds_nested_descendant() {
        let (_, snippet, row) = snippet_page();
        let found = snippet.query_selector(&sel("#categories-row")).unwrap();
        assert!(found.ptr_eq(&row));
        assert!(snippet.query_selector(&sel("#missing")).is_none());
    }

    #[test]
    fn query_selector_excludes_self() {
        let (_, snippet, _) = snippet_page();
        assert!(snippet.query_selector(&sel(".categories-snippet")).is_none());
    }

    #[test]
    fn document_query_includes_root() {
        let doc = Document::from_root(ElementRef::new("body").with_class("page"));
        assert_eq!(doc.query_selector_all(&sel(".page")).len(), 1);
    }

    #[test]
    fn combinators_use_ancestors_in_scope() {
        let (doc, _, row) = snippet_page();
        let nested = sel(".categories-snippet #categories-row");
        let found = doc.query_selector_all(&nested);
        assert_eq!(found.len(), 1);
        assert!(found[0].ptr_eq(&row));

        let direct = sel(".categories-snippet > #categories-row");
        assert!(doc.query_selector_all(&direct).is_empty());
    }

    #[test]
    fn set_inner_markup_replaces_content() {
        let (_, snippet, row) = snippet_page();
        assert_eq!(row.revision(), 0);

        row.set_inner_markup(Markup::from(Tag::new("p").text("first")));
        row.set_inner_markup(Markup::from(Tag::new("p").text("second")));

        assert_eq!(row.revision(), 2);
        assert_eq!(row.inner_html(), "<p>second</p>");
        assert!(snippet.inner_html().contains("<p>second</p>"));
        assert!(!snippet.inner_html().contains("first"));
    }

    #[test]
    fn set_inner_markup_drops_structural_children() {
        let (_, snippet, _) = snippet_page();
        snippet.set_inner_markup(Markup::new());
        assert!(snippet.children().is_empty());
        assert!(snippet.query_selector(&sel("#categories-row")).is_none());
    }

    #[test]
    fn detached_element_keeps_accepting_writes() {
        let (doc, snippet, row) = snippet_page();
        assert!(doc.body().remove_child(&snippet));
        assert!(!doc.body().remove_child(&snippet));

        row.set_inner_markup(Markup::from(Tag::new("p").text("late")));
        assert_eq!(row.inner_html(), "<p>late</p>");
        assert!(!doc.body().inner_html().contains("late"));
    }

    #[test]
    fn outer_html_serializes_attributes() {
        let el = ElementRef::new("div").with_id("x").with_class("a b");
        assert_eq!(el.outer_html(), r#"<div id="x" class="a b"></div>"#);
    }
}
