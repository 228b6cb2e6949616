//! Core systems for Atelier.
//!
//! This crate provides the foundational pieces the storefront widgets are
//! built on:
//!
//! - **Markup**: A structured markup tree with HTML serialization
//! - **Page Model**: Shared element handles with inner-markup replacement
//! - **Selectors**: CSS-like selector parsing and matching
//! - **Logging**: Tracing targets and span names
//!
//! # Example
//!
//! ```
//! use atelier_core::dom::{Document, ElementRef};
//! use atelier_core::markup::{Markup, Tag};
//! use atelier_core::selector::Selector;
//!
//! let row = ElementRef::new("div").with_id("categories-row");
//! let doc = Document::new();
//! let root = ElementRef::new("section")
//!     .with_class("categories-snippet")
//!     .with_child(row);
//! doc.body().append_child(root);
//!
//! let snippets = doc.query_selector_all(&Selector::parse(".categories-snippet")?);
//! let target = snippets[0].query_selector(&Selector::parse("#categories-row")?).unwrap();
//! target.set_inner_markup(Markup::from(Tag::new("h6").text("Dresses")));
//!
//! assert_eq!(target.inner_html(), "<h6>Dresses</h6>");
//! # Ok::<(), atelier_core::Error>(())
//! ```

pub mod dom;
mod error;
pub mod logging;
pub mod markup;
pub mod selector;

pub use dom::{Document, ElementRef};
pub use error::{Error, Result};
pub use markup::{Markup, Node, Tag};
pub use selector::{Selector, SelectorMatcher, SelectorPart};
