//! Widgets: the shared fetch → render lifecycle and its three variants.
//!
//! A widget is described by a [`ListWidget`] implementation: which elements it
//! attaches to, where its target container sits, which endpoint it reads and
//! how it renders records. Everything else is shared:
//!
//! - [`fetch`] performs the single remote call and validates the payload
//! - [`WidgetLifecycle`] drives Idle → Loading → Ready for one element
//! - [`render_empty_state`] writes the fallback message
//! - [`Registry`] scans a page and activates every registered widget
//!
//! # Example
//!
//! ```
//! use atelier::testing::StubRemote;
//! use atelier::widget::{Activation, CategoryList, ListWidget, Registered};
//! use atelier_core::ElementRef;
//! use futures_util::FutureExt;
//! use serde_json::json;
//!
//! let row = ElementRef::new("div").with_id("categories-row");
//! let root = ElementRef::new("section").with_class("categories-snippet").with_child(row.clone());
//! let remote = StubRemote::new().respond(CategoryList::ENDPOINT, json!([]));
//!
//! let mut lifecycle = Registered::<CategoryList>::new().unwrap().lifecycle();
//! let report = lifecycle.activate(&root, &remote).now_or_never().unwrap();
//!
//! assert_eq!(report, Activation::EmptyState { degradation: None });
//! assert!(row.inner_html().contains("No categories available"));
//! ```

mod empty_state;
pub mod fetch;
mod lifecycle;
mod registry;
mod traits;
mod widgets;

pub use empty_state::{empty_state_markup, render_empty_state};
pub use fetch::{fetch_records, validate_records, Degradation, FetchOutcome};
pub use lifecycle::{Activation, LifecycleState, WidgetLifecycle};
pub use registry::{ActivationReport, Registry};
pub use traits::{ListWidget, Registered, Snippet};
pub use widgets::{CategoryList, FeaturedProductList, LatestProductCarousel, CAROUSEL_ID};
