//! Widget registry and the reference page-activation loop.

use atelier_core::logging::{span_names, targets};
use atelier_core::{Document, ElementRef, Result};
use atelier_net::RemoteCall;
use futures_util::future::join_all;
use tracing::Instrument;

use super::lifecycle::Activation;
use super::traits::{ListWidget, Registered, Snippet};
use super::widgets::{CategoryList, FeaturedProductList, LatestProductCarousel};

/// Outcome of activating one widget on one matched element.
#[derive(Debug, Clone)]
pub struct ActivationReport {
    /// Registry name of the widget.
    pub widget: String,
    /// The element the widget was activated on.
    pub element: ElementRef,
    /// What the activation did.
    pub activation: Activation,
}

/// An ordered set of widgets a host activates against a page.
///
/// # Example
///
/// ```
/// use atelier::testing::StubRemote;
/// use atelier::widget::Registry;
/// use atelier_core::{Document, ElementRef};
/// use futures_util::FutureExt;
/// use serde_json::json;
///
/// let row = ElementRef::new("div").with_id("categories-row");
/// let page = Document::new();
/// let root = ElementRef::new("section")
///     .with_class("categories-snippet")
///     .with_child(row.clone());
/// page.body().append_child(root);
///
/// let remote = StubRemote::new()
///     .respond("/public_categories/", json!([{"name": "Dresses"}]));
/// let registry = Registry::storefront().unwrap();
/// let reports = registry.activate_all(&page, &remote).now_or_never().unwrap();
///
/// assert_eq!(reports.len(), 1);
/// assert!(row.inner_html().contains("Dresses"));
/// ```
#[derive(Default)]
pub struct Registry {
    snippets: Vec<Box<dyn Snippet>>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the three storefront widgets.
    pub fn storefront() -> Result<Self> {
        let mut registry = Self::new();
        registry.register::<CategoryList>()?;
        registry.register::<FeaturedProductList>()?;
        registry.register::<LatestProductCarousel>()?;
        Ok(registry)
    }

    /// Register a widget, parsing its selectors.
    ///
    /// Fails if the widget's root selector or target key is not a valid
    /// selector.
    pub fn register<W: ListWidget>(&mut self) -> Result<&mut Self> {
        let snippet = Registered::<W>::new()?;
        tracing::debug!(
            target: targets::REGISTRY,
            widget = W::NAME,
            selector = W::SELECTOR,
            "widget registered"
        );
        self.snippets.push(Box::new(snippet));
        Ok(self)
    }

    /// Register an already constructed snippet.
    pub fn register_snippet(&mut self, snippet: Box<dyn Snippet>) -> &mut Self {
        tracing::debug!(
            target: targets::REGISTRY,
            widget = snippet.name(),
            "snippet registered"
        );
        self.snippets.push(snippet);
        self
    }

    /// Registered widget names, in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.snippets.iter().map(|s| s.name()).collect()
    }

    /// Number of registered widgets.
    pub fn len(&self) -> usize {
        self.snippets.len()
    }

    /// Check if no widget is registered.
    pub fn is_empty(&self) -> bool {
        self.snippets.is_empty()
    }

    /// Scan the page and activate every widget once per matching element.
    ///
    /// All activations run concurrently on the calling task. Reports are
    /// returned in registration order, then document order.
    pub async fn activate_all(
        &self,
        document: &Document,
        remote: &dyn RemoteCall,
    ) -> Vec<ActivationReport> {
        let span = tracing::debug_span!(span_names::PAGE_SCAN, widgets = self.snippets.len());
        async {
            let pending: Vec<_> = self
                .snippets
                .iter()
                .flat_map(|snippet| {
                    document
                        .query_selector_all(snippet.selector())
                        .into_iter()
                        .map(move |element| (snippet, element))
                })
                .map(|(snippet, element)| async move {
                    let activation = snippet.activate(element.clone(), remote).await;
                    ActivationReport {
                        widget: snippet.name().to_string(),
                        element,
                        activation,
                    }
                })
                .collect();

            tracing::debug!(
                target: targets::REGISTRY,
                matched = pending.len(),
                "activating widgets"
            );
            join_all(pending).await
        }
        .instrument(span)
        .await
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry").field("snippets", &self.names()).finish()
    }
}
