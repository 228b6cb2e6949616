//! Widget trait definitions.
//!
//! # Key Types
//!
//! - [`ListWidget`] - Static description of one widget variant: where it
//!   attaches, what it fetches and how it renders
//! - [`Snippet`] - Object-safe activation interface the host drives
//! - [`Registered`] - Adapter turning a [`ListWidget`] into a [`Snippet`]

use std::marker::PhantomData;

use atelier_core::{ElementRef, Markup, Result, Selector};
use atelier_net::RemoteCall;
use futures_util::FutureExt;
use futures_util::future::BoxFuture;
use serde::de::DeserializeOwned;

use super::lifecycle::{Activation, WidgetLifecycle};

/// A widget that fetches a list of records and renders them as markup.
///
/// Implementors are plain marker types; every piece of behavior that differs
/// between variants is expressed here, while fetching, empty-state handling
/// and the state machine are shared.
pub trait ListWidget: Send + Sync + 'static {
    /// Record shape returned by the endpoint.
    type Record: DeserializeOwned + Send + Sync;

    /// Registry name.
    const NAME: &'static str;
    /// Selector of the root elements this widget attaches to.
    const SELECTOR: &'static str;
    /// Selector of the inner target container, looked up inside the root.
    const TARGET: &'static str;
    /// Endpoint records are fetched from.
    const ENDPOINT: &'static str;
    /// Message shown when there is nothing to render.
    const EMPTY_MESSAGE: &'static str;

    /// Render a non-empty sequence of records, in input order.
    fn render(records: &[Self::Record]) -> Markup;
}

/// The activation interface the host drives.
///
/// The host scans the page for elements matching [`Snippet::selector`] and
/// calls [`Snippet::activate`] once per matched element.
pub trait Snippet: Send + Sync {
    /// Registry name.
    fn name(&self) -> &str;

    /// Selector of the root elements this widget attaches to.
    fn selector(&self) -> &Selector;

    /// Attach to `element`, fetch and render. Never fails.
    fn activate<'a>(
        &'a self,
        element: ElementRef,
        remote: &'a dyn RemoteCall,
    ) -> BoxFuture<'a, Activation>;
}

/// A [`ListWidget`] with its selectors parsed, ready to be activated.
pub struct Registered<W: ListWidget> {
    selector: Selector,
    target: Selector,
    _widget: PhantomData<fn() -> W>,
}

impl<W: ListWidget> Registered<W> {
    /// Parse the widget's selectors.
    pub fn new() -> Result<Self> {
        Ok(Self {
            selector: Selector::parse(W::SELECTOR)?,
            target: Selector::parse(W::TARGET)?,
            _widget: PhantomData,
        })
    }

    /// Create a fresh, idle lifecycle for one root element.
    pub fn lifecycle(&self) -> WidgetLifecycle<W> {
        WidgetLifecycle::new(self.target.clone())
    }
}

impl<W: ListWidget> Snippet for Registered<W> {
    fn name(&self) -> &str {
        W::NAME
    }

    fn selector(&self) -> &Selector {
        &self.selector
    }

    fn activate<'a>(
        &'a self,
        element: ElementRef,
        remote: &'a dyn RemoteCall,
    ) -> BoxFuture<'a, Activation> {
        let mut lifecycle = self.lifecycle();
        async move { lifecycle.activate(&element, remote).await }.boxed()
    }
}

impl<W: ListWidget> std::fmt::Debug for Registered<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registered")
            .field("name", &W::NAME)
            .field("selector", &self.selector.to_string())
            .field("target", &self.target.to_string())
            .finish()
    }
}
