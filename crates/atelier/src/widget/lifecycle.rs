//! The attach → fetch → render state machine shared by every widget.

use std::marker::PhantomData;

use atelier_core::logging::{span_names, targets};
use atelier_core::{ElementRef, Selector};
use atelier_net::RemoteCall;
use tracing::Instrument;

use super::empty_state::render_empty_state;
use super::fetch::{fetch_records, Degradation, FetchOutcome};
use super::traits::ListWidget;

/// Lifecycle state of one widget instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LifecycleState {
    /// Not yet activated.
    #[default]
    Idle,
    /// Activated, waiting for the fetch to settle.
    Loading,
    /// Terminal. Reached whether or not anything was rendered.
    Ready,
}

/// What an activation did.
#[derive(Debug, Clone, PartialEq)]
pub enum Activation {
    /// Records were rendered into the target container.
    Rendered {
        /// Number of records rendered.
        count: usize,
    },
    /// The empty-state message was rendered.
    EmptyState {
        /// Why the fetch came back empty, when it was not a genuinely empty
        /// result.
        degradation: Option<Degradation>,
    },
    /// The root element has no target container; nothing was done.
    MissingContainer,
}

impl Activation {
    /// Check if records were rendered.
    pub fn is_rendered(&self) -> bool {
        matches!(self, Self::Rendered { .. })
    }

    /// Check if the empty-state message was rendered.
    pub fn is_empty_state(&self) -> bool {
        matches!(self, Self::EmptyState { .. })
    }
}

/// One widget instance attached to one root element.
///
/// Activation is one-shot: once the lifecycle has left [`LifecycleState::Idle`]
/// further calls to [`activate`](Self::activate) return the first report
/// without touching the page or the remote.
pub struct WidgetLifecycle<W: ListWidget> {
    target_key: Selector,
    state: LifecycleState,
    report: Option<Activation>,
    _widget: PhantomData<fn() -> W>,
}

impl<W: ListWidget> WidgetLifecycle<W> {
    /// Create an idle lifecycle that looks its container up with `target_key`.
    pub fn new(target_key: Selector) -> Self {
        Self {
            target_key,
            state: LifecycleState::Idle,
            report: None,
            _widget: PhantomData,
        }
    }

    /// Current state.
    pub fn state(&self) -> LifecycleState {
        self.state
    }

    /// Report of the first activation, if there was one.
    pub fn report(&self) -> Option<&Activation> {
        self.report.as_ref()
    }

    /// Locate the target container inside `root`, fetch records and render
    /// them, or the empty-state message when there are none.
    ///
    /// Never fails. A missing container performs no remote call.
    pub async fn activate(&mut self, root: &ElementRef, remote: &dyn RemoteCall) -> Activation {
        if let Some(report) = &self.report {
            tracing::trace!(target: targets::LIFECYCLE, widget = W::NAME, "already activated");
            return report.clone();
        }

        let span = tracing::debug_span!(span_names::ACTIVATION, widget = W::NAME);
        let report = self.run(root, remote).instrument(span).await;
        self.report = Some(report.clone());
        report
    }

    async fn run(&mut self, root: &ElementRef, remote: &dyn RemoteCall) -> Activation {
        let Some(target) = root.query_selector(&self.target_key) else {
            self.transition(LifecycleState::Ready);
            tracing::trace!(
                target: targets::LIFECYCLE,
                key = %self.target_key,
                "target container not found"
            );
            return Activation::MissingContainer;
        };

        self.transition(LifecycleState::Loading);
        let outcome: FetchOutcome<W::Record> = fetch_records(remote, W::ENDPOINT).await;
        let degradation = outcome.degradation();
        let records = outcome.into_records();

        let report = if records.is_empty() {
            render_empty_state(&target, W::EMPTY_MESSAGE);
            Activation::EmptyState { degradation }
        } else {
            target.set_inner_markup(W::render(&records));
            Activation::Rendered { count: records.len() }
        };

        self.transition(LifecycleState::Ready);
        report
    }

    fn transition(&mut self, next: LifecycleState) {
        tracing::trace!(
            target: targets::LIFECYCLE,
            from = ?self.state,
            to = ?next,
            "state transition"
        );
        self.state = next;
    }
}

impl<W: ListWidget> std::fmt::Debug for WidgetLifecycle<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WidgetLifecycle")
            .field("widget", &W::NAME)
            .field("target_key", &self.target_key.to_string())
            .field("state", &self.state)
            .field("report", &self.report)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Category;
    use crate::testing::StubRemote;
    use atelier_core::{Markup, Tag};
    use atelier_net::RpcError;
    use serde_json::json;

    struct Names;

    impl ListWidget for Names {
        type Record = Category;

        const NAME: &'static str = "names";
        const SELECTOR: &'static str = ".names";
        const TARGET: &'static str = "#names-row";
        const ENDPOINT: &'static str = "/names/";
        const EMPTY_MESSAGE: &'static str = "No names";

        fn render(records: &[Category]) -> Markup {
            records.iter().map(|c| Tag::new("p").text(&c.name)).collect()
        }
    }

    fn page() -> (ElementRef, ElementRef) {
        let row = ElementRef::new("div").with_id("names-row");
        let root = ElementRef::new("section")
            .with_class("names")
            .with_child(ElementRef::new("div").with_class("container").with_child(row.clone()));
        (root, row)
    }

    fn lifecycle() -> WidgetLifecycle<Names> {
        WidgetLifecycle::new(Selector::parse(Names::TARGET).unwrap())
    }

    #[tokio::test]
    async fn renders_records_and_becomes_ready() {
        let (root, row) = page();
        let remote = StubRemote::new().respond("/names/", json!([{"name": "a"}, {"name": "b"}]));
        let mut lifecycle = lifecycle();
        assert_eq!(lifecycle.state(), LifecycleState::Idle);

        let report = lifecycle.activate(&root, &remote).await;

        assert_eq!(report, Activation::Rendered { count: 2 });
        assert_eq!(lifecycle.state(), LifecycleState::Ready);
        assert_eq!(row.inner_html(), "<p>a</p><p>b</p>");
    }

    #[tokio::test]
    async fn missing_container_skips_fetch() {
        let root = ElementRef::new("section").with_class("names");
        let remote = StubRemote::new().respond("/names/", json!([{"name": "a"}]));
        let mut lifecycle = lifecycle();

        let report = lifecycle.activate(&root, &remote).await;

        assert_eq!(report, Activation::MissingContainer);
        assert_eq!(lifecycle.state(), LifecycleState::Ready);
        assert_eq!(remote.call_count(), 0);
        assert_eq!(root.revision(), 0);
    }

    #[tokio::test]
    async fn failure_renders_empty_state_with_reason() {
        let (root, row) = page();
        let remote = StubRemote::new().fail("/names/", RpcError::Timeout);
        let mut lifecycle = lifecycle();

        let report = lifecycle.activate(&root, &remote).await;

        assert_eq!(
            report,
            Activation::EmptyState {
                degradation: Some(Degradation::TransportFailure(RpcError::Timeout))
            }
        );
        assert_eq!(row.inner_markup().text_content(), "No names");
    }

    #[tokio::test]
    async fn second_activation_is_a_no_op() {
        let (root, row) = page();
        let remote = StubRemote::new().respond("/names/", json!([{"name": "a"}]));
        let mut lifecycle = lifecycle();

        let first = lifecycle.activate(&root, &remote).await;
        let revision = row.revision();
        let second = lifecycle.activate(&root, &remote).await;

        assert_eq!(first, second);
        assert_eq!(remote.call_count(), 1);
        assert_eq!(row.revision(), revision);
        assert_eq!(lifecycle.report(), Some(&first));
    }
}
