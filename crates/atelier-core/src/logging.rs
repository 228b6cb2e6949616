//! Logging facilities for Atelier.
//!
//! Atelier uses the `tracing` crate for instrumentation and never installs a
//! subscriber itself. To see logs, install one in the host application:
//!
//! ```no_run
//! fn main() {
//!     tracing_subscriber::fmt()
//!         .with_env_filter("atelier=debug")
//!         .init();
//! }
//! ```
//!
//! Degraded fetches and missing containers are expected states of a widget,
//! so they are reported at `debug` level and below.

/// Span names used throughout Atelier for tracing.
///
/// These constants can be used to filter traces for specific subsystems.
pub mod span_names {
    /// One widget activation, from container lookup to render.
    pub const ACTIVATION: &str = "atelier::activation";
    /// A single remote call.
    pub const REMOTE_CALL: &str = "atelier::remote_call";
    /// Host-side scan and activation of a whole page.
    pub const PAGE_SCAN: &str = "atelier::page_scan";
}

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Record fetching and payload validation.
    pub const FETCH: &str = "atelier::fetch";
    /// Widget state machine transitions.
    pub const LIFECYCLE: &str = "atelier::lifecycle";
    /// Widget registration and page activation.
    pub const REGISTRY: &str = "atelier::registry";
    /// Page model mutations.
    pub const DOM: &str = "atelier_core::dom";
    /// JSON-RPC transport.
    pub const RPC: &str = "atelier_net::rpc";
}
