//! Test doubles for driving widgets without a backend.

use std::collections::HashMap;

use atelier_net::{RemoteCall, RpcError};
use futures_util::FutureExt;
use futures_util::future::BoxFuture;
use parking_lot::Mutex;
use serde_json::Value;

/// A [`RemoteCall`] that answers from canned responses and records every call.
///
/// Endpoints without a canned response fail with [`RpcError::HttpStatus`] 404.
///
/// # Example
///
/// ```
/// use atelier::testing::StubRemote;
/// use serde_json::json;
///
/// let remote = StubRemote::new()
///     .respond("/public_categories/", json!([{"name": "Dresses"}]));
/// assert!(remote.calls().is_empty());
/// ```
#[derive(Default)]
pub struct StubRemote {
    responses: HashMap<String, Result<Value, RpcError>>,
    calls: Mutex<Vec<(String, Value)>>,
}

impl StubRemote {
    /// Create a stub with no canned responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve calls to `endpoint` with `value`.
    pub fn respond(mut self, endpoint: impl Into<String>, value: Value) -> Self {
        self.responses.insert(endpoint.into(), Ok(value));
        self
    }

    /// Reject calls to `endpoint` with `error`.
    pub fn fail(mut self, endpoint: impl Into<String>, error: RpcError) -> Self {
        self.responses.insert(endpoint.into(), Err(error));
        self
    }

    /// Every call received so far, as `(endpoint, payload)` pairs.
    pub fn calls(&self) -> Vec<(String, Value)> {
        self.calls.lock().clone()
    }

    /// Number of calls received so far.
    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }
}

impl RemoteCall for StubRemote {
    fn call<'a>(
        &'a self,
        endpoint: &'a str,
        payload: Value,
    ) -> BoxFuture<'a, atelier_net::Result<Value>> {
        self.calls.lock().push((endpoint.to_string(), payload));
        let response = self
            .responses
            .get(endpoint)
            .cloned()
            .unwrap_or(Err(RpcError::HttpStatus {
                status: 404,
                message: Some("Not Found".to_string()),
            }));
        async move { response }.boxed()
    }
}
