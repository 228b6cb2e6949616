//! The remote call contract widgets fetch through.

use std::sync::Arc;

use futures_util::future::BoxFuture;
use serde_json::Value;

use crate::error::Result;

/// Something that can perform a remote call to a named endpoint.
///
/// This is the only transport contract widgets depend on. The payload is
/// passed through untouched and the resolved value is returned unvalidated;
/// shape checking is the caller's job.
///
/// # Example
///
/// ```ignore
/// use atelier_net::RemoteCall;
/// use serde_json::json;
///
/// let value = remote.call("/public_categories/", json!({})).await?;
/// ```
pub trait RemoteCall: Send + Sync {
    /// Call `endpoint` with `payload` and resolve to the raw result value.
    fn call<'a>(&'a self, endpoint: &'a str, payload: Value) -> BoxFuture<'a, Result<Value>>;
}

impl<T: RemoteCall + ?Sized> RemoteCall for &T {
    fn call<'a>(&'a self, endpoint: &'a str, payload: Value) -> BoxFuture<'a, Result<Value>> {
        (**self).call(endpoint, payload)
    }
}

impl<T: RemoteCall + ?Sized> RemoteCall for Arc<T> {
    fn call<'a>(&'a self, endpoint: &'a str, payload: Value) -> BoxFuture<'a, Result<Value>> {
        (**self).call(endpoint, payload)
    }
}
