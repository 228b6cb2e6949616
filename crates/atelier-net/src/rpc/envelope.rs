//! JSON-RPC 2.0 request and response envelopes.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Result, RpcError};

/// Outgoing call envelope: `{"jsonrpc":"2.0","method":"call","params":..,"id":..}`.
#[derive(Debug, Serialize)]
pub struct RpcRequest<'a> {
    jsonrpc: &'static str,
    method: &'static str,
    params: &'a Value,
    id: u64,
}

impl<'a> RpcRequest<'a> {
    /// Wrap call parameters in an envelope with the given request id.
    pub fn call(params: &'a Value, id: u64) -> Self {
        Self {
            jsonrpc: "2.0",
            method: "call",
            params,
            id,
        }
    }

    /// The request id.
    pub fn id(&self) -> u64 {
        self.id
    }
}

#[derive(Debug, Deserialize)]
struct ErrorObject {
    #[serde(default)]
    code: i64,
    #[serde(default)]
    message: String,
    #[serde(default)]
    data: Option<ErrorData>,
}

#[derive(Debug, Deserialize)]
struct ErrorData {
    #[serde(default)]
    message: Option<String>,
}

/// Incoming response envelope.
///
/// Kept as a raw object so that `"result": null` stays distinguishable from
/// a missing `result` member.
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct RpcResponse(Map<String, Value>);

impl RpcResponse {
    /// Extract the call result, mapping an `error` member to [`RpcError::Server`].
    pub fn into_result(mut self) -> Result<Value> {
        if let Some(error) = self.0.remove("error") {
            let error: ErrorObject = serde_json::from_value(error)
                .map_err(|e| RpcError::InvalidEnvelope(format!("malformed error member: {e}")))?;
            let message = error
                .data
                .and_then(|d| d.message)
                .filter(|m| !m.is_empty())
                .unwrap_or(error.message);
            return Err(RpcError::Server {
                code: error.code,
                message,
            });
        }

        self.0
            .remove("result")
            .ok_or_else(|| RpcError::InvalidEnvelope("missing both result and error".to_string()))
    }
}
