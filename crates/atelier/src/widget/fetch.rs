//! One-shot record fetching with explicit degradation.
//!
//! A widget always ends up with a sequence of records. Transport failures and
//! payloads of the wrong shape are swallowed and turned into an empty
//! sequence, but [`FetchOutcome`] keeps track of why, so the lifecycle can
//! report it and tests can tell a failed fetch from a genuinely empty one.

use atelier_core::logging::targets;
use atelier_net::{RemoteCall, RpcError};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Why a fetch produced no records even though records may exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Degradation {
    /// The remote call itself failed.
    TransportFailure(RpcError),
    /// The call succeeded but the payload was not a sequence of records.
    MalformedResponse(String),
}

impl Degradation {
    /// Check if the degradation came from the transport.
    pub fn is_transport_failure(&self) -> bool {
        matches!(self, Self::TransportFailure(_))
    }

    /// Check if the degradation came from payload validation.
    pub fn is_malformed_response(&self) -> bool {
        matches!(self, Self::MalformedResponse(_))
    }
}

/// Result of fetching one widget's records.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome<R> {
    /// A non-empty sequence of valid records, in endpoint order.
    Loaded(Vec<R>),
    /// The endpoint returned an empty sequence.
    Empty,
    /// The remote call failed.
    TransportFailure(RpcError),
    /// The payload was not a sequence of records of the expected shape.
    MalformedResponse(String),
}

impl<R> FetchOutcome<R> {
    /// Collapse the outcome into the records to render.
    ///
    /// Every degraded outcome yields an empty sequence.
    pub fn into_records(self) -> Vec<R> {
        match self {
            Self::Loaded(records) => records,
            _ => Vec::new(),
        }
    }

    /// Why the outcome is empty, if it is empty for a reason other than the
    /// endpoint having nothing to return.
    pub fn degradation(&self) -> Option<Degradation> {
        match self {
            Self::TransportFailure(err) => Some(Degradation::TransportFailure(err.clone())),
            Self::MalformedResponse(reason) => Some(Degradation::MalformedResponse(reason.clone())),
            Self::Loaded(_) | Self::Empty => None,
        }
    }

    /// Check if the outcome carries records.
    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded(_))
    }
}

/// Validate a raw call result as a sequence of records.
pub fn validate_records<R: DeserializeOwned>(value: Value) -> FetchOutcome<R> {
    match value {
        Value::Array(items) if items.is_empty() => FetchOutcome::Empty,
        Value::Array(items) => {
            let mut records = Vec::with_capacity(items.len());
            for (index, item) in items.into_iter().enumerate() {
                match serde_json::from_value(item) {
                    Ok(record) => records.push(record),
                    Err(err) => {
                        return FetchOutcome::MalformedResponse(format!(
                            "record {index} does not match the expected shape: {err}"
                        ));
                    }
                }
            }
            FetchOutcome::Loaded(records)
        }
        other => FetchOutcome::MalformedResponse(format!(
            "expected a sequence, got {}",
            value_kind(&other)
        )),
    }
}

/// Perform exactly one call to `endpoint` with an empty payload and validate
/// the result.
///
/// Never fails: errors are folded into the returned outcome.
pub async fn fetch_records<R: DeserializeOwned>(
    remote: &dyn RemoteCall,
    endpoint: &str,
) -> FetchOutcome<R> {
    let outcome = match remote.call(endpoint, Value::Object(Map::new())).await {
        Ok(value) => validate_records(value),
        Err(err) => FetchOutcome::TransportFailure(err),
    };

    match &outcome {
        FetchOutcome::Loaded(records) => {
            tracing::trace!(
                target: targets::FETCH,
                endpoint,
                count = records.len(),
                "records loaded"
            );
        }
        FetchOutcome::Empty => {
            tracing::trace!(
                target: targets::FETCH,
                endpoint,
                "endpoint returned no records"
            );
        }
        FetchOutcome::TransportFailure(err) => {
            tracing::debug!(
                target: targets::FETCH,
                endpoint,
                error = %err,
                "remote call failed, using empty result"
            );
        }
        FetchOutcome::MalformedResponse(reason) => {
            tracing::debug!(
                target: targets::FETCH,
                endpoint,
                %reason,
                "malformed payload, using empty result"
            );
        }
    }

    outcome
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Category;
    use crate::testing::StubRemote;
    use serde_json::json;

    #[test]
    fn validate_preserves_order_and_duplicates() {
        let outcome: FetchOutcome<Category> =
            validate_records(json!([{"name": "b"}, {"name": "a"}, {"name": "b"}, {"name": ""}]));
        let names: Vec<_> = outcome.into_records().into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["b", "a", "b", ""]);
    }

    #[test]
    fn validate_rejects_non_sequences() {
        for value in [json!(null), json!({"name": "x"}), json!("x"), json!(3), json!(false)] {
            let outcome: FetchOutcome<Category> = validate_records(value);
            assert!(matches!(outcome, FetchOutcome::MalformedResponse(_)));
            assert!(outcome.degradation().unwrap().is_malformed_response());
            assert!(outcome.into_records().is_empty());
        }
    }

    #[test]
    fn validate_rejects_mismatched_elements() {
        let outcome: FetchOutcome<Category> = validate_records(json!([{"name": "ok"}, {"id": 2}]));
        match outcome {
            FetchOutcome::MalformedResponse(reason) => assert!(reason.starts_with("record 1")),
            other => panic!("expected malformed response, got {other:?}"),
        }
    }

    #[test]
    fn empty_sequence_is_not_degraded() {
        let outcome: FetchOutcome<Category> = validate_records(json!([]));
        assert_eq!(outcome, FetchOutcome::Empty);
        assert!(outcome.degradation().is_none());
    }

    #[tokio::test]
    async fn fetch_sends_empty_payload_once() {
        let remote = StubRemote::new().respond("/public_categories/", json!([{"name": "Dresses"}]));

        let outcome: FetchOutcome<Category> = fetch_records(&remote, "/public_categories/").await;

        assert!(outcome.is_loaded());
        assert_eq!(remote.calls(), vec![("/public_categories/".to_string(), json!({}))]);
    }

    #[tokio::test]
    async fn fetch_maps_transport_failure() {
        let remote = StubRemote::new().fail("/public_categories/", RpcError::Timeout);

        let outcome: FetchOutcome<Category> = fetch_records(&remote, "/public_categories/").await;

        assert_eq!(outcome.degradation(), Some(Degradation::TransportFailure(RpcError::Timeout)));
        assert!(outcome.into_records().is_empty());
    }
}
