//! Error types for the networking module.

/// A specialized Result type for remote calls.
pub type Result<T> = std::result::Result<T, RpcError>;

/// Errors a remote call can fail with.
///
/// Widgets never surface these; they only decide which degraded path a
/// fetch took.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RpcError {
    /// HTTP request failed.
    #[error("HTTP request error: {0}")]
    Request(String),
    /// Connection refused or failed.
    #[error("Connection error: {0}")]
    Connection(String),
    /// Request timed out.
    #[error("Request timed out")]
    Timeout,
    /// Invalid URL provided.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
    /// HTTP error status (4xx or 5xx).
    #[error("HTTP {status}{}", .message.as_deref().map(|m| format!(": {m}")).unwrap_or_default())]
    HttpStatus {
        /// The HTTP status code.
        status: u16,
        /// Optional error message from the response body.
        message: Option<String>,
    },
    /// Response body was not valid JSON.
    #[error("JSON error: {0}")]
    Json(String),
    /// The server answered with a JSON-RPC error object.
    #[error("Server error {code}: {message}")]
    Server {
        /// JSON-RPC error code.
        code: i64,
        /// Error message reported by the server.
        message: String,
    },
    /// The response envelope carried neither a result nor an error.
    #[error("Invalid JSON-RPC envelope: {0}")]
    InvalidEnvelope(String),
}

impl From<reqwest::Error> for RpcError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_connect() {
            Self::Connection(err.to_string())
        } else if err.is_decode() {
            Self::Json(err.to_string())
        } else {
            Self::Request(err.to_string())
        }
    }
}

impl From<url::ParseError> for RpcError {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidUrl(err.to_string())
    }
}

impl From<serde_json::Error> for RpcError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_status_display() {
        let err = RpcError::HttpStatus {
            status: 502,
            message: None,
        };
        assert_eq!(err.to_string(), "HTTP 502");

        let err = RpcError::HttpStatus {
            status: 404,
            message: Some("Not Found".into()),
        };
        assert_eq!(err.to_string(), "HTTP 404: Not Found");
    }

    #[test]
    fn server_error_display() {
        let err = RpcError::Server {
            code: 200,
            message: "Internal Server Error".into(),
        };
        assert_eq!(err.to_string(), "Server error 200: Internal Server Error");
    }
}
