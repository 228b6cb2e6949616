//! Error types for Atelier core.

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the core systems.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Selector parsing error.
    #[error("Invalid selector '{selector}': {message}")]
    InvalidSelector { selector: String, message: String },
}

impl Error {
    /// Create a selector error.
    pub fn invalid_selector(selector: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidSelector {
            selector: selector.into(),
            message: message.into(),
        }
    }
}
