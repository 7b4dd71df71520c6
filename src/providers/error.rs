//! Error types for external collaborator calls.

/// Result type for provider operations.
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Error type for provider operations.
///
/// Timeouts are reported as their own variant so callers can distinguish
/// retryable deadline overruns from hard failures. No retry is performed
/// inside the providers themselves.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// The upstream had no answer for the request (e.g. unknown address).
    #[error("not found: {0}")]
    NotFound(String),

    /// The upstream exceeded the bounded call deadline.
    #[error("upstream timed out: {0}")]
    Timeout(String),

    /// Transport, protocol or payload-shape failure.
    #[error("upstream service error: {0}")]
    Service(String),
}

impl ProviderError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout(message.into())
    }

    pub fn service(message: impl Into<String>) -> Self {
        Self::Service(message.into())
    }

    /// Whether the caller may retry the call that produced this error.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Timeout(_))
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ProviderError::Timeout(err.to_string())
        } else {
            ProviderError::Service(err.to_string())
        }
    }
}
