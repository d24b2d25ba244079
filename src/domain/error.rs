use std::fmt;

use thiserror::Error;

/// Classification of a failed completion call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidUrl,
    RequestEncodingFailed,
    NetworkError,
    NoData,
    ApiError,
    MalformedResponse,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidUrl => "invalid_url",
            ErrorKind::RequestEncodingFailed => "request_encoding_failed",
            ErrorKind::NetworkError => "network_error",
            ErrorKind::NoData => "no_data",
            ErrorKind::ApiError => "api_error",
            ErrorKind::MalformedResponse => "malformed_response",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Failure half of a [`CompletionResult`].
///
/// Every variant carries the human-readable detail the caller shows to the
/// end user. `MalformedResponse` carries the raw response body.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompletionError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Request encoding failed: {0}")]
    RequestEncodingFailed(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("No data received from the server")]
    NoData,

    #[error("API error: {0}")]
    Api(String),

    #[error("Invalid response format. Raw response: {0}")]
    MalformedResponse(String),
}

impl CompletionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidUrl(_) => ErrorKind::InvalidUrl,
            Self::RequestEncodingFailed(_) => ErrorKind::RequestEncodingFailed,
            Self::Network(_) => ErrorKind::NetworkError,
            Self::NoData => ErrorKind::NoData,
            Self::Api(_) => ErrorKind::ApiError,
            Self::MalformedResponse(_) => ErrorKind::MalformedResponse,
        }
    }

    pub fn detail(&self) -> &str {
        match self {
            Self::NoData => "",
            Self::InvalidUrl(d)
            | Self::RequestEncodingFailed(d)
            | Self::Network(d)
            | Self::Api(d)
            | Self::MalformedResponse(d) => d,
        }
    }

    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Network(_))
    }
}

/// Outcome of a single completion call: the assistant text or a classified failure.
pub type CompletionResult = Result<String, CompletionError>;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error(transparent)]
    Completion(#[from] CompletionError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }

    pub fn completion_kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Completion(e) => Some(e.kind()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_and_detail() {
        let err = CompletionError::Api("rate limited".to_string());
        assert_eq!(err.kind(), ErrorKind::ApiError);
        assert_eq!(err.detail(), "rate limited");
        assert_eq!(err.to_string(), "API error: rate limited");

        assert_eq!(CompletionError::NoData.kind(), ErrorKind::NoData);
        assert_eq!(CompletionError::NoData.detail(), "");
    }

    #[test]
    fn test_only_network_errors_are_retryable() {
        assert!(CompletionError::Network("timed out".into()).is_retryable());
        assert!(!CompletionError::NoData.is_retryable());
        assert!(!CompletionError::Api("bad key".into()).is_retryable());
        assert!(!CompletionError::MalformedResponse("<html>".into()).is_retryable());
    }

    #[test]
    fn test_domain_error_wraps_completion_error() {
        let err: DomainError = CompletionError::InvalidUrl("nope".into()).into();
        assert_eq!(err.completion_kind(), Some(ErrorKind::InvalidUrl));
        assert_eq!(err.to_string(), "Invalid URL: nope");
        assert!(DomainError::invalid_input("empty").completion_kind().is_none());
    }
}
