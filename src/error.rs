/// Error taxonomy for calls against the extraction API

use thiserror::Error;

pub const LOAD_TIMEOUT_MESSAGE: &str =
    "Request timed out while loading data. Please check the backend.";
pub const LOAD_FALLBACK_MESSAGE: &str = "Failed to load data";
pub const EXTRACT_REJECTED_MESSAGE: &str = "Extraction failed";
pub const EXTRACT_FALLBACK_MESSAGE: &str = "Failed to connect to the extraction service";

pub type Result<T> = std::result::Result<T, ApiError>;

/// API client errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// The client-side deadline elapsed and the request was aborted
    #[error("timeout of {after_ms}ms exceeded")]
    Timeout { after_ms: u32 },

    /// The request never produced a response (DNS, CORS, connection reset)
    #[error("{0}")]
    Network(String),

    /// Non-2xx response, with the server's `error` field when it sent one
    #[error("Request failed with status code {status}")]
    Server { status: u16, message: Option<String> },

    /// The body could not be encoded or decoded
    #[error("Invalid payload: {0}")]
    Payload(String),

    /// 2xx response whose envelope reported `success: false`
    #[error("{}", .0.as_deref().unwrap_or(EXTRACT_REJECTED_MESSAGE))]
    Rejected(Option<String>),
}

impl ApiError {
    /// Message the server itself supplied, if any
    pub fn server_message(&self) -> Option<&str> {
        let message = match self {
            ApiError::Server { message, .. } | ApiError::Rejected(message) => message.as_deref(),
            _ => None,
        };
        message.filter(|text| !text.trim().is_empty())
    }

    /// Transport-level description, if the failure happened below the envelope
    pub fn transport_message(&self) -> Option<String> {
        match self {
            ApiError::Rejected(_) => None,
            ApiError::Network(text) if text.trim().is_empty() => None,
            other => Some(other.to_string()),
        }
    }

    /// User-facing text for a failed record load
    pub fn load_message(&self) -> String {
        match self {
            ApiError::Timeout { .. } => LOAD_TIMEOUT_MESSAGE.to_string(),
            _ => self.describe(LOAD_FALLBACK_MESSAGE),
        }
    }

    /// User-facing text for a failed extraction request
    pub fn extract_message(&self) -> String {
        match self {
            ApiError::Rejected(_) => self
                .server_message()
                .unwrap_or(EXTRACT_REJECTED_MESSAGE)
                .to_string(),
            _ => self.describe(EXTRACT_FALLBACK_MESSAGE),
        }
    }

    // server message → transport message → fallback
    fn describe(&self, fallback: &str) -> String {
        self.server_message()
            .map(str::to_string)
            .or_else(|| self.transport_message())
            .unwrap_or_else(|| fallback.to_string())
    }
}

impl From<gloo_net::Error> for ApiError {
    fn from(err: gloo_net::Error) -> Self {
        match err {
            gloo_net::Error::SerdeError(inner) => ApiError::Payload(inner.to_string()),
            other => ApiError::Network(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_timeout_uses_fixed_message() {
        let err = ApiError::Timeout { after_ms: 30_000 };
        assert_eq!(err.load_message(), LOAD_TIMEOUT_MESSAGE);
    }

    #[test]
    fn test_load_prefers_server_message() {
        let err = ApiError::Server {
            status: 500,
            message: Some("Database error: locked".to_string()),
        };
        assert_eq!(err.load_message(), "Database error: locked");
    }

    #[test]
    fn test_load_falls_back_to_transport_message() {
        let err = ApiError::Server { status: 502, message: None };
        assert_eq!(err.load_message(), "Request failed with status code 502");

        let err = ApiError::Network("Failed to fetch".to_string());
        assert_eq!(err.load_message(), "Failed to fetch");
    }

    #[test]
    fn test_load_generic_fallback() {
        assert_eq!(ApiError::Network(String::new()).load_message(), LOAD_FALLBACK_MESSAGE);
        assert_eq!(ApiError::Rejected(None).load_message(), LOAD_FALLBACK_MESSAGE);
    }

    #[test]
    fn test_load_rejected_uses_payload_error() {
        let err = ApiError::Rejected(Some("Database error: no such table".to_string()));
        assert_eq!(err.load_message(), "Database error: no such table");
    }

    #[test]
    fn test_extract_rejected() {
        let err = ApiError::Rejected(Some("Could not fetch page".to_string()));
        assert_eq!(err.extract_message(), "Could not fetch page");
        assert_eq!(ApiError::Rejected(None).extract_message(), EXTRACT_REJECTED_MESSAGE);
    }

    #[test]
    fn test_extract_timeout_reports_transport_text() {
        let err = ApiError::Timeout { after_ms: 30_000 };
        assert_eq!(err.extract_message(), "timeout of 30000ms exceeded");
    }

    #[test]
    fn test_extract_fallback_chain() {
        let err = ApiError::Server {
            status: 400,
            message: Some("URL is required".to_string()),
        };
        assert_eq!(err.extract_message(), "URL is required");
        assert_eq!(ApiError::Network("  ".to_string()).extract_message(), EXTRACT_FALLBACK_MESSAGE);
    }
}
