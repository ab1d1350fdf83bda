//! Remote data service error types.

use thiserror::Error;

/// Errors raised by a tournament service call
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Transport failure (connection refused, DNS, malformed URL, ...)
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("Unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    /// Response body is not the expected JSON
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ServiceError {
    /// HTTP status code, if the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            ServiceError::Status { status, .. } => Some(*status),
            ServiceError::Request(err) => err.status().map(|s| s.as_u16()),
            ServiceError::Decode(_) => None,
        }
    }
}

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_display() {
        let err = ServiceError::Status {
            status: 503,
            body: "maintenance".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("503"));
        assert!(msg.contains("maintenance"));
        assert_eq!(err.status(), Some(503));
    }

    #[test]
    fn test_decode_error_has_no_status() {
        let json_err = serde_json::from_str::<Vec<u8>>("not json").unwrap_err();
        let err = ServiceError::from(json_err);
        assert!(err.to_string().starts_with("Failed to decode response"));
        assert_eq!(err.status(), None);
    }
}
