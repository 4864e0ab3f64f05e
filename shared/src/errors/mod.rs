//! Shared error types and response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Standard error response structure used across all API endpoints
///
/// `success` is always `false`; it keeps error bodies shaped like the success
/// envelope so clients can branch on a single field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Always false for errors
    pub success: bool,

    /// Error code for client identification
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// Additional error details (field errors, etc.)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, serde_json::Value>>,

    /// Timestamp when the error occurred
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    /// Create a new error response
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
            message: message.into(),
            details: None,
            timestamp: Utc::now(),
        }
    }

    /// Add a detail field to the error response
    pub fn add_detail(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        let details = self.details.get_or_insert_with(HashMap::new);
        if let Ok(json_value) = serde_json::to_value(value) {
            details.insert(key.into(), json_value);
        }
        self
    }
}

/// Common error codes used across the application
pub mod error_codes {
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const BAD_REQUEST: &str = "BAD_REQUEST";
    pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";
    pub const HTTPS_REQUIRED: &str = "HTTPS_REQUIRED";
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const OTP_NOT_FOUND: &str = "OTP_NOT_FOUND";
    pub const OTP_EXPIRED: &str = "OTP_EXPIRED";
    pub const OTP_MISMATCH: &str = "OTP_MISMATCH";
    pub const DELIVERY_FAILED: &str = "DELIVERY_FAILED";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response_with_detail() {
        let response = ErrorResponse::new(error_codes::VALIDATION_ERROR, "Email required")
            .add_detail("field", "email");

        assert!(!response.success);
        assert_eq!(response.error, "VALIDATION_ERROR");
        assert_eq!(response.details.unwrap()["field"], "email");
    }

    #[test]
    fn test_error_response_skips_empty_details() {
        let json = serde_json::to_string(&ErrorResponse::new("X", "y")).unwrap();
        assert!(!json.contains("details"));
        assert!(json.contains("\"success\":false"));
    }
}
