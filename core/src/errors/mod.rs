//! Domain-specific error types and error handling.

use gate_shared::error_codes;
use thiserror::Error;

/// Outcome of a failed OTP operation
///
/// Every variant is a per-request outcome the caller can recover from:
/// correct the input, retry the code, or request a new one.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OtpError {
    /// Missing or blank caller argument
    #[error("Invalid input: {field} is required")]
    InvalidInput { field: String },

    /// No outstanding challenge for the identity
    #[error("No outstanding passcode for this identity")]
    NotFound,

    /// The challenge existed but its lifetime lapsed
    #[error("Passcode expired")]
    Expired,

    /// Wrong code; the challenge stays pending
    #[error("Passcode does not match")]
    Mismatch,

    /// The notifier failed or timed out
    #[error("Passcode delivery failed: {reason}")]
    DeliveryFailed { reason: String },
}

impl OtpError {
    /// Shorthand for an `InvalidInput` on the given field
    pub fn invalid_input(field: impl Into<String>) -> Self {
        OtpError::InvalidInput { field: field.into() }
    }

    /// Machine-readable error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            OtpError::InvalidInput { .. } => error_codes::VALIDATION_ERROR,
            OtpError::NotFound => error_codes::OTP_NOT_FOUND,
            OtpError::Expired => error_codes::OTP_EXPIRED,
            OtpError::Mismatch => error_codes::OTP_MISMATCH,
            OtpError::DeliveryFailed { .. } => error_codes::DELIVERY_FAILED,
        }
    }

    /// Whether the caller, not the system, is at fault
    pub fn is_client_error(&self) -> bool {
        !matches!(self, OtpError::DeliveryFailed { .. })
    }
}

pub type OtpResult<T> = Result<T, OtpError>;

#[cfg(test)]
mod tests;
