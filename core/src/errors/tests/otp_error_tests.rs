//! Unit tests for OTP error types

use crate::errors::OtpError;

#[test]
fn test_error_messages() {
    assert_eq!(
        OtpError::invalid_input("identity").to_string(),
        "Invalid input: identity is required"
    );
    assert_eq!(OtpError::Expired.to_string(), "Passcode expired");

    let error = OtpError::DeliveryFailed {
        reason: "smtp down".to_string(),
    };
    assert!(error.to_string().contains("smtp down"));
}

#[test]
fn test_error_codes() {
    assert_eq!(OtpError::invalid_input("candidate").error_code(), "VALIDATION_ERROR");
    assert_eq!(OtpError::NotFound.error_code(), "OTP_NOT_FOUND");
    assert_eq!(OtpError::Expired.error_code(), "OTP_EXPIRED");
    assert_eq!(OtpError::Mismatch.error_code(), "OTP_MISMATCH");
    assert_eq!(
        OtpError::DeliveryFailed { reason: String::new() }.error_code(),
        "DELIVERY_FAILED"
    );
}

#[test]
fn test_only_delivery_failure_is_server_side() {
    assert!(OtpError::NotFound.is_client_error());
    assert!(OtpError::Mismatch.is_client_error());
    assert!(!OtpError::DeliveryFailed { reason: "x".into() }.is_client_error());
}
