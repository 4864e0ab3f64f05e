//! Mapping of domain errors onto HTTP responses

use actix_web::{error::JsonPayloadError, HttpRequest, HttpResponse};
use gate_core::errors::OtpError;
use gate_shared::{error_codes, ErrorResponse};

/// Which endpoint produced the error; input errors are worded per endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OtpOperation {
    Send,
    Verify,
}

impl OtpOperation {
    /// Message for missing or unusable input
    pub fn invalid_input_message(self) -> &'static str {
        match self {
            OtpOperation::Send => "Email required",
            OtpOperation::Verify => "Email and OTP required",
        }
    }
}

/// Handle OTP errors and convert them to appropriate HTTP responses
///
/// Delivery failures are the only server-side outcome; everything else is a
/// 400 the client can act on.
pub fn handle_otp_error(error: &OtpError, operation: OtpOperation) -> HttpResponse {
    let response = ErrorResponse::new(error.error_code(), public_message(error, operation));

    if error.is_client_error() {
        log::warn!("OTP request rejected: {}", error);
        HttpResponse::BadRequest().json(response)
    } else {
        log::error!("OTP request failed: {}", error);
        HttpResponse::InternalServerError().json(response)
    }
}

fn public_message(error: &OtpError, operation: OtpOperation) -> &'static str {
    match error {
        OtpError::InvalidInput { .. } => operation.invalid_input_message(),
        OtpError::NotFound => "No OTP found for this email",
        OtpError::Expired => "OTP expired",
        OtpError::Mismatch => "Invalid OTP",
        OtpError::DeliveryFailed { .. } => "Error sending OTP",
    }
}

/// Response for a request body that failed DTO validation
pub fn validation_error_response(
    operation: OtpOperation,
    errors: &validator::ValidationErrors,
) -> HttpResponse {
    let fields: Vec<&str> = errors.field_errors().keys().copied().collect();
    HttpResponse::BadRequest().json(
        ErrorResponse::new(error_codes::VALIDATION_ERROR, operation.invalid_input_message())
            .add_detail("fields", fields),
    )
}

/// Turn unparseable JSON bodies into the standard error envelope
pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    log::warn!("Rejected body for {} {}: {}", req.method(), req.path(), err);

    let response = HttpResponse::BadRequest().json(ErrorResponse::new(
        error_codes::BAD_REQUEST,
        "Request body must be valid JSON",
    ));
    actix_web::error::InternalError::from_response(err, response).into()
}
