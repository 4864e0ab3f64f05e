use actix_web::{web, HttpResponse};
use validator::Validate;

use gate_core::repositories::OtpStore;
use gate_core::services::otp::Notifier;
use gate_shared::ApiResponse;

use crate::dto::otp::VerifyOtpRequest;
use crate::handlers::error::{handle_otp_error, validation_error_response, OtpOperation};

use super::AppState;

/// Handler for POST /verify-otp
///
/// Checks the passcode for the address. A correct passcode is consumed and
/// cannot be used again; a wrong one leaves it pending until it expires.
///
/// # Request Body
///
/// ```json
/// {
///     "email": "jane@example.com",
///     "otp": "042613"
/// }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// { "success": true, "message": "OTP verified successfully!" }
/// ```
///
/// ## Errors
/// - 400 Bad Request: missing input, no passcode, expired or wrong passcode
pub async fn verify_otp<N, S>(
    state: web::Data<AppState<N, S>>,
    request: web::Json<VerifyOtpRequest>,
) -> HttpResponse
where
    N: Notifier + 'static,
    S: OtpStore + 'static,
{
    if let Err(errors) = request.validate() {
        return validation_error_response(OtpOperation::Verify, &errors);
    }

    match state.otp_service.confirm_otp(&request.email, &request.otp) {
        Ok(()) => HttpResponse::Ok().json(ApiResponse::ok("OTP verified successfully!")),
        Err(error) => handle_otp_error(&error, OtpOperation::Verify),
    }
}
