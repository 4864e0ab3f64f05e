use actix_web::{web, HttpResponse};
use validator::Validate;

use gate_core::repositories::OtpStore;
use gate_core::services::otp::Notifier;
use gate_shared::email::mask_email;
use gate_shared::ApiResponse;

use crate::dto::otp::{SendOtpRequest, SendOtpResponse};
use crate::handlers::error::{handle_otp_error, validation_error_response, OtpOperation};

use super::AppState;

/// Handler for POST /send-otp
///
/// Issues a passcode for the address and mails it. Any earlier passcode for
/// the same address stops working.
///
/// # Request Body
///
/// ```json
/// {
///     "email": "jane@example.com",
///     "customMessage": "Welcome to Acme!"
/// }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "success": true,
///     "message": "OTP sent successfully!",
///     "expiresAt": "2024-05-01T12:05:00Z"
/// }
/// ```
///
/// ## Errors
/// - 400 Bad Request: missing or malformed email
/// - 500 Internal Server Error: the mail could not be delivered
pub async fn send_otp<N, S>(
    state: web::Data<AppState<N, S>>,
    request: web::Json<SendOtpRequest>,
) -> HttpResponse
where
    N: Notifier + 'static,
    S: OtpStore + 'static,
{
    let request = request.into_inner();

    // Blank input is the service's call; only judge the shape of what was sent
    if !request.email.trim().is_empty() {
        if let Err(errors) = request.validate() {
            log::warn!(
                "Validation failed for send_otp request for {}: {:?}",
                mask_email(&request.email),
                errors.field_errors().keys().collect::<Vec<_>>()
            );
            return validation_error_response(OtpOperation::Send, &errors);
        }
    }

    match state
        .otp_service
        .request_otp(&request.email, request.custom_message.as_deref())
        .await
    {
        Ok(challenge) => {
            log::info!(
                "OTP sent to {}, delivery id: {}",
                mask_email(&challenge.identity),
                challenge.delivery_id
            );
            HttpResponse::Ok().json(ApiResponse::success(
                "OTP sent successfully!",
                SendOtpResponse {
                    expires_at: challenge.expires_at,
                },
            ))
        }
        Err(error) => handle_otp_error(&error, OtpOperation::Send),
    }
}
