//! Application state and factory
//!
//! This module provides the factory for creating the Actix-web application
//! around an already wired OTP service.

use actix_web::{middleware::Logger, web, App, HttpResponse};
use chrono::Utc;

use crate::handlers::error::json_error_handler;
use crate::middleware::{cors::create_cors, security::SecurityMiddleware};
use crate::routes::otp::{send_otp, verify_otp, AppState};

use gate_core::repositories::OtpStore;
use gate_core::services::otp::Notifier;
use gate_shared::{error_codes, CorsConfig, Environment, ErrorResponse, HealthResponse, HealthStatus};

/// HTTP-level settings the factory needs besides the service itself
#[derive(Debug, Clone)]
pub struct HttpSettings {
    pub environment: Environment,
    pub cors: CorsConfig,
    /// Largest accepted JSON body in bytes
    pub max_payload_size: usize,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            environment: Environment::Development,
            cors: CorsConfig::development(),
            max_payload_size: 16 * 1024,
        }
    }
}

/// Create and configure the application with all dependencies
///
/// The passcode endpoints are mounted at the root (`/send-otp`,
/// `/verify-otp`) and again under `/api/v1/otp`.
pub fn create_app<N, S>(
    app_state: web::Data<AppState<N, S>>,
    settings: &HttpSettings,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    N: Notifier + 'static,
    S: OtpStore + 'static,
{
    let cors = create_cors(&settings.cors);
    let security = SecurityMiddleware::for_environment(settings.environment);

    let json_config = web::JsonConfig::default()
        .limit(settings.max_payload_size)
        .error_handler(json_error_handler);

    App::new()
        // Add application state
        .app_data(app_state)
        .app_data(json_config)

        // Add middleware (last wrapped runs first: security, then CORS, then logging)
        .wrap(Logger::default())
        .wrap(cors)
        .wrap(security)

        // Health check endpoint
        .route("/health", web::get().to(health_check::<N, S>))

        // Passcode routes
        .route("/send-otp", web::post().to(send_otp::<N, S>))
        .route("/verify-otp", web::post().to(verify_otp::<N, S>))

        // API v1 routes
        .service(
            web::scope("/api/v1")
                .service(
                    web::scope("/otp")
                        .route("/send", web::post().to(send_otp::<N, S>))
                        .route("/verify", web::post().to(verify_otp::<N, S>)),
                )
                // API documentation endpoint
                .route("/", web::get().to(api_documentation)),
        )

        // Default 404 handler
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
async fn health_check<N, S>(state: web::Data<AppState<N, S>>) -> HttpResponse
where
    N: Notifier + 'static,
    S: OtpStore + 'static,
{
    HttpResponse::Ok().json(HealthResponse {
        status: HealthStatus::Healthy,
        service: "otp-gate".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        outstanding_otps: state.otp_service.store().len(),
        timestamp: Utc::now(),
    })
}

/// API documentation endpoint
async fn api_documentation() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "message": "OTP Gate API v1",
        "endpoints": {
            "health": "/health",
            "otp": {
                "send": {
                    "path": "/api/v1/otp/send",
                    "alias": "/send-otp",
                    "method": "POST",
                    "description": "Mail a one-time passcode to an email address",
                    "request_body": {
                        "email": "string (email address)",
                        "customMessage": "string (optional, max 1000 chars)"
                    },
                    "responses": {
                        "200": "OTP sent, returns expiresAt",
                        "400": "Email missing or malformed",
                        "500": "Mail delivery failed"
                    }
                },
                "verify": {
                    "path": "/api/v1/otp/verify",
                    "alias": "/verify-otp",
                    "method": "POST",
                    "description": "Verify and consume a one-time passcode",
                    "request_body": {
                        "email": "string",
                        "otp": "string"
                    },
                    "responses": {
                        "200": "OTP verified",
                        "400": "Missing input, no OTP, expired or invalid OTP"
                    }
                }
            }
        }
    }))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    ))
}
