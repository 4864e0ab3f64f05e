//! CORS middleware configuration for cross-origin requests.
//!
//! Browser clients post to the passcode endpoints from other origins (a
//! sign-up page, a checkout form). Development is permissive; production only
//! admits the origins listed in `ALLOWED_ORIGINS`.

use actix_cors::Cors;
use actix_web::http::{header, Method};

use gate_shared::CorsConfig;

/// Creates a CORS middleware instance from the loaded configuration.
///
/// A `*` entry in the allowed origins admits any origin.
pub fn create_cors(config: &CorsConfig) -> Cors {
    if config.allows_any_origin() {
        create_permissive_cors(config.max_age)
    } else {
        create_restricted_cors(config)
    }
}

/// Creates CORS configuration that admits any origin.
fn create_permissive_cors(max_age: usize) -> Cors {
    log::info!("Configuring permissive CORS (any origin)");

    Cors::default()
        .allow_any_origin()
        .allowed_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allowed_headers(vec![
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::ORIGIN,
            header::USER_AGENT,
            header::HeaderName::from_static("x-requested-with"),
        ])
        .max_age(max_age)
}

/// Creates CORS configuration restricted to the configured origins.
fn create_restricted_cors(config: &CorsConfig) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allowed_headers(vec![header::ACCEPT, header::CONTENT_TYPE])
        .max_age(config.max_age);

    for origin in config.allowed_origins.iter().map(|s| s.trim()) {
        if !origin.is_empty() {
            log::info!("Adding allowed origin: {}", origin);
            cors = cors.allowed_origin(origin);
        }
    }

    cors
}
