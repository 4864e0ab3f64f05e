//! Mail Service Module
//!
//! This module provides the mail transports used to deliver one-time
//! passcodes, plus a mock implementation for development.
//!
//! ## Features
//!
//! - **Mail Service Trait**: Common interface for all mail providers
//! - **Mock Implementation**: Console output for development
//! - **HTTP API Support**: Production mail via a transactional-mail HTTP API
//! - **Notifier Adapter**: Plugs any transport into the OTP service
//! - **Security**: Recipient masking in logs

use gate_shared::config::{MailConfig, MailProvider};

use crate::InfrastructureError;

pub mod mail_service;
pub mod mock_mail;
pub mod notifier_adapter;

// HTTP mail API service (feature-gated)
#[cfg(feature = "http-mail")]
pub mod http_mail;

// Re-export commonly used types
pub use mail_service::MailService;
pub use mock_mail::MockMailService;
pub use notifier_adapter::{MailNotifier, OTP_SUBJECT};

#[cfg(feature = "http-mail")]
pub use http_mail::{HttpMailConfig, HttpMailService};

#[cfg(test)]
mod tests;

/// Create the configured mail service, failing instead of falling back
///
/// Production wiring uses this so a misconfigured transport stops startup
/// rather than silently printing passcodes to the console.
pub fn try_create_mail_service(
    config: &MailConfig,
) -> Result<Box<dyn MailService>, InfrastructureError> {
    match config.provider {
        MailProvider::Mock => Ok(Box::new(MockMailService::new())),
        #[cfg(feature = "http-mail")]
        MailProvider::Http => {
            let service = HttpMailService::new(HttpMailConfig::try_from(config)?)?;
            Ok(Box::new(service))
        }
        #[cfg(not(feature = "http-mail"))]
        MailProvider::Http => Err(InfrastructureError::Config(
            "HTTP mail provider requires the http-mail feature".to_string(),
        )),
    }
}

/// Create a mail service based on configuration
///
/// A transport that cannot be built falls back to the mock transport with
/// an error log. Meant for development; see [`try_create_mail_service`].
pub fn create_mail_service(config: &MailConfig) -> Box<dyn MailService> {
    try_create_mail_service(config).unwrap_or_else(|e| {
        tracing::error!("Failed to initialize {} mail service: {}", config.provider, e);
        tracing::warn!("Falling back to mock mail service");
        Box::new(MockMailService::new())
    })
}

/// Create the notifier the OTP service delivers through
pub fn create_mail_notifier(config: &MailConfig) -> MailNotifier {
    MailNotifier::new(create_mail_service(config))
}
