//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for the OTP Gate service.
//! It provides the concrete delivery channels behind the core `Notifier`.
//!
//! ## Architecture
//!
//! The infrastructure layer contains:
//! - **Mail**: mail transports (console mock, HTTP mail API) and the adapter
//!   that turns any of them into a core notifier
//!
//! ## Features
//!
//! - `http-mail`: Enable the HTTP mail API transport (default)

/// Mail service module - mail transports and the notifier adapter
pub mod mail;

/// Configuration module for infrastructure services
pub mod config {
    //! Configuration management for infrastructure services
    //!
    //! Handles mail transport credentials and provider selection.

    pub use gate_shared::config::{MailConfig, MailProvider};

    /// Infrastructure configuration settings
    #[derive(Debug, Clone, Default)]
    pub struct InfrastructureConfig {
        /// Mail transport configuration
        pub mail: MailConfig,
    }
}

/// Load infrastructure configuration from environment
pub fn load_config() -> Result<config::InfrastructureConfig, InfrastructureError> {
    dotenvy::dotenv().ok(); // Load .env file if present

    let mail = config::MailConfig::from_env();

    if let Some(url) = mail.api_url.as_deref() {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(InfrastructureError::Config(format!(
                "MAIL_API_URL must be an http(s) URL, got '{}'",
                url
            )));
        }
    }

    Ok(config::InfrastructureConfig { mail })
}

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Mail service error
    #[error("Mail service error: {0}")]
    Mail(String),

    /// General infrastructure error
    #[error("Infrastructure error: {0}")]
    General(String),
}
