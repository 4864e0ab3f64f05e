//! Shared utilities and common types for the OTP Gate server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types loaded from the environment
//! - Error and response envelopes for the HTTP layer
//! - Email validation and masking helpers

pub mod config;
pub mod errors;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{AppConfig, Environment, MailConfig, OtpConfig, ServerConfig, CorsConfig};
pub use errors::{ErrorResponse, error_codes};
pub use types::{ApiResponse, HealthResponse, HealthStatus};
pub use utils::{email, validation};
