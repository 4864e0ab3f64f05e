//! OTP service module for email-based one-time passcodes
//!
//! This module provides the complete passcode workflow:
//! - Secure code generation
//! - Issuance with replacement of any outstanding code
//! - Delivery through an injected notifier, bounded by a timeout
//! - Single-use, constant-time confirmation with expiry
//! - Opportunistic sweeping of expired records

mod cleanup;
mod clock;
mod config;
mod generator;
mod service;
mod traits;
mod types;

#[cfg(test)]
mod tests;

pub use cleanup::{CleanupResult, OtpCleanupConfig, OtpCleanupService};
pub use clock::{ManualClock, SystemClock};
pub use config::{OtpServiceConfig, MAX_CODE_LENGTH, MAX_TTL_SECONDS, MIN_CODE_LENGTH};
pub use generator::SecureCodeGenerator;
pub use service::{compose_message, OtpService};
pub use traits::{Clock, CodeGenerator, Notifier};
pub use types::IssuedChallenge;
