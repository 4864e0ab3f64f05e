//! # OTP Gate Core
//!
//! Core business logic for issuing and confirming email one-time passcodes.
//! This crate contains the `OtpRecord` entity, the store abstraction with its
//! in-memory implementation, the OTP service and the error taxonomy.
//! It performs no I/O of its own: delivery goes through the injected
//! [`Notifier`](services::otp::Notifier).

pub mod domain;
pub mod services;
pub mod repositories;
pub mod errors;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::{InMemoryOtpStore, OtpStore};
pub use services::{
    CleanupResult, Clock, CodeGenerator, IssuedChallenge, ManualClock, Notifier,
    OtpCleanupConfig, OtpCleanupService, OtpService, OtpServiceConfig, SecureCodeGenerator,
    SystemClock,
};
