//! Business services containing domain logic and use cases.

pub mod otp;

// Re-export commonly used types
pub use otp::{
    CleanupResult, Clock, CodeGenerator, IssuedChallenge, ManualClock, Notifier,
    OtpCleanupConfig, OtpCleanupService, OtpService, OtpServiceConfig, SecureCodeGenerator,
    SystemClock,
};
