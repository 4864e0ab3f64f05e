//! Configuration for the OTP service

use chrono::Duration;
use gate_shared::OtpConfig;

use crate::domain::entities::otp_record::{CODE_LENGTH, DEFAULT_TTL_SECONDS};

/// Shortest passcode the service will issue
pub const MIN_CODE_LENGTH: usize = 4;

/// Longest passcode the service will issue
pub const MAX_CODE_LENGTH: usize = 9;

/// Longest lifetime a passcode may be given (one day)
pub const MAX_TTL_SECONDS: i64 = 24 * 60 * 60;

/// Configuration for the OTP service
#[derive(Debug, Clone)]
pub struct OtpServiceConfig {
    /// Seconds before an issued passcode expires
    pub ttl_seconds: i64,
    /// Number of digits in a passcode
    pub code_length: usize,
    /// Upper bound on a single notifier call
    pub delivery_timeout: std::time::Duration,
    /// Keep the passcode confirmable when delivery fails
    pub retain_on_delivery_failure: bool,
}

impl Default for OtpServiceConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: DEFAULT_TTL_SECONDS,
            code_length: CODE_LENGTH,
            delivery_timeout: std::time::Duration::from_secs(30),
            retain_on_delivery_failure: true,
        }
    }
}

impl OtpServiceConfig {
    /// Passcode lifetime, clamped to `1..=MAX_TTL_SECONDS`
    pub fn ttl(&self) -> Duration {
        Duration::seconds(self.effective_ttl_seconds())
    }

    /// Lifetime in seconds within the supported range
    pub fn effective_ttl_seconds(&self) -> i64 {
        self.ttl_seconds.clamp(1, MAX_TTL_SECONDS)
    }

    /// Code length clamped to the supported range
    pub fn effective_code_length(&self) -> usize {
        self.code_length.clamp(MIN_CODE_LENGTH, MAX_CODE_LENGTH)
    }

    /// Human-friendly lifetime used in outgoing messages ("5 minutes")
    pub fn ttl_display(&self) -> String {
        let seconds = self.effective_ttl_seconds();
        if seconds >= 60 && seconds % 60 == 0 {
            match seconds / 60 {
                1 => "1 minute".to_string(),
                minutes => format!("{} minutes", minutes),
            }
        } else if seconds == 1 {
            "1 second".to_string()
        } else {
            format!("{} seconds", seconds)
        }
    }
}

impl From<&OtpConfig> for OtpServiceConfig {
    fn from(config: &OtpConfig) -> Self {
        Self {
            ttl_seconds: config.ttl_seconds,
            code_length: config.code_length,
            delivery_timeout: std::time::Duration::from_secs(config.delivery_timeout_seconds),
            retain_on_delivery_failure: config.retain_on_delivery_failure,
        }
    }
}
