//! One-time passcode configuration module

use serde::{Deserialize, Serialize};

use super::env_or;

/// Lifetime, shape and delivery policy of issued passcodes
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OtpConfig {
    /// Seconds a passcode stays valid after issuance
    #[serde(default = "default_ttl_seconds")]
    pub ttl_seconds: i64,

    /// Number of decimal digits in a passcode
    #[serde(default = "default_code_length")]
    pub code_length: usize,

    /// Upper bound on a single delivery attempt, in seconds
    #[serde(default = "default_delivery_timeout_seconds")]
    pub delivery_timeout_seconds: u64,

    /// Keep the issued passcode confirmable when delivery fails
    #[serde(default = "default_retain_on_delivery_failure")]
    pub retain_on_delivery_failure: bool,

    /// How often expired records are swept from memory (0 disables the sweeper)
    #[serde(default = "default_sweep_interval_seconds")]
    pub sweep_interval_seconds: u64,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: default_ttl_seconds(),
            code_length: default_code_length(),
            delivery_timeout_seconds: default_delivery_timeout_seconds(),
            retain_on_delivery_failure: default_retain_on_delivery_failure(),
            sweep_interval_seconds: default_sweep_interval_seconds(),
        }
    }
}

impl OtpConfig {
    /// Load OTP configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            ttl_seconds: env_or("OTP_TTL_SECONDS", default_ttl_seconds()),
            code_length: env_or("OTP_CODE_LENGTH", default_code_length()),
            delivery_timeout_seconds: env_or(
                "OTP_DELIVERY_TIMEOUT_SECONDS",
                default_delivery_timeout_seconds(),
            ),
            retain_on_delivery_failure: env_or(
                "OTP_RETAIN_ON_DELIVERY_FAILURE",
                default_retain_on_delivery_failure(),
            ),
            sweep_interval_seconds: env_or(
                "OTP_SWEEP_INTERVAL_SECONDS",
                default_sweep_interval_seconds(),
            ),
        }
    }

    /// Whether the background sweeper should run
    pub fn sweeper_enabled(&self) -> bool {
        self.sweep_interval_seconds > 0
    }
}

fn default_ttl_seconds() -> i64 {
    300  // 5 minutes
}

fn default_code_length() -> usize {
    6
}

fn default_delivery_timeout_seconds() -> u64 {
    30
}

fn default_retain_on_delivery_failure() -> bool {
    true
}

fn default_sweep_interval_seconds() -> u64 {
    60
}
