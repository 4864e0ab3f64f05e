//! Mail transport configuration module

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{env_opt, env_or};

/// Which mail transport delivers passcodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MailProvider {
    /// Print mails to the console (development)
    Mock,
    /// Transactional mail HTTP API
    Http,
}

impl FromStr for MailProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mock" | "console" => Ok(MailProvider::Mock),
            "http" | "api" => Ok(MailProvider::Http),
            _ => Err(format!("Invalid mail provider: {}", s)),
        }
    }
}

impl fmt::Display for MailProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MailProvider::Mock => write!(f, "mock"),
            MailProvider::Http => write!(f, "http"),
        }
    }
}

/// Mail transport configuration
#[derive(Clone, Deserialize, Serialize)]
pub struct MailConfig {
    /// Transport provider
    pub provider: MailProvider,

    /// Endpoint of the transactional mail API (http provider only)
    #[serde(default)]
    pub api_url: Option<String>,

    /// Bearer credential for the mail API
    #[serde(default)]
    pub api_key: Option<String>,

    /// Sender address
    pub from_address: String,

    /// Maximum retry attempts for transient failures
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Initial retry delay in milliseconds (doubled on every retry)
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,

    /// Timeout for a single API request in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            provider: MailProvider::Mock,
            api_url: None,
            api_key: None,
            from_address: default_from_address(),
            max_retries: default_max_retries(),
            retry_delay_ms: default_retry_delay_ms(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

// The API key stays out of debug output.
impl fmt::Debug for MailConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MailConfig")
            .field("provider", &self.provider)
            .field("api_url", &self.api_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("from_address", &self.from_address)
            .field("max_retries", &self.max_retries)
            .field("retry_delay_ms", &self.retry_delay_ms)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

impl MailConfig {
    /// Load mail configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            provider: env_or("MAIL_PROVIDER", MailProvider::Mock),
            api_url: env_opt("MAIL_API_URL"),
            api_key: env_opt("MAIL_API_KEY"),
            from_address: env_opt("MAIL_FROM").unwrap_or_else(default_from_address),
            max_retries: env_or("MAIL_MAX_RETRIES", default_max_retries()),
            retry_delay_ms: env_or("MAIL_RETRY_DELAY_MS", default_retry_delay_ms()),
            request_timeout_secs: env_or(
                "MAIL_REQUEST_TIMEOUT_SECS",
                default_request_timeout_secs(),
            ),
        }
    }

    /// Whether the HTTP provider has everything it needs
    pub fn has_http_credentials(&self) -> bool {
        self.api_url.is_some() && self.api_key.is_some()
    }
}

fn default_from_address() -> String {
    String::from("no-reply@localhost")
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_delay_ms() -> u64 {
    1000
}

fn default_request_timeout_secs() -> u64 {
    10
}
