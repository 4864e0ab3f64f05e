//! HTTP Mail API Service Implementation
//!
//! This module delivers mail through a transactional-mail HTTP API. The
//! provider receives a JSON document `{from, to, subject, text}` with a bearer
//! API key, which is the common shape of hosted mail APIs.
//!
//! ## Features
//!
//! - Automatic retry logic with exponential backoff
//! - Rate limiting handling
//! - Per-request timeout
//! - Security: recipient masking in logs

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, info, warn};

use gate_shared::config::MailConfig;
use gate_shared::email::mask_email;

use super::mail_service::MailService;
use crate::InfrastructureError;

/// HTTP mail service configuration
#[derive(Clone)]
pub struct HttpMailConfig {
    /// Endpoint accepting the JSON mail document
    pub api_url: String,
    /// Bearer token for the endpoint
    pub api_key: String,
    /// Sender address
    pub from_address: String,
    /// Maximum attempts per message
    pub max_retries: u32,
    /// Initial retry delay in milliseconds
    pub retry_delay_ms: u64,
    /// Timeout for API requests in seconds
    pub request_timeout_secs: u64,
}

impl std::fmt::Debug for HttpMailConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpMailConfig")
            .field("api_url", &self.api_url)
            .field("api_key", &"***")
            .field("from_address", &self.from_address)
            .field("max_retries", &self.max_retries)
            .field("retry_delay_ms", &self.retry_delay_ms)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

impl TryFrom<&MailConfig> for HttpMailConfig {
    type Error = InfrastructureError;

    fn try_from(config: &MailConfig) -> Result<Self, Self::Error> {
        let api_url = config
            .api_url
            .clone()
            .ok_or_else(|| InfrastructureError::Config("MAIL_API_URL not set".to_string()))?;
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| InfrastructureError::Config("MAIL_API_KEY not set".to_string()))?;

        if !(api_url.starts_with("http://") || api_url.starts_with("https://")) {
            return Err(InfrastructureError::Config(
                "MAIL_API_URL must start with http:// or https://".to_string(),
            ));
        }

        Ok(Self {
            api_url,
            api_key,
            from_address: config.from_address.clone(),
            max_retries: config.max_retries,
            retry_delay_ms: config.retry_delay_ms,
            request_timeout_secs: config.request_timeout_secs,
        })
    }
}

/// Body posted to the mail API
#[derive(Debug, Serialize)]
struct OutboundMail<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    text: &'a str,
}

/// Fields we read back from a successful response; providers differ
#[derive(Debug, Default, Deserialize)]
struct MailReceipt {
    #[serde(default)]
    id: Option<String>,
    #[serde(default, rename = "messageId", alias = "message_id")]
    message_id: Option<String>,
}

/// Outcome of a single failed attempt
enum AttemptError {
    /// Worth another try (transport error, 429, 5xx)
    Retryable(String),
    /// Retrying cannot help (other 4xx)
    Fatal(String),
}

/// HTTP mail service implementation
pub struct HttpMailService {
    client: Client,
    config: HttpMailConfig,
}

impl HttpMailService {
    /// Create a new HTTP mail service
    pub fn new(config: HttpMailConfig) -> Result<Self, InfrastructureError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        info!(
            "HTTP mail service initialized for {} with sender {}",
            config.api_url,
            mask_email(&config.from_address)
        );

        Ok(Self { client, config })
    }

    async fn attempt(&self, mail: &OutboundMail<'_>) -> Result<String, AttemptError> {
        let response = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(&self.config.api_key)
            .json(mail)
            .send()
            .await
            .map_err(|e| AttemptError::Retryable(format!("transport error: {}", e)))?;

        let status = response.status();
        if status.is_success() {
            // An unparseable body still means the provider accepted the mail
            let receipt = response.json::<MailReceipt>().await.unwrap_or_default();
            let message_id = receipt
                .id
                .or(receipt.message_id)
                .unwrap_or_else(|| format!("http_{}", uuid::Uuid::new_v4()));
            return Ok(message_id);
        }

        let detail = response.text().await.unwrap_or_default();
        let reason = format!("provider returned {}: {}", status, detail.trim());

        if status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
            Err(AttemptError::Retryable(reason))
        } else {
            Err(AttemptError::Fatal(reason))
        }
    }

    /// Send mail with retry logic
    async fn send_with_retry(&self, mail: &OutboundMail<'_>) -> Result<String, InfrastructureError> {
        let max_attempts = self.config.max_retries.max(1);
        let mut attempts = 0;
        let mut delay = Duration::from_millis(self.config.retry_delay_ms);

        loop {
            attempts += 1;

            debug!(
                "Sending mail attempt {}/{} to {}",
                attempts,
                max_attempts,
                mask_email(mail.to)
            );

            match self.attempt(mail).await {
                Ok(message_id) => {
                    info!(
                        "Mail sent successfully to {} with id: {}",
                        mask_email(mail.to),
                        message_id
                    );
                    return Ok(message_id);
                }
                Err(AttemptError::Fatal(reason)) => {
                    error!("Mail provider rejected the request: {}", reason);
                    return Err(InfrastructureError::Mail(format!("Invalid request: {}", reason)));
                }
                Err(AttemptError::Retryable(reason)) => {
                    error!(
                        "Failed to send mail (attempt {}/{}): {}",
                        attempts, max_attempts, reason
                    );

                    if attempts >= max_attempts {
                        return Err(InfrastructureError::Mail(format!(
                            "Failed to send mail after {} attempts: {}",
                            max_attempts, reason
                        )));
                    }

                    warn!("Retrying mail delivery after {:?}", delay);
                    tokio::time::sleep(delay).await;
                    delay *= 2;
                }
            }
        }
    }
}

#[async_trait]
impl MailService for HttpMailService {
    async fn send_mail(&self, to: &str, subject: &str, body: &str) -> Result<String, InfrastructureError> {
        info!(
            "Sending mail to {} via HTTP API (body length: {} chars)",
            mask_email(to),
            body.len()
        );

        let mail = OutboundMail {
            from: &self.config.from_address,
            to,
            subject,
            text: body,
        };

        self.send_with_retry(&mail).await
    }

    fn provider_name(&self) -> &str {
        "HTTP"
    }
}
