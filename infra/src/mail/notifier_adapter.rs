//! Mail Notifier Adapter
//!
//! This module provides an adapter that implements the core `Notifier` trait
//! for any mail transport, bridging the infrastructure implementation with
//! the OTP service.

use async_trait::async_trait;
use gate_core::services::otp::Notifier;

use super::mail_service::MailService;

/// Subject line of passcode mail
pub const OTP_SUBJECT: &str = "Your OTP Code";

/// Adapter that delivers passcode messages as email
pub struct MailNotifier {
    inner: Box<dyn MailService>,
    subject: String,
}

impl MailNotifier {
    /// Wrap a mail transport with the default subject
    pub fn new(inner: Box<dyn MailService>) -> Self {
        Self {
            inner,
            subject: OTP_SUBJECT.to_string(),
        }
    }

    /// Override the subject line
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = subject.into();
        self
    }

    /// Name of the underlying transport
    pub fn provider_name(&self) -> &str {
        self.inner.provider_name()
    }
}

#[async_trait]
impl Notifier for MailNotifier {
    async fn deliver(&self, identity: &str, message: &str) -> Result<String, String> {
        self.inner
            .send_mail(identity, &self.subject, message)
            .await
            .map_err(|e| e.to_string())
    }
}
