//! Mail Service Interface
//!
//! Defines the trait for mail transports that deliver passcodes and other
//! transactional messages.

use async_trait::async_trait;
use crate::InfrastructureError;

/// Mail service trait for sending plain-text email
///
/// Implementations include:
/// - HTTP transactional mail API
/// - Mock implementation for development
#[async_trait]
pub trait MailService: Send + Sync {
    /// Send a plain-text email
    ///
    /// # Arguments
    ///
    /// * `to` - The recipient address
    /// * `subject` - The subject line
    /// * `body` - The plain-text body
    ///
    /// # Returns
    ///
    /// * `Ok(message_id)` - Unique identifier for the sent message
    /// * `Err(InfrastructureError)` - If sending fails
    ///
    /// # Example
    ///
    /// ```ignore
    /// let service = MockMailService::new();
    /// let message_id = service.send_mail("jane@example.com", "Hello", "Hi Jane").await?;
    /// ```
    async fn send_mail(&self, to: &str, subject: &str, body: &str) -> Result<String, InfrastructureError>;

    /// Get the service provider name
    fn provider_name(&self) -> &str;

    /// Check if the service is available
    ///
    /// Default implementation always returns true.
    async fn is_available(&self) -> bool {
        true
    }
}

