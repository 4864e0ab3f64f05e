//! Traits for the collaborators the OTP service depends on

use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Delivery channel for issued passcodes (mail transport, console, ...)
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver `message` to `identity`, returning a provider delivery id
    async fn deliver(&self, identity: &str, message: &str) -> Result<String, String>;
}

/// Source of passcodes
pub trait CodeGenerator: Send + Sync {
    /// Produce a zero-padded decimal code of exactly `length` digits
    fn generate(&self, length: usize) -> String;
}

/// Source of the current time
pub trait Clock: Send + Sync {
    /// Current instant
    fn now(&self) -> DateTime<Utc>;
}
