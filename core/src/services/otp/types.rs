//! Types for OTP service results

use chrono::{DateTime, Utc};

/// Result of issuing a passcode
///
/// Deliberately carries no passcode: the code travels only through the
/// notifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedChallenge {
    /// The identity the passcode was issued for
    pub identity: String,
    /// When the passcode was issued
    pub issued_at: DateTime<Utc>,
    /// When the passcode stops being accepted
    pub expires_at: DateTime<Utc>,
    /// Delivery id reported by the notifier
    pub delivery_id: String,
}
