//! One-time passcode record for email-based verification.

use chrono::{DateTime, Duration, Utc};
use constant_time_eq::constant_time_eq;
use std::fmt;

/// Length of the canonical passcode
pub const CODE_LENGTH: usize = 6;

/// Default lifetime of a passcode (5 minutes)
pub const DEFAULT_TTL_SECONDS: i64 = 300;

/// One outstanding challenge for one identity
///
/// A record carries no identifier of its own: it is owned by the store under
/// the identity it was issued for.
#[derive(Clone, PartialEq, Eq)]
pub struct OtpRecord {
    /// The zero-padded decimal passcode
    pub code: String,

    /// Timestamp when the passcode was issued
    pub issued_at: DateTime<Utc>,

    /// Timestamp after which the passcode is no longer accepted
    pub expires_at: DateTime<Utc>,
}

impl OtpRecord {
    /// Creates a record issued at `now` that lives for `ttl`
    pub fn issue(code: String, now: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            code,
            issued_at: now,
            expires_at: now + ttl,
        }
    }

    /// Checks if the record has expired at the given instant
    ///
    /// The record is still valid at exactly `expires_at`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    /// Compares a candidate against the stored passcode in constant time
    pub fn matches(&self, candidate: &str) -> bool {
        if self.code.len() != candidate.len() {
            return false;
        }
        constant_time_eq(self.code.as_bytes(), candidate.as_bytes())
    }
}

// The passcode never shows up in logs or panic messages.
impl fmt::Debug for OtpRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OtpRecord")
            .field("code", &"******")
            .field("issued_at", &self.issued_at)
            .field("expires_at", &self.expires_at)
            .finish()
    }
}
