//! Store trait defining the interface for outstanding passcode records.

use chrono::{DateTime, Utc};

use crate::domain::entities::otp_record::OtpRecord;

/// Table mapping an identity to at most one outstanding [`OtpRecord`]
///
/// Operations are synchronous and never fail: the store is a volatile
/// in-process structure. Implementations must serialize access per identity
/// at minimum, and must never hold their lock across an await point since
/// no method is async.
///
/// Expiry is judged by the caller against its own clock; `get` returns a
/// record regardless of expiry.
pub trait OtpStore: Send + Sync {
    /// Unconditional upsert, replacing any existing record for `identity`
    fn put(&self, identity: &str, record: OtpRecord);

    /// Current record for `identity`, expired or not
    fn get(&self, identity: &str) -> Option<OtpRecord>;

    /// Remove the record for `identity` if present; no-op otherwise
    fn delete(&self, identity: &str);

    /// Run `f` against the slot for `identity` under exclusive access
    ///
    /// Setting the slot to `None` removes the record, setting it to `Some`
    /// stores it. This is what makes look up, expiry check, compare and
    /// consume a single atomic step.
    fn with_entry<R, F>(&self, identity: &str, f: F) -> R
    where
        F: FnOnce(&mut Option<OtpRecord>) -> R;

    /// Drop every record that has expired at `now`, returning how many went
    fn purge_expired(&self, now: DateTime<Utc>) -> usize;

    /// Number of records currently held, expired ones included
    fn len(&self) -> usize;

    /// Whether the store holds no records
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
