//! In-memory passcode store guarded by a single mutex.

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::domain::entities::otp_record::OtpRecord;

use super::r#trait::OtpStore;

/// Volatile store holding one record per identity
///
/// One global lock around the whole map. Each operation holds it only for
/// the duration of a map access, so contention stays negligible at the
/// scale of a single process. Restarting the process loses every
/// outstanding passcode; clients re-request.
#[derive(Debug, Default)]
pub struct InMemoryOtpStore {
    records: Mutex<HashMap<String, OtpRecord>>,
}

impl InMemoryOtpStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, OtpRecord>> {
        // A panic inside a critical section cannot leave a half-written map:
        // every mutation is a single insert or remove.
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl OtpStore for InMemoryOtpStore {
    fn put(&self, identity: &str, record: OtpRecord) {
        self.lock().insert(identity.to_string(), record);
    }

    fn get(&self, identity: &str) -> Option<OtpRecord> {
        self.lock().get(identity).cloned()
    }

    fn delete(&self, identity: &str) {
        self.lock().remove(identity);
    }

    fn with_entry<R, F>(&self, identity: &str, f: F) -> R
    where
        F: FnOnce(&mut Option<OtpRecord>) -> R,
    {
        let mut records = self.lock();
        let mut slot = records.remove(identity);
        let result = f(&mut slot);
        if let Some(record) = slot {
            records.insert(identity.to_string(), record);
        }
        result
    }

    fn purge_expired(&self, now: DateTime<Utc>) -> usize {
        let mut records = self.lock();
        let before = records.len();
        records.retain(|_, record| !record.is_expired_at(now));
        before - records.len()
    }

    fn len(&self) -> usize {
        self.lock().len()
    }
}
