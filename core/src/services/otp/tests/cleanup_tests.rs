//! Tests for the passcode sweeper

use chrono::{Duration, Utc};
use std::sync::Arc;

use crate::domain::entities::otp_record::OtpRecord;
use crate::repositories::otp::{InMemoryOtpStore, OtpStore};
use crate::services::otp::{CleanupResult, ManualClock, OtpCleanupConfig, OtpCleanupService};

fn seeded_store(clock: &ManualClock) -> Arc<InMemoryOtpStore> {
    use crate::services::otp::Clock;

    let now = clock.now();
    let store = Arc::new(InMemoryOtpStore::new());
    store.put("short@x.com", OtpRecord::issue("111111".into(), now, Duration::seconds(30)));
    store.put("long@x.com", OtpRecord::issue("222222".into(), now, Duration::seconds(300)));
    store
}

#[test]
fn test_run_cleanup_purges_only_expired_records() {
    let clock = Arc::new(ManualClock::new(Utc::now()));
    let store = seeded_store(&clock);
    let sweeper = OtpCleanupService::new(store.clone(), OtpCleanupConfig::default())
        .with_clock(clock.clone());

    assert_eq!(
        sweeper.run_cleanup(),
        CleanupResult {
            expired_records_purged: 0,
            remaining: 2
        }
    );

    clock.advance(Duration::seconds(31));
    let result = sweeper.run_cleanup();

    assert_eq!(result.expired_records_purged, 1);
    assert_eq!(result.remaining, 1);
    assert!(store.get("short@x.com").is_none());
    assert!(store.get("long@x.com").is_some());
}

#[test]
fn test_disabled_cleanup_is_a_no_op() {
    let clock = Arc::new(ManualClock::new(Utc::now()));
    let store = seeded_store(&clock);
    let config = OtpCleanupConfig {
        enabled: false,
        ..OtpCleanupConfig::default()
    };
    let sweeper = OtpCleanupService::new(store.clone(), config).with_clock(clock.clone());

    clock.advance(Duration::hours(1));

    assert_eq!(sweeper.run_cleanup(), CleanupResult::default());
    assert_eq!(store.len(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_background_task_sweeps_on_interval() {
    let clock = Arc::new(ManualClock::new(Utc::now()));
    let store = seeded_store(&clock);
    let config = OtpCleanupConfig {
        interval_seconds: 10,
        enabled: true,
    };
    let sweeper = Arc::new(OtpCleanupService::new(store.clone(), config).with_clock(clock.clone()));

    clock.advance(Duration::minutes(10));
    sweeper.start_background_task();

    // First tick fires immediately; give the spawned task a chance to run
    tokio::time::sleep(std::time::Duration::from_secs(1)).await;

    assert!(store.is_empty());
}

#[test]
fn test_config_from_shared() {
    let mut shared = gate_shared::OtpConfig::default();
    shared.sweep_interval_seconds = 0;
    assert!(!OtpCleanupConfig::from(&shared).enabled);

    shared.sweep_interval_seconds = 45;
    let config = OtpCleanupConfig::from(&shared);
    assert!(config.enabled);
    assert_eq!(config.interval_seconds, 45);
}
