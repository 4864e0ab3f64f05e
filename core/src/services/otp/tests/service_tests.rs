//! Unit tests for the OTP service

use chrono::{Duration, TimeZone, Utc};
use std::sync::Arc;

use crate::errors::OtpError;
use crate::repositories::otp::{InMemoryOtpStore, OtpStore};
use crate::services::otp::{compose_message, Clock, ManualClock, OtpService, OtpServiceConfig};

use super::mocks::{DeliveryMode, FixedCodeGenerator, MockNotifier};

struct Harness {
    service: OtpService<MockNotifier, InMemoryOtpStore>,
    notifier: Arc<MockNotifier>,
    store: Arc<InMemoryOtpStore>,
    clock: Arc<ManualClock>,
}

fn harness(notifier: MockNotifier, codes: &[&str], config: OtpServiceConfig) -> Harness {
    let notifier = Arc::new(notifier);
    let store = Arc::new(InMemoryOtpStore::new());
    let clock = Arc::new(ManualClock::new(
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
    ));
    let service = OtpService::new(notifier.clone(), store.clone(), config)
        .with_generator(Arc::new(FixedCodeGenerator::new(codes)))
        .with_clock(clock.clone());

    Harness {
        service,
        notifier,
        store,
        clock,
    }
}

fn default_harness(codes: &[&str]) -> Harness {
    harness(MockNotifier::new(), codes, OtpServiceConfig::default())
}

#[tokio::test]
async fn test_request_otp_success() {
    let h = default_harness(&["123456"]);
    let issued_at = h.clock.now();

    let challenge = h.service.request_otp("a@x.com", None).await.unwrap();

    assert_eq!(challenge.identity, "a@x.com");
    assert_eq!(challenge.issued_at, issued_at);
    assert_eq!(challenge.expires_at, issued_at + Duration::seconds(300));
    assert!(challenge.delivery_id.starts_with("mock-msg-"));

    assert_eq!(
        h.notifier.last_message("a@x.com").as_deref(),
        Some("Your OTP is: 123456. It is valid for 5 minutes.")
    );
    assert!(h.service.has_pending("a@x.com"));
}

#[tokio::test]
async fn test_challenge_never_exposes_code() {
    let h = default_harness(&["987654"]);

    let challenge = h.service.request_otp("a@x.com", None).await.unwrap();

    assert!(!format!("{:?}", challenge).contains("987654"));
}

#[tokio::test]
async fn test_request_otp_with_custom_message() {
    let h = default_harness(&["123456"]);

    h.service
        .request_otp("a@x.com", Some("Welcome to Acme!"))
        .await
        .unwrap();

    assert_eq!(
        h.notifier.last_message("a@x.com").as_deref(),
        Some("Welcome to Acme!\n\nYour OTP is: 123456. It is valid for 5 minutes.")
    );
}

#[tokio::test]
async fn test_request_otp_rejects_blank_identity() {
    let h = default_harness(&["123456"]);

    for identity in ["", "   "] {
        let result = h.service.request_otp(identity, None).await;
        assert!(matches!(result, Err(OtpError::InvalidInput { .. })));
    }

    assert_eq!(h.notifier.attempt_count(), 0);
    assert!(h.store.is_empty());
}

#[tokio::test]
async fn test_confirm_succeeds_exactly_once() {
    let h = default_harness(&["123456"]);
    h.service.request_otp("a@x.com", None).await.unwrap();
    let code = h.notifier.sent_code("a@x.com").unwrap();

    assert_eq!(h.service.confirm_otp("a@x.com", &code), Ok(()));
    assert_eq!(h.service.confirm_otp("a@x.com", &code), Err(OtpError::NotFound));
    assert!(h.store.is_empty());
}

#[tokio::test]
async fn test_confirm_without_request_is_not_found() {
    let h = default_harness(&["123456"]);

    assert_eq!(
        h.service.confirm_otp("nobody@x.com", "123456"),
        Err(OtpError::NotFound)
    );
}

#[tokio::test]
async fn test_confirm_rejects_blank_input() {
    let h = default_harness(&["123456"]);

    assert!(matches!(
        h.service.confirm_otp("c@x.com", ""),
        Err(OtpError::InvalidInput { .. })
    ));
    assert!(matches!(
        h.service.confirm_otp("", "123456"),
        Err(OtpError::InvalidInput { .. })
    ));
}

#[tokio::test]
async fn test_expired_code_is_removed() {
    let h = default_harness(&["042613"]);
    h.service.request_otp("b@x.com", None).await.unwrap();

    h.clock.advance(Duration::seconds(301));

    assert_eq!(h.service.confirm_otp("b@x.com", "042613"), Err(OtpError::Expired));
    assert_eq!(h.service.confirm_otp("b@x.com", "042613"), Err(OtpError::NotFound));
    assert!(h.store.get("b@x.com").is_none());
}

#[tokio::test]
async fn test_code_valid_at_exact_expiry_instant() {
    let h = default_harness(&["042613"]);
    h.service.request_otp("b@x.com", None).await.unwrap();

    h.clock.advance(Duration::seconds(300));

    assert_eq!(h.service.confirm_otp("b@x.com", "042613"), Ok(()));
}

#[tokio::test]
async fn test_expired_wrong_code_still_reports_expired() {
    let h = default_harness(&["042613"]);
    h.service.request_otp("b@x.com", None).await.unwrap();

    h.clock.advance(Duration::minutes(10));

    assert_eq!(h.service.confirm_otp("b@x.com", "000000"), Err(OtpError::Expired));
    assert!(h.store.is_empty());
}

#[tokio::test]
async fn test_mismatch_keeps_record_pending() {
    let h = default_harness(&["123456"]);
    h.service.request_otp("a@x.com", None).await.unwrap();

    for _ in 0..20 {
        assert_eq!(h.service.confirm_otp("a@x.com", "000000"), Err(OtpError::Mismatch));
    }
    // Different length candidates are plain mismatches too
    assert_eq!(h.service.confirm_otp("a@x.com", "12345"), Err(OtpError::Mismatch));

    assert_eq!(h.service.confirm_otp("a@x.com", "123456"), Ok(()));
}

#[tokio::test]
async fn test_second_request_invalidates_first_code() {
    let h = default_harness(&["111111", "222222"]);

    h.service.request_otp("a@x.com", None).await.unwrap();
    h.clock.advance(Duration::seconds(10));
    let second = h.service.request_otp("a@x.com", None).await.unwrap();

    assert_eq!(h.service.confirm_otp("a@x.com", "111111"), Err(OtpError::Mismatch));
    assert_eq!(h.store.get("a@x.com").unwrap().expires_at, second.expires_at);
    assert_eq!(h.service.confirm_otp("a@x.com", "222222"), Ok(()));
}

#[tokio::test]
async fn test_identities_are_independent() {
    let h = default_harness(&["111111", "222222"]);

    h.service.request_otp("a@x.com", None).await.unwrap();
    h.service.request_otp("b@x.com", None).await.unwrap();

    assert_eq!(h.service.confirm_otp("a@x.com", "222222"), Err(OtpError::Mismatch));
    assert_eq!(h.service.confirm_otp("b@x.com", "222222"), Ok(()));
    assert_eq!(h.service.confirm_otp("a@x.com", "111111"), Ok(()));
}

#[tokio::test]
async fn test_delivery_failure_retains_record_by_default() {
    let h = harness(MockNotifier::failing(), &["123456"], OtpServiceConfig::default());

    let result = h.service.request_otp("a@x.com", None).await;

    match result {
        Err(OtpError::DeliveryFailed { reason }) => {
            assert_eq!(reason, "mail service unavailable");
        }
        other => panic!("Expected delivery failure, got {:?}", other),
    }
    assert_eq!(h.store.len(), 1);
    assert_eq!(h.service.confirm_otp("a@x.com", "123456"), Ok(()));
}

#[tokio::test]
async fn test_delivery_failure_withdraws_record_when_not_retained() {
    let config = OtpServiceConfig {
        retain_on_delivery_failure: false,
        ..OtpServiceConfig::default()
    };
    let h = harness(MockNotifier::failing(), &["123456"], config);

    let result = h.service.request_otp("a@x.com", None).await;

    assert!(matches!(result, Err(OtpError::DeliveryFailed { .. })));
    assert!(h.store.is_empty());
    assert_eq!(h.service.confirm_otp("a@x.com", "123456"), Err(OtpError::NotFound));
}

#[tokio::test(start_paused = true)]
async fn test_failed_delivery_does_not_withdraw_newer_code() {
    let config = OtpServiceConfig {
        retain_on_delivery_failure: false,
        delivery_timeout: std::time::Duration::from_secs(5),
        ..OtpServiceConfig::default()
    };
    let notifier = MockNotifier::scripted(&[
        DeliveryMode::Hang(std::time::Duration::from_secs(60)),
        DeliveryMode::Succeed,
    ]);
    let h = harness(notifier, &["111111", "222222"], config);
    let service = Arc::new(h.service);

    let first = {
        let service = service.clone();
        tokio::spawn(async move { service.request_otp("a@x.com", None).await })
    };
    while h.notifier.attempt_count() == 0 {
        tokio::task::yield_now().await;
    }

    // Re-issue while the first delivery is still stuck
    service.request_otp("a@x.com", None).await.unwrap();

    let result = first.await.unwrap();
    assert!(matches!(result, Err(OtpError::DeliveryFailed { .. })));

    assert_eq!(h.store.len(), 1);
    assert_eq!(service.confirm_otp("a@x.com", "111111"), Err(OtpError::Mismatch));
    assert_eq!(service.confirm_otp("a@x.com", "222222"), Ok(()));
}

#[tokio::test(start_paused = true)]
async fn test_delivery_timeout_is_delivery_failure() {
    let config = OtpServiceConfig {
        delivery_timeout: std::time::Duration::from_secs(5),
        ..OtpServiceConfig::default()
    };
    let h = harness(
        MockNotifier::hanging(std::time::Duration::from_secs(60)),
        &["123456"],
        config,
    );

    let result = h.service.request_otp("a@x.com", None).await;

    match result {
        Err(OtpError::DeliveryFailed { reason }) => assert!(reason.contains("timed out")),
        other => panic!("Expected delivery timeout, got {:?}", other),
    }
    assert!(h.notifier.last_message("a@x.com").is_none());
    assert_eq!(h.store.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_store_is_usable_while_delivery_is_in_flight() {
    let h = harness(
        MockNotifier::hanging(std::time::Duration::from_secs(2)),
        &["123456"],
        OtpServiceConfig::default(),
    );
    let service = Arc::new(h.service);

    let pending = {
        let service = service.clone();
        tokio::spawn(async move { service.request_otp("a@x.com", None).await })
    };

    while h.store.is_empty() {
        tokio::task::yield_now().await;
    }

    // Delivery is still sleeping, yet the record is already confirmable
    assert_eq!(service.confirm_otp("a@x.com", "123456"), Ok(()));

    let challenge = pending.await.unwrap().unwrap();
    assert_eq!(challenge.identity, "a@x.com");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_confirms_single_winner() {
    let h = default_harness(&["123456"]);
    h.service.request_otp("a@x.com", None).await.unwrap();
    let service = Arc::new(h.service);

    let handles: Vec<_> = (0..16)
        .map(|_| {
            let service = service.clone();
            tokio::spawn(async move { service.confirm_otp("a@x.com", "123456") })
        })
        .collect();

    let mut successes = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(()) => successes += 1,
            Err(e) => assert_eq!(e, OtpError::NotFound),
        }
    }

    assert_eq!(successes, 1);
}

#[tokio::test]
async fn test_has_pending_ignores_expired_records() {
    let h = default_harness(&["123456"]);
    h.service.request_otp("a@x.com", None).await.unwrap();

    assert!(h.service.has_pending("a@x.com"));
    h.clock.advance(Duration::minutes(6));
    assert!(!h.service.has_pending("a@x.com"));
    assert!(!h.service.has_pending("b@x.com"));
}

#[test]
fn test_compose_message() {
    assert_eq!(
        compose_message("000123", "5 minutes", None),
        "Your OTP is: 000123. It is valid for 5 minutes."
    );
    assert_eq!(
        compose_message("000123", "5 minutes", Some("   ")),
        "Your OTP is: 000123. It is valid for 5 minutes."
    );
    assert_eq!(
        compose_message("000123", "2 minutes", Some("Hi there")),
        "Hi there\n\nYour OTP is: 000123. It is valid for 2 minutes."
    );
}
