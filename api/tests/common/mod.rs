//! Shared fixtures for API integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use actix_web::web;
use gate_api::routes::otp::AppState;
use gate_core::repositories::InMemoryOtpStore;
use gate_core::services::otp::{CodeGenerator, ManualClock, Notifier, OtpService, OtpServiceConfig};

/// Notifier keeping the last message per address
#[derive(Default)]
pub struct Inbox {
    messages: Mutex<HashMap<String, String>>,
    fail: bool,
}

impl Inbox {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn last_message(&self, email: &str) -> Option<String> {
        self.messages.lock().unwrap().get(email).cloned()
    }
}

#[async_trait]
impl Notifier for Inbox {
    async fn deliver(&self, identity: &str, message: &str) -> Result<String, String> {
        if self.fail {
            return Err("mail provider unreachable".to_string());
        }
        self.messages
            .lock()
            .unwrap()
            .insert(identity.to_string(), message.to_string());
        Ok("test-delivery".to_string())
    }
}

/// Generator returning the same code every time
pub struct FixedCode(pub &'static str);

impl CodeGenerator for FixedCode {
    fn generate(&self, _length: usize) -> String {
        self.0.to_string()
    }
}

pub struct TestContext {
    pub state: web::Data<AppState<Inbox, InMemoryOtpStore>>,
    pub inbox: Arc<Inbox>,
    pub clock: Arc<ManualClock>,
}

pub fn context_with(inbox: Inbox, code: &'static str) -> TestContext {
    let inbox = Arc::new(inbox);
    let clock = Arc::new(ManualClock::new(
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
    ));
    let service = OtpService::new(
        inbox.clone(),
        Arc::new(InMemoryOtpStore::new()),
        OtpServiceConfig::default(),
    )
    .with_generator(Arc::new(FixedCode(code)))
    .with_clock(clock.clone());

    TestContext {
        state: web::Data::new(AppState::new(Arc::new(service))),
        inbox,
        clock,
    }
}

pub fn context() -> TestContext {
    context_with(Inbox::default(), "042613")
}
