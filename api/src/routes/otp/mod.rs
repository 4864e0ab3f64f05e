//! One-time passcode route handlers
//!
//! This module contains the passcode endpoints:
//! - Issuing a passcode to an email address
//! - Verifying a passcode

pub mod send_otp;
pub mod verify_otp;

use std::sync::Arc;

use gate_core::repositories::OtpStore;
use gate_core::services::otp::{Notifier, OtpService};

pub use send_otp::send_otp;
pub use verify_otp::verify_otp;

/// Application state that holds shared services
pub struct AppState<N, S>
where
    N: Notifier,
    S: OtpStore,
{
    pub otp_service: Arc<OtpService<N, S>>,
}

impl<N: Notifier, S: OtpStore> AppState<N, S> {
    pub fn new(otp_service: Arc<OtpService<N, S>>) -> Self {
        Self { otp_service }
    }
}
