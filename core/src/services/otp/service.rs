//! Main OTP service implementation

use std::sync::Arc;

use gate_shared::email::mask_email;
use gate_shared::validation::not_blank;

use crate::domain::entities::otp_record::OtpRecord;
use crate::errors::{OtpError, OtpResult};
use crate::repositories::otp::OtpStore;

use super::clock::SystemClock;
use super::config::OtpServiceConfig;
use super::generator::SecureCodeGenerator;
use super::traits::{Clock, CodeGenerator, Notifier};
use super::types::IssuedChallenge;

/// Service issuing and confirming email one-time passcodes
pub struct OtpService<N: Notifier, S: OtpStore> {
    /// Delivery channel for issued codes
    notifier: Arc<N>,
    /// Outstanding records, one per identity
    store: Arc<S>,
    /// Passcode source
    generator: Arc<dyn CodeGenerator>,
    /// Time source for issuance and expiry
    clock: Arc<dyn Clock>,
    /// Service configuration
    config: OtpServiceConfig,
}

impl<N: Notifier, S: OtpStore> OtpService<N, S> {
    /// Create a new OTP service backed by the OS CSPRNG and the system clock
    ///
    /// # Arguments
    ///
    /// * `notifier` - Delivery channel implementation
    /// * `store` - Store owning the outstanding records
    /// * `config` - Service configuration
    pub fn new(notifier: Arc<N>, store: Arc<S>, config: OtpServiceConfig) -> Self {
        Self {
            notifier,
            store,
            generator: Arc::new(SecureCodeGenerator::new()),
            clock: Arc::new(SystemClock),
            config,
        }
    }

    /// Replace the passcode source
    pub fn with_generator(mut self, generator: Arc<dyn CodeGenerator>) -> Self {
        self.generator = generator;
        self
    }

    /// Replace the time source
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Service configuration
    pub fn config(&self) -> &OtpServiceConfig {
        &self.config
    }

    /// The store this service issues into
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Issue a passcode for `identity` and hand it to the notifier
    ///
    /// This method:
    /// 1. Rejects a blank identity
    /// 2. Generates a new code and stores it, replacing any outstanding one
    /// 3. Delivers the code, bounded by the configured timeout
    ///
    /// The store write completes before delivery starts, so a slow notifier
    /// never blocks confirmations. A failed delivery keeps the record unless
    /// `retain_on_delivery_failure` is off.
    ///
    /// # Arguments
    ///
    /// * `identity` - The email address to challenge
    /// * `custom_message` - Optional text placed before the passcode line
    ///
    /// # Returns
    ///
    /// * `Ok(IssuedChallenge)` - Issuance details, without the code
    /// * `Err(OtpError::InvalidInput)` - Blank identity
    /// * `Err(OtpError::DeliveryFailed)` - Notifier error or timeout
    pub async fn request_otp(
        &self,
        identity: &str,
        custom_message: Option<&str>,
    ) -> OtpResult<IssuedChallenge> {
        if !not_blank(identity) {
            tracing::warn!(event = "otp_request_rejected", "Passcode requested without identity");
            return Err(OtpError::invalid_input("identity"));
        }

        let now = self.clock.now();
        let code = self.generator.generate(self.config.effective_code_length());
        let message = compose_message(&code, &self.config.ttl_display(), custom_message);
        let record = OtpRecord::issue(code, now, self.config.ttl());
        let expires_at = record.expires_at;

        // Replaces any outstanding code: the old one is dead from here on
        self.store.put(identity, record.clone());

        tracing::info!(
            identity = %mask_email(identity),
            event = "otp_issued",
            expires_at = %expires_at,
            "Issued one-time passcode"
        );

        let delivery = tokio::time::timeout(
            self.config.delivery_timeout,
            self.notifier.deliver(identity, &message),
        )
        .await;

        let reason = match delivery {
            Ok(Ok(delivery_id)) => {
                tracing::info!(
                    identity = %mask_email(identity),
                    event = "otp_delivered",
                    delivery_id = %delivery_id,
                    "Passcode handed to notifier"
                );
                return Ok(IssuedChallenge {
                    identity: identity.to_string(),
                    issued_at: now,
                    expires_at,
                    delivery_id,
                });
            }
            Ok(Err(reason)) => reason,
            Err(_) => format!(
                "delivery timed out after {}s",
                self.config.delivery_timeout.as_secs_f32()
            ),
        };

        tracing::error!(
            identity = %mask_email(identity),
            event = "otp_delivery_failed",
            error = %reason,
            retained = self.config.retain_on_delivery_failure,
            "Failed to deliver passcode"
        );

        if !self.config.retain_on_delivery_failure {
            self.withdraw(identity, &record);
        }

        Err(OtpError::DeliveryFailed { reason })
    }

    /// Confirm `candidate` against the outstanding passcode for `identity`
    ///
    /// Look up, expiry check, comparison and consumption happen in one
    /// critical section of the store, so at most one caller can ever succeed
    /// for a given issuance. Never awaits.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - Match; the passcode is consumed
    /// * `Err(OtpError::InvalidInput)` - Blank identity or candidate
    /// * `Err(OtpError::NotFound)` - No outstanding passcode
    /// * `Err(OtpError::Expired)` - Passcode lapsed; it is removed
    /// * `Err(OtpError::Mismatch)` - Wrong code; the passcode stays pending
    pub fn confirm_otp(&self, identity: &str, candidate: &str) -> OtpResult<()> {
        if !not_blank(identity) {
            return Err(OtpError::invalid_input("identity"));
        }
        if !not_blank(candidate) {
            return Err(OtpError::invalid_input("candidate"));
        }

        let now = self.clock.now();
        let outcome = self.store.with_entry(identity, |slot| {
            let Some(record) = slot.as_ref() else {
                return Err(OtpError::NotFound);
            };
            if record.is_expired_at(now) {
                *slot = None;
                return Err(OtpError::Expired);
            }
            if !record.matches(candidate) {
                return Err(OtpError::Mismatch);
            }
            *slot = None;
            Ok(())
        });

        let masked = mask_email(identity);
        match &outcome {
            Ok(()) => tracing::info!(
                identity = %masked,
                event = "otp_verified_success",
                "Passcode confirmed and consumed"
            ),
            Err(OtpError::Expired) => tracing::info!(
                identity = %masked,
                event = "otp_expired",
                "Expired passcode presented; record removed"
            ),
            Err(error) => tracing::warn!(
                identity = %masked,
                event = "otp_verification_failed",
                reason = error.error_code(),
                "Passcode confirmation failed"
            ),
        }

        outcome
    }

    /// Whether `identity` currently holds a confirmable passcode
    pub fn has_pending(&self, identity: &str) -> bool {
        let now = self.clock.now();
        self.store
            .get(identity)
            .map_or(false, |record| !record.is_expired_at(now))
    }

    /// Remove `issued` from the store, leaving any newer record alone
    fn withdraw(&self, identity: &str, issued: &OtpRecord) {
        self.store.with_entry(identity, |slot| {
            if slot.as_ref() == Some(issued) {
                *slot = None;
            }
        });
    }
}

/// Build the message handed to the notifier
///
/// A non-blank custom message is placed before the passcode line.
pub fn compose_message(code: &str, ttl_display: &str, custom_message: Option<&str>) -> String {
    let body = format!("Your OTP is: {}. It is valid for {}.", code, ttl_display);
    match custom_message.map(str::trim).filter(|m| !m.is_empty()) {
        Some(prefix) => format!("{}\n\n{}", prefix, body),
        None => body,
    }
}
