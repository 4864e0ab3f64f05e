//! Background sweeper for expired passcode records
//!
//! Expired records are already rejected (and removed) when presented, so the
//! sweeper only reclaims memory for identities that never come back.

use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::repositories::otp::OtpStore;

use super::clock::SystemClock;
use super::traits::Clock;

/// Configuration for the passcode sweeper
#[derive(Debug, Clone)]
pub struct OtpCleanupConfig {
    /// How often to run a sweep (in seconds)
    pub interval_seconds: u64,
    /// Whether to enable automatic sweeping
    pub enabled: bool,
}

impl Default for OtpCleanupConfig {
    fn default() -> Self {
        Self {
            interval_seconds: 60,
            enabled: true,
        }
    }
}

impl From<&gate_shared::OtpConfig> for OtpCleanupConfig {
    fn from(config: &gate_shared::OtpConfig) -> Self {
        Self {
            interval_seconds: config.sweep_interval_seconds,
            enabled: config.sweeper_enabled(),
        }
    }
}

/// Service purging expired records from an [`OtpStore`]
pub struct OtpCleanupService<S: OtpStore + 'static> {
    store: Arc<S>,
    clock: Arc<dyn Clock>,
    config: OtpCleanupConfig,
}

impl<S: OtpStore> OtpCleanupService<S> {
    /// Create a new sweeper over `store` using the system clock
    pub fn new(store: Arc<S>, config: OtpCleanupConfig) -> Self {
        Self {
            store,
            clock: Arc::new(SystemClock),
            config,
        }
    }

    /// Replace the time source
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Run a single sweep
    pub fn run_cleanup(&self) -> CleanupResult {
        if !self.config.enabled {
            return CleanupResult::default();
        }

        let purged = self.store.purge_expired(self.clock.now());
        let result = CleanupResult {
            expired_records_purged: purged,
            remaining: self.store.len(),
        };

        if purged > 0 {
            info!(
                event = "otp_sweep",
                purged = result.expired_records_purged,
                remaining = result.remaining,
                "Purged expired passcodes"
            );
        } else {
            debug!(event = "otp_sweep", remaining = result.remaining, "Nothing to purge");
        }

        result
    }

    /// Start the sweeper as a background task
    ///
    /// This spawns a tokio task that sweeps at regular intervals. Must be
    /// called from within a tokio runtime.
    pub fn start_background_task(self: Arc<Self>) {
        if !self.config.enabled {
            warn!("Passcode sweeper is disabled");
            return;
        }

        let interval = std::time::Duration::from_secs(self.config.interval_seconds.max(1));

        tokio::spawn(async move {
            info!(
                "Passcode sweeper started - will run every {} seconds",
                self.config.interval_seconds
            );

            let mut interval_timer = tokio::time::interval(interval);

            loop {
                interval_timer.tick().await;
                self.run_cleanup();
            }
        });
    }
}

/// Result of a sweep
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CleanupResult {
    /// Number of expired records removed
    pub expired_records_purged: usize,
    /// Records still outstanding after the sweep
    pub remaining: usize,
}
