//! Send a one-off passcode mail through the configured transport
//!
//! Run with: cargo run -p gate_infra --example send_otp_mail -- jane@example.com
//!
//! Uses MAIL_PROVIDER / MAIL_API_URL / MAIL_API_KEY from the environment and
//! falls back to the console mock when nothing is configured.

use std::sync::Arc;

use gate_core::{InMemoryOtpStore, OtpService, OtpServiceConfig};
use gate_infra::{load_config, mail::create_mail_notifier};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let recipient = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "demo@example.com".to_string());

    let config = load_config()?;
    let notifier = create_mail_notifier(&config.mail);
    println!("Using mail provider: {}", notifier.provider_name());

    let service = OtpService::new(
        Arc::new(notifier),
        Arc::new(InMemoryOtpStore::new()),
        OtpServiceConfig::default(),
    );

    match service.request_otp(&recipient, Some("OTP Gate demo")).await {
        Ok(challenge) => {
            println!("✅ Passcode sent, delivery id {}", challenge.delivery_id);
            println!("   Expires at {}", challenge.expires_at);
        }
        Err(e) => println!("❌ Failed to send passcode: {}", e),
    }

    Ok(())
}
