use std::sync::Arc;

use actix_web::{web, HttpServer};
use anyhow::Context;
use log::info;

use gate_api::app::create_app;
use gate_api::config::Config;
use gate_api::routes::otp::AppState;
use gate_core::repositories::InMemoryOtpStore;
use gate_core::services::otp::{OtpCleanupService, OtpService};
use gate_infra::mail::{create_mail_service, try_create_mail_service, MailNotifier};
use gate_shared::config::LoggingConfig;
use gate_shared::Environment;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize logger
    let logging = LoggingConfig::for_environment(Environment::from_env());
    env_logger::init_from_env(env_logger::Env::new().default_filter_or(logging.default_filter()));

    let config = Config::from_env().context("invalid configuration")?;

    info!(
        "Starting OTP Gate API Server ({} environment)",
        config.app.environment
    );

    // Wire the passcode service: volatile store, mail notifier, secure generator
    let store = Arc::new(InMemoryOtpStore::new());
    let transport = if config.is_production() {
        try_create_mail_service(&config.app.mail).context("mail transport is not usable")?
    } else {
        create_mail_service(&config.app.mail)
    };
    let notifier = Arc::new(MailNotifier::new(transport));
    info!("Mail provider: {}", notifier.provider_name());

    let otp_service = Arc::new(OtpService::new(
        notifier,
        store.clone(),
        config.otp_service(),
    ));
    info!(
        "Passcodes: {} digits, valid for {} seconds",
        otp_service.config().effective_code_length(),
        otp_service.config().effective_ttl_seconds()
    );

    Arc::new(OtpCleanupService::new(store, config.sweeper())).start_background_task();

    let app_state = web::Data::new(AppState::new(otp_service));
    let settings = config.http();

    let bind_address = config.bind_address();
    info!("Server will bind to: {}", bind_address);

    let mut server = HttpServer::new(move || create_app(app_state.clone(), &settings));
    if config.app.server.workers > 0 {
        server = server.workers(config.app.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("failed to bind {}", bind_address))?
        .run()
        .await
        .context("server terminated with an error")
}
