use anyhow::{bail, Result};
use gate_core::services::otp::{
    OtpCleanupConfig, OtpServiceConfig, MAX_CODE_LENGTH, MAX_TTL_SECONDS, MIN_CODE_LENGTH,
};
use gate_infra::mail::HttpMailConfig;
use gate_shared::config::MailProvider;
use gate_shared::AppConfig;

use crate::app::HttpSettings;

/// Process configuration for the API binary
#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
}

impl Config {
    /// Load `.env` (if present) and the environment, then sanity-check it
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::new(AppConfig::from_env())
    }

    pub fn new(app: AppConfig) -> Result<Self> {
        if !(1..=MAX_TTL_SECONDS).contains(&app.otp.ttl_seconds) {
            bail!(
                "OTP_TTL_SECONDS must be between 1 and {}, got {}",
                MAX_TTL_SECONDS,
                app.otp.ttl_seconds
            );
        }
        if app.otp.delivery_timeout_seconds == 0 {
            bail!("OTP_DELIVERY_TIMEOUT_SECONDS must be positive");
        }
        if !(MIN_CODE_LENGTH..=MAX_CODE_LENGTH).contains(&app.otp.code_length) {
            bail!(
                "OTP_CODE_LENGTH must be between {} and {}, got {}",
                MIN_CODE_LENGTH,
                MAX_CODE_LENGTH,
                app.otp.code_length
            );
        }
        if app.environment.is_production() {
            match app.mail.provider {
                // The mock transport prints every passcode to stdout
                MailProvider::Mock => bail!("MAIL_PROVIDER=http is required in production"),
                MailProvider::Http => {
                    HttpMailConfig::try_from(&app.mail)?;
                }
            }
        }
        if app.environment.is_production() && app.cors.allowed_origins.is_empty() {
            log::warn!("ALLOWED_ORIGINS is empty; browsers on other origins will be refused");
        }

        Ok(Self { app })
    }

    pub fn otp_service(&self) -> OtpServiceConfig {
        OtpServiceConfig::from(&self.app.otp)
    }

    pub fn sweeper(&self) -> OtpCleanupConfig {
        OtpCleanupConfig::from(&self.app.otp)
    }

    pub fn http(&self) -> HttpSettings {
        HttpSettings {
            environment: self.app.environment,
            cors: self.app.cors.clone(),
            max_payload_size: self.app.server.max_payload_size,
        }
    }

    pub fn is_development(&self) -> bool {
        self.app.environment.is_development()
    }

    pub fn is_production(&self) -> bool {
        self.app.environment.is_production()
    }

    pub fn bind_address(&self) -> String {
        self.app.server.bind_address()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gate_shared::Environment;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::new(AppConfig::default()).unwrap();
        assert_eq!(config.bind_address(), "0.0.0.0:3000");
        assert_eq!(config.otp_service().ttl_seconds, 300);
        assert!(config.sweeper().enabled);
        assert_eq!(config.http().max_payload_size, 16 * 1024);
    }

    #[test]
    fn test_rejects_non_positive_ttl() {
        let mut app = AppConfig::default();
        app.otp.ttl_seconds = 0;
        assert!(Config::new(app).is_err());
    }

    #[test]
    fn test_rejects_ttl_beyond_one_day() {
        let mut app = AppConfig::default();
        app.otp.ttl_seconds = 10_000_000_000_000;
        let err = Config::new(app).unwrap_err();
        assert!(err.to_string().contains("OTP_TTL_SECONDS"));

        let mut app = AppConfig::default();
        app.otp.ttl_seconds = MAX_TTL_SECONDS;
        assert!(Config::new(app).is_ok());
    }

    fn production() -> AppConfig {
        let mut app = AppConfig::default();
        app.environment = Environment::Production;
        app.cors.allowed_origins = vec!["https://app.example.com".to_string()];
        app
    }

    #[test]
    fn test_production_refuses_mock_mail() {
        let err = Config::new(production()).unwrap_err();
        assert!(err.to_string().contains("MAIL_PROVIDER"));
    }

    #[test]
    fn test_production_refuses_incomplete_http_mail() {
        let mut app = production();
        app.mail.provider = MailProvider::Http;
        app.mail.api_url = Some("https://mail.example.test/v1/send".to_string());
        let err = Config::new(app).unwrap_err();
        assert!(err.to_string().contains("MAIL_API_KEY"));
    }

    #[test]
    fn test_production_accepts_http_mail() {
        let mut app = production();
        app.mail.provider = MailProvider::Http;
        app.mail.api_url = Some("https://mail.example.test/v1/send".to_string());
        app.mail.api_key = Some("key".to_string());
        assert!(Config::new(app).unwrap().is_production());
    }

    #[test]
    fn test_rejects_out_of_range_code_length() {
        let mut app = AppConfig::default();
        app.otp.code_length = 3;
        let err = Config::new(app).unwrap_err();
        assert!(err.to_string().contains("OTP_CODE_LENGTH"));
    }
}
