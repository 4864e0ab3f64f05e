//! Deployment environment and log level selection

use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::str::FromStr;

/// Where the service is running; drives logging, CORS and transport security
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }

    pub fn is_development(&self) -> bool {
        matches!(self, Environment::Development)
    }

    /// Read `ENVIRONMENT` (or `ENV`), falling back to development
    pub fn from_env() -> Self {
        env::var("ENVIRONMENT")
            .or_else(|_| env::var("ENV"))
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or_default()
    }

    fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Staging => "staging",
            Environment::Production => "production",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "staging" | "stage" | "test" => Ok(Environment::Staging),
            "production" | "prod" => Ok(Environment::Production),
            other => Err(format!("Invalid environment: {}", other)),
        }
    }
}

/// Log level used when `RUST_LOG` is not set
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// trace, debug, info, warn or error
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self::for_environment(Environment::default())
    }
}

impl LoggingConfig {
    /// Debug in development, info elsewhere; `LOG_LEVEL` overrides both
    pub fn for_environment(environment: Environment) -> Self {
        let fallback = if environment.is_development() { "debug" } else { "info" };
        Self {
            level: env::var("LOG_LEVEL").unwrap_or_else(|_| fallback.to_string()),
        }
    }

    /// Filter string for the logger
    pub fn default_filter(&self) -> String {
        // actix's access log stays at info even when the app runs at debug
        format!("{},actix_server=info,actix_web=info", self.level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_parsing() {
        assert_eq!("prod".parse::<Environment>(), Ok(Environment::Production));
        assert_eq!(" Staging ".parse::<Environment>(), Ok(Environment::Staging));
        assert_eq!("dev".parse::<Environment>(), Ok(Environment::Development));
        assert!("moon".parse::<Environment>().is_err());
    }

    #[test]
    fn test_environment_display_round_trips() {
        for environment in [
            Environment::Development,
            Environment::Staging,
            Environment::Production,
        ] {
            assert_eq!(environment.to_string().parse::<Environment>(), Ok(environment));
        }
    }

    #[test]
    fn test_default_filter_keeps_actix_at_info() {
        let logging = LoggingConfig {
            level: "debug".to_string(),
        };
        assert_eq!(logging.default_filter(), "debug,actix_server=info,actix_web=info");
    }
}
