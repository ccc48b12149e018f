use std::env;
use std::fmt;
use std::path::PathBuf;

use crate::filter::RULES_FILE_NAME;

/// Distinguishes runtime behavior for different stages of the tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the filter tooling.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub rules: RulesConfig,
    pub activation: ActivationConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let path = env::var("FILTER_RULES_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(RULES_FILE_NAME));

        let activated = match env::var("FILTER_ACTIVATED") {
            Ok(raw) => parse_flag(&raw).ok_or(ConfigError::InvalidActivation { value: raw })?,
            Err(_) => false,
        };

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            rules: RulesConfig { path },
            activation: ActivationConfig { activated },
            telemetry: TelemetryConfig {
                log_level,
                ansi: environment == AppEnvironment::Development,
            },
        })
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

/// Where the rule file lives.
#[derive(Debug, Clone)]
pub struct RulesConfig {
    pub path: PathBuf,
}

/// Licensing state fed to the activation gate.
#[derive(Debug, Clone, Copy)]
pub struct ActivationConfig {
    pub activated: bool,
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
    pub ansi: bool,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidActivation { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidActivation { value } => {
                write!(f, "FILTER_ACTIVATED must be a boolean flag, got '{value}'")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
