use std::env;
use std::fmt;

use crate::workflows::assessment::AssessmentConfig;

/// Distinguishes runtime behavior for different stages of the service.
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

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub telemetry: TelemetryConfig,
    pub assessment: AssessmentConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let mut assessment = AssessmentConfig::default();
        if let Ok(raw) = env::var("APP_QUESTION_BANK_SIZE") {
            assessment.total_questions = raw
                .trim()
                .parse::<usize>()
                .map_err(|_| ConfigError::InvalidQuestionBankSize { value: raw })?;
        }

        Ok(Self {
            environment,
            telemetry: TelemetryConfig { log_level },
            assessment,
        })
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidQuestionBankSize { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidQuestionBankSize { value } => {
                write!(
                    f,
                    "APP_QUESTION_BANK_SIZE must be a non-negative integer, got '{value}'"
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {}
