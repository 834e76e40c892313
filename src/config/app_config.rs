use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::user::Role;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub audit: AuditConfig,
    pub seed: SeedConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Where audit records end up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AuditSinkKind {
    #[default]
    Tracing,
    Memory,
    Disabled,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    /// Service name stamped on every record
    pub service_name: String,
    /// Records queued beyond this are dropped
    pub channel_capacity: usize,
    pub sink: AuditSinkKind,
}

/// Entities created at startup
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    /// Company used when a project is created without one
    pub default_company: String,
    /// Create the "Default" project teams fall back to
    pub default_project: bool,
    pub default_project_start: NaiveDate,
    pub default_project_end: NaiveDate,
    /// Additional companies
    pub companies: Vec<String>,
    pub users: Vec<SeedUser>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedUser {
    pub username: String,
    pub role: Role,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            service_name: "staffing-service".to_string(),
            channel_capacity: 1024,
            sink: AuditSinkKind::default(),
        }
    }
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            default_company: "Default".to_string(),
            default_project: true,
            default_project_start: NaiveDate::from_ymd_opt(2000, 1, 1).unwrap_or(NaiveDate::MIN),
            default_project_end: NaiveDate::from_ymd_opt(2099, 12, 31).unwrap_or(NaiveDate::MAX),
            companies: Vec::new(),
            users: Vec::new(),
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
