//! Application configuration

mod app_config;

pub use app_config::{
    AppConfig, AuditConfig, AuditSinkKind, LogFormat, LoggingConfig, SeedConfig, SeedUser,
    ServerConfig,
};
