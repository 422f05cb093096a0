//! Application configuration

mod app_config;

pub use app_config::{
    ApiConfig, AppConfig, BackupSettings, LogFormat, LoggingConfig, MigrationSettings, TeamsConfig,
};
