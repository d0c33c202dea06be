//! Configuration management

use config::{builder::DefaultState, Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;

use crate::constants::{
    DEFAULT_APP_NAME, DEFAULT_HOST, DEFAULT_INVOICE_DOCUMENT, DEFAULT_METRICS_REPORTER_ID,
    DEFAULT_PORT, DEFAULT_PROCESS_KEY,
};

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub seed: SeedSettings,
    pub demo: DemoSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub env: String,
    pub host: String,
    pub port: u16,
    pub name: String,
}

/// Controls the demo environment seeder.
#[derive(Debug, Deserialize, Clone)]
pub struct SeedSettings {
    pub enabled: bool,
    /// Run every provisioning step even when the sentinel user exists.
    pub reconcile: bool,
    /// Simulates an identity provider that rejects writes (LDAP and the like).
    pub read_only_identity: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DemoSettings {
    pub process_key: String,
    pub invoice_document: String,
    pub reporter_id: String,
    pub start_instances: bool,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        Self::with_defaults()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::default().separator("__").try_parsing(true))
            .build()?
            .try_deserialize()
    }

    /// Configuration made of built-in defaults only.
    pub fn defaults() -> Result<Self, ConfigError> {
        Self::with_defaults()?.build()?.try_deserialize()
    }

    fn with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("app.env", "development")?
            .set_default("app.host", DEFAULT_HOST)?
            .set_default("app.port", i64::from(DEFAULT_PORT))?
            .set_default("app.name", DEFAULT_APP_NAME)?
            .set_default("seed.enabled", true)?
            .set_default("seed.reconcile", false)?
            .set_default("seed.read_only_identity", false)?
            .set_default("demo.process_key", DEFAULT_PROCESS_KEY)?
            .set_default("demo.invoice_document", DEFAULT_INVOICE_DOCUMENT)?
            .set_default("demo.reporter_id", DEFAULT_METRICS_REPORTER_ID)?
            .set_default("demo.start_instances", true)
    }
}
