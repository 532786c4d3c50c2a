use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

pub const ENV_PREFIX: &str = "RESOURCE_STORE";

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub logging: LoggingSettings,
    pub store: StoreSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApplicationSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingSettings {
    pub level: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StoreSettings {
    /// Attempts per conditional write before answering with a conflict.
    pub max_write_attempts: u32,
}

impl Settings {
    /// Defaults, then `config/default` and `config/local` when present, then
    /// `RESOURCE_STORE__SECTION__KEY` environment variables.
    pub fn new() -> Result<Self, ConfigError> {
        Self::builder()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    fn builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Config::builder()
            .set_default("application.host", "0.0.0.0")?
            .set_default("application.port", 8080)?
            .set_default("logging.level", "info")?
            .set_default("store.max_write_attempts", 5)
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.application.host, self.application.port)
    }
}
