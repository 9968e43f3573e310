use std::collections::HashSet;
use std::env;

use config::{Config, ConfigError, Environment, File, FileFormat};
use rfblinds_api::models::{CoveringConfig, PulseProfile};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Server {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Logger {
    pub level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub server: Server,
    pub logger: Logger,
    pub transmitter: PulseProfile,
    #[serde(default)]
    pub coverings: Vec<CoveringConfig>,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or("development".into());

        let settings: Settings = Config::builder()
            .add_source(File::with_name("configs/default"))
            .add_source(File::with_name(&format!("configs/{run_mode}")).required(false))
            .add_source(Environment::default().separator("__"))
            .build()?
            .try_deserialize()?;

        settings.validate()?;

        Ok(settings)
    }

    pub fn from_toml(source: &str) -> Result<Self, ConfigError> {
        let settings: Settings = Config::builder()
            .add_source(File::from_str(source, FileFormat::Toml))
            .build()?
            .try_deserialize()?;

        settings.validate()?;

        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.transmitter.is_valid() {
            return Err(ConfigError::Message(
                "transmitter.repeat_count must be at least 1".into(),
            ));
        }

        let mut seen = HashSet::new();
        for covering in &self.coverings {
            if !seen.insert(covering.serial_number.as_str()) {
                return Err(ConfigError::Message(format!(
                    "duplicate covering serial number {}",
                    covering.serial_number
                )));
            }
        }

        Ok(())
    }
}
