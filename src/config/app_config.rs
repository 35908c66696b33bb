use config::Config;
use error_stack::{report, ResultExt};
use serde::de::IntoDeserializer;
use serde::Deserialize;
use serde_path_to_error::{Deserializer as PathDeserializer, Segment, Track};
use thiserror::Error;

use super::{auth_config::AuthConfig, log_config::LogConfig, sheets_config::SpreadsheetConfig};

const CONFIG_PATH_VAR: &str = "CONFIG_PATH";
const DEFAULT_CONFIG_NAME: &str = "Config";

#[derive(serde::Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub sheets: SpreadsheetConfig,
    pub auth: AuthConfig,
    pub log: LogConfig,
}

#[derive(Error, Debug)]
pub enum AppConfigError {
    #[error("Error reading config file")]
    ReadFailed,
    #[error("Failed to deserialize config file")]
    DeserializeFailed,
}

impl AppConfig {
    /// Loads `Config.{toml,json,yaml,..}` from the working directory, or the file named by
    /// `CONFIG_PATH`. A missing file yields the defaults.
    pub fn load() -> error_stack::Result<Self, AppConfigError> {
        let config_path =
            std::env::var(CONFIG_PATH_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_NAME.to_string());
        Self::load_from(&config_path)
    }

    pub fn load_from(config_path: &str) -> error_stack::Result<Self, AppConfigError> {
        let config = Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .build()
            .change_context(AppConfigError::ReadFailed)
            .attach_printable_lazy(|| format!("Config file: {}", config_path))?;

        let value = config
            .try_deserialize::<serde_json::Value>()
            .change_context(AppConfigError::ReadFailed)
            .attach_printable_lazy(|| format!("Config file: {}", config_path))?;

        let mut track = Track::new();
        let path_de = PathDeserializer::new(value.into_deserializer(), &mut track);
        AppConfig::deserialize(path_de).map_err(|e| {
            let path_str = track
                .path()
                .iter()
                .map(|seg| match seg {
                    Segment::Seq { index } => format!("[{}]", index),
                    Segment::Map { key } => format!(".{}", key),
                    Segment::Enum { variant } => format!("::{}", variant),
                    Segment::Unknown => String::from("<?>"),
                })
                .collect::<String>();

            report!(AppConfigError::DeserializeFailed)
                .attach_printable(format!("Config file: {}", config_path))
                .attach_printable(format!("Reason: {}", e))
                .attach_printable(format!("Field path: {}", path_str.trim_start_matches('.')))
        })
    }
}
