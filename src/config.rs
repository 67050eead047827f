use darksky::ApiRequest;
use serde::Deserialize;
use thiserror::Error;

use std::fs;

/// Settings for a forecast lookup, as read from a JSON file.
#[derive(Debug, Default, Eq, PartialEq, Deserialize)]
pub struct Config {
    pub api_key: String,
    pub latitude: String,
    pub longitude: String,
    #[serde(default)]
    pub exclude: Vec<String>,
    #[serde(default)]
    pub lang: Option<String>,
    #[serde(default)]
    pub units: Option<String>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unable to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Unable to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

impl Config {
    pub fn from_file(path: &str) -> Result<Config, ConfigError> {
        let conf_str = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_string(),
            source,
        })?;
        Config::parse(&conf_str)
    }

    pub fn parse(conf_str: &str) -> Result<Config, ConfigError> {
        let conf: Config = serde_json::from_str(conf_str)?;
        Ok(conf)
    }

    pub fn into_request(self) -> ApiRequest {
        ApiRequest {
            key: self.api_key,
            lat: self.latitude,
            long: self.longitude,
            exclude: self.exclude,
            lang: self.lang,
            units: self.units,
        }
    }
}
