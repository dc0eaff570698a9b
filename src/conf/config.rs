use crate::{
    conf::{EnvironmentConfig, MonitorConfig, NotifierConfig, StorageConfig},
    core::SnapwatchError::{self, ConfigParsingError},
};
use config::{Config as CConfig, ConfigBuilder, Environment, FileFormat, builder::DefaultState};
use serde::{Deserialize, Serialize};

const ENV_PREFIX: &str = "SNAPWATCH";

#[derive(Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub environment: EnvironmentConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub monitor: MonitorConfig,
    #[serde(default)]
    pub notifier: NotifierConfig,
}

impl Config {
    pub fn from_str(toml_str: &str) -> Result<Config, SnapwatchError> {
        let builder = CConfig::builder()
            .add_source(config::File::from_str(toml_str, FileFormat::Toml));
        Self::build(builder)
    }

    /// Optional TOML file, overridden by `SNAPWATCH_<SECTION>__<KEY>` variables.
    pub fn load(path: Option<&str>) -> Result<Config, SnapwatchError> {
        let mut builder = CConfig::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::new(path, FileFormat::Toml));
        }
        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("monitor.ignore_tables")
                .try_parsing(true),
        );
        Self::build(builder)
    }

    fn build(builder: ConfigBuilder<DefaultState>) -> Result<Config, SnapwatchError> {
        let config = builder
            .build()
            .map_err(|e| ConfigParsingError(e.to_string()))?
            .try_deserialize::<Config>()
            .map_err(|e| ConfigParsingError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), SnapwatchError> {
        self.monitor.validate()
    }
}
