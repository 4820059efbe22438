use std::{fs, path::Path};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::{conversion::subset_construction::StateNaming, logger::LogLevel};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    enabled: bool,
    log_file: bool,
    log_directory: String,
    log_level: LogLevel,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        LoggerConfig {
            enabled: false,
            log_file: false,
            log_directory: "./logs".to_string(),
            log_level: LogLevel::Warn,
        }
    }
}

impl LoggerConfig {
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn with_log_file(mut self, log_file: bool) -> Self {
        self.log_file = log_file;
        self
    }

    pub fn with_log_directory(mut self, log_directory: impl Into<String>) -> Self {
        self.log_directory = log_directory.into();
        self
    }

    pub fn with_log_level(mut self, log_level: LogLevel) -> Self {
        self.log_level = log_level;
        self
    }

    pub fn get_enabled(&self) -> &bool {
        &self.enabled
    }

    pub fn get_log_file(&self) -> &bool {
        &self.log_file
    }

    pub fn get_log_directory(&self) -> &str {
        &self.log_directory
    }

    pub fn get_log_level(&self) -> &LogLevel {
        &self.log_level
    }
}

/// Settings for the conversions. Every field is optional in TOML and falls
/// back to its default.
///
/// ```toml
/// complete_dfa = true
/// state_naming = "SourceSets"
///
/// [logger]
/// enabled = true
/// log_level = "Info"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionConfig {
    complete_dfa: bool,
    state_naming: StateNaming,
    logger: LoggerConfig,
}

impl ConversionConfig {
    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        toml::from_str(content).context("Failed to parse conversion config")
    }

    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        ConversionConfig::from_toml_str(&content)
    }

    pub fn to_toml_string(&self) -> anyhow::Result<String> {
        toml::to_string(self).context("Failed to serialize conversion config")
    }

    pub fn with_complete_dfa(mut self, complete_dfa: bool) -> Self {
        self.complete_dfa = complete_dfa;
        self
    }

    pub fn with_state_naming(mut self, state_naming: StateNaming) -> Self {
        self.state_naming = state_naming;
        self
    }

    pub fn with_logger(mut self, logger: LoggerConfig) -> Self {
        self.logger = logger;
        self
    }

    pub fn get_complete_dfa(&self) -> &bool {
        &self.complete_dfa
    }

    pub fn get_state_naming(&self) -> &StateNaming {
        &self.state_naming
    }

    pub fn get_logger(&self) -> &LoggerConfig {
        &self.logger
    }
}
