//! Run configuration: JSON file, command-line overrides and environment.
//!
//! Precedence, highest first: command-line flag, config file, environment
//! (`OPENAI_API_KEY`, key only), built-in default.

use std::fs;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use merger_map::{ChatMappingConfig, DEFAULT_API_BASE_URL, DEFAULT_MODEL, DEFAULT_TEMPERATURE};
use serde::Deserialize;
use thiserror::Error;

/// File looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "config.json";

/// Environment variable consulted when no API key is configured.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

pub const DEFAULT_INPUT_DIR: &str = "input";
pub const DEFAULT_OUTPUT_DIR: &str = "output";
pub const DEFAULT_ROWS_PER_FILE: usize = 10_000;
pub const DEFAULT_FIELD_MAPPING_FILE: &str = "fieldMapping.json";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("rowsPerFile must be at least 1")]
    ZeroRowsPerFile,

    #[error("temperature must be within 0.0..=2.0, got {0}")]
    InvalidTemperature(f32),

    #[error("no API key configured: set chatGptApiKey, pass --api-key or export {API_KEY_ENV}")]
    MissingApiKey,
}

/// Contents of the JSON configuration file. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ConfigFile {
    pub input_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub rows_per_file: Option<usize>,
    pub field_mapping_file: Option<PathBuf>,
    pub chat_gpt_api_key: Option<String>,
    pub api_base_url: Option<String>,
    pub model: Option<String>,
    pub temperature: Option<f32>,
    pub request_timeout_secs: Option<u64>,
    pub reuse_mapping: Option<bool>,
}

impl ConfigFile {
    /// Reads and parses a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads `explicit` if given, else `config.json` in the working
    /// directory if it exists, else an empty configuration.
    pub fn discover(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::load(path),
            None => {
                let fallback = Path::new(DEFAULT_CONFIG_FILE);
                if fallback.is_file() {
                    Self::load(fallback)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn input_dir_or_default(&self) -> PathBuf {
        self.input_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT_DIR))
    }
}

/// Values given on the command line; `None` defers to the file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub input_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub rows_per_file: Option<usize>,
    pub field_mapping_file: Option<PathBuf>,
    pub api_key: Option<String>,
    pub api_base_url: Option<String>,
    pub model: Option<String>,
    pub temperature: Option<f32>,
    pub request_timeout_secs: Option<u64>,
    pub reuse_mapping: bool,
}

/// Where the field mapping comes from.
#[derive(Debug, Clone)]
pub enum MappingSource {
    /// Ask the chat-completion service.
    Chat(ChatMappingConfig),
    /// Load a previously saved mapping file.
    Reuse,
}

/// Fully validated settings of a `run`.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub rows_per_file: NonZeroUsize,
    pub field_mapping_file: PathBuf,
    pub mapping_source: MappingSource,
}

impl ResolvedConfig {
    pub fn reuses_mapping(&self) -> bool {
        matches!(self.mapping_source, MappingSource::Reuse)
    }
}

/// Merges file, overrides and environment into a validated configuration.
///
/// `env_api_key` is the value of [`API_KEY_ENV`], if set.
pub fn resolve(
    file: ConfigFile,
    overrides: ConfigOverrides,
    env_api_key: Option<String>,
) -> Result<ResolvedConfig, ConfigError> {
    let rows = overrides
        .rows_per_file
        .or(file.rows_per_file)
        .unwrap_or(DEFAULT_ROWS_PER_FILE);
    let rows_per_file = NonZeroUsize::new(rows).ok_or(ConfigError::ZeroRowsPerFile)?;

    let field_mapping_file = overrides
        .field_mapping_file
        .or(file.field_mapping_file)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_FIELD_MAPPING_FILE));

    let reuse = overrides.reuse_mapping || file.reuse_mapping.unwrap_or(false);
    let mapping_source = if reuse {
        MappingSource::Reuse
    } else {
        let api_key = overrides
            .api_key
            .or(file.chat_gpt_api_key)
            .or(env_api_key)
            .filter(|key| !key.trim().is_empty())
            .ok_or(ConfigError::MissingApiKey)?;
        let temperature = overrides
            .temperature
            .or(file.temperature)
            .unwrap_or(DEFAULT_TEMPERATURE);
        if !(0.0..=2.0).contains(&temperature) {
            return Err(ConfigError::InvalidTemperature(temperature));
        }
        let timeout_secs = overrides
            .request_timeout_secs
            .or(file.request_timeout_secs)
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);
        MappingSource::Chat(ChatMappingConfig {
            base_url: overrides
                .api_base_url
                .or(file.api_base_url)
                .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
            api_key,
            model: overrides
                .model
                .or(file.model)
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            temperature,
            // 0 disables the timeout.
            timeout: (timeout_secs > 0).then(|| Duration::from_secs(timeout_secs)),
            mapping_file: Some(field_mapping_file.clone()),
        })
    };

    Ok(ResolvedConfig {
        input_dir: overrides
            .input_dir
            .or(file.input_dir)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT_DIR)),
        output_dir: overrides
            .output_dir
            .or(file.output_dir)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR)),
        rows_per_file,
        field_mapping_file,
        mapping_source,
    })
}
