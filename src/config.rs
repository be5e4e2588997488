use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::constants::{
    DEFAULT_CONFIG_FILE, DEFAULT_LOG_DIR, DEFAULT_LOG_FILE_PREFIX, DEFAULT_OUTPUT_DIR,
};
use crate::error::{IngestError, Result};

/// Environment override for the report directory
pub const OUTPUT_DIR_ENV: &str = "LISTING_INGEST_OUTPUT_DIR";

/// CLI settings. The parse engine itself takes no configuration.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub output: OutputConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    pub dir: PathBuf,
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            pretty: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    pub dir: PathBuf,
    pub file_prefix: String,
    pub json_file: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_LOG_DIR),
            file_prefix: DEFAULT_LOG_FILE_PREFIX.to_string(),
            json_file: true,
        }
    }
}

/// Read a config file that may be absent. Only a missing file yields `None`.
fn read_optional(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(IngestError::Config(format!(
            "Failed to read config file '{}': {}",
            path.display(),
            e
        ))),
    }
}

impl Config {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    /// Load from `path` when given (it must exist), otherwise from
    /// `listing-ingest.toml` in the working directory if present, otherwise
    /// defaults. `LISTING_INGEST_OUTPUT_DIR` overrides the report directory.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => {
                let content = fs::read_to_string(path).map_err(|e| {
                    IngestError::Config(format!(
                        "Failed to read config file '{}': {}",
                        path.display(),
                        e
                    ))
                })?;
                Self::from_toml_str(&content)?
            }
            None => match read_optional(Path::new(DEFAULT_CONFIG_FILE))? {
                Some(content) => Self::from_toml_str(&content)?,
                None => Self::default(),
            },
        };

        if let Ok(dir) = std::env::var(OUTPUT_DIR_ENV) {
            if !dir.trim().is_empty() {
                config.output.dir = PathBuf::from(dir);
            }
        }
        Ok(config)
    }
}
