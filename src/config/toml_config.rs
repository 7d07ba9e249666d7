use crate::core::link::{DEFAULT_API_PREFIX, DEFAULT_VIEWER_PREFIX};
use crate::core::ConfigProvider;
use crate::utils::error::{EtlError, Result};
use crate::utils::validation::{
    validate_delimiter, validate_path, validate_prefix_pair, validate_url, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub source: SourceConfig,
    #[serde(default)]
    pub remote: RemoteConfig,
    pub load: LoadConfig,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub input: String,
    #[serde(default)]
    pub has_headers: bool,
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteConfig {
    #[serde(default = "default_viewer_prefix")]
    pub viewer_prefix: String,
    #[serde(default = "default_api_prefix")]
    pub api_prefix: String,
    pub timeout_seconds: Option<u64>,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            viewer_prefix: default_viewer_prefix(),
            api_prefix: default_api_prefix(),
            timeout_seconds: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadConfig {
    pub output_path: String,
    pub report_path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub verbose: Option<bool>,
    pub json: Option<bool>,
}

fn default_delimiter() -> char {
    ','
}

fn default_viewer_prefix() -> String {
    DEFAULT_VIEWER_PREFIX.to_string()
}

fn default_api_prefix() -> String {
    DEFAULT_API_PREFIX.to_string()
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(EtlError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| EtlError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` placeholders with environment values.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").map_err(|e| EtlError::ConfigError {
            message: format!("invalid placeholder pattern: {}", e),
        })?;

        let mut missing = Vec::new();
        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| {
                missing.push(var_name.to_string());
                String::new()
            })
        });

        if !missing.is_empty() {
            return Err(EtlError::ConfigError {
                message: format!("unset environment variables: {}", missing.join(", ")),
            });
        }

        Ok(result.into_owned())
    }

    pub fn verbose(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|l| l.verbose)
            .unwrap_or(false)
    }

    pub fn json_logs(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn input_path(&self) -> &str {
        &self.source.input
    }

    fn output_path(&self) -> &str {
        &self.load.output_path
    }

    fn viewer_prefix(&self) -> &str {
        &self.remote.viewer_prefix
    }

    fn api_prefix(&self) -> &str {
        &self.remote.api_prefix
    }

    fn has_headers(&self) -> bool {
        self.source.has_headers
    }

    fn delimiter(&self) -> u8 {
        self.source.delimiter as u8
    }

    fn request_timeout(&self) -> Option<Duration> {
        self.remote.timeout_seconds.map(Duration::from_secs)
    }

    fn report_path(&self) -> Option<&str> {
        self.load.report_path.as_deref()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_path("source.input", &self.source.input)?;
        validate_delimiter("source.delimiter", self.source.delimiter)?;
        validate_url("remote.viewer_prefix", &self.remote.viewer_prefix)?;
        validate_url("remote.api_prefix", &self.remote.api_prefix)?;
        validate_prefix_pair(&self.remote.viewer_prefix, &self.remote.api_prefix)?;
        if self.remote.timeout_seconds == Some(0) {
            return Err(EtlError::InvalidConfigValueError {
                field: "remote.timeout_seconds".to_string(),
                value: "0".to_string(),
                reason: "Timeout must be at least 1 second".to_string(),
            });
        }
        validate_path("load.output_path", &self.load.output_path)?;
        if let Some(report) = &self.load.report_path {
            validate_path("load.report_path", report)?;
        }
        Ok(())
    }
}
