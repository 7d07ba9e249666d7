pub mod cli;
pub mod toml_config;

use crate::core::link::{DEFAULT_API_PREFIX, DEFAULT_VIEWER_PREFIX};
use crate::core::ConfigProvider;
use crate::utils::error::{EtlError, Result};
use crate::utils::validation::{validate_delimiter, validate_path, validate_prefix_pair, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(Parser))]
#[cfg_attr(feature = "cli", command(name = "sharelink-etl"))]
#[cfg_attr(
    feature = "cli",
    command(about = "Turn a sheet of simulation share links into individual config documents")
)]
pub struct CliConfig {
    /// Delimited table with share links in column 4 and file names in column 5
    #[cfg_attr(feature = "cli", arg(long, short, default_value = "input.csv"))]
    pub input: String,

    #[cfg_attr(feature = "cli", arg(long, default_value = "./dump"))]
    pub output_path: String,

    #[cfg_attr(feature = "cli", arg(long, default_value = DEFAULT_VIEWER_PREFIX))]
    pub viewer_prefix: String,

    #[cfg_attr(feature = "cli", arg(long, default_value = DEFAULT_API_PREFIX))]
    pub api_prefix: String,

    #[cfg_attr(feature = "cli", arg(long, default_value = ","))]
    pub delimiter: char,

    #[cfg_attr(feature = "cli", arg(long, help = "Skip the first row of the table"))]
    pub has_headers: bool,

    #[cfg_attr(feature = "cli", arg(long, help = "Per-request timeout; unlimited when unset"))]
    pub timeout_seconds: Option<u64>,

    #[cfg_attr(feature = "cli", arg(long, help = "Write a JSON run report to this path"))]
    pub report: Option<String>,

    #[cfg_attr(feature = "cli", arg(long, help = "Enable verbose output"))]
    pub verbose: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            input: "input.csv".to_string(),
            output_path: "./dump".to_string(),
            viewer_prefix: DEFAULT_VIEWER_PREFIX.to_string(),
            api_prefix: DEFAULT_API_PREFIX.to_string(),
            delimiter: ',',
            has_headers: false,
            timeout_seconds: None,
            report: None,
            verbose: false,
        }
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("input", &self.input)?;
        validate_path("output_path", &self.output_path)?;
        validate_prefix_pair(&self.viewer_prefix, &self.api_prefix)?;
        validate_delimiter("delimiter", self.delimiter)?;
        if self.timeout_seconds == Some(0) {
            return Err(EtlError::InvalidConfigValueError {
                field: "timeout_seconds".to_string(),
                value: "0".to_string(),
                reason: "Timeout must be at least 1 second".to_string(),
            });
        }
        if let Some(report) = &self.report {
            validate_path("report", report)?;
        }
        Ok(())
    }
}

impl ConfigProvider for CliConfig {
    fn input_path(&self) -> &str {
        &self.input
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn viewer_prefix(&self) -> &str {
        &self.viewer_prefix
    }

    fn api_prefix(&self) -> &str {
        &self.api_prefix
    }

    fn has_headers(&self) -> bool {
        self.has_headers
    }

    fn delimiter(&self) -> u8 {
        // validated to be ASCII
        self.delimiter as u8
    }

    fn request_timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }

    fn report_path(&self) -> Option<&str> {
        self.report.as_deref()
    }
}
