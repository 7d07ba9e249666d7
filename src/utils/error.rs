use serde::Serialize;
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("YAML serialization error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Input,
    Output,
    Configuration,
    Processing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl EtlError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            EtlError::ApiError(_) => ErrorCategory::Network,
            EtlError::CsvError(_) => ErrorCategory::Input,
            EtlError::IoError(_) | EtlError::YamlError(_) => ErrorCategory::Output,
            EtlError::SerializationError(_) | EtlError::ProcessingError { .. } => {
                ErrorCategory::Processing
            }
            EtlError::ConfigError { .. }
            | EtlError::MissingConfigError { .. }
            | EtlError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Input | ErrorCategory::Processing => ErrorSeverity::High,
            ErrorCategory::Output | ErrorCategory::Configuration => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            EtlError::ApiError(_) => "Could not reach the remote share endpoint".to_string(),
            EtlError::CsvError(e) => format!("The input table could not be parsed: {}", e),
            EtlError::IoError(e) => format!("A file could not be read or written: {}", e),
            EtlError::SerializationError(e) => format!("Could not serialize data: {}", e),
            EtlError::YamlError(e) => format!("Could not write a config document: {}", e),
            EtlError::ConfigError { message } => format!("Invalid configuration: {}", message),
            EtlError::MissingConfigError { field } => {
                format!("Missing required setting '{}'", field)
            }
            EtlError::InvalidConfigValueError { field, reason, .. } => {
                format!("Setting '{}' is invalid: {}", field, reason)
            }
            EtlError::ProcessingError { message } => message.clone(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check your network connection and the API prefix",
            ErrorCategory::Input => "Check that the input file is a delimited table with the expected columns",
            ErrorCategory::Output => "Check that the output directory exists and is writable",
            ErrorCategory::Configuration => "Review the command line flags or the TOML config file",
            ErrorCategory::Processing => "Re-run with --verbose for more detail",
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;

/// Classification of a single row's failure. A row failing never stops the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum RowErrorKind {
    InvalidLink,
    InvalidOutputName,
    FetchFailed,
    DecompressionFailed,
    #[serde(rename = "MalformedJSON")]
    MalformedJson,
    WriteFailed,
}

impl RowErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RowErrorKind::InvalidLink => "InvalidLink",
            RowErrorKind::InvalidOutputName => "InvalidOutputName",
            RowErrorKind::FetchFailed => "FetchFailed",
            RowErrorKind::DecompressionFailed => "DecompressionFailed",
            RowErrorKind::MalformedJson => "MalformedJSON",
            RowErrorKind::WriteFailed => "WriteFailed",
        }
    }
}

impl fmt::Display for RowErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind}: {message}")]
pub struct RowError {
    pub kind: RowErrorKind,
    pub message: String,
}

impl RowError {
    pub fn new(kind: RowErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn invalid_link(message: impl Into<String>) -> Self {
        Self::new(RowErrorKind::InvalidLink, message)
    }

    pub fn fetch_failed(message: impl Into<String>) -> Self {
        Self::new(RowErrorKind::FetchFailed, message)
    }

    pub fn decompression_failed(message: impl Into<String>) -> Self {
        Self::new(RowErrorKind::DecompressionFailed, message)
    }

    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new(RowErrorKind::MalformedJson, message)
    }

    pub fn write_failed(message: impl Into<String>) -> Self {
        Self::new(RowErrorKind::WriteFailed, message)
    }
}

pub type RowResult<T> = std::result::Result<T, RowError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_error_display_includes_kind() {
        let err = RowError::malformed_json("missing config_file");
        assert_eq!(err.to_string(), "MalformedJSON: missing config_file");
    }

    #[test]
    fn test_severity_by_category() {
        let err = EtlError::ConfigError {
            message: "bad".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.severity(), ErrorSeverity::Critical);

        let err = EtlError::ProcessingError {
            message: "bad".to_string(),
        };
        assert_eq!(err.severity(), ErrorSeverity::High);
    }
}
