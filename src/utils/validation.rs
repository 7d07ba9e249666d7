use crate::utils::error::{EtlError, Result, RowError, RowErrorKind};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(EtlError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_delimiter(field_name: &str, delimiter: char) -> Result<u8> {
    if !delimiter.is_ascii() || delimiter == '"' || delimiter == '\n' || delimiter == '\r' {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: delimiter.to_string(),
            reason: "Delimiter must be a single ASCII character other than a quote or newline"
                .to_string(),
        });
    }
    Ok(delimiter as u8)
}

pub fn validate_prefix_pair(viewer_prefix: &str, api_prefix: &str) -> Result<()> {
    validate_url("viewer_prefix", viewer_prefix)?;
    validate_url("api_prefix", api_prefix)?;
    if viewer_prefix == api_prefix {
        return Err(EtlError::InvalidConfigValueError {
            field: "api_prefix".to_string(),
            value: api_prefix.to_string(),
            reason: "API prefix must differ from the viewer prefix".to_string(),
        });
    }
    Ok(())
}

const RESERVED_CHARS: &[char] = &['/', '\\', '<', '>', ':', '"', '|', '?', '*'];

/// Device names Windows refuses as a file stem, whatever the extension.
const RESERVED_STEMS: &[&str] = &[
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
    "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

fn is_reserved_stem(name: &str) -> bool {
    let stem = name.split('.').next().unwrap_or(name).trim_end();
    RESERVED_STEMS
        .iter()
        .any(|reserved| reserved.eq_ignore_ascii_case(stem))
}

/// Checks that a table-supplied name can be used verbatim as a file stem
/// inside the output directory.
pub fn validate_output_name(name: &str) -> std::result::Result<(), RowError> {
    let reject = |reason: &str| {
        Err(RowError::new(
            RowErrorKind::InvalidOutputName,
            format!("'{}' {}", name, reason),
        ))
    };

    if name.trim().is_empty() {
        return reject("is empty");
    }
    if name.starts_with('.') {
        return reject("starts with a dot");
    }
    if name.ends_with(' ') {
        return reject("ends with a space");
    }
    if let Some(c) = name.chars().find(|c| RESERVED_CHARS.contains(c)) {
        return reject(&format!("contains reserved character '{}'", c));
    }
    if name.chars().any(char::is_control) {
        return reject("contains control characters");
    }
    if is_reserved_stem(name) {
        return reject("is a reserved device name");
    }
    Ok(())
}
