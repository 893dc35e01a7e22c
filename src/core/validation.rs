//! Validation of configuration and argument values
//!
//! Used both by clap value parsers and by the TOML loader, so a value is
//! checked the same way wherever it comes from.

use crate::render::rasterizer::{MAX_RENDER_SCALE, MIN_RENDER_SCALE};
use crate::render::OutputMode;

/// Smallest accepted request timeout in seconds
pub const MIN_TIMEOUT_SECS: u64 = 1;
/// Largest accepted request timeout in seconds
pub const MAX_TIMEOUT_SECS: u64 = 120;

pub const LOG_LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];
pub const LOG_FORMATS: [&str; 3] = ["text", "ext", "json"];

/// A rejected value, with a message naming the value and the accepted range
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    message: String,
}

impl ValidationError {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Request timeout in whole seconds, 1..=120
pub fn validate_timeout(seconds: i64) -> Result<u64, ValidationError> {
    match u64::try_from(seconds) {
        Ok(secs) if (MIN_TIMEOUT_SECS..=MAX_TIMEOUT_SECS).contains(&secs) => Ok(secs),
        _ => Err(ValidationError::new(&format!(
            "timeout must be between {} and {} seconds, got {}",
            MIN_TIMEOUT_SECS, MAX_TIMEOUT_SECS, seconds
        ))),
    }
}

/// clap value parser for `--timeout`
pub fn parse_timeout(value: &str) -> Result<u64, String> {
    let seconds = value
        .trim()
        .parse::<i64>()
        .map_err(|_| format!("'{}' is not a whole number of seconds", value))?;
    validate_timeout(seconds).map_err(|e| e.to_string())
}

pub fn validate_render_scale(scale: f64) -> Result<f64, ValidationError> {
    if scale.is_finite() && (MIN_RENDER_SCALE..=MAX_RENDER_SCALE).contains(&scale) {
        Ok(scale)
    } else {
        Err(ValidationError::new(&format!(
            "render-scale must be between {} and {}, got {}",
            MIN_RENDER_SCALE, MAX_RENDER_SCALE, scale
        )))
    }
}

pub fn validate_log_level(level: &str) -> Result<String, ValidationError> {
    let level = level.trim().to_lowercase();
    if LOG_LEVELS.contains(&level.as_str()) {
        Ok(level)
    } else {
        Err(ValidationError::new(&format!(
            "unknown log level '{}' (expected one of: {})",
            level,
            LOG_LEVELS.join(", ")
        )))
    }
}

pub fn validate_log_format(format: &str) -> Result<String, ValidationError> {
    let format = format.trim().to_lowercase();
    if LOG_FORMATS.contains(&format.as_str()) {
        Ok(format)
    } else {
        Err(ValidationError::new(&format!(
            "unknown log format '{}' (expected one of: {})",
            format,
            LOG_FORMATS.join(", ")
        )))
    }
}

/// Base URL of the status API; must be http(s) with a host
pub fn validate_api_url(url: &str) -> Result<String, ValidationError> {
    let trimmed = url.trim();
    let rest = trimmed
        .strip_prefix("http://")
        .or_else(|| trimmed.strip_prefix("https://"));
    match rest {
        Some(host) if !host.is_empty() && !host.starts_with('/') => {
            Ok(trimmed.trim_end_matches('/').to_string())
        }
        _ => Err(ValidationError::new(&format!(
            "api-url must be an http:// or https:// URL with a host, got '{}'",
            url
        ))),
    }
}

/// Configured output mode; unlike the per-command override, unknown names are errors here
pub fn validate_output_mode(name: &str) -> Result<OutputMode, ValidationError> {
    OutputMode::from_name(name.trim()).ok_or_else(|| {
        ValidationError::new(&format!(
            "unknown output mode '{}' (expected one of: {})",
            name,
            OutputMode::names().collect::<Vec<_>>().join(", ")
        ))
    })
}

/// Field paths are dotted identifiers with at most two levels below an optional prefix
pub fn validate_field_path(path: &str) -> Result<String, ValidationError> {
    let segments: Vec<&str> = path.split('.').collect();
    let well_formed = segments.len() <= 3
        && segments
            .iter()
            .all(|s| !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'));
    if well_formed {
        Ok(path.to_string())
    } else {
        Err(ValidationError::new(&format!(
            "invalid field path '{}' (expected e.g. 'health' or 'device.ip')",
            path
        )))
    }
}
