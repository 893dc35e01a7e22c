//! TOML configuration file loading
//!
//! The file is optional unless named explicitly. Keys are kebab-case; unknown
//! keys are ignored with a warning. Command line values are applied on top by
//! `AppConfig::apply_args`.

use super::args::Args;
use crate::api::client::{ApiSettings, DEFAULT_TIMEOUT_SECS};
use crate::core::error_handling::ContextualError;
use crate::core::logging::LogSettings;
use crate::core::validation::{self, ValidationError};
use crate::render::rasterizer::DEFAULT_RENDER_SCALE;
use crate::render::{FieldFilters, FieldToggle, OutputMode, Theme};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8080";
pub const DEFAULT_DECORATION: &str = "[BDS]";
pub const DEFAULT_TYPST_BIN: &str = "typst";

const KNOWN_KEYS: [&str; 15] = [
    "api-url",
    "token",
    "timeout",
    "decoration",
    "output-modes",
    "render-scale",
    "output-dir",
    "typst-bin",
    "color",
    "no-color",
    "log-level",
    "log-format",
    "log-file",
    "theme",
    "fields",
];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration file does not exist: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("could not read configuration file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse configuration file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// A value was present but out of range or of the wrong type
    #[error("{origin}: {message}")]
    Invalid { origin: String, message: String },
}

impl ConfigError {
    fn invalid(origin: &str, key: &str, error: impl std::fmt::Display) -> Self {
        ConfigError::Invalid {
            origin: origin.to_string(),
            message: format!("invalid '{}': {}", key, error),
        }
    }
}

impl ContextualError for ConfigError {
    fn is_user_actionable(&self) -> bool {
        matches!(self, ConfigError::Invalid { .. })
    }

    fn user_message(&self) -> Option<&str> {
        match self {
            ConfigError::Invalid { message, .. } => Some(message),
            _ => None,
        }
    }
}

/// Effective settings after merging defaults, the configuration file and the command line
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub api_url: String,
    pub token: Option<String>,
    pub timeout_secs: u64,
    /// Short label prefixed to report headers
    pub decoration: String,
    pub output_modes: Vec<OutputMode>,
    pub render_scale: f64,
    pub output_dir: PathBuf,
    pub typst_bin: String,
    pub color: Option<bool>,
    pub log_level: Option<String>,
    pub log_format: Option<String>,
    pub log_file: Option<PathBuf>,
    pub theme: Theme,
    pub fields: FieldFilters,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            token: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            decoration: DEFAULT_DECORATION.to_string(),
            output_modes: vec![OutputMode::Text],
            render_scale: DEFAULT_RENDER_SCALE,
            output_dir: PathBuf::from("."),
            typst_bin: DEFAULT_TYPST_BIN.to_string(),
            color: None,
            log_level: None,
            log_format: None,
            log_file: None,
            theme: Theme::default(),
            fields: FieldFilters::default(),
        }
    }
}

impl AppConfig {
    /// `<config dir>/BdsQuery/bdsquery.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("BdsQuery").join("bdsquery.toml"))
    }

    /// File to load: an explicit path must exist, the default path is optional
    pub fn resolve_path(explicit: Option<&Path>) -> Result<Option<PathBuf>, ConfigError> {
        match explicit {
            Some(path) if path.exists() => Ok(Some(path.to_path_buf())),
            Some(path) => Err(ConfigError::NotFound {
                path: path.to_path_buf(),
            }),
            None => Ok(Self::default_path().filter(|p| p.exists())),
        }
    }

    /// Defaults overlaid with the configuration file, if any
    pub async fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = Self::resolve_path(explicit)? else {
            log::debug!("No configuration file, using defaults");
            return Ok(Self::default());
        };

        log::debug!("Loading configuration from {}", path.display());
        let contents =
            tokio::fs::read_to_string(&path)
                .await
                .map_err(|source| ConfigError::Read {
                    path: path.clone(),
                    source,
                })?;
        let table = toml::from_str::<toml::Table>(&contents).map_err(|source| {
            ConfigError::Parse {
                path: path.clone(),
                source,
            }
        })?;

        let mut config = Self::default();
        config.apply_toml_values(&table, &path.display().to_string())?;
        Ok(config)
    }

    /// Parse configuration text directly; `origin` names it in error messages
    pub fn from_toml_str(contents: &str, origin: &str) -> Result<Self, ConfigError> {
        let table =
            toml::from_str::<toml::Table>(contents).map_err(|source| ConfigError::Parse {
                path: PathBuf::from(origin),
                source,
            })?;
        let mut config = Self::default();
        config.apply_toml_values(&table, origin)?;
        Ok(config)
    }

    /// Apply TOML configuration values
    pub fn apply_toml_values(
        &mut self,
        config: &toml::Table,
        origin: &str,
    ) -> Result<(), ConfigError> {
        for key in config.keys() {
            if !KNOWN_KEYS.contains(&key.as_str()) {
                log::warn!("{}: ignoring unknown key '{}'", origin, key);
            }
        }

        if let Some(url) = Self::string_field(config, "api-url", origin)? {
            self.api_url =
                validation::validate_api_url(url).map_err(|e| ConfigError::invalid(origin, "api-url", e))?;
        }
        if let Some(token) = Self::string_field(config, "token", origin)? {
            self.token = Some(token.to_string()).filter(|t| !t.is_empty());
        }
        if let Some(value) = config.get("timeout") {
            let seconds = value
                .as_integer()
                .ok_or_else(|| ConfigError::invalid(origin, "timeout", "expected an integer"))?;
            self.timeout_secs = validation::validate_timeout(seconds)
                .map_err(|e| ConfigError::invalid(origin, "timeout", e))?;
        }
        if let Some(decoration) = Self::string_field(config, "decoration", origin)? {
            self.decoration = decoration.to_string();
        }
        if config.contains_key("output-modes") {
            let modes = Self::string_array_field(config, "output-modes", origin)?
                .iter()
                .map(|name| validation::validate_output_mode(name))
                .collect::<Result<Vec<_>, ValidationError>>()
                .map_err(|e| ConfigError::invalid(origin, "output-modes", e))?;
            // first occurrence keeps its position
            self.output_modes = modes.into_iter().fold(Vec::new(), |mut unique, mode| {
                if !unique.contains(&mode) {
                    unique.push(mode);
                }
                unique
            });
        }
        if let Some(value) = config.get("render-scale") {
            let scale = value
                .as_float()
                .or_else(|| value.as_integer().map(|i| i as f64))
                .ok_or_else(|| ConfigError::invalid(origin, "render-scale", "expected a number"))?;
            self.render_scale = validation::validate_render_scale(scale)
                .map_err(|e| ConfigError::invalid(origin, "render-scale", e))?;
        }
        if let Some(dir) = Self::string_field(config, "output-dir", origin)? {
            self.output_dir = PathBuf::from(dir);
        }
        if let Some(bin) = Self::string_field(config, "typst-bin", origin)? {
            self.typst_bin = bin.to_string();
        }
        if let Some(color) = config.get("color").and_then(|v| v.as_bool()) {
            self.color = Some(color);
        }
        if let Some(no_color) = config.get("no-color").and_then(|v| v.as_bool()) {
            self.color = Some(!no_color);
        }
        if let Some(level) = Self::string_field(config, "log-level", origin)? {
            self.log_level = Some(
                validation::validate_log_level(level)
                    .map_err(|e| ConfigError::invalid(origin, "log-level", e))?,
            );
        }
        if let Some(format) = Self::string_field(config, "log-format", origin)? {
            self.log_format = Some(
                validation::validate_log_format(format)
                    .map_err(|e| ConfigError::invalid(origin, "log-format", e))?,
            );
        }
        if let Some(log_file) = Self::string_field(config, "log-file", origin)? {
            // "none" and "-" disable file logging
            self.log_file = if log_file.eq_ignore_ascii_case("none") || log_file == "-" {
                None
            } else {
                Some(PathBuf::from(log_file))
            };
        }
        if let Some(theme) = config.get("theme") {
            self.theme = theme
                .clone()
                .try_into::<Theme>()
                .map_err(|e| ConfigError::invalid(origin, "theme", e))?;
        }
        if let Some(fields) = config.get("fields") {
            let toggles = fields
                .clone()
                .try_into::<Vec<FieldToggle>>()
                .map_err(|e| ConfigError::invalid(origin, "fields", e))?;
            for toggle in &toggles {
                validation::validate_field_path(&toggle.path)
                    .map_err(|e| ConfigError::invalid(origin, "fields", e))?;
            }
            self.fields = FieldFilters::new(toggles);
        }

        Ok(())
    }

    /// Command line values take precedence over the file
    pub fn apply_args(&mut self, args: &Args) -> Result<(), ConfigError> {
        const ORIGIN: &str = "command line";

        if let Some(url) = &args.api_url {
            self.api_url = validation::validate_api_url(url)
                .map_err(|e| ConfigError::invalid(ORIGIN, "--api-url", e))?;
        }
        if let Some(token) = &args.token {
            self.token = Some(token.clone()).filter(|t| !t.is_empty());
        }
        if let Some(seconds) = args.timeout {
            self.timeout_secs = seconds;
        }
        if let Some(dir) = &args.output_dir {
            self.output_dir = dir.clone();
        }
        if let Some(color) = args.color_choice() {
            self.color = Some(color);
        }
        if let Some(level) = &args.log_level {
            self.log_level = Some(level.clone());
        }
        if let Some(format) = &args.log_format {
            self.log_format = Some(format.clone());
        }
        if let Some(log_file) = args.log_file_choice() {
            self.log_file = log_file;
        }
        Ok(())
    }

    pub fn api_settings(&self) -> ApiSettings {
        ApiSettings::new(self.api_url.clone())
            .with_token(self.token.clone())
            .with_timeout(Duration::from_secs(self.timeout_secs))
    }

    pub fn log_settings(&self, color: bool) -> LogSettings {
        LogSettings {
            level: self.log_level.clone(),
            format: self.log_format.clone(),
            file: self.log_file.clone(),
            color,
        }
    }

    fn string_field<'a>(
        config: &'a toml::Table,
        key: &str,
        origin: &str,
    ) -> Result<Option<&'a str>, ConfigError> {
        match config.get(key) {
            None => Ok(None),
            Some(value) => value
                .as_str()
                .map(Some)
                .ok_or_else(|| ConfigError::invalid(origin, key, "expected a string")),
        }
    }

    /// Accepts both `key = "a"` and `key = ["a", "b"]`
    fn string_array_field(
        config: &toml::Table,
        key: &str,
        origin: &str,
    ) -> Result<Vec<String>, ConfigError> {
        let Some(value) = config.get(key) else {
            return Ok(Vec::new());
        };

        if let Some(single) = value.as_str() {
            return Ok(vec![single.to_string()]);
        }
        let array = value
            .as_array()
            .ok_or_else(|| ConfigError::invalid(origin, key, "expected a string or an array"))?;
        array
            .iter()
            .map(|item| {
                item.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| ConfigError::invalid(origin, key, "array items must be strings"))
            })
            .collect()
    }
}
