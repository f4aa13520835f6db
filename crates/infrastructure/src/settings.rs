//! Settings loading.
//!
//! Values come from an optional TOML file overlaid with environment
//! variables prefixed `TRACKPROBE_`. Nested keys use `__`, e.g.
//! `TRACKPROBE_INFLUX__TOKEN`.

use std::collections::HashMap;
use std::path::PathBuf;

use config::{Config, Environment, File, FileFormat};
use trackprobe_domain::ProbeSettings;
use url::Url;

/// Default environment variable prefix.
pub const ENV_PREFIX: &str = "TRACKPROBE";

/// Default settings file, looked up in the working directory.
pub const DEFAULT_SETTINGS_FILE: &str = "trackprobe.toml";

/// Errors raised while resolving settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// A source could not be read or deserialized.
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// A required value is empty.
    #[error("missing required setting: {0}")]
    Missing(&'static str),

    /// The base URL is not an absolute URL.
    #[error("invalid base_url {url}: {message}")]
    InvalidBaseUrl {
        /// Configured value.
        url: String,
        /// Parser message.
        message: String,
    },
}

/// Builder resolving [`ProbeSettings`] from file and environment.
#[derive(Debug, Clone)]
pub struct SettingsLoader {
    file: Option<PathBuf>,
    file_required: bool,
    env_prefix: String,
    env_override: Option<HashMap<String, String>>,
}

impl Default for SettingsLoader {
    fn default() -> Self {
        Self {
            file: Some(PathBuf::from(DEFAULT_SETTINGS_FILE)),
            file_required: false,
            env_prefix: ENV_PREFIX.to_string(),
            env_override: None,
        }
    }
}

impl SettingsLoader {
    /// Loader reading `trackprobe.toml` (if present) and `TRACKPROBE_*`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads the given file, which then must exist.
    #[must_use]
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file = Some(path.into());
        self.file_required = true;
        self
    }

    /// Skips the settings file entirely.
    #[must_use]
    pub fn without_file(mut self) -> Self {
        self.file = None;
        self
    }

    /// Uses `vars` instead of the process environment.
    #[must_use]
    pub fn with_env(mut self, vars: HashMap<String, String>) -> Self {
        self.env_override = Some(vars);
        self
    }

    /// Resolves and validates the settings.
    ///
    /// # Errors
    /// Returns an error if a source cannot be read, a required value is
    /// missing, or the base URL is not absolute.
    pub fn load(self) -> Result<ProbeSettings, SettingsError> {
        let mut builder = Config::builder();
        if let Some(path) = &self.file {
            builder = builder.add_source(
                File::from(path.as_path())
                    .format(FileFormat::Toml)
                    .required(self.file_required),
            );
        }
        builder = builder.add_source(
            Environment::with_prefix(&self.env_prefix)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .source(self.env_override),
        );

        let settings: ProbeSettings = builder.build()?.try_deserialize()?;
        let settings = validate(settings)?;
        tracing::debug!(?settings, "settings resolved");
        Ok(settings)
    }
}

fn validate(mut settings: ProbeSettings) -> Result<ProbeSettings, SettingsError> {
    if settings.base_url.trim().is_empty() {
        return Err(SettingsError::Missing("base_url"));
    }
    if settings.login.trim().is_empty() {
        return Err(SettingsError::Missing("login"));
    }
    if settings.token.trim().is_empty() {
        return Err(SettingsError::Missing("token"));
    }
    if !settings.base_url.ends_with('/') {
        settings.base_url.push('/');
    }
    Url::parse(&settings.base_url).map_err(|e| SettingsError::InvalidBaseUrl {
        url: settings.base_url.clone(),
        message: e.to_string(),
    })?;
    Ok(settings)
}
