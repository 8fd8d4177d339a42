//! Configuration management for the African fiscal dashboard

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable prefix, e.g. `AFRIFISCAL__API__BASE_URL`
pub const ENV_PREFIX: &str = "AFRIFISCAL";

/// Default configuration file name (without extension)
pub const DEFAULT_CONFIG_FILE: &str = "afrifiscal";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// Remote analytics API configuration
    #[serde(default)]
    pub api: ApiConfig,

    /// Dashboard web server configuration
    #[serde(default)]
    pub webserver: WebServerConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Remote analytics API configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiConfig {
    /// Base URL every endpoint path is appended to
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Blanket request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

/// Dashboard web server configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WebServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format (json or pretty)
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_base_url() -> String {
    "http://127.0.0.1:8000/api".to_string()
}

const fn default_timeout_seconds() -> u64 {
    30
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

const fn default_port() -> u16 {
    3000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl Default for WebServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from `afrifiscal.toml` (optional) and the environment
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded, parsed or validated.
    pub fn load() -> crate::Result<Self> {
        Self::build(config::File::with_name(DEFAULT_CONFIG_FILE).required(false))
    }

    /// Load configuration from an explicit file plus the environment
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing or the result is invalid.
    pub fn load_from(path: &Path) -> crate::Result<Self> {
        Self::build(config::File::from(path).required(true))
    }

    fn build<S>(file: S) -> crate::Result<Self>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let config: Self = config::Config::builder()
            .add_source(file)
            .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// Check values that deserialize fine but cannot work at runtime
    ///
    /// # Errors
    ///
    /// Returns a validation error naming the offending field.
    pub fn validate(&self) -> crate::Result<()> {
        let base_url = self.api.base_url.trim();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(crate::Error::validation(
                "api.base_url",
                format!("'{base_url}' is not an absolute http(s) URL"),
            ));
        }
        if self.api.timeout_seconds == 0 {
            return Err(crate::Error::validation(
                "api.timeout_seconds",
                "must be greater than zero",
            ));
        }
        if !matches!(self.logging.format.as_str(), "json" | "pretty") {
            return Err(crate::Error::validation(
                "logging.format",
                format!("expected 'json' or 'pretty', got '{}'", self.logging.format),
            ));
        }
        Ok(())
    }

    /// Render the resolved configuration as TOML
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized.
    pub fn to_toml(&self) -> crate::Result<String> {
        toml::to_string_pretty(self).map_err(|e| crate::Error::configuration(e.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_config_default() {
        let config = Config::default();

        assert_eq!(config.api.base_url, "http://127.0.0.1:8000/api");
        assert_eq!(config.api.timeout_seconds, 30);
        assert_eq!(config.webserver.host, "127.0.0.1");
        assert_eq!(config.webserver.port, 3000);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, "pretty");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_config_deserialization() {
        let config: Config = serde_json::from_str(
            r#"{
                "api": {"base_url": "https://analytics.example.org/api"},
                "logging": {"format": "json"}
            }"#,
        )
        .unwrap();

        assert_eq!(config.api.base_url, "https://analytics.example.org/api");
        assert_eq!(config.api.timeout_seconds, 30); // Uses default
        assert_eq!(config.webserver.port, 3000); // Uses default
        assert_eq!(config.logging.format, "json");
    }

    #[test]
    fn test_validate_rejects_relative_base_url() {
        let mut config = Config::default();
        config.api.base_url = "/api".to_string();

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("api.base_url"));
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut config = Config::default();
        config.api.timeout_seconds = 0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_unknown_log_format() {
        let mut config = Config::default();
        config.logging.format = "xml".to_string();

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[api]\nbase_url = \"https://fiscal.example.org/api\"\ntimeout_seconds = 10\n\n[webserver]\nport = 8088"
        )
        .unwrap();

        let config = Config::load_from(file.path()).unwrap();

        assert_eq!(config.api.base_url, "https://fiscal.example.org/api");
        assert_eq!(config.api.timeout_seconds, 10);
        assert_eq!(config.webserver.port, 8088);
        assert_eq!(config.webserver.host, "127.0.0.1");
    }

    #[test]
    fn test_load_from_missing_file_fails() {
        let result = Config::load_from(Path::new("/nonexistent/afrifiscal.toml"));
        assert!(matches!(result, Err(crate::Error::Configuration { .. })));
    }

    #[test]
    fn test_to_toml_round_trips_through_loader() {
        let mut config = Config::default();
        config.api.base_url = "https://fiscal.example.org/api".to_string();
        config.webserver.port = 9090;
        config.logging.format = "json".to_string();
        let rendered = config.to_toml().unwrap();
        assert!(rendered.contains("[api]"));

        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(rendered.as_bytes()).unwrap();

        assert_eq!(Config::load_from(file.path()).unwrap(), config);
    }
}
