//! Configuration management for the page window

use crate::{
    Result,
    types::{DEFAULT_PAGE_SIZE, PagePolicy, PageSize},
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use validator::Validate;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct PagerConfig {
    /// Pagination configuration
    #[serde(default)]
    #[validate(nested)]
    pub pagination: PaginationConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Pagination configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct PaginationConfig {
    /// Items per page
    #[serde(default = "default_page_size")]
    #[validate(range(min = 1, max = 100_000))]
    pub page_size: usize,

    /// Zero-based page to open on
    #[serde(default)]
    pub initial_page: usize,

    /// Handling of out-of-range page requests
    #[serde(default)]
    pub policy: PagePolicy,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level or `EnvFilter` directive
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format (json or pretty)
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
const fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            initial_page: 0,
            policy: PagePolicy::default(),
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

impl PaginationConfig {
    /// Configured page size as a validated [`PageSize`]
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidConfiguration`] if the size is zero.
    pub fn page_size(&self) -> Result<PageSize> {
        PageSize::new(self.page_size)
    }
}

impl LoggingConfig {
    /// Whether structured JSON output was requested
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }
}

impl PagerConfig {
    /// Load configuration from an optional `pagewindow` file and
    /// `PAGEWINDOW__*` environment variables
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Configuration`] if a source cannot be read or
    /// parsed, and [`crate::Error::InvalidConfiguration`] if the values do
    /// not validate.
    pub fn load() -> Result<Self> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("pagewindow").required(false))
            .add_source(
                config::Environment::with_prefix("PAGEWINDOW")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let loaded: Self = config.try_deserialize()?;
        loaded.validated()
    }

    /// Parse configuration from TOML text
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid TOML for this structure or
    /// the values do not validate.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let parsed: Self = toml::from_str(content)?;
        parsed.validated()
    }

    /// Read and parse a TOML configuration file
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Io`] if the file cannot be read, otherwise as
    /// [`Self::from_toml_str`].
    pub fn from_file(path: &Path) -> Result<Self> {
        tracing::debug!(path = %path.display(), "Reading pager configuration");
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Run validation and hand the configuration back
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidConfiguration`] describing the failing
    /// fields.
    pub fn validated(self) -> Result<Self> {
        self.validate()?;
        Ok(self)
    }
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc, clippy::field_reassign_with_default)]
mod tests {
    use super::*;
    use crate::Error;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_config_default() {
        let config = PagerConfig::default();

        assert_eq!(config.pagination.page_size, 10);
        assert_eq!(config.pagination.initial_page, 0);
        assert_eq!(config.pagination.policy, PagePolicy::Clamp);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, "pretty");
        assert!(!config.logging.is_json());
    }

    #[test]
    fn test_config_from_toml() {
        let config = PagerConfig::from_toml_str(
            r#"
            [pagination]
            page_size = 25
            initial_page = 2
            policy = "reject"

            [logging]
            level = "debug"
            format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(config.pagination.page_size, 25);
        assert_eq!(config.pagination.initial_page, 2);
        assert_eq!(config.pagination.policy, PagePolicy::Reject);
        assert_eq!(config.pagination.page_size().unwrap().get(), 25);
        assert!(config.logging.is_json());
    }

    #[test]
    fn test_config_partial_toml_uses_defaults() {
        let config = PagerConfig::from_toml_str("[pagination]\npage_size = 3\n").unwrap();

        assert_eq!(config.pagination.page_size, 3);
        assert_eq!(config.pagination.policy, PagePolicy::Clamp);
        assert_eq!(config.logging, LoggingConfig::default());

        let empty = PagerConfig::from_toml_str("").unwrap();
        assert_eq!(empty, PagerConfig::default());
    }

    #[test]
    fn test_zero_page_size_is_invalid_configuration() {
        let result = PagerConfig::from_toml_str("[pagination]\npage_size = 0\n");
        assert!(matches!(result, Err(Error::InvalidConfiguration { .. })));

        let mut config = PagerConfig::default();
        config.pagination.page_size = 0;
        assert!(matches!(
            config.clone().validated(),
            Err(Error::InvalidConfiguration { .. })
        ));
        assert!(matches!(
            config.pagination.page_size(),
            Err(Error::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_malformed_toml_is_configuration_error() {
        let result = PagerConfig::from_toml_str("[pagination\npage_size = ");
        assert!(matches!(result, Err(Error::Configuration { .. })));

        let result = PagerConfig::from_toml_str("[pagination]\npolicy = \"wrap\"\n");
        assert!(matches!(result, Err(Error::Configuration { .. })));
    }

    #[test]
    fn test_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[pagination]\npage_size = 50").unwrap();

        let config = PagerConfig::from_file(file.path()).unwrap();
        assert_eq!(config.pagination.page_size, 50);
    }

    #[test]
    fn test_config_from_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = PagerConfig::from_file(&dir.path().join("absent.toml"));
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_config_serialization() {
        let config = PagerConfig::default();
        let serialized = serde_json::to_string(&config).unwrap();
        let deserialized: PagerConfig = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, config);
        assert!(serialized.contains("\"policy\":\"clamp\""));
    }
}
