//! Error types for the page window

use std::{error::Error as StdError, fmt};

/// Main error type for page window operations
#[derive(Debug)]
pub enum Error {
    /// Page size or other window configuration is unusable
    InvalidConfiguration {
        /// Error message
        message: String,
    },

    /// A requested page number cannot be honored
    InvalidPageNumber {
        /// The input as the caller supplied it
        input: String,
        /// Error message
        message: String,
    },

    /// Configuration could not be loaded or parsed
    Configuration {
        /// Error message
        message: String,
    },

    /// I/O error
    Io(std::io::Error),

    /// Serialization error
    Serialization(serde_json::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Build an [`Error::InvalidConfiguration`]
    pub fn invalid_configuration<S: Into<String>>(message: S) -> Self {
        Self::InvalidConfiguration {
            message: message.into(),
        }
    }

    /// Build an [`Error::InvalidPageNumber`]
    pub fn invalid_page_number<I, S>(input: I, message: S) -> Self
    where
        I: ToString,
        S: Into<String>,
    {
        Self::InvalidPageNumber {
            input: input.to_string(),
            message: message.into(),
        }
    }

    /// Build an [`Error::Configuration`]
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfiguration { message } => {
                write!(f, "Invalid configuration: {message}")
            }
            Self::InvalidPageNumber { input, message } => {
                write!(f, "Invalid page number '{input}': {message}")
            }
            Self::Configuration { message } => write!(f, "Configuration error: {message}"),
            Self::Io(err) => write!(f, "I/O error: {err}"),
            Self::Serialization(err) => write!(f, "Serialization error: {err}"),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Serialization(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err)
    }
}

impl From<config::ConfigError> for Error {
    fn from(err: config::ConfigError) -> Self {
        Self::configuration(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Self::configuration(err.to_string())
    }
}

impl From<validator::ValidationErrors> for Error {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::invalid_configuration(err.to_string())
    }
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc, clippy::uninlined_format_args)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io;

    #[test]
    fn test_invalid_configuration_display() {
        let error = Error::invalid_configuration("page size must be at least 1");
        assert_eq!(
            format!("{}", error),
            "Invalid configuration: page size must be at least 1"
        );
    }

    #[test]
    fn test_invalid_page_number_display() {
        let error = Error::invalid_page_number("abc", "not a number");
        assert_eq!(
            format!("{}", error),
            "Invalid page number 'abc': not a number"
        );

        let error = Error::invalid_page_number(0, "pages are numbered from 1");
        assert!(format!("{}", error).contains("'0'"));
    }

    #[test]
    fn test_configuration_display() {
        let error = Error::configuration("missing field `pagination`");
        assert_eq!(
            format!("{}", error),
            "Configuration error: missing field `pagination`"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let app_error = Error::from(io_error);

        assert!(matches!(app_error, Error::Io(_)));
        assert!(format!("{}", app_error).contains("I/O error"));
        assert!(app_error.source().is_some());
    }

    #[test]
    fn test_serialization_error_conversion() {
        let json_error = serde_json::from_str::<serde_json::Value>("{oops}").unwrap_err();
        let app_error = Error::from(json_error);

        assert!(matches!(app_error, Error::Serialization(_)));
        assert!(app_error.source().is_some());
    }

    #[test]
    fn test_toml_error_becomes_configuration() {
        let toml_error = toml::from_str::<toml::Value>("= nope").unwrap_err();
        let app_error = Error::from(toml_error);

        assert!(matches!(app_error, Error::Configuration { .. }));
    }

    #[test]
    fn test_error_source_for_window_errors() {
        assert!(Error::invalid_configuration("x").source().is_none());
        assert!(Error::invalid_page_number("x", "y").source().is_none());
        assert!(Error::configuration("x").source().is_none());
    }
}
