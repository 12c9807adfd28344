//! Page windowing over ordered, observable collections
//!
//! [`PageWindow`] computes which slice of a source is visible for a page
//! size and page number, keeps that slice, the page count and the page list
//! memoized, and invalidates them only when a change can affect them.
//! [`PagedList`] owns a `Vec` and drives a window from its own mutations.
//!
//! ```
//! use pagewindow_core::PagedList;
//!
//! let mut list = PagedList::new((1..=25).collect::<Vec<u32>>(), 10)?;
//! assert_eq!(list.pages(), &[1, 2, 3]);
//!
//! list.set_page(3)?;
//! assert_eq!(list.visible(), &[21, 22, 23, 24, 25]);
//! # Ok::<(), pagewindow_core::Error>(())
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

pub mod config;
pub mod error;
pub mod memo;
pub mod source;
pub mod types;
pub mod utils;
pub mod window;

/// Error context for binaries built on this crate
pub mod context_error {
    use std::{error::Error as StdError, fmt};

    /// An error message with an optional underlying cause
    #[derive(Debug)]
    pub struct ContextError {
        source: Option<Box<dyn StdError + Send + Sync>>,
        message: String,
    }

    impl ContextError {
        /// Create a new context error from a message
        pub fn new<S: Into<String>>(message: S) -> Self {
            Self {
                source: None,
                message: message.into(),
            }
        }

        /// Wrap an existing error with context
        pub fn with_context<E, S>(error: E, message: S) -> Self
        where
            E: StdError + Send + Sync + 'static,
            S: Into<String>,
        {
            Self {
                source: Some(Box::new(error)),
                message: message.into(),
            }
        }
    }

    impl fmt::Display for ContextError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match &self.source {
                Some(source) => write!(f, "{}: {source}", self.message),
                None => write!(f, "{}", self.message),
            }
        }
    }

    impl StdError for ContextError {
        fn source(&self) -> Option<&(dyn StdError + 'static)> {
            self.source
                .as_ref()
                .map(|e| e.as_ref() as &(dyn StdError + 'static))
        }
    }

    /// Result type alias for context errors
    pub type Result<T> = std::result::Result<T, ContextError>;

    /// Extension trait for adding context to results
    pub trait ResultExt<T> {
        /// Add context to an error
        ///
        /// # Errors
        ///
        /// Returns the original error wrapped with the message from `f`.
        fn with_context<F, S>(self, f: F) -> Result<T>
        where
            F: FnOnce() -> S,
            S: Into<String>;
    }

    impl<T, E> ResultExt<T> for std::result::Result<T, E>
    where
        E: StdError + Send + Sync + 'static,
    {
        fn with_context<F, S>(self, f: F) -> Result<T>
        where
            F: FnOnce() -> S,
            S: Into<String>,
        {
            self.map_err(|e| ContextError::with_context(e, f()))
        }
    }

    impl From<std::io::Error> for ContextError {
        fn from(err: std::io::Error) -> Self {
            Self::with_context(err, "I/O operation failed")
        }
    }

    impl From<serde_json::Error> for ContextError {
        fn from(err: serde_json::Error) -> Self {
            Self::with_context(err, "JSON serialization failed")
        }
    }

    impl From<crate::Error> for ContextError {
        fn from(err: crate::Error) -> Self {
            Self::with_context(err, "Pagination failed")
        }
    }
}

// Re-export commonly used types
pub use config::{LoggingConfig, PagerConfig, PaginationConfig};
pub use error::{Error, Result};
pub use source::{PagedList, SourceEvent, SourceObserver};
pub use types::{PagePolicy, PageSize, PageSnapshot, Splice, WindowStats};
pub use window::PageWindow;

/// Initialize the logging system
///
/// `RUST_LOG` takes precedence over the configured level. Output goes to
/// stderr so it never mixes with paged data on stdout.
///
/// # Errors
///
/// Returns [`Error::Configuration`] if the level is not a valid filter
/// directive or a global subscriber is already installed.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.level)
            .map_err(|e| Error::configuration(format!("invalid log level: {e}")))?,
    };

    let registry = tracing_subscriber::registry().with(env_filter);
    let installed = if config.is_json() {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .try_init()
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .pretty()
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };

    installed.map_err(|e| Error::configuration(format!("logging already initialized: {e}")))
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use super::context_error::{ContextError, ResultExt};
    use super::*;
    use std::error::Error as StdError;

    #[test]
    fn test_context_error_wraps_source() {
        let result: std::result::Result<(), Error> =
            Err(Error::invalid_configuration("page size must be at least 1"));
        let wrapped = result.with_context(|| "building pager").unwrap_err();

        assert!(wrapped.to_string().starts_with("building pager: "));
        assert!(wrapped.source().is_some());
    }

    #[test]
    fn test_context_error_from_pagination_error() {
        let err: ContextError = Error::invalid_page_number("x", "not a number").into();
        assert_eq!(
            err.to_string(),
            "Pagination failed: Invalid page number 'x': not a number"
        );
        assert!(ContextError::new("no input").source().is_none());
    }

    #[test]
    fn test_init_logging_rejects_bad_level() {
        // Only meaningful without RUST_LOG overriding the configured level
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }
        let config = LoggingConfig {
            level: "pagewindow=loud".to_string(),
            format: "pretty".to_string(),
        };
        assert!(matches!(
            init_logging(&config),
            Err(Error::Configuration { .. })
        ));
    }
}
