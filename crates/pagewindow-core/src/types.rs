//! Core types for the page window

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::{fmt, num::NonZeroUsize};

/// Default number of items per page
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Number of items per page, always at least 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct PageSize(NonZeroUsize);

impl PageSize {
    /// Create a page size
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if `size` is zero.
    pub fn new(size: usize) -> Result<Self> {
        NonZeroUsize::new(size)
            .map(Self)
            .ok_or_else(|| Error::invalid_configuration("page size must be at least 1"))
    }

    /// Get the page size as a plain integer
    #[must_use]
    pub const fn get(self) -> usize {
        self.0.get()
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self(NonZeroUsize::MIN.saturating_add(DEFAULT_PAGE_SIZE - 1))
    }
}

impl TryFrom<usize> for PageSize {
    type Error = Error;

    fn try_from(value: usize) -> Result<Self> {
        Self::new(value)
    }
}

impl TryFrom<i64> for PageSize {
    type Error = Error;

    /// Page sizes typed by a user may be negative
    fn try_from(value: i64) -> Result<Self> {
        let size = usize::try_from(value).map_err(|_| {
            Error::invalid_configuration(format!("page size must be positive, got {value}"))
        })?;
        Self::new(size)
    }
}

impl From<PageSize> for usize {
    fn from(size: PageSize) -> Self {
        size.get()
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What to do with a page request outside `[1, page_count]`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PagePolicy {
    /// Silently move to the nearest valid page
    #[default]
    Clamp,
    /// Fail with [`Error::InvalidPageNumber`]
    Reject,
}

impl fmt::Display for PagePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Clamp => write!(f, "clamp"),
            Self::Reject => write!(f, "reject"),
        }
    }
}

impl std::str::FromStr for PagePolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "clamp" => Ok(Self::Clamp),
            "reject" => Ok(Self::Reject),
            other => Err(Error::invalid_configuration(format!(
                "unknown page policy '{other}', expected 'clamp' or 'reject'"
            ))),
        }
    }
}

/// An in-place mutation of the source: `removed` items taken out and
/// `added` items put in at `index`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Splice {
    /// Position of the first affected item
    pub index: usize,
    /// Number of items removed at `index`
    pub removed: usize,
    /// Number of items inserted at `index`
    pub added: usize,
}

impl Splice {
    /// Create a splice notification
    #[must_use]
    pub const fn new(index: usize, removed: usize, added: usize) -> Self {
        Self {
            index,
            removed,
            added,
        }
    }

    /// Insertion of `count` items at `index`
    #[must_use]
    pub const fn insert(index: usize, count: usize) -> Self {
        Self::new(index, 0, count)
    }

    /// Removal of `count` items at `index`
    #[must_use]
    pub const fn remove(index: usize, count: usize) -> Self {
        Self::new(index, count, 0)
    }

    /// `index + removed + added`, the far edge used by the overlap test
    #[must_use]
    pub const fn end_of_change(&self) -> usize {
        self.index
            .saturating_add(self.removed)
            .saturating_add(self.added)
    }

    /// Whether this change touches the window `[start, end)`
    ///
    /// Both edges are inclusive so a change adjacent to the window counts.
    #[must_use]
    pub const fn overlaps(&self, start: usize, end: usize) -> bool {
        self.index <= end && self.end_of_change() >= start
    }

    /// Source length after applying this change to `len` items
    #[must_use]
    pub const fn apply_to_len(&self, len: usize) -> usize {
        len.saturating_sub(self.removed).saturating_add(self.added)
    }
}

/// Serializable read-out of a window, enough to render a pager
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSnapshot {
    /// Current page (1-based), `0` when there are no pages
    pub page: usize,
    /// Current page (0-based)
    pub page_number: usize,
    /// Items per page
    pub page_size: usize,
    /// Number of items in the source
    pub total_items: usize,
    /// Number of pages
    pub page_count: usize,
    /// 1-based page labels
    pub pages: Vec<usize>,
    /// Whether pager controls are worth showing
    pub show_pager: bool,
    /// Whether the current page is the first
    pub is_first_page: bool,
    /// Whether the current page is the last
    pub is_last_page: bool,
    /// Whether a next page exists
    pub has_next: bool,
    /// Whether a previous page exists
    pub has_prev: bool,
    /// Next page (1-based), if any
    pub next_page: Option<usize>,
    /// Previous page (1-based), if any
    pub prev_page: Option<usize>,
}

/// Recomputation and invalidation counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowStats {
    /// Times the page count was recomputed
    pub page_count_computations: u64,
    /// Times the page list was rebuilt
    pub page_list_computations: u64,
    /// Times the visible slice was materialized
    pub slice_computations: u64,
    /// Splices that overlapped the window and invalidated it
    pub splices_invalidated: u64,
    /// Splices that missed the window
    pub splices_skipped: u64,
}
