//! Source change notifications and a paged list host
//!
//! The window never touches item storage. Whoever owns the items reports
//! what happened to them as a [`SourceEvent`]; [`PagedList`] is a ready-made
//! owner that turns every mutation into the matching event.

use crate::{
    Result,
    config::PaginationConfig,
    types::{PageSnapshot, Splice},
    window::PageWindow,
};
use serde::{Deserialize, Serialize};

/// A change to the observed source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SourceEvent {
    /// The whole source was swapped for one of `len` items
    Replaced {
        /// Length of the new source
        len: usize,
    },
    /// Items were inserted and/or removed in place
    Spliced(Splice),
}

/// Receiver of source change notifications
pub trait SourceObserver {
    /// Called after the source changed
    fn source_changed(&mut self, event: &SourceEvent);
}

impl<T> SourceObserver for PageWindow<T> {
    fn source_changed(&mut self, event: &SourceEvent) {
        match *event {
            SourceEvent::Replaced { len } => self.on_source_replaced(len),
            SourceEvent::Spliced(splice) => self.on_source_spliced(splice),
        }
    }
}

/// An owned list of items viewed through a [`PageWindow`]
///
/// The list may have no source at all, which pages exactly like an empty
/// one.
#[derive(Debug, Clone)]
pub struct PagedList<T> {
    source: Option<Vec<T>>,
    window: PageWindow<T>,
}

impl<T> Default for PagedList<T> {
    fn default() -> Self {
        Self {
            source: None,
            window: PageWindow::default(),
        }
    }
}

impl<T> PagedList<T> {
    /// Page `items` with `page_size` items per page, starting on page 1
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidConfiguration`] if `page_size` is zero.
    pub fn new(items: Vec<T>, page_size: usize) -> Result<Self> {
        let window = PageWindow::new(items.len(), page_size, 0)?;
        Ok(Self {
            source: Some(items),
            window,
        })
    }

    /// Page `items` as configured
    ///
    /// # Errors
    ///
    /// As [`PageWindow::from_config`].
    pub fn from_config(items: Vec<T>, config: &PaginationConfig) -> Result<Self> {
        let window = PageWindow::from_config(config, items.len())?;
        Ok(Self {
            source: Some(items),
            window,
        })
    }

    /// A list with no source yet
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidConfiguration`] if `page_size` is zero.
    pub fn detached(page_size: usize) -> Result<Self> {
        Ok(Self {
            source: None,
            window: PageWindow::new(0, page_size, 0)?,
        })
    }

    fn notify(&mut self, event: &SourceEvent) {
        self.window.source_changed(event);
    }

    // ------------------------------------------------------------------
    // Source mutation
    // ------------------------------------------------------------------

    /// Swap in a new source; the view goes back to the first page
    pub fn set_source(&mut self, items: Vec<T>) {
        let len = items.len();
        self.source = Some(items);
        self.notify(&SourceEvent::Replaced { len });
    }

    /// Drop the source entirely, handing back the old items
    pub fn clear_source(&mut self) -> Option<Vec<T>> {
        let old = self.source.take();
        self.notify(&SourceEvent::Replaced { len: 0 });
        old
    }

    /// Remove `remove_count` items at `index` and insert `items` there,
    /// returning what was removed
    ///
    /// Out-of-range arguments are clamped to the source: `index` to its
    /// length and `remove_count` to the items after `index`.
    pub fn splice<I>(&mut self, index: usize, remove_count: usize, items: I) -> Vec<T>
    where
        I: IntoIterator<Item = T>,
    {
        let source = self.source.get_or_insert_with(Vec::new);
        let before = source.len();
        let index = index.min(before);
        let end = index.saturating_add(remove_count).min(before);

        let removed: Vec<T> = source.splice(index..end, items).collect();
        let added = source.len() + removed.len() - before;

        if !removed.is_empty() || added > 0 {
            self.notify(&SourceEvent::Spliced(Splice::new(
                index,
                removed.len(),
                added,
            )));
        }
        removed
    }

    /// Insert one item at `index` (clamped to the length)
    pub fn insert(&mut self, index: usize, item: T) {
        self.splice(index, 0, std::iter::once(item));
    }

    /// Append one item
    pub fn push(&mut self, item: T) {
        let len = self.len();
        self.splice(len, 0, std::iter::once(item));
    }

    /// Remove the item at `index`, if there is one
    pub fn remove(&mut self, index: usize) -> Option<T> {
        self.splice(index, 1, std::iter::empty()).pop()
    }

    /// See [`PageWindow::refresh_view`]
    pub fn refresh(&mut self) {
        self.window.refresh_view();
    }

    /// Keep only the first `len` items
    pub fn truncate(&mut self, len: usize) {
        let current = self.len();
        if len < current {
            self.splice(len, current - len, std::iter::empty());
        }
    }

    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------

    /// See [`PageWindow::decrement_page`]
    pub const fn decrement_page(&mut self) -> bool {
        self.window.decrement_page()
    }

    /// See [`PageWindow::increment_page`]
    pub fn increment_page(&mut self) -> bool {
        self.window.increment_page()
    }

    /// See [`PageWindow::set_page`]
    ///
    /// # Errors
    ///
    /// As [`PageWindow::set_page`].
    pub fn set_page(&mut self, page: usize) -> Result<()> {
        self.window.set_page(page)
    }

    /// See [`PageWindow::set_page_from_input`]
    ///
    /// # Errors
    ///
    /// As [`PageWindow::set_page_from_input`].
    pub fn set_page_from_input(&mut self, input: &str) -> Result<()> {
        self.window.set_page_from_input(input)
    }

    /// See [`PageWindow::set_page_size`]
    ///
    /// # Errors
    ///
    /// As [`PageWindow::set_page_size`].
    pub fn set_page_size(&mut self, page_size: usize) -> Result<()> {
        self.window.set_page_size(page_size)
    }

    /// See [`PageWindow::first_page`]
    pub const fn first_page(&mut self) -> bool {
        self.window.first_page()
    }

    /// See [`PageWindow::last_page`]
    pub fn last_page(&mut self) -> bool {
        self.window.last_page()
    }

    // ------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------

    /// All items, empty when there is no source
    #[must_use]
    pub fn items(&self) -> &[T] {
        self.source.as_deref().unwrap_or(&[])
    }

    /// Whether a source is attached
    #[must_use]
    pub const fn has_source(&self) -> bool {
        self.source.is_some()
    }

    /// Number of items
    #[must_use]
    pub fn len(&self) -> usize {
        self.items().len()
    }

    /// Whether there are no items
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items().is_empty()
    }

    /// The underlying window
    #[must_use]
    pub const fn window(&self) -> &PageWindow<T> {
        &self.window
    }

    /// Items on the current page
    pub fn visible(&mut self) -> &[T]
    where
        T: Clone,
    {
        let source = self.source.as_deref().unwrap_or(&[]);
        self.window.visible_slice(source)
    }

    /// See [`PageWindow::page_count`]
    pub fn page_count(&mut self) -> usize {
        self.window.page_count()
    }

    /// See [`PageWindow::pages`]
    pub fn pages(&mut self) -> &[usize] {
        self.window.pages()
    }

    /// See [`PageWindow::show_pager`]
    pub fn show_pager(&mut self) -> bool {
        self.window.show_pager()
    }

    /// See [`PageWindow::is_last_page`]
    pub fn is_last_page(&mut self) -> bool {
        self.window.is_last_page()
    }

    /// See [`PageWindow::snapshot`]
    pub fn snapshot(&mut self) -> PageSnapshot {
        self.window.snapshot()
    }
}
