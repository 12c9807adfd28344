//! Page window over an ordered source
//!
//! [`PageWindow`] tracks the current page of a source it does not own. The
//! host keeps the items and reports changes through
//! [`PageWindow::on_source_replaced`] and [`PageWindow::on_source_spliced`];
//! the window keeps the source length, the page number and memoized derived
//! values in step with those reports.
//!
//! Derived values and their dependency keys:
//!
//! | value           | recomputed when                                        |
//! |-----------------|--------------------------------------------------------|
//! | page count      | source length or page size changes                     |
//! | page list       | page count changes                                     |
//! | visible slice   | overlapping splice, replacement, page number or size   |
//!
//! `show_pager`, `is_first_page` and `is_last_page` are read straight off the
//! page number and the memoized page count.

use crate::{
    Error, Result,
    config::PaginationConfig,
    memo::{Memo, Version},
    types::{PagePolicy, PageSize, PageSnapshot, Splice, WindowStats},
    utils::{clamp_page, page_bounds, page_count_for, parse_page_number, window_bounds},
};
use std::ops::Range;
use tracing::{debug, trace, warn};

/// Dependency key of the visible slice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SliceKey {
    view: Version,
    source: Version,
    page_number: usize,
    page_size: PageSize,
}

/// Sliding page window over a source of `T`
///
/// A window has a single owner; reads that may refresh a cached value take
/// `&mut self`. Hosts that share one across threads must serialize access
/// themselves.
#[derive(Debug, Clone)]
pub struct PageWindow<T> {
    page_size: PageSize,
    page_number: usize,
    policy: PagePolicy,
    source_len: usize,
    source_version: Version,
    view_version: Version,
    page_count: Memo<(usize, PageSize), usize>,
    pages: Memo<usize, Vec<usize>>,
    visible: Memo<SliceKey, Vec<T>>,
    splices_invalidated: u64,
    splices_skipped: u64,
}

impl<T> Default for PageWindow<T> {
    fn default() -> Self {
        Self::blank(0, PageSize::default(), PagePolicy::default())
    }
}

impl<T> PageWindow<T> {
    /// Create a window over `source_len` items, clamping `page_number`
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if `page_size` is zero.
    pub fn new(source_len: usize, page_size: usize, page_number: usize) -> Result<Self> {
        Self::with_policy(source_len, page_size, page_number, PagePolicy::Clamp)
    }

    /// Create a window with an explicit out-of-range policy
    ///
    /// The initial `page_number` is zero-based and goes through the same
    /// policy as [`Self::set_page`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if `page_size` is zero, and
    /// [`Error::InvalidPageNumber`] if `policy` is [`PagePolicy::Reject`]
    /// and `page_number` is past the last page.
    pub fn with_policy(
        source_len: usize,
        page_size: usize,
        page_number: usize,
        policy: PagePolicy,
    ) -> Result<Self> {
        Self::build(source_len, PageSize::new(page_size)?, page_number, policy)
    }

    /// Create a window from pagination configuration
    ///
    /// # Errors
    ///
    /// As [`Self::with_policy`].
    pub fn from_config(config: &PaginationConfig, source_len: usize) -> Result<Self> {
        Self::build(
            source_len,
            config.page_size()?,
            config.initial_page,
            config.policy,
        )
    }

    fn build(
        source_len: usize,
        page_size: PageSize,
        page_number: usize,
        policy: PagePolicy,
    ) -> Result<Self> {
        let mut window = Self::blank(source_len, page_size, policy);
        window.go_to_index(page_number)?;
        debug!(
            source_len,
            page_size = page_size.get(),
            page_number = window.page_number,
            %policy,
            "Page window created"
        );
        Ok(window)
    }

    fn blank(source_len: usize, page_size: PageSize, policy: PagePolicy) -> Self {
        Self {
            page_size,
            page_number: 0,
            policy,
            source_len,
            source_version: Version::default(),
            view_version: Version::default(),
            page_count: Memo::new(),
            pages: Memo::new(),
            visible: Memo::new(),
            splices_invalidated: 0,
            splices_skipped: 0,
        }
    }

    // ------------------------------------------------------------------
    // Configuration
    // ------------------------------------------------------------------

    /// Change the page size, going back to the first page if it differs
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if `page_size` is zero; the
    /// window is left untouched in that case.
    pub fn set_page_size(&mut self, page_size: usize) -> Result<()> {
        let page_size = PageSize::new(page_size)?;
        if page_size == self.page_size {
            return Ok(());
        }
        debug!(
            from = self.page_size.get(),
            to = page_size.get(),
            "Page size changed"
        );
        self.page_size = page_size;
        self.reset_page();
        Ok(())
    }

    /// Change how out-of-range page requests are handled
    pub const fn set_policy(&mut self, policy: PagePolicy) {
        self.policy = policy;
    }

    // ------------------------------------------------------------------
    // Source notifications
    // ------------------------------------------------------------------

    /// The host swapped in a whole new source of `new_len` items
    pub fn on_source_replaced(&mut self, new_len: usize) {
        debug!(
            old_len = self.source_len,
            new_len, "Source replaced, returning to first page"
        );
        self.source_len = new_len;
        self.source_version.bump();
        self.reset_page();
    }

    /// The host inserted and/or removed items in place
    ///
    /// The visible slice is invalidated only if the change touches the
    /// current window. The page number is kept unless the current page no
    /// longer exists, in which case it settles on the new last page.
    pub fn on_source_spliced(&mut self, splice: Splice) {
        let (start, end) = window_bounds(self.page_number, self.page_size);
        self.source_len = splice.apply_to_len(self.source_len);

        if splice.overlaps(start, end) {
            self.view_version.bump();
            self.splices_invalidated += 1;
            debug!(
                index = splice.index,
                removed = splice.removed,
                added = splice.added,
                window_start = start,
                window_end = end,
                "Splice overlaps visible window"
            );
        } else {
            self.splices_skipped += 1;
            trace!(
                index = splice.index,
                removed = splice.removed,
                added = splice.added,
                window_start = start,
                window_end = end,
                "Splice outside visible window"
            );
        }

        self.settle_page();
    }

    /// Force the next [`Self::visible_slice`] read to copy from the source
    ///
    /// Splices that end before the window shift its items without
    /// invalidating it; hosts that show positions call this after one.
    pub fn refresh_view(&mut self) {
        self.view_version.bump();
        trace!("Visible slice refresh requested");
    }

    fn reset_page(&mut self) {
        self.page_number = 0;
    }

    fn settle_page(&mut self) {
        let count = self.page_count();
        let settled = clamp_page(self.page_number, count);
        if settled != self.page_number {
            debug!(
                from = self.page_number,
                to = settled,
                page_count = count,
                "Current page no longer exists, settling on last page"
            );
            self.page_number = settled;
        }
    }

    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------

    /// Step back one page; returns whether the page changed
    pub const fn decrement_page(&mut self) -> bool {
        if self.page_number == 0 {
            return false;
        }
        self.page_number -= 1;
        true
    }

    /// Step forward one page; returns whether the page changed
    ///
    /// Stays put on the last page, and on page 0 of an empty source.
    pub fn increment_page(&mut self) -> bool {
        let last = self.page_count().saturating_sub(1);
        let next = self.page_number.saturating_add(1).min(last);
        if next == self.page_number {
            return false;
        }
        self.page_number = next;
        true
    }

    /// Jump to a 1-based page
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPageNumber`] if `page` is 0, or if it is past
    /// the last page and the policy is [`PagePolicy::Reject`].
    pub fn set_page(&mut self, page: usize) -> Result<()> {
        let Some(index) = page.checked_sub(1) else {
            return Err(Error::invalid_page_number(
                page,
                "pages are numbered from 1",
            ));
        };
        self.go_to_index(index)
    }

    /// Jump to a page typed by a user, e.g. `"3"`
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPageNumber`] for non-numeric or non-positive
    /// input, otherwise as [`Self::set_page`].
    pub fn set_page_from_input(&mut self, input: &str) -> Result<()> {
        let page = parse_page_number(input)?;
        self.set_page(page)
    }

    /// Jump to the first page; returns whether the page changed
    pub const fn first_page(&mut self) -> bool {
        let moved = self.page_number != 0;
        self.page_number = 0;
        moved
    }

    /// Jump to the last page; returns whether the page changed
    pub fn last_page(&mut self) -> bool {
        let last = self.page_count().saturating_sub(1);
        let moved = self.page_number != last;
        self.page_number = last;
        moved
    }

    fn go_to_index(&mut self, index: usize) -> Result<()> {
        let count = self.page_count();
        let target = match self.policy {
            PagePolicy::Clamp => clamp_page(index, count),
            PagePolicy::Reject if index > count.saturating_sub(1) => {
                return Err(Error::invalid_page_number(
                    index.saturating_add(1),
                    format!("expected a page in 1..={}", count.max(1)),
                ));
            }
            PagePolicy::Reject => index,
        };
        if target != self.page_number {
            trace!(from = self.page_number, to = target, "Page changed");
        }
        self.page_number = target;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------

    /// Current page, zero-based
    #[must_use]
    pub const fn page_number(&self) -> usize {
        self.page_number
    }

    /// Current page, 1-based
    #[must_use]
    pub const fn page(&self) -> usize {
        self.page_number + 1
    }

    /// Items per page
    #[must_use]
    pub const fn page_size(&self) -> PageSize {
        self.page_size
    }

    /// Out-of-range policy in effect
    #[must_use]
    pub const fn policy(&self) -> PagePolicy {
        self.policy
    }

    /// Source length as last reported by the host
    #[must_use]
    pub const fn source_len(&self) -> usize {
        self.source_len
    }

    /// `ceil(source_len / page_size)`
    pub fn page_count(&mut self) -> usize {
        let (len, size) = (self.source_len, self.page_size);
        *self
            .page_count
            .get_or_compute((len, size), || page_count_for(len, size))
    }

    /// 1-based page labels `[1, 2, ..., page_count]`
    pub fn pages(&mut self) -> &[usize] {
        let count = self.page_count();
        self.pages
            .get_or_compute(count, || (1..=count).collect())
            .as_slice()
    }

    /// Whether there is more than one page
    pub fn show_pager(&mut self) -> bool {
        self.page_count() > 1
    }

    /// Whether the current page is the first
    #[must_use]
    pub const fn is_first_page(&self) -> bool {
        self.page_number == 0
    }

    /// Whether the current page is the last; `false` for an empty source
    pub fn is_last_page(&mut self) -> bool {
        let count = self.page_count();
        count > 0 && self.page_number == count - 1
    }

    /// Whether [`Self::increment_page`] would move
    pub fn has_next(&mut self) -> bool {
        self.page_number.saturating_add(1) < self.page_count()
    }

    /// Whether [`Self::decrement_page`] would move
    #[must_use]
    pub const fn has_prev(&self) -> bool {
        self.page_number > 0
    }

    /// Item range of the current page, clamped to the source length
    #[must_use]
    pub fn visible_range(&self) -> Range<usize> {
        page_bounds(self.page_number, self.page_size, self.source_len)
    }

    /// Items of the current page
    ///
    /// `source` must be the sequence whose changes this window has been
    /// told about. The slice is copied out of it only when a dependency
    /// changed since the last read.
    pub fn visible_slice(&mut self, source: &[T]) -> &[T]
    where
        T: Clone,
    {
        if source.len() != self.source_len {
            warn!(
                tracked = self.source_len,
                actual = source.len(),
                "Source length differs from notifications"
            );
        }
        let key = self.slice_key();
        let range = page_bounds(self.page_number, self.page_size, source.len());
        self.visible
            .get_or_compute(key, || {
                trace!(start = range.start, end = range.end, "Materializing visible slice");
                source.get(range).map(<[T]>::to_vec).unwrap_or_default()
            })
            .as_slice()
    }

    /// Whether the cached visible slice is still valid
    #[must_use]
    pub fn is_slice_fresh(&self) -> bool {
        self.visible.is_fresh(&self.slice_key())
    }

    const fn slice_key(&self) -> SliceKey {
        SliceKey {
            view: self.view_version,
            source: self.source_version,
            page_number: self.page_number,
            page_size: self.page_size,
        }
    }

    /// Everything a pager control needs to render
    pub fn snapshot(&mut self) -> PageSnapshot {
        let page_count = self.page_count();
        let has_next = self.has_next();
        let has_prev = self.has_prev();
        PageSnapshot {
            page: if page_count == 0 { 0 } else { self.page() },
            page_number: self.page_number,
            page_size: self.page_size.get(),
            total_items: self.source_len,
            page_count,
            pages: self.pages().to_vec(),
            show_pager: page_count > 1,
            is_first_page: self.is_first_page(),
            is_last_page: self.is_last_page(),
            has_next,
            has_prev,
            next_page: has_next.then(|| self.page() + 1),
            prev_page: has_prev.then_some(self.page_number),
        }
    }

    /// Recomputation counters
    #[must_use]
    pub const fn stats(&self) -> WindowStats {
        WindowStats {
            page_count_computations: self.page_count.computations(),
            page_list_computations: self.pages.computations(),
            slice_computations: self.visible.computations(),
            splices_invalidated: self.splices_invalidated,
            splices_skipped: self.splices_skipped,
        }
    }
}
