//! Page arithmetic helpers

use crate::{Error, Result, types::PageSize};
use std::ops::Range;

/// Number of pages needed to show `len` items, `0` for an empty source
#[must_use]
pub const fn page_count_for(len: usize, page_size: PageSize) -> usize {
    len.div_ceil(page_size.get())
}

/// Unclamped `[start, end)` item bounds of a zero-based page
#[must_use]
pub const fn window_bounds(page_number: usize, page_size: PageSize) -> (usize, usize) {
    let start = page_number.saturating_mul(page_size.get());
    (start, start.saturating_add(page_size.get()))
}

/// Item range of a zero-based page, clamped to `[0, len]`
///
/// A page past the end yields an empty range rather than an error.
#[must_use]
pub fn page_bounds(page_number: usize, page_size: PageSize, len: usize) -> Range<usize> {
    let (start, end) = window_bounds(page_number, page_size);
    start.min(len)..end.min(len)
}

/// Clamp a zero-based page into `[0, max(page_count - 1, 0)]`
#[must_use]
pub const fn clamp_page(page_number: usize, page_count: usize) -> usize {
    let last = page_count.saturating_sub(1);
    if page_number > last { last } else { page_number }
}

/// Parse user-facing, 1-based page input
///
/// # Errors
///
/// Returns [`Error::InvalidPageNumber`] for empty, non-numeric or
/// non-positive input.
pub fn parse_page_number(input: &str) -> Result<usize> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(Error::invalid_page_number(input, "page number is empty"));
    }

    // Negative numbers are reported as non-positive, not as garbage
    if let Ok(signed) = trimmed.parse::<i64>() {
        if signed <= 0 {
            return Err(Error::invalid_page_number(
                input,
                "pages are numbered from 1",
            ));
        }
    }

    trimmed
        .parse::<usize>()
        .map_err(|e| Error::invalid_page_number(input, e.to_string()))
}
