//! Common test utilities and fixtures for integration tests

#![allow(dead_code)]

use pagewindow_core::{PagePolicy, PageWindow, PagedList};

/// Items `1..=n`
pub fn numbered(n: u32) -> Vec<u32> {
    (1..=n).collect()
}

/// A list of `1..=n` paged by `page_size`, opened on the 1-based `page`
pub fn paged(n: u32, page_size: usize, page: usize) -> PagedList<u32> {
    let mut list = PagedList::new(numbered(n), page_size).unwrap();
    list.set_page(page).unwrap();
    list
}

/// Builder for windows used across tests
#[derive(Debug, Clone)]
pub struct WindowBuilder {
    source_len: usize,
    page_size: usize,
    page_number: usize,
    policy: PagePolicy,
}

impl WindowBuilder {
    pub const fn new(source_len: usize) -> Self {
        Self {
            source_len,
            page_size: 10,
            page_number: 0,
            policy: PagePolicy::Clamp,
        }
    }

    pub const fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    pub const fn page_number(mut self, page_number: usize) -> Self {
        self.page_number = page_number;
        self
    }

    pub const fn rejecting(mut self) -> Self {
        self.policy = PagePolicy::Reject;
        self
    }

    pub fn build<T>(self) -> PageWindow<T> {
        PageWindow::with_policy(self.source_len, self.page_size, self.page_number, self.policy)
            .unwrap()
    }
}
