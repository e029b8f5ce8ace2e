//! Fixed-size paging over a candidate set.
//!
//! A `PageCursor` is created fresh for each successful conversion and owned
//! by whoever displays it. Only `advance` and `retreat` move it.

use std::ops::Range;

use crate::Config;

/// One page of candidates as seen by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page<'a> {
    /// Words on this page, in display order.
    pub words: &'a [String],
    /// Zero-based page index.
    pub index: usize,
    pub has_previous: bool,
    pub has_next: bool,
}

/// A candidate set plus the page currently shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageCursor {
    candidates: Vec<String>,
    page_size: usize,
    page_index: usize,
}

impl PageCursor {
    /// Start on page 0. A `page_size` of zero is treated as one.
    pub fn new(candidates: Vec<String>, page_size: usize) -> Self {
        Self {
            candidates,
            page_size: page_size.max(1),
            page_index: 0,
        }
    }

    /// Start on page 0 using the configured page size.
    pub fn with_config(candidates: Vec<String>, config: &Config) -> Self {
        Self::new(candidates, config.effective_page_size())
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    /// All candidates, across every page.
    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Total number of pages; zero for an empty candidate set.
    pub fn page_count(&self) -> usize {
        self.candidates.len().div_ceil(self.page_size)
    }

    pub fn has_previous(&self) -> bool {
        self.page_index > 0
    }

    pub fn has_next(&self) -> bool {
        (self.page_index + 1) * self.page_size < self.candidates.len()
    }

    fn page_range(&self) -> Range<usize> {
        let start = (self.page_index * self.page_size).min(self.candidates.len());
        let end = (start + self.page_size).min(self.candidates.len());
        start..end
    }

    /// The slice for the current page plus navigation flags.
    pub fn current_page(&self) -> Page<'_> {
        Page {
            words: &self.candidates[self.page_range()],
            index: self.page_index,
            has_previous: self.has_previous(),
            has_next: self.has_next(),
        }
    }

    /// Move to the next page. No-op on the last page.
    /// Returns true if the page changed.
    pub fn advance(&mut self) -> bool {
        if self.has_next() {
            self.page_index += 1;
            true
        } else {
            false
        }
    }

    /// Move to the previous page. No-op on the first page.
    /// Returns true if the page changed.
    pub fn retreat(&mut self) -> bool {
        if self.has_previous() {
            self.page_index -= 1;
            true
        } else {
            false
        }
    }

    /// Word at `offset` within the current page.
    pub fn select(&self, offset: usize) -> Option<&str> {
        self.current_page().words.get(offset).map(String::as_str)
    }

    /// Word bound to selection key `key` on the current page.
    pub fn select_by_key(&self, key: char, config: &Config) -> Option<&str> {
        config
            .selection_key_index(key)
            .and_then(|offset| self.select(offset))
    }
}
