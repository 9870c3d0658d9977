//! Pagination state shared by every list view.

use crate::models::{DEFAULT_LIMIT, PageMeta, PageRequest};

/// What a list view knows about its position in a paginated result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    /// Current page, starting at 1
    pub page: u32,
    /// Rows per page
    pub limit: u32,
    /// Rows on the current page
    pub count: u64,
    /// Rows across all pages
    pub total: u64,
    /// Number of pages
    pub total_pages: u32,
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_LIMIT,
            count: 0,
            total: 0,
            total_pages: 0,
        }
    }
}

impl PageState {
    /// Takes over the numbers the backend echoed for the last fetch.
    pub fn apply(&mut self, meta: &PageMeta) {
        self.page = meta.page.max(1);
        self.limit = meta.limit.max(1);
        self.count = meta.count;
        self.total = meta.total;
        self.total_pages = meta.total_pages;
    }

    /// Request for the current page.
    #[must_use]
    pub fn request(&self) -> PageRequest {
        PageRequest::new(self.page, self.limit)
    }

    /// Previous is disabled on the first page.
    #[must_use]
    pub const fn has_prev(&self) -> bool {
        self.page > 1
    }

    /// Next is disabled on the last page.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// Request for the following page, if there is one.
    #[must_use]
    pub fn next_page(&self) -> Option<PageRequest> {
        self.has_next()
            .then(|| PageRequest::new(self.page + 1, self.limit))
    }

    /// Request for the preceding page, if there is one.
    #[must_use]
    pub fn prev_page(&self) -> Option<PageRequest> {
        self.has_prev()
            .then(|| PageRequest::new(self.page - 1, self.limit))
    }

    /// Request for the first page at the current limit, used when a filter or
    /// search changes.
    #[must_use]
    pub fn first_page(&self) -> PageRequest {
        PageRequest::new(1, self.limit)
    }

    /// Footer text, e.g. `Page 1 of 2 (30 total)`.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Page {} of {} ({} total)",
            self.page,
            self.total_pages.max(1),
            self.total
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(page: u32, total_pages: u32) -> PageMeta {
        PageMeta {
            count: 25,
            total: 30,
            page,
            limit: 25,
            total_pages,
        }
    }

    #[test]
    fn test_first_page_disables_prev() {
        let mut state = PageState::default();
        state.apply(&meta(1, 2));

        assert!(!state.has_prev());
        assert!(state.has_next());
        assert_eq!(state.prev_page(), None);
        assert_eq!(state.next_page(), Some(PageRequest::new(2, 25)));
    }

    #[test]
    fn test_last_page_disables_next() {
        let mut state = PageState::default();
        state.apply(&meta(2, 2));

        assert!(state.has_prev());
        assert!(!state.has_next());
        assert_eq!(state.next_page(), None);
        assert_eq!(state.prev_page(), Some(PageRequest::new(1, 25)));
    }

    #[test]
    fn test_empty_result() {
        let mut state = PageState::default();
        state.apply(&PageMeta {
            count: 0,
            total: 0,
            page: 1,
            limit: 25,
            total_pages: 0,
        });
        assert!(!state.has_prev());
        assert!(!state.has_next());
        assert_eq!(state.summary(), "Page 1 of 1 (0 total)");
    }

    #[test]
    fn test_first_page_keeps_limit() {
        let mut state = PageState::default();
        state.apply(&PageMeta {
            limit: 10,
            ..meta(3, 5)
        });
        assert_eq!(state.first_page(), PageRequest::new(1, 10));
        assert_eq!(state.request(), PageRequest::new(3, 10));
    }
}
