//! # PaginationState
//!
//! Page window over a server side table. Pages are 1-based and fetched from the
//! server, the client never slices a full dataset.

use serde::Serialize;

use crate::constants::{DEFAULT_PAGE_NUM, PAGE_SIZES};
use crate::error::LoomError;
use crate::opts::PaginateOpts;

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationState {
    page: usize,
    page_size: usize,
    total_rows: usize,
    total_pages: usize,
}

pub fn total_pages(total_rows: usize, page_size: usize) -> usize {
    total_rows.div_ceil(page_size).max(1)
}

impl PaginationState {
    pub fn new(page_size: usize) -> Result<PaginationState, LoomError> {
        if !PAGE_SIZES.contains(&page_size) {
            return Err(LoomError::invalid_page_size(page_size));
        }
        Ok(PaginationState {
            page: DEFAULT_PAGE_NUM,
            page_size,
            total_rows: 0,
            total_pages: 1,
        })
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total_rows(&self) -> usize {
        self.total_rows
    }

    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    /// Rows before the first row of the current page
    pub fn offset(&self) -> usize {
        (self.page - 1) * self.page_size
    }

    pub fn opts(&self) -> PaginateOpts {
        PaginateOpts::new(self.page, self.page_size)
    }

    pub fn first_page_opts(&self) -> PaginateOpts {
        PaginateOpts::first_page(self.page_size)
    }

    /// Request for page `n`, or `None` when `n` is out of range. The page
    /// itself moves once the fetched rows are applied with `set_page`.
    pub fn go_to_page(&self, n: usize) -> Option<PaginateOpts> {
        if n < 1 || n > self.total_pages {
            log::debug!("go_to_page {n} ignored, {} pages", self.total_pages);
            return None;
        }
        Some(PaginateOpts::new(n, self.page_size))
    }

    /// Request for page 1 at the new size. The size applies immediately.
    pub fn set_page_size(&mut self, page_size: usize) -> Result<PaginateOpts, LoomError> {
        if !PAGE_SIZES.contains(&page_size) {
            return Err(LoomError::invalid_page_size(page_size));
        }
        self.page_size = page_size;
        self.page = DEFAULT_PAGE_NUM;
        self.total_pages = total_pages(self.total_rows, page_size);
        Ok(self.first_page_opts())
    }

    /// Record the page a response was fetched for
    pub fn set_page(&mut self, opts: &PaginateOpts) {
        if PAGE_SIZES.contains(&opts.page_size) {
            self.page_size = opts.page_size;
        }
        self.page = opts.page_num.max(1);
        self.clamp();
    }

    /// Recompute the page count after the row count changed
    pub fn update_total_rows(&mut self, total_rows: usize) {
        self.total_rows = total_rows;
        self.total_pages = total_pages(total_rows, self.page_size);
        self.clamp();
    }

    fn clamp(&mut self) {
        self.page = self.page.clamp(1, self.total_pages);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages_for_all_sizes() {
        for page_size in PAGE_SIZES {
            for total_rows in 0..=450 {
                let mut state = PaginationState::new(page_size).unwrap();
                state.update_total_rows(10_000);
                state.set_page(&PaginateOpts::new(9, page_size));
                state.update_total_rows(total_rows);

                let expected = std::cmp::max(1, total_rows.div_ceil(page_size));
                assert_eq!(state.total_pages(), expected);
                assert!(state.page() >= 1 && state.page() <= state.total_pages());
            }
        }
    }

    #[test]
    fn test_page_clamped_when_rows_shrink() {
        let mut state = PaginationState::new(25).unwrap();
        state.update_total_rows(100);
        state.set_page(&PaginateOpts::new(3, 25));
        assert_eq!(state.page(), 3);

        state.update_total_rows(7);
        assert_eq!(state.total_pages(), 1);
        assert_eq!(state.page(), 1);
    }

    #[test]
    fn test_go_to_page_bounds() {
        let mut state = PaginationState::new(10).unwrap();
        state.update_total_rows(35);
        assert_eq!(state.go_to_page(0), None);
        assert_eq!(state.go_to_page(5), None);
        assert_eq!(state.go_to_page(4), Some(PaginateOpts::new(4, 10)));
        assert_eq!(state.page(), 1);
    }

    #[test]
    fn test_set_page_size_resets_page() {
        let mut state = PaginationState::new(10).unwrap();
        state.update_total_rows(300);
        state.set_page(&PaginateOpts::new(7, 10));

        let opts = state.set_page_size(100).unwrap();
        assert_eq!(opts, PaginateOpts::new(1, 100));
        assert_eq!(state.page(), 1);
        assert_eq!(state.total_pages(), 3);
        assert!(state.set_page_size(20).is_err());
        assert_eq!(state.page_size(), 100);
    }

    #[test]
    fn test_offset() {
        let mut state = PaginationState::new(50).unwrap();
        state.update_total_rows(500);
        state.set_page(&PaginateOpts::new(3, 50));
        assert_eq!(state.offset(), 100);
    }
}
