use crate::constants::{DEFAULT_PAGE_NUM, DEFAULT_PAGE_SIZE};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginateOpts {
    pub page_num: usize,
    pub page_size: usize,
}

impl PaginateOpts {
    pub fn new(page_num: usize, page_size: usize) -> PaginateOpts {
        PaginateOpts {
            page_num,
            page_size,
        }
    }

    pub fn first_page(page_size: usize) -> PaginateOpts {
        PaginateOpts::new(DEFAULT_PAGE_NUM, page_size)
    }

    pub fn query_pairs(&self) -> [(&'static str, String); 2] {
        [
            ("page", self.page_num.to_string()),
            ("page_size", self.page_size.to_string()),
        ]
    }
}

impl Default for PaginateOpts {
    fn default() -> Self {
        PaginateOpts::new(DEFAULT_PAGE_NUM, DEFAULT_PAGE_SIZE)
    }
}
