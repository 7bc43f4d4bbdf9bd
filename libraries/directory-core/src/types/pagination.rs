/// Page arithmetic for the user listing
use serde::{Deserialize, Serialize};

/// Page size used by the listing view
pub const USERS_PER_PAGE: u32 = 12;

/// Upstream paging parameters.
///
/// Pages are 1-based; `skip` is a 0-based offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PaginationParams {
    pub limit: u32,
    pub skip: u32,
}

impl PaginationParams {
    /// Parameters for `page` (1-based) of `limit` items.
    ///
    /// Page 0 is treated as page 1.
    #[must_use]
    pub fn for_page(page: u32, limit: u32) -> Self {
        let page = page.max(1);
        Self {
            limit,
            skip: (page - 1).saturating_mul(limit),
        }
    }

    /// 1-based page these parameters point at
    #[must_use]
    pub fn page(&self) -> u32 {
        if self.limit == 0 {
            return 1;
        }
        self.skip / self.limit + 1
    }
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self::for_page(1, USERS_PER_PAGE)
    }
}

/// Number of pages needed for `total` items, ⌈total / limit⌉
#[must_use]
pub fn page_count(total: u64, limit: u32) -> u64 {
    if limit == 0 {
        return 0;
    }
    total.div_ceil(u64::from(limit))
}
