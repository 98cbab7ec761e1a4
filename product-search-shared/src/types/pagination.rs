//! Page metadata returned alongside search hits.

use serde::{Deserialize, Serialize};

/// Describes where a page sits in the full result set.
///
/// The values are descriptive only: asking for page 50 of a two-page result set yields
/// `current_page = 50, total_pages = 2` and an empty hit list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    pub current_page: u32,
    pub total_pages: u64,
    /// Engine-reported match count. May exceed the number of hits on this page.
    pub total_items: u64,
    pub page_size: u32,
}

impl PageMeta {
    /// Compute page metadata.
    ///
    /// `total_pages` is `ceil(total_items / page_size)`. A zero `page_size` never reaches
    /// here from the search path; it yields zero pages rather than dividing by zero.
    pub fn compute(current_page: u32, page_size: u32, total_items: u64) -> Self {
        let total_pages = if page_size == 0 {
            0
        } else {
            total_items.div_ceil(u64::from(page_size))
        };

        Self {
            current_page,
            total_pages,
            total_items,
            page_size,
        }
    }
}
