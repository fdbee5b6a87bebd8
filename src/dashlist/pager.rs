//! Page slicing and page metadata.

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Which page to show, 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub page_index: usize,
    pub page_size: usize,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page_index: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageRequest {
    pub fn new(page_index: usize, page_size: usize) -> Self {
        Self {
            page_index,
            page_size,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.page_size == 0 {
            return Err(ValidationError::PageSize(self.page_size));
        }
        if self.page_index == 0 {
            return Err(ValidationError::PageIndex(self.page_index));
        }
        Ok(())
    }

    /// Offset of the first item on this page.
    pub fn start_index(&self) -> usize {
        self.page_index
            .saturating_sub(1)
            .saturating_mul(self.page_size)
    }
}

/// The visible slice of a collection plus the numbers a pager control needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageResult<T> {
    pub items: Vec<T>,
    pub page_index: usize,
    pub page_size: usize,
    pub total_count: usize,
    pub total_pages: usize,
    pub has_next_page: bool,
    /// Set while the record set is still being fetched; `items` is empty then.
    #[serde(default)]
    pub loading: bool,
}

impl<T> PageResult<T> {
    /// Placeholder while data is in flight.
    pub fn loading(request: PageRequest) -> Self {
        Self {
            items: Vec::new(),
            page_index: request.page_index,
            page_size: request.page_size,
            total_count: 0,
            total_pages: 0,
            has_next_page: false,
            loading: true,
        }
    }

    pub fn has_previous_page(&self) -> bool {
        self.page_index > 1 && self.total_pages > 0
    }

    /// True when the requested page lies past the end of a non-empty set.
    pub fn is_out_of_range(&self) -> bool {
        !self.loading && self.page_index > self.total_pages.max(1)
    }

    /// Offset of the first item on this page within the filtered set.
    pub fn start_index(&self) -> usize {
        PageRequest::new(self.page_index, self.page_size).start_index()
    }
}

pub fn total_pages(total_count: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total_count.div_ceil(page_size)
}

/// Slice `items` down to the requested page.
///
/// A page past the end yields no items but keeps the real totals so the
/// caller can clamp back into range.
pub fn paginate<T: Clone>(
    items: &[T],
    request: PageRequest,
) -> Result<PageResult<T>, ValidationError> {
    request.validate()?;

    let total_count = items.len();
    let total_pages = total_pages(total_count, request.page_size);
    let start = request.start_index();
    let page_items = if start >= total_count {
        Vec::new()
    } else {
        let end = start.saturating_add(request.page_size).min(total_count);
        items[start..end].to_vec()
    };

    Ok(PageResult {
        items: page_items,
        page_index: request.page_index,
        page_size: request.page_size,
        total_count,
        total_pages,
        has_next_page: request.page_index < total_pages,
        loading: false,
    })
}
