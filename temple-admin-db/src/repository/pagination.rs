use serde::{Deserialize, Serialize};

/// Largest page a caller may request.
pub const MAX_PAGE_SIZE: usize = 500;

/// Offset-based pagination request
///
/// # Example
/// ```
/// use temple_admin_db::repository::pagination::PageRequest;
///
/// let first = PageRequest::new(20, 0);
/// let second = PageRequest::for_page(20, 2);
/// assert_eq!(second.offset, 20);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Maximum number of items to return
    pub limit: usize,
    /// Number of items to skip
    pub offset: usize,
}

impl PageRequest {
    pub fn new(limit: usize, offset: usize) -> Self {
        Self { limit, offset }
    }

    /// Page request for a 1-based page number; page 0 is treated as page 1 and
    /// the page size is clamped to `1..=MAX_PAGE_SIZE`.
    pub fn for_page(page_size: usize, page_number: usize) -> Self {
        let page_size = page_size.clamp(1, MAX_PAGE_SIZE);
        let page_number = page_number.max(1);
        Self {
            limit: page_size,
            offset: (page_number - 1) * page_size,
        }
    }

    /// Slices an in-memory collection according to this request.
    pub fn apply<T: Clone>(&self, items: &[T]) -> Page<T> {
        let slice: Vec<T> = items
            .iter()
            .skip(self.offset)
            .take(self.limit)
            .cloned()
            .collect();
        Page::new(slice, items.len(), self.limit, self.offset)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            limit: 50,
            offset: 0,
        }
    }
}

/// One page of results plus the metadata needed to request the next one
///
/// # Example
/// ```
/// use temple_admin_db::repository::pagination::Page;
///
/// let page = Page::new(vec![1, 2, 3], 100, 20, 0);
/// assert!(page.has_more());
/// assert_eq!(page.total_pages(), 5);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Total number of items across all pages
    pub total: usize,
    pub limit: usize,
    pub offset: usize,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: usize, limit: usize, offset: usize) -> Self {
        Self {
            items,
            total,
            limit,
            offset,
        }
    }

    pub fn has_more(&self) -> bool {
        self.offset + self.items.len() < self.total
    }

    /// 1-based
    pub fn page_number(&self) -> usize {
        if self.limit == 0 {
            1
        } else {
            (self.offset / self.limit) + 1
        }
    }

    pub fn total_pages(&self) -> usize {
        if self.limit == 0 {
            1
        } else {
            self.total.div_ceil(self.limit)
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            limit: self.limit,
            offset: self.offset,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_page_clamps_inputs() {
        assert_eq!(PageRequest::for_page(20, 0), PageRequest::new(20, 0));
        assert_eq!(PageRequest::for_page(0, 3), PageRequest::new(1, 2));
        assert_eq!(PageRequest::for_page(10_000, 1).limit, MAX_PAGE_SIZE);
    }

    #[test]
    fn test_apply_slices_and_reports_total() {
        let items: Vec<u32> = (1..=7).collect();
        let page = PageRequest::for_page(3, 3).apply(&items);
        assert_eq!(page.items, vec![7]);
        assert_eq!(page.total, 7);
        assert!(!page.has_more());
        assert_eq!(page.page_number(), 3);
        assert_eq!(page.total_pages(), 3);
    }
}
