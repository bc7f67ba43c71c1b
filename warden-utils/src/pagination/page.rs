//! Pure pagination math and page construction.

use super::error::PaginationError;

/// An ordered, immutable chunk of items rendered together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    items: Vec<T>,
}

impl<T> Page<T> {
    /// Items on this page, in their original order.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Compute the number of pages for a paginated list.
pub fn total_pages(item_count: usize, per_page: usize) -> usize {
    item_count.div_ceil(per_page.max(1))
}

/// Split `items` into consecutive pages of at most `page_size` items.
///
/// Order is preserved and only the last page may be short. An empty input
/// still yields a single empty page so callers always have something to render.
pub fn build_pages<T>(items: Vec<T>, page_size: usize) -> Result<Vec<Page<T>>, PaginationError> {
    if page_size == 0 {
        return Err(PaginationError::InvalidArgument("page size must be positive"));
    }

    if items.is_empty() {
        return Ok(vec![Page { items: Vec::new() }]);
    }

    let mut pages = Vec::with_capacity(total_pages(items.len(), page_size));
    let mut remaining = items.into_iter().peekable();

    while remaining.peek().is_some() {
        pages.push(Page {
            items: remaining.by_ref().take(page_size).collect(),
        });
    }

    Ok(pages)
}
