use serde::{Deserialize, Serialize};

/// Surrogate identifier assigned by the store on insert.
pub type RecordId = i64;

pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Zero-based page selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub page: usize,
    pub size: usize,
}

impl PageRequest {
    pub fn new(page: usize, size: usize) -> Self {
        Self { page, size }
    }

    /// Index of the first record on this page.
    pub fn offset(&self) -> usize {
        self.page.saturating_mul(self.size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(0, DEFAULT_PAGE_SIZE)
    }
}

/// One page of query results plus the total number of matches.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page: usize,
    pub size: usize,
    pub total_elements: usize,
}

impl<T> Page<T> {
    /// Slice `matches` down to the window selected by `request`.
    pub fn from_matches(matches: Vec<T>, request: PageRequest) -> Self {
        let total_elements = matches.len();
        let content = matches
            .into_iter()
            .skip(request.offset())
            .take(request.size)
            .collect();

        Self {
            content,
            page: request.page,
            size: request.size,
            total_elements,
        }
    }

    pub fn total_pages(&self) -> usize {
        if self.size == 0 {
            return 0;
        }
        self.total_elements.div_ceil(self.size)
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            page: self.page,
            size: self.size,
            total_elements: self.total_elements,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_slicing() {
        let first = Page::from_matches(vec![1, 2, 3], PageRequest::new(0, 2));
        assert_eq!(first.content, vec![1, 2]);
        assert_eq!(first.total_elements, 3);
        assert_eq!(first.total_pages(), 2);

        let second = Page::from_matches(vec![1, 2, 3], PageRequest::new(1, 2));
        assert_eq!(second.content, vec![3]);
        assert_eq!(second.total_elements, 3);
    }

    #[test]
    fn test_page_past_the_end_is_empty() {
        let page = Page::from_matches(vec![1, 2, 3], PageRequest::new(5, 2));
        assert!(page.is_empty());
        assert_eq!(page.total_elements, 3);
    }

    #[test]
    fn test_zero_size_page() {
        let page = Page::from_matches(vec![1, 2], PageRequest::new(0, 0));
        assert!(page.is_empty());
        assert_eq!(page.total_pages(), 0);
    }

    #[test]
    fn test_offset_saturates() {
        assert_eq!(PageRequest::new(usize::MAX, 2).offset(), usize::MAX);
    }
}
