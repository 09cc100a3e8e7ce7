//! Client-side paginator over an already filtered list

use std::ops::Range;

use crate::{Error, Result};

/// 1-based page cursor with a fixed page size.
///
/// The paginator never stores the item count: callers pass the current
/// filtered count so the page is always computed against fresh data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    current_page: usize,
    page_size: usize,
}

impl Paginator {
    pub fn new(page_size: usize) -> Result<Self> {
        if page_size == 0 {
            return Err(Error::InvalidPageSize);
        }
        Ok(Self {
            current_page: 1,
            page_size,
        })
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Changing the page size starts over at page 1
    pub fn set_page_size(&mut self, page_size: usize) -> Result<()> {
        if page_size == 0 {
            return Err(Error::InvalidPageSize);
        }
        self.page_size = page_size;
        self.current_page = 1;
        Ok(())
    }

    /// `max(1, ceil(count / page_size))`
    pub fn total_pages(&self, count: usize) -> usize {
        count.div_ceil(self.page_size).max(1)
    }

    pub fn page_range(&self, count: usize) -> Range<usize> {
        let start = ((self.current_page - 1) * self.page_size).min(count);
        let end = (start + self.page_size).min(count);
        start..end
    }

    pub fn slice<'s, T>(&self, items: &'s [T]) -> &'s [T] {
        &items[self.page_range(items.len())]
    }

    /// Jumps to `page` when it is within `[1, total_pages]`
    pub fn go_to(&mut self, page: usize, count: usize) -> bool {
        if page < 1 || page > self.total_pages(count) {
            return false;
        }
        self.current_page = page;
        true
    }

    pub fn next(&mut self, count: usize) -> bool {
        if self.current_page >= self.total_pages(count) {
            return false;
        }
        self.current_page += 1;
        true
    }

    pub fn previous(&mut self) -> bool {
        if self.current_page <= 1 {
            return false;
        }
        self.current_page -= 1;
        true
    }

    pub fn reset(&mut self) {
        self.current_page = 1;
    }

    /// Pulls the cursor back onto the last page after the list shrank
    pub fn clamp(&mut self, count: usize) {
        self.current_page = self.current_page.clamp(1, self.total_pages(count));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_page_size_rejected() {
        assert_eq!(Paginator::new(0), Err(Error::InvalidPageSize));
        let mut p = Paginator::new(5).unwrap();
        assert_eq!(p.set_page_size(0), Err(Error::InvalidPageSize));
        assert_eq!(p.page_size(), 5);
    }

    #[test]
    fn test_total_pages_formula() {
        for size in 1..=7 {
            let p = Paginator::new(size).unwrap();
            for count in 0..=40 {
                let expected = std::cmp::max(1, (count + size - 1) / size);
                assert_eq!(p.total_pages(count), expected, "count {count} size {size}");
            }
        }
    }

    #[test]
    fn test_page_lengths() {
        let items: Vec<usize> = (0..23).collect();
        for size in 1..=9 {
            let mut p = Paginator::new(size).unwrap();
            let total = p.total_pages(items.len());
            for page in 1..=total {
                assert!(p.go_to(page, items.len()));
                let len = p.slice(&items).len();
                if page < total {
                    assert_eq!(len, size);
                } else {
                    assert!(len <= size && len > 0);
                }
            }
        }
    }

    #[test]
    fn test_twenty_three_records_by_ten() {
        let items: Vec<usize> = (0..23).collect();
        let mut p = Paginator::new(10).unwrap();
        assert_eq!(p.total_pages(items.len()), 3);
        assert_eq!(p.slice(&items).len(), 10);
        assert!(p.next(items.len()));
        assert_eq!(p.slice(&items), &items[10..20]);
        assert!(p.next(items.len()));
        assert_eq!(p.slice(&items), &[20, 21, 22]);
    }

    #[test]
    fn test_boundaries_are_no_ops() {
        let mut p = Paginator::new(10).unwrap();
        assert!(!p.previous());
        assert_eq!(p.current_page(), 1);

        assert!(p.go_to(3, 23));
        assert!(!p.next(23));
        assert_eq!(p.current_page(), 3);
    }

    #[test]
    fn test_go_to_out_of_range_is_ignored() {
        let mut p = Paginator::new(10).unwrap();
        assert!(!p.go_to(0, 23));
        assert!(!p.go_to(4, 23));
        assert_eq!(p.current_page(), 1);
    }

    #[test]
    fn test_empty_list_has_one_empty_page() {
        let items: Vec<u8> = Vec::new();
        let mut p = Paginator::new(4).unwrap();
        assert_eq!(p.total_pages(0), 1);
        assert!(p.slice(&items).is_empty());
        assert!(!p.next(0));
    }

    #[test]
    fn test_clamp_after_shrink() {
        let mut p = Paginator::new(10).unwrap();
        assert!(p.go_to(3, 21));
        p.clamp(20);
        assert_eq!(p.current_page(), 2);
        p.clamp(0);
        assert_eq!(p.current_page(), 1);
    }
}
