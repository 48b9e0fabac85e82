//! Fixed-size page windows

use std::ops::Range;

/// Page arithmetic for a fixed page size; pages are 1-based
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page_size: usize,
}

impl Pagination {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// `max(1, ceil(len / page_size))`
    pub fn max_page(&self, len: usize) -> usize {
        len.div_ceil(self.page_size).max(1)
    }

    /// Index window of `page`; page 0 is read as page 1
    pub fn window(&self, page: usize) -> Range<usize> {
        let start = page.max(1).saturating_sub(1).saturating_mul(self.page_size);
        start..start.saturating_add(self.page_size)
    }

    /// Items of `page`; empty when the page lies past the end
    pub fn slice<'a, T>(&self, items: &'a [T], page: usize) -> &'a [T] {
        let window = self.window(page);
        let start = window.start.min(items.len());
        let end = window.end.min(items.len());
        &items[start..end]
    }

    /// `page` brought back into `1..=max_page(len)`
    pub fn clamp(&self, page: usize, len: usize) -> usize {
        page.clamp(1, self.max_page(len))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_page_has_floor_of_one() {
        let p = Pagination::new(50);
        assert_eq!(p.max_page(0), 1);
        assert_eq!(p.max_page(50), 1);
        assert_eq!(p.max_page(51), 2);
        assert_eq!(p.max_page(120), 3);
    }

    #[test]
    fn hundred_twenty_items() {
        let items: Vec<usize> = (0..120).collect();
        let p = Pagination::new(50);
        assert_eq!(p.slice(&items, 1), &items[0..50]);
        assert_eq!(p.slice(&items, 3), &items[100..120]);
        assert_eq!(p.slice(&items, 3).len(), 20);
    }

    #[test]
    fn out_of_range_is_empty() {
        let items = [1, 2, 3];
        let p = Pagination::new(2);
        assert!(p.slice(&items, 5).is_empty());
        assert_eq!(p.slice(&items, 0), &[1, 2]);
    }

    #[test]
    fn clamp_stays_in_bounds() {
        let p = Pagination::new(10);
        assert_eq!(p.clamp(0, 25), 1);
        assert_eq!(p.clamp(7, 25), 3);
        assert_eq!(p.clamp(2, 25), 2);
    }
}
