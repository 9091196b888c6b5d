//! Page-number pagination over an ordered result set.
//!
//! Requests for a page that does not exist never fail: a missing or
//! malformed number yields the first page, and a number outside
//! `1..=num_pages` yields the last one.

use serde::Serialize;

/// Resolves requested page numbers against a result set of known size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    count: u64,
    per_page: u64,
}

impl Paginator {
    pub fn new(count: u64, per_page: u64) -> Self {
        Self {
            count,
            per_page: per_page.max(1),
        }
    }

    /// Number of pages. An empty result set still has one (empty) page.
    pub fn num_pages(&self) -> u64 {
        if self.count == 0 {
            1
        } else {
            self.count.div_ceil(self.per_page)
        }
    }

    /// Resolve the raw `page` query value into a window over the result set.
    pub fn get_page(&self, requested: Option<&str>) -> PageWindow {
        let num_pages = self.num_pages();
        let number = match requested.and_then(parse_page_number) {
            None => 1,
            Some(n) if n < 1 || n > num_pages as i64 => num_pages,
            Some(n) => n as u64,
        };
        PageWindow {
            number,
            num_pages,
            count: self.count,
            per_page: self.per_page,
        }
    }
}

fn parse_page_number(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok()
}

/// A resolved page: which slice of the result set to load, plus metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageWindow {
    pub number: u64,
    pub num_pages: u64,
    pub count: u64,
    pub per_page: u64,
}

impl PageWindow {
    /// Rows to skip before this page.
    pub fn offset(&self) -> u64 {
        (self.number - 1) * self.per_page
    }

    /// Rows on this page.
    pub fn limit(&self) -> u64 {
        self.count.saturating_sub(self.offset()).min(self.per_page)
    }

    pub fn has_next(&self) -> bool {
        self.number < self.num_pages
    }

    pub fn has_previous(&self) -> bool {
        self.number > 1
    }

    /// 1-based index of the first item on the page, 0 when empty.
    pub fn start_index(&self) -> u64 {
        if self.count == 0 { 0 } else { self.offset() + 1 }
    }

    /// 1-based index of the last item on the page.
    pub fn end_index(&self) -> u64 {
        if self.number == self.num_pages {
            self.count
        } else {
            self.number * self.per_page
        }
    }
}

/// A bounded slice of an ordered result set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub window: PageWindow,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, window: PageWindow) -> Self {
        Self { items, window }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_and_last_page_sizes() {
        let paginator = Paginator::new(13, 10);
        assert_eq!(paginator.num_pages(), 2);

        let first = paginator.get_page(None);
        assert_eq!(first.number, 1);
        assert_eq!(first.offset(), 0);
        assert_eq!(first.limit(), 10);
        assert!(first.has_next());
        assert!(!first.has_previous());

        let last = paginator.get_page(Some("2"));
        assert_eq!(last.offset(), 10);
        assert_eq!(last.limit(), 3);
        assert_eq!(last.start_index(), 11);
        assert_eq!(last.end_index(), 13);
        assert!(!last.has_next());
    }

    #[test]
    fn test_exact_multiple_fills_last_page() {
        let last = Paginator::new(20, 10).get_page(Some("2"));
        assert_eq!(last.limit(), 10);
    }

    #[test]
    fn test_fewer_items_than_page_size() {
        let page = Paginator::new(4, 10).get_page(None);
        assert_eq!(page.num_pages, 1);
        assert_eq!(page.limit(), 4);
    }

    #[test]
    fn test_out_of_range_clamps_to_last_page() {
        let paginator = Paginator::new(25, 10);
        assert_eq!(paginator.get_page(Some("99")).number, 3);
        assert_eq!(paginator.get_page(Some("0")).number, 3);
        assert_eq!(paginator.get_page(Some("-1")).number, 3);
    }

    #[test]
    fn test_malformed_number_falls_back_to_first_page() {
        let paginator = Paginator::new(25, 10);
        assert_eq!(paginator.get_page(Some("abc")).number, 1);
        assert_eq!(paginator.get_page(Some("1.5")).number, 1);
        assert_eq!(paginator.get_page(Some("")).number, 1);
        assert_eq!(paginator.get_page(Some("2.0")).number, 1);
        assert_eq!(paginator.get_page(Some(" 2 ")).number, 2);
    }

    #[test]
    fn test_empty_result_set_has_one_page() {
        let page = Paginator::new(0, 10).get_page(Some("5"));
        assert_eq!(page.number, 1);
        assert_eq!(page.num_pages, 1);
        assert_eq!(page.limit(), 0);
        assert_eq!(page.start_index(), 0);
        assert_eq!(page.end_index(), 0);
    }
}
