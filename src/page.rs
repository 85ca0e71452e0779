/// Rows shown per table page.
pub const PAGE_ROWS: usize = 5;

/// 1-indexed page cursor over a list paged [`PAGE_ROWS`] at a time.
///
/// The cursor is deliberately not clamped when the list shrinks: deleting the
/// last row of the last page leaves the cursor past the end, the window comes
/// back empty, and [`Pager::prev`] recovers. [`Pager::next`] stays a no-op in
/// that situation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    page: usize,
}

impl Default for Pager {
    fn default() -> Self {
        Self { page: 1 }
    }
}

impl Pager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(&self) -> usize {
        self.page
    }

    /// Total pages for a list of `len` items, never less than 1. An empty
    /// list reports a single empty page rather than zero pages.
    pub fn total_pages(len: usize) -> usize {
        len.div_ceil(PAGE_ROWS).max(1)
    }

    /// The index range visible on the current page, clipped to `len`. A page
    /// cursor past the end yields an empty range.
    pub fn window_range(&self, len: usize) -> std::ops::Range<usize> {
        let start = ((self.page - 1) * PAGE_ROWS).min(len);
        let end = (start + PAGE_ROWS).min(len);
        start..end
    }

    pub fn window<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        &items[self.window_range(items.len())]
    }

    /// Advances one page unless already on (or past) the last one. Returns
    /// whether the cursor moved.
    pub fn next(&mut self, len: usize) -> bool {
        if self.page < Self::total_pages(len) {
            self.page += 1;
            true
        } else {
            false
        }
    }

    /// Goes back one page unless already on the first. Returns whether the
    /// cursor moved.
    pub fn prev(&mut self) -> bool {
        if self.page > 1 {
            self.page -= 1;
            true
        } else {
            false
        }
    }

    pub fn has_next(&self, len: usize) -> bool {
        self.page < Self::total_pages(len)
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_list_is_one_page() {
        assert_eq!(Pager::total_pages(0), 1);
        let pager = Pager::new();
        assert_eq!(pager.window_range(0), 0..0);
        assert!(!pager.has_prev());
        assert!(!pager.has_next(0));
    }

    #[test]
    fn five_rows_fit_on_one_page() {
        assert_eq!(Pager::total_pages(5), 1);
        let mut pager = Pager::new();
        assert_eq!(pager.window_range(5), 0..5);
        assert!(!pager.next(5));
        assert_eq!(pager.page(), 1);
    }

    #[test]
    fn sixth_row_opens_a_second_page() {
        assert_eq!(Pager::total_pages(6), 2);
        let mut pager = Pager::new();
        assert!(pager.next(6));
        assert_eq!(pager.page(), 2);
        assert_eq!(pager.window_range(6), 5..6);
    }

    #[test]
    fn next_stops_at_the_last_page() {
        let mut pager = Pager::new();
        assert!(pager.next(11));
        assert!(pager.next(11));
        assert_eq!(pager.page(), 3);
        assert!(!pager.next(11));
        assert_eq!(pager.page(), 3);
    }

    #[test]
    fn prev_stops_at_the_first_page() {
        let mut pager = Pager::new();
        assert!(!pager.prev());
        assert_eq!(pager.page(), 1);
        pager.next(10);
        assert!(pager.prev());
        assert_eq!(pager.page(), 1);
    }

    #[test]
    fn window_slices_the_current_page() {
        let items: Vec<usize> = (0..12).collect();
        assert_eq!(Pager::total_pages(items.len()), 3);
        let mut pager = Pager::new();
        assert_eq!(pager.window(&items), &[0, 1, 2, 3, 4]);
        pager.next(items.len());
        assert_eq!(pager.window(&items), &[5, 6, 7, 8, 9]);
        pager.next(items.len());
        assert_eq!(pager.window(&items), &[10, 11]);
    }

    #[test]
    fn shrinking_list_leaves_a_stale_page_until_prev() {
        let mut pager = Pager::new();
        assert!(pager.next(6));

        // The sixth item went away; page 2 is now past the end.
        assert_eq!(pager.window_range(5), 5..5);
        assert!(!pager.next(5));
        assert_eq!(pager.page(), 2);

        assert!(pager.prev());
        assert_eq!(pager.window_range(5), 0..5);
    }
}
