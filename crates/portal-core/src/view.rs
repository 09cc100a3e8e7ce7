//! Derived view: what a list screen renders, recomputed on demand

use std::ops::Range;

use crate::filter::{EvalContext, FilterState};
use crate::paginate::Paginator;
use crate::record::Record;
use crate::reducer::{Collection, filter_collection};

/// Pure function of collection + filters + page cursor. Never stored.
#[derive(Debug)]
pub struct DerivedView<'a, R> {
    pub filtered: Vec<&'a R>,
    pub current_page: usize,
    pub page_size: usize,
    pub total_pages: usize,
    range: Range<usize>,
}

impl<'a, R> DerivedView<'a, R> {
    /// Records on the current page
    pub fn page(&self) -> &[&'a R] {
        &self.filtered[self.range.clone()]
    }

    pub fn total_count(&self) -> usize {
        self.filtered.len()
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    /// 1-based position of the first record on the page, 0 when empty
    pub fn first_index(&self) -> usize {
        if self.filtered.is_empty() {
            0
        } else {
            (self.current_page - 1) * self.page_size + 1
        }
    }
}

pub fn derive_view<'a, R: Record>(
    collection: &'a Collection<R>,
    filters: &FilterState,
    paginator: &Paginator,
    ctx: &EvalContext,
) -> DerivedView<'a, R> {
    let filtered = filter_collection(collection, filters, ctx);
    let mut cursor = *paginator;
    cursor.clamp(filtered.len());
    DerivedView {
        current_page: cursor.current_page(),
        page_size: cursor.page_size(),
        total_pages: cursor.total_pages(filtered.len()),
        range: cursor.page_range(filtered.len()),
        filtered,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Ticket;
    use time::macros::datetime;

    #[test]
    fn test_derived_view_of_twenty_three() {
        let records: Vec<Ticket> = (1..=23)
            .map(|i| Ticket::new(format!("t{i}"), format!("Ticket {i}")))
            .collect();
        let collection = Collection::ready(records);
        let mut paginator = Paginator::new(10).unwrap();
        let ctx = EvalContext::new(datetime!(2026-10-21 12:00 UTC));

        let view = derive_view(&collection, &FilterState::new(), &paginator, &ctx);
        assert_eq!(view.total_count(), 23);
        assert_eq!(view.total_pages, 3);
        assert_eq!(view.page().len(), 10);
        assert!(view.has_next());
        assert!(!view.has_previous());

        assert!(paginator.go_to(3, 23));
        let view = derive_view(&collection, &FilterState::new(), &paginator, &ctx);
        assert_eq!(view.page().len(), 3);
        assert_eq!(view.page()[0].id, "t21");
        assert_eq!(view.first_index(), 21);
        assert!(!view.has_next());
    }

    #[test]
    fn test_pending_collection_is_one_empty_page() {
        let collection: Collection<Ticket> = Collection::Pending;
        let paginator = Paginator::new(10).unwrap();
        let ctx = EvalContext::new(datetime!(2026-10-21 12:00 UTC));
        let view = derive_view(&collection, &FilterState::new(), &paginator, &ctx);
        assert_eq!(view.total_pages, 1);
        assert!(view.page().is_empty());
        assert_eq!(view.first_index(), 0);
    }
}
