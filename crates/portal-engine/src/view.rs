//! State of one list view

use portal_core::{
    Collection, DateBucket, DerivedView, EvalContext, Field, FilterState, Paginator, Record,
    Selection, derive_view, filter_collection,
};
use time::OffsetDateTime;

/// Collection + filters + page cursor of a list view.
///
/// Every filter setter puts the cursor back on page 1. Replacing the
/// collection or moving the clock clamps it to the new last page, so the
/// current page is never out of range.
#[derive(Debug)]
pub struct CollectionView<R> {
    collection: Collection<R>,
    filters: FilterState,
    paginator: Paginator,
    ctx: EvalContext,
}

impl<R: Record> CollectionView<R> {
    pub fn new(page_size: usize, ctx: EvalContext) -> portal_core::Result<Self> {
        Ok(Self {
            collection: Collection::Pending,
            filters: FilterState::new(),
            paginator: Paginator::new(page_size)?,
            ctx,
        })
    }

    pub fn collection(&self) -> &Collection<R> {
        &self.collection
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn paginator(&self) -> &Paginator {
        &self.paginator
    }

    pub fn context(&self) -> &EvalContext {
        &self.ctx
    }

    /// Moves the clock used by date filters; the filtered set may shrink,
    /// so the cursor is clamped like on `replace`
    pub fn set_now(&mut self, now: OffsetDateTime) {
        self.ctx.now = now;
        let count = self.filtered_count();
        self.paginator.clamp(count);
    }

    pub fn set_selection(&mut self, field: Field, selection: Selection) {
        self.filters.set_selection(field, selection);
        self.paginator.reset();
    }

    pub fn set_date(&mut self, bucket: DateBucket) {
        self.filters.set_date(bucket);
        self.paginator.reset();
    }

    pub fn set_search(&mut self, query: impl Into<String>) {
        self.filters.set_search(query);
        self.paginator.reset();
    }

    pub fn set_filters(&mut self, filters: FilterState) {
        self.filters = filters;
        self.paginator.reset();
    }

    pub fn clear_filters(&mut self) {
        self.filters.clear();
        self.paginator.reset();
    }

    /// Advances the status filter through `all` and the known statuses
    pub fn cycle_status(&mut self) {
        let next = match self.filters.selection(Field::Status) {
            Selection::Equals(current) => R::STATUSES
                .iter()
                .position(|s| s.eq_ignore_ascii_case(current))
                .and_then(|i| R::STATUSES.get(i + 1)),
            _ => R::STATUSES.first(),
        };
        let selection = next
            .map(|s| Selection::Equals(s.to_string()))
            .unwrap_or(Selection::All);
        self.set_selection(Field::Status, selection);
    }

    pub fn set_page_size(&mut self, page_size: usize) -> portal_core::Result<()> {
        self.paginator.set_page_size(page_size)
    }

    /// Swaps in a freshly loaded collection and keeps the cursor in range
    pub fn replace(&mut self, collection: Collection<R>) {
        self.collection = collection;
        let count = self.filtered_count();
        self.paginator.clamp(count);
    }

    pub fn filtered_count(&self) -> usize {
        filter_collection(&self.collection, &self.filters, &self.ctx).len()
    }

    pub fn derived(&self) -> DerivedView<'_, R> {
        derive_view(&self.collection, &self.filters, &self.paginator, &self.ctx)
    }

    pub fn next_page(&mut self) -> bool {
        let count = self.filtered_count();
        self.paginator.next(count)
    }

    pub fn previous_page(&mut self) -> bool {
        self.paginator.previous()
    }

    pub fn go_to_page(&mut self, page: usize) -> bool {
        let count = self.filtered_count();
        self.paginator.go_to(page, count)
    }
}
