//! Data source trait

use async_trait::async_trait;
use portal_core::Record;

use crate::Result;

/// Parameters of the bulk fetch that loads a whole collection.
///
/// Paging is done client-side, so the API is always asked for its first page
/// with a generous limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchQuery {
    pub limit: usize,
}

impl Default for FetchQuery {
    fn default() -> Self {
        Self { limit: 500 }
    }
}

/// Where a view's collection comes from and where its mutations go
#[async_trait]
pub trait DataSource<R: Record>: Send + Sync {
    /// Short name for logs
    fn name(&self) -> &str;

    /// Load the full collection
    async fn fetch(&self, query: &FetchQuery) -> Result<Vec<R>>;

    /// Create a record; the id of `record` is ignored
    async fn create(&self, record: &R) -> Result<R>;

    async fn update(&self, record: &R) -> Result<R>;

    async fn delete(&self, id: &str) -> Result<()>;
}
