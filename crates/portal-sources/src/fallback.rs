use async_trait::async_trait;
use portal_core::Record;
use std::sync::Arc;

use crate::error::Result;
use crate::source::{DataSource, FetchQuery};

/// Reads from `primary`, and from `fallback` when `primary` is unreachable.
///
/// Only fetches fall back. Mutations always go to `primary` so a write is
/// never silently applied to demo data.
pub struct FallbackSource<R> {
    primary: Arc<dyn DataSource<R>>,
    fallback: Arc<dyn DataSource<R>>,
}

impl<R: Record> FallbackSource<R> {
    pub fn new(primary: Arc<dyn DataSource<R>>, fallback: Arc<dyn DataSource<R>>) -> Self {
        Self { primary, fallback }
    }
}

#[async_trait]
impl<R: Record> DataSource<R> for FallbackSource<R> {
    fn name(&self) -> &str {
        "fallback"
    }

    async fn fetch(&self, query: &FetchQuery) -> Result<Vec<R>> {
        match self.primary.fetch(query).await {
            Err(e) if e.is_unavailable() => {
                tracing::warn!(
                    view = %R::KIND,
                    primary = self.primary.name(),
                    fallback = self.fallback.name(),
                    error = %e,
                    "primary source unavailable, serving fallback data"
                );
                self.fallback.fetch(query).await
            }
            other => other,
        }
    }

    async fn create(&self, record: &R) -> Result<R> {
        self.primary.create(record).await
    }

    async fn update(&self, record: &R) -> Result<R> {
        self.primary.update(record).await
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.primary.delete(id).await
    }
}
