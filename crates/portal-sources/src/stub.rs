use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::RwLock;

use crate::adapter::Resource;
use crate::error::{Result, SourceError};
use crate::fixtures::Fixture;
use crate::source::{DataSource, FetchQuery};

/// In-memory collection, used for demos, offline work and tests
pub struct StubSource<R> {
    records: RwLock<Vec<R>>,
}

impl<R: Resource> StubSource<R> {
    pub fn new(records: Vec<R>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

impl<R: Resource + Fixture> StubSource<R> {
    /// Seeded with the demo data set, dated relative to `now`
    pub fn with_fixtures(now: OffsetDateTime) -> Self {
        Self::new(R::fixtures(now))
    }
}

#[async_trait]
impl<R: Resource> DataSource<R> for StubSource<R> {
    fn name(&self) -> &str {
        "stub"
    }

    async fn fetch(&self, query: &FetchQuery) -> Result<Vec<R>> {
        let records = self.records.read().await;
        Ok(records.iter().take(query.limit).cloned().collect())
    }

    async fn create(&self, record: &R) -> Result<R> {
        let mut created = record.clone();
        created.assign_id(uuid::Uuid::new_v4().to_string());
        created.set_created_at(OffsetDateTime::now_utc());
        self.records.write().await.push(created.clone());
        Ok(created)
    }

    async fn update(&self, record: &R) -> Result<R> {
        let mut records = self.records.write().await;
        let slot = records
            .iter_mut()
            .find(|r| r.id() == record.id())
            .ok_or_else(|| SourceError::NotFound {
                kind: R::KIND,
                id: record.id().to_string(),
            })?;
        *slot = record.clone();
        Ok(record.clone())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|r| r.id() != id);
        if records.len() == before {
            return Err(SourceError::NotFound {
                kind: R::KIND,
                id: id.to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use portal_core::{Record, Ticket};

    #[tokio::test]
    async fn test_stub_crud() {
        let source = StubSource::new(vec![Ticket::new("t1", "Uno"), Ticket::new("t2", "Dos")]);

        let created = source.create(&Ticket::new("", "Tres")).await.unwrap();
        assert!(!created.id.is_empty());
        assert!(created.created_at.is_some());
        assert_eq!(source.len().await, 3);

        let updated = Ticket::new("t1", "Uno").with_status("resuelto");
        source.update(&updated).await.unwrap();
        let all = source.fetch(&FetchQuery::default()).await.unwrap();
        assert_eq!(all[0].status.as_deref(), Some("resuelto"));

        source.delete("t2").await.unwrap();
        let ids: Vec<String> = source
            .fetch(&FetchQuery::default())
            .await
            .unwrap()
            .iter()
            .map(|t| t.id().to_string())
            .collect();
        assert_eq!(ids, vec!["t1".to_string(), created.id.clone()]);
    }

    #[tokio::test]
    async fn test_stub_missing_record() {
        let source: StubSource<Ticket> = StubSource::new(Vec::new());
        let err = source.delete("nope").await.unwrap_err();
        assert!(matches!(err, SourceError::NotFound { .. }));
        let err = source.update(&Ticket::new("nope", "x")).await.unwrap_err();
        assert!(matches!(err, SourceError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_fetch_honours_limit() {
        let source = StubSource::new((0..30).map(|i| Ticket::new(format!("t{i}"), "x")).collect());
        let page = source.fetch(&FetchQuery { limit: 25 }).await.unwrap();
        assert_eq!(page.len(), 25);
    }
}
