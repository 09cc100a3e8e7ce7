//! Ties a view to its data source

use std::sync::Arc;

use portal_core::{Collection, Record};
use portal_sources::{DataSource, FetchQuery, SourceError};

use crate::mutation::{Mutation, MutationBridge, MutationOutcome};
use crate::notify::Notifier;
use crate::view::CollectionView;

/// Loads a collection into a [`CollectionView`] and refetches it after every
/// applied mutation.
pub struct ListController<R> {
    view: CollectionView<R>,
    source: Arc<dyn DataSource<R>>,
    bridge: MutationBridge<R>,
    query: FetchQuery,
}

impl<R: Record> ListController<R> {
    pub fn new(
        view: CollectionView<R>,
        source: Arc<dyn DataSource<R>>,
        notifier: Arc<dyn Notifier>,
        query: FetchQuery,
    ) -> Self {
        let bridge = MutationBridge::new(source.clone(), notifier);
        Self {
            view,
            source,
            bridge,
            query,
        }
    }

    pub fn view(&self) -> &CollectionView<R> {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut CollectionView<R> {
        &mut self.view
    }

    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    pub fn is_busy(&self) -> bool {
        self.bridge.is_busy()
    }

    /// Fetches the collection. Returns false when the view ends up in an
    /// error or unusable state.
    pub async fn refresh(&mut self) -> bool {
        tracing::debug!(kind = %R::KIND, source = self.source.name(), "fetching collection");
        match self.source.fetch(&self.query).await {
            Ok(records) => {
                tracing::info!(kind = %R::KIND, count = records.len(), "collection loaded");
                self.view.replace(Collection::ready(records));
                true
            }
            Err(SourceError::Unusable(reason)) => {
                tracing::warn!(kind = %R::KIND, %reason, "collection payload unusable");
                self.view.replace(Collection::Unusable { reason });
                false
            }
            Err(e) => {
                tracing::warn!(kind = %R::KIND, error = %e, "collection fetch failed");
                self.view.replace(Collection::Failed {
                    message: e.user_message(),
                });
                false
            }
        }
    }

    /// Retry affordance of the error state
    pub async fn retry(&mut self) -> bool {
        self.refresh().await
    }

    pub async fn apply(&mut self, mutation: Mutation<R>) -> MutationOutcome<R> {
        let outcome = self.bridge.submit(mutation).await;
        if outcome.is_applied() {
            self.refresh().await;
        }
        outcome
    }
}
