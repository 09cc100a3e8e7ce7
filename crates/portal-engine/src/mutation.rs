//! Mutation bridge
//!
//! Sends create/update/delete requests to a data source and reports the
//! outcome through a [`Notifier`]. Only one mutation per bridge may be in
//! flight; a second submit while one is pending is rejected as busy.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use portal_core::Record;
use portal_sources::DataSource;

use crate::notify::Notifier;

#[derive(Debug, Clone)]
pub enum Mutation<R> {
    Create(R),
    Update(R),
    Delete(String),
}

impl<R> Mutation<R> {
    pub fn verb(&self) -> &'static str {
        match self {
            Mutation::Create(_) => "created",
            Mutation::Update(_) => "updated",
            Mutation::Delete(_) => "deleted",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationOutcome<R> {
    /// Accepted by the source; carries the stored record for create/update
    Applied(Option<R>),
    /// Rejected; carries the message shown to the user
    Failed(String),
    /// Another mutation is still pending
    Busy,
}

impl<R> MutationOutcome<R> {
    pub fn is_applied(&self) -> bool {
        matches!(self, MutationOutcome::Applied(_))
    }
}

pub struct MutationBridge<R> {
    source: Arc<dyn DataSource<R>>,
    notifier: Arc<dyn Notifier>,
    in_flight: AtomicBool,
}

/// Clears the in-flight flag when the submit finishes or is dropped
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl<R: Record> MutationBridge<R> {
    pub fn new(source: Arc<dyn DataSource<R>>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            source,
            notifier,
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    pub async fn submit(&self, mutation: Mutation<R>) -> MutationOutcome<R> {
        if self.in_flight.swap(true, Ordering::AcqRel) {
            tracing::debug!(kind = %R::KIND, "mutation rejected, another one is pending");
            return MutationOutcome::Busy;
        }
        let _guard = InFlight(&self.in_flight);

        let result = match &mutation {
            Mutation::Create(record) => self.source.create(record).await.map(Some),
            Mutation::Update(record) => self.source.update(record).await.map(Some),
            Mutation::Delete(id) => self.source.delete(id).await.map(|_| None),
        };

        match result {
            Ok(stored) => {
                tracing::info!(
                    kind = %R::KIND,
                    source = self.source.name(),
                    "record {}",
                    mutation.verb()
                );
                self.notifier
                    .success(&format!("{} {}", R::KIND.label(), mutation.verb()));
                MutationOutcome::Applied(stored)
            }
            Err(e) => {
                tracing::warn!(kind = %R::KIND, error = %e, "mutation failed");
                let message = e.user_message();
                self.notifier.error(&message);
                MutationOutcome::Failed(message)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::{Level, ToastQueue};
    use portal_core::User;
    use portal_sources::StubSource;

    fn bridge(
        records: Vec<User>,
    ) -> (MutationBridge<User>, Arc<StubSource<User>>, Arc<ToastQueue>) {
        let source = Arc::new(StubSource::new(records));
        let toasts = Arc::new(ToastQueue::default());
        let bridge = MutationBridge::new(source.clone(), toasts.clone());
        (bridge, source, toasts)
    }

    #[tokio::test]
    async fn test_create_reports_success() {
        let (bridge, source, toasts) = bridge(vec![]);
        let outcome = bridge
            .submit(Mutation::Create(User::new("", "Ana Ruiz", "ana@example.com")))
            .await;

        let MutationOutcome::Applied(Some(stored)) = outcome else {
            panic!("expected applied create, got {outcome:?}");
        };
        assert!(!stored.id.is_empty());
        assert_eq!(source.len().await, 1);
        let toast = toasts.latest().unwrap();
        assert_eq!(toast.level, Level::Success);
        assert_eq!(toast.message, "User created");
        assert!(!bridge.is_busy());
    }

    #[tokio::test]
    async fn test_delete_missing_reports_error() {
        let (bridge, _, toasts) = bridge(vec![User::new("u-1", "Ana", "ana@example.com")]);
        let outcome = bridge.submit(Mutation::Delete("u-9".to_string())).await;

        assert_eq!(outcome, MutationOutcome::Failed("User not found: u-9".to_string()));
        assert_eq!(toasts.latest().unwrap().level, Level::Error);
        assert!(!bridge.is_busy());
    }
}
