//! Filter reducer: full collection + filter state -> filtered list

use std::sync::Arc;

use crate::filter::{EvalContext, FilterState};
use crate::record::Record;

/// Source collection of a view, as last loaded
#[derive(Debug, Clone)]
pub enum Collection<R> {
    /// Not fetched yet
    Pending,
    Ready(Arc<Vec<R>>),
    /// The API answered with something other than a list
    Unusable { reason: String },
    Failed { message: String },
}

impl<R> Default for Collection<R> {
    fn default() -> Self {
        Collection::Pending
    }
}

impl<R> Collection<R> {
    pub fn ready(records: Vec<R>) -> Self {
        Collection::Ready(Arc::new(records))
    }

    /// Loaded records, empty unless the collection is ready
    pub fn records(&self) -> &[R] {
        match self {
            Collection::Ready(records) => records.as_slice(),
            _ => &[],
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Collection::Ready(_))
    }

    /// Message for the view-level error banner
    pub fn error(&self) -> Option<&str> {
        match self {
            Collection::Failed { message } => Some(message),
            _ => None,
        }
    }
}

/// Matching records in their original order. The input is never modified.
pub fn filter_records<'a, R: Record>(
    records: &'a [R],
    filters: &FilterState,
    ctx: &EvalContext,
) -> Vec<&'a R> {
    if filters.is_default() {
        return records.iter().collect();
    }
    let prepared = filters.prepare(ctx);
    records.iter().filter(|r| prepared.matches(*r)).collect()
}

pub fn filter_collection<'a, R: Record>(
    collection: &'a Collection<R>,
    filters: &FilterState,
    ctx: &EvalContext,
) -> Vec<&'a R> {
    match collection {
        Collection::Ready(records) => filter_records(records, filters, ctx),
        Collection::Unusable { reason } => {
            // warned once when the payload was stored; this runs on every render
            tracing::debug!(view = %R::KIND, %reason, "collection unusable, showing nothing");
            Vec::new()
        }
        Collection::Pending | Collection::Failed { .. } => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Field;
    use crate::{Selection, Ticket, User};
    use time::macros::datetime;

    fn ctx() -> EvalContext {
        EvalContext::new(datetime!(2026-10-21 15:30 UTC))
    }

    fn tickets() -> Vec<Ticket> {
        vec![
            Ticket::new("t1", "No carga el ejercicio").with_status("abierto"),
            Ticket::new("t2", "Factura duplicada").with_status("resuelto"),
            Ticket::new("t3", "Cambio de contraseña").with_status("abierto"),
            Ticket::new("t4", "Error en informe").with_status("cerrado"),
        ]
    }

    fn ids(records: &[&Ticket]) -> Vec<String> {
        records.iter().map(|t| t.id.clone()).collect()
    }

    #[test]
    fn test_default_filters_return_everything_in_order() {
        let source = tickets();
        let out = filter_records(&source, &FilterState::new(), &ctx());
        assert_eq!(ids(&out), vec!["t1", "t2", "t3", "t4"]);
    }

    #[test]
    fn test_filter_preserves_relative_order() {
        let source = tickets();
        let mut state = FilterState::new();
        state.set_selection(Field::Status, Selection::Equals("abierto".to_string()));
        let out = filter_records(&source, &state, &ctx());
        assert_eq!(ids(&out), vec!["t1", "t3"]);
        assert_eq!(source.len(), 4);
    }

    #[test]
    fn test_filter_is_idempotent() {
        let source = tickets();
        let mut state = FilterState::new();
        state.set_search("a");
        state.set_selection(Field::Status, Selection::Equals("abierto".to_string()));
        let first = ids(&filter_records(&source, &state, &ctx()));
        let second = ids(&filter_records(&source, &state, &ctx()));
        assert_eq!(first, second);
    }

    #[test]
    fn test_search_soundness_and_completeness() {
        let users = vec![
            User::new("1", "Maria Lopez", "mlopez@example.com"),
            User::new("2", "Carlos", "carlos@example.com"),
            User::new("3", "Ana", "ana.maria@example.com"),
            User::new("4", "Pedro", "pedro@example.com"),
        ];
        for query in ["maria", "EXAMPLE", "o", "zzz", "@"] {
            let mut state = FilterState::new();
            state.set_search(query);
            let out = filter_records(&users, &state, &ctx());
            let needle = query.to_lowercase();
            let expected: Vec<&str> = users
                .iter()
                .filter(|u| {
                    u.name.to_lowercase().contains(&needle)
                        || u.email.to_lowercase().contains(&needle)
                })
                .map(|u| u.id.as_str())
                .collect();
            let got: Vec<&str> = out.iter().map(|u| u.id.as_str()).collect();
            assert_eq!(got, expected, "query {query}");
        }
    }

    #[test]
    fn test_maria_matches_email_not_carlos() {
        let users = vec![
            User::new("1", "M. Gomez", "maria@example.com"),
            User::new("2", "Carlos", "carlos@example.com"),
        ];
        let mut state = FilterState::new();
        state.set_search("maria");
        let out = filter_records(&users, &state, &ctx());
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, "1");
    }

    #[test]
    fn test_non_ready_collections_yield_nothing() {
        let state = FilterState::new();
        let pending: Collection<Ticket> = Collection::Pending;
        let unusable: Collection<Ticket> = Collection::Unusable {
            reason: "object without data".to_string(),
        };
        let failed: Collection<Ticket> = Collection::Failed {
            message: "503".to_string(),
        };
        assert!(filter_collection(&pending, &state, &ctx()).is_empty());
        assert!(filter_collection(&unusable, &state, &ctx()).is_empty());
        assert!(filter_collection(&failed, &state, &ctx()).is_empty());
        assert_eq!(failed.error(), Some("503"));
        assert_eq!(unusable.error(), None);
    }

    #[derive(Clone, Default)]
    struct Captured(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_unusable_collection_does_not_warn_per_pass() {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_writer(move || writer.clone())
            .finish();

        let unusable: Collection<Ticket> = Collection::Unusable {
            reason: "object without data".to_string(),
        };
        tracing::subscriber::with_default(subscriber, || {
            for _ in 0..3 {
                assert!(filter_collection(&unusable, &FilterState::new(), &ctx()).is_empty());
            }
        });
        assert!(captured.0.lock().unwrap().is_empty());
    }
}
