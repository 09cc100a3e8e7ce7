use anyhow::Result;
use portal_config::PreferenceStore;
use portal_core::{ContentItem, Present, RecordKind, Ticket, User};
use portal_engine::{ListController, ToastQueue};
use portal_sources::{Fixture, Resource};
use std::sync::Arc;

use super::Session;

pub async fn handle(view: RecordKind, session: &Session, prefs: PreferenceStore) -> Result<()> {
    match view {
        RecordKind::Ticket => run::<Ticket>(session, prefs).await,
        RecordKind::Content => run::<ContentItem>(session, prefs).await,
        RecordKind::User => run::<User>(session, prefs).await,
    }
}

async fn run<R>(session: &Session, prefs: PreferenceStore) -> Result<()>
where
    R: Present + Resource + Fixture,
{
    let toasts = Arc::new(ToastQueue::default());
    let view = session.view::<R>(&prefs, None)?;
    let controller =
        ListController::new(view, session.source::<R>()?, toasts.clone(), session.query());
    portal_tui::run(controller, toasts, prefs).await
}
