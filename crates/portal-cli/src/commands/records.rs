use anyhow::{Result, anyhow, bail};
use portal_config::{PreferenceStore, ViewMode};
use portal_core::summary::status_counts;
use portal_core::{Collection, FilterState, Present, Record};
use portal_engine::{CollectionView, ListController, Mutation, MutationBridge, MutationOutcome};
use portal_sources::{Fixture, Resource};
use serde::Serialize;
use serde_json::{Map, Value, json};
use std::sync::Arc;

use super::{ConsoleNotifier, Session, render};
use crate::cli::RecordCommands;

/// Placeholder id for records that have not been stored yet
const UNSAVED_ID: &str = "new";

pub async fn handle<R>(cmd: RecordCommands, session: &Session, prefs: &PreferenceStore) -> Result<()>
where
    R: Present + Resource + Fixture + Serialize,
{
    match cmd {
        RecordCommands::List {
            filters,
            page,
            page_size,
            view,
            json,
        } => {
            let mode = view.unwrap_or_else(|| prefs.view_mode(R::KIND.view_key()));
            let state = session.view::<R>(prefs, page_size)?;
            list(session, state, filters.to_state(), page, mode, json).await
        }
        RecordCommands::Stats { filters, json } => {
            let state = session.view::<R>(prefs, None)?;
            stats(session, state, filters.to_state(), json).await
        }
        RecordCommands::Create { fields } => create::<R>(session, fields).await,
        RecordCommands::Update { id, fields } => update::<R>(session, id, fields).await,
        RecordCommands::Delete { id } => delete::<R>(session, id).await,
    }
}

async fn load<R>(session: &Session, view: CollectionView<R>) -> Result<ListController<R>>
where
    R: Present + Resource + Fixture,
{
    let mut controller =
        ListController::new(view, session.source::<R>()?, Arc::new(ConsoleNotifier), session.query());
    controller.refresh().await;
    if let Some(message) = controller.view().collection().error() {
        bail!("{message}");
    }
    Ok(controller)
}

async fn list<R>(
    session: &Session,
    mut view: CollectionView<R>,
    filters: FilterState,
    page: usize,
    mode: ViewMode,
    json: bool,
) -> Result<()>
where
    R: Present + Resource + Fixture + Serialize,
{
    view.set_filters(filters);
    let mut controller = load(session, view).await?;
    if !controller.view_mut().go_to_page(page) {
        let total = controller.view().derived().total_pages;
        bail!("page {page} is out of range (1-{total})");
    }

    let view = controller.view();
    let derived = view.derived();

    if json {
        let out = json!({
            "page": derived.current_page,
            "page_size": derived.page_size,
            "total_pages": derived.total_pages,
            "total": derived.total_count(),
            "records": derived.page(),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    let noun = format!("{}s", R::KIND.label().to_lowercase());
    if let Collection::Unusable { .. } = view.collection() {
        println!("No data available.");
        return Ok(());
    }
    if derived.total_count() == 0 {
        println!("No {noun} match the current filters.");
        return Ok(());
    }

    let now = view.context().now;
    let rows: Vec<Vec<String>> = derived.page().iter().map(|r| r.cells(now)).collect();
    match mode {
        ViewMode::List => println!("{}", render::table(R::COLUMNS, &rows)),
        ViewMode::Grid => println!("{}", render::cards(R::COLUMNS, &rows)),
    }
    println!();
    println!(
        "Page {}/{} · {}-{} of {} {noun}",
        derived.current_page,
        derived.total_pages,
        derived.first_index(),
        derived.first_index() + derived.page().len() - 1,
        derived.total_count()
    );
    if derived.has_next() {
        println!("Next: --page {}", derived.current_page + 1);
    }

    Ok(())
}

async fn stats<R>(
    session: &Session,
    mut view: CollectionView<R>,
    filters: FilterState,
    json: bool,
) -> Result<()>
where
    R: Present + Resource + Fixture,
{
    view.set_filters(filters);
    let controller = load(session, view).await?;
    let derived = controller.view().derived();
    let counts = status_counts(derived.filtered.iter().copied());

    if json {
        println!("{}", serde_json::to_string_pretty(&counts)?);
        return Ok(());
    }

    println!("{}s by status ({} total):", R::KIND.label(), derived.total_count());
    for (status, count) in &counts {
        println!("  {status:<14} {count}");
    }
    Ok(())
}

/// Builds a record from `key=value` pairs laid over `base`
fn assemble<R: Resource>(base: Value, id: &str, fields: Vec<(String, String)>) -> Result<R> {
    let mut body = match base {
        Value::Object(obj) => obj,
        _ => Map::new(),
    };
    body.insert("id".to_string(), Value::String(id.to_string()));
    for (key, value) in fields {
        body.insert(key, Value::String(value));
    }
    R::from_api(&Value::Object(body))
        .ok_or_else(|| anyhow!("could not build a {} from the given fields", R::KIND.label()))
}

async fn submit<R: Present + Resource + Fixture>(
    session: &Session,
    mutation: Mutation<R>,
) -> Result<Option<R>> {
    let bridge = MutationBridge::new(session.source::<R>()?, Arc::new(ConsoleNotifier));
    let verb = mutation.verb();
    match bridge.submit(mutation).await {
        MutationOutcome::Applied(stored) => Ok(stored),
        MutationOutcome::Failed(_) => bail!("{} was not {verb}", R::KIND.label()),
        MutationOutcome::Busy => bail!("another change is still being saved"),
    }
}

async fn create<R: Present + Resource + Fixture>(
    session: &Session,
    fields: Vec<(String, String)>,
) -> Result<()> {
    let record: R = assemble(Value::Null, UNSAVED_ID, fields)?;
    let stored = submit(session, Mutation::Create(record)).await?;
    if let Some(id) = assigned_id(stored.as_ref()) {
        println!("  ID: {id}");
    }
    Ok(())
}

/// Id given by the source, if its reply carried one
fn assigned_id<R: Record>(stored: Option<&R>) -> Option<&str> {
    stored
        .map(|r| r.id())
        .filter(|id| !id.trim().is_empty() && *id != UNSAVED_ID)
}

async fn update<R: Present + Resource + Fixture>(
    session: &Session,
    id: String,
    fields: Vec<(String, String)>,
) -> Result<()> {
    let source = session.source::<R>()?;
    let current = source
        .fetch(&session.query())
        .await
        .map_err(|e| anyhow!(e.user_message()))?
        .into_iter()
        .find(|r| r.id() == id)
        .ok_or_else(|| anyhow!("{} not found: {id}", R::KIND.label()))?;

    let mut record: R = assemble(current.to_api(), &id, fields)?;
    if let Some(at) = current.created_at() {
        record.set_created_at(at);
    }
    submit(session, Mutation::Update(record)).await?;
    Ok(())
}

async fn delete<R: Present + Resource + Fixture>(session: &Session, id: String) -> Result<()> {
    submit(session, Mutation::<R>::Delete(id)).await?;
    Ok(())
}
