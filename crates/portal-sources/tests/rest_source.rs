use axum::{
    Json, Router,
    extract::{Path, Query},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, put},
};
use portal_core::{ContentItem, Ticket, User};
use portal_sources::{DataSource, FetchQuery, RestSettings, RestSource, SourceError};
use serde_json::{Value, json};
use std::collections::HashMap;

async fn list_tickets(
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    let auth = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());
    if auth != Some("Bearer secret") {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"message": "Sesión expirada"})),
        )
            .into_response();
    }
    if params.get("page").map(String::as_str) != Some("1")
        || params.get("limit").map(String::as_str) != Some("500")
    {
        return StatusCode::BAD_REQUEST.into_response();
    }
    Json(json!({
        "data": [
            {"id": 1, "subject": "No carga", "status": "abierto", "createdAt": "2026-10-20T10:00:00Z"},
            {"subject": "sin id"},
            {"id": 2, "title": "Factura", "status": "resuelto", "user": {"name": "Carlos", "email": "carlos@example.com"}}
        ],
        "total": 3
    }))
    .into_response()
}

async fn create_ticket(Json(body): Json<Value>) -> Response {
    let mut created = body;
    created["id"] = json!("T-99");
    (StatusCode::CREATED, Json(json!({ "data": created }))).into_response()
}

async fn update_ticket(Path(id): Path<String>, Json(body): Json<Value>) -> Response {
    if id == "missing" {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({"message": "Ticket no encontrado"})),
        )
            .into_response();
    }
    let mut updated = body;
    updated["id"] = json!(id);
    Json(updated).into_response()
}

async fn delete_ticket(Path(_id): Path<String>) -> StatusCode {
    StatusCode::NO_CONTENT
}

async fn serve() -> String {
    let app = Router::new()
        .route("/api/tickets", get(list_tickets).post(create_ticket))
        .route("/api/tickets/:id", put(update_ticket).delete(delete_ticket))
        .route("/api/users", get(|| async { Json(json!({"message": "ok"})) }))
        .route(
            "/api/contents",
            get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
        );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/api/")
}

fn settings(base_url: &str) -> RestSettings {
    let mut settings = RestSettings::new(base_url);
    settings.token = Some("secret".to_string());
    settings
}

#[tokio::test]
async fn test_fetch_unwraps_data_and_skips_records_without_id() {
    let base = serve().await;
    let source: RestSource<Ticket> = RestSource::new(settings(&base)).unwrap();

    let tickets = source.fetch(&FetchQuery::default()).await.unwrap();
    assert_eq!(tickets.len(), 2);
    assert_eq!(tickets[0].id, "1");
    assert!(tickets[0].created_at.is_some());
    assert_eq!(tickets[1].subject, "Factura");
    assert_eq!(tickets[1].requester_email.as_deref(), Some("carlos@example.com"));
}

#[tokio::test]
async fn test_server_message_is_kept() {
    let base = serve().await;
    let source: RestSource<Ticket> = RestSource::new(RestSettings::new(&base)).unwrap();

    let err = source.fetch(&FetchQuery::default()).await.unwrap_err();
    assert!(matches!(err, SourceError::Http { status: 401, .. }));
    assert_eq!(err.user_message(), "Sesión expirada");
}

#[tokio::test]
async fn test_non_list_payload_is_unusable() {
    let base = serve().await;
    let source: RestSource<User> = RestSource::new(settings(&base)).unwrap();

    let err = source.fetch(&FetchQuery::default()).await.unwrap_err();
    assert!(matches!(err, SourceError::Unusable(_)));
}

#[tokio::test]
async fn test_server_error_without_body() {
    let base = serve().await;
    let source: RestSource<ContentItem> = RestSource::new(settings(&base)).unwrap();

    let err = source.fetch(&FetchQuery::default()).await.unwrap_err();
    assert!(err.is_unavailable());
    assert_eq!(err.user_message(), portal_sources::GENERIC_FAILURE_MESSAGE);
}

#[tokio::test]
async fn test_mutations() {
    let base = serve().await;
    let source: RestSource<Ticket> = RestSource::new(settings(&base)).unwrap();

    let created = source
        .create(&Ticket::new("", "Nuevo ticket").with_priority("alta"))
        .await
        .unwrap();
    assert_eq!(created.id, "T-99");
    assert_eq!(created.priority.as_deref(), Some("alta"));

    let updated = source
        .update(&Ticket::new("T-5", "Editado").with_status("cerrado"))
        .await
        .unwrap();
    assert_eq!(updated.id, "T-5");
    assert_eq!(updated.status.as_deref(), Some("cerrado"));

    let err = source
        .update(&Ticket::new("missing", "x"))
        .await
        .unwrap_err();
    assert_eq!(err.user_message(), "Ticket no encontrado");

    let err = source.delete("  ").await.unwrap_err();
    assert!(matches!(err, SourceError::Invalid(_)));

    source.delete("T-5").await.unwrap();
}

#[tokio::test]
async fn test_unreachable_server_is_unavailable() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let source: RestSource<Ticket> =
        RestSource::new(RestSettings::new(format!("http://{addr}/api"))).unwrap();
    let err = source.fetch(&FetchQuery::default()).await.unwrap_err();
    assert!(matches!(err, SourceError::Transport(_)));
    assert!(err.is_unavailable());
}
