//! Per-domain adapters between raw API JSON and typed records
//!
//! The API is inconsistent about field names (`createdAt` vs `created_at`,
//! nested `user` objects, `first_name`/`last_name`). All of that is resolved
//! here, once, so nothing downstream has to look for field variants.

use portal_core::{ContentItem, Record, Ticket, User};
use serde_json::{Map, Value, json};
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime, Time};

/// A record type the REST API exposes
pub trait Resource: Record {
    /// Path segment under the API base url
    const ENDPOINT: &'static str;

    /// `None` when the object lacks an id
    fn from_api(value: &Value) -> Option<Self>;

    /// Request body for create/update (never includes the id)
    fn to_api(&self) -> Value;

    fn assign_id(&mut self, id: String);

    fn set_created_at(&mut self, at: OffsetDateTime);
}

/// Items of a list response: a bare array or `{ "data": [...] }`
pub fn collection_items(value: &Value) -> Result<&[Value], String> {
    match value {
        Value::Array(items) => Ok(items.as_slice()),
        Value::Object(obj) => match obj.get("data") {
            Some(Value::Array(items)) => Ok(items.as_slice()),
            Some(other) => Err(format!("`data` is {}, expected a list", kind_of(other))),
            None => Err("object without a `data` list".to_string()),
        },
        other => Err(format!("got {}, expected a list", kind_of(other))),
    }
}

/// Unwraps `{ "data": {...} }` around a single resource
pub fn single_item(value: &Value) -> &Value {
    match value.get("data") {
        Some(inner @ Value::Object(_)) => inner,
        _ => value,
    }
}

/// Adapts every element, skipping the ones that cannot become a record
pub fn adapt_all<R: Resource>(items: &[Value]) -> Vec<R> {
    items
        .iter()
        .filter_map(|item| {
            let record = R::from_api(item);
            if record.is_none() {
                tracing::warn!(view = %R::KIND, "skipping {} without an id", R::KIND.label());
            }
            record
        })
        .collect()
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

/// Non-empty string or number as text
fn scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// First key holding a scalar
fn text(obj: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| obj.get(*key).and_then(scalar))
}

/// Scalar, or the `name` of a nested object (`"category": {"name": ...}`)
fn named(obj: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| match obj.get(*key)? {
        Value::Object(inner) => text(inner, &["name", "title"]),
        other => scalar(other),
    })
}

/// Scalar, or the `id` of a nested object (`"assigned_to": {"id": 4}`)
fn ident(obj: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| match obj.get(*key)? {
        Value::Object(inner) => text(inner, &["id", "_id"]),
        other => scalar(other),
    })
}

fn nested_text(obj: &Map<String, Value>, parent: &str, key: &str) -> Option<String> {
    obj.get(parent)
        .and_then(Value::as_object)
        .and_then(|inner| text(inner, &[key]))
}

/// RFC 3339 timestamp or bare `YYYY-MM-DD` (midnight UTC); anything else is `None`
pub fn parse_timestamp(raw: &str) -> Option<OffsetDateTime> {
    let raw = raw.trim();
    if let Ok(at) = OffsetDateTime::parse(raw, &Rfc3339) {
        return Some(at);
    }
    let date = Date::parse(raw, format_description!("[year]-[month]-[day]")).ok()?;
    Some(date.with_time(Time::MIDNIGHT).assume_utc())
}

fn created_at(obj: &Map<String, Value>) -> Option<OffsetDateTime> {
    let raw = text(obj, &["created_at", "createdAt", "date"])?;
    let parsed = parse_timestamp(&raw);
    if parsed.is_none() {
        tracing::debug!(raw = %raw, "unparseable creation timestamp");
    }
    parsed
}

fn id(obj: &Map<String, Value>) -> Option<String> {
    text(obj, &["id", "_id"])
}

impl Resource for Ticket {
    const ENDPOINT: &'static str = "tickets";

    fn from_api(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        Some(Ticket {
            id: id(obj)?,
            subject: text(obj, &["subject", "title"]).unwrap_or_default(),
            description: text(obj, &["description", "message"]),
            status: text(obj, &["status"]),
            priority: text(obj, &["priority"]),
            category: named(obj, &["category"]),
            department: named(obj, &["department"]),
            assignee: ident(obj, &["assigned_to", "assignee", "assignee_id"]),
            requester_name: text(obj, &["requester_name"])
                .or_else(|| nested_text(obj, "user", "name"))
                .or_else(|| text(obj, &["name"])),
            requester_email: text(obj, &["requester_email"])
                .or_else(|| nested_text(obj, "user", "email"))
                .or_else(|| text(obj, &["email"])),
            created_at: created_at(obj),
        })
    }

    fn to_api(&self) -> Value {
        json!({
            "subject": self.subject,
            "description": self.description,
            "status": self.status,
            "priority": self.priority,
            "category": self.category,
            "department": self.department,
            "assigned_to": self.assignee,
            "requester_name": self.requester_name,
            "requester_email": self.requester_email,
        })
    }

    fn assign_id(&mut self, id: String) {
        self.id = id;
    }

    fn set_created_at(&mut self, at: OffsetDateTime) {
        self.created_at = Some(at);
    }
}

impl Resource for ContentItem {
    const ENDPOINT: &'static str = "contents";

    fn from_api(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        Some(ContentItem {
            id: id(obj)?,
            title: text(obj, &["title", "name"]).unwrap_or_default(),
            description: text(obj, &["description", "summary"]),
            kind: text(obj, &["type", "content_type", "kind"]),
            category: named(obj, &["category"]),
            status: text(obj, &["status"]),
            author: named(obj, &["author"]),
            created_at: created_at(obj),
        })
    }

    fn to_api(&self) -> Value {
        json!({
            "title": self.title,
            "description": self.description,
            "type": self.kind,
            "category": self.category,
            "status": self.status,
            "author": self.author,
        })
    }

    fn assign_id(&mut self, id: String) {
        self.id = id;
    }

    fn set_created_at(&mut self, at: OffsetDateTime) {
        self.created_at = Some(at);
    }
}

impl Resource for User {
    const ENDPOINT: &'static str = "users";

    fn from_api(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        let name = text(obj, &["name", "full_name"]).or_else(|| {
            let parts: Vec<String> = [text(obj, &["first_name"]), text(obj, &["last_name"])]
                .into_iter()
                .flatten()
                .collect();
            (!parts.is_empty()).then(|| parts.join(" "))
        });
        let status = text(obj, &["status"]).or_else(|| {
            obj.get("is_active")
                .and_then(Value::as_bool)
                .map(|active| (if active { "activo" } else { "inactivo" }).to_string())
        });
        Some(User {
            id: id(obj)?,
            name: name.unwrap_or_default(),
            email: text(obj, &["email"]).unwrap_or_default(),
            role: named(obj, &["role"]),
            status,
            department: named(obj, &["department"]),
            created_at: created_at(obj),
        })
    }

    fn to_api(&self) -> Value {
        json!({
            "name": self.name,
            "email": self.email,
            "role": self.role,
            "status": self.status,
            "department": self.department,
        })
    }

    fn assign_id(&mut self, id: String) {
        self.id = id;
    }

    fn set_created_at(&mut self, at: OffsetDateTime) {
        self.created_at = Some(at);
    }
}
