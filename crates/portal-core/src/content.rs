//! Educational content domain model (tutorials, demo videos, articles)

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::record::{Field, Record, RecordKind};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentItem {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// `tutorial`, `video` or `articulo`
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub created_at: Option<OffsetDateTime>,
}

impl ContentItem {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            kind: None,
            category: None,
            status: Some("borrador".to_string()),
            author: None,
            created_at: None,
        }
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn created(mut self, at: OffsetDateTime) -> Self {
        self.created_at = Some(at);
        self
    }
}

impl Record for ContentItem {
    const KIND: RecordKind = RecordKind::Content;
    const STATUSES: &'static [&'static str] = &["publicado", "borrador"];

    fn id(&self) -> &str {
        &self.id
    }

    fn headline(&self) -> &str {
        &self.title
    }

    fn field(&self, field: Field) -> Option<&str> {
        match field {
            Field::Status => self.status.as_deref(),
            Field::Kind => self.kind.as_deref(),
            Field::Category => self.category.as_deref(),
            _ => None,
        }
    }

    fn created_at(&self) -> Option<OffsetDateTime> {
        self.created_at
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.title.as_str()];
        fields.extend(self.description.as_deref());
        fields.extend(self.author.as_deref());
        fields
    }
}
