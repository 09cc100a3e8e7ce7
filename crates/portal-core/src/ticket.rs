//! Support ticket domain model

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::record::{Field, Record, RecordKind};

/// A support ticket filed by a customer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: String,
    pub subject: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    /// Id of the operator the ticket is assigned to
    #[serde(default)]
    pub assignee: Option<String>,
    #[serde(default)]
    pub requester_name: Option<String>,
    #[serde(default)]
    pub requester_email: Option<String>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub created_at: Option<OffsetDateTime>,
}

impl Ticket {
    pub fn new(id: impl Into<String>, subject: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            subject: subject.into(),
            description: None,
            status: Some("abierto".to_string()),
            priority: None,
            category: None,
            department: None,
            assignee: None,
            requester_name: None,
            requester_email: None,
            created_at: None,
        }
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(priority.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = Some(department.into());
        self
    }

    pub fn with_requester(mut self, name: impl Into<String>, email: impl Into<String>) -> Self {
        self.requester_name = Some(name.into());
        self.requester_email = Some(email.into());
        self
    }

    pub fn with_assignee(mut self, assignee: impl Into<String>) -> Self {
        self.assignee = Some(assignee.into());
        self
    }

    pub fn created(mut self, at: OffsetDateTime) -> Self {
        self.created_at = Some(at);
        self
    }
}

impl Record for Ticket {
    const KIND: RecordKind = RecordKind::Ticket;
    const STATUSES: &'static [&'static str] = &["abierto", "en_progreso", "resuelto", "cerrado"];

    fn id(&self) -> &str {
        &self.id
    }

    fn headline(&self) -> &str {
        &self.subject
    }

    fn field(&self, field: Field) -> Option<&str> {
        match field {
            Field::Status => self.status.as_deref(),
            Field::Priority => self.priority.as_deref(),
            Field::Category => self.category.as_deref(),
            Field::Department => self.department.as_deref(),
            Field::Assignee => self.assignee.as_deref(),
            Field::Kind | Field::Role => None,
        }
    }

    fn created_at(&self) -> Option<OffsetDateTime> {
        self.created_at
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.subject.as_str(), self.id.as_str()];
        fields.extend(self.requester_name.as_deref());
        fields.extend(self.requester_email.as_deref());
        fields
    }
}
