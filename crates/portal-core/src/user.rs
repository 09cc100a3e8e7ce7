use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::record::{Field, Record, RecordKind};

/// A portal account (operator or customer)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub created_at: Option<OffsetDateTime>,
}

impl User {
    pub fn new(id: impl Into<String>, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            role: None,
            status: Some("activo".to_string()),
            department: None,
            created_at: None,
        }
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = Some(department.into());
        self
    }

    pub fn created(mut self, at: OffsetDateTime) -> Self {
        self.created_at = Some(at);
        self
    }
}

impl Record for User {
    const KIND: RecordKind = RecordKind::User;
    const STATUSES: &'static [&'static str] = &["activo", "inactivo"];

    fn id(&self) -> &str {
        &self.id
    }

    fn headline(&self) -> &str {
        &self.name
    }

    fn field(&self, field: Field) -> Option<&str> {
        match field {
            Field::Status => self.status.as_deref(),
            Field::Role => self.role.as_deref(),
            Field::Department => self.department.as_deref(),
            _ => None,
        }
    }

    fn created_at(&self) -> Option<OffsetDateTime> {
        self.created_at
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.email.as_str()]
    }
}
