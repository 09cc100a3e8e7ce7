//! Tabular presentation of records, shared by the CLI and the TUI

use time::OffsetDateTime;

use crate::content::ContentItem;
use crate::record::Record;
use crate::relative_time::relative_time;
use crate::ticket::Ticket;
use crate::user::User;

/// Placeholder for an empty cell
pub const EMPTY_CELL: &str = "-";

/// A record that knows how to lay itself out as a table row
pub trait Present: Record {
    const COLUMNS: &'static [&'static str];

    /// One cell per entry of [`Present::COLUMNS`]
    fn cells(&self, now: OffsetDateTime) -> Vec<String>;
}

fn cell(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => EMPTY_CELL.to_string(),
    }
}

fn age(at: Option<OffsetDateTime>, now: OffsetDateTime) -> String {
    at.map(|t| relative_time(t, now))
        .unwrap_or_else(|| EMPTY_CELL.to_string())
}

impl Present for Ticket {
    const COLUMNS: &'static [&'static str] = &[
        "ID", "Subject", "Status", "Priority", "Assignee", "Requester", "Created",
    ];

    fn cells(&self, now: OffsetDateTime) -> Vec<String> {
        vec![
            self.id.clone(),
            self.subject.clone(),
            cell(self.status.as_deref()),
            cell(self.priority.as_deref()),
            self.assignee
                .as_deref()
                .filter(|a| !a.trim().is_empty())
                .unwrap_or("unassigned")
                .to_string(),
            cell(self.requester_name.as_deref()),
            age(self.created_at, now),
        ]
    }
}

impl Present for ContentItem {
    const COLUMNS: &'static [&'static str] =
        &["ID", "Title", "Type", "Category", "Status", "Author", "Created"];

    fn cells(&self, now: OffsetDateTime) -> Vec<String> {
        vec![
            self.id.clone(),
            self.title.clone(),
            cell(self.kind.as_deref()),
            cell(self.category.as_deref()),
            cell(self.status.as_deref()),
            cell(self.author.as_deref()),
            age(self.created_at, now),
        ]
    }
}

impl Present for User {
    const COLUMNS: &'static [&'static str] =
        &["ID", "Name", "Email", "Role", "Status", "Department", "Created"];

    fn cells(&self, now: OffsetDateTime) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            self.email.clone(),
            cell(self.role.as_deref()),
            cell(self.status.as_deref()),
            cell(self.department.as_deref()),
            age(self.created_at, now),
        ]
    }
}
