//! Record trait shared by every list view

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use time::OffsetDateTime;

use crate::Error;

/// The three collections the portal manages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Ticket,
    Content,
    User,
}

impl RecordKind {
    pub const ALL: [RecordKind; 3] = [RecordKind::Ticket, RecordKind::Content, RecordKind::User];

    /// Key used for the view in preferences and on the command line
    pub fn view_key(&self) -> &'static str {
        match self {
            RecordKind::Ticket => "tickets",
            RecordKind::Content => "contents",
            RecordKind::User => "users",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RecordKind::Ticket => "Ticket",
            RecordKind::Content => "Content",
            RecordKind::User => "User",
        }
    }

    /// Content is shown as cards, four to a page
    pub fn default_page_size(&self) -> usize {
        match self {
            RecordKind::Ticket => 10,
            RecordKind::Content => 4,
            RecordKind::User => 10,
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.view_key())
    }
}

impl FromStr for RecordKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tickets" | "ticket" => Ok(RecordKind::Ticket),
            "contents" | "content" => Ok(RecordKind::Content),
            "users" | "user" => Ok(RecordKind::User),
            other => Err(Error::UnknownView(other.to_string())),
        }
    }
}

/// Attributes a filter can select on
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Status,
    Priority,
    Category,
    Kind,
    Department,
    Assignee,
    Role,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Status => "status",
            Field::Priority => "priority",
            Field::Category => "category",
            Field::Kind => "type",
            Field::Department => "department",
            Field::Assignee => "assignee",
            Field::Role => "role",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "status" => Ok(Field::Status),
            "priority" => Ok(Field::Priority),
            "category" => Ok(Field::Category),
            "type" | "kind" => Ok(Field::Kind),
            "department" => Ok(Field::Department),
            "assignee" => Ok(Field::Assignee),
            "role" => Ok(Field::Role),
            other => Err(Error::UnknownField(other.to_string())),
        }
    }
}

/// One item of a list view.
///
/// Records are immutable from the view's point of view; a refetch replaces
/// the whole collection. Attributes a record does not carry return `None`,
/// which makes any active predicate on that attribute fail.
pub trait Record: Clone + Send + Sync + 'static {
    const KIND: RecordKind;

    /// Known status values, in the order the status filter cycles through them
    const STATUSES: &'static [&'static str];

    fn id(&self) -> &str;

    /// Short human-readable line (subject, title, or name)
    fn headline(&self) -> &str;

    fn field(&self, field: Field) -> Option<&str>;

    fn created_at(&self) -> Option<OffsetDateTime>;

    /// Values matched by free-text search
    fn search_fields(&self) -> Vec<&str>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_kind_round_trip() {
        for kind in RecordKind::ALL {
            assert_eq!(kind.view_key().parse::<RecordKind>().unwrap(), kind);
        }
        assert_eq!("Ticket".parse::<RecordKind>().unwrap(), RecordKind::Ticket);
        assert!("orders".parse::<RecordKind>().is_err());
    }

    #[test]
    fn test_field_aliases() {
        assert_eq!("type".parse::<Field>().unwrap(), Field::Kind);
        assert_eq!("kind".parse::<Field>().unwrap(), Field::Kind);
        assert_eq!(
            "colour".parse::<Field>(),
            Err(Error::UnknownField("colour".to_string()))
        );
    }

    #[test]
    fn test_default_page_sizes() {
        assert_eq!(RecordKind::Ticket.default_page_size(), 10);
        assert_eq!(RecordKind::Content.default_page_size(), 4);
    }
}
