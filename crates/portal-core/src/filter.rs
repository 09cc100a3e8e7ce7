//! Filter state and the predicate set evaluated against each record
//!
//! Every dimension is independent and the results are ANDed. A dimension left
//! at its sentinel (`Selection::All`, `DateBucket::All`, empty search) is a
//! no-op.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use time::{Date, Duration, OffsetDateTime, Time};

use crate::Error;
use crate::record::{Field, Record};

/// Value selected for one filter dimension
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Selection {
    #[default]
    All,
    Equals(String),
    /// The attribute equals the configured current user id
    CurrentUser,
    /// The attribute is absent
    Unassigned,
}

impl Selection {
    pub fn is_all(&self) -> bool {
        matches!(self, Selection::All)
    }

    fn matches(&self, value: Option<&str>, current_user: Option<&str>) -> bool {
        match self {
            Selection::All => true,
            Selection::Equals(wanted) => value.is_some_and(|v| v.eq_ignore_ascii_case(wanted)),
            Selection::CurrentUser => match (value, current_user) {
                (Some(v), Some(me)) => v == me,
                _ => false,
            },
            Selection::Unassigned => value.is_none_or(|v| v.trim().is_empty()),
        }
    }
}

impl FromStr for Selection {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Ok(match trimmed.to_ascii_lowercase().as_str() {
            "" | "all" => Selection::All,
            "current_user" | "me" => Selection::CurrentUser,
            "unassigned" | "none" => Selection::Unassigned,
            _ => Selection::Equals(trimmed.to_string()),
        })
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::All => f.write_str("all"),
            Selection::Equals(value) => f.write_str(value),
            Selection::CurrentUser => f.write_str("current_user"),
            Selection::Unassigned => f.write_str("unassigned"),
        }
    }
}

/// Creation-date range buckets
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateBucket {
    #[default]
    All,
    Today,
    Yesterday,
    Week,
    LastWeek,
    Month,
    LastMonth,
    Quarter,
}

impl DateBucket {
    pub const ALL: [DateBucket; 8] = [
        DateBucket::All,
        DateBucket::Today,
        DateBucket::Yesterday,
        DateBucket::Week,
        DateBucket::LastWeek,
        DateBucket::Month,
        DateBucket::LastMonth,
        DateBucket::Quarter,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DateBucket::All => "all",
            DateBucket::Today => "today",
            DateBucket::Yesterday => "yesterday",
            DateBucket::Week => "week",
            DateBucket::LastWeek => "last_week",
            DateBucket::Month => "month",
            DateBucket::LastMonth => "last_month",
            DateBucket::Quarter => "quarter",
        }
    }

    /// Next bucket in display order, wrapping back to `All`
    pub fn cycle(&self) -> DateBucket {
        let idx = Self::ALL.iter().position(|b| b == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

impl fmt::Display for DateBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DateBucket {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|b| b.as_str() == wanted)
            .ok_or(Error::UnknownDateBucket(wanted))
    }
}

/// Calendar boundaries for the date buckets, computed once per evaluation pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateBoundaries {
    pub today: OffsetDateTime,
    pub yesterday: OffsetDateTime,
    pub week_start: OffsetDateTime,
    pub last_week_start: OffsetDateTime,
    pub month_start: OffsetDateTime,
    pub last_month_start: OffsetDateTime,
    pub quarter_start: OffsetDateTime,
}

impl DateBoundaries {
    /// Boundaries in `now`'s offset. Weeks start on Sunday.
    pub fn at(now: OffsetDateTime) -> Self {
        let today = now.date();
        let week_start = today - Duration::days(today.weekday().number_days_from_sunday() as i64);
        let month_start = first_of_month(today);

        let months_into_quarter = (u8::from(today.month()) - 1) % 3;
        let mut quarter_start = month_start;
        for _ in 0..months_into_quarter {
            quarter_start = first_of_previous_month(quarter_start);
        }

        let midnight = |date: Date| now.replace_date_time(date.with_time(Time::MIDNIGHT));
        Self {
            today: midnight(today),
            yesterday: midnight(today - Duration::days(1)),
            week_start: midnight(week_start),
            last_week_start: midnight(week_start - Duration::weeks(1)),
            month_start: midnight(month_start),
            last_month_start: midnight(first_of_previous_month(month_start)),
            quarter_start: midnight(quarter_start),
        }
    }

    pub fn contains(&self, bucket: DateBucket, at: OffsetDateTime) -> bool {
        match bucket {
            DateBucket::All => true,
            DateBucket::Today => at >= self.today,
            DateBucket::Yesterday => at >= self.yesterday && at < self.today,
            DateBucket::Week => at >= self.week_start,
            DateBucket::LastWeek => at >= self.last_week_start && at < self.week_start,
            DateBucket::Month => at >= self.month_start,
            DateBucket::LastMonth => at >= self.last_month_start && at < self.month_start,
            DateBucket::Quarter => at >= self.quarter_start,
        }
    }
}

fn first_of_month(date: Date) -> Date {
    date - Duration::days(date.day() as i64 - 1)
}

fn first_of_previous_month(first: Date) -> Date {
    first_of_month(first - Duration::days(1))
}

/// Inputs every predicate may need besides the record itself
#[derive(Debug, Clone)]
pub struct EvalContext {
    pub now: OffsetDateTime,
    pub current_user: Option<String>,
}

impl EvalContext {
    pub fn new(now: OffsetDateTime) -> Self {
        Self {
            now,
            current_user: None,
        }
    }

    pub fn with_current_user(mut self, user: Option<String>) -> Self {
        self.current_user = user;
        self
    }

    /// Local wall clock when the offset can be determined, UTC otherwise
    pub fn now_local() -> Self {
        Self::new(OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc()))
    }
}

/// Currently selected filter values for a view
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    #[serde(default)]
    selections: BTreeMap<Field, Selection>,
    #[serde(default)]
    date: DateBucket,
    #[serde(default)]
    search: String,
}

static ALL_SELECTION: Selection = Selection::All;

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selection(&self, field: Field) -> &Selection {
        self.selections.get(&field).unwrap_or(&ALL_SELECTION)
    }

    pub fn set_selection(&mut self, field: Field, selection: Selection) {
        if selection.is_all() {
            self.selections.remove(&field);
        } else {
            self.selections.insert(field, selection);
        }
    }

    pub fn date(&self) -> DateBucket {
        self.date
    }

    pub fn set_date(&mut self, bucket: DateBucket) {
        self.date = bucket;
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, query: impl Into<String>) {
        self.search = query.into();
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_default(&self) -> bool {
        self.selections.is_empty() && self.date == DateBucket::All && self.search.is_empty()
    }

    /// Active (non-sentinel) selections, in field order
    pub fn active_selections(&self) -> impl Iterator<Item = (Field, &Selection)> {
        self.selections.iter().map(|(field, sel)| (*field, sel))
    }

    /// Precompute everything that does not depend on the record
    pub fn prepare<'a>(&'a self, ctx: &'a EvalContext) -> PreparedFilter<'a> {
        PreparedFilter {
            state: self,
            boundaries: (self.date != DateBucket::All).then(|| DateBoundaries::at(ctx.now)),
            query: self.search.to_lowercase(),
            current_user: ctx.current_user.as_deref(),
        }
    }

    /// One-off evaluation. Use [`FilterState::prepare`] when testing many records.
    pub fn matches<R: Record>(&self, record: &R, ctx: &EvalContext) -> bool {
        self.prepare(ctx).matches(record)
    }
}

/// A filter state bound to one evaluation pass
#[derive(Debug)]
pub struct PreparedFilter<'a> {
    state: &'a FilterState,
    boundaries: Option<DateBoundaries>,
    query: String,
    current_user: Option<&'a str>,
}

impl PreparedFilter<'_> {
    pub fn matches<R: Record>(&self, record: &R) -> bool {
        self.matches_selections(record) && self.matches_date(record) && self.matches_search(record)
    }

    fn matches_selections<R: Record>(&self, record: &R) -> bool {
        self.state.selections.iter().all(|(field, selection)| {
            let value = record.field(*field);
            let matched = selection.matches(value, self.current_user);
            if !matched && value.is_none() && !matches!(selection, Selection::Unassigned) {
                tracing::debug!(id = record.id(), field = %field, "record has no value for active filter");
            }
            matched
        })
    }

    fn matches_date<R: Record>(&self, record: &R) -> bool {
        let Some(boundaries) = &self.boundaries else {
            return true;
        };
        match record.created_at() {
            Some(at) => boundaries.contains(self.state.date, at),
            None => {
                tracing::debug!(id = record.id(), "record has no creation date");
                false
            }
        }
    }

    fn matches_search<R: Record>(&self, record: &R) -> bool {
        if self.query.is_empty() {
            return true;
        }
        record
            .search_fields()
            .iter()
            .any(|value| value.to_lowercase().contains(&self.query))
    }
}
