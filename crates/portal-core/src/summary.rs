//! Dashboard counters

use std::collections::BTreeMap;

use crate::record::{Field, Record};

pub const NO_VALUE: &str = "(none)";

/// Number of records per value of `field`; records without one count under `(none)`
pub fn counts_by<'a, R, I>(records: I, field: Field) -> BTreeMap<String, usize>
where
    R: Record,
    I: IntoIterator<Item = &'a R>,
{
    let mut counts = BTreeMap::new();
    for record in records {
        let key = record.field(field).unwrap_or(NO_VALUE).to_string();
        *counts.entry(key).or_insert(0) += 1;
    }
    counts
}

pub fn status_counts<'a, R, I>(records: I) -> BTreeMap<String, usize>
where
    R: Record,
    I: IntoIterator<Item = &'a R>,
{
    counts_by(records, Field::Status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Ticket;

    #[test]
    fn test_status_counts() {
        let mut unknown = Ticket::new("4", "d");
        unknown.status = None;
        let tickets = vec![
            Ticket::new("1", "a").with_status("abierto"),
            Ticket::new("2", "b").with_status("abierto"),
            Ticket::new("3", "c").with_status("resuelto"),
            unknown,
        ];
        let counts = status_counts(&tickets);
        assert_eq!(counts["abierto"], 2);
        assert_eq!(counts["resuelto"], 1);
        assert_eq!(counts[NO_VALUE], 1);
    }

    #[test]
    fn test_counts_by_priority() {
        let tickets = vec![
            Ticket::new("1", "a").with_priority("alta"),
            Ticket::new("2", "b").with_priority("baja"),
        ];
        let counts = counts_by(tickets.iter(), Field::Priority);
        assert_eq!(counts.len(), 2);
    }
}
