use time::OffsetDateTime;

/// Human-friendly age of a timestamp ("3 hours ago", "yesterday", ...).
///
/// Past a week the calendar date is shown instead.
pub fn relative_time(then: OffsetDateTime, now: OffsetDateTime) -> String {
    let elapsed = now - then;
    if elapsed.whole_seconds() < 60 {
        return "just now".to_string();
    }
    if elapsed.whole_minutes() < 60 {
        return plural(elapsed.whole_minutes(), "minute");
    }
    if elapsed.whole_hours() < 24 {
        return plural(elapsed.whole_hours(), "hour");
    }

    let local_then = then.to_offset(now.offset());
    let days = (now.date() - local_then.date()).whole_days();
    match days {
        1 => "yesterday".to_string(),
        2..=6 => plural(days, "day"),
        _ => local_then.date().to_string(),
    }
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{n} {unit}s ago")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn test_relative_time() {
        let now = datetime!(2026-10-21 15:30 UTC);
        assert_eq!(relative_time(datetime!(2026-10-21 15:29:30 UTC), now), "just now");
        assert_eq!(relative_time(datetime!(2026-10-21 16:00 UTC), now), "just now");
        assert_eq!(relative_time(datetime!(2026-10-21 15:29 UTC), now), "1 minute ago");
        assert_eq!(relative_time(datetime!(2026-10-21 15:00 UTC), now), "30 minutes ago");
        assert_eq!(relative_time(datetime!(2026-10-21 10:30 UTC), now), "5 hours ago");
        assert_eq!(relative_time(datetime!(2026-10-20 10:30 UTC), now), "yesterday");
        assert_eq!(relative_time(datetime!(2026-10-17 10:30 UTC), now), "4 days ago");
        assert_eq!(relative_time(datetime!(2026-09-01 10:30 UTC), now), "2026-09-01");
    }
}
