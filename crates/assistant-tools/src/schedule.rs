//! Date parsing, reminder lead-time, and search-window rules.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};

/// Events further out than this get the long (24h) reminder lead.
const LONG_LEAD_THRESHOLD_HOURS: i64 = 72;

/// Compute when the reminder for an event should fire.
///
/// If the event is more than 72 hours away the reminder fires 24 hours
/// before it; otherwise (including exactly 72 hours) it fires 1 hour
/// before. The result is always strictly before the event.
pub fn reminder_fire_at(event_date: DateTime<Utc>, now: DateTime<Utc>) -> DateTime<Utc> {
    if event_date - now > Duration::hours(LONG_LEAD_THRESHOLD_HOURS) {
        event_date - Duration::hours(24)
    } else {
        event_date - Duration::hours(1)
    }
}

/// Compute the symmetric search window around an anchor date.
///
/// ±1.5 days for a weekend search, ±3.5 days for a full-week search,
/// ±1 day otherwise. Both ends are inclusive.
pub fn search_window(
    anchor: DateTime<Utc>,
    is_weekend: bool,
    is_full_week: bool,
) -> (DateTime<Utc>, DateTime<Utc>) {
    let pad = if is_weekend {
        Duration::hours(36)
    } else if is_full_week {
        Duration::hours(84)
    } else {
        Duration::hours(24)
    };

    (anchor - pad, anchor + pad)
}

/// Parse a model-produced date string into UTC.
///
/// Accepts RFC 3339, naive date-times (assumed UTC), and bare dates
/// (defaulting to 12:00, the unspecified-time rule).
pub fn parse_event_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(date) = DateTime::parse_from_rfc3339(raw) {
        return Some(date.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.and_hms_opt(12, 0, 0).map(|naive| naive.and_utc());
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(s: &str) -> DateTime<Utc> {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
            .unwrap()
            .and_utc()
    }

    #[test]
    fn test_long_lead_is_24h_before() {
        let now = at("2026-08-26 10:00:00");
        let event = now + Duration::hours(73);
        assert_eq!(reminder_fire_at(event, now), event - Duration::hours(24));
    }

    #[test]
    fn test_short_lead_is_1h_before() {
        let now = at("2026-08-26 10:00:00");
        let event = now + Duration::hours(2);
        assert_eq!(reminder_fire_at(event, now), event - Duration::hours(1));
    }

    #[test]
    fn test_exactly_72h_uses_short_lead() {
        let now = at("2026-08-26 10:00:00");
        let event = now + Duration::hours(72);
        assert_eq!(reminder_fire_at(event, now), event - Duration::hours(1));
    }

    #[test]
    fn test_fire_time_precedes_event() {
        let now = at("2026-08-26 10:00:00");
        for hours in [1, 12, 71, 72, 73, 100] {
            let event = now + Duration::hours(hours);
            assert!(reminder_fire_at(event, now) < event);
        }
    }

    #[test]
    fn test_default_window() {
        let anchor = at("2026-08-26 12:00:00");
        let (start, end) = search_window(anchor, false, false);
        assert_eq!(start, anchor - Duration::hours(24));
        assert_eq!(end, anchor + Duration::hours(24));
    }

    #[test]
    fn test_weekend_window() {
        let anchor = at("2026-08-29 12:00:00");
        let (start, end) = search_window(anchor, true, false);
        assert_eq!(start, anchor - Duration::hours(36));
        assert_eq!(end, anchor + Duration::hours(36));
    }

    #[test]
    fn test_full_week_window() {
        let anchor = at("2026-08-31 12:00:00");
        let (start, end) = search_window(anchor, false, true);
        assert_eq!(start, anchor - Duration::hours(84));
        assert_eq!(end, anchor + Duration::hours(84));
    }

    #[test]
    fn test_weekend_takes_precedence_over_full_week() {
        let anchor = at("2026-08-29 12:00:00");
        let (start, _) = search_window(anchor, true, true);
        assert_eq!(start, anchor - Duration::hours(36));
    }

    #[test]
    fn test_parse_rfc3339() {
        let parsed = parse_event_date("2026-08-28T15:00:00-04:00").unwrap();
        assert_eq!(parsed.to_rfc3339(), "2026-08-28T19:00:00+00:00");
    }

    #[test]
    fn test_parse_naive() {
        let parsed = parse_event_date("2026-08-28T15:00:00").unwrap();
        assert_eq!(parsed, at("2026-08-28 15:00:00"));
    }

    #[test]
    fn test_parse_bare_date_defaults_to_noon() {
        let parsed = parse_event_date("2026-08-28").unwrap();
        assert_eq!(parsed, at("2026-08-28 12:00:00"));
    }

    #[test]
    fn test_parse_garbage() {
        assert!(parse_event_date("whenever works").is_none());
    }
}
