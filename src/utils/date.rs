//! Publish-date parsing and formatting.
//!
//! Entry dates arrive as strings in a handful of shapes (RFC3339, naive
//! date/datetime). Naive values get the machine's local UTC offset
//! attached so every entry carries a comparable, timezone-aware instant.
//!
//! An entry without a `publish_date` gets the *unset sentinel*: a fixed
//! instant far in the past with an improbable microsecond component, so it
//! can never collide with a real author-supplied date.

use anyhow::{Result, bail};
use chrono::{
    DateTime, Datelike, FixedOffset, Local, LocalResult, NaiveDate, NaiveDateTime, NaiveTime,
    TimeZone, Timelike, Utc,
};

/// Naive datetime formats accepted for entry dates.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// The sentinel instant meaning "no publish date was declared".
pub fn unset_date() -> DateTime<FixedOffset> {
    Utc.with_ymd_and_hms(2001, 2, 3, 0, 0, 0)
        .single()
        .and_then(|dt| dt.with_nanosecond(456_789_000))
        .expect("sentinel instant is always constructible")
        .fixed_offset()
}

/// Check whether a publish date is the unset sentinel.
pub fn is_unset(dt: &DateTime<FixedOffset>) -> bool {
    *dt == unset_date()
}

/// Parse an entry date string.
///
/// Accepted shapes, tried in order:
/// 1. RFC3339 (`2024-06-15T14:30:00+02:00`, `...Z`)
/// 2. Naive datetime (`2024-06-15 14:30[:45]`, `T` separator also allowed)
/// 3. Bare date (`2024-06-15`)
///
/// Naive values are interpreted in the local timezone.
pub fn parse_date(text: &str) -> Result<DateTime<FixedOffset>> {
    let text = text.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Ok(dt);
    }

    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, fmt) {
            return attach_local_offset(naive);
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return attach_local_offset(date.and_time(NaiveTime::MIN));
    }

    bail!("unrecognized date format: {text:?}")
}

/// Interpret a naive datetime in the local timezone.
fn attach_local_offset(naive: NaiveDateTime) -> Result<DateTime<FixedOffset>> {
    match Local.from_local_datetime(&naive) {
        LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => Ok(dt.fixed_offset()),
        LocalResult::None => bail!("date does not exist in the local timezone: {naive}"),
    }
}

/// Expand a datetime into its calendar components.
///
/// Keys: year, month, day, hour, minute, second, microsecond, tzname.
/// Used both for the per-part `date_obj` export and as the variable table
/// for the entry's `date_tmpl` template.
pub fn components(dt: &DateTime<FixedOffset>) -> serde_json::Map<String, serde_json::Value> {
    let mut map = serde_json::Map::new();
    map.insert("year".into(), dt.year().into());
    map.insert("month".into(), dt.month().into());
    map.insert("day".into(), dt.day().into());
    map.insert("hour".into(), dt.hour().into());
    map.insert("minute".into(), dt.minute().into());
    map.insert("second".into(), dt.second().into());
    map.insert("microsecond".into(), dt.timestamp_subsec_micros().into());
    map.insert("tzname".into(), dt.offset().to_string().into());
    map
}

/// Format a datetime as an ISO-8601 timestamp.
///
/// UTC instants (and `to_utc` conversions) use the `Z` suffix; everything
/// else keeps its numeric offset.
pub fn to_timestamp(dt: &DateTime<FixedOffset>, to_utc: bool) -> String {
    if to_utc || dt.offset().local_minus_utc() == 0 {
        dt.with_timezone(&Utc)
            .format("%Y-%m-%dT%H:%M:%SZ")
            .to_string()
    } else {
        dt.format("%Y-%m-%dT%H:%M:%S%z").to_string()
    }
}

/// RFC2822 form, as required by RSS `pubDate`.
pub fn to_rfc2822(dt: &DateTime<FixedOffset>) -> String {
    dt.to_rfc2822()
}
