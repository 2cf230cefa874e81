//! Civil-time helpers.
//!
//! Every date-time the tools produce or compare lives in a fixed UTC+9 offset.
//! The calendar service is asked to answer in that zone, so zone-less text
//! coming back from it is read as civil time.

use chrono::{
    DateTime, Duration, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Offset, SecondsFormat,
    TimeZone, Utc,
};
use serde_json::Value;

use crate::constants::{CIVIL_OFFSET_SECS, QUERY_WINDOW_DAYS};
use crate::fields;

/// The fixed civil offset (UTC+9).
pub fn civil_offset() -> FixedOffset {
    FixedOffset::east_opt(CIVIL_OFFSET_SECS).unwrap_or_else(|| Utc.fix())
}

/// Extract the date-time text from a service date-time-with-zone object,
/// ignoring its zone label.
pub fn civil_offset_string(date_time_zone: Option<&Value>) -> Option<String> {
    fields::lookup_str(date_time_zone, fields::DATE_TIME)
}

/// Date-times carrying a numeric offset that RFC 3339 rejects, e.g. `+0900`.
const ZONED_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%d %H:%M:%S%.f%z"];

/// Zone-less date-times. `%.f` also matches no fraction and Graph's seven digits.
const LOCAL_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parse ISO-8601 text, attaching the civil offset when none is given.
///
/// Accepts RFC 3339, `T` or space separators, offsets with or without a
/// colon, and bare dates (civil midnight). Returns `None` for empty,
/// unparseable or out-of-range input.
pub fn parse_as_civil_time(text: &str) -> Option<DateTime<FixedOffset>> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt);
    }

    if let Some(dt) = ZONED_FORMATS
        .iter()
        .find_map(|format| DateTime::parse_from_str(text, format).ok())
    {
        return Some(dt);
    }

    let naive = LOCAL_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .map(|date| date.and_time(NaiveTime::MIN))
        })?;

    attach_civil_offset(naive)
}

/// `None` when shifting to UTC leaves chrono's representable range.
fn attach_civil_offset(naive: NaiveDateTime) -> Option<DateTime<FixedOffset>> {
    let utc = naive.checked_sub_signed(Duration::seconds(i64::from(CIVIL_OFFSET_SECS)))?;
    Some(DateTime::from_naive_utc_and_offset(utc, civil_offset()))
}

/// Drop a trailing `Z` or numeric offset, keeping the civil date-time part.
///
/// `2025-10-07T09:00:00+09:00` becomes `2025-10-07T09:00:00`.
pub fn strip_zone_suffix(text: &str) -> &str {
    let text = text.trim();

    match text.find(['T', 't', ' ']) {
        Some(sep) => {
            let time_start = sep + 1;
            match text[time_start..].find(['+', '-', 'Z', 'z']) {
                Some(pos) => &text[..time_start + pos],
                None => text,
            }
        }
        // Date-only text: hyphens belong to the date
        None => match text.find(['+', 'Z', 'z']) {
            Some(pos) => &text[..pos],
            None => text,
        },
    }
}

/// The forward-looking window a calendar query covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
}

impl TimeWindow {
    /// Tomorrow at civil midnight through `QUERY_WINDOW_DAYS` days later.
    /// Same-day events are never part of the window.
    pub fn starting_tomorrow<Tz: TimeZone>(now: &DateTime<Tz>) -> Self {
        let today = now.with_timezone(&civil_offset()).date_naive();
        let tomorrow = today + Duration::days(1);
        let midnight = tomorrow.and_time(NaiveTime::MIN);
        let start = DateTime::from_naive_utc_and_offset(
            midnight - Duration::seconds(i64::from(CIVIL_OFFSET_SECS)),
            civil_offset(),
        );

        TimeWindow {
            start,
            end: start + Duration::days(QUERY_WINDOW_DAYS),
        }
    }

    /// `start` as `2025-10-07T00:00:00+09:00`
    pub fn start_param(&self) -> String {
        self.start.to_rfc3339_opts(SecondsFormat::Secs, false)
    }

    pub fn end_param(&self) -> String {
        self.end.to_rfc3339_opts(SecondsFormat::Secs, false)
    }

    pub fn starts_on_or_after(&self, instant: &DateTime<FixedOffset>) -> bool {
        *instant >= self.start
    }
}
