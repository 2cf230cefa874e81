//! Tolerant field lookup for service objects.
//!
//! Upstream payloads are not consistent about snake_case vs camelCase, so
//! every logical field is read through an ordered list of candidate names.

use serde_json::Value;

pub const SUBJECT: &[&str] = &["subject"];
pub const START: &[&str] = &["start"];
pub const END: &[&str] = &["end"];
pub const IS_ALL_DAY: &[&str] = &["is_all_day", "isAllDay"];
pub const DATE_TIME: &[&str] = &["date_time", "dateTime"];
pub const ID: &[&str] = &["id"];
pub const WEB_LINK: &[&str] = &["web_link", "webLink"];
pub const ATTENDEES: &[&str] = &["attendees"];
pub const EMAIL_ADDRESS: &[&str] = &["email_address", "emailAddress"];
pub const ADDRESS: &[&str] = &["address"];
pub const LOCATION: &[&str] = &["location"];
pub const DISPLAY_NAME: &[&str] = &["display_name", "displayName"];
pub const IS_ONLINE_MEETING: &[&str] = &["is_online_meeting", "isOnlineMeeting"];

/// Return the first candidate field that is present and not null.
///
/// A null candidate counts as missing, so `{"is_all_day": null, "isAllDay": true}`
/// reads as `true`: a later name can still supply the value.
pub fn lookup<'a>(value: Option<&'a Value>, candidates: &[&str]) -> Option<&'a Value> {
    let object = value?.as_object()?;

    candidates
        .iter()
        .filter_map(|name| object.get(*name))
        .find(|v| !v.is_null())
}

pub fn lookup_str(value: Option<&Value>, candidates: &[&str]) -> Option<String> {
    lookup(value, candidates)
        .and_then(Value::as_str)
        .map(str::to_string)
}

pub fn lookup_bool(value: Option<&Value>, candidates: &[&str]) -> Option<bool> {
    lookup(value, candidates).and_then(Value::as_bool)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_lookup_first_candidate_wins() {
        let value = json!({"is_all_day": false, "isAllDay": true});
        assert_eq!(lookup_bool(Some(&value), IS_ALL_DAY), Some(false));
    }

    #[test]
    fn test_lookup_falls_through_null_and_missing() {
        let value = json!({"date_time": null, "dateTime": "2025-10-07T09:00:00"});
        assert_eq!(
            lookup_str(Some(&value), DATE_TIME).as_deref(),
            Some("2025-10-07T09:00:00")
        );
        assert_eq!(lookup_str(Some(&value), SUBJECT), None);
    }

    #[test]
    fn test_null_candidate_yields_to_later_name() {
        let value = json!({"is_all_day": null, "isAllDay": true});
        assert_eq!(lookup_bool(Some(&value), IS_ALL_DAY), Some(true));

        let all_null = json!({"is_all_day": null, "isAllDay": null});
        assert_eq!(lookup(Some(&all_null), IS_ALL_DAY), None);
    }

    #[test]
    fn test_lookup_non_object_is_none() {
        assert_eq!(lookup(Some(&json!("text")), SUBJECT), None);
        assert_eq!(lookup(None, SUBJECT), None);
    }
}
