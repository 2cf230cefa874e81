//! Event shapes exchanged with the calendar service and the calling agent.
//!
//! Service responses are read as loose JSON through [`crate::fields`], since
//! only a handful of fields matter and any of them may be missing. Outbound
//! payloads are strongly typed and serialize to the service's camelCase form.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::attendees::AttendeeSet;
use crate::constants::CIVIL_TIME_ZONE_NAME;
use crate::fields;
use crate::time::{civil_offset_string, parse_as_civil_time, strip_zone_suffix};

// ============================================================================
// Output shapes
// ============================================================================

/// The four-field projection of an event used for list output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MinimalEvent {
    pub subject: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub is_all_day: Option<bool>,
}

impl MinimalEvent {
    /// Parsed start, or `None` if absent or unparseable.
    pub fn start_instant(&self) -> Option<DateTime<FixedOffset>> {
        self.start.as_deref().and_then(parse_as_civil_time)
    }
}

/// Project a full service event down to a [`MinimalEvent`].
pub fn to_minimal_event(event: &Value) -> MinimalEvent {
    let event = Some(event);

    MinimalEvent {
        subject: fields::lookup_str(event, fields::SUBJECT),
        start: civil_offset_string(fields::lookup(event, fields::START)),
        end: civil_offset_string(fields::lookup(event, fields::END)),
        is_all_day: fields::lookup_bool(event, fields::IS_ALL_DAY),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedEvent {
    pub id: Option<String>,
    pub subject: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub web_link: Option<String>,
    pub attendees: Vec<Option<String>>,
    pub location: Option<String>,
    pub is_online_meeting: Option<bool>,
}

/// Output of the create tool: `{"created": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreatedEventSummary {
    pub created: CreatedEvent,
}

/// Read the service's created-event representation into the output shape.
///
/// Start and end pass through exactly as the service returned them.
pub fn to_created_event_summary(created: &Value) -> CreatedEventSummary {
    let created = Some(created);

    let attendees = fields::lookup(created, fields::ATTENDEES)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .map(|attendee| {
                    let email = fields::lookup(Some(attendee), fields::EMAIL_ADDRESS);
                    fields::lookup_str(email, fields::ADDRESS)
                })
                .collect()
        })
        .unwrap_or_default();

    let location = fields::lookup(created, fields::LOCATION);

    CreatedEventSummary {
        created: CreatedEvent {
            id: fields::lookup_str(created, fields::ID),
            subject: fields::lookup_str(created, fields::SUBJECT),
            start: civil_offset_string(fields::lookup(created, fields::START)),
            end: civil_offset_string(fields::lookup(created, fields::END)),
            web_link: fields::lookup_str(created, fields::WEB_LINK),
            attendees,
            location: fields::lookup_str(location, fields::DISPLAY_NAME),
            is_online_meeting: fields::lookup_bool(created, fields::IS_ONLINE_MEETING),
        },
    }
}

// ============================================================================
// Create payload
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateTimeTimeZone {
    pub date_time: String,
    pub time_zone: String,
}

impl DateTimeTimeZone {
    /// Civil-local date-time paired with the civil zone identifier.
    /// Any offset on `text` is dropped; the zone is carried by `time_zone`.
    pub fn civil(text: &str) -> Self {
        DateTimeTimeZone {
            date_time: strip_zone_suffix(text).to_string(),
            time_zone: CIVIL_TIME_ZONE_NAME.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailAddress {
    pub address: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttendeeType {
    Required,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attendee {
    pub email_address: EmailAddress,
    #[serde(rename = "type")]
    pub kind: AttendeeType,
}

impl Attendee {
    pub fn required(address: &str) -> Self {
        Attendee {
            email_address: EmailAddress {
                address: address.to_string(),
            },
            kind: AttendeeType::Required,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub display_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyType {
    Text,
    Html,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemBody {
    pub content_type: BodyType,
    pub content: String,
}

impl ItemBody {
    /// Any `<` marks the content as HTML.
    pub fn inferred(content: &str) -> Self {
        let content_type = if content.contains('<') {
            BodyType::Html
        } else {
            BodyType::Text
        };

        ItemBody {
            content_type,
            content: content.to_string(),
        }
    }
}

/// Body of the create-event call.
///
/// No online meeting provider is sent; the service picks its default when
/// `is_online_meeting` is set.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventCreateRequest {
    pub subject: String,
    pub start: DateTimeTimeZone,
    pub end: DateTimeTimeZone,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attendees: Option<Vec<Attendee>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<ItemBody>,
    pub is_online_meeting: bool,
}

impl EventCreateRequest {
    pub fn new(subject: &str, start: &str, end: &str) -> Self {
        EventCreateRequest {
            subject: subject.to_string(),
            start: DateTimeTimeZone::civil(start),
            end: DateTimeTimeZone::civil(end),
            attendees: None,
            location: None,
            body: None,
            is_online_meeting: false,
        }
    }

    /// An empty set leaves the attendee collection out of the payload.
    pub fn with_attendees(mut self, attendees: &AttendeeSet) -> Self {
        self.attendees = if attendees.is_empty() {
            None
        } else {
            Some(attendees.iter().map(Attendee::required).collect())
        };
        self
    }

    pub fn with_location(mut self, location: Option<&str>) -> Self {
        self.location = location
            .filter(|l| !l.is_empty())
            .map(|l| Location {
                display_name: l.to_string(),
            });
        self
    }

    pub fn with_body(mut self, body: Option<&str>) -> Self {
        self.body = body.filter(|b| !b.is_empty()).map(ItemBody::inferred);
        self
    }

    pub fn with_online_meeting(mut self, is_online_meeting: bool) -> Self {
        self.is_online_meeting = is_online_meeting;
        self
    }
}
