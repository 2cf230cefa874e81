//! Create a simple event in a user's calendar.
//!
//! Every attendee is a required participant. Start and end are sent as civil
//! time with an explicit zone identifier; any offset the caller included is
//! dropped.

use anyhow::Result;
use calbridge_core::args::to_boolean_flag;
use calbridge_core::attendees::parse_attendees;
use calbridge_core::event::{EventCreateRequest, to_created_event_summary};
use calbridge_core::protocol::{
    PropertyType, ToolDefinition, ToolInvocation, ToolProperty, error_payload, pretty_payload,
};

use super::{ToolContext, USER_PRINCIPAL_NAME};
use crate::graph::GraphClient;

pub const NAME: &str = "create_simple_event";

const REQUIRED_FIELDS_MISSING: &str = "required fields missing";

pub fn definition() -> ToolDefinition {
    ToolDefinition {
        name: NAME.to_string(),
        description: "Create a simple event in the specified user's Outlook calendar \
            (all attendees required, optional online meeting, location and body)."
            .to_string(),
        properties: vec![
            ToolProperty::required(USER_PRINCIPAL_NAME, PropertyType::String),
            ToolProperty::required("subject", PropertyType::String),
            ToolProperty::required("start", PropertyType::String),
            ToolProperty::required("end", PropertyType::String),
            // A string rather than an array: hosts pass comma/semicolon lists
            ToolProperty::optional("attendees", PropertyType::String),
            ToolProperty::optional("isOnlineMeeting", PropertyType::Boolean),
            ToolProperty::optional("location", PropertyType::String),
            ToolProperty::optional("body", PropertyType::String),
        ],
    }
}

pub async fn handle(payload: &str, ctx: &ToolContext) -> String {
    match run(payload, ctx).await {
        Ok(output) => output,
        Err(e) => {
            tracing::error!(error = ?e, "Error creating simple event");
            error_payload(&format!("{:#}", e))
        }
    }
}

async fn run(payload: &str, ctx: &ToolContext) -> Result<String> {
    let invocation = ToolInvocation::parse(payload)?;

    let (Some(user), Some(subject), Some(start), Some(end)) = (
        invocation.str_arg(USER_PRINCIPAL_NAME),
        invocation.str_arg("subject"),
        invocation.str_arg("start"),
        invocation.str_arg("end"),
    ) else {
        return Ok(error_payload(REQUIRED_FIELDS_MISSING));
    };

    let attendees = parse_attendees(invocation.arg("attendees"));

    let event = EventCreateRequest::new(subject, start, end)
        .with_attendees(&attendees)
        .with_location(invocation.str_arg("location"))
        .with_body(invocation.str_arg("body"))
        .with_online_meeting(to_boolean_flag(invocation.arg("isOnlineMeeting"), false));

    let client = GraphClient::connect(&ctx.config).await?;
    let created = client.create_event(user, &event).await?;

    tracing::info!(user, attendees = attendees.len(), "Created event");

    Ok(pretty_payload(&to_created_event_summary(&created))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutlookConfig;
    use crate::tools::Clock;
    use serde_json::{Value, json};
    use wiremock::matchers::{any, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_ctx(server: &MockServer) -> ToolContext {
        ToolContext {
            config: OutlookConfig {
                graph_endpoint: format!("{}/v1.0", server.uri()),
                access_token: Some("test-token".to_string()),
                ..OutlookConfig::default()
            },
            clock: Clock::System,
        }
    }

    /// Graph's answer to a create with `Prefer: return=representation`.
    async fn mount_create(server: &MockServer) {
        Mock::given(method("POST"))
            .and(path("/v1.0/users/taro@example.com/events"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": "AAMkADk",
                "subject": "Design review",
                "start": {"dateTime": "2025-10-07T09:00:00.0000000", "timeZone": "Tokyo Standard Time"},
                "end": {"dateTime": "2025-10-07T10:00:00.0000000", "timeZone": "Tokyo Standard Time"},
                "webLink": "https://outlook.office365.com/owa/?itemid=AAMkADk",
                "attendees": [
                    {"type": "required", "emailAddress": {"name": "Hanako", "address": "hanako@example.com"}}
                ],
                "location": {"displayName": "Room 4F"},
                "isOnlineMeeting": true
            })))
            .expect(1)
            .mount(server)
            .await;
    }

    async fn posted_body(server: &MockServer) -> Value {
        let requests = server.received_requests().await.unwrap();
        serde_json::from_slice(&requests[0].body).unwrap()
    }

    #[tokio::test]
    async fn test_create_strips_offset_and_summarizes_response() {
        let server = MockServer::start().await;
        mount_create(&server).await;

        let payload = json!({"arguments": {
            "userPrincipalName": "taro@example.com",
            "subject": "Design review",
            "start": "2025-10-07T09:00:00+09:00",
            "end": "2025-10-07T10:00:00+09:00",
            "attendees": "hanako@example.com; hanako@example.com, invalid",
            "isOnlineMeeting": "yes",
            "location": "Room 4F",
            "body": "<p>Agenda</p>"
        }});

        let output = handle(&payload.to_string(), &test_ctx(&server)).await;
        let output: Value = serde_json::from_str(&output).unwrap();

        assert_eq!(
            output,
            json!({
                "created": {
                    "id": "AAMkADk",
                    "subject": "Design review",
                    "start": "2025-10-07T09:00:00.0000000",
                    "end": "2025-10-07T10:00:00.0000000",
                    "webLink": "https://outlook.office365.com/owa/?itemid=AAMkADk",
                    "attendees": ["hanako@example.com"],
                    "location": "Room 4F",
                    "isOnlineMeeting": true
                }
            })
        );

        let sent = posted_body(&server).await;
        assert_eq!(sent["start"]["dateTime"], "2025-10-07T09:00:00");
        assert_eq!(sent["start"]["timeZone"], "Tokyo Standard Time");
        assert_eq!(sent["end"]["dateTime"], "2025-10-07T10:00:00");
        assert_eq!(
            sent["attendees"],
            json!([{"emailAddress": {"address": "hanako@example.com"}, "type": "required"}])
        );
        assert_eq!(sent["body"], json!({"contentType": "html", "content": "<p>Agenda</p>"}));
        assert_eq!(sent["isOnlineMeeting"], json!(true));
        assert!(sent.get("onlineMeetingProvider").is_none());
    }

    #[tokio::test]
    async fn test_minimal_create_omits_optional_fields() {
        let server = MockServer::start().await;
        mount_create(&server).await;

        let payload = json!({"arguments": {
            "userPrincipalName": "taro@example.com",
            "subject": "Design review",
            "start": "2025-10-07T09:00:00",
            "end": "2025-10-07T10:00:00",
            "attendees": "not-an-address",
            "body": "hi"
        }});

        handle(&payload.to_string(), &test_ctx(&server)).await;

        let sent = posted_body(&server).await;
        let object = sent.as_object().unwrap();
        assert!(!object.contains_key("attendees"));
        assert!(!object.contains_key("location"));
        assert_eq!(sent["body"]["contentType"], "text");
        assert_eq!(sent["isOnlineMeeting"], json!(false));
    }

    #[tokio::test]
    async fn test_attendee_list_argument_is_accepted() {
        let server = MockServer::start().await;
        mount_create(&server).await;

        let payload = json!({"arguments": {
            "userPrincipalName": "taro@example.com",
            "subject": "Design review",
            "start": "2025-10-07T09:00:00Z",
            "end": "2025-10-07T10:00:00Z",
            "attendees": ["a@example.com", "b@example.com", "a@example.com"],
            "isOnlineMeeting": false
        }});

        handle(&payload.to_string(), &test_ctx(&server)).await;

        let sent = posted_body(&server).await;
        let addresses: Vec<&str> = sent["attendees"]
            .as_array()
            .unwrap()
            .iter()
            .map(|a| a["emailAddress"]["address"].as_str().unwrap())
            .collect();
        assert_eq!(addresses, vec!["a@example.com", "b@example.com"]);
        assert_eq!(sent["start"]["dateTime"], "2025-10-07T09:00:00");
    }

    #[tokio::test]
    async fn test_missing_required_fields_make_no_call() {
        let server = MockServer::start().await;
        Mock::given(any())
            .respond_with(ResponseTemplate::new(201))
            .expect(0)
            .mount(&server)
            .await;

        let payload = json!({"arguments": {
            "userPrincipalName": "taro@example.com",
            "subject": "",
            "start": "2025-10-07T09:00:00",
            "end": "2025-10-07T10:00:00"
        }});

        let output = handle(&payload.to_string(), &test_ctx(&server)).await;
        let output: Value = serde_json::from_str(&output).unwrap();
        assert_eq!(output, json!({"error": "required fields missing"}));
    }

    #[tokio::test]
    async fn test_service_failure_becomes_error_payload() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_string("ErrorInvalidRequest"))
            .mount(&server)
            .await;

        let payload = json!({"arguments": {
            "userPrincipalName": "taro@example.com",
            "subject": "Design review",
            "start": "2025-10-07T09:00:00",
            "end": "2025-10-07T10:00:00"
        }});

        let output = handle(&payload.to_string(), &test_ctx(&server)).await;
        let output: Value = serde_json::from_str(&output).unwrap();
        assert!(output["error"].as_str().unwrap().contains("ErrorInvalidRequest"));
    }

    #[test]
    fn test_definition_declares_properties_in_order() {
        let names: Vec<String> = definition()
            .properties
            .into_iter()
            .map(|p| p.property_name)
            .collect();
        assert_eq!(
            names,
            vec![
                "userPrincipalName",
                "subject",
                "start",
                "end",
                "attendees",
                "isOnlineMeeting",
                "location",
                "body"
            ]
        );
    }
}
