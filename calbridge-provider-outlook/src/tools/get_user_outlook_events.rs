//! List a user's upcoming events.
//!
//! The window is tomorrow at civil midnight through 30 days later; today's
//! events are never included. Graph expands recurring series inside the
//! window, and its filtering and ordering are re-applied locally.

use anyhow::Result;
use calbridge_core::event::{MinimalEvent, to_minimal_event};
use calbridge_core::protocol::{
    PropertyType, ToolDefinition, ToolInvocation, ToolProperty, error_payload, pretty_payload,
};
use calbridge_core::time::TimeWindow;
use serde::Serialize;

use super::{ToolContext, USER_PRINCIPAL_NAME};
use crate::graph::GraphClient;

pub const NAME: &str = "get_user_outlook_events";

const MISSING_USER: &str = "userPrincipalName is required.";

pub fn definition() -> ToolDefinition {
    ToolDefinition {
        name: NAME.to_string(),
        description: "Fetch the specified user's Outlook events from tomorrow through the next 30 days."
            .to_string(),
        properties: vec![
            ToolProperty::required(USER_PRINCIPAL_NAME, PropertyType::String)
                .describe("UPN of the user whose events to fetch (e.g. user@example.com)"),
        ],
    }
}

#[derive(Debug, Serialize)]
struct UserRef<'a> {
    #[serde(rename = "userPrincipalName")]
    user_principal_name: &'a str,
}

#[derive(Debug, Serialize)]
struct EventsOutput<'a> {
    user: UserRef<'a>,
    value: Vec<MinimalEvent>,
}

pub async fn handle(payload: &str, ctx: &ToolContext) -> String {
    match run(payload, ctx).await {
        Ok(output) => output,
        Err(e) => {
            tracing::error!(error = ?e, "Error retrieving events");
            error_payload(&format!("{:#}", e))
        }
    }
}

async fn run(payload: &str, ctx: &ToolContext) -> Result<String> {
    let invocation = ToolInvocation::parse(payload)?;

    let Some(user) = invocation.str_arg(USER_PRINCIPAL_NAME) else {
        return Ok(error_payload(MISSING_USER));
    };

    let window = TimeWindow::starting_tomorrow(&ctx.clock.now());

    let client = GraphClient::connect(&ctx.config).await?;
    let events = client.calendar_view(user, &window).await?;

    let value = select_upcoming(events.iter().map(to_minimal_event), &window);
    tracing::info!(user, count = value.len(), "Retrieved events");

    let output = EventsOutput {
        user: UserRef {
            user_principal_name: user,
        },
        value,
    };

    Ok(pretty_payload(&output)?)
}

/// Keep events starting inside the window, sorted by start.
///
/// Events without a parseable start cannot be placed in the window and are
/// dropped; the sort still orders unparseable starts last.
fn select_upcoming(
    events: impl IntoIterator<Item = MinimalEvent>,
    window: &TimeWindow,
) -> Vec<MinimalEvent> {
    let mut upcoming: Vec<_> = events
        .into_iter()
        .map(|event| (event.start_instant(), event))
        .filter(|(start, _)| start.is_some_and(|s| window.starts_on_or_after(&s)))
        .collect();

    upcoming.sort_by_key(|(start, _)| (start.is_none(), *start));

    upcoming.into_iter().map(|(_, event)| event).collect()
}
