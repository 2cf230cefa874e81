pub mod create_simple_event;
pub mod get_user_outlook_events;

use calbridge_core::protocol::ToolDefinition;
use chrono::{DateTime, Utc};

use crate::config::OutlookConfig;

/// Argument name shared by both tools.
pub const USER_PRINCIPAL_NAME: &str = "userPrincipalName";

/// Source of "now" for the query window.
#[derive(Debug, Clone, Copy)]
pub enum Clock {
    System,
    Fixed(DateTime<Utc>),
}

impl Clock {
    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Clock::System => Utc::now(),
            Clock::Fixed(now) => *now,
        }
    }
}

/// Everything a tool call needs besides its payload.
#[derive(Debug, Clone)]
pub struct ToolContext {
    pub config: OutlookConfig,
    pub clock: Clock,
}

impl ToolContext {
    pub fn new(config: OutlookConfig) -> Self {
        ToolContext {
            config,
            clock: Clock::System,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    GetUserOutlookEvents,
    CreateSimpleEvent,
}

impl Tool {
    pub const ALL: [Tool; 2] = [Tool::GetUserOutlookEvents, Tool::CreateSimpleEvent];

    pub fn name(self) -> &'static str {
        match self {
            Tool::GetUserOutlookEvents => get_user_outlook_events::NAME,
            Tool::CreateSimpleEvent => create_simple_event::NAME,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tool| tool.name() == name)
    }

    pub fn definition(self) -> ToolDefinition {
        match self {
            Tool::GetUserOutlookEvents => get_user_outlook_events::definition(),
            Tool::CreateSimpleEvent => create_simple_event::definition(),
        }
    }

    /// Run the tool. Always returns JSON text; failures are reported inside it.
    pub async fn call(self, payload: &str, ctx: &ToolContext) -> String {
        match self {
            Tool::GetUserOutlookEvents => get_user_outlook_events::handle(payload, ctx).await,
            Tool::CreateSimpleEvent => create_simple_event::handle(payload, ctx).await,
        }
    }
}

pub fn definitions() -> Vec<ToolDefinition> {
    Tool::ALL.into_iter().map(Tool::definition).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_names_round_trip() {
        for tool in Tool::ALL {
            assert_eq!(Tool::from_name(tool.name()), Some(tool));
            assert_eq!(tool.definition().name, tool.name());
        }
        assert_eq!(Tool::from_name("delete_everything"), None);
    }
}
