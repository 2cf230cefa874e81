//! Tool protocol types.
//!
//! Defines the JSON envelope a tool host sends over stdin/stdout, the
//! invocation payload each tool handler receives, and the metadata a host
//! uses to discover tools.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{CalBridgeError, CalBridgeResult};

// ============================================================================
// Line envelope
// ============================================================================

/// Commands a tool host can send.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    ListTools,
    CallTool,
}

/// Request line sent from the host.
///
/// For `call_tool` the same line also carries the `arguments` object and is
/// handed verbatim to the tool as its invocation payload.
#[derive(Debug, Serialize, Deserialize)]
pub struct Request {
    pub command: Command,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Response line sent back to the host.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Response<T> {
    Success { data: T },
    Error { error: String },
}

impl<T: Serialize> Response<T> {
    pub fn success(data: T) -> CalBridgeResult<String> {
        Ok(serde_json::to_string(&Response::Success { data })?)
    }
}

impl Response<()> {
    pub fn error(msg: &str) -> String {
        serde_json::json!({ "status": "error", "error": msg }).to_string()
    }
}

// ============================================================================
// Tool invocation
// ============================================================================

/// Payload handed to a tool: any JSON object with an `arguments` mapping.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolInvocation {
    pub arguments: Map<String, Value>,
}

impl ToolInvocation {
    pub fn parse(payload: &str) -> CalBridgeResult<Self> {
        serde_json::from_str(payload).map_err(|e| CalBridgeError::InvalidInvocation(e.to_string()))
    }

    pub fn arg(&self, name: &str) -> Option<&Value> {
        self.arguments.get(name)
    }

    /// A string argument, treating empty text as absent.
    pub fn str_arg(&self, name: &str) -> Option<&str> {
        self.arg(name)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }
}

/// Tool output for a failed call: `{"error": "<message>"}`.
pub fn error_payload(message: &str) -> String {
    serde_json::json!({ "error": message }).to_string()
}

/// Tool output for a successful call: pretty JSON, non-ASCII kept as-is.
pub fn pretty_payload<T: Serialize>(value: &T) -> CalBridgeResult<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

// ============================================================================
// Tool metadata
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    String,
    Boolean,
}

/// One declared tool parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolProperty {
    pub property_name: String,
    pub property_type: PropertyType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub required: bool,
}

impl ToolProperty {
    pub fn required(name: &str, property_type: PropertyType) -> Self {
        ToolProperty {
            property_name: name.to_string(),
            property_type,
            description: None,
            required: true,
        }
    }

    pub fn optional(name: &str, property_type: PropertyType) -> Self {
        ToolProperty {
            required: false,
            ..Self::required(name, property_type)
        }
    }

    pub fn describe(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }
}

/// What a host needs to list a tool: name, description, ordered parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub properties: Vec<ToolProperty>,
}
