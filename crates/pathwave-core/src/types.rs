//! Pathwave request and response types

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

/// Argument mapping passed to a remote tool
pub type ToolArgs = Map<String, JsonValue>;

/// Normalized outcome of a tool invocation
///
/// Serialized as `{"ok": true, "data": ...}` or `{"ok": false, "error": "..."}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "WireResponse", try_from = "WireResponse")]
pub enum PathwaveResponse {
    /// The remote tool answered with a success status; carries the decoded body
    Success(JsonValue),
    /// HTTP error or transport failure; carries a human-readable message
    Failure(String),
}

impl PathwaveResponse {
    pub fn success(data: impl Into<JsonValue>) -> Self {
        Self::Success(data.into())
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self::Failure(error.into())
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Decoded payload, if the call succeeded
    pub fn data(&self) -> Option<&JsonValue> {
        match self {
            Self::Success(data) => Some(data),
            Self::Failure(_) => None,
        }
    }

    /// Error message, if the call failed
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Success(_) => None,
            Self::Failure(error) => Some(error),
        }
    }

    /// Convert into a standard `Result`
    pub fn into_result(self) -> std::result::Result<JsonValue, String> {
        match self {
            Self::Success(data) => Ok(data),
            Self::Failure(error) => Err(error),
        }
    }
}

/// On-the-wire shape of [`PathwaveResponse`]
#[derive(Debug, Serialize, Deserialize)]
struct WireResponse {
    ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    data: Option<JsonValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl From<PathwaveResponse> for WireResponse {
    fn from(response: PathwaveResponse) -> Self {
        match response {
            PathwaveResponse::Success(data) => Self {
                ok: true,
                data: Some(data),
                error: None,
            },
            PathwaveResponse::Failure(error) => Self {
                ok: false,
                data: None,
                error: Some(error),
            },
        }
    }
}

impl TryFrom<WireResponse> for PathwaveResponse {
    type Error = String;

    fn try_from(wire: WireResponse) -> std::result::Result<Self, Self::Error> {
        if wire.ok {
            Ok(Self::Success(wire.data.unwrap_or(JsonValue::Null)))
        } else {
            wire.error
                .map(Self::Failure)
                .ok_or_else(|| "response with ok=false is missing `error`".to_string())
        }
    }
}

/// Request body sent to the invoke endpoint
#[derive(Debug, Serialize)]
pub(crate) struct InvokeRequest<'a> {
    pub args: &'a ToolArgs,
}

/// A tool call: tool name plus its argument mapping
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    pub name: String,
    #[serde(default)]
    pub args: ToolArgs,
}

impl ToolCall {
    pub fn new(name: impl Into<String>, args: ToolArgs) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }
}

/// Agent and session on whose behalf a call is made
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentContext {
    pub agent_id: String,
    pub session_id: String,
}

impl AgentContext {
    pub fn new(agent_id: impl Into<String>, session_id: impl Into<String>) -> Self {
        Self {
            agent_id: agent_id.into(),
            session_id: session_id.into(),
        }
    }
}
