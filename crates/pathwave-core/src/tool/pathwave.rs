//! Pathwave Tool Adapter
//!
//! Exposes a remote Pathwave tool through the [`Tool`] trait.

use async_trait::async_trait;
use serde_json::{json, Value as JsonValue};
use std::sync::Arc;

use crate::client::PathwaveClient;
use crate::tool::{Tool, ToolResult};
use crate::types::PathwaveResponse;
use crate::Result;

/// Adapter to make a remote Pathwave tool usable as a local [`Tool`]
pub struct PathwaveTool {
    client: Arc<PathwaveClient>,
    name: String,
    description: String,
    input_schema: JsonValue,
}

impl PathwaveTool {
    /// Create an adapter for the remote tool `name`
    ///
    /// The schema defaults to an unconstrained object; the remote
    /// service validates arguments.
    pub fn new(client: Arc<PathwaveClient>, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            client,
            description: format!("Pathwave tool `{}`", name),
            name,
            input_schema: json!({"type": "object"}),
        }
    }

    /// Set the description shown to callers
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the input schema advertised for this tool
    pub fn with_input_schema(mut self, schema: JsonValue) -> Self {
        self.input_schema = schema;
        self
    }

    /// Get the underlying Pathwave client
    pub fn client(&self) -> &PathwaveClient {
        &self.client
    }
}

#[async_trait]
impl Tool for PathwaveTool {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn input_schema(&self) -> JsonValue {
        self.input_schema.clone()
    }

    async fn execute(&self, input: JsonValue) -> Result<ToolResult> {
        let args = match input {
            JsonValue::Object(args) => args,
            other => {
                return Ok(ToolResult::error(format!(
                    "Tool input must be a JSON object, got: {}",
                    other
                )));
            }
        };

        match self.client.invoke_tool(&self.name, &args).await {
            PathwaveResponse::Success(data) => {
                Ok(ToolResult::success(serde_json::to_string(&data)?))
            }
            PathwaveResponse::Failure(error) => Ok(ToolResult::error(error)),
        }
    }
}
