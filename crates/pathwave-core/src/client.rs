//! Pathwave API HTTP client
//!
//! Invokes remote tools via `POST {base}/users/{sid}/tools/{tool}/invoke`
//! and normalizes every outcome into a [`PathwaveResponse`].

use reqwest::Client;
use tracing::{debug, info, warn};
use url::Url;

use crate::config::PathwaveConfig;
use crate::error::{Error, Result};
use crate::types::{InvokeRequest, PathwaveResponse, ToolArgs, ToolCall};

/// Pathwave API client
///
/// Holds no per-call state, so clones can be used from concurrent tasks.
#[derive(Debug, Clone)]
pub struct PathwaveClient {
    client: Client,
    base_url: Url,
    user_sid: String,
}

impl PathwaveClient {
    /// Create a new client from explicit configuration
    ///
    /// Fails if the identity is missing or blank, or if the base URL
    /// cannot carry a path.
    pub fn new(config: PathwaveConfig) -> Result<Self> {
        config.validate()?;

        let base_url = Url::parse(&config.base_url).map_err(|e| {
            Error::Config(format!("Invalid base URL '{}': {}", config.base_url, e))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(Error::Config(format!(
                "Base URL '{}' cannot carry a path",
                config.base_url
            )));
        }

        let client = Client::builder().build().map_err(Error::Http)?;

        Ok(Self {
            client,
            base_url,
            user_sid: config.user_sid,
        })
    }

    /// Create a client from `PATHWAVE_USER_SID` / `PATHWAVE_BASE_URL`
    pub fn from_env() -> Result<Self> {
        Self::new(PathwaveConfig::from_env()?)
    }

    /// Get the caller identity
    pub fn user_sid(&self) -> &str {
        &self.user_sid
    }

    /// Get the base URL
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build the invoke endpoint for a tool
    ///
    /// Identity and tool name are pushed as single path segments, so `/`,
    /// `?`, `#`, `%` and spaces are percent-encoded. Dots are kept, so
    /// `paypal.payout` is sent as is.
    pub fn endpoint(&self, tool: &str) -> Url {
        let mut url = self.base_url.clone();
        // cannot_be_a_base() was rejected in new()
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["users", self.user_sid.as_str(), "tools", tool, "invoke"]);
        }
        url
    }

    /// Invoke a tool with the given arguments
    ///
    /// Never fails: HTTP errors become `"HTTP error <status>: <body>"` and
    /// transport or decoding errors carry the underlying description. The
    /// request URL is stripped from that description since it contains the
    /// identity.
    pub async fn invoke_tool(&self, tool: &str, args: &ToolArgs) -> PathwaveResponse {
        let url = self.endpoint(tool);

        debug!(tool = %tool, url = %url, "Invoking Pathwave tool");

        match self.send(url, args).await {
            Ok(response) => response,
            Err(e) => {
                let message = describe(&e.without_url());
                warn!(tool = %tool, error = %message, "Pathwave request failed");
                PathwaveResponse::Failure(message)
            }
        }
    }

    /// Invoke a tool described by a [`ToolCall`]
    pub async fn invoke(&self, call: &ToolCall) -> PathwaveResponse {
        self.invoke_tool(&call.name, &call.args).await
    }

    async fn send(
        &self,
        url: Url,
        args: &ToolArgs,
    ) -> std::result::Result<PathwaveResponse, reqwest::Error> {
        let response = self
            .client
            .post(url)
            .header("content-type", "application/json")
            .json(&InvokeRequest { args })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await?;
            warn!("Pathwave API error: {} - {}", status, body);
            return Ok(PathwaveResponse::Failure(format!(
                "HTTP error {}: {}",
                status.as_u16(),
                body
            )));
        }

        let data: serde_json::Value = response.json().await?;
        info!(status = %status, "Pathwave tool invoked");

        Ok(PathwaveResponse::Success(data))
    }
}

/// Render an error with its source chain, e.g.
/// `error sending request: client error (Connect): connection refused`
fn describe(error: &(dyn std::error::Error + 'static)) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !message.contains(&cause_text) {
            message.push_str(": ");
            message.push_str(&cause_text);
        }
        source = cause.source();
    }
    message
}
