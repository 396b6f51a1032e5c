//! pathwave-core: Pathwave API client library
//!
//! Invokes remote Pathwave tools over HTTP and normalizes every outcome
//! into a single success/failure shape.

pub mod client;
pub mod config;
pub mod error;
pub mod paypal;
pub mod tool;
pub mod types;

pub use client::PathwaveClient;
pub use config::PathwaveConfig;
pub use error::{Error, Result};
pub use paypal::PaypalTools;
pub use tool::{PathwaveTool, Tool, ToolManager, ToolResult};
pub use types::{AgentContext, PathwaveResponse, ToolArgs, ToolCall};
