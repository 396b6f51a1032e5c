//! Tool system
//!
//! Lets remote Pathwave tools be registered and dispatched next to
//! local tools through a common trait.

pub mod manager;
pub mod pathwave;
pub mod traits;

pub use manager::ToolManager;
pub use pathwave::PathwaveTool;
pub use traits::{Tool, ToolResult};
