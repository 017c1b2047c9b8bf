//! Agent-facing search tools.
//!
//! One tool per query domain, each holding immutable bound defaults and
//! delegating to the shared client. The registry groups them for bulk
//! registration with an agent session.

pub mod builtin;

mod registry;
mod schema;
mod tool;

pub use registry::ToolRegistry;
pub use schema::validate_tool_schema;
pub use tool::{Tool, ToolCategory, ToolOutput, ToolSchema, optional_str_array, require_str};
