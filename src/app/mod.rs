pub mod locator;
pub mod tool_call;

pub use locator::{LocatorService, SearchRequest};
pub use tool_call::{handle_tool_call, ToolCallRequest, ToolCallResponse};
