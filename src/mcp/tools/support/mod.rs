// Support module for shared tool logic
mod deserialize_non_empty_string;
pub mod format_work_items;
pub mod fuzzy_resolve;
mod html_to_text;
pub mod resolve_scope;
pub mod tool_context;
pub mod tool_error;
pub mod wiql_builder;

pub use deserialize_non_empty_string::{
    deserialize_non_empty_string, deserialize_optional_non_empty_string,
};
pub use fuzzy_resolve::fuzzy_resolve;
pub use html_to_text::html_to_text;
pub use tool_context::ToolContext;
pub use tool_error::{ToolError, into_tool_result};
