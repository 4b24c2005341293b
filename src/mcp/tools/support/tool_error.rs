use crate::azure::client::AzureError;
use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ToolError {
    #[error(
        "Azure DevOps organization is not configured. Set AZURE_DEVOPS_ORG or pass --organization."
    )]
    Configuration,
    #[error("{kind} '{query}' not found. Available {kind}s: {available}")]
    Resolution {
        kind: &'static str,
        query: String,
        available: String,
    },
    #[error("A project is required to resolve team '{0}'")]
    TeamWithoutProject(String),
    #[error(transparent)]
    Upstream(#[from] AzureError),
}

impl ToolError {
    pub fn resolution<'a>(
        kind: &'static str,
        query: &str,
        available: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        let available: Vec<&str> = available.into_iter().collect();
        ToolError::Resolution {
            kind,
            query: query.to_string(),
            available: if available.is_empty() {
                "none".to_string()
            } else {
                available.join(", ")
            },
        }
    }
}

/// Convert the outcome of a tool pipeline into the MCP result.
///
/// Failures become an error-flagged text result instead of a protocol error, so
/// the caller always receives a readable message.
pub fn into_tool_result(
    tool_name: &str,
    outcome: Result<String, ToolError>,
) -> Result<CallToolResult, McpError> {
    match outcome {
        Ok(text) => Ok(CallToolResult::success(vec![Content::text(text)])),
        Err(e) => {
            log::error!("Tool {} failed: {}", tool_name, e);
            Ok(CallToolResult::error(vec![Content::text(format!(
                "Error: {}",
                e
            ))]))
        }
    }
}
