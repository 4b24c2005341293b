use crate::mcp::tools::support::ToolError;

/// Per-call inputs that do not come from the tool arguments.
#[derive(Debug, Clone, Default)]
pub struct ToolContext {
    pub organization: Option<String>,
    /// Bearer token of the inbound request, possibly empty
    pub token: String,
}

impl ToolContext {
    pub fn new(organization: Option<&str>, token: impl Into<String>) -> Self {
        Self {
            organization: organization
                .map(str::trim)
                .filter(|org| !org.is_empty())
                .map(str::to_string),
            token: token.into(),
        }
    }

    /// Configured organization; checked before any upstream call.
    pub fn organization(&self) -> Result<&str, ToolError> {
        self.organization.as_deref().ok_or(ToolError::Configuration)
    }
}
