use crate::azure::api::AzureDevOpsApi;
use crate::azure::models::Page;
use crate::azure::projects::{Project, ProjectListQuery};
use crate::mcp::tools::support::{
    ToolContext, ToolError, deserialize_optional_non_empty_string, into_tool_result,
};
use mcp_tools_codegen::mcp_tool;
use rmcp::{
    ErrorData as McpError,
    model::CallToolResult,
    schemars::{self, JsonSchema},
    serde::Deserialize,
};
use std::fmt::Write;

#[derive(Debug, Default, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListProjectsArgs {
    /// Number of projects to return (default 50, max 200)
    #[serde(default)]
    pub top: Option<u32>,
    /// Token from a previous listProjects call to fetch the next page
    #[serde(default, deserialize_with = "deserialize_optional_non_empty_string")]
    pub continuation_token: Option<String>,
    /// Project state filter: wellFormed, createPending, deleting, new, all
    #[serde(default, deserialize_with = "deserialize_optional_non_empty_string")]
    pub state_filter: Option<String>,
}

#[mcp_tool(
    name = "listProjects",
    description = "List projects in the Azure DevOps organization"
)]
pub async fn list_projects(
    api: &dyn AzureDevOpsApi,
    ctx: &ToolContext,
    args: ListProjectsArgs,
) -> Result<CallToolResult, McpError> {
    log::info!(
        "Tool invoked: {}(top={:?}, state_filter={:?})",
        LIST_PROJECTS_TOOL_NAME,
        args.top,
        args.state_filter
    );

    into_tool_result(LIST_PROJECTS_TOOL_NAME, run(api, ctx, args).await)
}

async fn run(
    api: &dyn AzureDevOpsApi,
    ctx: &ToolContext,
    args: ListProjectsArgs,
) -> Result<String, ToolError> {
    let organization = ctx.organization()?;
    let query = ProjectListQuery {
        top: args.top,
        continuation_token: args.continuation_token,
        state_filter: args.state_filter,
    };
    let page = api.list_projects(&ctx.token, organization, &query).await?;

    Ok(format_projects(&page))
}

fn format_projects(page: &Page<Project>) -> String {
    if page.items.is_empty() && page.continuation_token.is_none() {
        return "No projects found.".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(out, "Found {} project(s):", page.count);

    for (idx, project) in page.items.iter().enumerate() {
        let _ = writeln!(out, "\n{}. {}", idx + 1, project.name);
        let _ = writeln!(out, "   ID: {}", project.id);
        if let Some(state) = &project.state {
            let _ = writeln!(out, "   State: {}", state);
        }
        if let Some(visibility) = &project.visibility {
            let _ = writeln!(out, "   Visibility: {}", visibility);
        }
        if let Some(revision) = project.revision {
            let _ = writeln!(out, "   Revision: {}", revision);
        }
        if let Some(updated) = &project.last_update_time {
            let _ = writeln!(out, "   Last Updated: {}", updated);
        }
        if let Some(description) = project.description.as_deref().filter(|d| !d.trim().is_empty())
        {
            let _ = writeln!(out, "   Description: {}", description.trim());
        }
        let _ = writeln!(out, "   URL: {}", project.url);
    }

    if let Some(token) = &page.continuation_token {
        let _ = write!(
            out,
            "\nMore projects available. Call listProjects again with continuationToken=\"{}\" to see the next page.",
            token
        );
    }

    out
}
