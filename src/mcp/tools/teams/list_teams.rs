use crate::azure::api::AzureDevOpsApi;
use crate::azure::teams::Team;
use crate::mcp::tools::support::{
    ToolContext, ToolError, deserialize_non_empty_string, into_tool_result,
};
use mcp_tools_codegen::mcp_tool;
use rmcp::{
    ErrorData as McpError,
    model::CallToolResult,
    schemars::{self, JsonSchema},
    serde::Deserialize,
};
use std::fmt::Write;

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListTeamsArgs {
    /// Project ID (or name) whose teams to list
    #[serde(deserialize_with = "deserialize_non_empty_string")]
    pub project_id: String,
}

#[mcp_tool(name = "listTeams", description = "List teams of an Azure DevOps project")]
pub async fn list_teams(
    api: &dyn AzureDevOpsApi,
    ctx: &ToolContext,
    args: ListTeamsArgs,
) -> Result<CallToolResult, McpError> {
    log::info!(
        "Tool invoked: {}(project_id={})",
        LIST_TEAMS_TOOL_NAME,
        args.project_id
    );

    into_tool_result(LIST_TEAMS_TOOL_NAME, run(api, ctx, args).await)
}

async fn run(
    api: &dyn AzureDevOpsApi,
    ctx: &ToolContext,
    args: ListTeamsArgs,
) -> Result<String, ToolError> {
    let organization = ctx.organization()?;
    let teams = api
        .list_teams(&ctx.token, organization, &args.project_id)
        .await?;

    Ok(format_teams(&args.project_id, &teams))
}

fn format_teams(project_id: &str, teams: &[Team]) -> String {
    if teams.is_empty() {
        return format!("No teams found in project {}.", project_id);
    }

    let mut out = String::new();
    let _ = write!(out, "Found {} team(s):", teams.len());

    for (idx, team) in teams.iter().enumerate() {
        let _ = write!(out, "\n\n{}. {}\n   ID: {}", idx + 1, team.name, team.id);
        if let Some(description) = team.description.as_deref().filter(|d| !d.trim().is_empty()) {
            let _ = write!(out, "\n   Description: {}", description.trim());
        }
        if let Some(project_name) = &team.project_name {
            let _ = write!(out, "\n   Project: {}", project_name);
        }
        if !team.url.is_empty() {
            let _ = write!(out, "\n   URL: {}", team.url);
        }
    }

    out
}
