use crate::azure::api::AzureDevOpsApi;
use crate::mcp::tools::support::wiql_builder::{
    Assignee, CURRENT_ITERATION, IterationScope, QueryFilter,
};
use crate::mcp::tools::support::{
    ToolContext, deserialize_optional_non_empty_string, into_tool_result,
};
use crate::mcp::tools::work_items::pipeline::{ListingRequest, run_listing};
use mcp_tools_codegen::mcp_tool;
use rmcp::{
    ErrorData as McpError,
    model::CallToolResult,
    schemars::{self, JsonSchema},
    serde::Deserialize,
};

#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct ListWorkItemsArgs {
    /// Number of work items to return (default 50, max 200)
    #[serde(default)]
    pub top: Option<u32>,
    /// Number of work items to skip
    #[serde(default)]
    pub skip: Option<u32>,
    /// Project name (partial, case-insensitive) or ID
    #[serde(default, deserialize_with = "deserialize_optional_non_empty_string")]
    pub project: Option<String>,
    /// Team name (partial, case-insensitive) or ID; requires project
    #[serde(default, deserialize_with = "deserialize_optional_non_empty_string")]
    pub team: Option<String>,
}

#[mcp_tool(
    name = "listWorkItems",
    description = "List your open work items in the current iteration, excluding epics"
)]
pub async fn list_work_items(
    api: &dyn AzureDevOpsApi,
    ctx: &ToolContext,
    args: ListWorkItemsArgs,
) -> Result<CallToolResult, McpError> {
    log::info!(
        "Tool invoked: {}(top={:?}, skip={:?}, project={:?}, team={:?})",
        LIST_WORK_ITEMS_TOOL_NAME,
        args.top,
        args.skip,
        args.project,
        args.team
    );

    let request = ListingRequest {
        variant: &CURRENT_ITERATION,
        filter: QueryFilter {
            assignee: Assignee::CurrentUser,
            iteration_scope: IterationScope::Current,
            ..Default::default()
        },
        project: args.project,
        team: args.team,
        skip: args.skip,
        top: args.top,
        subject: "work item(s) assigned to you in the current iteration",
    };

    into_tool_result(
        LIST_WORK_ITEMS_TOOL_NAME,
        run_listing(api, ctx, request).await,
    )
}
