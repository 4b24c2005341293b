use crate::azure::api::AzureDevOpsApi;
use crate::config::Config;
use crate::mcp::tools::support::ToolContext;
use crate::mcp::tools::{projects, teams, work_items};
use crate::server::auth::token_for_request;
use rmcp::{
    ErrorData as McpError, RoleServer,
    handler::server::router::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::{CallToolResult, Implementation, ServerCapabilities, ServerInfo},
    service::RequestContext,
    tool, tool_handler, tool_router,
};
use std::sync::Arc;

#[derive(Clone)]
pub struct AzureMcpServer {
    api: Arc<dyn AzureDevOpsApi>,
    config: Arc<Config>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl AzureMcpServer {
    pub fn new(api: Arc<dyn AzureDevOpsApi>, config: Config) -> Self {
        Self {
            api,
            config: Arc::new(config),
            tool_router: Self::tool_router(),
        }
    }

    /// Organization from config plus the token of the inbound HTTP request.
    fn tool_context(&self, context: &RequestContext<RoleServer>) -> ToolContext {
        let parts = context.extensions.get::<http::request::Parts>();
        let token = token_for_request(parts, self.config.fallback_token());
        ToolContext::new(self.config.organization(), token)
    }

    #[tool(
        name = "listProjects",
        description = "List projects in the Azure DevOps organization"
    )]
    async fn list_projects(
        &self,
        args: Parameters<projects::ListProjectsArgs>,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let ctx = self.tool_context(&context);
        projects::list_projects(self.api.as_ref(), &ctx, args.0).await
    }

    #[tool(name = "listTeams", description = "List teams of an Azure DevOps project")]
    async fn list_teams(
        &self,
        args: Parameters<teams::ListTeamsArgs>,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let ctx = self.tool_context(&context);
        teams::list_teams(self.api.as_ref(), &ctx, args.0).await
    }

    #[tool(
        name = "listWorkItems",
        description = "List your open work items in the current iteration, excluding epics"
    )]
    async fn list_work_items(
        &self,
        args: Parameters<work_items::ListWorkItemsArgs>,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let ctx = self.tool_context(&context);
        work_items::list_work_items(self.api.as_ref(), &ctx, args.0).await
    }

    #[tool(
        name = "listTickets",
        description = "List tickets assigned to you (or a named user), filtered by type and state"
    )]
    async fn list_tickets(
        &self,
        args: Parameters<work_items::ListTicketsArgs>,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let ctx = self.tool_context(&context);
        work_items::list_tickets(self.api.as_ref(), &ctx, args.0).await
    }

    #[tool(
        name = "getWorkItemDetails",
        description = "Get work item details including description, acceptance criteria and discussion"
    )]
    async fn get_work_item_details(
        &self,
        args: Parameters<work_items::GetWorkItemDetailsArgs>,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let ctx = self.tool_context(&context);
        work_items::get_work_item_details(self.api.as_ref(), &ctx, args.0).await
    }
}

#[tool_handler]
impl rmcp::ServerHandler for AzureMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: env!("CARGO_PKG_NAME").into(),
                version: env!("CARGO_PKG_VERSION").into(),
                icons: None,
                title: None,
                website_url: None,
            },
            instructions: Some(
                "Read-only access to Azure DevOps projects, teams and work items. \
                 Project and team parameters accept partial names."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}
