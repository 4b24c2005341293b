use crate::azure::api::AzureDevOpsApi;
use crate::mcp::tools::support::wiql_builder::{Assignee, IterationScope, QueryFilter, TICKETS};
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
#[serde(rename_all = "camelCase")]
pub struct ListTicketsArgs {
    /// Number of tickets to return (default 50, max 200)
    #[serde(default)]
    pub top: Option<u32>,
    /// Number of tickets to skip
    #[serde(default)]
    pub skip: Option<u32>,
    /// Project name (partial, case-insensitive) or ID
    #[serde(default, deserialize_with = "deserialize_optional_non_empty_string")]
    pub project: Option<String>,
    /// Team name (partial, case-insensitive) or ID; requires project
    #[serde(default, deserialize_with = "deserialize_optional_non_empty_string")]
    pub team: Option<String>,
    /// Work item types to include (e.g., ["Bug", "User Story"])
    #[serde(default)]
    pub work_item_types: Vec<String>,
    /// States to include (e.g., ["New", "Active"])
    #[serde(default)]
    pub states: Vec<String>,
    /// Assignee display or unique name; defaults to the current user
    #[serde(default, deserialize_with = "deserialize_optional_non_empty_string")]
    pub assigned_to: Option<String>,
}

#[mcp_tool(
    name = "listTickets",
    description = "List tickets assigned to you (or a named user), filtered by type and state"
)]
pub async fn list_tickets(
    api: &dyn AzureDevOpsApi,
    ctx: &ToolContext,
    args: ListTicketsArgs,
) -> Result<CallToolResult, McpError> {
    log::info!(
        "Tool invoked: {}(top={:?}, skip={:?}, project={:?}, team={:?}, work_item_types={:?}, states={:?})",
        LIST_TICKETS_TOOL_NAME,
        args.top,
        args.skip,
        args.project,
        args.team,
        args.work_item_types,
        args.states
    );

    let request = ListingRequest {
        variant: &TICKETS,
        filter: QueryFilter {
            assignee: Assignee::from_option(args.assigned_to),
            work_item_types: args.work_item_types,
            states: args.states,
            iteration_scope: IterationScope::Any,
        },
        project: args.project,
        team: args.team,
        skip: args.skip,
        top: args.top,
        subject: "ticket(s)",
    };

    into_tool_result(LIST_TICKETS_TOOL_NAME, run_listing(api, ctx, request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::azure::api::MockAzureDevOpsApi;
    use crate::azure::models::{Page, WorkItem, WorkItemReference};
    use crate::azure::projects::Project;
    use crate::azure::teams::Team;
    use crate::mcp::tools::support::tool_error::test_support::text_and_flag;
    use serde_json::json;

    fn ticket() -> WorkItem {
        serde_json::from_value(json!({
            "id": 42,
            "url": "https://dev.azure.com/contoso/P1/_apis/wit/workItems/42",
            "fields": {
                "System.Title": "Checkout fails",
                "System.WorkItemType": "Bug",
                "System.State": "Active",
                "System.AssignedTo": { "displayName": "Sean O'Brien", "uniqueName": "sean@contoso.com" },
                "System.CreatedDate": "2024-05-01T08:00:00Z",
                "System.ChangedDate": "2024-05-03T12:30:00Z",
                "System.Description": "<p>Steps:</p><ol><li>Add item</li><li>Pay</li></ol>",
                "System.Tags": "checkout; p1",
                "Microsoft.VSTS.Common.Priority": 1,
                "Microsoft.VSTS.Common.Severity": "2 - High"
            }
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_list_tickets_filters_and_renders_all_fields() {
        let mut api = MockAzureDevOpsApi::new();
        api.expect_list_projects().returning(|_, _, _| {
            Ok(Page {
                items: vec![Project {
                    id: "P1".to_string(),
                    name: "Contoso Web".to_string(),
                    description: None,
                    url: String::new(),
                    state: None,
                    revision: None,
                    visibility: None,
                    last_update_time: None,
                }],
                count: 1,
                continuation_token: None,
            })
        });
        api.expect_list_teams().returning(|_, _, _| {
            Ok(vec![Team {
                id: "T1".to_string(),
                name: "Checkout Squad".to_string(),
                description: None,
                url: String::new(),
                project_name: None,
                project_id: None,
            }])
        });
        api.expect_query_wiql()
            .withf(|_, scope, query| {
                scope.project.as_deref() == Some("P1")
                    && scope.team.as_deref() == Some("T1")
                    && query.contains("[System.AssignedTo] = 'Sean O''Brien'")
                    && query.contains("[System.WorkItemType] IN ('Bug')")
                    && query.contains("[System.State] IN ('Active', 'New')")
                    && query.ends_with("ORDER BY [System.ChangedDate] DESC")
                    && !query.contains("@CurrentIteration")
            })
            .times(1)
            .returning(|_, _, _| {
                Ok(vec![WorkItemReference {
                    id: 42,
                    url: String::new(),
                }])
            });
        api.expect_get_work_items()
            .withf(|_, _, _, fields| fields.to_vec() == TICKETS.fields.to_vec())
            .times(1)
            .returning(|_, _, _, _| Ok(vec![ticket()]));

        let ctx = ToolContext::new(Some("contoso"), "tok");
        let args = ListTicketsArgs {
            project: Some("web".to_string()),
            team: Some("checkout".to_string()),
            work_item_types: vec!["Bug".to_string()],
            states: vec!["Active".to_string(), "New".to_string()],
            assigned_to: Some("Sean O'Brien".to_string()),
            ..Default::default()
        };
        let result = list_tickets(&api, &ctx, args).await.unwrap();
        let (text, is_error) = text_and_flag(&result);

        assert!(!is_error);
        assert_eq!(
            text,
            "Found 1 ticket(s):\n\n\
             1. Checkout fails\n   \
             ID: 42\n   \
             Type: Bug\n   \
             State: Active\n   \
             Assigned To: Sean O'Brien <sean@contoso.com>\n   \
             Priority: 1\n   \
             Severity: 2 - High\n   \
             Created: 2024-05-01T08:00:00Z\n   \
             Changed: 2024-05-03T12:30:00Z\n   \
             Tags: checkout; p1\n   \
             Description: Steps: • Add item • Pay\n   \
             URL: https://dev.azure.com/contoso/P1/_workitems/edit/42\n\n\
             Showing items 1-1 of 1."
        );
    }

    #[tokio::test]
    async fn test_team_without_project_is_error() {
        let mut api = MockAzureDevOpsApi::new();
        api.expect_query_wiql().never();

        let ctx = ToolContext::new(Some("contoso"), "tok");
        let args = ListTicketsArgs {
            team: Some("Checkout".to_string()),
            ..Default::default()
        };
        let result = list_tickets(&api, &ctx, args).await.unwrap();
        let (text, is_error) = text_and_flag(&result);

        assert!(is_error);
        assert!(text.contains("A project is required to resolve team 'Checkout'"));
    }

    #[test]
    fn test_args_use_camel_case() {
        let args: ListTicketsArgs = serde_json::from_value(json!({
            "workItemTypes": ["Bug"],
            "states": ["Active"],
            "assignedTo": "jane@contoso.com"
        }))
        .unwrap();
        assert_eq!(args.work_item_types, vec!["Bug"]);
        assert_eq!(args.assigned_to.as_deref(), Some("jane@contoso.com"));
    }
}
