use crate::azure::api::AzureDevOpsApi;
use crate::mcp::tools::support::format_work_items::{
    NO_WORK_ITEMS_FOUND, WorkItemDetails, format_work_item_details,
};
use crate::mcp::tools::support::wiql_builder::{DETAIL_FIELDS, FIELD_TEAM_PROJECT};
use crate::mcp::tools::support::{ToolContext, ToolError, into_tool_result};
use mcp_tools_codegen::mcp_tool;
use rmcp::{
    ErrorData as McpError,
    model::CallToolResult,
    schemars::{self, JsonSchema},
    serde::Deserialize,
};

/// A single work item ID or a list of them.
#[derive(Debug, Clone, Deserialize, JsonSchema, PartialEq)]
#[serde(untagged)]
pub enum WorkItemIds {
    One(u32),
    Many(Vec<u32>),
}

impl WorkItemIds {
    pub fn into_vec(self) -> Vec<u32> {
        match self {
            WorkItemIds::One(id) => vec![id],
            WorkItemIds::Many(ids) => ids,
        }
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct GetWorkItemDetailsArgs {
    /// Work item ID or array of IDs
    pub ids: WorkItemIds,
}

#[mcp_tool(
    name = "getWorkItemDetails",
    description = "Get work item details including description, acceptance criteria and discussion"
)]
pub async fn get_work_item_details(
    api: &dyn AzureDevOpsApi,
    ctx: &ToolContext,
    args: GetWorkItemDetailsArgs,
) -> Result<CallToolResult, McpError> {
    log::info!(
        "Tool invoked: {}(ids={:?})",
        GET_WORK_ITEM_DETAILS_TOOL_NAME,
        args.ids
    );

    into_tool_result(
        GET_WORK_ITEM_DETAILS_TOOL_NAME,
        run(api, ctx, args.ids.into_vec()).await,
    )
}

async fn run(
    api: &dyn AzureDevOpsApi,
    ctx: &ToolContext,
    ids: Vec<u32>,
) -> Result<String, ToolError> {
    let organization = ctx.organization()?;
    let token = ctx.token.as_str();

    if ids.is_empty() {
        return Ok(NO_WORK_ITEMS_FOUND.to_string());
    }

    let work_items = api
        .get_work_items(token, organization, &ids, DETAIL_FIELDS)
        .await?;
    if work_items.is_empty() {
        return Ok(NO_WORK_ITEMS_FOUND.to_string());
    }

    let mut details = Vec::with_capacity(work_items.len());
    for work_item in work_items {
        // A failed comment fetch drops only this item's discussion section
        let comments = match work_item.field_str(FIELD_TEAM_PROJECT) {
            Some(project) => match api
                .get_comments(token, organization, project, work_item.id)
                .await
            {
                Ok(comments) => Some(comments),
                Err(e) => {
                    log::warn!(
                        "Omitting discussion of work item {}: {}",
                        work_item.id,
                        e
                    );
                    None
                }
            },
            None => {
                log::warn!(
                    "Work item {} has no {}; omitting discussion",
                    work_item.id,
                    FIELD_TEAM_PROJECT
                );
                None
            }
        };
        details.push(WorkItemDetails {
            work_item,
            comments,
        });
    }

    Ok(format_work_item_details(&details))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::azure::api::MockAzureDevOpsApi;
    use crate::azure::client::AzureError;
    use crate::azure::models::{Comment, IdentityRef, WorkItem};
    use crate::mcp::tools::support::tool_error::test_support::text_and_flag;
    use serde_json::json;

    fn work_item(id: u32, title: &str) -> WorkItem {
        serde_json::from_value(json!({
            "id": id,
            "url": format!("https://dev.azure.com/contoso/P1/_apis/wit/workItems/{}", id),
            "fields": {
                "System.Title": title,
                "System.TeamProject": "Contoso Web",
                "System.AreaPath": "Contoso Web\\Checkout",
                "System.Description": "<p>Payment &amp; shipping</p>",
                "Microsoft.VSTS.Common.AcceptanceCriteria": "<ul><li>Card accepted</li></ul>"
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_ids_accept_single_or_many() {
        let one: GetWorkItemDetailsArgs = serde_json::from_value(json!({ "ids": 7 })).unwrap();
        assert_eq!(one.ids.into_vec(), vec![7]);

        let many: GetWorkItemDetailsArgs =
            serde_json::from_value(json!({ "ids": [7, 8] })).unwrap();
        assert_eq!(many.ids.into_vec(), vec![7, 8]);
    }

    #[tokio::test]
    async fn test_details_with_discussion() {
        let mut api = MockAzureDevOpsApi::new();
        api.expect_get_work_items()
            .withf(|_, org, ids, fields| {
                org == "contoso" && ids.to_vec() == vec![12] && fields.to_vec() == DETAIL_FIELDS.to_vec()
            })
            .times(1)
            .returning(|_, _, _, _| Ok(vec![work_item(12, "Checkout fails")]));
        api.expect_get_comments()
            .withf(|_, _, project, id| project == "Contoso Web" && *id == 12)
            .times(1)
            .returning(|_, _, _, _| {
                Ok(vec![Comment {
                    id: 1,
                    text: Some("<div>Reproduced on staging</div>".to_string()),
                    created_by: Some(IdentityRef {
                        display_name: "Jane Doe".to_string(),
                        unique_name: Some("jane@contoso.com".to_string()),
                    }),
                    created_date: Some("2024-05-02T09:00:00Z".to_string()),
                }])
            });

        let ctx = ToolContext::new(Some("contoso"), "tok");
        let args = GetWorkItemDetailsArgs {
            ids: WorkItemIds::One(12),
        };
        let result = get_work_item_details(&api, &ctx, args).await.unwrap();
        let (text, is_error) = text_and_flag(&result);

        assert!(!is_error);
        assert!(text.contains("1. Checkout fails\n   ID: 12\n"));
        assert!(text.contains("   Area: Contoso Web\\Checkout\n"));
        assert!(text.contains("   Description:\n      Payment & shipping\n"));
        assert!(text.contains("   Acceptance Criteria:\n      • Card accepted\n"));
        assert!(text.contains("- Jane Doe (2024-05-02T09:00:00Z): Reproduced on staging"));
    }

    #[tokio::test]
    async fn test_comment_failure_omits_only_that_discussion() {
        let mut api = MockAzureDevOpsApi::new();
        api.expect_get_work_items().returning(|_, _, _, _| {
            Ok(vec![work_item(1, "First"), work_item(2, "Second")])
        });
        api.expect_get_comments()
            .withf(|_, _, _, id| *id == 1)
            .returning(|_, _, _, _| {
                Err(AzureError::ApiError {
                    status: 403,
                    body: "forbidden".to_string(),
                })
            });
        api.expect_get_comments()
            .withf(|_, _, _, id| *id == 2)
            .returning(|_, _, _, _| Ok(vec![]));

        let ctx = ToolContext::new(Some("contoso"), "tok");
        let args = GetWorkItemDetailsArgs {
            ids: WorkItemIds::Many(vec![1, 2]),
        };
        let result = get_work_item_details(&api, &ctx, args).await.unwrap();
        let (text, is_error) = text_and_flag(&result);

        assert!(!is_error);
        let (first, second) = text.split_once("\n2. Second\n").unwrap();
        assert!(!first.contains("Discussion"));
        assert!(second.contains("Discussion: no comments"));
        assert!(!text.contains("forbidden"));
    }

    #[tokio::test]
    async fn test_batch_failure_is_error_result() {
        let mut api = MockAzureDevOpsApi::new();
        api.expect_get_work_items().returning(|_, _, _, _| {
            Err(AzureError::ApiError {
                status: 404,
                body: "TF401232: Work item 999 does not exist".to_string(),
            })
        });
        api.expect_get_comments().never();

        let ctx = ToolContext::new(Some("contoso"), "tok");
        let args = GetWorkItemDetailsArgs {
            ids: WorkItemIds::One(999),
        };
        let result = get_work_item_details(&api, &ctx, args).await.unwrap();
        let (text, is_error) = text_and_flag(&result);

        assert!(is_error);
        assert!(text.contains("TF401232: Work item 999 does not exist"));
    }

    #[tokio::test]
    async fn test_empty_ids() {
        let mut api = MockAzureDevOpsApi::new();
        api.expect_get_work_items().never();

        let ctx = ToolContext::new(Some("contoso"), "tok");
        let args = GetWorkItemDetailsArgs {
            ids: WorkItemIds::Many(vec![]),
        };
        let result = get_work_item_details(&api, &ctx, args).await.unwrap();

        assert_eq!(
            text_and_flag(&result),
            (NO_WORK_ITEMS_FOUND.to_string(), false)
        );
    }
}
