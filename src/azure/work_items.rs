use crate::azure::client::{AzureDevOpsClient, AzureError};
use crate::azure::models::{
    Comment, CommentListResponse, ListResponse, WiqlQuery, WiqlResponse, WorkItem,
    WorkItemReference,
};

/// Where a WIQL query runs: organization, optionally narrowed to a project and team.
///
/// Team scope matters for macros such as `@CurrentIteration`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WiqlScope {
    pub organization: String,
    pub project: Option<String>,
    pub team: Option<String>,
}

impl WiqlScope {
    fn segments(&self) -> Vec<&str> {
        let mut segments = vec![self.organization.as_str()];
        if let Some(project) = &self.project {
            segments.push(project);
            if let Some(team) = &self.team {
                segments.push(team);
            }
        }
        segments
    }
}

impl AzureDevOpsClient {
    /// Run a WIQL query and return the matching references in query order.
    pub async fn query_wiql(
        &self,
        token: &str,
        scope: &WiqlScope,
        query: &str,
    ) -> Result<Vec<WorkItemReference>, AzureError> {
        let wiql = WiqlQuery {
            query: query.to_string(),
        };
        let url = self.api_url(&scope.segments(), "wit/wiql?api-version=7.1");
        let response: WiqlResponse = self.post(token, &url, &wiql).await?;

        Ok(response.work_items)
    }

    /// Fetch the given work items in one request, restricted to `fields` when non-empty.
    ///
    /// The caller decides the id window; nothing is chunked here.
    pub async fn get_work_items(
        &self,
        token: &str,
        organization: &str,
        ids: &[u32],
        fields: &[&str],
    ) -> Result<Vec<WorkItem>, AzureError> {
        if ids.is_empty() {
            return Ok(vec![]);
        }

        let ids_str = ids
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(",");
        let mut path = format!("wit/workitems?ids={}", ids_str);
        if !fields.is_empty() {
            path.push_str(&format!("&fields={}", fields.join(",")));
        }
        path.push_str("&api-version=7.1");

        let url = self.api_url(&[organization], &path);
        let response: ListResponse<WorkItem> = self.get(token, &url).await?;

        Ok(response.value)
    }

    pub async fn get_comments(
        &self,
        token: &str,
        organization: &str,
        project: &str,
        work_item_id: u32,
    ) -> Result<Vec<Comment>, AzureError> {
        let path = format!(
            "wit/workItems/{}/comments?api-version=7.1-preview.4",
            work_item_id
        );
        let url = self.api_url(&[organization, project], &path);
        let response: CommentListResponse = self.get(token, &url).await?;

        Ok(response.comments)
    }
}
