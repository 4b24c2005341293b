use crate::azure::client::{AzureDevOpsClient, AzureError};
use crate::azure::models::{Comment, Page, WorkItem, WorkItemReference};
use crate::azure::projects::{Project, ProjectListQuery};
use crate::azure::teams::Team;
use crate::azure::work_items::WiqlScope;
use async_trait::async_trait;

/// Read operations the MCP tools need from Azure DevOps.
///
/// Every call carries the bearer token of the request being served.
#[cfg_attr(any(test, feature = "test-support"), mockall::automock)]
#[async_trait]
pub trait AzureDevOpsApi: Send + Sync {
    async fn list_projects(
        &self,
        token: &str,
        organization: &str,
        query: &ProjectListQuery,
    ) -> Result<Page<Project>, AzureError>;

    async fn list_teams(
        &self,
        token: &str,
        organization: &str,
        project_id: &str,
    ) -> Result<Vec<Team>, AzureError>;

    async fn query_wiql(
        &self,
        token: &str,
        scope: &WiqlScope,
        query: &str,
    ) -> Result<Vec<WorkItemReference>, AzureError>;

    async fn get_work_items(
        &self,
        token: &str,
        organization: &str,
        ids: &[u32],
        fields: &'static [&'static str],
    ) -> Result<Vec<WorkItem>, AzureError>;

    async fn get_comments(
        &self,
        token: &str,
        organization: &str,
        project: &str,
        work_item_id: u32,
    ) -> Result<Vec<Comment>, AzureError>;
}

#[async_trait]
impl AzureDevOpsApi for AzureDevOpsClient {
    async fn list_projects(
        &self,
        token: &str,
        organization: &str,
        query: &ProjectListQuery,
    ) -> Result<Page<Project>, AzureError> {
        AzureDevOpsClient::list_projects(self, token, organization, query).await
    }

    async fn list_teams(
        &self,
        token: &str,
        organization: &str,
        project_id: &str,
    ) -> Result<Vec<Team>, AzureError> {
        AzureDevOpsClient::list_teams(self, token, organization, project_id).await
    }

    async fn query_wiql(
        &self,
        token: &str,
        scope: &WiqlScope,
        query: &str,
    ) -> Result<Vec<WorkItemReference>, AzureError> {
        AzureDevOpsClient::query_wiql(self, token, scope, query).await
    }

    async fn get_work_items(
        &self,
        token: &str,
        organization: &str,
        ids: &[u32],
        fields: &'static [&'static str],
    ) -> Result<Vec<WorkItem>, AzureError> {
        AzureDevOpsClient::get_work_items(self, token, organization, ids, fields).await
    }

    async fn get_comments(
        &self,
        token: &str,
        organization: &str,
        project: &str,
        work_item_id: u32,
    ) -> Result<Vec<Comment>, AzureError> {
        AzureDevOpsClient::get_comments(self, token, organization, project, work_item_id).await
    }
}
