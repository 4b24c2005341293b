use crate::azure::client::{AzureDevOpsClient, AzureError};
use crate::azure::models::{ListResponse, Page};
use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// Largest `top` callers are documented to request; not enforced.
pub const DOCUMENTED_MAX_PAGE_SIZE: u32 = 200;

const CONTINUATION_TOKEN_HEADER: &str = "x-ms-continuationtoken";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Project {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub url: String,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub revision: Option<u64>,
    #[serde(default)]
    pub visibility: Option<String>,
    #[serde(rename = "lastUpdateTime", default)]
    pub last_update_time: Option<String>,
}

/// Query parameters of the project listing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectListQuery {
    pub top: Option<u32>,
    pub continuation_token: Option<String>,
    /// `wellFormed`, `createPending`, `deleting`, `new`, `all`
    pub state_filter: Option<String>,
}

impl AzureDevOpsClient {
    /// List one page of projects in an organization
    pub async fn list_projects(
        &self,
        token: &str,
        organization: &str,
        query: &ProjectListQuery,
    ) -> Result<Page<Project>, AzureError> {
        let top = query.top.unwrap_or(DEFAULT_PAGE_SIZE);
        if top > DOCUMENTED_MAX_PAGE_SIZE {
            log::warn!(
                "Requested top={} exceeds the documented maximum of {}; passing through",
                top,
                DOCUMENTED_MAX_PAGE_SIZE
            );
        }

        let mut path = format!("projects?api-version=7.1&$top={}", top);
        if let Some(continuation_token) = &query.continuation_token {
            path.push_str(&format!(
                "&continuationToken={}",
                urlencoding::encode(continuation_token)
            ));
        }
        if let Some(state_filter) = &query.state_filter {
            path.push_str(&format!("&stateFilter={}", urlencoding::encode(state_filter)));
        }

        let url = self.api_url(&[organization], &path);
        let (response, headers): (ListResponse<Project>, _) =
            self.get_with_headers(token, &url).await?;

        let continuation_token = headers
            .get(CONTINUATION_TOKEN_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string())
            .filter(|s| !s.is_empty());

        Ok(Page {
            count: response.value.len(),
            items: response.value,
            continuation_token,
        })
    }
}
