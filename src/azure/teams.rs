use crate::azure::client::{AzureDevOpsClient, AzureError};
use crate::azure::models::ListResponse;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Team {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url: String,
    #[serde(rename = "projectName", default)]
    pub project_name: Option<String>,
    #[serde(rename = "projectId", default)]
    pub project_id: Option<String>,
}

impl AzureDevOpsClient {
    /// List all teams of a project
    pub async fn list_teams(
        &self,
        token: &str,
        organization: &str,
        project_id: &str,
    ) -> Result<Vec<Team>, AzureError> {
        let path = format!(
            "projects/{}/teams?api-version=7.1",
            urlencoding::encode(project_id)
        );
        let url = self.api_url(&[organization], &path);
        let response: ListResponse<Team> = self.get(token, &url).await?;

        Ok(response.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_list_teams() {
        let server = MockServer::start();

        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/contoso/_apis/projects/P1/teams")
                .header("authorization", "Bearer secret");
            then.status(200).json_body(json!({
                "count": 2,
                "value": [
                    {
                        "id": "T1",
                        "name": "Web Team",
                        "url": "https://dev.azure.com/contoso/_apis/projects/P1/teams/T1",
                        "description": "Frontend",
                        "projectName": "Contoso Web",
                        "projectId": "P1"
                    },
                    {
                        "id": "T2",
                        "name": "Ops",
                        "url": "https://dev.azure.com/contoso/_apis/projects/P1/teams/T2",
                        "projectName": "Contoso Web",
                        "projectId": "P1"
                    }
                ]
            }));
        });

        let client = AzureDevOpsClient::with_base_url(server.base_url());
        let teams = client.list_teams("secret", "contoso", "P1").await.unwrap();

        mock.assert();
        assert_eq!(teams.len(), 2);
        assert_eq!(teams[0].description.as_deref(), Some("Frontend"));
        assert_eq!(teams[1].description, None);
        assert_eq!(teams[1].project_id.as_deref(), Some("P1"));
    }
}
