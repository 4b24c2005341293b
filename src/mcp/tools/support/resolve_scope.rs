use crate::azure::api::AzureDevOpsApi;
use crate::azure::client::AzureError;
use crate::azure::projects::{DOCUMENTED_MAX_PAGE_SIZE, Project, ProjectListQuery};
use crate::azure::work_items::WiqlScope;
use crate::mcp::tools::support::fuzzy_resolve::{Candidate, fuzzy_resolve};
use crate::mcp::tools::support::tool_error::ToolError;

/// Fetch every project of the organization, following continuation tokens.
pub async fn list_all_projects(
    api: &dyn AzureDevOpsApi,
    token: &str,
    organization: &str,
) -> Result<Vec<Project>, AzureError> {
    let mut projects = Vec::new();
    let mut query = ProjectListQuery {
        top: Some(DOCUMENTED_MAX_PAGE_SIZE),
        ..Default::default()
    };

    loop {
        let page = api.list_projects(token, organization, &query).await?;
        projects.extend(page.items);

        match page.continuation_token {
            Some(next) if query.continuation_token.as_deref() != Some(next.as_str()) => {
                query.continuation_token = Some(next);
            }
            _ => break,
        }
    }

    Ok(projects)
}

fn resolve_in<C: Candidate>(
    kind: &'static str,
    candidates: &[C],
    query: &str,
) -> Result<String, ToolError> {
    fuzzy_resolve(candidates, query)
        .map(|id| id.to_string())
        .ok_or_else(|| {
            ToolError::resolution(kind, query, candidates.iter().map(|c| c.candidate_name()))
        })
}

/// Build the WIQL scope for optional project/team names, resolving each to its ID.
///
/// A team is looked up inside the resolved project only.
pub async fn resolve_scope(
    api: &dyn AzureDevOpsApi,
    token: &str,
    organization: &str,
    project: Option<&str>,
    team: Option<&str>,
) -> Result<WiqlScope, ToolError> {
    let mut scope = WiqlScope {
        organization: organization.to_string(),
        project: None,
        team: None,
    };

    let Some(project) = project else {
        if let Some(team) = team {
            return Err(ToolError::TeamWithoutProject(team.to_string()));
        }
        return Ok(scope);
    };

    let projects = list_all_projects(api, token, organization).await?;
    let project_id = resolve_in("project", &projects, project)?;
    log::debug!("Resolved project '{}' to {}", project, project_id);

    if let Some(team) = team {
        let teams = api.list_teams(token, organization, &project_id).await?;
        let team_id = resolve_in("team", &teams, team)?;
        log::debug!("Resolved team '{}' to {}", team, team_id);
        scope.team = Some(team_id);
    }

    scope.project = Some(project_id);
    Ok(scope)
}
