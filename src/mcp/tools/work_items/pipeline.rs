use crate::azure::api::AzureDevOpsApi;
use crate::azure::projects::{DEFAULT_PAGE_SIZE, DOCUMENTED_MAX_PAGE_SIZE};
use crate::mcp::tools::support::format_work_items::{
    NO_WORK_ITEMS_FOUND, Window, format_work_item_list,
};
use crate::mcp::tools::support::resolve_scope::resolve_scope;
use crate::mcp::tools::support::wiql_builder::{QueryFilter, QueryVariant, build_wiql};
use crate::mcp::tools::support::{ToolContext, ToolError};

/// One work-item listing: query shape, filter, scope names and window.
#[derive(Debug, Clone)]
pub struct ListingRequest {
    pub variant: &'static QueryVariant,
    pub filter: QueryFilter,
    pub project: Option<String>,
    pub team: Option<String>,
    pub skip: Option<u32>,
    pub top: Option<u32>,
    /// Header noun phrase, e.g. "work item(s) in the current iteration"
    pub subject: &'static str,
}

/// Resolve scope, run the WIQL, fetch the requested window and format it.
///
/// An empty WIQL result short-circuits before any work item is fetched.
pub async fn run_listing(
    api: &dyn AzureDevOpsApi,
    ctx: &ToolContext,
    request: ListingRequest,
) -> Result<String, ToolError> {
    let organization = ctx.organization()?;
    let token = ctx.token.as_str();

    let scope = resolve_scope(
        api,
        token,
        organization,
        request.project.as_deref(),
        request.team.as_deref(),
    )
    .await?;

    let query = build_wiql(request.variant, &request.filter);
    log::debug!("Executing WIQL query: {}", query);

    let refs = api.query_wiql(token, &scope, &query).await?;
    if refs.is_empty() {
        return Ok(NO_WORK_ITEMS_FOUND.to_string());
    }

    let top = request.top.unwrap_or(DEFAULT_PAGE_SIZE);
    if top > DOCUMENTED_MAX_PAGE_SIZE {
        log::warn!(
            "Requested top={} exceeds the documented maximum of {}; passing through",
            top,
            DOCUMENTED_MAX_PAGE_SIZE
        );
    }
    let skip = request.skip.unwrap_or(0) as usize;
    let total = refs.len();

    let ids: Vec<u32> = refs
        .iter()
        .skip(skip)
        .take(top as usize)
        .map(|r| r.id)
        .collect();
    if ids.is_empty() {
        log::debug!("skip={} is past the end of {} results", skip, total);
        return Ok(format!(
            "{} ({} total, skip={} is past the end)",
            NO_WORK_ITEMS_FOUND.trim_end_matches('.'),
            total,
            skip
        ));
    }

    let work_items = api
        .get_work_items(token, organization, &ids, request.variant.fields)
        .await?;

    let header = format!("Found {} {}:", total, request.subject);
    Ok(format_work_item_list(
        &header,
        &work_items,
        Window { skip, total },
    ))
}
