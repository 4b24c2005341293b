//! WIQL statement construction for the work-item listing tools.

pub const FIELD_ID: &str = "System.Id";
pub const FIELD_TITLE: &str = "System.Title";
pub const FIELD_WORK_ITEM_TYPE: &str = "System.WorkItemType";
pub const FIELD_STATE: &str = "System.State";
pub const FIELD_ASSIGNED_TO: &str = "System.AssignedTo";
pub const FIELD_CREATED_DATE: &str = "System.CreatedDate";
pub const FIELD_CHANGED_DATE: &str = "System.ChangedDate";
pub const FIELD_DESCRIPTION: &str = "System.Description";
pub const FIELD_TAGS: &str = "System.Tags";
pub const FIELD_ITERATION_PATH: &str = "System.IterationPath";
pub const FIELD_AREA_PATH: &str = "System.AreaPath";
pub const FIELD_TEAM_PROJECT: &str = "System.TeamProject";
pub const FIELD_PRIORITY: &str = "Microsoft.VSTS.Common.Priority";
pub const FIELD_SEVERITY: &str = "Microsoft.VSTS.Common.Severity";
pub const FIELD_ACCEPTANCE_CRITERIA: &str = "Microsoft.VSTS.Common.AcceptanceCriteria";

/// Whose work items a query returns.
#[derive(Debug, Clone, PartialEq)]
pub enum Assignee {
    /// The identity behind the bearer token (`@Me`)
    CurrentUser,
    /// A display name or unique name
    Named(String),
}

impl Assignee {
    /// Blank names fall back to the current user.
    pub fn from_option(name: Option<String>) -> Self {
        match name {
            Some(name) if !name.trim().is_empty() => Assignee::Named(name.trim().to_string()),
            _ => Assignee::CurrentUser,
        }
    }

    fn to_wiql(&self) -> String {
        match self {
            Assignee::CurrentUser => "@Me".to_string(),
            Assignee::Named(name) => quote(name),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum IterationScope {
    #[default]
    Any,
    Current,
}

/// Filter criteria consumed by [`build_wiql`].
#[derive(Debug, Clone, PartialEq)]
pub struct QueryFilter {
    pub assignee: Assignee,
    pub work_item_types: Vec<String>,
    pub states: Vec<String>,
    pub iteration_scope: IterationScope,
}

impl Default for QueryFilter {
    fn default() -> Self {
        Self {
            assignee: Assignee::CurrentUser,
            work_item_types: Vec::new(),
            states: Vec::new(),
            iteration_scope: IterationScope::Any,
        }
    }
}

/// Fixed shape of a work-item query: selected fields, hard conditions and sort order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QueryVariant {
    pub fields: &'static [&'static str],
    pub excluded_work_item_type: Option<&'static str>,
    pub excluded_state: Option<&'static str>,
    pub order_by: &'static str,
}

/// Assignee-scoped tickets with user-selectable type/state filters.
pub const TICKETS: QueryVariant = QueryVariant {
    fields: &[
        FIELD_ID,
        FIELD_TITLE,
        FIELD_WORK_ITEM_TYPE,
        FIELD_STATE,
        FIELD_ASSIGNED_TO,
        FIELD_CREATED_DATE,
        FIELD_CHANGED_DATE,
        FIELD_DESCRIPTION,
        FIELD_TAGS,
        FIELD_PRIORITY,
        FIELD_SEVERITY,
    ],
    excluded_work_item_type: None,
    excluded_state: None,
    order_by: "[System.ChangedDate] DESC",
};

/// Open, non-epic work in the team's current sprint.
pub const CURRENT_ITERATION: QueryVariant = QueryVariant {
    fields: &[
        FIELD_ID,
        FIELD_TITLE,
        FIELD_WORK_ITEM_TYPE,
        FIELD_STATE,
        FIELD_ASSIGNED_TO,
        FIELD_ITERATION_PATH,
        FIELD_CHANGED_DATE,
    ],
    excluded_work_item_type: Some("Epic"),
    excluded_state: Some("Closed"),
    order_by: "[System.State] ASC, [System.ChangedDate] DESC",
};

/// Fields fetched for the detailed view.
pub const DETAIL_FIELDS: &[&str] = &[
    FIELD_ID,
    FIELD_TITLE,
    FIELD_WORK_ITEM_TYPE,
    FIELD_STATE,
    FIELD_ASSIGNED_TO,
    FIELD_CREATED_DATE,
    FIELD_CHANGED_DATE,
    FIELD_DESCRIPTION,
    FIELD_TAGS,
    FIELD_PRIORITY,
    FIELD_SEVERITY,
    FIELD_ITERATION_PATH,
    FIELD_AREA_PATH,
    FIELD_TEAM_PROJECT,
    FIELD_ACCEPTANCE_CRITERIA,
];

/// Quote a WIQL string literal, doubling embedded single quotes.
fn quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

fn in_clause(field: &str, values: &[String]) -> Option<String> {
    let values: Vec<String> = values
        .iter()
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(quote)
        .collect();
    if values.is_empty() {
        return None;
    }
    Some(format!("[{}] IN ({})", field, values.join(", ")))
}

pub fn build_wiql(variant: &QueryVariant, filter: &QueryFilter) -> String {
    let select = variant
        .fields
        .iter()
        .map(|f| format!("[{}]", f))
        .collect::<Vec<_>>()
        .join(", ");

    let mut conditions = vec![format!(
        "[{}] = {}",
        FIELD_ASSIGNED_TO,
        filter.assignee.to_wiql()
    )];

    if let Some(excluded) = variant.excluded_work_item_type {
        conditions.push(format!("[{}] <> {}", FIELD_WORK_ITEM_TYPE, quote(excluded)));
    }

    if filter.iteration_scope == IterationScope::Current {
        conditions.push(format!("[{}] = @CurrentIteration", FIELD_ITERATION_PATH));
    }

    if let Some(excluded) = variant.excluded_state {
        conditions.push(format!("[{}] <> {}", FIELD_STATE, quote(excluded)));
    }

    conditions.extend(in_clause(FIELD_WORK_ITEM_TYPE, &filter.work_item_types));
    conditions.extend(in_clause(FIELD_STATE, &filter.states));

    format!(
        "SELECT {} FROM WorkItems WHERE {} ORDER BY {}",
        select,
        conditions.join(" AND "),
        variant.order_by
    )
}
