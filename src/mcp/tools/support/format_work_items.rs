use crate::azure::models::{Comment, WorkItem};
use crate::mcp::tools::support::html_to_text;
use crate::mcp::tools::support::wiql_builder::{
    FIELD_ACCEPTANCE_CRITERIA, FIELD_AREA_PATH, FIELD_ASSIGNED_TO, FIELD_CHANGED_DATE,
    FIELD_CREATED_DATE, FIELD_DESCRIPTION, FIELD_ITERATION_PATH, FIELD_PRIORITY, FIELD_SEVERITY,
    FIELD_STATE, FIELD_TAGS, FIELD_TITLE, FIELD_WORK_ITEM_TYPE,
};
use std::fmt::Write;

pub const DESCRIPTION_MAX_CHARS: usize = 150;
pub const ELLIPSIS: &str = "...";
pub const NO_WORK_ITEMS_FOUND: &str = "No work items found.";

const API_ITEM_PATH: &str = "_apis/wit/workItems/";
const WEB_ITEM_PATH: &str = "_workitems/edit/";
const INDENT: &str = "   ";

/// Position of a listed window inside the full result set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Window {
    pub skip: usize,
    pub total: usize,
}

/// A fetched work item plus its discussion, when the comment fetch succeeded.
#[derive(Debug, Clone)]
pub struct WorkItemDetails {
    pub work_item: WorkItem,
    pub comments: Option<Vec<Comment>>,
}

/// Cut `text` to `max_chars` characters, appending an ellipsis only when something was cut.
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}{}", &text[..byte_idx], ELLIPSIS),
        None => text.to_string(),
    }
}

/// Turn a REST resource URL into the work item's page in the web UI.
pub fn to_web_url(api_url: &str) -> String {
    api_url.replace(API_ITEM_PATH, WEB_ITEM_PATH)
}

fn one_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn push_line(out: &mut String, label: &str, value: Option<String>) {
    if let Some(value) = value {
        let _ = writeln!(out, "{}{}: {}", INDENT, label, value);
    }
}

fn push_summary_lines(out: &mut String, item: &WorkItem) {
    let _ = writeln!(out, "{}ID: {}", INDENT, item.id);
    push_line(out, "Type", item.field_display(FIELD_WORK_ITEM_TYPE));
    push_line(out, "State", item.field_display(FIELD_STATE));
    push_line(out, "Assigned To", item.field_display(FIELD_ASSIGNED_TO));
    push_line(out, "Priority", item.field_display(FIELD_PRIORITY));
    push_line(out, "Severity", item.field_display(FIELD_SEVERITY));
    push_line(out, "Created", item.field_display(FIELD_CREATED_DATE));
    push_line(out, "Changed", item.field_display(FIELD_CHANGED_DATE));
}

fn title(item: &WorkItem) -> &str {
    item.field_str(FIELD_TITLE).unwrap_or("(untitled)")
}

fn rich_text(item: &WorkItem, field: &str) -> Option<String> {
    item.field_str(field)
        .map(html_to_text)
        .map(|text| text.trim_end().to_string())
        .filter(|text| !text.is_empty())
}

fn push_block(out: &mut String, label: &str, text: Option<String>) {
    if let Some(text) = text {
        let _ = writeln!(out, "{}{}:", INDENT, label);
        for line in text.lines() {
            let _ = writeln!(out, "{}{}{}", INDENT, INDENT, line);
        }
    }
}

/// Render a numbered list of work items, followed by the pagination hint.
pub fn format_work_item_list(header: &str, items: &[WorkItem], window: Window) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", header);

    for (idx, item) in items.iter().enumerate() {
        let _ = writeln!(out, "\n{}. {}", idx + 1, title(item));
        push_summary_lines(&mut out, item);
        push_line(&mut out, "Iteration", item.field_display(FIELD_ITERATION_PATH));
        push_line(&mut out, "Tags", item.field_display(FIELD_TAGS));
        push_line(
            &mut out,
            "Description",
            rich_text(item, FIELD_DESCRIPTION)
                .map(|text| truncate_text(&one_line(&text), DESCRIPTION_MAX_CHARS)),
        );
        push_line(&mut out, "URL", item.url.as_deref().map(to_web_url));
    }

    let _ = write!(out, "\n{}", pagination_hint(items.len(), window));
    out
}

fn pagination_hint(shown: usize, window: Window) -> String {
    let first = window.skip + 1;
    let last = window.skip + shown;
    if last < window.total {
        format!(
            "Showing items {}-{} of {}. Use skip={} to see more.",
            first, last, window.total, last
        )
    } else {
        format!("Showing items {}-{} of {}.", first, last, window.total)
    }
}

/// Render the detailed view, including rich-text fields and discussion.
pub fn format_work_item_details(details: &[WorkItemDetails]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Work item details ({}):", details.len());

    for (idx, detail) in details.iter().enumerate() {
        let item = &detail.work_item;
        let _ = writeln!(out, "\n{}. {}", idx + 1, title(item));
        push_summary_lines(&mut out, item);
        push_line(&mut out, "Area", item.field_display(FIELD_AREA_PATH));
        push_line(&mut out, "Iteration", item.field_display(FIELD_ITERATION_PATH));
        push_line(&mut out, "Tags", item.field_display(FIELD_TAGS));
        push_line(&mut out, "URL", item.url.as_deref().map(to_web_url));
        push_block(&mut out, "Description", rich_text(item, FIELD_DESCRIPTION));
        push_block(
            &mut out,
            "Acceptance Criteria",
            rich_text(item, FIELD_ACCEPTANCE_CRITERIA),
        );

        if let Some(comments) = &detail.comments {
            push_discussion(&mut out, comments);
        }
    }

    out
}

fn push_discussion(out: &mut String, comments: &[Comment]) {
    if comments.is_empty() {
        let _ = writeln!(out, "{}Discussion: no comments", INDENT);
        return;
    }

    let _ = writeln!(out, "{}Discussion ({} comments):", INDENT, comments.len());
    for comment in comments {
        let author = comment
            .created_by
            .as_ref()
            .map(|c| c.display_name.as_str())
            .filter(|name| !name.is_empty())
            .unwrap_or("Unknown");
        let text = comment
            .text
            .as_deref()
            .map(html_to_text)
            .map(|text| one_line(&text))
            .unwrap_or_default();
        match comment.created_date.as_deref() {
            Some(date) => {
                let _ = writeln!(out, "{}{}- {} ({}): {}", INDENT, INDENT, author, date, text);
            }
            None => {
                let _ = writeln!(out, "{}{}- {}: {}", INDENT, INDENT, author, text);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn item(value: serde_json::Value) -> WorkItem {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_truncate_long_text() {
        let text = "x".repeat(200);
        let truncated = truncate_text(&text, DESCRIPTION_MAX_CHARS);
        assert_eq!(truncated, format!("{}...", "x".repeat(150)));
    }

    #[test]
    fn test_truncate_boundary_unmodified() {
        let exact = "y".repeat(150);
        assert_eq!(truncate_text(&exact, DESCRIPTION_MAX_CHARS), exact);
        assert_eq!(truncate_text("short", DESCRIPTION_MAX_CHARS), "short");
    }

    #[test]
    fn test_truncate_counts_characters_not_bytes() {
        let text = "é".repeat(151);
        let truncated = truncate_text(&text, DESCRIPTION_MAX_CHARS);
        assert_eq!(truncated, format!("{}...", "é".repeat(150)));
    }

    #[test]
    fn test_web_url_rewrite() {
        assert_eq!(
            to_web_url("https://dev.azure.com/contoso/P1/_apis/wit/workItems/12"),
            "https://dev.azure.com/contoso/P1/_workitems/edit/12"
        );
        assert_eq!(
            to_web_url("https://example.com/other"),
            "https://example.com/other"
        );
    }

    #[test]
    fn test_list_block_omits_absent_fields() {
        let items = vec![item(json!({
            "id": 12,
            "url": "https://dev.azure.com/contoso/P1/_apis/wit/workItems/12",
            "fields": {
                "System.Title": "Fix login",
                "System.State": "Active",
                "System.AssignedTo": { "displayName": "Jane Doe", "uniqueName": "jane@contoso.com" },
                "System.Description": format!("<p>{}</p>", "d".repeat(200)),
                "Microsoft.VSTS.Common.Priority": 1
            }
        }))];

        let out = format_work_item_list("Found 1 work item(s):", &items, Window { skip: 0, total: 1 });

        assert!(out.starts_with("Found 1 work item(s):\n\n1. Fix login\n"));
        assert!(out.contains("   ID: 12\n"));
        assert!(out.contains("   State: Active\n"));
        assert!(out.contains("   Assigned To: Jane Doe <jane@contoso.com>\n"));
        assert!(out.contains("   Priority: 1\n"));
        assert!(out.contains(&format!("   Description: {}...\n", "d".repeat(150))));
        assert!(out.contains("   URL: https://dev.azure.com/contoso/P1/_workitems/edit/12\n"));
        assert!(!out.contains("Severity"));
        assert!(!out.contains("Tags"));
        assert!(!out.contains("Created"));
        assert!(out.ends_with("Showing items 1-1 of 1."));
    }

    #[test]
    fn test_list_numbering_and_more_hint() {
        let items = vec![
            item(json!({ "id": 1, "fields": { "System.Title": "A" } })),
            item(json!({ "id": 2, "fields": { "System.Title": "B" } })),
        ];

        let out = format_work_item_list("Found 7 work item(s):", &items, Window { skip: 2, total: 7 });

        assert!(out.contains("\n1. A\n"));
        assert!(out.contains("\n2. B\n"));
        assert!(out.ends_with("Showing items 3-4 of 7. Use skip=4 to see more."));
    }

    #[test]
    fn test_details_render_rich_text_and_discussion() {
        let details = vec![
            WorkItemDetails {
                work_item: item(json!({
                    "id": 12,
                    "fields": {
                        "System.Title": "Fix login",
                        "System.Description": "<p>Line one</p><p>Line two</p>",
                        "Microsoft.VSTS.Common.AcceptanceCriteria": "<ul><li>Works</li></ul>"
                    }
                })),
                comments: Some(vec![Comment {
                    id: 1,
                    text: Some("<p>Looks good</p>".to_string()),
                    created_by: Some(crate::azure::models::IdentityRef {
                        display_name: "Jane Doe".to_string(),
                        unique_name: None,
                    }),
                    created_date: Some("2024-05-02T09:00:00Z".to_string()),
                }]),
            },
            WorkItemDetails {
                work_item: item(json!({ "id": 13, "fields": { "System.Title": "Other" } })),
                comments: None,
            },
        ];

        let out = format_work_item_details(&details);

        assert!(out.starts_with("Work item details (2):\n"));
        assert!(out.contains("   Description:\n      Line one\n      Line two\n"));
        assert!(out.contains("   Acceptance Criteria:\n      • Works\n"));
        assert!(out.contains("   Discussion (1 comments):\n      - Jane Doe (2024-05-02T09:00:00Z): Looks good\n"));
        let second = out.split("\n2. Other\n").nth(1).unwrap();
        assert!(!second.contains("Discussion"));
    }
}
