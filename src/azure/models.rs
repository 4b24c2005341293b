use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// One page of an upstream listing.
///
/// `continuation_token` is forwarded verbatim from the `x-ms-continuationtoken`
/// response header and never interpreted.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub count: usize,
    pub continuation_token: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResponse<T> {
    #[serde(default)]
    pub count: u32,
    pub value: Vec<T>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkItem {
    pub id: u32,
    #[serde(default)]
    pub fields: HashMap<String, Value>,
    #[serde(default)]
    pub url: Option<String>,
}

impl WorkItem {
    /// String value of a field; empty strings count as absent.
    pub fn field_str(&self, name: &str) -> Option<&str> {
        match self.fields.get(name) {
            Some(Value::String(s)) if !s.trim().is_empty() => Some(s.as_str()),
            _ => None,
        }
    }

    /// Field rendered as display text, covering strings, numbers and identities.
    pub fn field_display(&self, name: &str) -> Option<String> {
        match self.fields.get(name)? {
            Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Object(_) => self.identity(name).map(|identity| identity.to_string()),
            _ => None,
        }
    }

    pub fn identity(&self, name: &str) -> Option<IdentityRef> {
        self.fields
            .get(name)
            .and_then(|v| serde_json::from_value::<IdentityRef>(v.clone()).ok())
            .filter(|identity| !identity.display_name.is_empty())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct IdentityRef {
    #[serde(rename = "displayName", default)]
    pub display_name: String,
    #[serde(rename = "uniqueName", default)]
    pub unique_name: Option<String>,
}

impl std::fmt::Display for IdentityRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.unique_name.as_deref() {
            Some(unique_name) if !unique_name.is_empty() && unique_name != self.display_name => {
                write!(f, "{} <{}>", self.display_name, unique_name)
            }
            _ => write!(f, "{}", self.display_name),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WiqlQuery {
    pub query: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WiqlResponse {
    #[serde(rename = "workItems", default)]
    pub work_items: Vec<WorkItemReference>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkItemReference {
    pub id: u32,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: u32,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(rename = "createdBy", default)]
    pub created_by: Option<IdentityRef>,
    #[serde(rename = "createdDate", default)]
    pub created_date: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CommentListResponse {
    #[serde(default)]
    pub comments: Vec<Comment>,
    #[serde(rename = "totalCount", default)]
    pub total_count: Option<u32>,
}
