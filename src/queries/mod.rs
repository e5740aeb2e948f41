//! GraphQL documents and variable builders, one module per resource kind.
//!
//! Builders are pure: they turn optional CLI parameters into the `variables`
//! object sent next to a fixed document. A parameter that is absent or empty
//! never produces a key.

pub mod cycles;
pub mod issues;
pub mod labels;
pub mod projects;
pub mod teams;
pub mod users;

use serde_json::{json, Map, Value};

/// Largest page the API will return.
pub const MAX_PAGE_SIZE: u32 = 250;

/// Paging and ordering shared by every list query.
#[derive(Debug, Clone)]
pub struct ListOptions {
    pub limit: u32,
    pub include_archived: bool,
    pub sort: String,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            limit: 50,
            include_archived: false,
            sort: "updated".to_string(),
        }
    }
}

/// Requested page size. Only one page is ever fetched.
pub fn page_size(limit: u32) -> u32 {
    limit.min(MAX_PAGE_SIZE)
}

/// Map a sort key to the `PaginationOrderBy` value; unknown keys sort by update time.
pub fn order_by(sort: &str) -> &'static str {
    match sort {
        "created" => "createdAt",
        "priority" => "priority",
        _ => "updatedAt",
    }
}

/// Treat `Some("")` and whitespace-only input like a missing flag.
pub(crate) fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Match a team by key (case-insensitive) or by name substring (case-insensitive).
pub(crate) fn team_match(team: &str) -> Value {
    json!({
        "or": [
            { "key": { "eqIgnoreCase": team } },
            { "name": { "containsIgnoreCase": team } }
        ]
    })
}

/// Standard list variables. An empty filter is sent as `null`.
pub(crate) fn list_variables(filter: Map<String, Value>, options: &ListOptions) -> Value {
    json!({
        "filter": if filter.is_empty() { Value::Null } else { Value::Object(filter) },
        "first": page_size(options.limit),
        "includeArchived": options.include_archived,
        "orderBy": order_by(&options.sort),
    })
}
