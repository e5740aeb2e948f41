use std::sync::LazyLock;

use regex::Regex;
use serde_json::{json, Map, Value};

use super::{list_variables, non_empty, team_match, ListOptions};

const ISSUE_LIST_FIELDS: &str = r#"
            nodes {
                id
                identifier
                title
                description
                priority
                priorityLabel
                url
                createdAt
                updatedAt
                completedAt
                state {
                    name
                    type
                }
                assignee {
                    id
                    name
                    email
                }
                project {
                    id
                    name
                }
                team {
                    id
                    key
                    name
                }
                cycle {
                    id
                    number
                    name
                }
                labels {
                    nodes {
                        name
                    }
                }
            }
            pageInfo {
                hasNextPage
                endCursor
            }
"#;

/// Shared by `issues list` and `issues search`; only the filter differs.
pub fn list_issues_query() -> String {
    format!(
        r#"
query Issues($filter: IssueFilter, $first: Int, $includeArchived: Boolean, $orderBy: PaginationOrderBy) {{
    issues(filter: $filter, first: $first, includeArchived: $includeArchived, orderBy: $orderBy) {{{ISSUE_LIST_FIELDS}    }}
}}
"#
    )
}

pub const GET_ISSUE_QUERY: &str = r#"
query Issue($id: String!) {
    issue(id: $id) {
        id
        identifier
        title
        description
        priority
        priorityLabel
        url
        createdAt
        updatedAt
        completedAt
        dueDate
        estimate
        state {
            name
            type
            color
        }
        assignee {
            id
            name
            email
        }
        creator {
            id
            name
            email
        }
        project {
            id
            name
            url
        }
        team {
            id
            key
            name
        }
        cycle {
            id
            number
            name
        }
        parent {
            id
            identifier
            title
        }
        labels {
            nodes {
                id
                name
                color
            }
        }
        comments {
            nodes {
                id
                body
                createdAt
                user {
                    id
                    name
                }
            }
        }
        attachments {
            nodes {
                id
                title
                subtitle
                url
                createdAt
            }
        }
        subscribers {
            nodes {
                id
                name
            }
        }
    }
}
"#;

pub const UPDATE_ISSUE_MUTATION: &str = r#"
mutation UpdateIssue($id: String!, $input: IssueUpdateInput!) {
    issueUpdate(id: $id, input: $input) {
        success
        issue {
            id
            identifier
            title
        }
    }
}
"#;

/// Structured filters for `issues list`.
#[derive(Debug, Clone, Default)]
pub struct IssueFilter {
    /// Assignee email, or `me` for the authenticated user.
    pub assignee: Option<String>,
    /// Project id or name fragment.
    pub project: Option<String>,
    /// Workflow state name.
    pub status: Option<String>,
    /// Team key or name fragment.
    pub team: Option<String>,
    pub priority: Option<i32>,
    pub labels: Vec<String>,
}

impl IssueFilter {
    pub fn to_graphql(&self) -> Map<String, Value> {
        let mut filter = Map::new();

        if let Some(assignee) = non_empty(&self.assignee) {
            let matcher = if assignee.eq_ignore_ascii_case("me") {
                json!({ "isMe": { "eq": true } })
            } else {
                json!({ "email": { "eq": assignee } })
            };
            filter.insert("assignee".to_string(), matcher);
        }

        if let Some(project) = non_empty(&self.project) {
            filter.insert("project".to_string(), project_match(project));
        }

        if let Some(status) = non_empty(&self.status) {
            filter.insert(
                "state".to_string(),
                json!({ "name": { "eqIgnoreCase": status } }),
            );
        }

        if let Some(team) = non_empty(&self.team) {
            filter.insert("team".to_string(), team_match(team));
        }

        if let Some(priority) = self.priority {
            filter.insert("priority".to_string(), json!({ "eq": priority }));
        }

        let labels: Vec<&str> = self
            .labels
            .iter()
            .map(|l| l.trim())
            .filter(|l| !l.is_empty())
            .collect();
        if !labels.is_empty() {
            filter.insert("labels".to_string(), json!({ "name": { "in": labels } }));
        }

        filter
    }
}

/// Whether a project argument looks like an opaque id rather than a name.
///
/// Known limitation: any 36-character name containing a hyphen is treated as an id.
pub fn looks_like_id(value: &str) -> bool {
    value.chars().count() == 36 && value.contains('-')
}

fn project_match(project: &str) -> Value {
    if looks_like_id(project) {
        json!({ "id": { "eq": project } })
    } else {
        json!({ "name": { "contains": project } })
    }
}

pub fn list_variables_for(filter: &IssueFilter, options: &ListOptions) -> Value {
    list_variables(filter.to_graphql(), options)
}

/// Title search ignores the structured filters.
pub fn search_variables(query: &str, options: &ListOptions) -> Value {
    let mut filter = Map::new();
    filter.insert(
        "title".to_string(),
        json!({ "containsIgnoreCase": query }),
    );
    list_variables(filter, options)
}

static IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z][A-Za-z0-9_]*)-(\d+)$").expect("valid regex"));

/// Upper-case the team key of a human identifier (`eng-12` -> `ENG-12`); ids pass through.
pub fn normalize_identifier(id: &str) -> String {
    let id = id.trim();
    match IDENTIFIER.captures(id) {
        Some(caps) => format!("{}-{}", caps[1].to_uppercase(), &caps[2]),
        None => id.to_string(),
    }
}

pub fn get_variables(id: &str) -> Value {
    json!({ "id": normalize_identifier(id) })
}
