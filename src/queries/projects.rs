use serde_json::{json, Map, Value};

use super::{list_variables, non_empty, ListOptions};

pub const LIST_PROJECTS_QUERY: &str = r#"
query Projects($filter: ProjectFilter, $first: Int, $includeArchived: Boolean, $orderBy: PaginationOrderBy) {
    projects(filter: $filter, first: $first, includeArchived: $includeArchived, orderBy: $orderBy) {
        nodes {
            id
            name
            description
            state
            progress
            startDate
            targetDate
            url
            createdAt
            updatedAt
            archivedAt
            color
            icon
            lead {
                id
                name
                email
            }
            teams {
                nodes {
                    id
                    key
                    name
                }
            }
        }
        pageInfo {
            hasNextPage
            endCursor
        }
    }
}
"#;

pub const GET_PROJECT_QUERY: &str = r#"
query Project($id: String!) {
    project(id: $id) {
        id
        name
        description
        state
        progress
        startDate
        targetDate
        completedAt
        canceledAt
        url
        createdAt
        updatedAt
        archivedAt
        color
        icon
        slugId
        lead {
            id
            name
            email
        }
        creator {
            id
            name
            email
        }
        teams {
            nodes {
                id
                key
                name
            }
        }
        members {
            nodes {
                id
                name
                email
            }
        }
        issues(first: 50) {
            nodes {
                id
                identifier
                title
                state {
                    name
                    type
                }
                priority
                priorityLabel
                assignee {
                    id
                    name
                }
            }
        }
    }
}
"#;

#[derive(Debug, Clone, Default)]
pub struct ProjectFilter {
    /// planned, started, paused, completed or canceled.
    pub state: Option<String>,
    pub team: Option<String>,
}

impl ProjectFilter {
    pub fn to_graphql(&self) -> Map<String, Value> {
        let mut filter = Map::new();

        if let Some(state) = non_empty(&self.state) {
            filter.insert("state".to_string(), json!({ "eqIgnoreCase": state }));
        }

        if let Some(team) = non_empty(&self.team) {
            filter.insert(
                "or".to_string(),
                json!([
                    { "teams": { "some": { "key": { "eqIgnoreCase": team } } } },
                    { "teams": { "some": { "name": { "containsIgnoreCase": team } } } }
                ]),
            );
        }

        filter
    }
}

pub fn list_variables_for(filter: &ProjectFilter, options: &ListOptions) -> Value {
    // Projects have no priority ordering.
    let options = ListOptions {
        sort: match options.sort.as_str() {
            "created" => "created".to_string(),
            _ => "updated".to_string(),
        },
        ..options.clone()
    };
    list_variables(filter.to_graphql(), &options)
}
