use serde_json::{json, Map, Value};

use super::{list_variables, ListOptions};

pub const LIST_TEAMS_QUERY: &str = r#"
query Teams($filter: TeamFilter, $first: Int, $includeArchived: Boolean, $orderBy: PaginationOrderBy) {
    teams(filter: $filter, first: $first, includeArchived: $includeArchived, orderBy: $orderBy) {
        nodes {
            id
            name
            key
            description
            color
            icon
            private
            archivedAt
            createdAt
            updatedAt
            cyclesEnabled
            members {
                nodes {
                    id
                    name
                }
            }
            issues {
                nodes {
                    id
                }
            }
            projects {
                nodes {
                    id
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

pub const GET_TEAM_QUERY: &str = r#"
query Team($id: String!) {
    team(id: $id) {
        id
        name
        key
        description
        color
        icon
        private
        archivedAt
        createdAt
        updatedAt
        cyclesEnabled
        timezone
        organization {
            name
        }
        members {
            nodes {
                id
                name
                email
            }
        }
        issues(first: 50, filter: { state: { type: { in: ["started", "unstarted"] } } }) {
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
        projects(first: 20) {
            nodes {
                id
                name
                state
                progress
                lead {
                    id
                    name
                }
            }
        }
        states {
            nodes {
                id
                name
                type
                color
            }
        }
        labels {
            nodes {
                id
                name
                color
            }
        }
    }
}
"#;

pub fn list_variables_for(options: &ListOptions) -> Value {
    list_variables(Map::new(), options)
}

/// `team(id:)` accepts an id or a key; keys are stored upper case.
pub fn get_variables(id: &str) -> Value {
    let id = id.trim();
    if super::issues::looks_like_id(id) {
        json!({ "id": id })
    } else {
        json!({ "id": id.to_uppercase() })
    }
}
