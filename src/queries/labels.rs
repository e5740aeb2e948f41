use serde_json::{Map, Value};

use super::{list_variables, non_empty, team_match, ListOptions};

pub const LIST_LABELS_QUERY: &str = r#"
query Labels($filter: IssueLabelFilter, $first: Int, $includeArchived: Boolean, $orderBy: PaginationOrderBy) {
    issueLabels(filter: $filter, first: $first, includeArchived: $includeArchived, orderBy: $orderBy) {
        nodes {
            id
            name
            color
            description
            team {
                id
                key
                name
            }
            parent {
                id
                name
            }
        }
        pageInfo {
            hasNextPage
            endCursor
        }
    }
}
"#;

pub fn list_variables_for(team: &Option<String>, options: &ListOptions) -> Value {
    let mut filter = Map::new();
    if let Some(team) = non_empty(team) {
        filter.insert("team".to_string(), team_match(team));
    }
    list_variables(filter, options)
}
