use serde_json::{json, Map, Value};

use super::{list_variables, non_empty, team_match, ListOptions};

const CYCLE_FIELDS: &str = r#"
            id
            number
            name
            description
            startsAt
            endsAt
            completedAt
            createdAt
            updatedAt
            archivedAt
            progress
            isActive
            isFuture
            isPast
            isNext
            isPrevious
            team {
                id
                key
                name
            }
"#;

pub fn list_cycles_query() -> String {
    format!(
        r#"
query Cycles($filter: CycleFilter, $first: Int, $includeArchived: Boolean, $orderBy: PaginationOrderBy) {{
    cycles(filter: $filter, first: $first, includeArchived: $includeArchived, orderBy: $orderBy) {{
        nodes {{{CYCLE_FIELDS}        }}
        pageInfo {{
            hasNextPage
            endCursor
        }}
    }}
}}
"#
    )
}

pub fn get_cycle_query() -> String {
    format!(
        r#"
query Cycle($id: String!) {{
    cycle(id: $id) {{{CYCLE_FIELDS}        scopeHistory
        issueCountHistory
    }}
}}
"#
    )
}

#[derive(Debug, Clone, Default)]
pub struct CycleFilter {
    pub team: Option<String>,
    pub active: bool,
    pub future: bool,
    pub past: bool,
}

impl CycleFilter {
    pub fn to_graphql(&self) -> Map<String, Value> {
        let mut filter = Map::new();

        if let Some(team) = non_empty(&self.team) {
            filter.insert("team".to_string(), team_match(team));
        }
        if self.active {
            filter.insert("isActive".to_string(), json!({ "eq": true }));
        }
        if self.future {
            filter.insert("isFuture".to_string(), json!({ "eq": true }));
        }
        if self.past {
            filter.insert("isPast".to_string(), json!({ "eq": true }));
        }

        filter
    }
}

pub fn list_variables_for(filter: &CycleFilter, options: &ListOptions) -> Value {
    list_variables(filter.to_graphql(), options)
}
