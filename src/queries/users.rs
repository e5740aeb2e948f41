use serde_json::{json, Value};

use super::{page_size, ListOptions};

const USER_FIELDS: &str = r#"
            id
            name
            displayName
            email
            active
            admin
            timezone
            description
            statusLabel
            statusEmoji
            statusUntilAt
            createdAt
            updatedAt
            organization {
                name
            }
"#;

pub fn list_users_query() -> String {
    format!(
        r#"
query Users($first: Int, $includeDisabled: Boolean, $includeArchived: Boolean) {{
    users(first: $first, includeDisabled: $includeDisabled, includeArchived: $includeArchived) {{
        nodes {{{USER_FIELDS}        }}
        pageInfo {{
            hasNextPage
            endCursor
        }}
    }}
}}
"#
    )
}

pub fn get_user_query() -> String {
    format!(
        r#"
query User($id: String!) {{
    user(id: $id) {{{USER_FIELDS}    }}
}}
"#
    )
}

pub fn viewer_query() -> String {
    format!(
        r#"
query Viewer {{
    viewer {{{USER_FIELDS}    }}
}}
"#
    )
}

pub fn list_variables_for(include_disabled: bool, options: &ListOptions) -> Value {
    json!({
        "first": page_size(options.limit),
        "includeDisabled": include_disabled,
        "includeArchived": options.include_archived,
    })
}
