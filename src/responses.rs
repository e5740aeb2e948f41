//! Shared GraphQL response types used across commands.

use serde::{Deserialize, Deserializer};

use crate::types::{Cycle, Issue, Label, Project, Team, User};

/// Pagination info for cursor-based pagination.
#[derive(Deserialize, Debug, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct PageInfo {
    pub has_next_page: bool,
    pub end_cursor: Option<String>,
}

/// A `{nodes, pageInfo}` connection wrapper.
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Connection<T> {
    #[serde(default = "Vec::new")]
    pub nodes: Vec<T>,
    #[serde(default)]
    pub page_info: PageInfo,
}

impl<T> Default for Connection<T> {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            page_info: PageInfo::default(),
        }
    }
}

/// Flatten an optional connection into its nodes.
///
/// Use with `#[serde(default, deserialize_with = "nodes")]`: an absent or
/// `null` wrapper and a wrapper without `nodes` all become an empty list.
pub fn nodes<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let connection = Option::<Connection<T>>::deserialize(deserializer)?;
    Ok(connection.map(|c| c.nodes).unwrap_or_default())
}

/// Treat an explicit `null` like a missing field.
pub fn default_on_null<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Like [`nodes`] but keeps the page info; a `null` connection is empty.
pub fn connection<'de, D, T>(deserializer: D) -> Result<Connection<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Connection<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Deserialize)]
pub struct IssuesResponse {
    #[serde(default, deserialize_with = "connection")]
    pub issues: Connection<Issue>,
}

#[derive(Deserialize)]
pub struct IssueResponse {
    pub issue: Option<Issue>,
}

#[derive(Deserialize)]
pub struct ProjectsResponse {
    #[serde(default, deserialize_with = "connection")]
    pub projects: Connection<Project>,
}

#[derive(Deserialize)]
pub struct ProjectResponse {
    pub project: Option<Project>,
}

#[derive(Deserialize)]
pub struct TeamsResponse {
    #[serde(default, deserialize_with = "connection")]
    pub teams: Connection<Team>,
}

#[derive(Deserialize)]
pub struct TeamResponse {
    pub team: Option<Team>,
}

#[derive(Deserialize)]
pub struct CyclesResponse {
    #[serde(default, deserialize_with = "connection")]
    pub cycles: Connection<Cycle>,
}

#[derive(Deserialize)]
pub struct CycleResponse {
    pub cycle: Option<Cycle>,
}

#[derive(Deserialize)]
pub struct UsersResponse {
    #[serde(default, deserialize_with = "connection")]
    pub users: Connection<User>,
}

#[derive(Deserialize)]
pub struct UserResponse {
    pub user: Option<User>,
}

/// Viewer (current user) response.
#[derive(Deserialize)]
pub struct ViewerResponse {
    pub viewer: Option<User>,
}

#[derive(Deserialize)]
pub struct LabelsResponse {
    #[serde(rename = "issueLabels", default, deserialize_with = "connection")]
    pub issue_labels: Connection<Label>,
}

/// Minimal issue info returned after an update.
#[derive(Deserialize)]
pub struct UpdatedIssue {
    pub identifier: String,
    pub title: String,
}

#[derive(Deserialize)]
pub struct UpdateIssueResponse {
    #[serde(rename = "issueUpdate")]
    pub issue_update: IssueUpdateResult,
}

#[derive(Deserialize)]
pub struct IssueUpdateResult {
    pub success: bool,
    pub issue: Option<UpdatedIssue>,
}
