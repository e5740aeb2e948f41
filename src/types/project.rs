use serde::{Deserialize, Serialize};

use super::{IssueSummary, TeamRef, UserRef};
use crate::responses::nodes;

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    pub description: String,
    pub state: String,
    pub progress: f64,
    pub start_date: Option<String>,
    pub target_date: Option<String>,
    pub completed_at: Option<String>,
    pub canceled_at: Option<String>,
    pub url: String,
    pub created_at: String,
    pub updated_at: String,
    pub archived_at: Option<String>,
    pub color: Option<String>,
    pub icon: Option<String>,
    pub slug_id: Option<String>,
    pub lead: Option<UserRef>,
    pub creator: Option<UserRef>,
    #[serde(deserialize_with = "nodes")]
    pub teams: Vec<TeamRef>,
    #[serde(deserialize_with = "nodes")]
    pub members: Vec<UserRef>,
    #[serde(deserialize_with = "nodes")]
    pub issues: Vec<IssueSummary>,
}

impl Project {
    /// State in title case (`started` -> `Started`).
    pub fn state_title(&self) -> String {
        let mut chars = self.state.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

/// A project embedded in an issue.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct ProjectRef {
    pub id: String,
    pub name: String,
    pub url: String,
}
