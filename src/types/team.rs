use serde::{Deserialize, Serialize};

use super::{IssueSummary, Label, Project, UserRef, WorkflowState};
use crate::responses::nodes;

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(default)]
pub struct Organization {
    pub name: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct Team {
    pub id: String,
    pub name: String,
    pub key: String,
    pub description: Option<String>,
    pub color: Option<String>,
    pub icon: Option<String>,
    pub private: bool,
    pub cycles_enabled: bool,
    pub timezone: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    pub archived_at: Option<String>,
    pub organization: Option<Organization>,
    #[serde(deserialize_with = "nodes")]
    pub members: Vec<UserRef>,
    #[serde(deserialize_with = "nodes")]
    pub issues: Vec<IssueSummary>,
    #[serde(deserialize_with = "nodes")]
    pub projects: Vec<Project>,
    #[serde(deserialize_with = "nodes")]
    pub states: Vec<WorkflowState>,
    #[serde(deserialize_with = "nodes")]
    pub labels: Vec<Label>,
}

/// A team embedded in another record.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct TeamRef {
    pub id: String,
    pub key: String,
    pub name: String,
}

impl TeamRef {
    pub fn is_empty(&self) -> bool {
        self.key.is_empty() && self.name.is_empty()
    }

    /// `Name (KEY)`
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.key)
    }
}
