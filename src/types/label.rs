use serde::{Deserialize, Serialize};

use super::TeamRef;

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Label {
    pub id: String,
    pub name: String,
    pub color: String,
    pub description: Option<String>,
    /// Workspace labels have no team.
    pub team: Option<TeamRef>,
    /// Group label this label belongs to, by reference only.
    pub parent: Option<LabelRef>,
}

impl Label {
    pub fn team_name(&self) -> &str {
        self.team.as_ref().map_or("Workspace", |t| t.name.as_str())
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct LabelRef {
    pub id: String,
    pub name: String,
}
