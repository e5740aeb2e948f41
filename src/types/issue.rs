use serde::{Deserialize, Serialize};

use super::{Attachment, CycleRef, Label, Priority, ProjectRef, TeamRef, UserRef};
use crate::responses::{default_on_null, nodes};

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct Issue {
    pub id: String,
    pub identifier: String,
    pub title: String,
    pub description: Option<String>,
    pub priority: Priority,
    pub priority_label: String,
    pub url: String,
    pub created_at: String,
    pub updated_at: String,
    pub completed_at: Option<String>,
    pub due_date: Option<String>,
    pub estimate: Option<f64>,
    #[serde(deserialize_with = "default_on_null")]
    pub state: WorkflowState,
    pub assignee: Option<UserRef>,
    pub creator: Option<UserRef>,
    pub project: Option<ProjectRef>,
    #[serde(deserialize_with = "default_on_null")]
    pub team: TeamRef,
    pub cycle: Option<CycleRef>,
    pub parent: Option<IssueRef>,
    #[serde(deserialize_with = "nodes")]
    pub labels: Vec<Label>,
    #[serde(deserialize_with = "nodes")]
    pub comments: Vec<Comment>,
    #[serde(deserialize_with = "nodes")]
    pub attachments: Vec<Attachment>,
    #[serde(deserialize_with = "nodes")]
    pub subscribers: Vec<UserRef>,
}

impl Issue {
    /// The server's priority label, or ours when it was not fetched.
    pub fn priority_text(&self) -> &str {
        if self.priority_label.is_empty() {
            self.priority.label()
        } else {
            &self.priority_label
        }
    }

    pub fn assignee_name(&self) -> &str {
        self.assignee
            .as_ref()
            .map_or("Unassigned", |user| user.name.as_str())
    }

    pub fn label_names(&self) -> Vec<&str> {
        self.labels.iter().map(|label| label.name.as_str()).collect()
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct WorkflowState {
    pub id: String,
    pub name: String,
    /// One of backlog, unstarted, started, completed, canceled (or triage).
    #[serde(rename = "type")]
    pub state_type: String,
    pub color: Option<String>,
}

/// Back-reference to a parent issue. Resolved by lookup, never embedded.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct IssueRef {
    pub id: String,
    pub identifier: String,
    pub title: String,
}

/// Short issue row nested under projects and teams.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct IssueSummary {
    pub id: String,
    pub identifier: String,
    pub title: String,
    #[serde(deserialize_with = "default_on_null")]
    pub state: WorkflowState,
    pub priority: Priority,
    pub priority_label: String,
    pub assignee: Option<UserRef>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub body: String,
    pub created_at: String,
    pub user: Option<UserRef>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn maps_full_issue() {
        let issue: Issue = serde_json::from_value(json!({
            "id": "i1",
            "identifier": "ENG-123",
            "title": "Fix login",
            "priority": 1,
            "priorityLabel": "Urgent",
            "url": "https://linear.app/acme/issue/ENG-123",
            "createdAt": "2024-01-02T10:00:00.000Z",
            "updatedAt": "2024-01-03T10:00:00.000Z",
            "state": { "name": "In Progress", "type": "started" },
            "assignee": { "name": "Ada", "email": "ada@example.com" },
            "team": { "key": "ENG", "name": "Engineering" },
            "parent": { "identifier": "ENG-100", "title": "Auth epic" },
            "labels": { "nodes": [{ "name": "bug" }, { "name": "auth" }] }
        }))
        .unwrap();

        assert_eq!(issue.identifier, "ENG-123");
        assert_eq!(issue.priority, Priority::Urgent);
        assert_eq!(issue.state.state_type, "started");
        assert_eq!(issue.assignee_name(), "Ada");
        assert_eq!(issue.team.key, "ENG");
        assert_eq!(issue.parent.as_ref().unwrap().identifier, "ENG-100");
        assert_eq!(issue.label_names(), vec!["bug", "auth"]);
        assert!(issue.comments.is_empty());
    }

    #[test]
    fn missing_optional_objects_default() {
        let issue: Issue = serde_json::from_value(json!({
            "identifier": "ENG-1",
            "assignee": null,
            "project": null,
            "cycle": null,
            "parent": null,
            "labels": null
        }))
        .unwrap();

        assert!(issue.assignee.is_none());
        assert!(issue.project.is_none());
        assert!(issue.cycle.is_none());
        assert!(issue.parent.is_none());
        assert!(issue.labels.is_empty());
        assert_eq!(issue.title, "");
        assert_eq!(issue.priority, Priority::None);
        assert_eq!(issue.assignee_name(), "Unassigned");
        assert_eq!(issue.priority_text(), "No priority");
    }

    #[test]
    fn json_uses_wire_casing() {
        let issue = Issue {
            identifier: "ENG-1".to_string(),
            created_at: "2024-01-01T00:00:00.000Z".to_string(),
            ..Issue::default()
        };
        let value = serde_json::to_value(&issue).unwrap();
        assert_eq!(value["createdAt"], "2024-01-01T00:00:00.000Z");
        assert_eq!(value["state"]["type"], "");
        assert!(value["labels"].is_array());
    }
}
