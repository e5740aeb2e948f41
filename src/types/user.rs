use serde::{Deserialize, Serialize};

use super::Organization;

/// A workspace member as returned by `users` and `user(id:)`.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub display_name: String,
    pub email: String,
    pub active: bool,
    pub admin: bool,
    pub timezone: Option<String>,
    pub description: Option<String>,
    pub status_label: Option<String>,
    pub status_emoji: Option<String>,
    pub status_until_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    pub organization: Option<Organization>,
}

impl User {
    /// Display name, falling back to the full name.
    pub fn shown_name(&self) -> &str {
        if self.display_name.is_empty() {
            &self.name
        } else {
            &self.display_name
        }
    }

    pub fn role(&self) -> &'static str {
        if self.admin {
            "Admin"
        } else {
            "Member"
        }
    }

    pub fn status(&self) -> &'static str {
        if self.active {
            "Active"
        } else {
            "Inactive"
        }
    }
}

/// A user embedded in another record (assignee, lead, comment author).
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct UserRef {
    pub id: String,
    pub name: String,
    pub email: String,
}

impl UserRef {
    /// `Name (email)`, or just the name when the email was not fetched.
    pub fn with_email(&self) -> String {
        if self.email.is_empty() {
            self.name.clone()
        } else {
            format!("{} ({})", self.name, self.email)
        }
    }
}
