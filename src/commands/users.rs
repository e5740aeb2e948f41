use colored::Colorize;
use serde_json::json;
use tabled::Tabled;

use super::{show_list, show_one};
use crate::cli::{OutputFormat, UserListArgs};
use crate::client::LinearClient;
use crate::error::{found, Result};
use crate::output::{field, format_date_only, format_optional_date, truncate, Listing};
use crate::queries::users::{get_user_query, list_users_query, list_variables_for, viewer_query};
use crate::responses::{UserResponse, UsersResponse, ViewerResponse};
use crate::types::User;

const EMAIL_WIDTH: usize = 35;

impl User {
    fn painted_role(&self) -> String {
        if self.admin {
            self.role().yellow().to_string()
        } else {
            self.role().to_string()
        }
    }

    fn painted_status(&self) -> String {
        if self.active {
            self.status().green().to_string()
        } else {
            self.status().dimmed().to_string()
        }
    }

    /// Custom status with its emoji, if one is set.
    fn status_message(&self) -> Option<String> {
        let label = self.status_label.as_deref().filter(|l| !l.is_empty())?;
        Some(match self.status_emoji.as_deref().filter(|e| !e.is_empty()) {
            Some(emoji) => format!("{emoji} {label}"),
            None => label.to_string(),
        })
    }
}

#[derive(Tabled)]
pub struct UserRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Role")]
    role: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Timezone")]
    timezone: String,
    #[tabled(rename = "Created")]
    created: String,
}

impl Listing for User {
    const PLURAL: &'static str = "users";
    const NOUN: &'static str = "user";
    type Row = UserRow;

    fn row(&self) -> UserRow {
        UserRow {
            name: self.shown_name().to_string(),
            email: truncate(&self.email, EMAIL_WIDTH),
            role: self.painted_role(),
            status: self.painted_status(),
            timezone: self.timezone.clone().unwrap_or_else(|| "—".to_string()),
            created: format_optional_date(Some(self.created_at.as_str())),
        }
    }

    fn compact(&self) -> String {
        format!(
            "{} <{}> {} {}",
            self.shown_name().bright_blue(),
            self.email,
            self.painted_role(),
            self.painted_status()
        )
    }

    fn detail(&self) -> String {
        let mut out = format!("\n{}\n", self.shown_name().bold().bright_blue());
        if !self.email.is_empty() {
            out.push_str(&format!("{}\n", self.email.dimmed()));
        }
        out.push('\n');

        out.push_str(&field("Status", self.painted_status()));
        out.push_str(&field("Role", self.painted_role()));
        if let Some(org) = &self.organization {
            out.push_str(&field("Organization", &org.name));
        }
        if let Some(timezone) = &self.timezone {
            out.push_str(&field("Timezone", timezone));
        }
        if let Some(message) = self.status_message() {
            out.push_str(&field("Status Message", message));
            if let Some(until) = &self.status_until_at {
                out.push_str(&format!(
                    "{}\n",
                    format!("  (until {})", format_date_only(until)).dimmed()
                ));
            }
        }

        if let Some(bio) = self.description.as_deref().filter(|d| !d.is_empty()) {
            out.push_str(&format!("\n{}\n{bio}\n", "Bio:".bold()));
        }

        out.push('\n');
        out.push_str(&field("Joined", format_optional_date(Some(self.created_at.as_str()))));
        out.push_str(&field(
            "Last Updated",
            format_optional_date(Some(self.updated_at.as_str())),
        ));

        out
    }
}

pub async fn list(client: &LinearClient, args: UserListArgs, format: OutputFormat) -> Result<()> {
    let options = args.page.options("updated");
    let response: UsersResponse = client
        .query(
            &list_users_query(),
            Some(list_variables_for(args.include_disabled, &options)),
        )
        .await?;

    show_list(&response.users.nodes, format)
}

/// Look up a user by id; `me` resolves to the authenticated user.
pub async fn get(client: &LinearClient, id: &str, format: OutputFormat) -> Result<()> {
    let id = id.trim();
    let user = if id.eq_ignore_ascii_case("me") {
        let response: ViewerResponse = client.query(&viewer_query(), None).await?;
        response.viewer
    } else {
        let response: UserResponse = client
            .query(&get_user_query(), Some(json!({ "id": id })))
            .await
            .map_err(|e| e.into_not_found("User", id))?;
        response.user
    };

    let user = found(user, "User", id)?;
    show_one(&user, format)
}
