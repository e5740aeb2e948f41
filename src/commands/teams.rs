use colored::Colorize;
use tabled::Tabled;

use super::{show_list, show_one};
use crate::cli::{OutputFormat, PageArgs};
use crate::client::LinearClient;
use crate::error::{found, Result};
use crate::output::{field, format_date_only, status_colored, truncate, yes_no, Listing};
use crate::queries::teams::{get_variables, list_variables_for, GET_TEAM_QUERY, LIST_TEAMS_QUERY};
use crate::responses::{TeamResponse, TeamsResponse};
use crate::types::Team;

const NAME_WIDTH: usize = 40;

#[derive(Tabled)]
pub struct TeamRow {
    #[tabled(rename = "Key")]
    key: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Members")]
    members: usize,
    #[tabled(rename = "Issues")]
    issues: usize,
    #[tabled(rename = "Projects")]
    projects: usize,
    #[tabled(rename = "Cycles")]
    cycles: &'static str,
    #[tabled(rename = "Updated")]
    updated: String,
}

impl Listing for Team {
    const PLURAL: &'static str = "teams";
    const NOUN: &'static str = "team";
    type Row = TeamRow;

    // Counts are the lengths of the fetched pages, not server totals.
    fn row(&self) -> TeamRow {
        TeamRow {
            key: self.key.clone(),
            name: truncate(&self.name, NAME_WIDTH),
            members: self.members.len(),
            issues: self.issues.len(),
            projects: self.projects.len(),
            cycles: yes_no(self.cycles_enabled),
            updated: format_date_only(&self.updated_at),
        }
    }

    fn compact(&self) -> String {
        format!(
            "{} {} ({} members)",
            self.key.bright_blue(),
            self.name,
            self.members.len()
        )
    }

    fn detail(&self) -> String {
        let mut out = format!(
            "\n{}\n",
            format!("{} ({})", self.name, self.key).bold().bright_blue()
        );
        if let Some(org) = &self.organization {
            out.push_str(&format!("{}\n", format!("Organization: {}", org.name).dimmed()));
        }
        out.push('\n');

        out.push_str(&field("Team Key", &self.key));
        out.push_str(&field("Private", yes_no(self.private)));
        out.push_str(&field("Cycles Enabled", yes_no(self.cycles_enabled)));
        if let Some(timezone) = &self.timezone {
            out.push_str(&field("Timezone", timezone));
        }

        out.push('\n');
        out.push_str(&field("Created", format_date_only(&self.created_at)));
        out.push_str(&field("Updated", format_date_only(&self.updated_at)));
        if let Some(archived) = &self.archived_at {
            out.push_str(&field("Archived", format_date_only(archived)));
        }

        if let Some(description) = self.description.as_deref().filter(|d| !d.is_empty()) {
            out.push_str(&format!("\n{}\n{description}\n", "Description:".bold()));
        }

        if !self.members.is_empty() {
            out.push_str(&format!(
                "\n{}\n",
                format!("Members ({}):", self.members.len()).bold()
            ));
            for member in &self.members {
                out.push_str(&format!("  {}\n", member.with_email()));
            }
        }

        if !self.states.is_empty() {
            let states: Vec<String> = self
                .states
                .iter()
                .map(|s| status_colored(&s.name, &s.state_type))
                .collect();
            out.push('\n');
            out.push_str(&field("Workflow States", states.join(", ")));
        }

        if !self.labels.is_empty() {
            let labels: Vec<&str> = self.labels.iter().map(|l| l.name.as_str()).collect();
            out.push_str(&field("Labels", labels.join(", ")));
        }

        if !self.projects.is_empty() {
            let projects: Vec<&str> = self.projects.iter().map(|p| p.name.as_str()).collect();
            out.push_str(&field("Projects", projects.join(", ")));
        }

        out
    }
}

pub async fn list(client: &LinearClient, page: PageArgs, format: OutputFormat) -> Result<()> {
    let options = page.options("updated");
    let response: TeamsResponse = client
        .query(LIST_TEAMS_QUERY, Some(list_variables_for(&options)))
        .await?;

    show_list(&response.teams.nodes, format)
}

pub async fn get(client: &LinearClient, id: &str, format: OutputFormat) -> Result<()> {
    let response: TeamResponse = client
        .query(GET_TEAM_QUERY, Some(get_variables(id)))
        .await
        .map_err(|e| e.into_not_found("Team", id))?;

    let team = found(response.team, "Team", id)?;
    show_one(&team, format)
}
