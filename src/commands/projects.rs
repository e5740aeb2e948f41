use colored::Colorize;
use serde_json::json;
use tabled::Tabled;

use super::{show_list, show_one};
use crate::cli::{OutputFormat, ProjectListArgs};
use crate::client::LinearClient;
use crate::config::Config;
use crate::error::{found, Result};
use crate::output::{
    field, format_date_only, format_optional_date, format_progress, truncate, Listing,
};
use crate::queries::projects::{
    list_variables_for, ProjectFilter, GET_PROJECT_QUERY, LIST_PROJECTS_QUERY,
};
use crate::responses::{ProjectResponse, ProjectsResponse};
use crate::types::Project;

const NAME_WIDTH: usize = 40;

#[derive(Tabled)]
pub struct ProjectRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "State")]
    state: String,
    #[tabled(rename = "Progress")]
    progress: String,
    #[tabled(rename = "Lead")]
    lead: String,
    #[tabled(rename = "Team")]
    team: String,
    #[tabled(rename = "Target Date")]
    target_date: String,
}

impl Project {
    fn lead_name(&self) -> &str {
        self.lead.as_ref().map_or("Unassigned", |lead| lead.name.as_str())
    }
}

impl Listing for Project {
    const PLURAL: &'static str = "projects";
    const NOUN: &'static str = "project";
    type Row = ProjectRow;

    fn row(&self) -> ProjectRow {
        ProjectRow {
            name: truncate(&self.name, NAME_WIDTH),
            state: self.state_title(),
            progress: format_progress(self.progress),
            lead: self.lead_name().to_string(),
            team: self
                .teams
                .first()
                .map(|team| team.key.clone())
                .unwrap_or_default(),
            target_date: format_optional_date(self.target_date.as_deref()),
        }
    }

    fn compact(&self) -> String {
        format!(
            "{} [{}] {} (lead: {})",
            self.name.bright_blue(),
            self.state_title().green(),
            format_progress(self.progress),
            self.lead_name()
        )
    }

    fn detail(&self) -> String {
        let mut out = format!("\n{}\n", self.name.bold().bright_blue());
        if !self.url.is_empty() {
            out.push_str(&format!("{}\n", self.url.dimmed()));
        }
        out.push('\n');

        out.push_str(&field("State", self.state_title().green()));
        out.push_str(&field("Progress", format_progress(self.progress).yellow()));
        match &self.lead {
            Some(lead) => out.push_str(&field("Lead", lead.with_email().magenta())),
            None => out.push_str(&field("Lead", "No lead assigned")),
        }
        if let Some(creator) = &self.creator {
            out.push_str(&field("Creator", creator.with_email()));
        }
        if !self.teams.is_empty() {
            let teams: Vec<String> = self.teams.iter().map(|team| team.label()).collect();
            out.push_str(&field("Teams", teams.join(", ")));
        }
        if !self.members.is_empty() {
            out.push_str(&field("Members", self.members.len()));
        }

        out.push('\n');
        out.push_str(&field("Created", format_date_only(&self.created_at)));
        out.push_str(&field("Updated", format_date_only(&self.updated_at)));
        for (label, date) in [
            ("Start Date", &self.start_date),
            ("Target Date", &self.target_date),
            ("Completed", &self.completed_at),
            ("Canceled", &self.canceled_at),
        ] {
            if let Some(date) = date {
                out.push_str(&field(label, format_date_only(date)));
            }
        }

        if !self.description.is_empty() {
            out.push_str(&format!("\n{}\n{}\n", "Description:".bold(), self.description));
        }

        if !self.issues.is_empty() {
            out.push_str(&format!(
                "\n{}\n",
                format!("Issues ({}):", self.issues.len()).bold()
            ));
            for issue in &self.issues {
                out.push_str(&format!(
                    "  {} {} [{}]\n",
                    issue.identifier.bright_blue(),
                    issue.title,
                    issue.state.name
                ));
            }
        }

        out
    }
}

pub async fn list(
    client: &LinearClient,
    config: &Config,
    args: ProjectListArgs,
    format: OutputFormat,
) -> Result<()> {
    let filter = ProjectFilter {
        state: args.state,
        team: config.resolve_team(args.team.as_deref()),
    };
    let options = args.page.options(&args.sort);

    let response: ProjectsResponse = client
        .query(
            LIST_PROJECTS_QUERY,
            Some(list_variables_for(&filter, &options)),
        )
        .await?;

    show_list(&response.projects.nodes, format)
}

pub async fn get(client: &LinearClient, id: &str, format: OutputFormat) -> Result<()> {
    let response: ProjectResponse = client
        .query(GET_PROJECT_QUERY, Some(json!({ "id": id.trim() })))
        .await
        .map_err(|e| e.into_not_found("Project", id))?;

    let project = found(response.project, "Project", id)?;
    show_one(&project, format)
}
