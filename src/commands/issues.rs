use colored::Colorize;
use serde_json::json;
use tabled::Tabled;

use super::{show_list, show_one};
use crate::cli::{IssueListArgs, IssueSearchArgs, OutputFormat};
use crate::client::LinearClient;
use crate::config::Config;
use crate::editor::{self, IssueEdit};
use crate::error::{found, LinearError, Result};
use crate::output::grouped::{render_grouped, GroupBy};
use crate::output::{self, field, format_date_only, status_colored, truncate, Listing};
use crate::queries::issues::{
    get_variables, list_issues_query, list_variables_for, search_variables, IssueFilter,
    GET_ISSUE_QUERY, UPDATE_ISSUE_MUTATION,
};
use crate::responses::{IssueResponse, IssuesResponse, UpdateIssueResponse};
use crate::types::Issue;

const TITLE_WIDTH: usize = 50;
const SHOWN_COMMENTS: usize = 5;
const COMMENT_CHARS: usize = 200;

#[derive(Tabled)]
pub struct IssueRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Priority")]
    priority: String,
    #[tabled(rename = "Assignee")]
    assignee: String,
    #[tabled(rename = "Updated")]
    updated: String,
}

impl Listing for Issue {
    const PLURAL: &'static str = "issues";
    const NOUN: &'static str = "issue";
    type Row = IssueRow;

    fn row(&self) -> IssueRow {
        IssueRow {
            id: self.identifier.clone(),
            title: truncate(&self.title, TITLE_WIDTH),
            status: status_colored(&self.state.name, &self.state.state_type),
            priority: self.priority.paint(self.priority_text()),
            assignee: self.assignee_name().to_string(),
            updated: format_date_only(&self.updated_at),
        }
    }

    fn compact(&self) -> String {
        format!(
            "{} [{}] {} ({}, {})",
            self.identifier.bright_blue(),
            status_colored(&self.state.name, &self.state.state_type),
            self.title,
            self.priority.paint(self.priority_text()),
            self.assignee_name()
        )
    }

    fn detail(&self) -> String {
        let mut out = format!(
            "\n{}: {}\n",
            self.identifier.bold().bright_blue(),
            self.title
        );
        if !self.url.is_empty() {
            out.push_str(&format!("{}\n", self.url.dimmed()));
        }
        out.push('\n');

        out.push_str(&field(
            "Status",
            status_colored(&self.state.name, &self.state.state_type),
        ));
        out.push_str(&field("Priority", self.priority.paint(self.priority_text())));
        match &self.assignee {
            Some(user) => out.push_str(&field("Assignee", user.with_email().magenta())),
            None => out.push_str(&field("Assignee", "Unassigned")),
        }
        if let Some(creator) = &self.creator {
            out.push_str(&field("Creator", creator.with_email()));
        }
        if let Some(project) = &self.project {
            out.push_str(&field("Project", &project.name));
        }
        if !self.team.is_empty() {
            out.push_str(&field("Team", self.team.label()));
        }
        if let Some(cycle) = &self.cycle {
            out.push_str(&field(
                "Cycle",
                format!("{} (#{})", cycle.display_name(), cycle.number),
            ));
        }

        out.push('\n');
        out.push_str(&field("Created", format_date_only(&self.created_at)));
        out.push_str(&field("Updated", format_date_only(&self.updated_at)));
        if let Some(due) = &self.due_date {
            out.push_str(&field("Due Date", format_date_only(due)));
        }
        if let Some(completed) = &self.completed_at {
            out.push_str(&field("Completed", format_date_only(completed)));
        }
        if let Some(estimate) = self.estimate.filter(|e| *e > 0.0) {
            out.push_str(&field("Estimate", format!("{estimate} points")));
        }
        if !self.labels.is_empty() {
            out.push_str(&field("Labels", self.label_names().join(", ")));
        }
        if let Some(parent) = &self.parent {
            out.push_str(&field(
                "Parent",
                format!("{} - {}", parent.identifier, parent.title),
            ));
        }

        if let Some(description) = self.description.as_deref().filter(|d| !d.is_empty()) {
            out.push_str(&format!("\n{}\n{description}\n", "Description:".bold()));
        }

        if !self.comments.is_empty() {
            out.push_str(&format!(
                "\n{}\n",
                format!("Comments ({}):", self.comments.len()).bold()
            ));
            for comment in self.comments.iter().take(SHOWN_COMMENTS) {
                let author = comment.user.as_ref().map_or("Unknown", |u| u.name.as_str());
                let body: String = comment.body.chars().take(COMMENT_CHARS).collect();
                out.push_str(&format!(
                    "\n{} on {}:\n{body}\n",
                    author.cyan(),
                    format_date_only(&comment.created_at)
                ));
            }
        }

        if !self.attachments.is_empty() {
            out.push_str(&format!(
                "\n{}\n",
                format!("Attachments ({}):", self.attachments.len()).bold()
            ));
            for attachment in &self.attachments {
                match &attachment.url {
                    Some(url) => out.push_str(&format!("  • {} - {url}\n", attachment.title)),
                    None => out.push_str(&format!("  • {}\n", attachment.title)),
                }
            }
        }

        if !self.subscribers.is_empty() {
            let names: Vec<&str> = self.subscribers.iter().map(|s| s.name.as_str()).collect();
            out.push('\n');
            out.push_str(&field("Subscribers", names.join(", ")));
        }

        out
    }
}

fn show_issues(issues: &[Issue], group_by: Option<GroupBy>, format: OutputFormat) -> Result<()> {
    match (group_by, format) {
        (Some(by), OutputFormat::Table) => {
            output::print(&render_grouped(issues, by, output::terminal_width()));
            Ok(())
        }
        _ => show_list(issues, format),
    }
}

pub async fn list(
    client: &LinearClient,
    config: &Config,
    args: IssueListArgs,
    format: OutputFormat,
) -> Result<()> {
    let filter = IssueFilter {
        assignee: args.assignee,
        project: args.project,
        status: args.status,
        team: config.resolve_team(args.team.as_deref()),
        priority: args.priority,
        labels: args.label,
    };
    let options = args.page.options(&args.sort);

    let response: IssuesResponse = client
        .query(
            &list_issues_query(),
            Some(list_variables_for(&filter, &options)),
        )
        .await?;

    show_issues(&response.issues.nodes, args.group_by, format)
}

pub async fn search(
    client: &LinearClient,
    args: IssueSearchArgs,
    format: OutputFormat,
) -> Result<()> {
    let options = args.page.options(&args.sort);
    let response: IssuesResponse = client
        .query(
            &list_issues_query(),
            Some(search_variables(&args.query, &options)),
        )
        .await?;

    show_issues(&response.issues.nodes, args.group_by, format)
}

async fn fetch(client: &LinearClient, id: &str) -> Result<Issue> {
    let response: IssueResponse = client
        .query(GET_ISSUE_QUERY, Some(get_variables(id)))
        .await
        .map_err(|e| e.into_not_found("Issue", id))?;

    found(response.issue, "Issue", id)
}

pub async fn get(client: &LinearClient, id: &str, format: OutputFormat) -> Result<()> {
    let issue = fetch(client, id).await?;
    show_one(&issue, format)
}

pub async fn edit(client: &LinearClient, config: &Config, id: &str) -> Result<()> {
    let issue = fetch(client, id).await?;
    let original = IssueEdit::from(&issue);

    let command = editor::editor_command(config.editor.as_deref());
    let edited = editor::edit_in_editor(&original, &command)?;

    let input = original.changes(&edited);
    if input.is_empty() {
        output::print("No changes");
        return Ok(());
    }

    let changed: Vec<String> = input.keys().cloned().collect();
    tracing::debug!(issue = %issue.identifier, fields = ?changed, "updating issue");

    let variables = json!({ "id": issue.id, "input": input });
    let response: UpdateIssueResponse = client
        .query(UPDATE_ISSUE_MUTATION, Some(variables))
        .await?;

    if !response.issue_update.success {
        return Err(LinearError::GraphQL {
            messages: vec![format!("update of {} was not applied", issue.identifier)],
        });
    }

    let (identifier, title) = match response.issue_update.issue {
        Some(updated) => (updated.identifier, updated.title),
        None => (issue.identifier, edited.title),
    };
    output::print(&updated_line(&identifier, &title, &changed));
    Ok(())
}

fn updated_line(identifier: &str, title: &str, changed: &[String]) -> String {
    format!(
        "{} {identifier} - {title} ({})",
        "Updated".green(),
        changed.join(", ")
    )
}
