use colored::Colorize;
use serde_json::json;
use tabled::Tabled;

use super::{show_list, show_one};
use crate::cli::{CycleListArgs, OutputFormat};
use crate::client::LinearClient;
use crate::config::Config;
use crate::error::{found, Result};
use crate::output::{field, format_date_only, format_progress, truncate, Listing};
use crate::queries::cycles::{get_cycle_query, list_cycles_query, list_variables_for, CycleFilter};
use crate::responses::{CycleResponse, CyclesResponse};
use crate::types::{Cycle, CycleStatus};

const NAME_WIDTH: usize = 30;
const BAR_WIDTH: usize = 30;

fn painted_status(status: CycleStatus) -> String {
    let label = status.to_string();
    match status {
        CycleStatus::Active => label.green().to_string(),
        CycleStatus::Future => label.blue().to_string(),
        CycleStatus::Past => label.dimmed().to_string(),
        CycleStatus::Unknown => label,
    }
}

fn progress_bar(progress: f64) -> String {
    let progress = progress.clamp(0.0, 1.0);
    let filled = (BAR_WIDTH as f64 * progress) as usize;
    format!(
        "{}{} {:.1}%",
        "█".repeat(filled).yellow(),
        "░".repeat(BAR_WIDTH - filled).yellow(),
        progress * 100.0
    )
}

#[derive(Tabled)]
pub struct CycleRow {
    #[tabled(rename = "Team")]
    team: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Number")]
    number: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Progress")]
    progress: String,
    #[tabled(rename = "Starts")]
    starts: String,
    #[tabled(rename = "Ends")]
    ends: String,
}

impl Listing for Cycle {
    const PLURAL: &'static str = "cycles";
    const NOUN: &'static str = "cycle";
    type Row = CycleRow;

    fn row(&self) -> CycleRow {
        let name = self.name.as_deref().filter(|n| !n.is_empty()).unwrap_or("Untitled");
        CycleRow {
            team: self.team.key.clone(),
            name: truncate(name, NAME_WIDTH),
            number: format!("#{}", self.number),
            status: painted_status(self.status()),
            progress: format_progress(self.progress),
            starts: format_date_only(&self.starts_at),
            ends: format_date_only(&self.ends_at),
        }
    }

    fn compact(&self) -> String {
        format!(
            "{} {} [{}] {} to {} ({})",
            self.team.key.cyan(),
            self.display_name().bright_blue(),
            painted_status(self.status()),
            format_date_only(&self.starts_at),
            format_date_only(&self.ends_at),
            format_progress(self.progress)
        )
    }

    fn detail(&self) -> String {
        let mut out = format!(
            "\n{} {}\n",
            self.display_name().bold().bright_blue(),
            format!("(Cycle #{})", self.number).dimmed()
        );
        if !self.team.is_empty() {
            out.push_str(&format!("{}\n", format!("Team: {}", self.team.label()).dimmed()));
        }
        out.push('\n');

        out.push_str(&field("Status", painted_status(self.status())));
        out.push_str(&field("Progress", progress_bar(self.progress)));

        out.push('\n');
        out.push_str(&field("Start Date", format_date_only(&self.starts_at)));
        out.push_str(&field("End Date", format_date_only(&self.ends_at)));
        if let Some(completed) = &self.completed_at {
            out.push_str(&field("Completed", format_date_only(completed)));
        }

        out.push('\n');
        out.push_str(&field("Created", format_date_only(&self.created_at)));
        out.push_str(&field("Updated", format_date_only(&self.updated_at)));
        if let Some(archived) = &self.archived_at {
            out.push_str(&field("Archived", format_date_only(archived)));
        }

        let mut tags = Vec::new();
        if self.is_next {
            tags.push("Next Cycle");
        }
        if self.is_previous {
            tags.push("Previous Cycle");
        }
        if !tags.is_empty() {
            out.push_str(&field("Tags", tags.join(", ")));
        }

        if let Some(description) = self.description.as_deref().filter(|d| !d.is_empty()) {
            out.push_str(&format!("\n{}\n{description}\n", "Description:".bold()));
        }

        if !self.scope_history.is_empty() {
            out.push('\n');
            out.push_str(&field(
                "Scope History",
                format!("{} data points", self.scope_history.len()),
            ));
        }
        if !self.issue_count_history.is_empty() {
            out.push_str(&field(
                "Issue Count History",
                format!("{} data points", self.issue_count_history.len()),
            ));
        }

        out
    }
}

pub async fn list(
    client: &LinearClient,
    config: &Config,
    args: CycleListArgs,
    format: OutputFormat,
) -> Result<()> {
    let filter = CycleFilter {
        team: config.resolve_team(args.team.as_deref()),
        active: args.active,
        future: args.future,
        past: args.past,
    };
    let options = args.page.options("updated");

    let response: CyclesResponse = client
        .query(
            &list_cycles_query(),
            Some(list_variables_for(&filter, &options)),
        )
        .await?;

    show_list(&response.cycles.nodes, format)
}

pub async fn get(client: &LinearClient, id: &str, format: OutputFormat) -> Result<()> {
    let response: CycleResponse = client
        .query(&get_cycle_query(), Some(json!({ "id": id.trim() })))
        .await
        .map_err(|e| e.into_not_found("Cycle", id))?;

    let cycle = found(response.cycle, "Cycle", id)?;
    show_one(&cycle, format)
}
