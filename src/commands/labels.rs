use colored::Colorize;
use tabled::Tabled;

use super::show_list;
use crate::cli::{LabelListArgs, OutputFormat};
use crate::client::LinearClient;
use crate::config::Config;
use crate::error::Result;
use crate::output::{field, hex_colored, truncate, Listing};
use crate::queries::labels::{list_variables_for, LIST_LABELS_QUERY};
use crate::responses::LabelsResponse;
use crate::types::Label;

const DESCRIPTION_WIDTH: usize = 50;

impl Label {
    /// Color swatch followed by the hex code.
    fn swatch(&self) -> String {
        if self.color.is_empty() {
            return String::new();
        }
        format!("{} {}", hex_colored("●", &self.color), self.color)
    }
}

#[derive(Tabled)]
pub struct LabelRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Team")]
    team: String,
    #[tabled(rename = "Color")]
    color: String,
    #[tabled(rename = "Description")]
    description: String,
}

impl Listing for Label {
    const PLURAL: &'static str = "labels";
    const NOUN: &'static str = "label";
    type Row = LabelRow;

    fn row(&self) -> LabelRow {
        LabelRow {
            name: self.name.clone(),
            team: self.team_name().to_string(),
            color: self.swatch(),
            description: truncate(
                self.description.as_deref().unwrap_or_default(),
                DESCRIPTION_WIDTH,
            ),
        }
    }

    fn compact(&self) -> String {
        format!(
            "{} ({}) {}",
            hex_colored(&self.name, &self.color),
            self.team_name(),
            self.color.dimmed()
        )
    }

    fn detail(&self) -> String {
        let mut out = format!("\n{}\n\n", self.name.bold().bright_blue());
        out.push_str(&field("Team", self.team_name()));
        out.push_str(&field("Color", self.swatch()));
        if let Some(parent) = &self.parent {
            out.push_str(&field("Group", &parent.name));
        }
        if let Some(description) = self.description.as_deref().filter(|d| !d.is_empty()) {
            out.push_str(&field("Description", description));
        }
        out
    }
}

pub async fn list(
    client: &LinearClient,
    config: &Config,
    args: LabelListArgs,
    format: OutputFormat,
) -> Result<()> {
    let team = config.resolve_team(args.team.as_deref());
    let options = args.page.options("updated");

    let response: LabelsResponse = client
        .query(LIST_LABELS_QUERY, Some(list_variables_for(&team, &options)))
        .await?;

    show_list(&response.issue_labels.nodes, format)
}
