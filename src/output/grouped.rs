//! Issue tables split into groups that share one set of column widths.

use std::collections::BTreeMap;

use clap::ValueEnum;
use colored::Colorize;
use tabled::builder::Builder;
use tabled::settings::object::Columns;
use tabled::settings::{Padding, Style, Width};

use super::format_date_only;
use crate::types::Issue;

const HEADERS: [&str; 6] = ["ID", "Title", "Status", "Priority", "Assignee", "Updated"];
const TITLE_COLUMN: usize = 1;
/// Right padding plus the blank vertical line.
const COLUMN_GAP: usize = 2;
const MIN_TITLE_WIDTH: usize = 20;
const MAX_TITLE_WIDTH: usize = 70;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GroupBy {
    Cycle,
    Project,
    Team,
}

impl GroupBy {
    fn name(self) -> &'static str {
        match self {
            GroupBy::Cycle => "cycle",
            GroupBy::Project => "project",
            GroupBy::Team => "team",
        }
    }

    /// Bucket name for an issue, `None` when it has no value for this dimension.
    fn bucket(self, issue: &Issue) -> Option<String> {
        match self {
            GroupBy::Cycle => issue
                .cycle
                .as_ref()
                .and_then(|c| c.name.clone())
                .filter(|name| !name.is_empty()),
            GroupBy::Project => issue
                .project
                .as_ref()
                .map(|p| p.name.clone())
                .filter(|name| !name.is_empty()),
            GroupBy::Team if issue.team.is_empty() => None,
            GroupBy::Team => Some(format!("{} - {}", issue.team.key, issue.team.name)),
        }
    }
}

/// Partition issues into named buckets, alphabetical, with the `No <dimension>` bucket last.
pub fn group_issues(issues: &[Issue], by: GroupBy) -> Vec<(String, Vec<&Issue>)> {
    // (is_missing, name) sorts named buckets first, then the missing bucket.
    let mut groups: BTreeMap<(bool, String), Vec<&Issue>> = BTreeMap::new();
    for issue in issues {
        let key = match by.bucket(issue) {
            Some(name) => (false, name),
            None => (true, format!("No {}", by.name())),
        };
        groups.entry(key).or_default().push(issue);
    }

    groups
        .into_iter()
        .map(|((_, name), members)| (name, members))
        .collect()
}

struct Cells {
    id: String,
    title: String,
    status: String,
    priority: String,
    assignee: String,
    updated: String,
}

impl Cells {
    fn from_issue(issue: &Issue) -> Self {
        Self {
            id: issue.identifier.clone(),
            title: issue.title.clone(),
            status: issue.state.name.clone(),
            priority: issue.priority_text().to_string(),
            assignee: issue.assignee_name().to_string(),
            updated: format_date_only(&issue.updated_at),
        }
    }

    fn painted(self) -> [String; 6] {
        [
            self.id.bright_blue().to_string(),
            self.title,
            self.status.green().to_string(),
            self.priority.yellow().to_string(),
            self.assignee.magenta().to_string(),
            self.updated.dimmed().to_string(),
        ]
    }
}

struct Widths {
    id: usize,
    title: usize,
    status: usize,
    priority: usize,
    assignee: usize,
    updated: usize,
}

impl Widths {
    /// Widths from the whole list so columns line up across groups.
    fn measure(cells: &[Cells], terminal_width: usize) -> Self {
        let id = widest(cells, "ID", |c| &c.id);
        let status = widest(cells, "Status", |c| &c.status);
        let priority = widest(cells, "Priority", |c| &c.priority);
        let assignee = widest(cells, "Assignee", |c| &c.assignee);
        let updated = widest(cells, "Updated", |c| &c.updated);

        let gaps = COLUMN_GAP * (HEADERS.len() - 1);
        let fixed = id + status + priority + assignee + updated + gaps;
        let available = terminal_width.saturating_sub(fixed);
        let title = available.clamp(MIN_TITLE_WIDTH, MAX_TITLE_WIDTH);

        Self {
            id,
            title,
            status,
            priority,
            assignee,
            updated,
        }
    }

    fn columns(&self) -> [usize; 6] {
        [
            self.id,
            self.title,
            self.status,
            self.priority,
            self.assignee,
            self.updated,
        ]
    }
}

fn widest(cells: &[Cells], header: &str, pick: fn(&Cells) -> &str) -> usize {
    cells
        .iter()
        .map(|c| pick(c).chars().count())
        .chain(std::iter::once(header.chars().count()))
        .max()
        .unwrap_or(0)
}

/// One group's table, borderless, with every column held at the shared width.
fn group_table(members: &[&Issue], widths: &Widths) -> String {
    let mut builder = Builder::default();
    builder.push_record(HEADERS.map(|h| h.bold().cyan().to_string()));
    for issue in members {
        builder.push_record(Cells::from_issue(issue).painted());
    }

    let mut table = builder.build();
    table
        .with(Style::blank())
        .with(Padding::new(0, 1, 0, 0))
        .modify(Columns::last(), Padding::zero())
        .modify(
            Columns::one(TITLE_COLUMN),
            Width::truncate(widths.title).suffix("..."),
        );
    for (column, width) in widths.columns().into_iter().enumerate() {
        table.modify(Columns::one(column), Width::increase(width));
    }
    table.to_string()
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

pub fn render_grouped(issues: &[Issue], by: GroupBy, terminal_width: usize) -> String {
    if issues.is_empty() {
        return "No issues found.".yellow().to_string();
    }

    let all_cells: Vec<Cells> = issues.iter().map(Cells::from_issue).collect();
    let widths = Widths::measure(&all_cells, terminal_width);
    let groups = group_issues(issues, by);

    let mut out = String::new();
    for (name, members) in &groups {
        out.push('\n');
        out.push_str(&format!(
            "{} {}\n",
            name.bold().cyan(),
            format!("({})", plural(members.len(), "issue")).dimmed()
        ));
        out.push_str(&group_table(members, &widths));
        out.push('\n');
    }

    out.push_str(&format!(
        "\n{}",
        format!(
            "Total: {} issue(s) across {} group(s)",
            issues.len(),
            groups.len()
        )
        .dimmed()
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::plain;
    use crate::types::{CycleRef, ProjectRef, TeamRef};

    fn issue(identifier: &str, team: Option<(&str, &str)>) -> Issue {
        Issue {
            identifier: identifier.to_string(),
            title: format!("Title of {identifier}"),
            team: team
                .map(|(key, name)| TeamRef {
                    id: String::new(),
                    key: key.to_string(),
                    name: name.to_string(),
                })
                .unwrap_or_default(),
            ..Issue::default()
        }
    }

    #[test]
    fn no_team_bucket_goes_last() {
        let issues = vec![
            issue("OPS-1", Some(("OPS", "Operations"))),
            issue("X-1", None),
            issue("ENG-1", Some(("ENG", "Engineering"))),
            issue("X-2", None),
            issue("ENG-2", Some(("ENG", "Engineering"))),
        ];

        let groups = group_issues(&issues, GroupBy::Team);
        let names: Vec<&str> = groups.iter().map(|(name, _)| name.as_str()).collect();

        assert_eq!(names, vec!["ENG - Engineering", "OPS - Operations", "No team"]);
        assert_eq!(groups[0].1.len(), 2);
        assert_eq!(groups[2].1.len(), 2);
    }

    #[test]
    fn named_bucket_starting_with_no_is_not_the_missing_bucket() {
        let mut a = issue("A-1", None);
        a.project = Some(ProjectRef {
            name: "Notifications".to_string(),
            ..ProjectRef::default()
        });
        let b = issue("A-2", None);
        let mut c = issue("A-3", None);
        c.project = Some(ProjectRef {
            name: "Billing".to_string(),
            ..ProjectRef::default()
        });

        let issues = [a, b, c];
        let groups = group_issues(&issues, GroupBy::Project);
        let names: Vec<&str> = groups.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, vec!["Billing", "Notifications", "No project"]);
    }

    #[test]
    fn unnamed_cycle_joins_no_cycle_bucket() {
        let mut unnamed = issue("A-1", None);
        unnamed.cycle = Some(CycleRef {
            number: 4,
            ..CycleRef::default()
        });
        let mut blank = issue("A-2", None);
        blank.cycle = Some(CycleRef {
            number: 5,
            name: Some(String::new()),
            ..CycleRef::default()
        });
        let mut named = issue("A-3", None);
        named.cycle = Some(CycleRef {
            number: 6,
            name: Some("Sprint 6".to_string()),
            ..CycleRef::default()
        });

        let issues = [unnamed, blank, named, issue("A-4", None)];
        let groups = group_issues(&issues, GroupBy::Cycle);
        let names: Vec<&str> = groups.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, vec!["Sprint 6", "No cycle"]);
        assert_eq!(groups[1].1.len(), 3);
    }

    #[test]
    fn columns_align_across_groups() {
        plain();
        let mut short = issue("E-1", Some(("E", "Eng")));
        short.assignee = Some(crate::types::UserRef {
            name: "Al".to_string(),
            ..Default::default()
        });
        let mut long = issue("OPS-1234", Some(("OPS", "Ops")));
        long.assignee = Some(crate::types::UserRef {
            name: "Bartholomew".to_string(),
            ..Default::default()
        });

        let rendered = render_grouped(&[short, long], GroupBy::Team, 120);
        let rows: Vec<&str> = rendered
            .lines()
            .filter(|line| line.starts_with("E-1") || line.starts_with("OPS-1234"))
            .collect();

        assert_eq!(rows.len(), 2);
        // Title column starts at the same offset in both groups.
        assert_eq!(rows[0].find("Title of"), rows[1].find("Title of"));
        assert!(rendered.contains("Total: 2 issue(s) across 2 group(s)"));
        assert!(rendered.contains("E - Eng (1 issue)"));
    }

    #[test]
    fn long_titles_are_cut_to_the_title_column() {
        plain();
        let mut long = issue("ENG-1", Some(("ENG", "Engineering")));
        long.title = "x".repeat(90);

        let rendered = render_grouped(&[long], GroupBy::Team, 40);
        let row = rendered
            .lines()
            .find(|line| line.starts_with("ENG-1"))
            .unwrap();
        let cut = format!("{}...", "x".repeat(MIN_TITLE_WIDTH - 3));
        assert!(row.contains(&cut), "{row}");
        assert!(!row.contains(&"x".repeat(MIN_TITLE_WIDTH)));
    }

    #[test]
    fn title_width_is_bounded_by_terminal() {
        let cells = vec![Cells::from_issue(&issue("ENG-1", None))];
        assert_eq!(Widths::measure(&cells, 40).title, MIN_TITLE_WIDTH);
        assert_eq!(Widths::measure(&cells, 500).title, MAX_TITLE_WIDTH);
        let mid = Widths::measure(&cells, 100);
        assert!(mid.title > MIN_TITLE_WIDTH && mid.title < MAX_TITLE_WIDTH);
    }
}
