use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use crate::output::grouped::GroupBy;
use crate::queries::ListOptions;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Compact,
    Detail,
}

#[derive(Parser)]
#[command(name = "linear")]
#[command(about = "Query Linear issues, projects, teams, cycles and users", version)]
#[command(after_help = "EXAMPLES:
    linear issues list --assignee me         List your assigned issues
    linear issues list --status \"In Progress\" --priority 1 --limit 10
    linear issues get ENG-123                Show issue details
    linear issues edit ENG-123               Edit an issue in $EDITOR
    linear projects list --state started --format json")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (lists default to table, lookups to detail)
    #[arg(
        long,
        short = 'f',
        short_alias = 'o',
        alias = "output",
        global = true,
        value_enum
    )]
    pub format: Option<OutputFormat>,

    /// Output as JSON (alias for --format json)
    #[arg(long, global = true, hide = true)]
    pub json: bool,

    /// Linear API key (overrides LINEAR_API_KEY and the config file)
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Show debug logs and detailed error information
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

impl Cli {
    /// Effective format: --json, then --format, then the command's default.
    pub fn output_format(&self, default: OutputFormat) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            self.format.unwrap_or(default)
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// List, search, view and edit issues
    #[command(
        alias = "i",
        after_help = "EXAMPLES:
    linear issues list --team ENG --label bug --label urgent
    linear issues list --group-by project
    linear issues search \"login\"
    linear issues get ENG-123 --format json
    linear issues edit ENG-123"
    )]
    Issues {
        #[command(subcommand)]
        action: IssueCommands,
    },
    /// List and view projects
    #[command(
        alias = "p",
        after_help = "EXAMPLES:
    linear projects list --state started
    linear projects list --team ENG
    linear projects get <project-id>"
    )]
    Projects {
        #[command(subcommand)]
        action: ProjectCommands,
    },
    /// List and view teams
    #[command(
        alias = "t",
        after_help = "EXAMPLES:
    linear teams list
    linear teams get ENG"
    )]
    Teams {
        #[command(subcommand)]
        action: TeamCommands,
    },
    /// List and view cycles
    #[command(
        alias = "c",
        after_help = "EXAMPLES:
    linear cycles list --team ENG --active
    linear cycles get <cycle-id>"
    )]
    Cycles {
        #[command(subcommand)]
        action: CycleCommands,
    },
    /// List and view users
    #[command(
        alias = "u",
        after_help = "EXAMPLES:
    linear users list
    linear users get me"
    )]
    Users {
        #[command(subcommand)]
        action: UserCommands,
    },
    /// List issue labels
    #[command(
        alias = "l",
        after_help = "EXAMPLES:
    linear labels list
    linear labels list --team ENG"
    )]
    Labels {
        #[command(subcommand)]
        action: LabelCommands,
    },
    /// Generate shell completions
    #[command(after_help = "EXAMPLES:
    linear completions bash > ~/.bash_completion.d/linear
    linear completions zsh > ~/.zfunc/_linear
    linear completions fish > ~/.config/fish/completions/linear.fish")]
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
    /// Initialize configuration file interactively
    #[command(after_help = "EXAMPLES:
    linear init")]
    Init,
}

#[derive(Subcommand)]
pub enum IssueCommands {
    /// List issues
    #[command(alias = "ls")]
    List(IssueListArgs),
    /// Show issue details
    #[command(alias = "view")]
    Get {
        /// Issue identifier (e.g., ENG-123) or UUID
        id: String,
    },
    /// Search issues by title
    Search(IssueSearchArgs),
    /// Edit title, description, priority and estimate in $EDITOR
    Edit {
        /// Issue identifier (e.g., ENG-123) or UUID
        id: String,
    },
}

#[derive(Subcommand)]
pub enum ProjectCommands {
    /// List projects
    #[command(alias = "ls")]
    List(ProjectListArgs),
    /// Show project details
    #[command(alias = "view")]
    Get {
        /// Project UUID or slug
        id: String,
    },
}

#[derive(Subcommand)]
pub enum TeamCommands {
    /// List teams
    #[command(alias = "ls")]
    List(PageArgs),
    /// Show team details
    #[command(alias = "view")]
    Get {
        /// Team key (e.g., ENG) or UUID
        id: String,
    },
}

#[derive(Subcommand)]
pub enum CycleCommands {
    /// List cycles
    #[command(alias = "ls")]
    List(CycleListArgs),
    /// Show cycle details
    #[command(alias = "view")]
    Get {
        /// Cycle UUID
        id: String,
    },
}

#[derive(Subcommand)]
pub enum UserCommands {
    /// List users
    #[command(alias = "ls")]
    List(UserListArgs),
    /// Show user details
    #[command(alias = "view")]
    Get {
        /// User UUID, or "me" for the authenticated user
        id: String,
    },
}

#[derive(Subcommand)]
pub enum LabelCommands {
    /// List labels
    #[command(alias = "ls")]
    List(LabelListArgs),
}

/// Paging flags shared by list commands.
#[derive(Args, Clone, Debug)]
pub struct PageArgs {
    /// Maximum number of results (the API returns at most 250)
    #[arg(long, default_value = "50")]
    pub limit: u32,

    /// Include archived records
    #[arg(long)]
    pub include_archived: bool,
}

impl PageArgs {
    pub fn options(&self, sort: &str) -> ListOptions {
        ListOptions {
            limit: self.limit,
            include_archived: self.include_archived,
            sort: sort.to_string(),
        }
    }
}

#[derive(Args, Clone, Debug)]
pub struct IssueListArgs {
    /// Filter by assignee email ("me" for yourself)
    #[arg(long, short)]
    pub assignee: Option<String>,

    /// Filter by project name or UUID
    #[arg(long, short)]
    pub project: Option<String>,

    /// Filter by status name
    #[arg(long, short)]
    pub status: Option<String>,

    /// Filter by team key or name (defaults to default_team from config)
    #[arg(long, short)]
    pub team: Option<String>,

    /// Filter by priority (0=none, 1=urgent, 2=high, 3=medium, 4=low)
    #[arg(long, value_parser = clap::value_parser!(i32).range(0..=4))]
    pub priority: Option<i32>,

    /// Filter by label name (repeatable)
    #[arg(long, short)]
    pub label: Vec<String>,

    /// Sort by: created, updated, priority
    #[arg(long, default_value = "updated")]
    pub sort: String,

    /// Group the table by cycle, project or team
    #[arg(long, value_enum)]
    pub group_by: Option<GroupBy>,

    #[command(flatten)]
    pub page: PageArgs,
}

#[derive(Args, Clone, Debug)]
pub struct IssueSearchArgs {
    /// Text to find in issue titles (case-insensitive)
    pub query: String,

    /// Sort by: created, updated, priority
    #[arg(long, default_value = "updated")]
    pub sort: String,

    /// Group the table by cycle, project or team
    #[arg(long, value_enum)]
    pub group_by: Option<GroupBy>,

    #[command(flatten)]
    pub page: PageArgs,
}

#[derive(Args, Clone, Debug)]
pub struct ProjectListArgs {
    /// Filter by state (planned, started, paused, completed, canceled)
    #[arg(long, short)]
    pub state: Option<String>,

    /// Filter by team key or name
    #[arg(long, short)]
    pub team: Option<String>,

    /// Sort by: created, updated
    #[arg(long, default_value = "updated")]
    pub sort: String,

    #[command(flatten)]
    pub page: PageArgs,
}

#[derive(Args, Clone, Debug)]
pub struct CycleListArgs {
    /// Filter by team key or name
    #[arg(long, short)]
    pub team: Option<String>,

    /// Only the active cycle
    #[arg(long, conflicts_with_all = ["future", "past"])]
    pub active: bool,

    /// Only upcoming cycles
    #[arg(long, conflicts_with = "past")]
    pub future: bool,

    /// Only finished cycles
    #[arg(long)]
    pub past: bool,

    #[command(flatten)]
    pub page: PageArgs,
}

#[derive(Args, Clone, Debug)]
pub struct UserListArgs {
    /// Include deactivated users
    #[arg(long)]
    pub include_disabled: bool,

    #[command(flatten)]
    pub page: PageArgs,
}

#[derive(Args, Clone, Debug)]
pub struct LabelListArgs {
    /// Filter by team key or name
    #[arg(long, short)]
    pub team: Option<String>,

    #[command(flatten)]
    pub page: PageArgs,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_issue_list_filters() {
        let cli = Cli::try_parse_from([
            "linear", "issues", "list", "--status", "In Progress", "--priority", "1", "--limit",
            "10", "-l", "bug", "-l", "urgent", "--group-by", "team",
        ])
        .unwrap();

        let Commands::Issues {
            action: IssueCommands::List(args),
        } = cli.command
        else {
            panic!("expected issues list");
        };
        assert_eq!(args.status.as_deref(), Some("In Progress"));
        assert_eq!(args.priority, Some(1));
        assert_eq!(args.page.limit, 10);
        assert_eq!(args.label, vec!["bug", "urgent"]);
        assert_eq!(args.group_by, Some(GroupBy::Team));
    }

    #[test]
    fn rejects_out_of_range_priority() {
        assert!(Cli::try_parse_from(["linear", "issues", "list", "--priority", "5"]).is_err());
        assert!(Cli::try_parse_from(["linear", "issues", "list", "--priority", "high"]).is_err());
    }

    #[test]
    fn json_flag_overrides_format() {
        let cli = Cli::try_parse_from(["linear", "--json", "-o", "table", "teams", "list"]).unwrap();
        assert_eq!(cli.output_format(OutputFormat::Table), OutputFormat::Json);

        let cli = Cli::try_parse_from(["linear", "teams", "get", "ENG"]).unwrap();
        assert_eq!(cli.output_format(OutputFormat::Detail), OutputFormat::Detail);
    }

    #[test]
    fn format_short_flag() {
        let cli = Cli::try_parse_from(["linear", "-f", "json", "teams", "list"]).unwrap();
        assert_eq!(cli.format, Some(OutputFormat::Json));

        let cli = Cli::try_parse_from(["linear", "issues", "list", "-f", "compact"]).unwrap();
        assert_eq!(cli.format, Some(OutputFormat::Compact));

        let cli = Cli::try_parse_from(["linear", "-o", "detail", "teams", "list"]).unwrap();
        assert_eq!(cli.format, Some(OutputFormat::Detail));
    }
}
