//! Round-trip an issue's editable fields through the user's text editor.
//!
//! The file is YAML: editable fields as keys, read-only context as `#` comments.

use std::io::{ErrorKind, Write};
use std::path::Path;
use std::process::Command;

use serde::Serialize;
use serde_json::{json, Map, Value};
use serde_yaml::{Mapping, Value as Yaml};

use crate::error::{LinearError, Result};
use crate::types::{Issue, Priority};

const FALLBACK_EDITOR: &str = "vi";
const RULE: &str =
    "# -----------------------------------------------------------------------------";

/// Editable fields plus the context shown alongside them.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IssueEdit {
    pub title: String,
    pub description: Option<String>,
    pub priority: Priority,
    pub estimate: Option<u32>,
    pub context: IssueContext,
}

/// Read-only fields, written as comments and carried over unchanged.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IssueContext {
    pub team: Option<String>,
    pub assignee: Option<String>,
    pub project: Option<String>,
    pub labels: Vec<String>,
    pub state: Option<String>,
}

#[derive(Serialize)]
struct EditableFields<'a> {
    title: &'a str,
    description: Option<&'a str>,
    priority: i32,
    estimate: Option<u32>,
}

impl From<&Issue> for IssueEdit {
    fn from(issue: &Issue) -> Self {
        let non_empty = |s: &str| (!s.is_empty()).then(|| s.to_string());
        Self {
            title: issue.title.trim().to_string(),
            description: issue
                .description
                .as_deref()
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .map(String::from),
            priority: issue.priority,
            estimate: issue
                .estimate
                .filter(|e| *e >= 0.0)
                .map(|e| e.round() as u32),
            context: IssueContext {
                team: non_empty(&issue.team.name),
                assignee: issue
                    .assignee
                    .as_ref()
                    .and_then(|a| non_empty(&a.email).or_else(|| non_empty(&a.name))),
                project: issue.project.as_ref().and_then(|p| non_empty(&p.name)),
                labels: issue.labels.iter().map(|l| l.name.clone()).collect(),
                state: non_empty(&issue.state.name),
            },
        }
    }
}

impl IssueEdit {
    /// Mutation input holding only the fields that differ from `self`.
    pub fn changes(&self, edited: &IssueEdit) -> Map<String, Value> {
        let mut input = Map::new();
        if edited.title != self.title {
            input.insert("title".to_string(), json!(edited.title));
        }
        if edited.description != self.description {
            input.insert("description".to_string(), json!(edited.description));
        }
        if edited.priority != self.priority {
            input.insert("priority".to_string(), json!(edited.priority.as_i32()));
        }
        if edited.estimate != self.estimate {
            input.insert("estimate".to_string(), json!(edited.estimate));
        }
        input
    }
}

pub fn serialize(edit: &IssueEdit) -> Result<String> {
    let fields = serde_yaml::to_string(&EditableFields {
        title: &edit.title,
        description: edit.description.as_deref(),
        priority: edit.priority.as_i32(),
        estimate: edit.estimate,
    })?;

    let mut lines = vec![
        "# Linear Issue - Edit as needed".to_string(),
        "# When done, save and close your editor".to_string(),
        "# Priority: 0=None, 1=Urgent, 2=High, 3=Medium, 4=Low".to_string(),
        "# Estimate: story points (whole number) or null".to_string(),
        String::new(),
        fields.trim_end().to_string(),
        String::new(),
        RULE.to_string(),
        "# The following fields are read-only (informational only)".to_string(),
        "# To change these, cancel and use the Linear app".to_string(),
        RULE.to_string(),
        String::new(),
    ];

    let ctx = &edit.context;
    if let Some(team) = &ctx.team {
        lines.push(format!("# team: {team}"));
    }
    if let Some(assignee) = &ctx.assignee {
        lines.push(format!("# assignee: {assignee}"));
    }
    if let Some(project) = &ctx.project {
        lines.push(format!("# project: {project}"));
    }
    if !ctx.labels.is_empty() {
        lines.push(format!("# labels: [{}]", ctx.labels.join(", ")));
    }
    if let Some(state) = &ctx.state {
        lines.push(format!("# state: {state}"));
    }

    let mut out = lines.join("\n");
    out.push('\n');
    Ok(out)
}

/// Parse edited text into its top-level mapping.
pub fn parse(content: &str) -> Result<Mapping> {
    match serde_yaml::from_str::<Yaml>(content)? {
        Yaml::Mapping(map) => Ok(map),
        Yaml::Null => Err(LinearError::Validation(
            "file is empty or contains only comments".to_string(),
        )),
        _ => Err(LinearError::Validation(
            "expected `key: value` fields".to_string(),
        )),
    }
}

fn scalar_text(value: &Yaml) -> Option<String> {
    match value {
        Yaml::String(s) => Some(s.clone()),
        Yaml::Number(n) => Some(n.to_string()),
        Yaml::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn integer(field: &str, value: &Yaml) -> Result<i64> {
    let parsed = match value {
        Yaml::Number(n) => n.as_i64(),
        Yaml::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| {
        let shown = scalar_text(value).unwrap_or_else(|| format!("{value:?}"));
        LinearError::Validation(format!("{field} must be a whole number, got: {shown}"))
    })
}

/// Validate edited fields and merge them with the original's read-only context.
pub fn validate(original: &IssueEdit, edited: &Mapping) -> Result<IssueEdit> {
    let title = edited
        .get("title")
        .and_then(scalar_text)
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .ok_or_else(|| LinearError::Validation("title cannot be empty".to_string()))?;

    let description = match edited.get("description") {
        None | Some(Yaml::Null) => None,
        Some(value) => scalar_text(value)
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty()),
    };

    let priority = match edited.get("priority") {
        None => original.priority,
        Some(Yaml::Null) => Priority::None,
        Some(value) => Priority::from_value(integer("priority", value)?).ok_or_else(|| {
            LinearError::Validation(
                "priority must be between 0 and 4 (0=None, 1=Urgent, 2=High, 3=Medium, 4=Low)"
                    .to_string(),
            )
        })?,
    };

    let estimate = match edited.get("estimate") {
        None | Some(Yaml::Null) => None,
        Some(value) => {
            let estimate = integer("estimate", value)?;
            let estimate = u32::try_from(estimate).map_err(|_| {
                LinearError::Validation("estimate must be non-negative".to_string())
            })?;
            Some(estimate)
        }
    };

    Ok(IssueEdit {
        title,
        description,
        priority,
        estimate,
        context: original.context.clone(),
    })
}

/// Editor command: config, then $VISUAL, then $EDITOR, then `vi`.
pub fn editor_command(configured: Option<&str>) -> String {
    let visual = std::env::var("VISUAL").ok();
    let editor = std::env::var("EDITOR").ok();
    pick_editor(configured, visual.as_deref(), editor.as_deref())
}

fn pick_editor(configured: Option<&str>, visual: Option<&str>, editor: Option<&str>) -> String {
    [configured, visual, editor]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|cmd| !cmd.is_empty())
        .unwrap_or(FALLBACK_EDITOR)
        .to_string()
}

fn run_editor(command: &str, path: &Path) -> Result<()> {
    let mut parts = command.split_whitespace();
    let program = parts
        .next()
        .ok_or_else(|| LinearError::EditorFailed("no editor configured".to_string()))?;

    tracing::debug!(editor = program, path = %path.display(), "launching editor");

    let status = Command::new(program)
        .args(parts)
        .arg(path)
        .status()
        .map_err(|e| match e.kind() {
            ErrorKind::NotFound => LinearError::EditorFailed(format!(
                "editor '{program}' not found in PATH. Set EDITOR to your preferred editor."
            )),
            _ => LinearError::EditorFailed(format!("could not start '{program}': {e}")),
        })?;

    if !status.success() {
        return Err(LinearError::EditorFailed(match status.code() {
            Some(code) => format!("editor exited with code {code}"),
            None => "editor was terminated by a signal".to_string(),
        }));
    }
    Ok(())
}

fn read_edited(path: &Path) -> Result<String> {
    let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => {
            LinearError::EditorFailed("temporary file was deleted during editing".to_string())
        }
        _ => LinearError::Io(e),
    })?;

    if content.trim().is_empty() {
        return Err(LinearError::Validation("edited file is empty".to_string()));
    }
    Ok(content)
}

/// Open `edit` in `editor` and return the validated result.
///
/// The temporary file is removed when this returns, on success and on every error.
pub fn edit_in_editor(edit: &IssueEdit, editor: &str) -> Result<IssueEdit> {
    let mut file = tempfile::Builder::new()
        .prefix("linear-issue-")
        .suffix(".yaml")
        .tempfile()?;
    file.write_all(serialize(edit)?.as_bytes())?;
    file.flush()?;

    run_editor(editor, file.path())?;
    let content = read_edited(file.path())?;
    let fields = parse(&content)?;
    validate(edit, &fields)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> IssueEdit {
        IssueEdit {
            title: "Fix login: redirect loop".to_string(),
            description: Some("Steps:\n1. open app\n2. log in\n\n# not a comment".to_string()),
            priority: Priority::High,
            estimate: Some(3),
            context: IssueContext {
                team: Some("Engineering".to_string()),
                assignee: Some("ada@example.com".to_string()),
                project: None,
                labels: vec!["bug".to_string(), "auth".to_string()],
                state: Some("In Progress".to_string()),
            },
        }
    }

    fn fields(yaml: &str) -> Mapping {
        parse(yaml).unwrap()
    }

    #[test]
    fn unmodified_round_trip_is_identity() {
        let original = sample();
        let text = serialize(&original).unwrap();
        let back = validate(&original, &parse(&text).unwrap()).unwrap();
        assert_eq!(back, original);
        assert!(original.changes(&back).is_empty());
    }

    #[test]
    fn round_trip_without_optional_fields() {
        let original = IssueEdit {
            title: "yes".to_string(),
            priority: Priority::None,
            ..IssueEdit::default()
        };
        let text = serialize(&original).unwrap();
        assert_eq!(validate(&original, &parse(&text).unwrap()).unwrap(), original);
    }

    #[test]
    fn context_is_written_as_comments() {
        let text = serialize(&sample()).unwrap();
        assert!(text.contains("# team: Engineering"));
        assert!(text.contains("# assignee: ada@example.com"));
        assert!(text.contains("# labels: [bug, auth]"));
        assert!(text.contains("# state: In Progress"));
        assert!(!text.contains("# project:"));
        assert!(!parse(&text).unwrap().contains_key("team"));
    }

    #[test]
    fn title_is_required() {
        for yaml in ["title: ''", "title: '   '", "title: null", "priority: 1"] {
            let err = validate(&sample(), &fields(yaml)).unwrap_err();
            assert!(matches!(err, LinearError::Validation(_)), "{yaml}");
        }
    }

    #[test]
    fn priority_accepts_exactly_zero_to_four() {
        for value in 0..=4 {
            let edited = validate(&sample(), &fields(&format!("title: t\npriority: {value}"))).unwrap();
            assert_eq!(edited.priority.as_i32(), value);
        }
        for bad in ["5", "-1", "high", "1.5", "[1]"] {
            let result = validate(&sample(), &fields(&format!("title: t\npriority: {bad}")));
            assert!(matches!(result, Err(LinearError::Validation(_))), "{bad} accepted");
        }
    }

    #[test]
    fn priority_defaults() {
        let kept = validate(&sample(), &fields("title: t")).unwrap();
        assert_eq!(kept.priority, Priority::High);
        let cleared = validate(&sample(), &fields("title: t\npriority: null")).unwrap();
        assert_eq!(cleared.priority, Priority::None);
        let quoted = validate(&sample(), &fields("title: t\npriority: '3'")).unwrap();
        assert_eq!(quoted.priority, Priority::Medium);
    }

    #[test]
    fn estimate_must_be_non_negative_integer() {
        let edited = validate(&sample(), &fields("title: t\nestimate: 8")).unwrap();
        assert_eq!(edited.estimate, Some(8));
        let edited = validate(&sample(), &fields("title: t\nestimate: null")).unwrap();
        assert_eq!(edited.estimate, None);
        for bad in ["-1", "lots", "2.5"] {
            let result = validate(&sample(), &fields(&format!("title: t\nestimate: {bad}")));
            assert!(matches!(result, Err(LinearError::Validation(_))), "{bad} accepted");
        }
    }

    #[test]
    fn description_is_trimmed_and_optional() {
        let edited = validate(&sample(), &fields("title: t\ndescription: '  '")).unwrap();
        assert_eq!(edited.description, None);
        let edited = validate(&sample(), &fields("title: t")).unwrap();
        assert_eq!(edited.description, None);
    }

    #[test]
    fn malformed_yaml_is_parse_error() {
        assert!(matches!(
            parse("title: [unclosed"),
            Err(LinearError::EditorParse(_))
        ));
        assert!(matches!(
            parse("# only comments\n"),
            Err(LinearError::Validation(_))
        ));
        assert!(matches!(parse("- a\n- b\n"), Err(LinearError::Validation(_))));
    }

    #[test]
    fn changes_only_include_edited_fields() {
        let original = sample();
        let mut edited = original.clone();
        edited.title = "New title".to_string();
        edited.estimate = None;

        let input = original.changes(&edited);
        assert_eq!(input.len(), 2);
        assert_eq!(input["title"], "New title");
        assert!(input["estimate"].is_null());
    }

    #[test]
    fn editor_precedence() {
        assert_eq!(pick_editor(Some("code --wait"), Some("nano"), None), "code --wait");
        assert_eq!(pick_editor(None, Some("nano"), Some("vim")), "nano");
        assert_eq!(pick_editor(None, Some(""), Some("vim")), "vim");
        assert_eq!(pick_editor(None, None, None), "vi");
    }

    #[test]
    fn edit_from_issue_keeps_context() {
        use crate::types::{Label, TeamRef, UserRef};

        let issue = Issue {
            title: "Title".to_string(),
            estimate: Some(2.0),
            team: TeamRef {
                name: "Engineering".to_string(),
                ..TeamRef::default()
            },
            assignee: Some(UserRef {
                name: "Ada".to_string(),
                ..UserRef::default()
            }),
            labels: vec![Label {
                name: "bug".to_string(),
                ..Label::default()
            }],
            ..Issue::default()
        };

        let edit = IssueEdit::from(&issue);
        assert_eq!(edit.estimate, Some(2));
        assert_eq!(edit.context.team.as_deref(), Some("Engineering"));
        assert_eq!(edit.context.assignee.as_deref(), Some("Ada"));
        assert_eq!(edit.context.labels, vec!["bug"]);
        assert_eq!(edit.context.state, None);
    }

    #[test]
    fn untouched_file_from_padded_issue_has_no_changes() {
        let issue = Issue {
            title: "Fix login ".to_string(),
            description: Some("Steps to reproduce\n".to_string()),
            ..Issue::default()
        };

        let original = IssueEdit::from(&issue);
        assert_eq!(original.title, "Fix login");
        assert_eq!(original.description.as_deref(), Some("Steps to reproduce"));

        let text = serialize(&original).unwrap();
        let back = validate(&original, &parse(&text).unwrap()).unwrap();
        assert!(original.changes(&back).is_empty());

        let blank = Issue {
            title: "t".to_string(),
            description: Some("  \n".to_string()),
            ..Issue::default()
        };
        assert_eq!(IssueEdit::from(&blank).description, None);
    }

    #[cfg(unix)]
    mod with_editor {
        use super::*;
        use tempfile::TempDir;

        /// Editor command running a shell script; `$1` is the file being edited.
        fn script_editor(dir: &TempDir, body: &str) -> String {
            let script = dir.path().join("editor.sh");
            std::fs::write(&script, format!("{body}\n")).unwrap();
            format!("sh {}", script.display())
        }

        #[test]
        fn noop_editor_returns_original() {
            let original = sample();
            assert_eq!(edit_in_editor(&original, "true").unwrap(), original);
        }

        #[test]
        fn edited_file_is_read_back() {
            let dir = TempDir::new().unwrap();
            let editor = script_editor(&dir, "printf 'title: Renamed\\npriority: 1\\n' > \"$1\"");

            let edited = edit_in_editor(&sample(), &editor).unwrap();
            assert_eq!(edited.title, "Renamed");
            assert_eq!(edited.priority, Priority::Urgent);
            assert_eq!(edited.description, None);
            assert_eq!(edited.context, sample().context);
        }

        #[test]
        fn non_zero_exit_is_editor_failure() {
            let err = edit_in_editor(&sample(), "false").unwrap_err();
            assert!(matches!(err, LinearError::EditorFailed(_)));
        }

        #[test]
        fn missing_editor_is_editor_failure() {
            let err = edit_in_editor(&sample(), "definitely-not-an-editor-xyz").unwrap_err();
            assert!(matches!(err, LinearError::EditorFailed(_)));
        }

        #[test]
        fn deleted_file_is_reported() {
            let err = edit_in_editor(&sample(), "rm -f").unwrap_err();
            assert!(err.to_string().contains("deleted"));
        }

        #[test]
        fn emptied_file_is_rejected() {
            let dir = TempDir::new().unwrap();
            let editor = script_editor(&dir, "printf '  \\n' > \"$1\"");
            let err = edit_in_editor(&sample(), &editor).unwrap_err();
            assert!(matches!(err, LinearError::Validation(_)));
        }

        #[test]
        fn temp_file_is_removed_on_failure() {
            let dir = TempDir::new().unwrap();
            let record = dir.path().join("edited-path");
            let editor = script_editor(
                &dir,
                &format!("echo \"$1\" > {}\nexit 3", record.display()),
            );

            let err = edit_in_editor(&sample(), &editor).unwrap_err();
            assert!(err.to_string().contains("code 3"));

            let edited_path = std::fs::read_to_string(&record).unwrap();
            assert!(!Path::new(edited_path.trim()).exists());
        }

        #[test]
        fn temp_file_is_removed_on_success() {
            let dir = TempDir::new().unwrap();
            let record = dir.path().join("edited-path");
            let editor = script_editor(&dir, &format!("echo \"$1\" > {}", record.display()));

            edit_in_editor(&sample(), &editor).unwrap();

            let edited_path = std::fs::read_to_string(&record).unwrap();
            assert!(edited_path.trim().ends_with(".yaml"));
            assert!(!Path::new(edited_path.trim()).exists());
        }
    }
}
