mod attachment;
mod cycle;
mod issue;
mod label;
mod priority;
mod project;
mod team;
mod user;

pub use attachment::Attachment;
pub use cycle::{Cycle, CycleRef, CycleStatus};
pub use issue::{Comment, Issue, IssueRef, IssueSummary, WorkflowState};
pub use label::{Label, LabelRef};
pub use priority::Priority;
pub use project::{Project, ProjectRef};
pub use team::{Organization, Team, TeamRef};
pub use user::{User, UserRef};
