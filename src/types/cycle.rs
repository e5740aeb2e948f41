use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::TeamRef;
use crate::responses::default_on_null;

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct Cycle {
    pub id: String,
    pub number: i32,
    pub name: Option<String>,
    pub description: Option<String>,
    pub starts_at: String,
    pub ends_at: String,
    pub completed_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    pub archived_at: Option<String>,
    pub progress: f64,
    pub is_active: bool,
    pub is_future: bool,
    pub is_past: bool,
    pub is_next: bool,
    pub is_previous: bool,
    #[serde(deserialize_with = "default_on_null")]
    pub team: TeamRef,
    #[serde(deserialize_with = "default_on_null")]
    pub scope_history: Vec<f64>,
    #[serde(deserialize_with = "default_on_null")]
    pub issue_count_history: Vec<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleStatus {
    Active,
    Future,
    Past,
    Unknown,
}

impl fmt::Display for CycleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CycleStatus::Active => "Active",
            CycleStatus::Future => "Future",
            CycleStatus::Past => "Past",
            CycleStatus::Unknown => "Unknown",
        };
        f.write_str(label)
    }
}

impl Cycle {
    pub fn display_name(&self) -> String {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => format!("Cycle #{}", self.number),
        }
    }

    /// Status relative to `now`, from the cycle's dates. The server flags
    /// are only consulted when the dates do not parse.
    pub fn status_at(&self, now: DateTime<Utc>) -> CycleStatus {
        let starts = self.starts_at.parse::<DateTime<Utc>>();
        let ends = self.ends_at.parse::<DateTime<Utc>>();

        match (starts, ends) {
            (Ok(starts), _) if now < starts => CycleStatus::Future,
            (_, Ok(ends)) if now >= ends => CycleStatus::Past,
            (Ok(_), Ok(_)) => CycleStatus::Active,
            _ if self.is_active => CycleStatus::Active,
            _ if self.is_future => CycleStatus::Future,
            _ if self.is_past => CycleStatus::Past,
            _ => CycleStatus::Unknown,
        }
    }

    pub fn status(&self) -> CycleStatus {
        self.status_at(Utc::now())
    }
}

/// A cycle embedded in an issue.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct CycleRef {
    pub id: String,
    pub number: i32,
    pub name: Option<String>,
}

impl CycleRef {
    pub fn display_name(&self) -> String {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => format!("Cycle #{}", self.number),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cycle(starts_at: &str, ends_at: &str) -> Cycle {
        Cycle {
            starts_at: starts_at.to_string(),
            ends_at: ends_at.to_string(),
            ..Cycle::default()
        }
    }

    fn at(iso: &str) -> DateTime<Utc> {
        iso.parse().unwrap()
    }

    #[test]
    fn status_is_derived_from_dates() {
        let c = cycle("2024-03-01T00:00:00.000Z", "2024-03-15T00:00:00.000Z");
        assert_eq!(c.status_at(at("2024-02-20T00:00:00Z")), CycleStatus::Future);
        assert_eq!(c.status_at(at("2024-03-05T00:00:00Z")), CycleStatus::Active);
        assert_eq!(c.status_at(at("2024-03-15T00:00:00Z")), CycleStatus::Past);
    }

    #[test]
    fn dates_win_over_stale_flags() {
        let mut c = cycle("2024-03-01T00:00:00.000Z", "2024-03-15T00:00:00.000Z");
        c.is_active = true;
        assert_eq!(c.status_at(at("2024-04-01T00:00:00Z")), CycleStatus::Past);
    }

    #[test]
    fn flags_are_used_without_dates() {
        let mut c = cycle("", "");
        assert_eq!(c.status_at(Utc::now()), CycleStatus::Unknown);
        c.is_future = true;
        assert_eq!(c.status_at(Utc::now()), CycleStatus::Future);
    }

    #[test]
    fn unnamed_cycle_uses_number() {
        let c = Cycle {
            number: 7,
            name: Some(String::new()),
            ..Cycle::default()
        };
        assert_eq!(c.display_name(), "Cycle #7");
    }

    #[test]
    fn history_null_is_empty() {
        let c: Cycle = serde_json::from_str(r#"{"scopeHistory": null, "number": 3}"#).unwrap();
        assert!(c.scope_history.is_empty());
        assert_eq!(c.number, 3);
    }
}
