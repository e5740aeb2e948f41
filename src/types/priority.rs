use std::fmt;

use colored::Colorize;
use serde::{Deserialize, Serialize};

/// Issue priority, 0 (none) through 4 (low). Serialized as the bare integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(into = "i32", from = "Option<f64>")]
pub enum Priority {
    #[default]
    None = 0,
    Urgent = 1,
    High = 2,
    Medium = 3,
    Low = 4,
}

impl Priority {
    /// Strict conversion: only 0 through 4 are priorities.
    pub fn from_value(value: i64) -> Option<Self> {
        match value {
            0 => Some(Priority::None),
            1 => Some(Priority::Urgent),
            2 => Some(Priority::High),
            3 => Some(Priority::Medium),
            4 => Some(Priority::Low),
            _ => None,
        }
    }

    pub fn as_i32(self) -> i32 {
        self as i32
    }

    pub fn label(self) -> &'static str {
        match self {
            Priority::None => "No priority",
            Priority::Urgent => "Urgent",
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }

    /// Colorize any label (wire or local) with this priority's color.
    pub fn paint(self, label: &str) -> String {
        match self {
            Priority::None => label.to_string(),
            Priority::Urgent => label.red().bold().to_string(),
            Priority::High => label.yellow().bold().to_string(),
            Priority::Medium => label.blue().to_string(),
            Priority::Low => label.bright_black().to_string(),
        }
    }
}

impl From<Priority> for i32 {
    fn from(priority: Priority) -> Self {
        priority.as_i32()
    }
}

/// Linear sends priority as a Float; null or anything outside 0..=4 reads as no priority.
impl From<Option<f64>> for Priority {
    fn from(value: Option<f64>) -> Self {
        value
            .and_then(|v| Priority::from_value(v as i64))
            .unwrap_or_default()
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_exactly_zero_to_four() {
        for value in 0..=4 {
            assert_eq!(Priority::from_value(value).map(Priority::as_i32), Some(value as i32));
        }
        for value in [-1, 5, 100, i64::MIN, i64::MAX] {
            assert!(Priority::from_value(value).is_none(), "{value} accepted");
        }
    }

    #[test]
    fn deserializes_float_and_null() {
        let p: Priority = serde_json::from_str("2.0").unwrap();
        assert_eq!(p, Priority::High);
        let p: Priority = serde_json::from_str("null").unwrap();
        assert_eq!(p, Priority::None);
        let p: Priority = serde_json::from_str("9").unwrap();
        assert_eq!(p, Priority::None);
    }

    #[test]
    fn serializes_as_integer() {
        assert_eq!(serde_json::to_string(&Priority::Urgent).unwrap(), "1");
        assert_eq!(serde_json::to_string(&Priority::default()).unwrap(), "0");
    }
}
