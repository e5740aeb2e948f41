//! Rendering of records as tables, JSON, compact lines and detail views.

pub mod grouped;

use colored::Colorize;
use serde::Serialize;
use serde_json::json;
use tabled::{settings::Style, Table, Tabled};

use crate::cli::OutputFormat;
use crate::error::Result;

/// A record kind that can be listed.
pub trait Listing: Serialize {
    /// JSON wrapper key and summary noun, e.g. `issues`.
    const PLURAL: &'static str;
    /// Singular noun for the summary line, e.g. `issue`.
    const NOUN: &'static str;

    type Row: Tabled;

    fn row(&self) -> Self::Row;

    /// One line, no padding.
    fn compact(&self) -> String;

    /// Labeled, sectioned dump for single-record lookups.
    fn detail(&self) -> String;
}

/// Render a list in the requested format.
pub fn render_list<T: Listing>(items: &[T], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => {
            let mut wrapper = serde_json::Map::new();
            wrapper.insert(T::PLURAL.to_string(), serde_json::to_value(items)?);
            wrapper.insert("count".to_string(), json!(items.len()));
            Ok(serde_json::to_string_pretty(&wrapper)?)
        }
        _ if items.is_empty() => Ok(format!("No {} found.", T::PLURAL).yellow().to_string()),
        OutputFormat::Table => {
            let rows: Vec<T::Row> = items.iter().map(Listing::row).collect();
            let table = Table::new(rows).with(Style::rounded()).to_string();
            Ok(format!("{table}\n\n{}", total_line::<T>(items.len())))
        }
        OutputFormat::Compact => Ok(items
            .iter()
            .map(Listing::compact)
            .collect::<Vec<_>>()
            .join("\n")),
        OutputFormat::Detail => Ok(items
            .iter()
            .map(Listing::detail)
            .collect::<Vec<_>>()
            .join("\n")),
    }
}

/// Render a single record; JSON is the bare entity.
pub fn render_one<T: Listing>(item: &T, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(item)?),
        OutputFormat::Table => Ok(Table::new([item.row()]).with(Style::rounded()).to_string()),
        OutputFormat::Compact => Ok(item.compact()),
        OutputFormat::Detail => Ok(item.detail()),
    }
}

pub fn total_line<T: Listing>(count: usize) -> String {
    format!("Total: {count} {}(s)", T::NOUN).dimmed().to_string()
}

pub fn print(rendered: &str) {
    println!("{rendered}");
}

/// Format status with color based on state type
pub fn status_colored(status: &str, state_type: &str) -> String {
    match state_type {
        "completed" => status.green().to_string(),
        "started" => status.blue().to_string(),
        "canceled" => status.red().to_string(),
        "backlog" | "triage" => status.bright_black().to_string(),
        _ => status.to_string(),
    }
}

/// Paint text with a `#rrggbb` color, leaving it plain when the color is malformed.
pub fn hex_colored(text: &str, hex: &str) -> String {
    match parse_hex_color(hex) {
        Ok((r, g, b)) => text.truecolor(r, g, b).to_string(),
        Err(()) => text.to_string(),
    }
}

fn parse_hex_color(hex: &str) -> std::result::Result<(u8, u8, u8), ()> {
    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return Err(());
    }
    let r = u8::from_str_radix(&hex[0..2], 16).map_err(|_| ())?;
    let g = u8::from_str_radix(&hex[2..4], 16).map_err(|_| ())?;
    let b = u8::from_str_radix(&hex[4..6], 16).map_err(|_| ())?;
    Ok((r, g, b))
}

/// Format a date string as date only
pub fn format_date_only(iso: &str) -> String {
    use chrono::{DateTime, Utc};

    if let Ok(dt) = iso.parse::<DateTime<Utc>>() {
        dt.format("%Y-%m-%d").to_string()
    } else {
        iso.split('T').next().unwrap_or(iso).to_string()
    }
}

/// Same as [`format_date_only`] with a placeholder for missing dates.
pub fn format_optional_date(iso: Option<&str>) -> String {
    match iso {
        Some(iso) if !iso.is_empty() => format_date_only(iso),
        _ => "—".to_string(),
    }
}

/// Progress fraction as a whole percentage, clamped to 0..=100.
pub fn format_progress(progress: f64) -> String {
    format!("{:.0}%", progress.clamp(0.0, 1.0) * 100.0)
}

pub fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}

/// Truncate a string with ellipsis
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

/// Bold section label used by detail views.
pub fn field(label: &str, value: impl std::fmt::Display) -> String {
    format!("{} {value}\n", format!("{label}:").bold())
}

pub fn terminal_width() -> usize {
    crossterm::terminal::size()
        .map(|(columns, _)| columns as usize)
        .unwrap_or(120)
}

#[cfg(test)]
pub(crate) fn plain() {
    colored::control::set_override(false);
}
