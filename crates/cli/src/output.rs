//! Reports printed by the subcommands, as text or JSON.

use std::fmt::Write as _;

use anyhow::{Context, Result};
use chrono::{DateTime, FixedOffset};
use serde::Serialize;

type Instant = DateTime<FixedOffset>;

pub trait Report: Serialize {
    fn text(&self) -> String;
}

/// Print a report to stdout.
pub fn emit<R: Report>(report: &R, json: bool) -> Result<()> {
    if json {
        let out = serde_json::to_string_pretty(report).context("failed to serialize report")?;
        println!("{}", out);
    } else {
        print!("{}", report.text());
    }
    Ok(())
}

fn fmt_opt(t: &Option<Instant>) -> String {
    match t {
        Some(t) => t.to_rfc3339(),
        None => "none".to_string(),
    }
}

#[derive(Debug, Serialize)]
pub struct NextReport {
    pub expression: String,
    pub from: Instant,
    pub activations: Vec<Instant>,
}

impl Report for NextReport {
    fn text(&self) -> String {
        if self.activations.is_empty() {
            return "no activation within the search horizon\n".to_string();
        }
        let mut out = String::new();
        for t in &self.activations {
            let _ = writeln!(out, "{}", t.to_rfc3339());
        }
        out
    }
}

#[derive(Debug, Serialize)]
pub struct InactiveReport {
    pub expression: String,
    pub from: Instant,
    pub always_active: bool,
    pub inactive: Option<Instant>,
    /// Answer of the calendar walk, when a cross-check was requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<Option<Instant>>,
}

impl InactiveReport {
    pub fn agrees(&self) -> bool {
        self.reference.map_or(true, |r| r == self.inactive)
    }
}

impl Report for InactiveReport {
    fn text(&self) -> String {
        let mut out = match (&self.inactive, self.always_active) {
            (Some(t), _) => format!("{}\n", t.to_rfc3339()),
            (None, true) => "none (always active)\n".to_string(),
            (None, false) => "none (active through the search horizon)\n".to_string(),
        };
        if let Some(reference) = &self.reference {
            let verdict = if self.agrees() { "agrees" } else { "DISAGREES" };
            let _ = writeln!(out, "cross-check: {} ({})", fmt_opt(reference), verdict);
        }
        out
    }
}

#[derive(Debug, Serialize)]
pub struct WindowEntry {
    pub start: Instant,
    pub end: Option<Instant>,
}

#[derive(Debug, Serialize)]
pub struct WindowsReport {
    pub expression: String,
    pub from: Instant,
    pub windows: Vec<WindowEntry>,
}

impl Report for WindowsReport {
    fn text(&self) -> String {
        if self.windows.is_empty() {
            return "no active window within the search horizon\n".to_string();
        }
        let mut out = String::new();
        for w in &self.windows {
            let _ = writeln!(out, "{} .. {}", w.start.to_rfc3339(), fmt_opt(&w.end));
        }
        out
    }
}

#[derive(Debug, Serialize)]
pub struct CheckReport {
    pub expression: String,
    pub at: Instant,
    pub location: String,
    pub active: bool,
    pub always_active: bool,
    pub seconds_enabled: bool,
    pub day_of_week_enabled: bool,
}

impl Report for CheckReport {
    fn text(&self) -> String {
        let state = if self.active { "active" } else { "inactive" };
        let mut out = format!("{} at {} ({})\n", state, self.at.to_rfc3339(), self.location);
        if self.always_active {
            out.push_str("schedule is always active\n");
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(s: &str) -> Instant {
        DateTime::parse_from_rfc3339(s).unwrap()
    }

    #[test]
    fn test_inactive_text_and_cross_check() {
        let report = InactiveReport {
            expression: "* * * 12 *".to_string(),
            from: at("2020-01-01T12:00:00Z"),
            always_active: false,
            inactive: Some(at("2020-01-01T12:00:01Z")),
            reference: Some(Some(at("2020-01-01T12:00:01Z"))),
        };
        assert!(report.agrees());
        let text = report.text();
        assert!(text.starts_with("2020-01-01T12:00:01+00:00"));
        assert!(text.contains("agrees"));
    }

    #[test]
    fn test_inactive_disagreement() {
        let report = InactiveReport {
            expression: "* * * 12 *".to_string(),
            from: at("2020-01-01T12:00:00Z"),
            always_active: false,
            inactive: Some(at("2020-01-01T12:00:01Z")),
            reference: Some(None),
        };
        assert!(!report.agrees());
        assert!(report.text().contains("DISAGREES"));
    }

    #[test]
    fn test_reference_omitted_from_json_when_not_requested() {
        let report = InactiveReport {
            expression: "* * * * *".to_string(),
            from: at("2020-01-01T12:00:00Z"),
            always_active: true,
            inactive: None,
            reference: None,
        };
        let value = serde_json::to_value(&report).unwrap();
        assert!(value.get("reference").is_none());
        assert_eq!(value["always_active"], true);
        assert!(value["inactive"].is_null());
        assert_eq!(report.text(), "none (always active)\n");
    }

    #[test]
    fn test_windows_text() {
        let report = WindowsReport {
            expression: "* 9-16 * * *".to_string(),
            from: at("2021-06-14T00:00:00Z"),
            windows: vec![WindowEntry {
                start: at("2021-06-14T09:00:00Z"),
                end: Some(at("2021-06-14T17:00:00Z")),
            }],
        };
        assert_eq!(
            report.text(),
            "2021-06-14T09:00:00+00:00 .. 2021-06-14T17:00:00+00:00\n"
        );
    }
}
