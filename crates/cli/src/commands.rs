use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use stupid_cron::{Parser, Schedule};
use tracing::{debug, warn};

use crate::config::CliConfig;
use crate::output::{CheckReport, InactiveReport, NextReport, WindowEntry, WindowsReport};

/// Parse an expression with the configured parser.
pub fn parse_schedule(expr: &str, config: &CliConfig) -> Result<Schedule> {
    let parser = if config.seconds {
        Parser::with_seconds()
    } else {
        Parser::standard()
    };
    let schedule = parser
        .parse(expr)
        .with_context(|| format!("failed to parse expression '{}'", expr))?;
    debug!(expr, location = %schedule.location, "Parsed schedule");
    Ok(schedule)
}

/// Resolve an RFC 3339 reference instant in the configured zone, or now.
pub fn reference_instant(value: Option<&str>, tz: Tz) -> Result<DateTime<Tz>> {
    match value {
        Some(s) => {
            let parsed = DateTime::parse_from_rfc3339(s)
                .with_context(|| format!("invalid RFC 3339 timestamp '{}'", s))?;
            Ok(parsed.with_timezone(&tz))
        }
        None => Ok(Utc::now().with_timezone(&tz)),
    }
}

pub fn next(expr: &str, from: Option<&str>, count: usize, config: &CliConfig) -> Result<NextReport> {
    let schedule = parse_schedule(expr, config)?;
    let from = reference_instant(from, config.tz)?;

    let mut activations = Vec::with_capacity(count);
    let mut cursor = from;
    while activations.len() < count {
        let Some(t) = schedule.next(&cursor) else {
            break;
        };
        activations.push(t.fixed_offset());
        cursor = t;
    }

    Ok(NextReport {
        expression: expr.to_string(),
        from: from.fixed_offset(),
        activations,
    })
}

pub fn inactive(
    expr: &str,
    from: Option<&str>,
    cross_check: bool,
    config: &CliConfig,
) -> Result<InactiveReport> {
    let schedule = parse_schedule(expr, config)?;
    let from = reference_instant(from, config.tz)?;

    let found = schedule.next_inactive(&from);
    let reference = cross_check.then(|| schedule.next_inactive_reference(&from));
    if let Some(reference) = &reference {
        if *reference != found {
            warn!(
                expr,
                from = %from,
                bounded = ?found,
                reference = ?reference,
                "Inactive searches disagree"
            );
        }
    }

    Ok(InactiveReport {
        expression: expr.to_string(),
        from: from.fixed_offset(),
        always_active: schedule.is_always_active(),
        inactive: found.map(|t| t.fixed_offset()),
        reference: reference.map(|r| r.map(|t| t.fixed_offset())),
    })
}

pub fn windows(
    expr: &str,
    from: Option<&str>,
    count: usize,
    config: &CliConfig,
) -> Result<WindowsReport> {
    let schedule = parse_schedule(expr, config)?;
    let from = reference_instant(from, config.tz)?;

    let windows = schedule
        .windows(&from)
        .take(count)
        .map(|w| WindowEntry {
            start: w.start.fixed_offset(),
            end: w.end.map(|t| t.fixed_offset()),
        })
        .collect();

    Ok(WindowsReport {
        expression: expr.to_string(),
        from: from.fixed_offset(),
        windows,
    })
}

pub fn check(expr: &str, at: Option<&str>, config: &CliConfig) -> Result<CheckReport> {
    let schedule = parse_schedule(expr, config)?;
    let at = reference_instant(at, config.tz)?;

    Ok(CheckReport {
        expression: expr.to_string(),
        at: at.fixed_offset(),
        location: schedule.location.to_string(),
        active: schedule.is_active_at(&at),
        always_active: schedule.is_always_active(),
        seconds_enabled: schedule.seconds_enabled(),
        day_of_week_enabled: schedule.day_of_week_enabled(),
    })
}
