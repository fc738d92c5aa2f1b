//! The parsed schedule value.
//!
//! A [`Schedule`] is built once by the [`Parser`](crate::Parser) and never
//! mutated afterwards, so it can be shared freely between threads that are
//! computing activation or deactivation times in parallel.

pub mod field;

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, TimeZone};

use crate::parser::{ParseError, Parser};
use crate::windows::ActiveWindows;

// ── Location ────────────────────────────────────────────────────────

/// Timezone in which the schedule's field values are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Location {
    /// Interpret fields in whatever timezone the caller's instant carries.
    #[default]
    Local,
    /// Interpret fields in a fixed IANA zone.
    Zone(chrono_tz::Tz),
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Local => write!(f, "Local"),
            Location::Zone(tz) => write!(f, "{}", tz.name()),
        }
    }
}

// ── Options ─────────────────────────────────────────────────────────

bitflags::bitflags! {
    /// Which optional fields take part in the active predicate.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ScheduleOptions: u8 {
        /// The seconds field participates; otherwise every second matches.
        const SECONDS_ENABLED = 1 << 0;
        /// The day-of-week field participates; otherwise every weekday matches.
        const DAY_OF_WEEK_ENABLED = 1 << 1;
    }
}

// ── Schedule ────────────────────────────────────────────────────────

/// A cron schedule as per-field bit sets.
///
/// Bit `n` of a field is set when value `n` is allowed;
/// [`STAR_BIT`](field::STAR_BIT) marks a field written as `*`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    pub second: u64,
    pub minute: u64,
    pub hour: u64,
    pub day_of_month: u64,
    pub month: u64,
    pub day_of_week: u64,
    pub location: Location,
    pub options: ScheduleOptions,
}

impl Schedule {
    pub fn seconds_enabled(&self) -> bool {
        self.options.contains(ScheduleOptions::SECONDS_ENABLED)
    }

    pub fn day_of_week_enabled(&self) -> bool {
        self.options.contains(ScheduleOptions::DAY_OF_WEEK_ENABLED)
    }

    /// The next activation time strictly after `from`.
    ///
    /// Returns `None` when nothing matches within five years.
    pub fn next<Z: TimeZone>(&self, from: &DateTime<Z>) -> Option<DateTime<Z>> {
        crate::next::next(self, from)
    }

    /// The first whole second strictly after `from` at which the schedule
    /// does not match.
    ///
    /// Returns `None` for schedules that are always active, and for
    /// schedules that stay active until the five-year horizon.
    pub fn next_inactive<Z: TimeZone>(&self, from: &DateTime<Z>) -> Option<DateTime<Z>> {
        crate::inactive::next_inactive(self, from)
    }

    /// Same answer as [`next_inactive`](Self::next_inactive), computed by
    /// walking the calendar from the coarsest field down. Slower; kept for
    /// cross-checking.
    pub fn next_inactive_reference<Z: TimeZone>(
        &self,
        from: &DateTime<Z>,
    ) -> Option<DateTime<Z>> {
        crate::inactive::mirror::next_inactive(self, from)
    }

    /// Whether every enforced field matches `at`.
    pub fn is_active_at<Z: TimeZone>(&self, at: &DateTime<Z>) -> bool {
        crate::matcher::is_active_at(self, at)
    }

    /// Whether the schedule matches every instant.
    pub fn is_always_active(&self) -> bool {
        crate::matcher::is_always_active(self)
    }

    /// Active windows after `from`, in order.
    pub fn windows<Z: TimeZone>(&self, from: &DateTime<Z>) -> ActiveWindows<'_, Z> {
        ActiveWindows::new(self, from.clone())
    }
}

impl FromStr for Schedule {
    type Err = ParseError;

    /// Parse with the standard 5-field parser.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Parser::standard().parse(s)
    }
}
