//! Next-deactivation search.
//!
//! A schedule is inactive at an instant as soon as any single enforced field
//! fails to match there. So the earliest inactive instant after a reference
//! time is the earliest, over all fields, of the first instant at which that
//! one field stops matching. Each field's value only changes on its own unit
//! boundaries and cycles through its whole range within (cardinality + 1)
//! units, which bounds every per-field scan by the field's size rather than
//! by calendar distance.
//!
//! [`mirror`] holds a slower walk over the same calendar used to cross-check
//! this one.

pub mod mirror;

#[cfg(test)]
mod tests;

use chrono::{DateTime, Datelike, Duration, TimeZone, Timelike};
use tracing::{debug, trace};

use crate::calendar::{self, Walk};
use crate::matcher::{day_matches, fields_match};
use crate::schedule::field::{self, contains, covers_all, is_wildcard};
use crate::schedule::Schedule;

/// First whole second after `from` at which `schedule` does not match, or
/// `None` when it stays active through the search horizon.
pub fn next_inactive<Z: TimeZone>(schedule: &Schedule, from: &DateTime<Z>) -> Option<DateTime<Z>> {
    if schedule.is_always_active() {
        return None;
    }
    calendar::run_in_location(schedule, from, &BoundedScan)
}

// ── Calendar units ──────────────────────────────────────────────────

/// The calendar unit each schedule field lives on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Unit {
    Second,
    Minute,
    Hour,
    Day,
    Month,
}

impl Unit {
    pub(crate) const FINEST_FIRST: [Unit; 5] =
        [Unit::Second, Unit::Minute, Unit::Hour, Unit::Day, Unit::Month];

    /// Whether the field places any restriction at all (no wildcard marker,
    /// and taking part in the active predicate).
    pub(crate) fn is_restricted(self, s: &Schedule) -> bool {
        match self {
            Unit::Second => s.seconds_enabled() && !is_wildcard(s.second),
            Unit::Minute => !is_wildcard(s.minute),
            Unit::Hour => !is_wildcard(s.hour),
            Unit::Day => dom_restricted(s) || dow_restricted(s),
            Unit::Month => !is_wildcard(s.month),
        }
    }

    /// Whether the field rejects at least one instant. Stricter than
    /// [`is_restricted`](Self::is_restricted): `0-59` is a restriction that
    /// excludes nothing.
    pub(crate) fn excludes_some(self, s: &Schedule) -> bool {
        if !self.is_restricted(s) {
            return false;
        }
        match self {
            Unit::Second => !covers_all(s.second, &field::SECONDS),
            Unit::Minute => !covers_all(s.minute, &field::MINUTES),
            Unit::Hour => !covers_all(s.hour, &field::HOURS),
            Unit::Day => {
                let dom_excludes = dom_restricted(s) && !covers_all(s.day_of_month, &field::DAYS_OF_MONTH);
                let dow_excludes = dow_restricted(s) && !covers_all(s.day_of_week, &field::DAYS_OF_WEEK);
                match (dom_restricted(s), dow_restricted(s)) {
                    // Either side matching is enough, so both must exclude something.
                    (true, true) => dom_excludes && dow_excludes,
                    _ => dom_excludes || dow_excludes,
                }
            }
            Unit::Month => !covers_all(s.month, &field::MONTHS),
        }
    }

    /// Whether this field alone matches `t`.
    pub(crate) fn matches<W: TimeZone>(self, s: &Schedule, t: &DateTime<W>) -> bool {
        match self {
            Unit::Second => contains(s.second, t.second()),
            Unit::Minute => contains(s.minute, t.minute()),
            Unit::Hour => contains(s.hour, t.hour()),
            Unit::Day => day_matches(s, t),
            Unit::Month => contains(s.month, t.month()),
        }
    }

    /// Start of the unit containing `t`.
    pub(crate) fn snap<W: TimeZone>(self, t: &DateTime<W>) -> DateTime<W> {
        match self {
            Unit::Second => calendar::truncate_to_second(t),
            Unit::Minute => calendar::start_of_minute(t),
            Unit::Hour => calendar::start_of_hour(t),
            Unit::Day => calendar::start_of_day(t),
            Unit::Month => calendar::start_of_month(t),
        }
    }

    /// Start of the following unit, given the start of the current one.
    pub(crate) fn step<W: TimeZone>(self, t: &DateTime<W>) -> DateTime<W> {
        match self {
            Unit::Second => t.clone() + Duration::seconds(1),
            Unit::Minute => t.clone() + Duration::minutes(1),
            Unit::Hour => calendar::next_hour_start(t),
            Unit::Day => calendar::next_day_start(t),
            Unit::Month => calendar::next_month_start(t),
        }
    }

    /// How many units to scan before the field has shown every value it
    /// can take.
    fn scan_limit(self, s: &Schedule) -> u32 {
        match self {
            Unit::Second => field::SECONDS.cardinality() + 1,
            Unit::Minute => field::MINUTES.cardinality() + 1,
            // Two days: the only excluded hour may be skipped by a forward
            // clock change, and a repeated hour adds one more.
            Unit::Hour => 2 * field::HOURS.cardinality() + 1,
            // Both day fields restricted: a day fails only when neither
            // matches, which can take years to line up. Let the horizon stop it.
            Unit::Day if dom_restricted(s) && dow_restricted(s) => u32::MAX,
            // Every day-of-month value shows up within two month lengths,
            // wherever in the month the scan starts.
            Unit::Day => 2 * field::DAYS_OF_MONTH.max,
            Unit::Month => field::MONTHS.cardinality() + 1,
        }
    }
}

fn dom_restricted(s: &Schedule) -> bool {
    !is_wildcard(s.day_of_month)
}

fn dow_restricted(s: &Schedule) -> bool {
    s.day_of_week_enabled() && !is_wildcard(s.day_of_week)
}

// ── Bounded scan ────────────────────────────────────────────────────

pub(crate) struct BoundedScan;

impl Walk for BoundedScan {
    fn walk<W: TimeZone>(&self, schedule: &Schedule, start: DateTime<W>) -> Option<DateTime<W>> {
        if !fields_match(schedule, &start) {
            return Some(start);
        }

        let horizon = calendar::horizon_year(&start);
        let mut best: Option<DateTime<W>> = None;
        for unit in Unit::FINEST_FIRST {
            if !unit.is_restricted(schedule) {
                continue;
            }
            if let Some(found) = scan_field(schedule, unit, &start, best.as_ref(), horizon) {
                trace!(?unit, at = %found.naive_local(), "field stops matching");
                best = Some(found);
            }
        }

        if best.is_none() {
            debug!(horizon, "schedule stays active through search horizon");
        }
        best
    }
}

/// First unit boundary after `start` at which `unit`'s field stops matching.
///
/// Gives up once the cursor passes `best` (an earlier answer is already known)
/// or the horizon year.
fn scan_field<W: TimeZone>(
    s: &Schedule,
    unit: Unit,
    start: &DateTime<W>,
    best: Option<&DateTime<W>>,
    horizon: i32,
) -> Option<DateTime<W>> {
    let month_restricted = Unit::Month.is_restricted(s);
    let mut cursor = unit.snap(start);

    for _ in 0..unit.scan_limit(s) {
        cursor = unit.step(&cursor);
        if cursor.year() > horizon || best.is_some_and(|b| cursor >= *b) {
            return None;
        }
        if !unit.matches(s, &cursor) {
            return Some(cursor);
        }
        // Rolling into a disallowed month settles it without waiting for the
        // month scan.
        if unit == Unit::Day
            && cursor.day() == 1
            && month_restricted
            && !contains(s.month, cursor.month())
        {
            return Some(cursor);
        }
    }
    None
}
