//! Field matching predicates.

use chrono::{DateTime, Datelike, TimeZone, Timelike};

use crate::schedule::field::{contains, is_wildcard};
use crate::schedule::{Location, Schedule};

/// Combined day-of-month / day-of-week test.
///
/// A wildcard (or, for day-of-week, non-participating) field places no
/// restriction. When both are restricted the day matches if either does,
/// which is the usual cron convention (`0 0 1 * MON` fires on the 1st and on
/// every Monday).
pub fn day_matches<W: TimeZone>(schedule: &Schedule, t: &DateTime<W>) -> bool {
    let dom_restricted = !is_wildcard(schedule.day_of_month);
    let dow_restricted = schedule.day_of_week_enabled() && !is_wildcard(schedule.day_of_week);

    let dom_match = || contains(schedule.day_of_month, t.day());
    let dow_match = || contains(schedule.day_of_week, t.weekday().num_days_from_sunday());

    match (dom_restricted, dow_restricted) {
        (false, false) => true,
        (true, false) => dom_match(),
        (false, true) => dow_match(),
        (true, true) => dom_match() || dow_match(),
    }
}

/// Whether the schedule matches every instant, so it never becomes inactive.
///
/// Only the wildcard marker counts: `0-59` in the minute field allows every
/// minute but is still treated as a restriction.
pub fn is_always_active(schedule: &Schedule) -> bool {
    is_wildcard(schedule.month)
        && is_wildcard(schedule.day_of_month)
        && is_wildcard(schedule.hour)
        && is_wildcard(schedule.minute)
        && (is_wildcard(schedule.second) || !schedule.seconds_enabled())
        && (is_wildcard(schedule.day_of_week) || !schedule.day_of_week_enabled())
}

/// Whether every enforced field matches `at`, read in the schedule's zone.
pub fn is_active_at<Z: TimeZone>(schedule: &Schedule, at: &DateTime<Z>) -> bool {
    match schedule.location {
        Location::Local => fields_match(schedule, at),
        Location::Zone(tz) => fields_match(schedule, &at.with_timezone(&tz)),
    }
}

/// Active predicate on an instant already in the working zone.
pub(crate) fn fields_match<W: TimeZone>(schedule: &Schedule, t: &DateTime<W>) -> bool {
    contains(schedule.month, t.month())
        && day_matches(schedule, t)
        && contains(schedule.hour, t.hour())
        && contains(schedule.minute, t.minute())
        && (!schedule.seconds_enabled() || contains(schedule.second, t.second()))
}
