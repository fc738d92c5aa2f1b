//! Wall-clock stepping in an arbitrary timezone.
//!
//! All searches work on a `DateTime` in the schedule's zone and move it by
//! whole calendar units. Moving by days or months goes through the local
//! calendar, which is where daylight-saving gaps and overlaps show up; the
//! helpers here resolve those the same way for every search.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeZone, Timelike};

use crate::schedule::{Location, Schedule};

/// Searches give up once the working year passes the start year plus this.
pub(crate) const HORIZON_YEARS: i32 = 5;

/// A search over a schedule, run in whichever zone the schedule asks for.
pub(crate) trait Walk {
    /// Search from `start`, an instant already in the working zone and
    /// truncated to whole seconds.
    fn walk<W: TimeZone>(&self, schedule: &Schedule, start: DateTime<W>) -> Option<DateTime<W>>;
}

/// Convert `from` into the schedule's zone, run `search` from the following
/// second and convert the result back into the caller's zone.
pub(crate) fn run_in_location<Z: TimeZone, S: Walk>(
    schedule: &Schedule,
    from: &DateTime<Z>,
    search: &S,
) -> Option<DateTime<Z>> {
    match schedule.location {
        Location::Local => search.walk(schedule, first_second_after(from)),
        Location::Zone(tz) => {
            let start = first_second_after(&from.with_timezone(&tz));
            search
                .walk(schedule, start)
                .map(|found| found.with_timezone(&from.timezone()))
        }
    }
}

/// The year after which a search starting at `start` reports nothing.
pub(crate) fn horizon_year<W: TimeZone>(start: &DateTime<W>) -> i32 {
    start.year() + HORIZON_YEARS
}

/// The next whole second strictly after `t`.
pub(crate) fn first_second_after<W: TimeZone>(t: &DateTime<W>) -> DateTime<W> {
    truncate_to_second(t) + Duration::seconds(1)
}

pub(crate) fn truncate_to_second<W: TimeZone>(t: &DateTime<W>) -> DateTime<W> {
    // Leap seconds are reported as nanosecond values past one billion.
    let nanos = i64::from(t.nanosecond() % 1_000_000_000);
    t.clone() - Duration::nanoseconds(nanos)
}

pub(crate) fn start_of_minute<W: TimeZone>(t: &DateTime<W>) -> DateTime<W> {
    truncate_to_second(t) - Duration::seconds(i64::from(t.second()))
}

/// Top of the current local hour. Computed on the absolute timeline so a
/// repeated hour at a fall-back transition keeps its own occurrence; when a
/// fractional-hour shift puts that instant in a different hour, the first
/// instant of this hour on the wall clock is used instead.
pub(crate) fn start_of_hour<W: TimeZone>(t: &DateTime<W>) -> DateTime<W> {
    let top = start_of_minute(t) - Duration::minutes(i64::from(t.minute()));
    if top.hour() == t.hour() {
        return top;
    }
    let local = t.naive_local();
    let hour = local.date().and_time(NaiveTime::MIN) + Duration::hours(i64::from(local.hour()));
    resolve_local(&t.timezone(), hour)
}

/// First instant of the following local hour.
///
/// Read off the wall clock rather than adding an hour, so a transition that
/// shifts by a fraction of an hour still lands on the hour boundary. A
/// repeated hour is not revisited.
pub(crate) fn next_hour_start<W: TimeZone>(t: &DateTime<W>) -> DateTime<W> {
    let local = t.naive_local();
    let hour = local.date().and_time(NaiveTime::MIN) + Duration::hours(i64::from(local.hour()));
    let stepped = resolve_local(&t.timezone(), hour + Duration::hours(1));
    if stepped > *t {
        stepped
    } else {
        truncate_to_second(t) + Duration::hours(1)
    }
}

/// First instant of the current local day.
pub(crate) fn start_of_day<W: TimeZone>(t: &DateTime<W>) -> DateTime<W> {
    resolve_local(&t.timezone(), t.date_naive().and_time(NaiveTime::MIN))
}

/// First instant of the following local day, midnight-corrected.
pub(crate) fn next_day_start<W: TimeZone>(t: &DateTime<W>) -> DateTime<W> {
    let date = t.date_naive() + Duration::days(1);
    let stepped = resolve_local(&t.timezone(), date.and_time(NaiveTime::MIN));
    correct_midnight(stepped, date)
}

/// First instant of the current local month.
pub(crate) fn start_of_month<W: TimeZone>(t: &DateTime<W>) -> DateTime<W> {
    let first = first_of_month(t.date_naive());
    resolve_local(&t.timezone(), first.and_time(NaiveTime::MIN))
}

/// First instant of the following local month.
pub(crate) fn next_month_start<W: TimeZone>(t: &DateTime<W>) -> DateTime<W> {
    let first = first_of_month(t.date_naive());
    let next = first + Duration::days(i64::from(days_in_month(first.year(), first.month())));
    let stepped = resolve_local(&t.timezone(), next.and_time(NaiveTime::MIN));
    correct_midnight(stepped, next)
}

/// Map a local wall-clock time to an instant.
///
/// An ambiguous time (clocks set back) resolves to its earlier occurrence.
/// A time skipped by a forward jump is read with the offset in force before
/// the jump, which lands the same distance past the gap.
pub(crate) fn resolve_local<W: TimeZone>(tz: &W, naive: NaiveDateTime) -> DateTime<W> {
    if let Some(found) = tz.from_local_datetime(&naive).earliest() {
        return found;
    }
    let before = tz
        .offset_from_utc_datetime(&(naive - Duration::days(1)))
        .fix();
    tz.from_utc_datetime(&(naive - Duration::seconds(i64::from(before.local_minus_utc()))))
}

/// Pull a day step that did not land on midnight back onto `date`'s midnight.
///
/// A late hour means the step fell short and belongs to the next midnight; an
/// early hour is undone unless that would leave `date` (midnight itself does
/// not exist there, so the first valid instant of the day is kept).
pub(crate) fn correct_midnight<W: TimeZone>(t: DateTime<W>, date: NaiveDate) -> DateTime<W> {
    let hour = t.hour();
    if hour == 0 {
        return t;
    }
    let corrected = if hour > 12 {
        t.clone() + Duration::hours(i64::from(24 - hour))
    } else {
        t.clone() - Duration::hours(i64::from(hour))
    };
    if corrected.date_naive() == date {
        corrected
    } else {
        t
    }
}

pub(crate) fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.day0()))
}
