//! Next-activation search.
//!
//! The conventional cron "when does it fire next" computation. Works on the
//! same bit sets, zone handling and midnight correction as the deactivation
//! search, so callers can alternate the two.
//!
//! Fields are checked coarsest first. A field that does not match is
//! advanced until it does; advancing resets every finer field to its minimum,
//! and wrapping a field around restarts the whole check from the month.

use chrono::{DateTime, Datelike, Duration, TimeZone, Timelike};
use tracing::trace;

use crate::calendar::{self, Walk};
use crate::matcher::day_matches;
use crate::schedule::field::contains;
use crate::schedule::Schedule;

/// Next activation strictly after `from`, or `None` within five years.
///
/// Uses the seconds bits as parsed: a standard 5-field schedule fires at
/// second zero of each matching minute.
pub fn next<Z: TimeZone>(schedule: &Schedule, from: &DateTime<Z>) -> Option<DateTime<Z>> {
    calendar::run_in_location(schedule, from, &Activation)
}

pub(crate) struct Activation;

impl Walk for Activation {
    fn walk<W: TimeZone>(&self, s: &Schedule, start: DateTime<W>) -> Option<DateTime<W>> {
        let horizon = calendar::horizon_year(&start);
        let mut t = start;
        let mut added = false;

        'wrap: loop {
            if t.year() > horizon {
                trace!(horizon, "no activation before horizon");
                return None;
            }

            while !contains(s.month, t.month()) {
                if !added {
                    added = true;
                    t = calendar::start_of_month(&t);
                }
                t = calendar::next_month_start(&t);
                if t.month() == 1 {
                    continue 'wrap;
                }
            }

            while !day_matches(s, &t) {
                if !added {
                    added = true;
                    t = calendar::start_of_day(&t);
                }
                t = calendar::next_day_start(&t);
                if t.day() == 1 {
                    continue 'wrap;
                }
            }

            while !contains(s.hour, t.hour()) {
                if !added {
                    added = true;
                    t = calendar::start_of_hour(&t);
                }
                let day = t.day();
                t = calendar::next_hour_start(&t);
                // The day can roll over without passing hour 0 when midnight
                // is skipped.
                if t.day() != day {
                    continue 'wrap;
                }
            }

            while !contains(s.minute, t.minute()) {
                if !added {
                    added = true;
                    t = calendar::start_of_minute(&t);
                }
                let hour = t.hour();
                t = t + Duration::minutes(1);
                if t.hour() != hour {
                    continue 'wrap;
                }
            }

            while !contains(s.second, t.second()) {
                if !added {
                    added = true;
                    t = calendar::truncate_to_second(&t);
                }
                t = t + Duration::seconds(1);
                if t.second() == 0 {
                    continue 'wrap;
                }
            }

            return Some(t);
        }
    }
}
