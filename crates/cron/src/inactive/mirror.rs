//! Reference walk for the next-deactivation search.
//!
//! Shaped like the activation search in [`crate::next`] with the comparison
//! turned around: every field is checked from the coarsest down, and the
//! first one that fails proves the working instant inactive. While all of
//! them match, the walk advances the finest field that excludes anything and
//! starts over from the month.
//!
//! Its cost grows with the distance to the answer, so production code uses
//! [`super::next_inactive`]; this one exists to cross-check it.

use chrono::{DateTime, Datelike, TimeZone, Timelike};
use tracing::trace;

use crate::calendar::{self, Walk};
use crate::matcher::day_matches;
use crate::schedule::field::contains;
use crate::schedule::Schedule;

use super::Unit;

/// First whole second after `from` at which `schedule` does not match.
pub fn next_inactive<Z: TimeZone>(schedule: &Schedule, from: &DateTime<Z>) -> Option<DateTime<Z>> {
    if schedule.is_always_active() {
        return None;
    }
    calendar::run_in_location(schedule, from, &MirrorWalk)
}

pub(crate) struct MirrorWalk;

impl Walk for MirrorWalk {
    fn walk<W: TimeZone>(&self, s: &Schedule, start: DateTime<W>) -> Option<DateTime<W>> {
        let horizon = calendar::horizon_year(&start);
        // Nothing can fail when no field excludes a value.
        let step_unit = Unit::FINEST_FIRST
            .into_iter()
            .find(|unit| unit.excludes_some(s))?;

        let mut t = start;
        let mut added = false;
        let mut steps: u64 = 0;

        'wrap: loop {
            if t.year() > horizon {
                trace!(steps, "reference walk reached horizon");
                return None;
            }

            if !contains(s.month, t.month()) {
                break 'wrap;
            }
            if !day_matches(s, &t) {
                break 'wrap;
            }
            if !contains(s.hour, t.hour()) {
                break 'wrap;
            }
            if !contains(s.minute, t.minute()) {
                break 'wrap;
            }
            if s.seconds_enabled() && !contains(s.second, t.second()) {
                break 'wrap;
            }

            // Active here. Finer fields start from their minimum after the
            // first advance.
            if !added {
                added = true;
                t = step_unit.snap(&t);
            }
            t = step_unit.step(&t);
            steps += 1;
        }

        trace!(steps, ?step_unit, "reference walk found inactive instant");
        Some(t)
    }
}
