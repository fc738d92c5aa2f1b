//! Active windows: alternating activation and deactivation searches.

use chrono::{DateTime, TimeZone};

use crate::calendar::first_second_after;
use crate::schedule::Schedule;

/// A stretch of time during which the schedule matches continuously.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveWindow<Z: TimeZone> {
    /// First active second.
    pub start: DateTime<Z>,
    /// First inactive second after `start`; `None` when the schedule stays
    /// active through the search horizon.
    pub end: Option<DateTime<Z>>,
}

/// Iterator over consecutive [`ActiveWindow`]s, created by
/// [`Schedule::windows`].
///
/// Ends after a window with no end, or when no further activation exists
/// within the horizon.
pub struct ActiveWindows<'a, Z: TimeZone> {
    schedule: &'a Schedule,
    cursor: Option<DateTime<Z>>,
    first: bool,
}

impl<'a, Z: TimeZone> ActiveWindows<'a, Z> {
    pub(crate) fn new(schedule: &'a Schedule, from: DateTime<Z>) -> Self {
        Self {
            schedule,
            cursor: Some(from),
            first: true,
        }
    }
}

impl<Z: TimeZone> Iterator for ActiveWindows<'_, Z> {
    type Item = ActiveWindow<Z>;

    fn next(&mut self) -> Option<Self::Item> {
        let from = self.cursor.take()?;

        // Already inside a window: it opens right away rather than at the
        // next activation.
        let immediate = first_second_after(&from);
        let start = if self.first && self.schedule.is_active_at(&immediate) {
            immediate
        } else {
            self.schedule.next(&from)?
        };
        self.first = false;

        let end = self.schedule.next_inactive(&start);
        self.cursor = end.clone();
        Some(ActiveWindow { start, end })
    }
}
