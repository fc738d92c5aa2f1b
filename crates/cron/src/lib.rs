//! Cron schedule evaluation with activation and deactivation searches.
//!
//! This crate provides:
//! - A bitmask [`Schedule`] representation with an explicit wildcard marker
//! - A cron expression [`Parser`] (5 or 6 fields, descriptors, `TZ=` prefixes)
//! - The conventional "next activation" search ([`Schedule::next`])
//! - The "next deactivation" search ([`Schedule::next_inactive`]), which finds
//!   the first instant after a reference time at which the schedule stops
//!   matching
//! - An iterator of active windows composing the two searches

pub(crate) mod calendar;
pub mod inactive;
pub mod matcher;
pub mod next;
pub mod parser;
pub mod schedule;
pub mod windows;

pub use matcher::{day_matches, is_active_at, is_always_active};
pub use parser::{parse_standard, ParseError, ParseOptions, Parser};
pub use schedule::{Location, Schedule, ScheduleOptions};
pub use windows::{ActiveWindow, ActiveWindows};

/// Result alias for parsing operations.
pub type Result<T, E = ParseError> = std::result::Result<T, E>;
