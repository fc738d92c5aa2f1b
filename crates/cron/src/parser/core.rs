//! Expression parsing.

use crate::schedule::field::{
    self, all, FieldBounds, DAYS_OF_MONTH, DAYS_OF_WEEK, HOURS, MINUTES, MONTHS, SECONDS, STAR_BIT,
};
use crate::schedule::{Location, Schedule, ScheduleOptions};

use super::error::ParseError;
use super::options::ParseOptions;

/// Field positions in expression order.
const PLACES: [ParseOptions; 6] = [
    ParseOptions::SECOND,
    ParseOptions::MINUTE,
    ParseOptions::HOUR,
    ParseOptions::DOM,
    ParseOptions::MONTH,
    ParseOptions::DOW,
];

/// Values used for fields the parser is not configured to read.
const DEFAULTS: [&str; 6] = ["0", "0", "0", "*", "*", "*"];

/// A configured cron expression parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Parser {
    options: ParseOptions,
    location: Location,
}

impl Parser {
    /// Create a parser reading the fields selected by `options`.
    ///
    /// At most one of `SECOND_OPTIONAL` / `DOW_OPTIONAL` may be set.
    pub fn new(options: ParseOptions) -> Result<Self, ParseError> {
        let optionals = ParseOptions::SECOND_OPTIONAL | ParseOptions::DOW_OPTIONAL;
        if options.contains(optionals) {
            return Err(ParseError::Options(
                "only one optional field is allowed".to_string(),
            ));
        }
        if !PLACES.iter().any(|p| options.contains(*p)) && !options.intersects(optionals) {
            return Err(ParseError::Options("no fields selected".to_string()));
        }
        Ok(Self {
            options,
            location: Location::Local,
        })
    }

    /// `min hour dom month dow`, plus descriptors.
    pub fn standard() -> Self {
        Self {
            options: ParseOptions::STANDARD,
            location: Location::Local,
        }
    }

    /// `sec min hour dom month dow`, plus descriptors.
    pub fn with_seconds() -> Self {
        Self {
            options: ParseOptions::SECOND | ParseOptions::STANDARD,
            location: Location::Local,
        }
    }

    /// Zone given to schedules that carry no `TZ=` prefix.
    pub fn with_location(mut self, location: Location) -> Self {
        self.location = location;
        self
    }

    /// Parse `spec` into a schedule.
    pub fn parse(&self, spec: &str) -> Result<Schedule, ParseError> {
        let mut spec = spec.trim();
        if spec.is_empty() {
            return Err(ParseError::Empty);
        }

        let mut location = self.location;
        if let Some(rest) = spec
            .strip_prefix("TZ=")
            .or_else(|| spec.strip_prefix("CRON_TZ="))
        {
            let (name, remainder) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
            location = parse_location(name)?;
            spec = remainder.trim();
        }

        if spec.starts_with('@') {
            if !self.options.contains(ParseOptions::DESCRIPTOR) {
                return Err(ParseError::Descriptor(spec.to_string()));
            }
            return parse_descriptor(spec, location);
        }

        let fields: Vec<&str> = spec.split_whitespace().collect();
        let (fields, options) = self.normalize_fields(&fields, spec)?;

        Ok(Schedule {
            second: get_field(fields[0], &SECONDS)?,
            minute: get_field(fields[1], &MINUTES)?,
            hour: get_field(fields[2], &HOURS)?,
            day_of_month: get_field(fields[3], &DAYS_OF_MONTH)?,
            month: get_field(fields[4], &MONTHS)?,
            day_of_week: get_field(fields[5], &DAYS_OF_WEEK)?,
            location,
            options,
        })
    }

    /// Line the supplied fields up with their positions, filling defaults.
    fn normalize_fields<'a>(
        &self,
        fields: &[&'a str],
        spec: &str,
    ) -> Result<([&'a str; 6], ScheduleOptions), ParseError> {
        let optional = [
            (ParseOptions::SECOND_OPTIONAL, ParseOptions::SECOND),
            (ParseOptions::DOW_OPTIONAL, ParseOptions::DOW),
        ]
        .into_iter()
        .find(|(flag, place)| self.options.contains(*flag) && !self.options.contains(*place))
        .map(|(_, place)| place);

        let mandatory = PLACES.iter().filter(|p| self.options.contains(**p)).count();
        let max = mandatory + usize::from(optional.is_some());
        if fields.len() < mandatory || fields.len() > max {
            let expected = if mandatory == max {
                max.to_string()
            } else {
                format!("{mandatory} to {max}")
            };
            return Err(ParseError::FieldCount {
                expected,
                found: fields.len(),
                spec: spec.to_string(),
            });
        }

        let mut supplied = self.options;
        if let Some(place) = optional {
            if fields.len() == max {
                supplied.insert(place);
            }
        }

        let mut out = DEFAULTS;
        let mut next = fields.iter();
        for (slot, place) in out.iter_mut().zip(PLACES) {
            if supplied.contains(place) {
                if let Some(value) = next.next() {
                    *slot = value;
                }
            }
        }

        let mut options = ScheduleOptions::empty();
        options.set(
            ScheduleOptions::SECONDS_ENABLED,
            supplied.contains(ParseOptions::SECOND),
        );
        options.set(
            ScheduleOptions::DAY_OF_WEEK_ENABLED,
            supplied.contains(ParseOptions::DOW),
        );
        Ok((out, options))
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::standard()
    }
}

/// Parse with the standard 5-field parser.
pub fn parse_standard(spec: &str) -> Result<Schedule, ParseError> {
    Parser::standard().parse(spec)
}

fn parse_location(name: &str) -> Result<Location, ParseError> {
    if name == "Local" {
        return Ok(Location::Local);
    }
    name.parse::<chrono_tz::Tz>()
        .map(Location::Zone)
        .map_err(|_| ParseError::Location(name.to_string()))
}

fn parse_descriptor(descriptor: &str, location: Location) -> Result<Schedule, ParseError> {
    let daily = Schedule {
        second: 1 << SECONDS.min,
        minute: 1 << MINUTES.min,
        hour: 1 << HOURS.min,
        day_of_month: all(&DAYS_OF_MONTH),
        month: all(&MONTHS),
        day_of_week: all(&DAYS_OF_WEEK),
        location,
        options: ScheduleOptions::DAY_OF_WEEK_ENABLED,
    };

    match descriptor {
        "@yearly" | "@annually" => Ok(Schedule {
            day_of_month: 1 << DAYS_OF_MONTH.min,
            month: 1 << MONTHS.min,
            ..daily
        }),
        "@monthly" => Ok(Schedule {
            day_of_month: 1 << DAYS_OF_MONTH.min,
            ..daily
        }),
        "@weekly" => Ok(Schedule {
            day_of_week: 1 << DAYS_OF_WEEK.min,
            ..daily
        }),
        "@daily" | "@midnight" => Ok(daily),
        "@hourly" => Ok(Schedule {
            hour: all(&HOURS),
            ..daily
        }),
        _ => Err(ParseError::Descriptor(descriptor.to_string())),
    }
}

/// OR together the comma-separated ranges of one field.
pub(crate) fn get_field(expr: &str, bounds: &FieldBounds) -> Result<u64, ParseError> {
    let mut bits = 0;
    for range in expr.split(',') {
        bits |= get_range(range, bounds)?;
    }
    Ok(bits)
}

/// Bits for one `*`, `N`, `N-M` term, each optionally followed by `/step`.
fn get_range(expr: &str, bounds: &FieldBounds) -> Result<u64, ParseError> {
    let fail = |reason: String| ParseError::Field {
        field: bounds.name,
        expr: expr.to_string(),
        reason,
    };

    let range_and_step: Vec<&str> = expr.split('/').collect();
    let low_and_high: Vec<&str> = range_and_step[0].split('-').collect();
    let single = low_and_high.len() == 1;

    let (start, mut end, mut extra) = if low_and_high[0] == "*" || low_and_high[0] == "?" {
        if !single {
            return Err(fail("wildcard used as a range bound".to_string()));
        }
        (bounds.min, bounds.max, STAR_BIT)
    } else {
        let start = parse_int_or_name(low_and_high[0], bounds).map_err(&fail)?;
        let end = match low_and_high.len() {
            1 => start,
            2 => parse_int_or_name(low_and_high[1], bounds).map_err(&fail)?,
            _ => return Err(fail("more than one '-'".to_string())),
        };
        (start, end, 0)
    };

    let step = match range_and_step.len() {
        1 => 1,
        2 => {
            let step = parse_int(range_and_step[1]).map_err(&fail)?;
            // `N/step` runs from N to the end of the field.
            if single {
                end = bounds.max;
            }
            if step > 1 {
                extra = 0;
            }
            step
        }
        _ => return Err(fail("more than one '/'".to_string())),
    };

    if start < bounds.min {
        return Err(fail(format!("{start} is below the minimum {}", bounds.min)));
    }
    if end > bounds.max {
        return Err(fail(format!("{end} is above the maximum {}", bounds.max)));
    }
    if start > end {
        return Err(fail(format!("range {start}-{end} runs backwards")));
    }
    if step == 0 {
        return Err(fail("step must be at least 1".to_string()));
    }
    if step > bounds.max {
        return Err(fail(format!("step {step} is larger than the field (max {})", bounds.max)));
    }

    Ok(field::bits(start, end, step) | extra)
}

fn parse_int_or_name(s: &str, bounds: &FieldBounds) -> Result<u32, String> {
    let lower = s.to_ascii_lowercase();
    if let Some((_, value)) = bounds.names.iter().find(|(name, _)| *name == lower) {
        return Ok(*value);
    }
    parse_int(s)
}

fn parse_int(s: &str) -> Result<u32, String> {
    s.parse::<u32>()
        .map_err(|_| format!("'{s}' is not a number"))
}
