//! Per-field bit sets.
//!
//! Every schedule field is a `u64` with one bit per legal value (bit `n` set
//! means value `n` is allowed). The top bit is reserved as the wildcard
//! marker: it records that the expression said "every value" for the field,
//! which is not the same thing as an enumeration that happens to cover the
//! whole range.

/// Marker bit set on a field written as `*` or `?`.
pub const STAR_BIT: u64 = 1 << 63;

/// Legal range and optional names of one cron field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldBounds {
    pub name: &'static str,
    pub min: u32,
    pub max: u32,
    /// Lower-case names accepted in place of numbers, with their values.
    pub names: &'static [(&'static str, u32)],
}

impl FieldBounds {
    /// Number of distinct legal values.
    pub const fn cardinality(&self) -> u32 {
        self.max - self.min + 1
    }
}

pub const SECONDS: FieldBounds = FieldBounds {
    name: "second",
    min: 0,
    max: 59,
    names: &[],
};

pub const MINUTES: FieldBounds = FieldBounds {
    name: "minute",
    min: 0,
    max: 59,
    names: &[],
};

pub const HOURS: FieldBounds = FieldBounds {
    name: "hour",
    min: 0,
    max: 23,
    names: &[],
};

pub const DAYS_OF_MONTH: FieldBounds = FieldBounds {
    name: "day-of-month",
    min: 1,
    max: 31,
    names: &[],
};

pub const MONTHS: FieldBounds = FieldBounds {
    name: "month",
    min: 1,
    max: 12,
    names: &[
        ("jan", 1),
        ("feb", 2),
        ("mar", 3),
        ("apr", 4),
        ("may", 5),
        ("jun", 6),
        ("jul", 7),
        ("aug", 8),
        ("sep", 9),
        ("oct", 10),
        ("nov", 11),
        ("dec", 12),
    ],
};

pub const DAYS_OF_WEEK: FieldBounds = FieldBounds {
    name: "day-of-week",
    min: 0,
    max: 6,
    names: &[
        ("sun", 0),
        ("mon", 1),
        ("tue", 2),
        ("wed", 3),
        ("thu", 4),
        ("fri", 5),
        ("sat", 6),
    ],
};

/// Whether `value` is allowed by `bits`.
#[inline]
pub fn contains(bits: u64, value: u32) -> bool {
    value < 63 && bits & (1 << value) != 0
}

/// Whether the field was written as a wildcard.
#[inline]
pub fn is_wildcard(bits: u64) -> bool {
    bits & STAR_BIT != 0
}

/// Bits for `min..=max` taking every `step`-th value.
pub fn bits(min: u32, max: u32, step: u32) -> u64 {
    if step == 1 {
        // Fast path: a contiguous run.
        return !(u64::MAX << (max + 1)) & (u64::MAX << min);
    }
    let mut out = 0;
    let mut v = min;
    while v <= max {
        out |= 1 << v;
        v = match v.checked_add(step) {
            Some(next) => next,
            None => break,
        };
    }
    out
}

/// Every legal value of the field, plus the wildcard marker.
pub fn all(bounds: &FieldBounds) -> u64 {
    bits(bounds.min, bounds.max, 1) | STAR_BIT
}

/// Whether every legal value is allowed, with or without the marker.
pub fn covers_all(bits_set: u64, bounds: &FieldBounds) -> bool {
    let full = bits(bounds.min, bounds.max, 1);
    bits_set & full == full
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contiguous_bits() {
        assert_eq!(bits(0, 2, 1), 0b111);
        assert_eq!(bits(1, 3, 1), 0b1110);
        assert_eq!(bits(1, 12, 1).count_ones(), 12);
    }

    #[test]
    fn stepped_bits() {
        assert_eq!(bits(0, 10, 5), (1 << 0) | (1 << 5) | (1 << 10));
        assert_eq!(bits(1, 6, 2), (1 << 1) | (1 << 3) | (1 << 5));
        assert_eq!(bits(5, 59, u32::MAX), 1 << 5);
    }

    #[test]
    fn wildcard_marker_is_separate_from_coverage() {
        let star = all(&MINUTES);
        let listed = bits(0, 59, 1);

        assert!(is_wildcard(star));
        assert!(!is_wildcard(listed));
        assert!(covers_all(star, &MINUTES));
        assert!(covers_all(listed, &MINUTES));
        assert!(!covers_all(bits(0, 58, 1), &MINUTES));
    }

    #[test]
    fn membership() {
        let b = bits(1, 5, 2);
        assert!(contains(b, 3));
        assert!(!contains(b, 4));
        // The marker bit is never a legal value.
        assert!(!contains(STAR_BIT, 63));
    }
}
