//! Next-activation results checked against the `cron` crate.
//!
//! Only schedules with an unrestricted day-of-week are compared: the two
//! crates number weekdays differently.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use stupid_cron::parse_standard;

fn utc(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
}

const EXPRS: &[&str] = &[
    "*/15 * * * *",
    "0 9 * * *",
    "30 6 31 * *",
    "0 0 1 1 *",
    "0 0 29 2 *",
    "5,10 */3 1-15 * *",
    "0 12 * 2-4 *",
    "59 23 31 12 *",
    "0 0 */10 * *",
    "0-5 22-23 28-31 * *",
];

const FROM: &[&str] = &[
    "2021-01-01T00:00:00Z",
    "2021-02-28T23:59:59Z",
    "2021-03-10T10:15:30Z",
    "2021-12-31T23:59:00Z",
    "2022-06-15T12:00:00Z",
    "2023-11-30T06:30:00Z",
];

#[test]
fn next_matches_cron_crate() {
    for expr in EXPRS {
        let ours = parse_standard(expr).unwrap();
        let oracle = cron::Schedule::from_str(&format!("0 {expr}")).unwrap();
        for from in FROM {
            let from = utc(from);
            let mut expected = oracle.after(&from);
            let mut t = from;
            // A few consecutive activations, so wrap-around paths are covered.
            for _ in 0..5 {
                let found = ours.next(&t);
                assert_eq!(found, expected.next(), "{expr} after {t}");
                match found {
                    Some(next) => t = next,
                    None => break,
                }
            }
        }
    }
}
