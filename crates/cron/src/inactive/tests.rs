//! Tests for the deactivation searches.

#[cfg(test)]
mod tests {
    use chrono::{DateTime, FixedOffset, TimeZone, Timelike, Utc};
    use chrono_tz::America::{New_York, Sao_Paulo};
    use chrono_tz::Australia::Lord_Howe;

    use crate::inactive::{mirror, next_inactive};
    use crate::parser::{parse_standard, Parser};
    use crate::schedule::Schedule;

    fn utc(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    /// Run both searches and check they agree with `expected`.
    fn assert_inactive(s: &Schedule, from: &str, expected: Option<&str>) {
        let from = utc(from);
        let expected = expected.map(utc);
        assert_eq!(next_inactive(s, &from), expected, "bounded scan from {from}");
        assert_eq!(mirror::next_inactive(s, &from), expected, "reference walk from {from}");
    }

    fn standard(expr: &str) -> Schedule {
        parse_standard(expr).unwrap()
    }

    fn seconds(expr: &str) -> Schedule {
        Parser::with_seconds().parse(expr).unwrap()
    }

    // -- Reference scenarios -----------------------------------------------

    #[test]
    fn outside_restricted_month_is_inactive_a_second_later() {
        assert_inactive(
            &standard("* * * 12 *"),
            "2020-01-01T12:00:00Z",
            Some("2020-01-01T12:00:01Z"),
        );
    }

    #[test]
    fn december_ends_at_new_year() {
        assert_inactive(
            &standard("* * * 12 *"),
            "2020-11-30T23:59:59Z",
            Some("2021-01-01T00:00:00Z"),
        );
    }

    #[test]
    fn single_day_ends_at_midnight() {
        assert_inactive(
            &standard("* * 24 12 *"),
            "2020-12-24T12:00:00Z",
            Some("2020-12-25T00:00:00Z"),
        );
    }

    #[test]
    fn disallowed_month_after_month_end() {
        assert_inactive(
            &standard("* * 1-30 1,3-12 *"),
            "2020-01-31T23:59:59Z",
            Some("2020-02-01T00:00:00Z"),
        );
    }

    #[test]
    fn unrestricted_schedule_never_inactive() {
        let s = standard("* * * * *");
        assert!(s.is_always_active());
        for from in ["2020-01-01T00:00:00Z", "2024-02-29T23:59:59Z", "1999-12-31T23:59:59Z"] {
            assert_inactive(&s, from, None);
        }
    }

    // -- Single fields -----------------------------------------------------

    #[test]
    fn seconds_field() {
        assert_inactive(
            &seconds("0-29 * * * * *"),
            "2021-06-14T10:00:10Z",
            Some("2021-06-14T10:00:30Z"),
        );
    }

    #[test]
    fn seconds_ignored_when_not_enabled() {
        // The standard parser stores second 0 but only minutes matter.
        assert_inactive(
            &standard("*/2 * * * *"),
            "2021-06-14T10:00:10Z",
            Some("2021-06-14T10:01:00Z"),
        );
    }

    #[test]
    fn minute_field_wraps_into_next_hour() {
        assert_inactive(
            &standard("0-4,50-59 * * * *"),
            "2021-06-14T10:55:00Z",
            Some("2021-06-14T11:05:00Z"),
        );
    }

    #[test]
    fn hour_field() {
        assert_inactive(
            &standard("* 9-16 * * *"),
            "2021-06-14T12:00:00Z",
            Some("2021-06-14T17:00:00Z"),
        );
    }

    #[test]
    fn weekday_field() {
        // 2021-06-11 is a Friday.
        assert_inactive(
            &standard("* * * * MON-FRI"),
            "2021-06-11T10:00:00Z",
            Some("2021-06-12T00:00:00Z"),
        );
    }

    #[test]
    fn coarser_field_can_fail_before_finer_one() {
        // Seconds keep matching until 10:05:05, but the minute fails at 10:05.
        assert_inactive(
            &seconds("0-4,30-59 0-4 * * * *"),
            "2021-06-14T10:04:30Z",
            Some("2021-06-14T10:05:00Z"),
        );
    }

    #[test]
    fn day_of_month_gap_across_short_month() {
        // Only the 29th is excluded; February 2021 has none.
        assert_inactive(
            &standard("* * 1-28,30,31 * *"),
            "2021-01-31T12:00:00Z",
            Some("2021-03-29T00:00:00Z"),
        );
    }

    #[test]
    fn both_day_fields_must_fail() {
        // Inactive only on a 31st that falls on a Sunday.
        assert_inactive(
            &standard("* * 1-30 * 1-6"),
            "2021-02-01T00:00:00Z",
            Some("2021-10-31T00:00:00Z"),
        );
    }

    #[test]
    fn month_rollover_during_day_scan() {
        // Every day-of-month listed, so only the month can stop it.
        assert_inactive(
            &standard("* * 1-31 1-6 *"),
            "2021-06-10T08:00:00Z",
            Some("2021-07-01T00:00:00Z"),
        );
    }

    #[test]
    fn enumerated_full_range_never_inactive() {
        let s = standard("0-59 0-23 1-31 1-12 0-6");
        assert!(!s.is_always_active());
        assert_inactive(&s, "2021-06-10T08:00:00Z", None);
    }

    #[test]
    fn descriptor_schedule() {
        assert_inactive(
            &standard("@hourly"),
            "2021-06-10T08:00:30Z",
            Some("2021-06-10T08:01:00Z"),
        );
    }

    // -- Zones and daylight saving ----------------------------------------

    #[test]
    fn missing_midnight_ends_day_at_first_valid_time() {
        // Sao Paulo skipped 2018-11-04 00:00..01:00.
        let s = standard("TZ=America/Sao_Paulo * * 3 11 *");
        let from = Sao_Paulo.with_ymd_and_hms(2018, 11, 3, 12, 0, 0).unwrap();
        let found = next_inactive(&s, &from).unwrap();
        assert_eq!(found.hour(), 1);
        assert_eq!(found.with_timezone(&Utc), utc("2018-11-04T03:00:00Z"));
        assert_eq!(mirror::next_inactive(&s, &from), Some(found));
    }

    #[test]
    fn spring_forward_skips_missing_hour() {
        // 02:00 did not exist in New York on 2021-03-14.
        let s = standard("TZ=America/New_York * 0-1 * * *");
        assert_inactive(&s, "2021-03-14T05:30:00Z", Some("2021-03-14T07:00:00Z"));
        let local = next_inactive(&s, &utc("2021-03-14T05:30:00Z"))
            .unwrap()
            .with_timezone(&New_York);
        assert_eq!(local.hour(), 3);
    }

    #[test]
    fn excluded_hour_skipped_by_spring_forward() {
        // The only inactive hour is 02:00, which New York skipped on 2021-03-14.
        let s = standard("TZ=America/New_York * 0-1,3-23 * * *");
        assert_inactive(&s, "2021-03-13T08:00:00Z", Some("2021-03-15T06:00:00Z"));
    }

    #[test]
    fn half_hour_shift_ends_on_the_hour() {
        // Lord Howe moved from 02:00 +10:30 to 02:30 +11:00 on 2021-10-03;
        // hour 3 still starts at 03:00 on the wall clock.
        let s = standard("TZ=Australia/Lord_Howe * 0-2 * * *");
        assert_inactive(&s, "2021-10-02T14:40:00Z", Some("2021-10-02T16:00:00Z"));
        let found = next_inactive(&s, &utc("2021-10-02T14:40:00Z"))
            .unwrap()
            .with_timezone(&Lord_Howe);
        assert_eq!((found.hour(), found.minute()), (3, 0));
    }

    #[test]
    fn fall_back_keeps_repeated_hour_active() {
        // 01:00 happened twice in New York on 2020-11-01.
        let s = standard("TZ=America/New_York * 1 * * *");
        assert_inactive(&s, "2020-11-01T05:10:00Z", Some("2020-11-01T07:00:00Z"));
    }

    #[test]
    fn local_schedule_reads_caller_zone() {
        let s = standard("* 9-16 * * *");
        let ist = FixedOffset::east_opt(5 * 3600 + 1800).unwrap();
        let from = ist.with_ymd_and_hms(2021, 6, 14, 12, 0, 0).unwrap();
        let found = next_inactive(&s, &from).unwrap();
        assert_eq!(found, ist.with_ymd_and_hms(2021, 6, 14, 17, 0, 0).unwrap());
    }

    #[test]
    fn zoned_schedule_answers_in_caller_zone() {
        let s = standard("TZ=Asia/Tokyo * 9-16 * * *");
        let found = next_inactive(&s, &utc("2021-06-14T03:00:00Z")).unwrap();
        // 17:00 in Tokyo.
        assert_eq!(found, utc("2021-06-14T08:00:00Z"));
    }

    // -- Properties --------------------------------------------------------

    #[test]
    fn answer_is_inactive_and_everything_before_is_active() {
        let cases = [
            ("0-4,30-59 0-4 * * * *", "2021-06-14T10:04:30Z"),
            ("*/7 * * * * *", "2021-06-14T10:04:55Z"),
            ("0-49 */3 * * * *", "2021-06-14T10:03:40Z"),
            ("* 58,59,0 23,0 * * *", "2021-06-14T23:58:30Z"),
        ];
        for (expr, from) in cases {
            let s = seconds(expr);
            let from = utc(from);
            let found = next_inactive(&s, &from).unwrap();
            assert!(found > from);
            assert!(!s.is_active_at(&found), "{expr}: active at {found}");
            let mut t = from + chrono::Duration::seconds(1);
            while t < found {
                assert!(s.is_active_at(&t), "{expr}: inactive earlier at {t}");
                t += chrono::Duration::seconds(1);
            }
        }
    }

    #[test]
    fn concurrent_readers_share_one_schedule() {
        let s = std::sync::Arc::new(standard("* 9-16 * * MON-FRI"));
        let handles: Vec<_> = (0..4)
            .map(|day| {
                let s = std::sync::Arc::clone(&s);
                std::thread::spawn(move || {
                    let from = Utc.with_ymd_and_hms(2021, 6, 14 + day, 10, 0, 0).unwrap();
                    s.next_inactive(&from)
                })
            })
            .collect();
        for (day, handle) in handles.into_iter().enumerate() {
            let expected = Utc
                .with_ymd_and_hms(2021, 6, 14 + day as u32, 17, 0, 0)
                .unwrap();
            assert_eq!(handle.join().unwrap(), Some(expected));
        }
    }
}
