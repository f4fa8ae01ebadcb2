#[cfg(test)]
mod tests {
    use crate::duration::{JobDurationTable, DEFAULT_DURATION_MINUTES};
    use crate::logic::{has_conflict, window_end};
    use chrono::{DateTime, Duration, FixedOffset, TimeZone, Utc};
    use proptest::prelude::*;
    use tradebook_common::BusyInterval;

    fn base_time() -> DateTime<FixedOffset> {
        Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap().fixed_offset()
    }

    proptest! {
        // The window never ends before it starts, and covers travel plus duration
        #[test]
        fn test_window_length_matches_inputs(
            travel in 0.0..600.0f64,
            duration in 0..600u32,
        ) {
            let start = base_time();
            let end = window_end(start, travel, duration).unwrap();
            let expected = ((travel + f64::from(duration)) * 60_000_000.0).round() as i64;
            prop_assert!(end >= start);
            prop_assert_eq!((end - start).num_microseconds(), Some(expected));
        }

        // Intervals entirely before or after the window never conflict
        #[test]
        fn test_disjoint_intervals_never_conflict(
            window_minutes in 1..480i64,
            gap_before in 0..240i64,
            gap_after in 0..240i64,
            length in 1..240i64,
        ) {
            let start = base_time();
            let end = start + Duration::minutes(window_minutes);
            let start_utc = start.with_timezone(&Utc);
            let end_utc = end.with_timezone(&Utc);

            let before_end = start_utc - Duration::minutes(gap_before);
            let before = BusyInterval::new(before_end - Duration::minutes(length), before_end);
            let after_start = end_utc + Duration::minutes(gap_after);
            let after = BusyInterval::new(after_start, after_start + Duration::minutes(length));

            prop_assert!(!has_conflict(&[before, after], &start, &end));
        }

        // Any interval sharing at least one minute with the window conflicts
        #[test]
        fn test_intersecting_interval_conflicts(
            window_minutes in 2..480i64,
            offset in 0..479i64,
            length in 1..240i64,
        ) {
            let offset = offset % (window_minutes - 1);
            let start = base_time();
            let end = start + Duration::minutes(window_minutes);
            let busy_start = start.with_timezone(&Utc) + Duration::minutes(offset);
            let busy = BusyInterval::new(busy_start, busy_start + Duration::minutes(length));

            prop_assert!(has_conflict(&[busy], &start, &end));
        }

        // Lookups ignore case
        #[test]
        fn test_duration_lookup_is_case_insensitive(
            index in 0..9usize,
            mask in proptest::collection::vec(any::<bool>(), 32),
        ) {
            let table = JobDurationTable::builtin();
            let (job_type, minutes) = crate::duration::BUILTIN_JOB_DURATIONS[index];
            let mixed: String = job_type
                .chars()
                .zip(mask.iter().cycle())
                .map(|(c, upper)| if *upper { c.to_ascii_uppercase() } else { c })
                .collect();
            prop_assert_eq!(table.duration_for(&mixed), minutes);
        }

        // Anything outside the table falls back to the default
        #[test]
        fn test_unknown_job_types_use_default(job_type in "[0-9]{1,12}") {
            let table = JobDurationTable::builtin();
            prop_assert_eq!(table.duration_for(&job_type), DEFAULT_DURATION_MINUTES);
        }
    }
}
