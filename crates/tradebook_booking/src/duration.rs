// --- File: crates/tradebook_booking/src/duration.rs ---
use std::collections::HashMap;
use tradebook_config::BookingConfig;

/// Minutes assumed for any job type not in the table.
pub const DEFAULT_DURATION_MINUTES: u32 = 60;

/// Job types the service knows out of the box, in minutes.
pub const BUILTIN_JOB_DURATIONS: [(&str, u32); 9] = [
    ("pipe burst", 120),
    ("leak", 60),
    ("boiler service", 90),
    ("tap replacement", 60),
    ("electrical repair", 90),
    ("socket installation", 60),
    ("fuse replacement", 30),
    ("general maintenance", 60),
    ("painting", 120),
];

/// Fixed duration estimates keyed by lower-cased job type.
///
/// Built once at startup and shared read-only between requests.
#[derive(Debug, Clone)]
pub struct JobDurationTable {
    durations: HashMap<String, u32>,
}

impl JobDurationTable {
    pub fn builtin() -> Self {
        Self::with_overrides(std::iter::empty::<(String, u32)>())
    }

    /// Built-in entries plus `overrides`, which win on key collisions.
    pub fn with_overrides<I, K>(overrides: I) -> Self
    where
        I: IntoIterator<Item = (K, u32)>,
        K: AsRef<str>,
    {
        let mut durations: HashMap<String, u32> = BUILTIN_JOB_DURATIONS
            .iter()
            .map(|(job_type, minutes)| (job_type.to_string(), *minutes))
            .collect();

        for (job_type, minutes) in overrides {
            durations.insert(job_type.as_ref().to_lowercase(), minutes);
        }

        Self { durations }
    }

    pub fn from_config(config: &BookingConfig) -> Self {
        Self::with_overrides(
            config
                .job_durations
                .iter()
                .map(|(job_type, minutes)| (job_type.as_str(), *minutes)),
        )
    }

    /// Duration in minutes for `job_type`, matched case-insensitively.
    pub fn duration_for(&self, job_type: &str) -> u32 {
        self.durations
            .get(&job_type.to_lowercase())
            .copied()
            .unwrap_or(DEFAULT_DURATION_MINUTES)
    }
}

impl Default for JobDurationTable {
    fn default() -> Self {
        Self::builtin()
    }
}
