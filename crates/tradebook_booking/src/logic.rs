// --- File: crates/tradebook_booking/src/logic.rs ---
use chrono::{DateTime, Duration, FixedOffset, Utc};
use std::sync::Arc;
use tracing::{debug, info};
use tradebook_common::{
    internal_error, BusyInterval, BusyIntervalSource, TradebookError, TravelTimeEstimator,
};

use crate::duration::JobDurationTable;

/// The single engineer every job is booked for. There is no capacity planning across
/// engineers; availability is decided by one shared calendar.
pub const ENGINEER: &str = "Tom";

// --- Data Structures ---

/// A validated availability request.
#[derive(Debug, Clone, PartialEq)]
pub struct JobRequest {
    pub job_type: String,
    pub requested_time: DateTime<FixedOffset>,
    pub job_address: String,
}

/// The interval the engineer would be occupied: outbound travel followed by the job.
#[derive(Debug, Clone, PartialEq)]
pub struct AvailabilityWindow {
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
    pub travel_minutes: f64,
    pub duration_minutes: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AvailabilityResult {
    pub available: bool,
    pub window: Option<AvailabilityWindow>,
}

impl AvailabilityResult {
    pub fn available(window: AvailabilityWindow) -> Self {
        Self {
            available: true,
            window: Some(window),
        }
    }

    pub fn unavailable() -> Self {
        Self {
            available: false,
            window: None,
        }
    }
}

// --- Availability Logic ---

/// End of the window starting at `start`, keeping sub-minute travel to the microsecond.
///
/// Returns `None` if the end would fall outside the representable range.
pub fn window_end(
    start: DateTime<FixedOffset>,
    travel_minutes: f64,
    duration_minutes: u32,
) -> Option<DateTime<FixedOffset>> {
    let total_minutes = travel_minutes + f64::from(duration_minutes);
    let micros = (total_minutes * 60_000_000.0).round() as i64;
    start.checked_add_signed(Duration::microseconds(micros))
}

/// True when any busy interval overlaps the open window `(start, end)`.
pub fn has_conflict(
    busy: &[BusyInterval],
    start: &DateTime<FixedOffset>,
    end: &DateTime<FixedOffset>,
) -> bool {
    busy.iter().any(|interval| interval.overlaps(start, end))
}

/// Combines the duration table, travel estimate and calendar into a yes/no answer.
pub struct AvailabilityResolver {
    durations: Arc<JobDurationTable>,
    travel: Arc<dyn TravelTimeEstimator>,
    calendar: Arc<dyn BusyIntervalSource>,
    base_location: String,
}

impl AvailabilityResolver {
    pub fn new(
        durations: Arc<JobDurationTable>,
        travel: Arc<dyn TravelTimeEstimator>,
        calendar: Arc<dyn BusyIntervalSource>,
        base_location: impl Into<String>,
    ) -> Self {
        Self {
            durations,
            travel,
            calendar,
            base_location: base_location.into(),
        }
    }

    /// Decides whether `job` fits the calendar.
    ///
    /// Travel is estimated one way, from the base location to the job. A calendar
    /// failure is returned as an error; a missing travel estimate counts as zero minutes.
    pub async fn resolve(&self, job: &JobRequest) -> Result<AvailabilityResult, TradebookError> {
        let estimate = self
            .travel
            .travel_minutes(&self.base_location, &job.job_address)
            .await;
        let travel_minutes = if estimate.is_finite() && estimate > 0.0 {
            estimate
        } else {
            0.0
        };
        let duration_minutes = self.durations.duration_for(&job.job_type);

        let start = job.requested_time;
        let end = window_end(start, travel_minutes, duration_minutes)
            .ok_or_else(|| {
                internal_error(format!(
                    "window end overflows: {} + {:.1} min travel + {} min job",
                    start, travel_minutes, duration_minutes
                ))
            })?;
        debug!(
            "Window for {:?}: {} -> {} (travel {:.1} min, job {} min)",
            job.job_type, start, end, travel_minutes, duration_minutes
        );

        let busy = self
            .calendar
            .busy_intervals(start.with_timezone(&Utc), end.with_timezone(&Utc))
            .await?;

        if has_conflict(&busy, &start, &end) {
            info!("Requested window {} -> {} conflicts with the calendar", start, end);
            return Ok(AvailabilityResult::unavailable());
        }

        Ok(AvailabilityResult::available(AvailabilityWindow {
            start,
            end,
            travel_minutes,
            duration_minutes,
        }))
    }
}
