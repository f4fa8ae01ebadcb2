// File: crates/tradebook_booking/src/handlers.rs
use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
};
use chrono::{DateTime, FixedOffset, NaiveDateTime, Offset, SecondsFormat, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, info_span, Instrument};
use tradebook_common::{
    validation_error, BusyIntervalSource, TradebookError, TravelTimeEstimator,
};
use tradebook_config::AppConfig;
use uuid::Uuid;

use crate::duration::JobDurationTable;
use crate::logic::{AvailabilityResolver, AvailabilityResult, JobRequest, ENGINEER};

/// Message sent with every negative answer.
pub const NO_SLOTS_MESSAGE: &str = "No slots available";

const NAIVE_DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

// ISO-8601 forms with a numeric offset that RFC 3339 parsing rejects
const OFFSET_DATETIME_FORMATS: [&str; 8] = [
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%dT%H:%M%z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M%:z",
    "%Y-%m-%d %H:%M%z",
];

// Shared state for the booking handlers
pub struct BookingState {
    pub resolver: AvailabilityResolver,
    /// Zone applied to request times that carry no offset.
    pub request_time_zone: Tz,
}

impl BookingState {
    pub fn new(resolver: AvailabilityResolver, request_time_zone: Tz) -> Self {
        Self {
            resolver,
            request_time_zone,
        }
    }

    /// Wires the resolver from configuration and the two outbound collaborators.
    pub fn from_config(
        config: &AppConfig,
        travel: Arc<dyn TravelTimeEstimator>,
        calendar: Arc<dyn BusyIntervalSource>,
    ) -> Self {
        let durations = Arc::new(JobDurationTable::from_config(&config.booking));
        let resolver = AvailabilityResolver::new(
            durations,
            travel,
            calendar,
            config.booking.base_address.clone(),
        );
        Self::new(resolver, config.booking.tz())
    }
}

// --- Request / Response bodies ---

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Deserialize, Debug)]
pub struct JobRequestPayload {
    #[cfg_attr(feature = "openapi", schema(example = "Pipe Burst"))]
    pub job_type: String,
    /// ISO-8601 datetime. Without an offset it is read in the configured time zone.
    #[cfg_attr(feature = "openapi", schema(example = "2024-01-01T09:00:00Z"))]
    pub requested_time: String,
    #[cfg_attr(feature = "openapi", schema(example = "22 Acacia Avenue, Leeds"))]
    pub job_address: String,
}

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Serialize, Debug, PartialEq)]
pub struct SlotResponse {
    pub engineer: String,
    pub start: String, // RFC 3339
    pub end: String,   // RFC 3339
    pub travel_time_minutes: f64,
    pub duration_minutes: u32,
}

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Serialize, Debug, PartialEq)]
pub struct AvailabilityResponse {
    pub available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slot: Option<SlotResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl From<AvailabilityResult> for AvailabilityResponse {
    fn from(result: AvailabilityResult) -> Self {
        match result.window {
            Some(window) if result.available => AvailabilityResponse {
                available: true,
                slot: Some(SlotResponse {
                    engineer: ENGINEER.to_string(),
                    start: window.start.to_rfc3339_opts(SecondsFormat::AutoSi, true),
                    end: window.end.to_rfc3339_opts(SecondsFormat::AutoSi, true),
                    travel_time_minutes: window.travel_minutes,
                    duration_minutes: window.duration_minutes,
                }),
                message: None,
            },
            _ => AvailabilityResponse {
                available: false,
                slot: None,
                message: Some(NO_SLOTS_MESSAGE.to_string()),
            },
        }
    }
}

// --- Validation ---

/// Validates a raw JSON body into a [`JobRequest`].
pub fn parse_job_request(
    body: serde_json::Value,
    time_zone: &Tz,
) -> Result<JobRequest, TradebookError> {
    let payload: JobRequestPayload = serde_json::from_value(body).map_err(validation_error)?;

    if payload.job_type.trim().is_empty() {
        return Err(validation_error("job_type must not be empty"));
    }
    if payload.job_address.trim().is_empty() {
        return Err(validation_error("job_address must not be empty"));
    }

    let requested_time = parse_requested_time(&payload.requested_time, time_zone)?;

    Ok(JobRequest {
        job_type: payload.job_type,
        requested_time,
        job_address: payload.job_address,
    })
}

fn parse_naive(value: &str) -> Option<NaiveDateTime> {
    NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
}

/// Parses an ISO-8601 datetime.
///
/// A trailing `Z` or numeric offset is kept as given; a datetime without one is read in
/// `time_zone`.
pub fn parse_requested_time(
    value: &str,
    time_zone: &Tz,
) -> Result<DateTime<FixedOffset>, TradebookError> {
    let value = value.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Ok(parsed);
    }
    if let Some(parsed) = OFFSET_DATETIME_FORMATS
        .iter()
        .find_map(|format| DateTime::parse_from_str(value, format).ok())
    {
        return Ok(parsed);
    }
    if let Some(naive) = value
        .strip_suffix('Z')
        .or_else(|| value.strip_suffix('z'))
        .and_then(parse_naive)
    {
        return Ok(Utc.from_utc_datetime(&naive).fixed_offset());
    }

    let naive = parse_naive(value).ok_or_else(|| {
        validation_error(format!(
            "requested_time {:?} is not an ISO-8601 datetime",
            value
        ))
    })?;

    let local = time_zone
        .from_local_datetime(&naive)
        .earliest()
        .ok_or_else(|| {
            validation_error(format!(
                "requested_time {:?} does not exist in {}",
                value, time_zone
            ))
        })?;
    Ok(local.with_timezone(&local.offset().fix()))
}

// --- Handlers ---

/// Handler to check whether a job fits the engineer's calendar.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/get_open_slots",
    request_body = JobRequestPayload,
    responses(
        (status = 200, description = "Availability of the requested window", body = AvailabilityResponse),
        (status = 400, description = "Invalid input"),
        (status = 502, description = "Calendar lookup failed")
    ),
    tag = "Booking"
))]
pub async fn get_open_slots_handler(
    State(state): State<Arc<BookingState>>,
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Json<AvailabilityResponse>, TradebookError> {
    let request_id = Uuid::new_v4();
    let span = info_span!("get_open_slots", %request_id);

    async move {
        let Json(body) = payload.map_err(|rejection| validation_error(rejection.body_text()))?;
        let job = parse_job_request(body, &state.request_time_zone).map_err(|e| {
            info!("Rejected request: {}", e);
            e
        })?;

        info!(
            "Checking availability for {:?} at {}",
            job.job_type, job.requested_time
        );
        let result = state.resolver.resolve(&job).await.map_err(|e| {
            error!("Availability check failed: {}", e);
            e
        })?;

        Ok(Json(AvailabilityResponse::from(result)))
    }
    .instrument(span)
    .await
}
