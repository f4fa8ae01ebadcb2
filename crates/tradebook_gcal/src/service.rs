// --- File: crates/tradebook_gcal/src/service.rs ---
//! Google Calendar implementation of [`BusyIntervalSource`].
//!
//! Busy intervals are read from `events.list` with recurring events expanded into
//! single occurrences and ordered by start time.

use chrono::{DateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use google_calendar3::api::{Event, EventDateTime};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;
use tradebook_common::{
    external_service_error, BoxFuture, BusyInterval, BusyIntervalSource, TradebookError,
};
use tradebook_config::GcalConfig;

use crate::auth::HubType;

const SERVICE_NAME: &str = "Google Calendar";

/// Errors that can occur when interacting with Google Calendar.
#[derive(Error, Debug)]
pub enum GcalServiceError {
    #[error("Google API Error: {0}")]
    ApiError(#[from] google_calendar3::Error),
    #[error("Authentication setup failed: {0}")]
    AuthError(String),
    #[error("Calendar configuration error: {0}")]
    ConfigError(String),
    #[error("Malformed calendar event: {0}")]
    MalformedEvent(String),
}

impl From<GcalServiceError> for TradebookError {
    fn from(err: GcalServiceError) -> Self {
        match err {
            GcalServiceError::ConfigError(msg) => TradebookError::ConfigError(msg),
            other => external_service_error(SERVICE_NAME, other),
        }
    }
}

/// Google Calendar service bound to one calendar.
pub struct GoogleCalendarService {
    calendar_hub: Arc<HubType>,
    calendar_id: String,
    time_zone: Tz,
}

impl GoogleCalendarService {
    /// Create a new Google Calendar service.
    ///
    /// `time_zone` decides where whole-day entries begin and end.
    pub fn new(calendar_hub: Arc<HubType>, calendar_id: impl Into<String>, time_zone: Tz) -> Self {
        Self {
            calendar_hub,
            calendar_id: calendar_id.into(),
            time_zone,
        }
    }

    pub fn from_config(calendar_hub: Arc<HubType>, config: &GcalConfig) -> Self {
        Self::new(calendar_hub, config.calendar_id.clone(), config.tz())
    }

    /// Lists every single-occurrence event in the range, following result pages.
    async fn list_events(
        &self,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> Result<Vec<Event>, GcalServiceError> {
        let mut events = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut request = self
                .calendar_hub
                .events()
                .list(&self.calendar_id)
                .time_min(start_time)
                .time_max(end_time)
                .single_events(true) // Expand recurring events
                .order_by("startTime");
            if let Some(token) = page_token.as_deref() {
                request = request.page_token(token);
            }

            let (_response, page) = request.doit().await?;
            events.extend(page.items.unwrap_or_default());

            page_token = continuation_token(page.next_page_token);
            if page_token.is_none() {
                break;
            }
        }

        Ok(events)
    }
}

impl BusyIntervalSource for GoogleCalendarService {
    fn busy_intervals(
        &self,
        range_start: DateTime<Utc>,
        range_end: DateTime<Utc>,
    ) -> BoxFuture<'_, Vec<BusyInterval>, TradebookError> {
        Box::pin(async move {
            let events = self.list_events(range_start, range_end).await?;
            debug!(
                "Calendar {} returned {} events between {} and {}",
                self.calendar_id,
                events.len(),
                range_start,
                range_end
            );

            Ok(busy_intervals_from_events(&events, &self.time_zone)?)
        })
    }
}

/// Turns a page of listed events into busy intervals ordered by start.
///
/// Cancelled events are dropped. Any other event whose start or end cannot be placed
/// on the timeline fails the whole conversion.
pub fn busy_intervals_from_events(
    events: &[Event],
    time_zone: &Tz,
) -> Result<Vec<BusyInterval>, GcalServiceError> {
    let mut busy = events
        .iter()
        .filter(|event| event.status.as_deref() != Some("cancelled"))
        .map(|event| busy_interval_from_event(event, time_zone))
        .collect::<Result<Vec<_>, _>>()?;

    busy.sort_by_key(|interval| interval.start);
    Ok(busy)
}

/// The token for the next result page, if the listing continues.
pub fn continuation_token(next_page_token: Option<String>) -> Option<String> {
    next_page_token.filter(|token| !token.is_empty())
}

/// Converts a calendar event into a busy interval.
pub fn busy_interval_from_event(
    event: &Event,
    time_zone: &Tz,
) -> Result<BusyInterval, GcalServiceError> {
    let start = event
        .start
        .as_ref()
        .and_then(|value| resolve_event_time(value, time_zone));
    let end = event
        .end
        .as_ref()
        .and_then(|value| resolve_event_time(value, time_zone));

    match (start, end) {
        (Some(start), Some(end)) => Ok(BusyInterval::new(start, end)),
        (None, _) => Err(GcalServiceError::MalformedEvent(format!(
            "event {:?} has no usable start",
            event.id
        ))),
        (_, None) => Err(GcalServiceError::MalformedEvent(format!(
            "event {:?} has no usable end",
            event.id
        ))),
    }
}

// Precise instants win; whole-day markers start at local midnight.
fn resolve_event_time(value: &EventDateTime, time_zone: &Tz) -> Option<DateTime<Utc>> {
    if let Some(date_time) = value.date_time {
        return Some(date_time);
    }
    let date = value.date?;
    time_zone
        .from_local_datetime(&date.and_time(NaiveTime::MIN))
        .earliest()
        .map(|local| local.with_timezone(&Utc))
}
