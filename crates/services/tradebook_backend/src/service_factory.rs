// --- File: crates/services/tradebook_backend/src/service_factory.rs ---
//! Wires the production collaborators into the booking state.
use std::sync::Arc;
use tracing::info;
use tradebook_booking::BookingState;
use tradebook_common::{BusyIntervalSource, TradebookError, TravelTimeEstimator};
use tradebook_config::AppConfig;
use tradebook_gcal::{create_calendar_hub, GoogleCalendarService};
use tradebook_maps::DistanceMatrixClient;

/// Builds the booking state backed by Google Calendar and the Distance Matrix API.
///
/// Fails if the calendar credentials cannot be loaded; nothing is contacted over the
/// network until the first request arrives.
pub async fn build_booking_state(config: &AppConfig) -> Result<BookingState, TradebookError> {
    let calendar_hub = create_calendar_hub(&config.gcal).await?;
    let calendar: Arc<dyn BusyIntervalSource> = Arc::new(GoogleCalendarService::from_config(
        Arc::new(calendar_hub),
        &config.gcal,
    ));
    info!("Calendar source ready for {}", config.gcal.calendar_id);

    let travel: Arc<dyn TravelTimeEstimator> = Arc::new(DistanceMatrixClient::new(&config.maps));
    info!("Travel estimates via {}", config.maps.base_url);

    Ok(BookingState::from_config(config, travel, calendar))
}
