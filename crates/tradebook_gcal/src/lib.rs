// --- File: crates/tradebook_gcal/src/lib.rs ---
pub mod auth;
pub mod service;

pub use auth::{create_calendar_hub, HubType};
pub use service::{
    busy_interval_from_event, busy_intervals_from_events, GcalServiceError, GoogleCalendarService,
};
