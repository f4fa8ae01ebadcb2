// File: crates/tradebook_booking/src/doc.rs

#![cfg(feature = "openapi")]
use utoipa::OpenApi;

use crate::handlers::{AvailabilityResponse, JobRequestPayload, SlotResponse};

#[derive(OpenApi)]
#[openapi(
    paths(crate::handlers::get_open_slots_handler),
    components(schemas(JobRequestPayload, AvailabilityResponse, SlotResponse)),
    tags(
        (name = "Booking", description = "Job availability checks")
    )
)]
pub struct BookingApiDoc;
