// --- File: crates/tradebook_booking/src/routes.rs ---

use crate::handlers::{get_open_slots_handler, BookingState};
use axum::{routing::post, Router};
use std::sync::Arc;

/// Creates a router containing the booking routes.
pub fn routes(state: Arc<BookingState>) -> Router {
    Router::new()
        .route("/get_open_slots", post(get_open_slots_handler))
        .with_state(state)
}
