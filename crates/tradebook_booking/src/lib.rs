// --- File: crates/tradebook_booking/src/lib.rs ---
pub mod doc;
pub mod duration;
pub mod handlers;
pub mod logic;
#[cfg(test)]
mod logic_proptest;
pub mod routes;

pub use duration::JobDurationTable;
pub use handlers::BookingState;
pub use logic::{AvailabilityResolver, AvailabilityResult, AvailabilityWindow, JobRequest};
pub use routes::routes;
