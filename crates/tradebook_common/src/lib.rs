// --- File: crates/tradebook_common/src/lib.rs ---

// Declare modules within this crate
pub mod error; // Error handling
pub mod http; // HTTP utilities
pub mod logging; // Logging utilities
pub mod services; // Collaborator abstractions

// Re-export error types and utilities for easier access
pub use error::{
    external_service_error, internal_error, validation_error, HttpStatusCode,
    TradebookError,
};

// Re-export HTTP utilities for easier access
pub use http::{client::HTTP_CLIENT, IntoHttpResponse};

pub use services::{
    BoxFuture, BusyInterval, BusyIntervalSource, InfallibleFuture, TravelTimeEstimator,
};
