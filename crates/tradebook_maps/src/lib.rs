// --- File: crates/tradebook_maps/src/lib.rs ---
pub mod client;
pub mod error;
pub mod models;
#[cfg(test)]
mod models_test;

pub use client::DistanceMatrixClient;
pub use error::MapsError;
pub use models::DistanceMatrixResponse;
