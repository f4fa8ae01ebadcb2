// --- File: crates/tradebook_maps/src/error.rs ---
use thiserror::Error;

/// Reasons a Distance Matrix lookup produced no usable estimate.
///
/// None of these reach an HTTP caller: the estimator logs them and answers `0.0`.
#[derive(Error, Debug)]
pub enum MapsError {
    /// Transport-level failure talking to the Distance Matrix API
    #[error("Distance Matrix request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    /// The API answered with a non-success HTTP status
    #[error("Distance Matrix returned HTTP {status_code}")]
    HttpStatus { status_code: u16 },

    /// The body was not JSON of the expected shape
    #[error("Failed to decode Distance Matrix response: {0}")]
    DecodeError(#[from] serde_json::Error),

    /// The JSON was valid but lacked part of the rows/elements/duration path
    #[error("Distance Matrix response is missing {0}")]
    MissingField(&'static str),

    /// The origin/destination pair was not routable
    #[error("Distance Matrix element status {status}")]
    ElementStatus { status: String },
}
