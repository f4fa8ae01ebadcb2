// --- File: crates/tradebook_maps/src/models.rs ---
//! Subset of the Distance Matrix JSON response that the estimator reads.
//!
//! Every field is optional so that a response with an unexpected shape still
//! deserializes and the missing piece can be reported precisely.

use serde::Deserialize;

use crate::error::MapsError;

#[derive(Deserialize, Debug, Default)]
pub struct DistanceMatrixResponse {
    /// Top-level request status, e.g. `OK` or `REQUEST_DENIED`.
    pub status: Option<String>,
    pub error_message: Option<String>,
    pub rows: Option<Vec<MatrixRow>>,
}

#[derive(Deserialize, Debug, Default)]
pub struct MatrixRow {
    pub elements: Option<Vec<MatrixElement>>,
}

#[derive(Deserialize, Debug, Default)]
pub struct MatrixElement {
    /// Per-pair status, e.g. `OK`, `NOT_FOUND` or `ZERO_RESULTS`.
    pub status: Option<String>,
    pub duration: Option<TextValue>,
    pub distance: Option<TextValue>,
}

#[derive(Deserialize, Debug, Default)]
pub struct TextValue {
    pub text: Option<String>,
    pub value: Option<f64>,
}

impl DistanceMatrixResponse {
    /// Travel time in seconds for the first origin/destination pair.
    pub fn first_leg_seconds(&self) -> Result<f64, MapsError> {
        let row = self
            .rows
            .as_deref()
            .and_then(|rows| rows.first())
            .ok_or(MapsError::MissingField("rows"))?;

        let element = row
            .elements
            .as_deref()
            .and_then(|elements| elements.first())
            .ok_or(MapsError::MissingField("elements"))?;

        let status = element.status.as_deref().unwrap_or_default();
        if status != "OK" {
            return Err(MapsError::ElementStatus {
                status: status.to_string(),
            });
        }

        element
            .duration
            .as_ref()
            .and_then(|duration| duration.value)
            .ok_or(MapsError::MissingField("duration.value"))
    }

    /// Travel time in minutes for the first origin/destination pair.
    pub fn first_leg_minutes(&self) -> Result<f64, MapsError> {
        Ok(self.first_leg_seconds()? / 60.0)
    }
}
