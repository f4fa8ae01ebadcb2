// --- File: crates/tradebook_maps/src/client.rs ---
//! Distance Matrix client and its [`TravelTimeEstimator`] implementation.

use reqwest::Client;
use tracing::{debug, warn};
use tradebook_common::{InfallibleFuture, TravelTimeEstimator, HTTP_CLIENT};
use tradebook_config::MapsConfig;

use crate::error::MapsError;
use crate::models::DistanceMatrixResponse;

/// Client for the Google Distance Matrix JSON API.
#[derive(Clone)]
pub struct DistanceMatrixClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl DistanceMatrixClient {
    /// Uses the shared HTTP client and its default timeout.
    pub fn new(config: &MapsConfig) -> Self {
        Self::with_client(HTTP_CLIENT.clone(), &config.base_url, &config.api_key)
    }

    pub fn with_client(http: Client, base_url: &str, api_key: &str) -> Self {
        Self {
            http,
            base_url: base_url.to_string(),
            api_key: api_key.to_string(),
        }
    }

    /// Performs one Distance Matrix request for a single origin/destination pair.
    pub async fn fetch(
        &self,
        origin: &str,
        destination: &str,
    ) -> Result<DistanceMatrixResponse, MapsError> {
        let response = self
            .http
            .get(&self.base_url)
            .query(&[
                ("origins", origin),
                ("destinations", destination),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(MapsError::HttpStatus {
                status_code: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        let parsed: DistanceMatrixResponse = serde_json::from_slice(&body)?;
        if let Some(message) = parsed.error_message.as_deref() {
            debug!(
                "Distance Matrix status {:?}: {}",
                parsed.status.as_deref(),
                message
            );
        }
        Ok(parsed)
    }

    /// Travel time in minutes, with every failure reported as an error.
    pub async fn lookup_minutes(&self, origin: &str, destination: &str) -> Result<f64, MapsError> {
        self.fetch(origin, destination).await?.first_leg_minutes()
    }
}

impl TravelTimeEstimator for DistanceMatrixClient {
    fn travel_minutes<'a>(
        &'a self,
        origin: &'a str,
        destination: &'a str,
    ) -> InfallibleFuture<'a, f64> {
        Box::pin(async move {
            match self.lookup_minutes(origin, destination).await {
                Ok(minutes) => {
                    debug!("Travel time to {}: {:.1} minutes", destination, minutes);
                    minutes
                }
                Err(e) => {
                    warn!(
                        "No travel estimate to {}, assuming 0 minutes: {}",
                        destination, e
                    );
                    0.0
                }
            }
        })
    }
}
