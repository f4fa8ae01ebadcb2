// --- File: crates/tradebook_config/src/models.rs ---

use chrono_tz::Tz;
use config::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;

// --- General Server Config ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

// --- Google Calendar Config ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct GcalConfig {
    pub key_path: String,    // Loaded via GOOGLE_SERVICE_ACCOUNT_FILE or TRADEBOOK__GCAL__KEY_PATH
    pub calendar_id: String, // Loaded via GOOGLE_CALENDAR_ID or TRADEBOOK__GCAL__CALENDAR_ID
    /// IANA zone used to place whole-day calendar entries. Defaults to UTC.
    #[serde(default)]
    pub time_zone: Option<String>,
}

// --- Distance Matrix Config ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct MapsConfig {
    pub api_key: String, // Loaded via GOOGLE_MAPS_API_KEY or TRADEBOOK__MAPS__API_KEY
    pub base_url: String,
}

// --- Booking Config ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct BookingConfig {
    /// Address every trip starts from.
    pub base_address: String,
    /// IANA zone for request times sent without an offset. Defaults to UTC.
    #[serde(default)]
    pub time_zone: Option<String>,
    /// Extra or overriding job durations in minutes, keyed by job type.
    #[serde(default)]
    pub job_durations: HashMap<String, u32>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct LogConfig {
    pub level: Option<String>,
    /// When set, logs are also written to a daily rolling file in this directory.
    pub directory: Option<String>,
}

// --- Unified App Configuration ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub gcal: GcalConfig,
    pub maps: MapsConfig,
    pub booking: BookingConfig,
    #[serde(default)]
    pub log: LogConfig,
}

impl AppConfig {
    /// Checks the values serde cannot: required strings must be non-empty and time zones
    /// must name a known IANA zone.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty("gcal.key_path", &self.gcal.key_path)?;
        require_non_empty("gcal.calendar_id", &self.gcal.calendar_id)?;
        require_non_empty("maps.api_key", &self.maps.api_key)?;
        require_non_empty("maps.base_url", &self.maps.base_url)?;
        require_non_empty("booking.base_address", &self.booking.base_address)?;

        parse_time_zone("gcal.time_zone", self.gcal.time_zone.as_deref())?;
        parse_time_zone("booking.time_zone", self.booking.time_zone.as_deref())?;
        Ok(())
    }
}

impl GcalConfig {
    pub fn tz(&self) -> Tz {
        parse_time_zone("gcal.time_zone", self.time_zone.as_deref()).unwrap_or(Tz::UTC)
    }
}

impl BookingConfig {
    pub fn tz(&self) -> Tz {
        parse_time_zone("booking.time_zone", self.time_zone.as_deref()).unwrap_or(Tz::UTC)
    }
}

fn require_non_empty(path: &str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Message(format!(
            "missing required configuration value `{}`",
            path
        )));
    }
    Ok(())
}

fn parse_time_zone(path: &str, value: Option<&str>) -> Result<Tz, ConfigError> {
    match value {
        None => Ok(Tz::UTC),
        Some(name) => Tz::from_str(name).map_err(|_| {
            ConfigError::Message(format!("`{}` is not a known time zone: {}", path, name))
        }),
    }
}
