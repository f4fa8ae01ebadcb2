//! Environment variable handling for the Tradebook service.
//!
//! Two naming schemes are understood: the structured `TRADEBOOK__SECTION__KEY` form read
//! by the `config` crate, and the flat variables of earlier deployments
//! (`GOOGLE_CALENDAR_ID`, `BASE_ADDRESS`, ...), which are mapped onto configuration paths
//! here.

use config::ConfigError;
use serde_json::{Map, Value};
use std::env;

/// The default prefix for configuration environment variables
pub const DEFAULT_PREFIX: &str = "TRADEBOOK";

/// The separator for configuration environment variables
pub const CONFIG_SEPARATOR: &str = "__";

/// Flat variable name and the configuration path it feeds.
pub const LEGACY_VARIABLES: [(&str, &str); 5] = [
    ("GOOGLE_SERVICE_ACCOUNT_FILE", "gcal.key_path"),
    ("GOOGLE_CALENDAR_ID", "gcal.calendar_id"),
    ("GOOGLE_MAPS_API_KEY", "maps.api_key"),
    ("BASE_ADDRESS", "booking.base_address"),
    ("PORT", "server.port"),
];

/// Get the prefix for configuration environment variables
pub fn get_config_prefix() -> String {
    env::var("PREFIX").unwrap_or_else(|_| DEFAULT_PREFIX.to_string())
}

/// Builds a nested JSON object from the flat legacy variables that are set.
///
/// `lookup` resolves a variable name to its value, which keeps this testable without
/// touching the process environment. `PORT` must be a valid port number.
pub fn legacy_overrides<F>(lookup: F) -> Result<Value, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut root = Map::new();

    for (variable, path) in LEGACY_VARIABLES {
        let Some(raw) = lookup(variable) else {
            continue;
        };
        let value = if path == "server.port" {
            let port: u16 = raw.trim().parse().map_err(|_| {
                ConfigError::Message(format!("{} is not a valid port: {:?}", variable, raw))
            })?;
            Value::from(port)
        } else {
            Value::String(raw)
        };
        insert_path(&mut root, path, value);
    }

    Ok(Value::Object(root))
}

fn insert_path(root: &mut Map<String, Value>, path: &str, value: Value) {
    match path.split_once('.') {
        Some((section, rest)) => {
            let entry = root
                .entry(section.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if let Value::Object(map) = entry {
                insert_path(map, rest, value);
            }
        }
        None => {
            root.insert(path.to_string(), value);
        }
    }
}
